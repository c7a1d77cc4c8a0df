use std::iter;

use super::{divide_with_ceil, ArrivalBound};
use crate::time::Duration;

/// A sporadic arrival process (originally due to Mok) with optional
/// release jitter.
///
/// Setting `jitter` to zero yields the classic sporadic model, in which
/// jobs are separated by at least `min_inter_arrival` time units.
/// Setting `jitter` to a positive value and `min_inter_arrival` to an
/// exact period yields the periodic-with-jitter model: jobs arrive
/// exactly `min_inter_arrival` time units apart, but may be released up
/// to `jitter` time units late.
///
/// A note on terminology: following standard convention, the
/// *arrival time* of a job denotes the time at which (conceptually)
/// the job is triggered, whereas its *release time* is the time at
/// which it actually becomes ready for execution.
#[derive(Copy, Clone, Debug)]
pub struct Sporadic {
    /// The minimum inter-arrival separation between any two job
    /// *arrivals* of the task.
    pub min_inter_arrival: Duration,
    /// The maximum release jitter, i.e., the maximum time between
    /// the *arrival* and the *release* of a job.
    pub jitter: Duration,
}

impl Sporadic {
    /// A jitter-free sporadic process with the given minimum separation.
    pub fn new(min_inter_arrival: Duration) -> Self {
        Sporadic {
            min_inter_arrival,
            jitter: Duration::zero(),
        }
    }

    /// A periodic process with the given release jitter.
    pub fn periodic_with_jitter(period: Duration, jitter: Duration) -> Self {
        Sporadic {
            min_inter_arrival: period,
            jitter,
        }
    }
}

impl ArrivalBound for Sporadic {
    fn number_arrivals(&self, delta: Duration) -> usize {
        if delta.is_non_zero() {
            divide_with_ceil(delta + self.jitter, self.min_inter_arrival) as usize
        } else {
            0
        }
    }

    fn steps_iter<'a>(&'a self) -> Box<dyn Iterator<Item = Duration> + 'a> {
        Box::new(
            iter::once(Duration::epsilon()).chain(
                (1..)
                    .filter(move |j| self.min_inter_arrival * *j + Duration::epsilon() > self.jitter)
                    .map(move |j| self.min_inter_arrival * j + Duration::epsilon() - self.jitter),
            ),
        )
    }

    fn default_prefix_horizon(&self) -> Duration {
        if self.jitter.is_zero() {
            self.min_inter_arrival
        } else {
            self.min_inter_arrival * 10 + self.jitter
        }
    }
}
