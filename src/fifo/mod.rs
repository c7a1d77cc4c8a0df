/*! Response-time analysis for first-in-first-out (FIFO) uniprocessor
scheduling, also commonly known as first-come-first-serve (FCFS).

All tasks share the same response-time bound under FIFO scheduling,
since no task is ever preferred over another; hence, unlike [crate::fp]
and [crate::edf], none of the functions in this module take a "task
under analysis" parameter.

## Citation

The provided analysis is based on the following paper:

- K. Bedarkar, M. Vardishvili, S. Bozhko, M. Maida, and B. Brandenburg, "[From Intuition to Coq: A Case Study in Verified Response-Time Analysis of FIFO Scheduling](https://people.mpi-sws.org/~bbb/papers/pdf/rtss22.pdf)", *Proceedings of the 43rd IEEE Real-Time Systems Symposium (RTSS 2022)*, pp. 197-210, December 2022.

Please cite the paper when using this module for academic work.
*/

use crate::arrival::ArrivalBound;
use crate::demand::{self, Aggregate, RequestBound};
use crate::fixed_point::{self, SearchResult};
use crate::solution::{sparse_finite_search_space, Solution};
use crate::supply::SupplyBound;
use crate::task::{Task, TaskSet};
use crate::time::{Duration, Offset};
use crate::wcet;

type TaskRbf<'a> = demand::RBF<&'a dyn ArrivalBound, wcet::Scalar>;

fn total_demand(task_set: &TaskSet) -> Aggregate<TaskRbf<'_>> {
    Aggregate::new(task_set.iter().map(Task::rbf).collect())
}

/// Bound the maximum length of a busy window during which the
/// processor is continuously occupied by work from `task_set`.
pub fn busy_window_bound<SBF: SupplyBound>(
    task_set: &TaskSet,
    supply: &SBF,
    horizon: Duration,
) -> SearchResult {
    let demand = total_demand(task_set);
    fixed_point::search(supply, horizon, |delta| demand.service_needed(delta))
}

/// The offsets at which the cumulative demand of `task_set` "steps".
pub fn points_of_interest(task_set: &TaskSet) -> Vec<Offset> {
    demand::step_offsets(&total_demand(task_set)).collect()
}

/// The bounded prefix of [points_of_interest] actually worth exploring:
/// every point below the busy-window bound. `None` if the busy window
/// diverges or if no point of interest lies within it.
pub fn search_space<SBF: SupplyBound>(
    task_set: &TaskSet,
    supply: &SBF,
    horizon: Duration,
) -> Option<Vec<Offset>> {
    let bw = busy_window_bound(task_set, supply, horizon).ok()?;
    let max_offset = Offset::from_time_zero(bw);
    let points: Vec<Offset> = points_of_interest(task_set)
        .into_iter()
        .take_while(|a| *a < max_offset)
        .collect();
    if points.is_empty() {
        None
    } else {
        Some(points)
    }
}

/// Bound the worst-case response time shared by every task in
/// `task_set` when scheduled under FIFO, given a `supply` model and a
/// divergence `horizon`.
pub fn rta<SBF: SupplyBound>(task_set: &TaskSet, supply: &SBF, horizon: Duration) -> Solution {
    let demand = total_demand(task_set);
    let bw = match fixed_point::search(supply, horizon, |delta| demand.service_needed(delta)) {
        Ok(l) => l,
        Err(_) => return Solution::no_search_space_found(),
    };

    let max_offset = Offset::from_time_zero(bw);
    let per_offset = demand::step_offsets(&demand)
        .take_while(|a| *a < max_offset)
        .map(|a| {
            let total_service = demand.service_needed(a.closed_since_time_zero());
            let response_time = supply.service_time(total_service).saturating_sub(a.since_time_zero());
            (a, Some(response_time))
        });

    sparse_finite_search_space(per_offset, Some(bw)).unwrap_or_else(Solution::no_search_space_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrival::Periodic;
    use crate::supply::{IdealProcessor, RateDelayModel};
    use crate::task::Execution;
    use crate::time::Service;

    #[test]
    fn single_task_on_ideal_processor() {
        let t = Task::new(
            Periodic { period: Duration::from(3) },
            Execution::FullyPreemptive { wcet: Service::from(1) },
        );
        let tasks = TaskSet::new(vec![t]);
        let cpu = IdealProcessor::new(1).unwrap();

        let bw = busy_window_bound(&tasks, &cpu, Duration::from(1000)).unwrap();
        assert_eq!(bw, Duration::from(1));

        let search = search_space(&tasks, &cpu, Duration::from(1000)).unwrap();
        assert_eq!(search, vec![Offset::from_time_zero(Duration::zero())]);

        let solution = rta(&tasks, &cpu, Duration::from(1000));
        assert_eq!(solution.response_time_bound, Some(Duration::from(1)));
    }

    #[test]
    fn single_task_under_rate_delay_supply() {
        let t = Task::new(
            Periodic { period: Duration::from(3) },
            Execution::FullyPreemptive { wcet: Service::from(1) },
        );
        let tasks = TaskSet::new(vec![t]);
        let supply = RateDelayModel::new(Duration::from(100), Service::from(90), Duration::from(25)).unwrap();

        let bw = busy_window_bound(&tasks, &supply, Duration::from(1000)).unwrap();
        assert_eq!(bw, Duration::from(41));

        let solution = rta(&tasks, &supply, Duration::from(1000));
        assert_eq!(solution.busy_window_bound, Some(Duration::from(41)));
        assert_eq!(solution.response_time_bound, Some(Duration::from(27)));
    }

    #[test]
    fn unschedulable_task_set_diverges() {
        let t = Task::new(
            Periodic { period: Duration::from(1) },
            Execution::FullyPreemptive { wcet: Service::from(2) },
        );
        let tasks = TaskSet::new(vec![t]);
        let cpu = IdealProcessor::new(1).unwrap();
        let solution = rta(&tasks, &cpu, Duration::from(100));
        assert!(!solution.bound_found());
    }
}
