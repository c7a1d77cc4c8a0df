//! The outcome of a response-time analysis.

use crate::time::{Duration, Offset};

/// Everything an analysis learns in the course of bounding a task's
/// response time: the busy-window bound used to cut off the search, the
/// search space that was actually explored, and (if found) the final
/// response-time bound.
///
/// A solution for which [Solution::bound_found] is `false` means the
/// search diverged before the given horizon was reached; in that case
/// [Solution::search_space] and [Solution::response_time_bound] are both
/// `None`, even if a finite busy-window bound had been found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// The busy-window bound computed as part of the search, if one was
    /// found below the horizon.
    pub busy_window_bound: Option<Duration>,
    /// The offsets that were examined, paired with the per-offset
    /// response-time bound found at that offset (or `None` if the
    /// per-offset search diverged).
    pub search_space: Option<Vec<(Offset, Option<Duration>)>>,
    /// The overall response-time bound, i.e., the maximum over all
    /// per-offset bounds in [Solution::search_space].
    pub response_time_bound: Option<Duration>,
}

impl Solution {
    /// Record that not even a busy-window bound could be found.
    pub fn no_search_space_found() -> Self {
        Solution {
            busy_window_bound: None,
            search_space: None,
            response_time_bound: None,
        }
    }

    /// Record that a busy-window bound was found, together with the
    /// resulting per-offset search space. Returns a solution with no
    /// response-time bound if the search space is empty or if any
    /// individual offset failed to converge.
    pub fn from_search_space(
        busy_window_bound: Duration,
        search_space: Vec<(Offset, Option<Duration>)>,
    ) -> Self {
        let response_time_bound = if search_space.iter().any(|(_, r)| r.is_none()) {
            None
        } else {
            search_space.iter().filter_map(|(_, r)| *r).max()
        };
        Solution {
            busy_window_bound: Some(busy_window_bound),
            search_space: Some(search_space),
            response_time_bound,
        }
    }

    /// Whether a finite response-time bound was found.
    pub fn bound_found(&self) -> bool {
        self.response_time_bound.is_some()
    }
}

/// Build a [Solution] from a sparse, finite search space: an iterator
/// over `(offset, response_time_bound)` pairs, where `response_time_bound`
/// is `None` if the per-offset search diverged.
///
/// Returns `None` if `busy_window_bound` itself is `None`, i.e., if the
/// search diverged before a busy-window bound could even be established.
pub fn sparse_finite_search_space(
    offsets: impl Iterator<Item = (Offset, Option<Duration>)>,
    busy_window_bound: Option<Duration>,
) -> Option<Solution> {
    busy_window_bound.map(|bw| Solution::from_search_space(bw, offsets.collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_search_space_is_not_found() {
        let s = Solution::no_search_space_found();
        assert!(!s.bound_found());
        assert!(s.search_space.is_none());
        assert!(s.response_time_bound.is_none());
    }

    #[test]
    fn empty_search_space_yields_no_bound() {
        let s = sparse_finite_search_space(std::iter::empty(), None);
        assert!(s.is_none());
    }

    #[test]
    fn divergent_offset_yields_no_bound() {
        let s = sparse_finite_search_space(
            vec![(Offset::from_time_zero(Duration::zero()), None)].into_iter(),
            Some(Duration::from(10)),
        )
        .unwrap();
        assert!(!s.bound_found());
    }
}
