//! The generic fixed-point search machinery shared by every scheduling
//! policy: all of FP, EDF, and FIFO reduce their response-time and
//! busy-window equations to a search for the least fixed point of a
//! monotonic demand bound against a supply model.

use crate::demand::RequestBound;
use crate::supply::SupplyBound;
use crate::time::{Duration, Offset, Service};

use std::cmp::Ordering;

use thiserror::Error;

/// Error type returned when a fixed point search fails.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq, PartialOrd)]
pub enum SearchFailure {
    /// No fixed point less than the given divergence threshold was found.
    #[error("no fixed point less than {limit} found for offset {offset}")]
    DivergenceLimitExceeded { offset: Offset, limit: Duration },
}

pub type SearchResult = Result<Duration, SearchFailure>;

/// Conduct an iterative fixed point search up to a given divergence
/// threshold, assuming a given fixed `offset` within the busy window.
///
/// `workload` maps a trial response time to the demand that must be
/// satisfied by `offset + workload`; the search looks for the least
/// response time `F` such that `supply.service_time(workload(F)) <=
/// offset + F`.
pub fn search_with_offset<SBF, RHS>(
    supply: &SBF,
    offset: Offset,
    divergence_limit: Duration,
    workload: &RHS,
) -> SearchResult
where
    SBF: SupplyBound + ?Sized,
    RHS: Fn(Duration) -> Service,
{
    let mut assumed_response_time = Duration::epsilon();
    while assumed_response_time <= divergence_limit {
        let demand = workload(assumed_response_time);
        let response_time_bound = supply
            .service_time(demand)
            .saturating_sub(offset.since_time_zero());
        if response_time_bound <= assumed_response_time {
            // we have converged
            return Ok(response_time_bound);
        } else {
            // continue iterating
            assumed_response_time = response_time_bound
        }
    }
    // if we get here, we failed to converge => no solution
    Err(SearchFailure::DivergenceLimitExceeded {
        offset,
        limit: divergence_limit,
    })
}

/// Very slow, naive search for a fixed point up to the given
/// `divergence_limit`, assuming a given fixed `offset` within the
/// busy window. Do not use --- use [search_with_offset] instead.
#[cfg(debug_assertions)]
fn brute_force_search_with_offset<SBF, RHS>(
    supply: &SBF,
    offset: Offset,
    divergence_limit: Duration,
    workload: &RHS,
) -> SearchResult
where
    SBF: SupplyBound + ?Sized,
    RHS: Fn(Duration) -> Service,
{
    let mut r = Duration::epsilon();
    while r <= divergence_limit {
        let lhs = supply.provided_service(offset.since_time_zero() + r);
        let rhs = workload(r);
        // corner case: zero demand is trivially satisfied immediately
        if rhs.is_none() {
            return Ok(Duration::zero());
        } else if lhs == rhs {
            return Ok(r);
        }
        r += Duration::epsilon();
    }
    Err(SearchFailure::DivergenceLimitExceeded {
        offset,
        limit: divergence_limit,
    })
}

/// Iterative search for a fixed point up to a given
/// `divergence_limit`, assuming a given processor supply and a
/// generic workload bound.
pub fn search<SBF, RHS>(
    supply: &SBF,
    divergence_limit: Duration,
    workload_bound: RHS,
) -> SearchResult
where
    SBF: SupplyBound + ?Sized,
    RHS: Fn(Duration) -> Service,
{
    let zero = Offset::from_time_zero(Duration::zero());
    let bw = search_with_offset(supply, zero, divergence_limit, &workload_bound);
    // In debug mode, compare against the brute-force solution.
    #[cfg(debug_assertions)]
    debug_assert_eq!(
        brute_force_search_with_offset(supply, zero, divergence_limit, &workload_bound),
        bw
    );
    bw
}

/// Given a sequence of [SearchResult]s, either return the maximum
/// finite result (if no divergence errors occurred) or propagate the
/// first error encountered.
pub fn max_response_time(rta_per_offset: impl Iterator<Item = SearchResult>) -> SearchResult {
    rta_per_offset
        .max_by(|a, b| {
            // propagate any error values
            if a.is_err() {
                // if a is an error, we want to report it
                Ordering::Greater
            } else if b.is_err() {
                // if a is not an error, but b is, then we want b
                Ordering::Less
            } else {
                // if neither is an error, report the maximum result
                a.unwrap().cmp(&b.unwrap())
            }
        })
        // If we have no result at all, there are no demand steps, so the
        // response-time is trivially zero.
        .unwrap_or(Ok(Duration::zero()))
}

/// Try to find a response-time bound for a given processor supply
/// model and a given processor demand model.
///
/// The search for a fixed point will be aborted if the given
/// divergence threshold indicated by `limit` is reached.
///
/// The fixed-point search relies on three relevant characterizations
/// of processor demand:
/// - `demand` is the demand model of the task (or callback, etc.)
///   under analysis, from which all points are inferred at which the
///   demand curve exhibits "steps".
/// - `bw_demand_bound` is the right-hand side of the fixed-point
///   equation describing the maximum busy-window length, i.e., the
///   demand of "everything".
/// - `offset_demand_bound` is the right-hand side of the fixed-point
///   equation describing the response time for a given offset,
///   expressed as a function from (offset, trial response time) to
///   demand.
pub fn bound_response_time<SBF, RBF, F, G>(
    supply: &SBF,
    demand: &RBF,
    bw_demand_bound: F,
    offset_demand_bound: G,
    limit: Duration,
) -> SearchResult
where
    SBF: SupplyBound + ?Sized,
    RBF: RequestBound + ?Sized,
    F: Fn(Duration) -> Service,
    G: Fn(Offset, Duration) -> Service,
{
    // find a bound on the maximum busy-window
    let max_bw = search(supply, limit, bw_demand_bound)?;
    // Consider the search space of relevant offsets: all points where
    // the demand curve "steps". Note that steps_iter() yields interval
    // lengths, but we are interested in offsets; since the length of an
    // interval [0, A] is A+1, we subtract one to obtain the offset.
    let offsets = demand
        .steps_iter()
        .map(Offset::closed_from_time_zero)
        .take_while(|x| *x <= Offset::from_time_zero(max_bw));
    // for each relevant offset in the search space,
    let rta_bounds = offsets.map(|offset| {
        let rhs = |delta| offset_demand_bound(offset, delta);
        let rta = search_with_offset(supply, offset, limit, &rhs);
        // In debug mode, compare against the brute-force solution.
        #[cfg(debug_assertions)]
        debug_assert_eq!(brute_force_search_with_offset(supply, offset, limit, &rhs), rta);
        rta
    });
    max_response_time(rta_bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supply::IdealProcessor;

    #[test]
    fn single_job_on_ideal_processor() {
        let cpu = IdealProcessor::new(1).unwrap();
        let wcet = Service::in_interval(5);
        let r = search(&cpu, Duration::from(1000), |_| wcet);
        assert_eq!(r, Ok(Duration::from(5)));
    }

    #[test]
    fn divergence_is_reported() {
        let cpu = IdealProcessor::new(1).unwrap();
        // demand always exceeds what a unit-speed processor can supply
        let r = search(&cpu, Duration::from(20), |delta| {
            Service::from(delta) + Service::epsilon()
        });
        assert!(r.is_err());
    }
}
