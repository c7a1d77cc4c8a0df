//! Response-time analysis for earliest-deadline-first (EDF) preemptive
//! and non-preemptive uniprocessor scheduling.
//!
//! ## Citation
//!
//! The provided analysis generalizes the approach of:
//!
//! - S. Bozhko and B. Brandenburg, "[Abstract Response-Time Analysis: A Formal Foundation for the Busy-Window Principle](https://drops.dagstuhl.de/opus/volltexte/2020/12385/pdf/LIPIcs-ECRTS-2020-22.pdf)", *Proceedings of the 32nd Euromicro Conference on Real-Time Systems (ECRTS 2020)*, pp. 22:1--22:24, July 2020.

use crate::arrival::ArrivalBound;
use crate::demand::{self, Aggregate, RequestBound};
use crate::error::Result;
use crate::fixed_point::{self, SearchResult};
use crate::solution::{sparse_finite_search_space, Solution};
use crate::supply::SupplyBound;
use crate::task::{Task, TaskSet};
use crate::time::{Duration, Offset, Service};
use crate::wcet;

type TaskRbf<'a> = demand::RBF<&'a dyn ArrivalBound, wcet::Scalar>;

/// The priority-inversion blocking bound at a given offset `a` into the
/// busy window: the longest non-preemptive region any task whose
/// deadline falls *after* `tua`'s own deadline (measured from `a`) may
/// hold the processor for.
pub fn blocking_bound(task_set: &TaskSet, tua: &Task, a: Offset) -> Result<Service> {
    let d_tua = tua.deadline()?;
    let threshold = a.since_time_zero() + d_tua;
    let mut bound = Service::none();
    for t in task_set.others(tua) {
        if t.deadline()? > threshold {
            bound = bound.max(t.execution.max_nps().saturating_sub(Service::epsilon()));
        }
    }
    Ok(bound)
}

/// The offsets at which [blocking_bound] may change value: the distinct
/// `deadline(other) - deadline(tua)` differences, ascending.
pub fn blocking_bound_steps(task_set: &TaskSet, tua: &Task) -> Result<Vec<Offset>> {
    let d_tua = tua.deadline()?;
    let mut diffs = Vec::new();
    for t in task_set.others(tua) {
        let d_other = t.deadline()?;
        if d_other > d_tua {
            diffs.push(Offset::from_time_zero(d_other - d_tua));
        }
    }
    diffs.sort();
    diffs.dedup();
    Ok(diffs)
}

/// An offset-independent busy-window bound derived purely from `tua`'s
/// own demand and the (offset-zero) non-preemptive blocking bound.
/// Cheap to compute, but not always the tighter of the two envelopes --
/// see [busy_window_bound].
pub fn busy_window_bound_nps<SBF: SupplyBound>(
    task_set: &TaskSet,
    tua: &Task,
    supply: &SBF,
    horizon: Duration,
) -> Result<SearchResult> {
    let blocking = blocking_bound(task_set, tua, Offset::from_time_zero(Duration::zero()))?;
    let tua_rbf = tua.rbf();
    Ok(fixed_point::search(supply, horizon, |delta| {
        blocking + tua_rbf.service_needed(delta)
    }))
}

/// A busy-window bound derived from the total demand of every task in
/// the set, ignoring blocking; sound regardless of deadlines because
/// EDF is work-conserving.
pub fn busy_window_bound_rbf<SBF: SupplyBound>(
    task_set: &TaskSet,
    supply: &SBF,
    horizon: Duration,
) -> SearchResult {
    let demand = Aggregate::new(task_set.iter().map(Task::rbf).collect());
    fixed_point::search(supply, horizon, |delta| demand.service_needed(delta))
}

/// The reported busy-window bound: the larger (and hence safe) of the
/// two complementary envelopes [busy_window_bound_nps] and
/// [busy_window_bound_rbf], since neither dominates the other in every
/// regime.
pub fn busy_window_bound<SBF: SupplyBound>(
    task_set: &TaskSet,
    tua: &Task,
    supply: &SBF,
    horizon: Duration,
) -> Result<SearchResult> {
    let nps = busy_window_bound_nps(task_set, tua, supply, horizon)?;
    let rbf = busy_window_bound_rbf(task_set, supply, horizon);
    Ok(match (nps, rbf) {
        (Ok(a), Ok(b)) => Ok(a.max(b)),
        (Ok(a), Err(_)) => Ok(a),
        (Err(_), Ok(b)) => Ok(b),
        (Err(e), Err(_)) => Err(e),
    })
}

/// The offsets at which the per-offset response-time equation needs to
/// be evaluated: the merged arrival steps of every task, together with
/// the step-enumeration of the offset-indexed blocking bound.
pub fn points_of_interest(task_set: &TaskSet, tua: &Task) -> Result<Vec<Offset>> {
    let all_rbfs: Vec<TaskRbf<'_>> = task_set.iter().map(Task::rbf).collect();
    let demand = Aggregate::new(all_rbfs);
    let mut points: Vec<Offset> = demand::step_offsets(&demand).collect();
    points.extend(blocking_bound_steps(task_set, tua)?);
    points.sort();
    points.dedup();
    Ok(points)
}

/// The bounded prefix of [points_of_interest] actually worth exploring:
/// every point below the busy-window bound.
pub fn search_space<SBF: SupplyBound>(
    task_set: &TaskSet,
    tua: &Task,
    supply: &SBF,
    horizon: Duration,
) -> Result<Option<Vec<Offset>>> {
    let bw = match busy_window_bound(task_set, tua, supply, horizon)? {
        Ok(l) => l,
        Err(_) => return Ok(None),
    };
    let max_offset = Offset::from_time_zero(bw);
    let points: Vec<Offset> = points_of_interest(task_set, tua)?
        .into_iter()
        .take_while(|a| *a < max_offset)
        .collect();
    Ok(if points.is_empty() { None } else { Some(points) })
}

/// Bound the worst-case response time of `tua` when scheduled alongside
/// `task_set` under EDF, given a `supply` model and a divergence
/// `horizon`.
pub fn rta<SBF: SupplyBound>(
    task_set: &TaskSet,
    tua: &Task,
    supply: &SBF,
    horizon: Duration,
) -> Result<Solution> {
    let d_tua = tua.deadline()?;
    let others: Vec<(TaskRbf<'_>, Duration)> = task_set
        .others(tua)
        .map(|t| Ok((t.rbf(), t.deadline()?)))
        .collect::<Result<_>>()?;
    let tua_rbf = tua.rbf();
    let (_rtct, rem_cost) = tua.execution.run_to_completion_threshold();

    let bw = match busy_window_bound(task_set, tua, supply, horizon)? {
        Ok(l) => l,
        Err(_) => return Ok(Solution::no_search_space_found()),
    };
    let max_offset = Offset::from_time_zero(bw);
    let points = points_of_interest(task_set, tua)?
        .into_iter()
        .take_while(|a| *a < max_offset);

    let per_offset = points
        .map(|a| -> Result<(Offset, Option<Duration>)> {
            let blocking = blocking_bound(task_set, tua, a)?;
            let rhs = |af: Duration| {
                // the job under analysis's own contribution is counted
                // once via `self_interference`, via its own RBF, rather
                // than via the interference sum below.
                let self_interference =
                    tua_rbf.service_needed(a.since_time_zero() + Duration::epsilon());
                let tua_demand = self_interference.saturating_sub(rem_cost);
                let interfering_demand: Service = others
                    .iter()
                    .map(|(rbf, d_other)| {
                        // min(RBF(A+x), DBF(A+deadline(tua))), expressed
                        // via RBF alone since DBF(d) = RBF(d - deadline(other)).
                        let dbf_limit = (a.since_time_zero() + d_tua).saturating_sub(*d_other);
                        rbf.service_needed(af.min(dbf_limit))
                    })
                    .sum();
                blocking + tua_demand + interfering_demand
            };
            let af = fixed_point::search(supply, horizon, rhs);
            let r = af
                .ok()
                .map(|v| v.saturating_sub(a.since_time_zero()) + Duration::from(rem_cost));
            Ok((a, r))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(sparse_finite_search_space(per_offset.into_iter(), Some(bw))
        .unwrap_or_else(Solution::no_search_space_found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrival::Periodic;
    use crate::supply::IdealProcessor;
    use crate::task::Execution;

    #[test]
    fn preemptive_plus_nonpreemptive_blocker() {
        let tua = Task::new(
            Periodic { period: Duration::from(5) },
            Execution::FullyPreemptive { wcet: Service::from(2) },
        )
        .with_deadline(Duration::from(10));
        let lo = Task::new(
            Periodic { period: Duration::from(20) },
            Execution::FullyNonPreemptive { wcet: Service::from(4) },
        )
        .with_deadline(Duration::from(12));
        let tasks = TaskSet::new(vec![tua, lo]);
        let cpu = IdealProcessor::new(1).unwrap();
        let tua_ref = tasks.iter().next().unwrap();

        let steps = blocking_bound_steps(&tasks, tua_ref).unwrap();
        assert_eq!(steps, vec![Offset::from_time_zero(Duration::from(2))]);

        let nps = busy_window_bound_nps(&tasks, tua_ref, &cpu, Duration::from(1000))
            .unwrap()
            .unwrap();
        assert_eq!(nps, Duration::from(5));

        let rbf = busy_window_bound_rbf(&tasks, &cpu, Duration::from(1000)).unwrap();
        assert_eq!(rbf, Duration::from(8));

        let bw = busy_window_bound(&tasks, tua_ref, &cpu, Duration::from(1000))
            .unwrap()
            .unwrap();
        assert_eq!(bw, Duration::from(8));

        let search = search_space(&tasks, tua_ref, &cpu, Duration::from(1000))
            .unwrap()
            .unwrap();
        assert_eq!(
            search,
            vec![
                Offset::from_time_zero(Duration::zero()),
                Offset::from_time_zero(Duration::from(2)),
                Offset::from_time_zero(Duration::from(5)),
            ]
        );

        let solution = rta(&tasks, tua_ref, &cpu, Duration::from(1000)).unwrap();
        assert_eq!(solution.response_time_bound, Some(Duration::from(5)));
    }

    #[test]
    fn missing_deadline_is_an_error() {
        let tua = Task::new(
            Periodic { period: Duration::from(5) },
            Execution::FullyPreemptive { wcet: Service::from(2) },
        );
        let tasks = TaskSet::new(vec![tua]);
        let cpu = IdealProcessor::new(1).unwrap();
        let tua_ref = tasks.iter().next().unwrap();
        assert!(rta(&tasks, tua_ref, &cpu, Duration::from(1000)).is_err());
    }
}
