//! Response-time analysis for fixed-priority (FP) preemptive and
//! non-preemptive uniprocessor scheduling.
//!
//! Unlike the textbook presentation, which gives a separate formula per
//! preemption model, this module is parameterized over [Execution] and
//! so covers all four preemption models with a single set of equations.

use crate::arrival::ArrivalBound;
use crate::demand::{self, RequestBound, Slice};
use crate::error::Result;
use crate::fixed_point::{self, SearchResult};
use crate::solution::{sparse_finite_search_space, Solution};
use crate::supply::SupplyBound;
use crate::task::{Task, TaskSet};
use crate::time::{Duration, Offset, Service};
use crate::wcet;

type TaskRbf<'a> = demand::RBF<&'a dyn ArrivalBound, wcet::Scalar>;

/// The priority-inversion blocking bound `B_FP(tua)`: the longest
/// non-preemptive region any strictly-lower-priority task may hold the
/// processor for.
pub fn blocking_bound(task_set: &TaskSet, tua: &Task) -> Result<Service> {
    let prio = tua.priority()?;
    let mut bound = Service::none();
    for t in task_set.others(tua) {
        if t.priority()? < prio {
            bound = bound.max(t.execution.last_nps().saturating_sub(Service::epsilon()));
        }
    }
    Ok(bound)
}

/// The request-bound functions of every task with priority at least as
/// high as `tua`, excluding `tua` itself.
fn higher_or_equal_priority_interference<'a>(
    task_set: &'a TaskSet,
    tua: &'a Task,
) -> Result<Vec<TaskRbf<'a>>> {
    let prio = tua.priority()?;
    let mut rbfs = Vec::new();
    for t in task_set.others(tua) {
        if t.priority()? >= prio {
            rbfs.push(t.rbf());
        }
    }
    Ok(rbfs)
}

/// The longest interval during which the processor may be continuously
/// busy with work of priority at least as high as `tua`, including the
/// blocking a single lower-priority job may contribute at the start.
pub fn busy_window_bound<SBF: SupplyBound>(
    task_set: &TaskSet,
    tua: &Task,
    supply: &SBF,
    horizon: Duration,
) -> Result<SearchResult> {
    let blocking = blocking_bound(task_set, tua)?;
    let hep = higher_or_equal_priority_interference(task_set, tua)?;
    let interference = Slice::of(&hep);
    let tua_rbf = tua.rbf();
    Ok(fixed_point::search(supply, horizon, |delta| {
        blocking + tua_rbf.service_needed(delta) + interference.service_needed(delta)
    }))
}

/// The offsets at which the per-offset response-time equation needs to
/// be evaluated: every step of `tua`'s own demand, merged with every
/// step of the interference it suffers from higher-or-equal-priority
/// tasks.
pub fn points_of_interest(task_set: &TaskSet, tua: &Task) -> Result<Vec<Offset>> {
    let hep = higher_or_equal_priority_interference(task_set, tua)?;
    let interference = Slice::of(&hep);
    let tua_rbf = tua.rbf();
    let mut points: Vec<Offset> = demand::step_offsets(&tua_rbf).collect();
    points.extend(demand::step_offsets(&interference));
    points.sort();
    points.dedup();
    Ok(points)
}

/// The bounded prefix of [points_of_interest] actually worth exploring:
/// every point below the busy-window bound. `None` if the busy window
/// itself diverges or if no point of interest lies within it.
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
/// `task_set` under fixed-priority scheduling, given a `supply` model
/// and a divergence `horizon`.
pub fn rta<SBF: SupplyBound>(
    task_set: &TaskSet,
    tua: &Task,
    supply: &SBF,
    horizon: Duration,
) -> Result<Solution> {
    let blocking = blocking_bound(task_set, tua)?;
    let hep = higher_or_equal_priority_interference(task_set, tua)?;
    let interference = Slice::of(&hep);
    let tua_rbf = tua.rbf();
    let (_rtct, rem_cost) = tua.execution.run_to_completion_threshold();

    let bw = fixed_point::search(supply, horizon, |delta| {
        blocking + tua_rbf.service_needed(delta) + interference.service_needed(delta)
    });
    let bw = match bw {
        Ok(l) => l,
        Err(_) => return Ok(Solution::no_search_space_found()),
    };

    let max_offset = Offset::from_time_zero(bw);
    let points = demand::step_offsets(&tua_rbf)
        .chain(demand::step_offsets(&interference))
        .filter(|a| *a < max_offset);
    let mut points: Vec<Offset> = points.collect();
    points.sort();
    points.dedup();

    let per_offset = points.into_iter().map(|a| {
        let rhs = |af: Duration| {
            // the job under analysis has already contributed one unit of
            // demand via its own RBF step at `a`; count it once, via
            // `self_interference`, rather than twice via `interference`.
            let self_interference = tua_rbf.service_needed(a.since_time_zero() + Duration::epsilon());
            let tua_demand = self_interference.saturating_sub(rem_cost);
            blocking + tua_demand + interference.service_needed(af)
        };
        let af = fixed_point::search(supply, horizon, rhs);
        let r = af
            .ok()
            .map(|v| v.saturating_sub(a.since_time_zero()) + Duration::from(rem_cost));
        (a, r)
    });

    Ok(sparse_finite_search_space(per_offset, Some(bw)).unwrap_or_else(Solution::no_search_space_found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrival::Periodic;
    use crate::supply::IdealProcessor;
    use crate::task::Execution;

    #[test]
    fn two_task_preemptive_interference() {
        let hi = Task::new(
            Periodic { period: Duration::from(4) },
            Execution::FullyPreemptive { wcet: Service::from(1) },
        )
        .with_priority(10);
        let lo = Task::new(
            Periodic { period: Duration::from(10) },
            Execution::FullyNonPreemptive { wcet: Service::from(3) },
        )
        .with_priority(1);
        let tasks = TaskSet::new(vec![hi, lo]);
        let cpu = IdealProcessor::new(1).unwrap();

        let b = blocking_bound(&tasks, &tasks.iter().next().unwrap()).unwrap();
        assert_eq!(b, Service::from(2));

        let bw = busy_window_bound(&tasks, &tasks.iter().next().unwrap(), &cpu, Duration::from(1000))
            .unwrap()
            .unwrap();
        assert_eq!(bw, Duration::from(3));

        let search = search_space(&tasks, &tasks.iter().next().unwrap(), &cpu, Duration::from(1000))
            .unwrap()
            .unwrap();
        assert_eq!(search, vec![Offset::from_time_zero(Duration::zero())]);

        let solution = rta(&tasks, &tasks.iter().next().unwrap(), &cpu, Duration::from(1000)).unwrap();
        assert_eq!(solution.response_time_bound, Some(Duration::from(3)));
    }

    #[test]
    fn unschedulable_task_diverges() {
        let hi = Task::new(
            Periodic { period: Duration::from(1) },
            Execution::FullyPreemptive { wcet: Service::from(2) },
        )
        .with_priority(1);
        let tasks = TaskSet::new(vec![hi]);
        let cpu = IdealProcessor::new(1).unwrap();
        let solution = rta(&tasks, &tasks.iter().next().unwrap(), &cpu, Duration::from(100)).unwrap();
        assert!(!solution.bound_found());
    }
}
