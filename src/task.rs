//! Tasks, task sets, and the preemption models a task may execute under.

use crate::arrival::ArrivalBound;
use crate::demand::{self, RequestBound};
use crate::error::{ModelError, Result};
use crate::time::Service;
use crate::wcet;

/// How a task's jobs may be preempted while they execute.
///
/// Rather than the four textbook preemption models being four unrelated
/// types, they are unified here as variants of a single enum: every
/// variant is fully described by a WCET together with, at most, two
/// additional quantities (the longest and the last non-preemptive
/// region a job may exhibit). This mirrors how the corresponding
/// response-time analyses only ever need two derived quantities from the
/// preemption model -- see [Execution::max_nps] and [Execution::last_nps]
/// -- regardless of which of the four textbook models is in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// A job may be preempted at any instant.
    FullyPreemptive { wcet: Service },
    /// Once started, a job runs to completion without being preempted.
    FullyNonPreemptive { wcet: Service },
    /// A job consists of non-preemptive chunks of unknown length and
    /// placement, save for a known bound on the longest possible chunk.
    FloatingNonPreemptive { wcet: Service, max_nps: Service },
    /// A job consists of non-preemptive regions whose maximum length and
    /// whose final region's length are both known precisely.
    LimitedPreemptive {
        wcet: Service,
        max_nps: Service,
        last_nps: Service,
    },
}

impl Execution {
    pub fn wcet(&self) -> Service {
        match *self {
            Execution::FullyPreemptive { wcet }
            | Execution::FullyNonPreemptive { wcet }
            | Execution::FloatingNonPreemptive { wcet, .. }
            | Execution::LimitedPreemptive { wcet, .. } => wcet,
        }
    }

    /// An upper bound on the length of any non-preemptive region a job of
    /// this task may exhibit. Used to bound the priority inversion that
    /// *other* tasks suffer because of this task.
    pub fn max_nps(&self) -> Service {
        match *self {
            Execution::FullyPreemptive { .. } => Service::none(),
            Execution::FullyNonPreemptive { wcet } => wcet,
            Execution::FloatingNonPreemptive { max_nps, .. } => max_nps,
            Execution::LimitedPreemptive { max_nps, .. } => max_nps,
        }
    }

    /// An upper bound on the length of this task's own *last*
    /// non-preemptive region, i.e., the region that determines how much
    /// of the job's cost can safely be discounted once the job has
    /// reached its run-to-completion threshold. For the floating model,
    /// the maximum chunk length is used conservatively, since the actual
    /// placement of the last chunk is unknown.
    pub fn last_nps(&self) -> Service {
        match *self {
            Execution::FullyPreemptive { .. } => Service::epsilon(),
            Execution::FullyNonPreemptive { wcet } => wcet,
            Execution::FloatingNonPreemptive { max_nps, .. } => max_nps,
            Execution::LimitedPreemptive { last_nps, .. } => last_nps,
        }
    }

    /// The run-to-completion threshold and the remaining cost incurred
    /// after it has been reached, generalized across all four models:
    /// `rtct = wcet - (last_nps - epsilon)`, `rem_cost = wcet - rtct`.
    pub fn run_to_completion_threshold(&self) -> (Service, Service) {
        let rem_cost = self.last_nps().saturating_sub(Service::epsilon());
        let rtct = self.wcet().saturating_sub(rem_cost);
        (rtct, rem_cost)
    }
}

/// A single real-time task: an arrival process, an execution
/// (preemption/cost) model, and optionally a relative deadline and a
/// fixed priority.
///
/// The deadline and priority are optional at construction time because
/// not every policy needs both: FIFO needs neither, EDF needs a
/// deadline, and fixed-priority scheduling needs a priority. Accessing a
/// missing attribute through [Task::deadline] or [Task::priority] is a
/// recoverable error, not a panic, since it reflects a caller mistake
/// that should be reported back through the analysis's own error
/// channel rather than by aborting.
pub struct Task {
    pub arrivals: Box<dyn ArrivalBound>,
    pub execution: Execution,
    pub deadline: Option<crate::time::Duration>,
    pub priority: Option<i64>,
}

impl Task {
    pub fn new(arrivals: impl ArrivalBound + 'static, execution: Execution) -> Self {
        Task {
            arrivals: Box::new(arrivals),
            execution,
            deadline: None,
            priority: None,
        }
    }

    pub fn with_deadline(mut self, deadline: crate::time::Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn deadline(&self) -> Result<crate::time::Duration> {
        self.deadline.ok_or(ModelError::MissingDeadline)
    }

    pub fn priority(&self) -> Result<i64> {
        self.priority.ok_or(ModelError::MissingPriority)
    }

    /// The request-bound function obtained by combining this task's
    /// arrival process with its WCET.
    pub fn rbf(&self) -> demand::RBF<&dyn ArrivalBound, wcet::Scalar> {
        demand::RBF::new(self.arrivals.as_ref(), wcet::Scalar::new(self.execution.wcet()))
    }
}

/// A collection of independent tasks sharing a single processor.
pub struct TaskSet {
    tasks: Vec<Task>,
}

impl TaskSet {
    pub fn new(tasks: Vec<Task>) -> Self {
        TaskSet { tasks }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All tasks in the set other than `tua`, identified by reference
    /// identity rather than by structural equality (two tasks with
    /// identical parameters are still distinct tasks).
    pub fn others<'a>(&'a self, tua: &'a Task) -> impl Iterator<Item = &'a Task> {
        self.tasks.iter().filter(move |t| !std::ptr::eq(*t, tua))
    }
}

impl<'a> IntoIterator for &'a TaskSet {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
