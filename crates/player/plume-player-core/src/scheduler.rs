//! Scheduling capability: the single UI context that owns engine mutation.
//!
//! Every engine mutation and every event emission runs inside a submitted
//! task. Remote-load completions arriving on other threads hop back through
//! [`Scheduler::submit`]; nothing else in the core suspends.

/// A unit of work bound for the UI scheduling context.
pub type Task = Box<dyn FnOnce() + Send>;

/// Submit-to-UI-thread capability injected into controllers and views.
/// Implementations must run tasks in submission order on one thread.
pub trait Scheduler: Send + Sync {
    /// Queue a task for execution on the UI context
    fn submit(&self, task: Task);
}

/// Scheduler that runs each task immediately on the calling thread. Suitable
/// for hosts whose callers already live on the UI thread and need no
/// deferral.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineScheduler;

impl Scheduler for InlineScheduler {
    fn submit(&self, task: Task) {
        task();
    }
}
