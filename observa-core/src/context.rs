use std::sync::Arc;

/// Unit of work handed to an [`ExecutionContext`].
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Scheduling destination for observer callbacks.
///
/// An observer registered with a context never runs on the mutating
/// thread; its invocations are handed to `execute` and run whenever the
/// context gets to them. Contexts are free to run jobs concurrently. FIFO
/// contexts should keep submission order.
///
/// `execute` is called while the container's lock is held: it must hand the
/// job off and never run it on the calling thread.
pub trait ExecutionContext: Send + Sync {
    fn execute(&self, job: Job);
}

impl<C: ExecutionContext + ?Sized> ExecutionContext for Arc<C> {
    fn execute(&self, job: Job) {
        (**self).execute(job);
    }
}

/// Runs every job on a freshly spawned OS thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadContext;

impl ExecutionContext for ThreadContext {
    fn execute(&self, job: Job) {
        std::thread::spawn(job);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn thread_context_runs_off_the_caller_thread() {
        let (tx, rx) = mpsc::channel();
        let caller = std::thread::current().id();
        ThreadContext.execute(Box::new(move || {
            let _ = tx.send(std::thread::current().id());
        }));
        let ran_on = rx.recv().expect("job should run");
        assert_ne!(ran_on, caller);
    }

    #[test]
    fn arc_context_forwards() {
        let (tx, rx) = mpsc::channel();
        let ctx: Arc<dyn ExecutionContext> = Arc::new(ThreadContext);
        let wrapped = Arc::new(ctx);
        wrapped.execute(Box::new(move || {
            let _ = tx.send(7);
        }));
        assert_eq!(rx.recv().expect("job should run"), 7);
    }
}
