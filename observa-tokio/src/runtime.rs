use observa_core::{ExecutionContext, Job};
use tokio::runtime::Handle;

/// Spawns every job as an independent task on a tokio runtime.
///
/// Jobs may run in parallel on a multi-threaded runtime; no ordering is
/// kept between them.
#[derive(Clone, Debug)]
pub struct RuntimeContext {
    handle: Handle,
}

impl RuntimeContext {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Context for the runtime the caller is running on, if any.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl ExecutionContext for RuntimeContext {
    fn execute(&self, job: Job) {
        self.handle.spawn(async move { job() });
    }
}
