use observa_core::{ExecutionContext, Job};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tokio::task::JoinHandle;

/// FIFO context: one spawned task drains an unbounded channel of jobs.
///
/// Jobs run strictly one after another, in the order they were submitted.
/// A panicking job ends the drain task; later jobs are dropped.
pub struct SerialQueue {
    label: &'static str,
    sender: Mutex<Option<UnboundedSender<Job>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

fn lock<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SerialQueue {
    /// Start a queue on the runtime behind `handle`.
    pub fn spawn(label: &'static str, handle: &Handle) -> Self {
        let (sender, mut receiver) = unbounded_channel::<Job>();
        let worker = handle.spawn(async move {
            while let Some(job) = receiver.recv().await {
                job();
            }
            tracing::debug!(target: "observa-tokio::SerialQueue", label, "queue drained");
        });
        tracing::debug!(target: "observa-tokio::SerialQueue", label, "queue started");
        Self {
            label,
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Start a queue on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn new(label: &'static str) -> Self {
        Self::spawn(label, &Handle::current())
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn is_shut_down(&self) -> bool {
        lock(&self.sender).is_none()
    }

    /// Stop accepting jobs. Already queued jobs still run; await the
    /// returned handle to wait for them. Returns `None` on every call after
    /// the first.
    pub fn shutdown(&self) -> Option<JoinHandle<()>> {
        let sender = lock(&self.sender).take()?;
        drop(sender);
        tracing::debug!(
            target: "observa-tokio::SerialQueue",
            label = self.label,
            "queue shut down"
        );
        lock(&self.worker).take()
    }
}

impl ExecutionContext for SerialQueue {
    fn execute(&self, job: Job) {
        let sent = match lock(&self.sender).as_ref() {
            Some(sender) => sender.send(job).is_ok(),
            None => false,
        };
        if !sent {
            tracing::warn!(
                target: "observa-tokio::SerialQueue",
                label = self.label,
                "queue stopped; dropping job"
            );
        }
    }
}

impl std::fmt::Debug for SerialQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialQueue")
            .field("label", &self.label)
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}
