use observa_core::{ExecutionContext, Job};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Channel-backed context whose jobs are run by whoever owns the paired
/// [`LoopReceiver`], typically an application's main loop.
#[derive(Clone, Debug)]
pub struct LoopContext {
    sender: UnboundedSender<Job>,
}

impl ExecutionContext for LoopContext {
    fn execute(&self, job: Job) {
        if self.sender.send(job).is_err() {
            tracing::warn!(target: "observa-tokio::LoopContext", "receiver dropped; dropping job");
        }
    }
}

/// Loop-side end of a [`LoopContext`].
#[derive(Debug)]
pub struct LoopReceiver {
    receiver: UnboundedReceiver<Job>,
}

impl LoopReceiver {
    /// Run every job already queued without waiting. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.receiver.try_recv() {
            job();
            ran += 1;
        }
        ran
    }

    /// Wait for the next job and run it. Returns `false` once every
    /// [`LoopContext`] is gone and the queue is empty.
    pub async fn run_next(&mut self) -> bool {
        match self.receiver.recv().await {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }
}

/// Paired endpoints: the context to subscribe with and the receiver to
/// drain.
pub struct LoopChannels {
    pub context: LoopContext,
    pub receiver: LoopReceiver,
}

impl LoopChannels {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            context: LoopContext { sender },
            receiver: LoopReceiver { receiver },
        }
    }
}

impl Default for LoopChannels {
    fn default() -> Self {
        Self::new()
    }
}
