/// Suppresses the first `count` notifications after it is armed.
///
/// Once `skipped` reaches `count` the gate stays open: every later event is
/// delivered until the gate is re-armed or cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SkipGate {
    count: Option<usize>,
    skipped: usize,
}

impl SkipGate {
    /// Replace the gate. Suppression counting restarts from zero.
    pub(crate) fn arm(&mut self, count: Option<usize>) {
        self.count = count;
        self.skipped = 0;
    }

    /// Consume one event. Returns `true` when the event must be delivered.
    pub(crate) fn admit(&mut self) -> bool {
        match self.count {
            Some(count) if self.skipped < count => {
                self.skipped += 1;
                false
            }
            _ => true,
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.count
            .map(|count| count.saturating_sub(self.skipped))
            .unwrap_or(0)
    }
}
