use std::fmt;
use std::sync::Weak;

/// Identity of one registration on one container. Issued from 0 upward and
/// never reused while the container lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn new(raw: u64) -> Self {
        SubscriptionId(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Container-side half of disposal, erased over the value type.
pub(crate) trait Unsubscribe: Send + Sync {
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

/// Handle that detaches one observer from its container.
///
/// Holds only a `Weak` back-reference, so it never keeps the container
/// alive. Dropping the handle disposes it; use [`Disposable::into_permanent`]
/// to leave the observer registered for the container's lifetime instead.
#[must_use = "dropping a Disposable unsubscribes its observer"]
pub struct Disposable {
    id: SubscriptionId,
    owner: Option<Weak<dyn Unsubscribe>>,
}

impl Disposable {
    pub(crate) fn new(id: SubscriptionId, owner: Weak<dyn Unsubscribe>) -> Self {
        Self {
            id,
            owner: Some(owner),
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// `true` once [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.owner.is_none()
    }

    /// Remove the observer from its container. A no-op when already
    /// disposed or when the container no longer exists.
    pub fn dispose(&mut self) {
        let Some(owner) = self.owner.take() else {
            return;
        };
        match owner.upgrade() {
            Some(container) => {
                let removed = container.unsubscribe(self.id);
                tracing::debug!(
                    target: "observa-core::Dispose",
                    id = %self.id,
                    removed,
                    "disposed subscription"
                );
            }
            None => {
                tracing::trace!(
                    target: "observa-core::Dispose",
                    id = %self.id,
                    "container already gone"
                );
            }
        }
    }

    /// Give up the handle without unsubscribing.
    pub fn into_permanent(mut self) -> SubscriptionId {
        self.owner = None;
        self.id
    }

    /// Hand ownership to `bag`; the observer lives as long as the bag does.
    pub fn disposed_by(self, bag: &mut DisposeBag) {
        bag.insert(self);
    }
}

impl Drop for Disposable {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Disposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("id", &self.id)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Collects disposables and disposes all of them together.
#[derive(Debug, Default)]
pub struct DisposeBag {
    items: Vec<Disposable>,
}

impl DisposeBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, disposable: Disposable) {
        self.items.push(disposable);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Dispose and forget every held subscription. The bag stays usable.
    pub fn dispose_all(&mut self) {
        for mut item in self.items.drain(..) {
            item.dispose();
        }
    }
}

impl Extend<Disposable> for DisposeBag {
    fn extend<I: IntoIterator<Item = Disposable>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}
