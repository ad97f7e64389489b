use crate::context::ExecutionContext;
use crate::disposable::{Disposable, SubscriptionId, Unsubscribe};
use crate::observer::ObserverFn;
use crate::skip::SkipGate;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// A registered observer and the context it is delivered on.
struct Entry<T> {
    callback: ObserverFn<T>,
    context: Option<Arc<dyn ExecutionContext>>,
}

// Manual Clone: `T` itself never needs to be `Clone`.
impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
            context: self.context.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> Entry<T> {
    /// Hand the notification to this entry's context, or return the
    /// callback when it must run inline once the lock is released.
    fn schedule(&self, new: &Arc<T>, old: Option<&Arc<T>>) -> Option<ObserverFn<T>> {
        match &self.context {
            Some(context) => {
                let callback = Arc::clone(&self.callback);
                let new = Arc::clone(new);
                let old = old.cloned();
                context.execute(Box::new(move || callback(&*new, old.as_deref())));
                None
            }
            None => Some(Arc::clone(&self.callback)),
        }
    }
}

struct State<T> {
    value: Arc<T>,
    observers: BTreeMap<SubscriptionId, Entry<T>>,
    next_id: u64,
    gate: SkipGate,
}

/// The one implementation behind both observable handles.
///
/// Every field lives under a single mutex. Context jobs are handed off while
/// it is held, so a FIFO context receives them in lock order. Inline
/// observers run after it is released and may re-enter the container.
pub(crate) struct Shared<T> {
    state: Mutex<State<T>>,
}

impl<T: Send + Sync + 'static> Shared<T> {
    pub(crate) fn new(value: T) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State {
                value: Arc::new(value),
                observers: BTreeMap::new(),
                next_id: 0,
                gate: SkipGate::default(),
            }),
        })
    }

    // Observers never run under the lock and every write completes before a
    // context hand-off, so a poisoned lock still guards consistent state.
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn get(&self) -> Arc<T> {
        Arc::clone(&self.lock().value)
    }

    pub(crate) fn observe(
        self: &Arc<Self>,
        context: Option<Arc<dyn ExecutionContext>>,
        callback: ObserverFn<T>,
    ) -> Disposable {
        let entry = Entry { callback, context };
        let (id, inline, current) = {
            let mut state = self.lock();
            let id = SubscriptionId::new(state.next_id);
            state.next_id += 1;
            state.observers.insert(id, entry.clone());
            let inline = if state.gate.admit() {
                entry.schedule(&state.value, None)
            } else {
                tracing::trace!(
                    target: "observa-core::Skip",
                    id = %id,
                    "initial notification suppressed"
                );
                None
            };
            (id, inline, Arc::clone(&state.value))
        };
        tracing::debug!(
            target: "observa-core::Subscribe",
            id = %id,
            dispatched = entry.context.is_some(),
            "observer registered"
        );

        let owner: Weak<dyn Unsubscribe> = Arc::downgrade(self) as Weak<dyn Unsubscribe>;
        // Built before delivery so a panicking observer is unregistered
        // while unwinding.
        let disposable = Disposable::new(id, owner);
        if let Some(callback) = inline {
            callback(&*current, None);
        }
        disposable
    }

    pub(crate) fn replace(&self, value: T) -> Arc<T> {
        let new = Arc::new(value);
        let (old, inline) = {
            let mut state = self.lock();
            let old = std::mem::replace(&mut state.value, Arc::clone(&new));
            let inline = if state.gate.admit() {
                tracing::trace!(
                    target: "observa-core::Notify",
                    observers = state.observers.len(),
                    "delivering change"
                );
                state
                    .observers
                    .values()
                    .filter_map(|entry| entry.schedule(&new, Some(&old)))
                    .collect::<Vec<_>>()
            } else {
                tracing::trace!(target: "observa-core::Skip", "change notification suppressed");
                Vec::new()
            };
            (old, inline)
        };

        for callback in &inline {
            callback(&*new, Some(&*old));
        }
        old
    }

    pub(crate) fn unsubscribe_all(&self) {
        let removed = std::mem::take(&mut self.lock().observers);
        tracing::debug!(
            target: "observa-core::Unsubscribe",
            removed = removed.len(),
            "removed all observers"
        );
        // Captured observer state drops here, outside the lock.
        drop(removed);
    }

    pub(crate) fn skip(&self, count: Option<usize>) {
        self.lock().gate.arm(count);
        tracing::debug!(target: "observa-core::Skip", ?count, "skip gate armed");
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.lock().observers.len()
    }

    pub(crate) fn pending_skips(&self) -> usize {
        self.lock().gate.remaining()
    }
}

impl<T: Send + Sync + 'static> Unsubscribe for Shared<T> {
    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.lock().observers.remove(&id);
        removed.is_some()
    }
}

impl<T: fmt::Debug> Shared<T> {
    pub(crate) fn debug_fields(&self, f: &mut fmt::DebugStruct<'_, '_>) {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f.field("value", &state.value)
            .field("subscriber_count", &state.observers.len())
            .field("next_id", &state.next_id)
            .field("pending_skips", &state.gate.remaining());
    }
}
