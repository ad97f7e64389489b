use crate::context::ExecutionContext;
use crate::disposable::Disposable;
use crate::shared::Shared;
use std::fmt;
use std::sync::Arc;

/// Read capability: inspect the value and manage observers.
pub trait Readable<T> {
    /// Snapshot of the current value. Never held across notification.
    fn get(&self) -> Arc<T>;

    /// Owned copy of the current value.
    fn value(&self) -> T
    where
        T: Clone,
    {
        T::clone(&self.get())
    }

    /// Register `callback`, delivered on `context` when one is given and
    /// inline on the notifying thread otherwise.
    ///
    /// The new observer is notified once right away with
    /// `(current, None)` unless the skip gate suppresses that event.
    fn observe<F>(&self, context: Option<Arc<dyn ExecutionContext>>, callback: F) -> Disposable
    where
        F: Fn(&T, Option<&T>) + Send + Sync + 'static;

    fn subscribe<F>(&self, callback: F) -> Disposable
    where
        F: Fn(&T, Option<&T>) + Send + Sync + 'static,
    {
        self.observe(None, callback)
    }

    fn subscribe_on<F>(&self, context: Arc<dyn ExecutionContext>, callback: F) -> Disposable
    where
        F: Fn(&T, Option<&T>) + Send + Sync + 'static,
    {
        self.observe(Some(context), callback)
    }

    /// Drop every registered observer. The value is untouched.
    fn unsubscribe_all(&self);

    /// Suppress the next `count` notifications, or clear the gate with
    /// `None`. Returns a read-only handle to the same container.
    fn skip(&self, count: Option<usize>) -> ReadOnlyObservable<T>;

    fn subscriber_count(&self) -> usize;
}

/// Write capability.
pub trait Writable<T>: Readable<T> {
    /// Store `value` and notify. Equal values still notify.
    fn set(&self, value: T) {
        drop(self.replace(value));
    }

    /// Like [`set`](Self::set), returning the value it displaced.
    fn replace(&self, value: T) -> Arc<T>;
}

/// Read-only handle to an observable container.
///
/// Cloning creates a new handle to the **same** container.
pub struct ReadOnlyObservable<T> {
    shared: Arc<Shared<T>>,
}

/// Read-write handle to an observable container.
///
/// Cloning creates a new handle to the **same** container.
pub struct MutableObservable<T> {
    shared: Arc<Shared<T>>,
}

// Manual Clone: shares the same Arc.
impl<T> Clone for ReadOnlyObservable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Clone for MutableObservable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Send + Sync + 'static> ReadOnlyObservable<T> {
    /// A container whose value never changes after construction.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            shared: Shared::new(value),
        }
    }

    /// Notifications the skip gate will still suppress.
    pub fn pending_skips(&self) -> usize {
        self.shared.pending_skips()
    }

    /// `true` when both handles point at the same container.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<T: Send + Sync + 'static> MutableObservable<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            shared: Shared::new(value),
        }
    }

    /// Hand out the read capability only.
    pub fn read_only(&self) -> ReadOnlyObservable<T> {
        ReadOnlyObservable {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Send + Sync + 'static> From<MutableObservable<T>> for ReadOnlyObservable<T> {
    fn from(observable: MutableObservable<T>) -> Self {
        ReadOnlyObservable {
            shared: observable.shared,
        }
    }
}

fn observe<T, F>(
    shared: &Arc<Shared<T>>,
    context: Option<Arc<dyn ExecutionContext>>,
    callback: F,
) -> Disposable
where
    T: Send + Sync + 'static,
    F: Fn(&T, Option<&T>) + Send + Sync + 'static,
{
    shared.observe(context, Arc::new(callback))
}

impl<T: Send + Sync + 'static> Readable<T> for ReadOnlyObservable<T> {
    fn get(&self) -> Arc<T> {
        self.shared.get()
    }

    fn observe<F>(&self, context: Option<Arc<dyn ExecutionContext>>, callback: F) -> Disposable
    where
        F: Fn(&T, Option<&T>) + Send + Sync + 'static,
    {
        observe(&self.shared, context, callback)
    }

    fn unsubscribe_all(&self) {
        self.shared.unsubscribe_all();
    }

    fn skip(&self, count: Option<usize>) -> ReadOnlyObservable<T> {
        self.shared.skip(count);
        self.clone()
    }

    fn subscriber_count(&self) -> usize {
        self.shared.subscriber_count()
    }
}

impl<T: Send + Sync + 'static> Readable<T> for MutableObservable<T> {
    fn get(&self) -> Arc<T> {
        self.shared.get()
    }

    fn observe<F>(&self, context: Option<Arc<dyn ExecutionContext>>, callback: F) -> Disposable
    where
        F: Fn(&T, Option<&T>) + Send + Sync + 'static,
    {
        observe(&self.shared, context, callback)
    }

    fn unsubscribe_all(&self) {
        self.shared.unsubscribe_all();
    }

    fn skip(&self, count: Option<usize>) -> ReadOnlyObservable<T> {
        self.shared.skip(count);
        self.read_only()
    }

    fn subscriber_count(&self) -> usize {
        self.shared.subscriber_count()
    }
}

impl<T: Send + Sync + 'static> Writable<T> for MutableObservable<T> {
    fn replace(&self, value: T) -> Arc<T> {
        self.shared.replace(value)
    }
}

impl<T: fmt::Debug + Send + Sync + 'static> fmt::Debug for ReadOnlyObservable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("ReadOnlyObservable");
        self.shared.debug_fields(&mut out);
        out.finish()
    }
}

impl<T: fmt::Debug + Send + Sync + 'static> fmt::Debug for MutableObservable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("MutableObservable");
        self.shared.debug_fields(&mut out);
        out.finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
