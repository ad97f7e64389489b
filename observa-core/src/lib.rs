//! observa-core: a thread-safe observable value container.
//!
//! A container holds one value and notifies registered observers with
//! `(new, old)` whenever it is written. Observers run inline on the writing
//! thread, or on an [`ExecutionContext`] chosen at subscription time.
//! Each subscription returns a [`Disposable`] that detaches it again.

mod context;
mod disposable;
mod observable;
mod observer;
mod shared;
mod skip;

pub use context::{ExecutionContext, Job, ThreadContext};
pub use disposable::{DisposeBag, Disposable, SubscriptionId};
pub use observable::{MutableObservable, ReadOnlyObservable, Readable, Writable};
pub use observer::{tracing_observer, ObserverFn};

/// Glob-import to bring both capability traits into scope.
pub mod prelude {
    pub use crate::{MutableObservable, ReadOnlyObservable, Readable, Writable};
}
