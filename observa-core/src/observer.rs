use std::fmt::Debug;
use std::sync::Arc;

/// Observer function type: `(new_value, old_value)`.
///
/// `old_value` is `None` only for the initial notification a new observer
/// receives on subscription.
pub type ObserverFn<T> = Arc<dyn Fn(&T, Option<&T>) + Send + Sync>;

/// Tracing observer - logs every delivered change under `label`.
pub fn tracing_observer<T>(label: &'static str) -> impl Fn(&T, Option<&T>) + Send + Sync + 'static
where
    T: Debug + ?Sized + 'static,
{
    move |new: &T, old: Option<&T>| match old {
        Some(old) => {
            tracing::info!(target: "observa-core::Change", label, "{:?} -> {:?}", old, new);
        }
        None => {
            tracing::info!(target: "observa-core::Change", label, "initial {:?}", new);
        }
    }
}
