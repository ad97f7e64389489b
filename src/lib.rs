//! Observa - thread-safe observable values with disposable subscriptions.
//!
//! Re-exports `observa-core` and, with the default `tokio` feature, the
//! tokio-backed execution contexts from `observa-tokio`.

pub use observa_core::*;

#[cfg(feature = "tokio")]
pub use observa_tokio as tokio;
