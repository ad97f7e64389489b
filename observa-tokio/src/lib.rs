//! observa-tokio: tokio-backed execution contexts for observa-core.
//!
//! - [`RuntimeContext`] spawns each observer call as its own task.
//! - [`SerialQueue`] runs observer calls one at a time, in submission order.
//! - [`LoopContext`] forwards observer calls to a [`LoopReceiver`] that an
//!   application loop drains itself.

mod event_loop;
mod runtime;
mod serial;

pub use event_loop::{LoopChannels, LoopContext, LoopReceiver};
pub use runtime::RuntimeContext;
pub use serial::SerialQueue;
