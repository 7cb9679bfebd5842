//! Host primitives: the object space the foreign side of the bridge lives in.
//!
//! The adapters in this crate treat the host as a bag of dynamically typed
//! objects scheduled by a single-threaded event loop. This module supplies
//! those primitives — values, objects, fixed-capacity byte views, deferred
//! values, and the loop itself — so a bridge can be embedded and driven
//! entirely in-process. A real host binding only has to produce [`Object`]s
//! whose members follow the `read`/`readSync` (and friends) contract.

mod bytes;
mod deferred;
mod event_loop;
mod value;

pub use bytes::ByteView;
pub use deferred::{Deferred, Outcome};
pub use event_loop::{global, EventLoop, Handle};
pub use value::{CallResult, HostFn, Object, Value};
