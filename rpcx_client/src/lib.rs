//! Consumer-side reference configuration: turns reference settings and
//! named callback objects into a [`ConsumerModel`](rpcx_model::ConsumerModel).

pub mod callback;
pub mod reference;

pub use callback::*;
pub use reference::*;
