//! Per-reference runtime models consulted by the rpcx client while
//! dispatching calls.

pub mod async_method;
pub mod attribute;
pub mod consumer;
pub mod error;
pub mod repository;
pub mod service;

pub use async_method::*;
pub use attribute::*;
pub use consumer::*;
pub use error::*;
pub use repository::*;
pub use service::*;
