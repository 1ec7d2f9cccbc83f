pub use rpcx_client::*;
pub use rpcx_model::*;
