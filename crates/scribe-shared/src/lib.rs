//! # Scribe Shared
//!
//! Wire-level types shared between the RPC server and its clients/tests.

pub mod response;
pub mod rpc;

pub use response::ErrorResponse;
pub use rpc::{Fault, RpcCall, RpcReply};
