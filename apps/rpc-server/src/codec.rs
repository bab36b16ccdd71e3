//! Decode seam for the external wire codec.
//!
//! The historical MetaWeblog transport is XML-RPC; that codec is an
//! external collaborator. This server frames calls as JSON with the same
//! decoded shape: `{"method": "wp.getPages", "params": [...]}`. A body
//! that does not decode to exactly one (method, params) pair fails here
//! and never reaches dispatch.

use thiserror::Error;

use scribe_shared::rpc::RpcCall;

/// A request body the protocol decoder rejected.
#[derive(Debug, Error)]
#[error("malformed RPC request: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

pub fn decode(body: &[u8]) -> Result<RpcCall, DecodeError> {
    Ok(serde_json::from_slice(body)?)
}
