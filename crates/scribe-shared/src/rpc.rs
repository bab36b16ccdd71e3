//! RPC call and reply shapes.
//!
//! The XML wire codec proper is an external collaborator; these types are
//! its decoded form. A fault is a structured error travelling through the
//! normal reply channel, distinct from a transport-level failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fault codes used by this server. 404 is the only domain fault; the
/// negative codes follow the common XML-RPC convention.
pub const FAULT_NOT_FOUND: i32 = 404;
pub const FAULT_METHOD_NOT_FOUND: i32 = -32601;
pub const FAULT_INVALID_PARAMS: i32 = -32602;

/// A decoded incoming call: dotted method name plus positional parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RpcCall {
    pub method: String,
    pub params: Vec<Value>,
}

/// A structured error reply with a numeric code and a human-readable
/// message, wire-encoded as a protocol fault rather than a transport error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    pub code: i32,
    pub message: String,
}

impl Fault {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The reply for any read/edit/delete addressing a nonexistent id.
    pub fn not_found() -> Self {
        Self::new(FAULT_NOT_FOUND, "Not found")
    }

    pub fn method_not_found(raw_name: &str) -> Self {
        Self::new(
            FAULT_METHOD_NOT_FOUND,
            format!("Method not found: {raw_name}"),
        )
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self::new(
            FAULT_INVALID_PARAMS,
            format!("Invalid params: {}", detail.into()),
        )
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fault {}: {}", self.code, self.message)
    }
}

/// The single reply every accepted request produces: a success payload or
/// an in-band fault, never both, never neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RpcReply {
    Result(Value),
    Fault(Fault),
}

impl RpcReply {
    pub fn result(&self) -> Option<&Value> {
        match self {
            RpcReply::Result(v) => Some(v),
            RpcReply::Fault(_) => None,
        }
    }

    pub fn fault(&self) -> Option<&Fault> {
        match self {
            RpcReply::Fault(f) => Some(f),
            RpcReply::Result(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reply_encodes_result_and_fault_disjointly() {
        let ok = serde_json::to_value(RpcReply::Result(json!(true))).unwrap();
        assert_eq!(ok, json!({"result": true}));

        let fault = serde_json::to_value(RpcReply::Fault(Fault::not_found())).unwrap();
        assert_eq!(fault, json!({"fault": {"code": 404, "message": "Not found"}}));
    }

    #[test]
    fn call_rejects_extra_fields() {
        let err = serde_json::from_value::<RpcCall>(
            json!({"method": "wp.getPages", "params": [], "extra": 1}),
        );
        assert!(err.is_err());
    }
}
