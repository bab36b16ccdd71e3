//! Method-name mapping and dispatch.
//!
//! The WordPress wire protocol names methods with dotted namespaces
//! (`wp.getRecentPosts`); handlers are registered under the flattened form
//! (`wp_getRecentPosts`). Dispatch is a flat table lookup, populated by
//! independent method modules at startup.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use scribe_core::error::StoreError;
use scribe_shared::rpc::{Fault, RpcCall, RpcReply};

pub mod params;

/// How a handler can fail: an in-band fault becomes a normal reply, a
/// store failure escapes to the transport layer and fails the request.
#[derive(Debug, Error)]
pub enum MethodError {
    #[error("{0}")]
    Fault(Fault),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<Fault> for MethodError {
    fn from(fault: Fault) -> Self {
        MethodError::Fault(fault)
    }
}

pub type MethodResult = Result<Value, MethodError>;

type MethodFuture = Pin<Box<dyn Future<Output = MethodResult> + Send>>;
type Method = Arc<dyn Fn(Vec<Value>) -> MethodFuture + Send + Sync>;

/// Rewrite a dotted wire method name into a registry identifier:
/// `wp.getRecentPosts` -> `wp_getRecentPosts`.
pub fn mangle(raw: &str) -> String {
    raw.replace('.', "_")
}

/// Flat table mapping mangled method names to async handlers.
#[derive(Default)]
pub struct Registry {
    methods: HashMap<String, Method>,
}

impl Registry {
    pub fn register<F, Fut>(&mut self, name: &'static str, method: F)
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = MethodResult> + Send + 'static,
    {
        self.methods
            .insert(name.to_owned(), Arc::new(move |params| Box::pin(method(params))));
    }

    /// Invoke the handler a decoded call names.
    ///
    /// Every accepted call produces exactly one reply - a success payload
    /// or a fault, never both, never neither. Only store failures return
    /// `Err`, terminating the single request at the transport layer.
    pub async fn dispatch(&self, call: RpcCall) -> Result<RpcReply, StoreError> {
        let name = mangle(&call.method);

        let Some(method) = self.methods.get(&name) else {
            tracing::debug!(method = %call.method, "unknown RPC method");
            return Ok(RpcReply::Fault(Fault::method_not_found(&call.method)));
        };

        match method(call.params).await {
            Ok(value) => Ok(RpcReply::Result(value)),
            Err(MethodError::Fault(fault)) => Ok(RpcReply::Fault(fault)),
            Err(MethodError::Store(e)) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use scribe_shared::rpc::FAULT_METHOD_NOT_FOUND;

    use super::*;

    fn call(method: &str, params: Vec<Value>) -> RpcCall {
        RpcCall {
            method: method.to_owned(),
            params,
        }
    }

    #[test]
    fn mangle_flattens_every_separator() {
        assert_eq!(mangle("wp.getRecentPosts"), "wp_getRecentPosts");
        assert_eq!(mangle("a.b.c"), "a_b_c");
        assert_eq!(mangle("plain"), "plain");
    }

    #[tokio::test]
    async fn dispatch_reaches_handler_through_dotted_name() {
        let mut registry = Registry::default();
        registry.register("wp_getPages", |params| async move {
            Ok(json!({"echo": params}))
        });

        let reply = registry
            .dispatch(call("wp.getPages", vec![json!(1)]))
            .await
            .unwrap();

        assert_eq!(reply.result().unwrap(), &json!({"echo": [1]}));
    }

    #[tokio::test]
    async fn unknown_method_is_an_in_band_fault() {
        let registry = Registry::default();

        let reply = registry
            .dispatch(call("wp.unheardOf", vec![]))
            .await
            .unwrap();

        let fault = reply.fault().unwrap();
        assert_eq!(fault.code, FAULT_METHOD_NOT_FOUND);
        assert!(fault.message.contains("wp.unheardOf"));
    }

    #[tokio::test]
    async fn handler_fault_becomes_a_reply() {
        let mut registry = Registry::default();
        registry.register("m", |_| async move { Err(Fault::not_found().into()) });

        let reply = registry.dispatch(call("m", vec![])).await.unwrap();

        assert_eq!(reply.fault().unwrap(), &Fault::not_found());
    }

    #[tokio::test]
    async fn store_failure_escapes_dispatch() {
        let mut registry = Registry::default();
        registry.register("m", |_| async move {
            Err(MethodError::Store(StoreError::Connection("down".into())))
        });

        assert!(registry.dispatch(call("m", vec![])).await.is_err());
    }
}
