//! System/metadata RPC methods.

use serde_json::json;

use crate::rpc::Registry;
use crate::rpc::params::expect_arity;

/// `mt.supportedTextFilters` - the static filter list blog editors probe
/// before creating posts.
pub fn register(registry: &mut Registry) {
    registry.register("mt_supportedTextFilters", |params| async move {
        expect_arity("mt.supportedTextFilters", &params, 0)?;

        Ok(json!([
            {"key": "markdown", "label": "Markdown"},
        ]))
    });
}

#[cfg(test)]
mod tests {
    use scribe_shared::rpc::RpcCall;

    use super::*;

    #[tokio::test]
    async fn reports_markdown_filter() {
        let mut registry = Registry::default();
        register(&mut registry);

        let reply = registry
            .dispatch(RpcCall {
                method: "mt.supportedTextFilters".to_owned(),
                params: vec![],
            })
            .await
            .unwrap();

        let filters = reply.result().unwrap().as_array().unwrap();
        assert_eq!(filters[0]["key"], json!("markdown"));
    }
}
