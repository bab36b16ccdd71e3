//! RPC methods for posts and pages.
//!
//! Credential parameters (`user`, `password`, `appkey`, `blogid`) are
//! positional fixtures of the wire protocol; authentication happens
//! upstream, so they are accepted and ignored here.

use std::sync::Arc;

use serde_json::{Map, Value};
use uuid::Uuid;

use scribe_core::domain::{ParseMode, Post, PostType};
use scribe_core::workflow::PostWorkflow;
use scribe_shared::rpc::Fault;

use crate::rpc::params::{expect_arity, int_param, str_param, struct_param};
use crate::rpc::{MethodResult, Registry};

/// Handlers for the post/page surface of the MetaWeblog/WordPress API.
pub struct PostMethods {
    workflow: Arc<PostWorkflow>,
    base_url: String,
}

impl PostMethods {
    pub fn new(workflow: Arc<PostWorkflow>, base_url: String) -> Arc<Self> {
        Arc::new(Self { workflow, base_url })
    }

    pub fn register(self: &Arc<Self>, registry: &mut Registry) {
        let m = self.clone();
        registry.register("metaWeblog_getRecentPosts", move |p| {
            let m = m.clone();
            async move { m.recent_posts(p).await }
        });

        let m = self.clone();
        registry.register("wp_getPages", move |p| {
            let m = m.clone();
            async move { m.get_pages(p).await }
        });

        let m = self.clone();
        registry.register("metaWeblog_newPost", move |p| {
            let m = m.clone();
            async move { m.new_post(p).await }
        });

        let m = self.clone();
        registry.register("wp_newPage", move |p| {
            let m = m.clone();
            async move { m.new_page(p).await }
        });

        let m = self.clone();
        registry.register("metaWeblog_editPost", move |p| {
            let m = m.clone();
            async move { m.edit_post(p).await }
        });

        let m = self.clone();
        registry.register("wp_editPage", move |p| {
            let m = m.clone();
            async move { m.edit_page(p).await }
        });

        let m = self.clone();
        registry.register("metaWeblog_getPost", move |p| {
            let m = m.clone();
            async move { m.get_post(p).await }
        });

        let m = self.clone();
        registry.register("wp_getPage", move |p| {
            let m = m.clone();
            async move { m.get_page(p).await }
        });

        let m = self.clone();
        registry.register("blogger_deletePost", move |p| {
            let m = m.clone();
            async move { m.delete_post(p).await }
        });

        let m = self.clone();
        registry.register("wp_deletePage", move |p| {
            let m = m.clone();
            async move { m.delete_page(p).await }
        });
    }

    // metaWeblog.getRecentPosts(blogid, user, password, num_posts)
    async fn recent_posts(&self, params: Vec<Value>) -> MethodResult {
        expect_arity("metaWeblog.getRecentPosts", &params, 4)?;
        let num = int_param(&params, 3, "num_posts")?;
        self.recent(PostType::Post, num).await
    }

    // wp.getPages(blogid, user, password, num_posts)
    async fn get_pages(&self, params: Vec<Value>) -> MethodResult {
        expect_arity("wp.getPages", &params, 4)?;
        let num = int_param(&params, 3, "num_posts")?;
        self.recent(PostType::Page, num).await
    }

    async fn recent(&self, kind: PostType, num: i64) -> MethodResult {
        let limit = usize::try_from(num).unwrap_or(0);
        let posts = self.workflow.recent(kind, limit).await?;

        Ok(Value::Array(
            posts
                .iter()
                .map(|p| p.to_metaweblog(&self.base_url))
                .collect(),
        ))
    }

    // metaWeblog.newPost(blogid, user, password, struct, publish)
    async fn new_post(&self, params: Vec<Value>) -> MethodResult {
        expect_arity("metaWeblog.newPost", &params, 5)?;
        let bag = struct_param(&params, 3, "content")?;
        self.create(bag, PostType::Post).await
    }

    // wp.newPage(blogid, user, password, struct, publish)
    async fn new_page(&self, params: Vec<Value>) -> MethodResult {
        expect_arity("wp.newPage", &params, 5)?;
        let bag = struct_param(&params, 3, "content")?;
        self.create(bag, PostType::Page).await
    }

    async fn create(&self, bag: &Map<String, Value>, kind: PostType) -> MethodResult {
        let post = Post::from_metaweblog(bag, kind, ParseMode::Create)
            .map_err(|e| Fault::invalid_params(e.to_string()))?;

        let id = self.workflow.create(post).await?;
        Ok(Value::String(id.to_string()))
    }

    // metaWeblog.editPost(postid, user, password, struct, publish)
    async fn edit_post(&self, params: Vec<Value>) -> MethodResult {
        expect_arity("metaWeblog.editPost", &params, 5)?;
        let id = post_id(&params, 0)?;
        let bag = struct_param(&params, 3, "content")?;
        self.edit(id, bag, PostType::Post).await
    }

    // wp.editPage(blogid, postid, user, password, struct, publish)
    async fn edit_page(&self, params: Vec<Value>) -> MethodResult {
        expect_arity("wp.editPage", &params, 6)?;
        let id = post_id(&params, 1)?;
        let bag = struct_param(&params, 4, "content")?;
        self.edit(id, bag, PostType::Page).await
    }

    async fn edit(
        &self,
        id: Option<Uuid>,
        bag: &Map<String, Value>,
        kind: PostType,
    ) -> MethodResult {
        let candidate = Post::from_metaweblog(bag, kind, ParseMode::Edit)
            .map_err(|e| Fault::invalid_params(e.to_string()))?;

        let Some(id) = id else {
            return Err(Fault::not_found().into());
        };

        if self.workflow.edit(id, candidate).await? {
            Ok(Value::Bool(true))
        } else {
            Err(Fault::not_found().into())
        }
    }

    // metaWeblog.getPost(postid, user, password)
    async fn get_post(&self, params: Vec<Value>) -> MethodResult {
        expect_arity("metaWeblog.getPost", &params, 3)?;
        self.get(post_id(&params, 0)?).await
    }

    // wp.getPage(blogid, postid, user, password)
    async fn get_page(&self, params: Vec<Value>) -> MethodResult {
        expect_arity("wp.getPage", &params, 4)?;
        self.get(post_id(&params, 1)?).await
    }

    async fn get(&self, id: Option<Uuid>) -> MethodResult {
        let stored = match id {
            Some(id) => self.workflow.fetch(id).await?,
            None => None,
        };

        match stored {
            Some(post) => Ok(post.to_metaweblog(&self.base_url)),
            None => Err(Fault::not_found().into()),
        }
    }

    // blogger.deletePost(appkey, postid, user, password, publish)
    async fn delete_post(&self, params: Vec<Value>) -> MethodResult {
        expect_arity("blogger.deletePost", &params, 5)?;
        self.delete(post_id(&params, 1)?).await
    }

    // wp.deletePage(blogid, user, password, postid)
    async fn delete_page(&self, params: Vec<Value>) -> MethodResult {
        expect_arity("wp.deletePage", &params, 4)?;
        self.delete(post_id(&params, 3)?).await
    }

    async fn delete(&self, id: Option<Uuid>) -> MethodResult {
        let deleted = match id {
            Some(id) => self.workflow.delete(id).await?,
            None => false,
        };

        if deleted {
            Ok(Value::Bool(true))
        } else {
            Err(Fault::not_found().into())
        }
    }
}

/// A malformed postid addresses no existing document, so it lands on the
/// same not-found path as a well-formed-but-missing one.
fn post_id(params: &[Value], idx: usize) -> Result<Option<Uuid>, Fault> {
    let raw = str_param(params, idx, "postid")?;
    Ok(Uuid::parse_str(raw).ok())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use scribe_core::ports::PostStore;
    use scribe_infra::pubsub::InMemorySignalBus;
    use scribe_infra::store::InMemoryPostStore;
    use scribe_shared::rpc::{FAULT_INVALID_PARAMS, RpcCall, RpcReply};

    use super::*;

    fn registry() -> (Registry, Arc<InMemoryPostStore>) {
        let store = Arc::new(InMemoryPostStore::new());
        let signals = Arc::new(InMemorySignalBus::default());
        let workflow = Arc::new(PostWorkflow::new(store.clone(), signals));

        let mut registry = Registry::default();
        PostMethods::new(workflow, "https://blog.example.com".to_owned()).register(&mut registry);

        (registry, store)
    }

    async fn dispatch(registry: &Registry, method: &str, params: Vec<Value>) -> RpcReply {
        registry
            .dispatch(RpcCall {
                method: method.to_owned(),
                params,
            })
            .await
            .unwrap()
    }

    async fn create_post(registry: &Registry, bag: Value) -> String {
        let reply = dispatch(
            registry,
            "metaWeblog.newPost",
            vec![json!("0"), json!("u"), json!("p"), bag, json!(false)],
        )
        .await;
        reply.result().unwrap().as_str().unwrap().to_owned()
    }

    #[tokio::test]
    async fn scenario_draft_then_publish_with_slug_change() {
        let (registry, store) = registry();

        let id = create_post(
            &registry,
            json!({"title": "Hello", "wp_slug": "hello", "post_status": "draft"}),
        )
        .await;

        // Draft creation leaves the publication date unset.
        let fetched = dispatch(
            &registry,
            "metaWeblog.getPost",
            vec![json!(id), json!("u"), json!("p")],
        )
        .await;
        let doc = fetched.result().unwrap();
        assert_eq!(doc["post_status"], json!("draft"));
        assert!(doc.get("dateCreated").is_none());

        let edited = dispatch(
            &registry,
            "metaWeblog.editPost",
            vec![
                json!(id),
                json!("u"),
                json!("p"),
                json!({"title": "Hello", "wp_slug": "hello-world", "post_status": "publish"}),
                json!(true),
            ],
        )
        .await;
        assert_eq!(edited.result().unwrap(), &json!(true));

        let stored = store
            .find_by_id(Uuid::parse_str(&id).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(stored.post.pub_date.is_some());
        assert_eq!(stored.post.slug, "hello-world");

        let redirects = store.recent(PostType::Redirect, 10).await.unwrap();
        assert_eq!(redirects.len(), 1);
        assert_eq!(redirects[0].post.slug, "hello");
        assert_eq!(redirects[0].post.redirect.as_deref(), Some("hello-world"));
    }

    #[tokio::test]
    async fn page_listing_is_newest_first_capped_and_filtered() {
        let (registry, _store) = registry();

        for slug in ["one", "two", "three"] {
            dispatch(
                &registry,
                "wp.newPage",
                vec![
                    json!("0"),
                    json!("u"),
                    json!("p"),
                    json!({"title": slug, "wp_slug": slug}),
                    json!(false),
                ],
            )
            .await;
        }
        create_post(&registry, json!({"title": "a post", "wp_slug": "a-post"})).await;

        let reply = dispatch(
            &registry,
            "wp.getPages",
            vec![json!("0"), json!("u"), json!("p"), json!(2)],
        )
        .await;

        let pages = reply.result().unwrap().as_array().unwrap().clone();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0]["wp_slug"], json!("three"));
        assert_eq!(pages[1]["wp_slug"], json!("two"));
        assert!(pages.iter().all(|p| p["post_type"] == json!("page")));
    }

    #[tokio::test]
    async fn listing_posts_never_shows_pages_or_redirects() {
        let (registry, store) = registry();

        create_post(&registry, json!({"title": "Post", "wp_slug": "post"})).await;
        store
            .insert(Post::redirect("old".to_owned(), "new".to_owned()))
            .await
            .unwrap();

        let reply = dispatch(
            &registry,
            "metaWeblog.getRecentPosts",
            vec![json!("0"), json!("u"), json!("p"), json!(50)],
        )
        .await;

        let posts = reply.result().unwrap().as_array().unwrap().clone();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["post_type"], json!("post"));
    }

    #[tokio::test]
    async fn reads_of_missing_or_malformed_ids_fault_404() {
        let (registry, _store) = registry();

        let missing = dispatch(
            &registry,
            "metaWeblog.getPost",
            vec![json!(Uuid::now_v7().to_string()), json!("u"), json!("p")],
        )
        .await;
        assert_eq!(missing.fault().unwrap(), &Fault::not_found());

        let malformed = dispatch(
            &registry,
            "wp.getPage",
            vec![json!("0"), json!("not-a-postid"), json!("u"), json!("p")],
        )
        .await;
        assert_eq!(malformed.fault().unwrap(), &Fault::not_found());
    }

    #[tokio::test]
    async fn delete_of_nonexistent_id_faults_404() {
        let (registry, _store) = registry();

        let reply = dispatch(
            &registry,
            "blogger.deletePost",
            vec![
                json!("appkey"),
                json!(Uuid::now_v7().to_string()),
                json!("u"),
                json!("p"),
                json!(false),
            ],
        )
        .await;

        let fault = reply.fault().unwrap();
        assert_eq!(fault.code, 404);
        assert_eq!(fault.message, "Not found");
    }

    #[tokio::test]
    async fn delete_page_removes_the_document() {
        let (registry, store) = registry();

        let reply = dispatch(
            &registry,
            "wp.newPage",
            vec![
                json!("0"),
                json!("u"),
                json!("p"),
                json!({"title": "Gone soon", "wp_slug": "gone"}),
                json!(false),
            ],
        )
        .await;
        let id = reply.result().unwrap().as_str().unwrap().to_owned();

        let deleted = dispatch(
            &registry,
            "wp.deletePage",
            vec![json!("0"), json!("u"), json!("p"), json!(id)],
        )
        .await;
        assert_eq!(deleted.result().unwrap(), &json!(true));

        assert!(
            store
                .find_by_id(Uuid::parse_str(&id).unwrap())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn edit_of_missing_id_faults_404() {
        let (registry, _store) = registry();

        let reply = dispatch(
            &registry,
            "wp.editPage",
            vec![
                json!("0"),
                json!(Uuid::now_v7().to_string()),
                json!("u"),
                json!("p"),
                json!({"title": "x"}),
                json!(true),
            ],
        )
        .await;

        assert_eq!(reply.fault().unwrap(), &Fault::not_found());
    }

    #[tokio::test]
    async fn wrong_arity_faults_invalid_params() {
        let (registry, _store) = registry();

        let reply = dispatch(
            &registry,
            "metaWeblog.getRecentPosts",
            vec![json!("0"), json!("u"), json!("p")],
        )
        .await;

        assert_eq!(reply.fault().unwrap().code, FAULT_INVALID_PARAMS);
    }

    #[tokio::test]
    async fn malformed_struct_faults_invalid_params() {
        let (registry, _store) = registry();

        let reply = dispatch(
            &registry,
            "metaWeblog.newPost",
            vec![
                json!("0"),
                json!("u"),
                json!("p"),
                json!({"title": 42}),
                json!(false),
            ],
        )
        .await;

        assert_eq!(reply.fault().unwrap().code, FAULT_INVALID_PARAMS);
    }

    #[tokio::test]
    async fn publish_on_create_stamps_date_created() {
        let (registry, _store) = registry();

        let id = create_post(
            &registry,
            json!({"title": "Live", "wp_slug": "live", "post_status": "publish"}),
        )
        .await;

        let reply = dispatch(
            &registry,
            "metaWeblog.getPost",
            vec![json!(id), json!("u"), json!("p")],
        )
        .await;

        let doc = reply.result().unwrap();
        assert_eq!(doc["post_status"], json!("publish"));
        assert!(doc.get("dateCreated").is_some());
        assert_eq!(doc["link"], json!("https://blog.example.com/live"));
    }
}
