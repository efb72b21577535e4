//! Integration tests for the Sentry node against a mock HTTP server.

use std::sync::Arc;

use mockito::Matcher;
use serde_json::{json, Value};

use nodus::domain::models::Credential;
use nodus::domain::ports::{ExecutionContext, StaticParameters};
use nodus::domain::NodeError;
use nodus::nodes::create_node;

fn context(params: StaticParameters) -> ExecutionContext {
    ExecutionContext::single(Arc::new(params))
}

async fn execute(
    server: &mockito::Server,
    ctx: &ExecutionContext,
) -> Result<Vec<Value>, NodeError> {
    let node = create_node(
        "sentry",
        Credential::AccessToken("test-token".into()),
        Some(server.url()),
    )
    .unwrap();
    node.execute(ctx).await
}

#[tokio::test]
async fn test_issue_get_returns_raw_object() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/0/issues/1234/")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "1234", "title": "TypeError in checkout"}"#)
        .create_async()
        .await;

    let ctx = context(
        StaticParameters::default()
            .with("resource", json!("issue"))
            .with("operation", json!("get"))
            .with("issue_id", json!("1234")),
    );
    let items = execute(&server, &ctx).await.unwrap();

    mock.assert_async().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "1234");
    assert_eq!(items[0]["title"], "TypeError in checkout");
}

#[tokio::test]
async fn test_issue_delete_returns_success_marker() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/0/issues/42/")
        .with_status(204)
        .create_async()
        .await;

    let ctx = context(
        StaticParameters::default()
            .with("resource", json!("issue"))
            .with("operation", json!("delete"))
            .with("issue_id", json!("42")),
    );
    let items = execute(&server, &ctx).await.unwrap();

    mock.assert_async().await;
    assert_eq!(items, vec![json!({"success": true})]);
}

#[tokio::test]
async fn test_issue_update_sends_only_configured_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/0/issues/42/")
        .match_body(Matcher::Json(json!({"status": "resolved"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "42", "status": "resolved"}"#)
        .create_async()
        .await;

    let ctx = context(
        StaticParameters::default()
            .with("resource", json!("issue"))
            .with("operation", json!("update"))
            .with("issue_id", json!("42"))
            .with("additional_fields", json!({"status": "resolved"})),
    );
    let items = execute(&server, &ctx).await.unwrap();

    mock.assert_async().await;
    assert_eq!(items[0]["status"], "resolved");
}

#[tokio::test]
async fn test_get_all_follows_link_cursor_across_pages() {
    let mut server = mockito::Server::new_async().await;

    let next_link = format!(
        "<{0}/api/0/projects/acme/backend/issues/?cursor=0:0:1>; rel=\"previous\"; results=\"false\"; cursor=\"0:0:1\", <{0}/api/0/projects/acme/backend/issues/?cursor=0:100:0>; rel=\"next\"; results=\"true\"; cursor=\"0:100:0\"",
        server.url()
    );
    let last_link = format!(
        "<{0}/api/0/projects/acme/backend/issues/?cursor=0:0:1>; rel=\"previous\"; results=\"true\"; cursor=\"0:0:1\", <{0}/api/0/projects/acme/backend/issues/?cursor=0:200:0>; rel=\"next\"; results=\"false\"; cursor=\"0:200:0\"",
        server.url()
    );

    // Mocks match in reverse declaration order; the cursor-specific
    // page is declared last so it wins for the second request.
    let first_page = server
        .mock("GET", "/api/0/projects/acme/backend/issues/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("link", &next_link)
        .with_body(r#"[{"id": "1"}, {"id": "2"}]"#)
        .create_async()
        .await;
    let second_page = server
        .mock("GET", "/api/0/projects/acme/backend/issues/")
        .match_query(Matcher::UrlEncoded("cursor".into(), "0:100:0".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("link", &last_link)
        .with_body(r#"[{"id": "3"}]"#)
        .create_async()
        .await;

    let ctx = context(
        StaticParameters::default()
            .with("resource", json!("issue"))
            .with("operation", json!("get_all"))
            .with("organization_slug", json!("acme"))
            .with("project_slug", json!("backend"))
            .with("return_all", json!(true)),
    );
    let items = execute(&server, &ctx).await.unwrap();

    first_page.assert_async().await;
    second_page.assert_async().await;
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["id"], "1");
    assert_eq!(items[2]["id"], "3");
}

#[tokio::test]
async fn test_bounded_get_all_sends_limit_and_truncates() {
    let mut server = mockito::Server::new_async().await;
    // The server over-delivers; the limit applies again client-side.
    let mock = server
        .mock("GET", "/api/0/projects/")
        .match_query(Matcher::UrlEncoded("limit".into(), "2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"slug": "a"}, {"slug": "b"}, {"slug": "c"}]"#)
        .create_async()
        .await;

    let ctx = context(
        StaticParameters::default()
            .with("resource", json!("project"))
            .with("operation", json!("get_all"))
            .with("return_all", json!(false))
            .with("limit", json!(2)),
    );
    let items = execute(&server, &ctx).await.unwrap();

    mock.assert_async().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["slug"], "b");
}

#[tokio::test]
async fn test_get_all_null_body_yields_empty_output() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/0/organizations/")
        .match_query(Matcher::Any)
        .with_status(200)
        .create_async()
        .await;

    let ctx = context(
        StaticParameters::default()
            .with("resource", json!("organization"))
            .with("operation", json!("get_all"))
            .with("return_all", json!(true)),
    );
    let items = execute(&server, &ctx).await.unwrap();

    mock.assert_async().await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_one_request_per_input_item_with_overrides() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("GET", "/api/0/issues/1/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "1"}"#)
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/api/0/issues/2/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "2"}"#)
        .expect(1)
        .create_async()
        .await;

    let params = StaticParameters::default()
        .with("resource", json!("issue"))
        .with("operation", json!("get"))
        .with_override(0, "issue_id", json!("1"))
        .with_override(1, "issue_id", json!("2"));
    let ctx = ExecutionContext::new(vec![json!({}), json!({})], Arc::new(params));
    let items = execute(&server, &ctx).await.unwrap();

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], "1");
    assert_eq!(items[1]["id"], "2");
}

#[tokio::test]
async fn test_api_error_status_propagates() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/0/issues/404/")
        .with_status(404)
        .with_body(r#"{"detail": "The requested resource does not exist"}"#)
        .create_async()
        .await;

    let ctx = context(
        StaticParameters::default()
            .with("resource", json!("issue"))
            .with("operation", json!("get"))
            .with("issue_id", json!("404")),
    );
    let err = execute(&server, &ctx).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, NodeError::ApiStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_unknown_operation_fails_before_any_request() {
    let server = mockito::Server::new_async().await;

    let ctx = context(
        StaticParameters::default()
            .with("resource", json!("issue"))
            .with("operation", json!("archive")),
    );
    let err = execute(&server, &ctx).await.unwrap_err();

    assert!(matches!(err, NodeError::UnknownOperation { .. }));
}
