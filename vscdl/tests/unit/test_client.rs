//! API client tests against a mock server

use httpmock::prelude::*;
use httpmock::Method::PATCH;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use vscdl::config::ApiConfig;
use vscdl::errors::FetchError;
use vscdl::http::ApiClient;
use vscdl::source::{fetch_source, DeploymentIdentifier, FetchOptions, SourceApi};

const TOKEN: &str = "test-token";

fn client_for(server: &MockServer, team_id: Option<&str>) -> ApiClient {
    let config = ApiConfig::new(&server.base_url(), TOKEN)
        .unwrap()
        .with_team_id(team_id.map(str::to_string));
    ApiClient::new(config).unwrap()
}

#[tokio::test]
async fn test_deployment_by_domain() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v13/deployments/example.vercel.app")
                .header("authorization", "Bearer test-token")
                .query_param("teamId", "team_1");
            then.status(200).json_body(json!({
                "id": "dpl_abc",
                "url": "example.vercel.app",
                "readyState": "READY",
                "createdAt": 1_700_000_000_000_i64
            }));
        })
        .await;

    let client = client_for(&server, Some("team_1"));
    let deployment = assert_ok!(client.deployment("example.vercel.app").await);

    mock.assert_async().await;
    assert_eq!(deployment.id, "dpl_abc");
}

#[tokio::test]
async fn test_project_deployments_query() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v12/projects/my-site/deployments")
                .query_param("limit", "1")
                .query_param("sort", "created");
            then.status(200).json_body(json!({
                "deployments": [{"uid": "dpl_1", "readyState": "READY", "created": 1}]
            }));
        })
        .await;

    let client = client_for(&server, None);
    let deployments = assert_ok!(client.project_deployments("my-site", 1).await);

    mock.assert_async().await;
    assert_eq!(deployments.len(), 1);
    assert!(deployments[0].is_ready());
}

#[tokio::test]
async fn test_api_error_carries_status_and_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v7/deployments/dpl_x/files");
            then.status(403).json_body(json!({
                "error": {"code": "forbidden", "message": "Not authorized"}
            }));
        })
        .await;

    let client = client_for(&server, None);
    let err = assert_err!(client.file_tree("dpl_x").await);

    match err {
        FetchError::ApiError {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 403);
            assert_eq!(code.as_deref(), Some("forbidden"));
            assert_eq!(message, "Not authorized");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_transport_failure() {
    let config = ApiConfig::new("http://127.0.0.1:1", TOKEN).unwrap();
    let client = ApiClient::new(config).unwrap();

    let err = assert_err!(client.deployment("dpl_1").await);

    assert!(matches!(err, FetchError::HttpError(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_download_raw_content() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v7/deployments/dpl_1/files/u1");
            then.status(200)
                .header("content-type", "application/octet-stream")
                .body(b"\x00\x01binary\xff".to_vec());
        })
        .await;

    let client = client_for(&server, None);
    let mut buf: Vec<u8> = Vec::new();
    let written = assert_ok!(client.download_file("dpl_1", "u1", &mut buf).await);

    assert_eq!(written, 9);
    assert_eq!(buf, b"\x00\x01binary\xff");
}

#[tokio::test]
async fn test_download_base64_envelope() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v7/deployments/dpl_1/files/u2");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"data": "Y29uc29sZS5sb2coMSk="}));
        })
        .await;

    let client = client_for(&server, None);
    let mut buf: Vec<u8> = Vec::new();
    let written = assert_ok!(client.download_file("dpl_1", "u2", &mut buf).await);

    assert_eq!(written, 14);
    assert_eq!(buf, b"console.log(1)");
}

#[tokio::test]
async fn test_download_json_source_file() {
    let server = MockServer::start_async().await;
    let package_json = r#"{"name": "site", "version": "1.0.0"}"#;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v7/deployments/dpl_1/files/pkg");
            then.status(200)
                .header("content-type", "application/json")
                .body(package_json);
        })
        .await;

    let client = client_for(&server, None);
    let mut buf: Vec<u8> = Vec::new();
    let written = assert_ok!(client.download_file("dpl_1", "pkg", &mut buf).await);

    assert_eq!(written, package_json.len() as u64);
    assert_eq!(buf, package_json.as_bytes());
}

#[tokio::test]
async fn test_download_json_with_invalid_base64_data() {
    let server = MockServer::start_async().await;
    let body = r#"{"data": "not base64!"}"#;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v7/deployments/dpl_1/files/cfg");
            then.status(200)
                .header("content-type", "application/json")
                .body(body);
        })
        .await;

    let client = client_for(&server, None);
    let mut buf: Vec<u8> = Vec::new();
    assert_ok!(client.download_file("dpl_1", "cfg", &mut buf).await);

    assert_eq!(buf, body.as_bytes());
}

#[tokio::test]
async fn test_fetch_source_over_http() {
    let server = MockServer::start_async().await;

    // Not a domain, so the project lookup answers
    let domain = server
        .mock_async(|when, then| {
            when.method(GET).path("/v13/deployments/my-site");
            then.status(404).json_body(json!({
                "error": {"code": "not_found", "message": "Deployment not found"}
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v12/projects/my-site/deployments");
            then.status(200).json_body(json!({
                "deployments": [{"uid": "dpl_9", "readyState": "READY"}]
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v7/deployments/dpl_9/files");
            then.status(200).json_body(json!([
                {"name": "src", "type": "directory", "children": [
                    {"name": "index.js", "type": "file", "uid": "f1"},
                    {"name": "lib", "type": "directory", "children": [
                        {"name": "util.js", "type": "file", "uid": "f2"}
                    ]}
                ]}
            ]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v7/deployments/dpl_9/files/f1");
            then.status(200)
                .header("content-type", "text/plain")
                .body("require('./lib/util')");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v7/deployments/dpl_9/files/f2");
            then.status(500).body("boom");
        })
        .await;

    let temp = tempfile::tempdir().unwrap();
    let dest = temp.path().join("my-site");
    let client = client_for(&server, None);
    let identifier = DeploymentIdentifier::parse("my-site").unwrap();

    let report = assert_ok!(fetch_source(&client, &identifier, &dest, &FetchOptions::default()).await);

    domain.assert_async().await;
    assert_eq!(report.deployment_id, "dpl_9");
    assert_eq!(report.files_downloaded(), 1);
    assert_eq!(report.failures().count(), 1);
    assert_eq!(report.failures().next().unwrap().error().unwrap().status(), Some(500));
    assert_eq!(
        std::fs::read_to_string(dest.join("index.js")).unwrap(),
        "require('./lib/util')"
    );
    assert!(dest.join("lib").is_dir());
    assert!(!dest.join("lib/util.js").exists());
}

#[tokio::test]
async fn test_list_projects() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/projects");
            then.status(200)
                .json_body(json!([{"id": "prj_1", "name": "site"}, {"id": "prj_2", "name": "docs"}]));
        })
        .await;

    let client = client_for(&server, None);
    let projects = assert_ok!(client.list_projects().await);

    let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["site", "docs"]);
}

#[tokio::test]
async fn test_update_and_delete_project() {
    let server = MockServer::start_async().await;
    let patch = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/v2/projects/prj_1")
                .json_body(json!({"name": "renamed"}));
            then.status(200).json_body(json!({"id": "prj_1", "name": "renamed"}));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/v2/projects/prj_1");
            then.status(204);
        })
        .await;

    let client = client_for(&server, None);
    let project = assert_ok!(client.update_project("prj_1", "renamed").await);
    assert_ok!(client.delete_project("prj_1").await);

    patch.assert_async().await;
    delete.assert_async().await;
    assert_eq!(project.name, "renamed");
}

#[tokio::test]
async fn test_team_members_need_team_id() {
    let server = MockServer::start_async().await;
    let client = client_for(&server, None);

    let err = assert_err!(client.list_team_members().await);

    assert!(matches!(err, FetchError::ConfigError(_)));
}

#[tokio::test]
async fn test_team_members() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v2/teams/team_1/members")
                .query_param("teamId", "team_1");
            then.status(200).json_body(json!({
                "members": [{"uid": "usr_1", "email": "dev@example.com", "role": "OWNER"}]
            }));
        })
        .await;
    let add = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v2/teams/team_1/members")
                .json_body(json!({"email": "new@example.com"}));
            then.status(200).json_body(json!({"uid": "usr_2"}));
        })
        .await;

    let client = client_for(&server, Some("team_1"));
    let members = assert_ok!(client.list_team_members().await);
    assert_ok!(client.add_team_member("new@example.com").await);

    list.assert_async().await;
    add.assert_async().await;
    assert_eq!(members[0].label(), "dev@example.com");
}
