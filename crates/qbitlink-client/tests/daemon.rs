//! Wire-level tests against a mock daemon: login handshake, cookie
//! attachment, and the exact body/query encodings the daemon expects.

use std::sync::Arc;

use httpmock::MockServer;
use httpmock::prelude::*;
use qbitlink_client::{
    AddTorrentOptions, ClientError, CookieState, Credentials, HttpTransport, QbitClient,
};
use serde_json::json;

fn client_for(server: &MockServer, credentials: Option<Credentials>) -> QbitClient {
    let transport = HttpTransport::new(None).expect("transport builds");
    QbitClient::new(
        server.base_url().parse().expect("valid base URL"),
        credentials,
        Arc::new(transport),
    )
}

fn admin() -> Option<Credentials> {
    Some(Credentials::new("admin", "adminadmin"))
}

#[tokio::test]
async fn login_precedes_the_first_request_and_carries_the_referer() {
    let server = MockServer::start_async().await;
    let referer = format!("{}/", server.base_url());
    let login = server.mock(move |when, then| {
        when.method(POST)
            .path("/api/v2/auth/login")
            .header("Referer", referer.as_str())
            .body_includes("username=admin")
            .body_includes("password=adminadmin");
        then.status(200)
            .header("set-cookie", "SID=abc123; path=/")
            .body("Ok.");
    });
    let version = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v2/app/version")
            .header("Cookie", "SID=abc123; path=/");
        then.status(200).body("v5.0.0");
    });

    let client = client_for(&server, admin());
    let first = client.app_version().await.expect("first call");
    let second = client.app_version().await.expect("second call");

    assert_eq!(first, "v5.0.0");
    assert_eq!(second, "v5.0.0");
    // One login serves both calls.
    login.assert_hits(1);
    version.assert_hits(2);
    assert_eq!(
        client.cookie_state(),
        CookieState::Cookie("SID=abc123; path=/".to_string())
    );
}

#[tokio::test]
async fn anonymous_clients_skip_the_login_endpoint_entirely() {
    let server = MockServer::start_async().await;
    let login = server.mock(|when, then| {
        when.method(POST).path("/api/v2/auth/login");
        then.status(200);
    });
    let torrents = server.mock(|when, then| {
        when.method(GET).path("/api/v2/torrents/info");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!([]));
    });

    let client = client_for(&server, None);
    client.torrents().await.expect("anonymous list");

    login.assert_hits(0);
    torrents.assert_hits(1);
    assert!(client.cookie_state().is_unset());
}

#[tokio::test]
async fn hash_lists_join_with_the_pipe_separator() {
    let server = MockServer::start_async().await;
    let pause = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v2/torrents/pause")
            .body_includes("hashes=a%7Cb%7Cc");
        then.status(200);
    });

    let client = client_for(&server, None);
    let hashes = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    client.pause_torrents(&hashes).await.expect("pause");

    pause.assert();
}

#[tokio::test]
async fn delete_serializes_the_delete_files_flag() {
    let server = MockServer::start_async().await;
    let delete = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v2/torrents/delete")
            .body_includes("hashes=cafebabe")
            .body_includes("deleteFiles=true");
        then.status(200);
    });

    let client = client_for(&server, None);
    client
        .delete_torrents(&["cafebabe".to_string()], true)
        .await
        .expect("delete");

    delete.assert();
}

#[tokio::test]
async fn add_torrent_posts_multipart_with_only_set_fields() {
    let server = MockServer::start_async().await;
    let add = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v2/torrents/add")
            .body_includes("name=\"urls\"")
            .body_includes("magnet:?xt=urn:btih:abc")
            .body_includes("name=\"paused\"")
            .body_includes("true");
        then.status(200).body("Ok.");
    });

    let client = client_for(&server, None);
    let options = AddTorrentOptions {
        paused: Some(true),
        ..AddTorrentOptions::new("magnet:?xt=urn:btih:abc")
    };
    client.add_torrent(options).await.expect("add");

    add.assert();
}

#[tokio::test]
async fn read_endpoints_pass_query_parameters() {
    let server = MockServer::start_async().await;
    let log = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v2/log/main")
            .query_param("normal", "true")
            .query_param("info", "false");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!([{"id": 1, "message": "started"}]));
    });

    let client = client_for(&server, None);
    let entries = client.main_log(true, false).await.expect("log");

    log.assert();
    assert_eq!(entries[0]["message"], "started");
}

#[tokio::test]
async fn category_removal_joins_names_with_newlines() {
    let server = MockServer::start_async().await;
    let remove = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v2/torrents/removeCategories")
            .body_includes("categories=movies%0Amusic");
        then.status(200);
    });

    let client = client_for(&server, None);
    let names = vec!["movies".to_string(), "music".to_string()];
    client.remove_categories(&names).await.expect("remove");

    remove.assert();
}

#[tokio::test]
async fn rule_definitions_are_embedded_as_json_text() {
    let server = MockServer::start_async().await;
    let rule = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v2/rss/setRule")
            .body_includes("ruleName=linux-isos")
            .body_includes("mustContain");
        then.status(200);
    });

    let client = client_for(&server, None);
    client
        .set_rss_rule("linux-isos", &json!({"mustContain": "linux", "enabled": true}))
        .await
        .expect("set rule");

    rule.assert();
}

#[tokio::test]
async fn search_start_returns_the_job_handle() {
    let server = MockServer::start_async().await;
    let start = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v2/search/start")
            .body_includes("pattern=debian")
            .body_includes("plugins=enabled")
            .body_includes("category=all");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"id": 7}));
    });

    let client = client_for(&server, None);
    let handle = client
        .start_search("debian", "enabled", "all")
        .await
        .expect("start");

    start.assert();
    assert_eq!(handle["id"], 7);
}

#[tokio::test]
async fn daemon_rejections_surface_status_and_body() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/v2/torrents/properties");
        then.status(404).body("Not Found");
    });

    let client = client_for(&server, None);
    let err = client
        .torrent_properties("deadbeef")
        .await
        .expect_err("missing torrent");

    assert_eq!(err.status(), Some(404));
    assert!(matches!(err, ClientError::Request { .. }));
}
