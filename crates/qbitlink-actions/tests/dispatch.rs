//! End-to-end dispatch tests: host request in, daemon payload out.

use httpmock::MockServer;
use httpmock::prelude::*;
use qbitlink_actions::{Action, ClientRegistry, ConnectionProfile};
use qbitlink_client::Credentials;
use serde_json::json;

#[tokio::test]
async fn dispatch_reaches_the_daemon_and_returns_its_payload() {
    let server = MockServer::start_async().await;
    let torrents = server.mock(|when, then| {
        when.method(GET).path("/api/v2/torrents/info");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!([{"hash": "abc", "name": "debian.iso", "state": "downloading"}]));
    });

    let registry = ClientRegistry::new();
    let profile = ConnectionProfile::new(server.base_url(), None);
    let client = registry.obtain(&profile, None).expect("client");

    let action = Action::from_request("getTorrentsList", json!({})).expect("decodes");
    let payload = action.run(&client).await.expect("dispatch");

    torrents.assert();
    assert_eq!(payload[0]["name"], "debian.iso");
}

#[tokio::test]
async fn dispatch_shares_the_login_across_actions() {
    let server = MockServer::start_async().await;
    let login = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v2/auth/login")
            .body_includes("username=admin");
        then.status(200)
            .header("set-cookie", "SID=xyz")
            .body("Ok.");
    });
    let version = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v2/app/version")
            .header("Cookie", "SID=xyz");
        then.status(200).body("v5.0.0");
    });
    let transfer = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v2/transfer/info")
            .header("Cookie", "SID=xyz");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"dl_info_speed": 0}));
    });

    let registry = ClientRegistry::new();
    let profile = ConnectionProfile::new(
        server.base_url(),
        Some(Credentials::new("admin", "adminadmin")),
    );

    // Two host invocations with identical connection parameters reuse the
    // cached client and therefore a single login lifecycle.
    let client = registry.obtain(&profile, None).expect("client");
    let version_payload = Action::from_request("getAppVersion", json!({}))
        .expect("decodes")
        .run(&client)
        .await
        .expect("version dispatch");

    let client = registry.obtain(&profile, None).expect("client");
    Action::from_request("getTransferInfo", json!({}))
        .expect("decodes")
        .run(&client)
        .await
        .expect("transfer dispatch");

    login.assert_hits(1);
    version.assert_hits(1);
    transfer.assert_hits(1);
    assert_eq!(version_payload, json!("v5.0.0"));
}

#[tokio::test]
async fn write_actions_serialize_the_wire_invariants() {
    let server = MockServer::start_async().await;
    let delete = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v2/torrents/delete")
            .body_includes("hashes=a%7Cb")
            .body_includes("deleteFiles=false");
        then.status(200);
    });

    let registry = ClientRegistry::new();
    let profile = ConnectionProfile::new(server.base_url(), None);
    let client = registry.obtain(&profile, None).expect("client");

    let payload = Action::from_request("deleteTorrent", json!({"hashes": ["a", "b"]}))
        .expect("decodes")
        .run(&client)
        .await
        .expect("dispatch");

    delete.assert();
    assert!(payload.is_null());
}
