//! End-to-end flow over the public API: resolve credentials from a file,
//! build a client, and exercise calls against a mock server.

use std::io::Write;

use httpmock::MockServer;
use httpmock::prelude::*;
use resend_cli::{Client, Credentials, EmailPayload};
use serde_json::json;

fn isolated_credentials(content: &str) -> (tempfile::TempDir, Credentials) {
    // This test binary runs in its own process, so clearing the
    // environment here cannot disturb other test targets.
    for name in [
        "RESEND_API_KEY",
        "RESEND_FROM",
        "RESEND_REPLY_TO",
        "RESEND_SIGNATURE",
    ] {
        unsafe { std::env::remove_var(name) };
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resend.env");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();

    let credentials = Credentials::resolve_at(&path).unwrap();
    (dir, credentials)
}

#[tokio::test]
async fn file_resolved_key_authenticates_a_send() {
    let (_dir, credentials) = isolated_credentials(
        "# resend credentials\nRESEND_API_KEY=re_integration\nRESEND_FROM=\"Bot <bot@example.com>\"\n",
    );
    assert_eq!(credentials.defaults.from, "Bot <bot@example.com>");

    let server = MockServer::start_async().await;
    let send = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/emails")
                .header("authorization", "Bearer re_integration");
            then.status(200).json_body(json!({ "id": "email_789" }));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/audiences/aud9");
            then.status(204);
        })
        .await;

    let client = Client::builder(credentials.api_key)
        .base_url(server.base_url())
        .build()
        .unwrap();

    let payload = EmailPayload {
        from: credentials.defaults.from.clone(),
        to: vec!["you@example.com".into()],
        subject: "Integration".into(),
        text: Some("Hello".into()),
        ..Default::default()
    };
    let sent = client.send_email(&payload).await.unwrap();
    assert_eq!(sent["id"], "email_789");
    send.assert_async().await;

    let gone = client.delete_audience("aud9").await.unwrap();
    assert!(gone.is_null());
    delete.assert_async().await;
}
