//! Crisp webhook → reply dispatch tests against a stub Crisp API.

use axum::http::{header, Method};

mod common;

use common::{client, relay_config, start_relay, start_stub_upstream};

fn event(from: &str, kind: &str, content: &str) -> serde_json::Value {
    serde_json::json!({
        "event": "message:send",
        "data": {
            "website_id": "website-1",
            "session_id": "session_abc",
            "content": content,
            "from": from,
            "type": kind,
        }
    })
}

#[tokio::test]
async fn test_user_text_message_gets_one_reply() {
    let crisp = start_stub_upstream(201, r#"{"error":false,"reason":"dispatched"}"#).await;
    let (addr, shutdown) = start_relay(relay_config("http://127.0.0.1:1", &crisp.url()), None).await;

    let res = client()
        .post(format!("http://{}/crisp/message", addr))
        .json(&event("user", "text", "hello there"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.text().await.unwrap(), "OK");

    let seen = crisp.single_request();
    assert_eq!(seen.method, Method::POST);
    assert_eq!(seen.path, "/website/website-1/conversation/session_abc/message");
    assert_eq!(seen.headers[header::AUTHORIZATION], "Basic aWRlbnQ6c2VjcmV0");
    assert_eq!(seen.headers["x-crisp-tier"], "plugin");

    let sent: serde_json::Value = serde_json::from_slice(&seen.body).unwrap();
    assert_eq!(
        sent,
        serde_json::json!({
            "type": "text",
            "from": "operator",
            "origin": "chat",
            "content": "You said: hello there",
        })
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_non_user_or_non_text_events_send_nothing() {
    let crisp = start_stub_upstream(200, "{}").await;
    let (addr, shutdown) = start_relay(relay_config("http://127.0.0.1:1", &crisp.url()), None).await;

    for (from, kind) in [("operator", "text"), ("user", "file"), ("user", "animation"), ("", "")] {
        let res = client()
            .post(format!("http://{}/crisp/message", addr))
            .json(&event(from, kind, "x"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 200, "from={} type={}", from, kind);
        assert_eq!(res.text().await.unwrap(), "OK");
    }
    assert!(crisp.requests().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_crisp_failure_does_not_change_acknowledgement() {
    let crisp = start_stub_upstream(500, r#"{"error":true,"reason":"server_error"}"#).await;
    let (addr, shutdown) = start_relay(relay_config("http://127.0.0.1:1", &crisp.url()), None).await;

    let res = client()
        .post(format!("http://{}/crisp/message", addr))
        .json(&event("user", "text", "ping"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.text().await.unwrap(), "OK");
    assert_eq!(crisp.requests().len(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_missing_crisp_credentials_skip_network_but_still_ack() {
    let crisp = start_stub_upstream(200, "{}").await;
    let mut config = relay_config("http://127.0.0.1:1", &crisp.url());
    config.crisp.identifier.clear();
    let (addr, shutdown) = start_relay(config, None).await;

    let res = client()
        .post(format!("http://{}/crisp/message", addr))
        .json(&event("user", "text", "ping"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert!(crisp.requests().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_body_is_rejected_without_dispatch() {
    let crisp = start_stub_upstream(200, "{}").await;
    let (addr, shutdown) = start_relay(relay_config("http://127.0.0.1:1", &crisp.url()), None).await;

    let res = client()
        .post(format!("http://{}/crisp/message", addr))
        .header(header::CONTENT_TYPE, "application/json")
        .body("{\"event\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 400);
    assert!(crisp.requests().is_empty());

    shutdown.trigger();
}
