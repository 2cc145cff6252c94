//! End-to-end tests against an in-memory vendor.
//!
//! The stub transport emulates the vendor endpoint: it tracks sessions,
//! echoes posted bodies back as extracted text, and never touches the
//! network.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use scrappey::{
    ClientConfig, ClientError, CookieInput, RequestBody, RequestConfig, ResponseError, Scrappey,
    ScrappeyClient, SessionOptions, Transport, TransportError, TransportReply, TransportRequest,
};

/// In-memory vendor: answers every command the way the real endpoint
/// shapes its replies.
#[derive(Default)]
struct StubVendor {
    sessions: Mutex<HashSet<String>>,
    calls: Mutex<Vec<Value>>,
}

impl StubVendor {
    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn reply(&self, payload: &Value) -> Value {
        let cmd = payload["cmd"].as_str().unwrap_or_default().to_string();
        match cmd.as_str() {
            "sessions.create" => {
                let id = payload["session"]
                    .as_str()
                    .unwrap_or("assigned-by-vendor")
                    .to_string();
                self.sessions.lock().unwrap().insert(id.clone());
                json!({
                    "data": "success",
                    "session": id,
                    "fingerprint": {"userAgent": "StubBrowser/1.0"}
                })
            }
            "sessions.destroy" => {
                let id = payload["session"].as_str().unwrap_or_default();
                self.sessions.lock().unwrap().remove(id);
                json!({"data": "success"})
            }
            "sessions.active" => {
                let id = payload["session"].as_str().unwrap_or_default();
                let active = self.sessions.lock().unwrap().contains(id);
                json!({"data": "success", "active": active})
            }
            "sessions.list" => {
                let sessions: Vec<String> =
                    self.sessions.lock().unwrap().iter().cloned().collect();
                let open = sessions.len();
                json!({
                    "data": "success",
                    "sessions": sessions,
                    "open": open,
                    "limit": 10
                })
            }
            _ => {
                // request.*: echo the posted body back as extracted text.
                let echoed = payload.get("postData").cloned().unwrap_or(Value::Null);
                let mut solution = json!({
                    "verified": true,
                    "statusCode": 200,
                    "currentUrl": payload["url"],
                    "response": "<html><body>stub</body></html>",
                    "responseHeaders": {"Content-Type": "text/html", "Server": "stub"}
                });
                if let Value::String(text) = echoed {
                    solution["innerText"] = Value::String(text);
                }
                json!({
                    "data": "success",
                    "session": "stub-session",
                    "timeElapsed": 42,
                    "solution": solution
                })
            }
        }
    }
}

#[async_trait]
impl Transport for StubVendor {
    async fn execute(&self, request: TransportRequest) -> Result<TransportReply, TransportError> {
        self.calls.lock().unwrap().push(request.body.clone());
        let reply = self.reply(&request.body);
        Ok(TransportReply {
            status: 200,
            body: reply.to_string(),
        })
    }
}

fn stub_client() -> (ScrappeyClient<StubVendor>, Arc<StubVendor>) {
    let vendor = Arc::new(StubVendor::default());
    let client = ScrappeyClient::new(ClientConfig::new("test-key"), Arc::clone(&vendor));
    (client, vendor)
}

#[tokio::test]
async fn missing_api_key_makes_no_network_call() {
    let vendor = Arc::new(StubVendor::default());
    let client = ScrappeyClient::new(ClientConfig::new(""), Arc::clone(&vendor));

    let result = client.get(RequestConfig::get("https://example.com")).await;
    assert!(matches!(result, Err(ClientError::MissingApiKey)));
    assert_eq!(vendor.call_count(), 0);
}

#[tokio::test]
async fn text_body_round_trips_through_echo() {
    let (client, _) = stub_client();

    let mut response = client
        .post(
            RequestConfig::post("https://httpbin.rs/post")
                .body(RequestBody::text("test=test&test2=test2")),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.text().unwrap(), "test=test&test2=test2");
}

#[tokio::test]
async fn json_body_round_trips_through_echo() {
    let (client, _) = stub_client();

    let body = json!({"email": "testtest@test.nl", "password": "password"});
    let mut response = client
        .post(
            RequestConfig::post("https://backend.example/api/auth/login")
                .header("content-type", "application/json")
                .body(RequestBody::Json(body.clone()))
                .expect_json(),
        )
        .await
        .unwrap();

    assert_eq!(response.json().unwrap(), body);
}

#[tokio::test]
async fn html_response_keeps_raw_markup() {
    let (client, _) = stub_client();

    let mut response = client
        .get(RequestConfig::get("https://example.com"))
        .await
        .unwrap();

    assert_eq!(response.peek_json(), None);
    assert_eq!(response.text().unwrap(), "<html><body>stub</body></html>");
}

#[tokio::test]
async fn second_body_read_fails() {
    let (client, _) = stub_client();

    let mut response = client
        .get(RequestConfig::get("https://example.com"))
        .await
        .unwrap();

    response.text().unwrap();
    assert!(matches!(
        response.text(),
        Err(ResponseError::BodyAlreadyConsumed)
    ));
}

#[tokio::test]
async fn response_headers_are_lower_cased() {
    let (client, _) = stub_client();

    let response = client
        .get(RequestConfig::get("https://example.com"))
        .await
        .unwrap();

    assert_eq!(response.header("server"), Some("stub"));
    assert_eq!(response.content_type(), Some("text/html"));
}

#[tokio::test]
async fn vendor_metadata_is_attached() {
    let (client, _) = stub_client();

    let response = client
        .get(RequestConfig::get("https://example.com"))
        .await
        .unwrap();

    assert!(response.meta.verified);
    assert_eq!(response.meta.session.as_deref(), Some("stub-session"));
    assert_eq!(response.meta.time_elapsed, Some(42));
}

#[tokio::test]
async fn session_lifecycle_reports_active_until_destroyed() {
    let (client, _) = stub_client();

    let created = client
        .create_session(SessionOptions::new().with_session("lifecycle"))
        .await
        .unwrap();
    assert_eq!(created.session, "lifecycle");
    assert!(created.fingerprint.is_some());

    assert!(client.is_session_active("lifecycle").await.unwrap());

    let listed = client.list_sessions(1).await.unwrap();
    assert_eq!(listed.sessions, vec!["lifecycle".to_string()]);
    assert_eq!(listed.open, Some(1));

    client.destroy_session("lifecycle").await.unwrap();
    assert!(!client.is_session_active("lifecycle").await.unwrap());
}

#[tokio::test]
async fn request_options_reach_the_wire() {
    let (client, vendor) = stub_client();

    client
        .get(
            RequestConfig::get("https://example.com/search")
                .param("q", "rust")
                .cookies(CookieInput::header("a=1"))
                .vendor(
                    scrappey::VendorExtensions::new()
                        .with_session("lifecycle")
                        .with_cloudflare_bypass(),
                ),
        )
        .await
        .unwrap();

    let calls = vendor.calls.lock().unwrap();
    let payload = &calls[0];
    assert_eq!(payload["cmd"], json!("request.get"));
    assert_eq!(payload["url"], json!("https://example.com/search?q=rust"));
    assert_eq!(payload["cookies"], json!("a=1"));
    assert_eq!(payload["session"], json!("lifecycle"));
    assert_eq!(payload["cloudflareBypass"], json!(true));
    assert!(payload.get("params").is_none());
}

/// The default transport wiring compiles and constructs; the typed
/// surface is the same client the stub tests exercise.
#[test]
fn default_client_constructs() {
    let built: Result<Scrappey, _> = scrappey::client("key");
    assert!(built.is_ok());
}
