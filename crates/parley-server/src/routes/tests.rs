//! End-to-end tests for the router with a scripted model.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::Router;
use parley_ai::{AiError, AiResponse, ModelAdapter, ModelClient, Role, TokenUsage, Turn};
use parley_common::SessionId;
use parley_config::{AppConfig, ParleyConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::router;
use crate::session::{CookieSigner, HistoryStore, MemoryHistoryStore, SESSION_COOKIE};
use crate::state::AppState;

/// Replies `reply-N` to the N-th call, or fails when told to.
#[derive(Default)]
struct ScriptedModel {
    calls: Mutex<Vec<Vec<Turn>>>,
    failures: Mutex<VecDeque<bool>>,
}

impl ScriptedModel {
    fn fail_next(&self) {
        self.failures.lock().unwrap().push_back(true);
    }

    fn calls(&self) -> Vec<Vec<Turn>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, history: &[Turn]) -> Result<AiResponse, AiError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(history.to_vec());
        if self.failures.lock().unwrap().pop_front().unwrap_or(false) {
            return Err(AiError::RateLimited);
        }
        Ok(AiResponse {
            content: format!("reply-{}", calls.len()),
            usage: TokenUsage::default(),
        })
    }
}

struct Harness {
    app: Router,
    store: MemoryHistoryStore,
    model: Arc<ScriptedModel>,
}

fn app_config(capacity: usize) -> AppConfig {
    let mut settings = ParleyConfig::default();
    settings.history.capacity = capacity;
    AppConfig {
        settings,
        api_key: Some("client-key".into()),
        system_instruction: "Be helpful.".into(),
    }
}

fn harness_with(capacity: usize, available: bool) -> Harness {
    let config = app_config(capacity);
    let model = Arc::new(ScriptedModel::default());
    let adapter = if available {
        ModelAdapter::ready(model.clone())
    } else {
        ModelAdapter::unavailable("GEMINI_API_KEY is not set")
    };
    let store = MemoryHistoryStore::new(config.history_capacity());
    let state = AppState::new(
        &config,
        adapter,
        Arc::new(store.clone()),
        CookieSigner::random(),
    );
    Harness {
        app: router(state),
        store,
        model,
    }
}

fn harness() -> Harness {
    harness_with(12, true)
}

/// Visit the landing page and return the session cookie it sets.
async fn open_session(h: &Harness) -> String {
    let response = h
        .app
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

fn session_id(cookie: &str) -> SessionId {
    let value = cookie
        .strip_prefix(&format!("{SESSION_COOKIE}="))
        .unwrap();
    let (id, _) = value.rsplit_once('.').unwrap();
    SessionId::parse(id).unwrap()
}

async fn post_chat(h: &Harness, cookie: Option<&str>, body: &str) -> (StatusCode, Value) {
    let mut request = Request::post("/chat").header(CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        request = request.header(COOKIE, cookie);
    }
    let response = h
        .app
        .clone()
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn say(h: &Harness, cookie: &str, message: &str) -> (StatusCode, Value) {
    post_chat(h, Some(cookie), &json!({ "message": message }).to_string()).await
}

#[tokio::test]
async fn chat_returns_reply_and_records_exchange() {
    let h = harness();
    let cookie = open_session(&h).await;

    let (status, body) = say(&h, &cookie, "  hello  ").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "response": "reply-1" }));

    let history = h.store.get(&session_id(&cookie)).await;
    assert_eq!(history.turns(), [Turn::user("hello"), Turn::model("reply-1")]);
}

#[tokio::test]
async fn model_sees_turns_in_append_order() {
    let h = harness();
    let cookie = open_session(&h).await;
    say(&h, &cookie, "one").await;
    say(&h, &cookie, "two").await;

    let calls = h.model.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1],
        vec![Turn::user("one"), Turn::model("reply-1"), Turn::user("two")]
    );
}

#[tokio::test]
async fn seven_exchanges_keep_twelve_turns() {
    let h = harness_with(12, true);
    let cookie = open_session(&h).await;
    for i in 1..=7 {
        let (status, _) = say(&h, &cookie, &format!("msg-{i}")).await;
        assert_eq!(status, StatusCode::OK);
    }

    let history = h.store.get(&session_id(&cookie)).await;
    assert_eq!(history.len(), 12);
    assert_eq!(history.turns()[0], Turn::user("msg-2"));
    assert_eq!(history.last(), Some(&Turn::model("reply-7")));
    assert!(!history.turns().contains(&Turn::user("msg-1")));
    assert!(!history.turns().contains(&Turn::model("reply-1")));

    // The seventh request opened with a user turn after trimming.
    let seventh = &h.model.calls()[6];
    assert_eq!(seventh.first().map(|t| t.role), Some(Role::User));
    assert_eq!(seventh.len(), 11);
}

#[tokio::test]
async fn unbounded_capacity_keeps_everything() {
    let h = harness_with(0, true);
    let cookie = open_session(&h).await;
    for i in 0..10 {
        say(&h, &cookie, &format!("m{i}")).await;
    }
    assert_eq!(h.store.get(&session_id(&cookie)).await.len(), 20);
}

#[tokio::test]
async fn whitespace_message_is_rejected_without_mutation() {
    let h = harness();
    let cookie = open_session(&h).await;

    let (status, body) = post_chat(&h, Some(&cookie), r#"{"message": "  "}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    assert!(h.store.get(&session_id(&cookie)).await.is_empty());
    assert!(h.model.calls().is_empty());
}

#[tokio::test]
async fn missing_message_is_rejected() {
    let h = harness();
    let cookie = open_session(&h).await;
    let (status, body) = post_chat(&h, Some(&cookie), "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message must not be empty.");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let h = harness();
    let cookie = open_session(&h).await;
    let (status, body) = post_chat(&h, Some(&cookie), "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("JSON"));
    assert!(h.store.get(&session_id(&cookie)).await.is_empty());
}

#[tokio::test]
async fn unavailable_model_returns_500_every_time() {
    let h = harness_with(12, false);
    let cookie = open_session(&h).await;

    for _ in 0..3 {
        let (status, body) = say(&h, &cookie, "hello").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "Server Error: The Gemini API isn't configured. Check the server logs."
        );
    }
    assert!(h.store.get(&session_id(&cookie)).await.is_empty());
}

#[tokio::test]
async fn unavailable_model_checked_before_validation() {
    let h = harness_with(12, false);
    let cookie = open_session(&h).await;
    let (status, _) = post_chat(&h, Some(&cookie), r#"{"message": ""}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn remote_failure_keeps_user_turn() {
    let h = harness();
    let cookie = open_session(&h).await;
    h.model.fail_next();

    let (status, body) = say(&h, &cookie, "are you there?").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(!message.contains("Rate limited"));

    let history = h.store.get(&session_id(&cookie)).await;
    assert_eq!(history.turns(), [Turn::user("are you there?")]);

    let (status, _) = say(&h, &cookie, "hello?").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        h.model.calls()[1],
        vec![Turn::user("are you there?"), Turn::user("hello?")]
    );
}

#[tokio::test]
async fn landing_page_resets_history() {
    let h = harness();
    let cookie = open_session(&h).await;
    say(&h, &cookie, "remember me").await;
    assert_eq!(h.store.get(&session_id(&cookie)).await.len(), 2);

    let response = h
        .app
        .clone()
        .oneshot(
            Request::get("/")
                .header(COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    // Known session: cookie is reused, not reissued.
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert!(h.store.get(&session_id(&cookie)).await.is_empty());
}

#[tokio::test]
async fn chat_without_cookie_starts_a_session() {
    let h = harness();
    let mut request = Request::post("/chat").header(CONTENT_TYPE, "application/json");
    request = request.header(COOKIE, format!("{SESSION_COOKIE}=forged.sig"));
    let response = h
        .app
        .clone()
        .oneshot(request.body(Body::from(r#"{"message": "hi"}"#)).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
    let cookie = cookie.split(';').next().unwrap();
    assert_eq!(h.store.get(&session_id(cookie)).await.len(), 2);
}

#[tokio::test]
async fn sessions_do_not_share_history() {
    let h = harness();
    let alice = open_session(&h).await;
    let bob = open_session(&h).await;
    assert_ne!(alice, bob);

    say(&h, &alice, "alice here").await;
    assert_eq!(h.store.get(&session_id(&alice)).await.len(), 2);
    assert!(h.store.get(&session_id(&bob)).await.is_empty());
}

#[tokio::test]
async fn speak_page_has_no_side_effects() {
    let h = harness();
    let cookie = open_session(&h).await;
    say(&h, &cookie, "keep this").await;

    let response = h
        .app
        .clone()
        .oneshot(
            Request::get("/speak")
                .header(COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert_eq!(h.store.get(&session_id(&cookie)).await.len(), 2);
}

#[tokio::test]
async fn api_config_exposes_key_and_instruction() {
    let h = harness();
    let response = h
        .app
        .clone()
        .oneshot(Request::get("/api/config").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        json!({ "gemini_api_key": "client-key", "system_instruction": "Be helpful." })
    );
}

#[tokio::test]
async fn api_config_reports_null_key() {
    let mut config = app_config(12);
    config.api_key = None;
    let state = AppState::new(
        &config,
        ModelAdapter::unavailable("no key"),
        Arc::new(MemoryHistoryStore::new(None)),
        CookieSigner::random(),
    );
    let response = router(state)
        .oneshot(Request::get("/api/config").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["gemini_api_key"].is_null());
}
