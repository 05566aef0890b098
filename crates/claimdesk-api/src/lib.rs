//! JSON API for claimdesk.
//!
//! Exposes an axum [`Router`] backed by any [`ClaimBook`]. The book owns the
//! claims; every edit arrives as a single
//! [`Action`](claimdesk_core::action::Action) and the handler merges the
//! resulting replacement back into the stored claim. Auth and TLS are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", claimdesk_api::api_router(book.clone()))
//! ```

pub mod book;
pub mod claims;
pub mod error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use serde::Deserialize;

pub use book::{ClaimBook, MemoryClaimBook};
pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CLAIMDESK_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host: default_host(),
      port: default_port(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `book`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<B>(book: Arc<B>) -> Router<()>
where
  B: ClaimBook + 'static,
{
  Router::new()
    .route("/claims", get(claims::list::<B>).post(claims::create::<B>))
    .route("/claims/{id}", get(claims::get_one::<B>))
    .route("/claims/{id}/actions", post(claims::apply::<B>))
    .route("/claims/{id}/submit", post(claims::submit::<B>))
    .route("/claims/{id}/visible-details", get(claims::visible_details::<B>))
    .with_state(book)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use claimdesk_core::claim::ClaimRecord;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  use super::*;
  use crate::claims::{ActionResponse, VisibleDetail};

  fn app(book: &Arc<MemoryClaimBook>) -> Router { api_router(book.clone()) }

  async fn send(
    book: &Arc<MemoryClaimBook>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(json) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    app(book).oneshot(req).await.unwrap()
  }

  async fn body_json<T: serde::de::DeserializeOwned>(resp: Response) -> T {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  async fn create(book: &Arc<MemoryClaimBook>, kind: &str) -> ClaimRecord {
    let body = json!({ "kind": kind });
    let resp = send(book, "POST", "/claims", Some(body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
  }

  async fn act(
    book: &Arc<MemoryClaimBook>,
    id: Uuid,
    action: Value,
  ) -> (StatusCode, Value) {
    let resp =
      send(book, "POST", &format!("/claims/{id}/actions"), Some(action)).await;
    let status = resp.status();
    (status, body_json(resp).await)
  }

  // ── Claims ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_then_get_returns_blank_draft() {
    let book = Arc::new(MemoryClaimBook::new());
    let claim = create(&book, "property").await;

    let uri = format!("/claims/{}", claim.claim_id);
    let resp = send(&book, "GET", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: ClaimRecord = body_json(resp).await;
    assert_eq!(fetched, claim);
    assert!(fetched.injured_party.is_none());
  }

  #[tokio::test]
  async fn get_missing_claim_returns_404() {
    let book = Arc::new(MemoryClaimBook::new());
    let uri = format!("/claims/{}", Uuid::new_v4());
    let resp = send(&book, "GET", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
  }

  #[tokio::test]
  async fn list_filters_by_kind() {
    let book = Arc::new(MemoryClaimBook::new());
    create(&book, "transport").await;
    create(&book, "communication").await;

    let resp = send(&book, "GET", "/claims?kind=transport", None).await;
    let claims: Vec<ClaimRecord> = body_json(resp).await;
    assert_eq!(claims.len(), 1);
  }

  // ── Actions ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn add_participant_then_driver() {
    let book = Arc::new(MemoryClaimBook::new());
    let id = create(&book, "communication").await.claim_id;

    let (status, body) = act(
      &book,
      id,
      json!({ "op": "add_participant", "role": "injured_party" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["status"], "applied");
    assert_eq!(body["claim"]["injuredParty"]["country"], "PL");
    assert_eq!(body["claim"]["injuredParty"]["drivers"][0]["role"], "kierowca");

    let (_, body) = act(
      &book,
      id,
      json!({ "op": "add_driver", "role": "injured_party" }),
    )
    .await;
    let response: ActionResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.claim.injured_party.unwrap().drivers.len(), 2);
  }

  #[tokio::test]
  async fn rejected_action_reports_reason() {
    let book = Arc::new(MemoryClaimBook::new());
    let id = create(&book, "communication").await.claim_id;
    act(
      &book,
      id,
      json!({ "op": "add_participant", "role": "perpetrator" }),
    )
    .await;

    let (status, body) = act(
      &book,
      id,
      json!({ "op": "remove_driver", "role": "perpetrator", "index": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["status"], "rejected");
    assert_eq!(body["outcome"]["reason"], "last_driver_invariant");
    assert_eq!(
      body["claim"]["perpetrator"]["drivers"].as_array().unwrap().len(),
      1
    );
  }

  #[tokio::test]
  async fn malformed_date_returns_400() {
    let book = Arc::new(MemoryClaimBook::new());
    let id = create(&book, "property").await.claim_id;
    let (status, body) =
      act(&book, id, json!({ "op": "set_event_date", "date": "soon" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid date"));
  }

  #[tokio::test]
  async fn unknown_field_is_rejected_by_the_extractor() {
    let book = Arc::new(MemoryClaimBook::new());
    let id = create(&book, "property").await.claim_id;
    let resp = send(
      &book,
      "POST",
      &format!("/claims/{id}/actions"),
      Some(json!({
        "op": "update_participant",
        "role": "injured_party",
        "field": "drivers",
        "value": "x"
      })),
    )
    .await;
    assert!(resp.status().is_client_error());
  }

  #[tokio::test]
  async fn action_on_missing_claim_returns_404() {
    let book = Arc::new(MemoryClaimBook::new());
    let (status, _) = act(
      &book,
      Uuid::new_v4(),
      json!({ "op": "add_participant", "role": "injured_party" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Submit ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn submitted_claim_refuses_actions_with_409() {
    let book = Arc::new(MemoryClaimBook::new());
    let id = create(&book, "transport").await.claim_id;

    let resp = send(&book, "POST", &format!("/claims/{id}/submit"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = send(&book, "POST", &format!("/claims/{id}/submit"), None).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let (status, _) = act(
      &book,
      id,
      json!({ "op": "add_participant", "role": "injured_party" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let claim = book.get_claim(id).await.unwrap().unwrap();
    assert!(claim.injured_party.is_none());
  }

  // ── Visible details ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn visible_details_follow_called_services() {
    let book = Arc::new(MemoryClaimBook::new());
    let id = create(&book, "communication").await.claim_id;
    let uri = format!("/claims/{id}/visible-details");

    let details: Vec<VisibleDetail> =
      body_json(send(&book, "GET", &uri, None).await).await;
    assert!(details.is_empty());

    act(
      &book,
      id,
      json!({ "op": "set_service", "service": "tow_truck", "called": true }),
    )
    .await;
    act(
      &book,
      id,
      json!({
        "op": "set_service_detail",
        "field": "tow_company",
        "value": "Auto-Hol"
      }),
    )
    .await;

    let details: Vec<VisibleDetail> =
      body_json(send(&book, "GET", &uri, None).await).await;
    assert_eq!(details.len(), 2);
    assert_eq!(details[0].value.as_deref(), Some("Auto-Hol"));
    assert_eq!(details[1].value, None);
  }
}
