//! Handlers for `/claims` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/claims` | Optional `?kind=property` filter |
//! | `POST` | `/claims` | Body: `{"kind":"property"}`; returns 201 |
//! | `GET`  | `/claims/:id` | 404 if not found |
//! | `POST` | `/claims/:id/actions` | Body: an [`Action`]; 409 once submitted |
//! | `POST` | `/claims/:id/submit` | 409 if already submitted |
//! | `GET`  | `/claims/:id/visible-details` | Detail inputs now shown |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use claimdesk_core::{
  action::Action,
  claim::{ClaimKind, ClaimRecord, Outcome},
  id::UuidIds,
  services::ServiceDetailField,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{book::ClaimBook, error::ApiError};

fn not_found(id: Uuid) -> ApiError {
  ApiError::NotFound(format!("claim {id} not found"))
}

fn locked(id: Uuid) -> ApiError {
  ApiError::Conflict(format!("claim {id} is submitted and cannot be edited"))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub kind: Option<ClaimKind>,
}

/// `GET /claims[?kind=<kind>]`
pub async fn list<B>(
  State(book): State<Arc<B>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<ClaimRecord>>, ApiError>
where
  B: ClaimBook,
{
  let claims = book
    .list_claims(params.kind)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(claims))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub kind: ClaimKind,
}

/// `POST /claims` — body: `{"kind":"transport"}`
pub async fn create<B>(
  State(book): State<Arc<B>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  B: ClaimBook,
{
  let claim = book
    .create_claim(body.kind)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(claim)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /claims/:id`
pub async fn get_one<B>(
  State(book): State<Arc<B>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ClaimRecord>, ApiError>
where
  B: ClaimBook,
{
  let claim = book
    .get_claim(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(claim))
}

// ─── Actions ──────────────────────────────────────────────────────────────────

/// Response to `POST /claims/:id/actions`.
///
/// A rejected action still answers 200: the claim is returned unchanged
/// alongside the rejection reason.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionResponse {
  pub outcome: Outcome,
  pub claim:   ClaimRecord,
}

/// `POST /claims/:id/actions` — body: a single tagged [`Action`].
pub async fn apply<B>(
  State(book): State<Arc<B>>,
  Path(id): Path<Uuid>,
  Json(action): Json<Action>,
) -> Result<Json<ActionResponse>, ApiError>
where
  B: ClaimBook,
{
  let op = action.name();
  let result = book
    .update_claim(id, move |claim: &mut ClaimRecord| -> Result<_, ApiError> {
      if !claim.is_editable() {
        return Err(locked(id));
      }
      let outcome = claim.apply(action, &mut UuidIds)?;
      Ok(ActionResponse {
        outcome,
        claim: claim.clone(),
      })
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| not_found(id))??;

  tracing::debug!(
    claim_id = %id,
    op,
    applied = result.outcome.is_applied(),
    "action handled"
  );
  Ok(Json(result))
}

// ─── Submit ───────────────────────────────────────────────────────────────────

/// `POST /claims/:id/submit` — locks the claim against further edits.
pub async fn submit<B>(
  State(book): State<Arc<B>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ClaimRecord>, ApiError>
where
  B: ClaimBook,
{
  book
    .update_claim(id, move |claim| match claim.submit() {
      Outcome::Applied => Ok(claim.clone()),
      Outcome::Rejected(_) => Err(locked(id)),
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| not_found(id))?
    .map(Json)
}

// ─── Visible details ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VisibleDetail {
  pub field: ServiceDetailField,
  pub value: Option<String>,
}

/// `GET /claims/:id/visible-details` — every detail input shown for the
/// services currently called, with its entered value if any.
pub async fn visible_details<B>(
  State(book): State<Arc<B>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<VisibleDetail>>, ApiError>
where
  B: ClaimBook,
{
  let claim = book
    .get_claim(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| not_found(id))?;

  let details = claim
    .services
    .visible_fields()
    .into_iter()
    .map(|field| VisibleDetail {
      field,
      value: claim.service_details.get(field).map(str::to_owned),
    })
    .collect();
  Ok(Json(details))
}
