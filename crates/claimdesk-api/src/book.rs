//! The `ClaimBook` trait and its in-memory implementation.
//!
//! The book plays the owning screen: it holds the authoritative claim
//! records and serialises edits against each one.

use std::{collections::HashMap, convert::Infallible, future::Future, sync::Arc};

use claimdesk_core::claim::{ClaimKind, ClaimRecord};
use tokio::sync::RwLock;
use uuid::Uuid;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over wherever claims live while they are being edited.
///
/// All methods return `Send` futures so the trait can be used behind `axum`.
pub trait ClaimBook: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create and store a blank draft claim.
  fn create_claim(
    &self,
    kind: ClaimKind,
  ) -> impl Future<Output = Result<ClaimRecord, Self::Error>> + Send + '_;

  /// Retrieve a claim by id. Returns `None` if not found.
  fn get_claim(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<ClaimRecord>, Self::Error>>
  + Send
  + '_;

  /// List all claims, optionally filtered by kind, oldest first.
  fn list_claims(
    &self,
    kind: Option<ClaimKind>,
  ) -> impl Future<Output = Result<Vec<ClaimRecord>, Self::Error>> + Send + '_;

  /// Run `f` against the stored claim with no other edit interleaved.
  /// Returns `None` if the claim does not exist.
  fn update_claim<F, T>(
    &self,
    id: Uuid,
    f: F,
  ) -> impl Future<Output = Result<Option<T>, Self::Error>> + Send + '_
  where
    F: FnOnce(&mut ClaimRecord) -> T + Send + 'static,
    T: Send + 'static;
}

// ─── In-memory book ──────────────────────────────────────────────────────────

/// Claims held in process memory. Cloning is cheap and shares the claims.
#[derive(Clone, Default)]
pub struct MemoryClaimBook {
  claims: Arc<RwLock<HashMap<Uuid, ClaimRecord>>>,
}

impl MemoryClaimBook {
  pub fn new() -> Self { Self::default() }
}

impl ClaimBook for MemoryClaimBook {
  type Error = Infallible;

  async fn create_claim(
    &self,
    kind: ClaimKind,
  ) -> Result<ClaimRecord, Infallible> {
    let claim = ClaimRecord::new(kind);
    self.claims.write().await.insert(claim.claim_id, claim.clone());
    tracing::info!(claim_id = %claim.claim_id, %kind, "claim created");
    Ok(claim)
  }

  async fn get_claim(
    &self,
    id: Uuid,
  ) -> Result<Option<ClaimRecord>, Infallible> {
    Ok(self.claims.read().await.get(&id).cloned())
  }

  async fn list_claims(
    &self,
    kind: Option<ClaimKind>,
  ) -> Result<Vec<ClaimRecord>, Infallible> {
    let mut claims: Vec<_> = self
      .claims
      .read()
      .await
      .values()
      .filter(|c| kind.is_none_or(|k| c.kind == k))
      .cloned()
      .collect();
    claims.sort_by_key(|c| (c.created_at, c.claim_id));
    Ok(claims)
  }

  async fn update_claim<F, T>(
    &self,
    id: Uuid,
    f: F,
  ) -> Result<Option<T>, Infallible>
  where
    F: FnOnce(&mut ClaimRecord) -> T + Send + 'static,
    T: Send + 'static,
  {
    let mut claims = self.claims.write().await;
    Ok(claims.get_mut(&id).map(f))
  }
}
