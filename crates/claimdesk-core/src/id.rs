//! Record id generation.
//!
//! Ids never leave the owning claim, so they only need to be unique within a
//! single editing session.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An opaque token identifying a participant or driver record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
  pub fn new(token: impl Into<String>) -> Self { Self(token.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// A source of fresh record ids.
pub trait IdSource {
  fn next_id(&mut self) -> RecordId;
}

/// Random v4 UUID tokens. The default source for live editing.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
  fn next_id(&mut self) -> RecordId { RecordId(Uuid::new_v4().to_string()) }
}

/// Deterministic `prefix-N` tokens, counting up from 1.
#[derive(Debug, Clone)]
pub struct SequentialIds {
  prefix: String,
  next:   u64,
}

impl SequentialIds {
  pub fn new(prefix: impl Into<String>) -> Self {
    Self {
      prefix: prefix.into(),
      next:   1,
    }
  }
}

impl Default for SequentialIds {
  fn default() -> Self { Self::new("rec") }
}

impl IdSource for SequentialIds {
  fn next_id(&mut self) -> RecordId {
    let id = RecordId(format!("{}-{}", self.prefix, self.next));
    self.next += 1;
    id
  }
}

impl<T: IdSource + ?Sized> IdSource for &mut T {
  fn next_id(&mut self) -> RecordId { (**self).next_id() }
}
