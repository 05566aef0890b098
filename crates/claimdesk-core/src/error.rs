//! Error types for `claimdesk-core`.
//!
//! Editor guards never produce an [`Error`]; they report
//! [`Rejection`](crate::editor::Rejection) instead. Errors are reserved for
//! input that cannot be interpreted at all.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid date {0:?}: expected YYYY-MM-DD or DD.MM.YYYY")]
  InvalidDate(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
