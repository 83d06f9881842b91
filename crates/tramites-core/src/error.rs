//! Error types for `tramites-core`.

use thiserror::Error;

use crate::{
  catalog::CatalogKind,
  id::{CaseId, CatalogId},
};

#[derive(Debug, Error)]
pub enum Error {
  /// The backing store could not be reached or rejected the call.
  #[error("store unavailable: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// A required field is missing or malformed.
  #[error("validation error: {0}")]
  Validation(String),

  #[error("reference error: {0}")]
  Reference(#[from] ReferenceError),

  /// A date could not be parsed or falls outside the supported calendar.
  #[error("invalid input: {0}")]
  InvalidInput(String),
}

impl Error {
  /// Wrap any backend error as [`Error::StoreUnavailable`].
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::StoreUnavailable(Box::new(err))
  }
}

/// A selected catalog entry or parent case does not resolve.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReferenceError {
  #[error("{kind} entry {id} does not exist")]
  CatalogEntry { kind: CatalogKind, id: CatalogId },

  #[error("{kind} entry named {name:?} does not exist")]
  CatalogName { kind: CatalogKind, name: String },

  #[error("case {0} does not exist")]
  Case(CaseId),

  #[error("the parent chain of case {0} contains a cycle")]
  Cycle(CaseId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
