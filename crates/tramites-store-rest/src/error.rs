//! Error type for `tramites-store-rest`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The service answered with a non-success status.
  #[error("{method} {table} → {status}: {body}")]
  Status {
    method: &'static str,
    table:  String,
    status: StatusCode,
    body:   String,
  },

  /// An insert returned an empty representation.
  #[error("insert into {0} returned no row")]
  EmptyInsert(String),

  #[error("invalid configuration: {0}")]
  Config(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
