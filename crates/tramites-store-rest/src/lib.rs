//! Hosted backend for the trámites register.
//!
//! Talks to a PostgREST-style table API (as exposed by Supabase) over HTTPS.
//! The expected table layout is in `sql/schema.sql`.

mod store;
mod wire;

pub mod error;

pub use error::{Error, Result};
pub use store::{RestConfig, RestStore};

#[cfg(test)]
mod tests;
