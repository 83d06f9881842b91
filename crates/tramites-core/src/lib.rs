//! Core types and trait definitions for the trámites case register.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::RecordStore`]; the repositories in
//! [`repo`] layer validation and the due-date rule on top of any backend.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod case;
pub mod catalog;
pub mod due_date;
pub mod error;
pub mod follow_up;
pub mod id;
pub mod repo;
pub mod store;

pub use error::{Error, ReferenceError, Result};
