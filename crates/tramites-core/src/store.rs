//! The `RecordStore` trait.
//!
//! The trait is implemented by storage backends (`tramites-store-sqlite`,
//! `tramites-store-rest`). It is the minimal table contract the register
//! needs: select everything from a table, select rows matching one column,
//! and insert a row. There are no updates or deletes.
//!
//! Backends do no validation; that is the job of the repositories in
//! [`crate::repo`].

use std::future::Future;

use crate::{
  case::{Case, CaseRecord},
  catalog::{CatalogEntry, CatalogKind},
  follow_up::{FollowUp, NewFollowUp},
  id::CaseId,
};

/// Abstraction over a trámites storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Catalogs ──────────────────────────────────────────────────────────

  /// All entries of one catalog, in store order.
  fn list_catalog(
    &self,
    kind: CatalogKind,
  ) -> impl Future<Output = Result<Vec<CatalogEntry>, Self::Error>> + Send + '_;

  /// Append an entry and return it with its assigned id.
  fn insert_catalog(
    &self,
    kind: CatalogKind,
    name: String,
  ) -> impl Future<Output = Result<CatalogEntry, Self::Error>> + Send + '_;

  // ── Cases ─────────────────────────────────────────────────────────────

  /// All cases, in store order.
  fn list_cases(
    &self,
  ) -> impl Future<Output = Result<Vec<Case>, Self::Error>> + Send + '_;

  /// Retrieve a case by id. Returns `None` if not found.
  fn get_case(
    &self,
    id: CaseId,
  ) -> impl Future<Output = Result<Option<Case>, Self::Error>> + Send + '_;

  /// Insert a validated case and return it with its assigned id.
  fn insert_case(
    &self,
    record: CaseRecord,
  ) -> impl Future<Output = Result<Case, Self::Error>> + Send + '_;

  // ── Follow-ups ────────────────────────────────────────────────────────

  /// All follow-ups whose case id equals `case_id`, in store order.
  fn list_follow_ups(
    &self,
    case_id: CaseId,
  ) -> impl Future<Output = Result<Vec<FollowUp>, Self::Error>> + Send + '_;

  /// Insert a follow-up, stamping `recorded_at`.
  fn insert_follow_up(
    &self,
    input: NewFollowUp,
  ) -> impl Future<Output = Result<FollowUp, Self::Error>> + Send + '_;
}
