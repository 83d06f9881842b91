//! Cases (trámites) — the administrative records at the centre of the
//! register.
//!
//! A case is written once and never updated. Its due date is computed at
//! creation from the received date and stored alongside it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  catalog::CatalogEntry,
  id::{CaseId, CatalogId},
};

// ─── Case ────────────────────────────────────────────────────────────────────

/// A persisted case record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
  pub id:                CaseId,
  pub primary_subject:   String,
  pub secondary_subject: String,
  pub received_date:     NaiveDate,
  /// Derived from `received_date` at creation; never recalculated.
  pub due_date:          NaiveDate,
  pub case_type_id:      CatalogId,
  pub country_id:        CatalogId,
  pub status_id:         CatalogId,
  pub notes:             String,
  /// Set when this case is a sub-case of another.
  pub parent_id:         Option<CaseId>,
}

// ─── NewCase ─────────────────────────────────────────────────────────────────

/// Input to [`crate::repo::CaseRepository::create`].
/// The due date is not accepted from callers.
#[derive(Debug, Clone)]
pub struct NewCase {
  pub primary_subject:   String,
  pub secondary_subject: String,
  pub received_date:     NaiveDate,
  pub case_type_id:      CatalogId,
  pub country_id:        CatalogId,
  pub status_id:         CatalogId,
  pub notes:             String,
  pub parent_id:         Option<CaseId>,
}

impl NewCase {
  /// Convenience constructor with the optional text fields left empty and no
  /// parent.
  pub fn new(
    primary_subject: impl Into<String>,
    received_date: NaiveDate,
    case_type_id: CatalogId,
    country_id: CatalogId,
    status_id: CatalogId,
  ) -> Self {
    Self {
      primary_subject: primary_subject.into(),
      secondary_subject: String::new(),
      received_date,
      case_type_id,
      country_id,
      status_id,
      notes: String::new(),
      parent_id: None,
    }
  }
}

// ─── CaseRecord ──────────────────────────────────────────────────────────────

/// A validated case ready for insertion, due date included. Handed to
/// [`crate::store::RecordStore::insert_case`]; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRecord {
  pub primary_subject:   String,
  pub secondary_subject: String,
  pub received_date:     NaiveDate,
  pub due_date:          NaiveDate,
  pub case_type_id:      CatalogId,
  pub country_id:        CatalogId,
  pub status_id:         CatalogId,
  pub notes:             String,
  pub parent_id:         Option<CaseId>,
}

impl CaseRecord {
  /// Attach the store-assigned id.
  pub fn into_case(self, id: CaseId) -> Case {
    Case {
      id,
      primary_subject: self.primary_subject,
      secondary_subject: self.secondary_subject,
      received_date: self.received_date,
      due_date: self.due_date,
      case_type_id: self.case_type_id,
      country_id: self.country_id,
      status_id: self.status_id,
      notes: self.notes,
      parent_id: self.parent_id,
    }
  }
}

// ─── Detail view ─────────────────────────────────────────────────────────────

/// The read model for a single case, never stored, always derived.
///
/// Catalog references are resolved to their entries; a reference that no
/// longer resolves is `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseDetail {
  pub case:      Case,
  pub case_type: Option<CatalogEntry>,
  pub country:   Option<CatalogEntry>,
  pub status:    Option<CatalogEntry>,
  pub parent:    Option<Case>,
  /// Direct sub-cases, in store order.
  pub children:  Vec<Case>,
}
