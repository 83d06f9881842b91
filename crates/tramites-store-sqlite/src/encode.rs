//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Calendar dates are stored as `YYYY-MM-DD`, timestamps as RFC 3339 strings
//! and ids as SQLite integers.

use chrono::{DateTime, NaiveDate, Utc};
use tramites_core::{
  case::Case,
  catalog::{CatalogEntry, CatalogKind},
  follow_up::FollowUp,
  id::{CaseId, CatalogId, FollowUpId},
};

use crate::{Error, Result};

// ─── Catalog tables ──────────────────────────────────────────────────────────

pub fn catalog_table(kind: CatalogKind) -> &'static str {
  match kind {
    CatalogKind::Country => "countries",
    CatalogKind::CaseType => "case_types",
    CatalogKind::Status => "statuses",
  }
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Columns selected for a case, in order.
pub const CASE_COLUMNS: &str = "id, primary_subject, secondary_subject, received_date, due_date, \
   case_type_id, country_id, status_id, notes, parent_id";

/// Raw values read directly from a `cases` row.
pub struct RawCase {
  pub id:                i64,
  pub primary_subject:   String,
  pub secondary_subject: String,
  pub received_date:     String,
  pub due_date:          String,
  pub case_type_id:      i64,
  pub country_id:        i64,
  pub status_id:         i64,
  pub notes:             String,
  pub parent_id:         Option<i64>,
}

impl RawCase {
  /// Read a row selected with [`CASE_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      primary_subject:   row.get(1)?,
      secondary_subject: row.get(2)?,
      received_date:     row.get(3)?,
      due_date:          row.get(4)?,
      case_type_id:      row.get(5)?,
      country_id:        row.get(6)?,
      status_id:         row.get(7)?,
      notes:             row.get(8)?,
      parent_id:         row.get(9)?,
    })
  }

  pub fn into_case(self) -> Result<Case> {
    Ok(Case {
      id:                CaseId(self.id),
      primary_subject:   self.primary_subject,
      secondary_subject: self.secondary_subject,
      received_date:     decode_date(&self.received_date)?,
      due_date:          decode_date(&self.due_date)?,
      case_type_id:      CatalogId(self.case_type_id),
      country_id:        CatalogId(self.country_id),
      status_id:         CatalogId(self.status_id),
      notes:             self.notes,
      parent_id:         self.parent_id.map(CaseId),
    })
  }
}

/// Raw values read directly from a `follow_ups` row.
pub struct RawFollowUp {
  pub id:             i64,
  pub case_id:        i64,
  pub follow_up_date: String,
  pub annotation:     String,
  pub recorded_at:    String,
}

impl RawFollowUp {
  pub fn into_follow_up(self) -> Result<FollowUp> {
    Ok(FollowUp {
      id:             FollowUpId(self.id),
      case_id:        CaseId(self.case_id),
      follow_up_date: decode_date(&self.follow_up_date)?,
      annotation:     self.annotation,
      recorded_at:    decode_dt(&self.recorded_at)?,
    })
  }
}

pub fn catalog_entry(id: i64, name: String) -> CatalogEntry {
  CatalogEntry { id: CatalogId(id), name }
}
