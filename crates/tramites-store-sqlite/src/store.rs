//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tracing::debug;

use tramites_core::{
  case::{Case, CaseRecord},
  catalog::{CatalogEntry, CatalogKind},
  follow_up::{FollowUp, NewFollowUp},
  id::{CaseId, FollowUpId},
  store::RecordStore,
};

use crate::{
  encode::{
    CASE_COLUMNS, RawCase, RawFollowUp, catalog_entry, catalog_table, encode_date,
    encode_dt,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A trámites store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    debug!(path = %path.as_ref().display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  // ── Catalogs ──────────────────────────────────────────────────────────────

  async fn list_catalog(&self, kind: CatalogKind) -> Result<Vec<CatalogEntry>> {
    let sql = format!("SELECT id, name FROM {} ORDER BY id", catalog_table(kind));

    let rows: Vec<(i64, String)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows.into_iter().map(|(id, name)| catalog_entry(id, name)).collect())
  }

  async fn insert_catalog(&self, kind: CatalogKind, name: String) -> Result<CatalogEntry> {
    let sql = format!("INSERT INTO {} (name) VALUES (?1)", catalog_table(kind));
    let stored = name.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(&sql, rusqlite::params![stored])?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(catalog_entry(id, name))
  }

  // ── Cases ─────────────────────────────────────────────────────────────────

  async fn list_cases(&self) -> Result<Vec<Case>> {
    let raws: Vec<RawCase> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("SELECT {CASE_COLUMNS} FROM cases ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawCase::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCase::into_case).collect()
  }

  async fn get_case(&self, id: CaseId) -> Result<Option<Case>> {
    let raw: Option<RawCase> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {CASE_COLUMNS} FROM cases WHERE id = ?1"),
            rusqlite::params![id.0],
            RawCase::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawCase::into_case).transpose()
  }

  async fn insert_case(&self, record: CaseRecord) -> Result<Case> {
    let received_str = encode_date(record.received_date);
    let due_str      = encode_date(record.due_date);
    let row          = record.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO cases (
             primary_subject, secondary_subject, received_date, due_date,
             case_type_id, country_id, status_id, notes, parent_id
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            row.primary_subject,
            row.secondary_subject,
            received_str,
            due_str,
            row.case_type_id.0,
            row.country_id.0,
            row.status_id.0,
            row.notes,
            row.parent_id.map(|p| p.0),
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(record.into_case(CaseId(id)))
  }

  // ── Follow-ups ────────────────────────────────────────────────────────────

  async fn list_follow_ups(&self, case_id: CaseId) -> Result<Vec<FollowUp>> {
    let raws: Vec<RawFollowUp> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, case_id, follow_up_date, annotation, recorded_at
           FROM follow_ups
           WHERE case_id = ?1
           ORDER BY id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![case_id.0], |row| {
            Ok(RawFollowUp {
              id:             row.get(0)?,
              case_id:        row.get(1)?,
              follow_up_date: row.get(2)?,
              annotation:     row.get(3)?,
              recorded_at:    row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFollowUp::into_follow_up).collect()
  }

  async fn insert_follow_up(&self, input: NewFollowUp) -> Result<FollowUp> {
    let recorded_at = Utc::now();
    let date_str    = encode_date(input.follow_up_date);
    let at_str      = encode_dt(recorded_at);
    let annotation  = input.annotation.clone();
    let case_id     = input.case_id.0;

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO follow_ups (case_id, follow_up_date, annotation, recorded_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![case_id, date_str, annotation, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(FollowUp {
      id:             FollowUpId(id),
      case_id:        input.case_id,
      follow_up_date: input.follow_up_date,
      annotation:     input.annotation,
      recorded_at,
    })
  }
}
