//! Row shapes as they travel over the wire.
//!
//! Table and column names follow the hosted schema, which predates this
//! crate and is in Spanish.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tramites_core::{
  case::{Case, CaseRecord},
  catalog::{CatalogEntry, CatalogKind},
  follow_up::{FollowUp, NewFollowUp},
  id::{CaseId, CatalogId, FollowUpId},
};

pub const CASES_TABLE: &str = "tramites";
pub const FOLLOW_UPS_TABLE: &str = "seguimientos";

pub fn catalog_table(kind: CatalogKind) -> &'static str {
  match kind {
    CatalogKind::Country => "cat_paises",
    CatalogKind::CaseType => "cat_tipos",
    CatalogKind::Status => "cat_estados",
  }
}

// ─── Catalogs ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CatalogRow {
  pub id:     i64,
  pub nombre: String,
}

impl From<CatalogRow> for CatalogEntry {
  fn from(row: CatalogRow) -> Self { Self { id: CatalogId(row.id), name: row.nombre } }
}

#[derive(Debug, Serialize)]
pub struct NewCatalogRow<'a> {
  pub nombre: &'a str,
}

// ─── Cases ───────────────────────────────────────────────────────────────────

/// A `tramites` row. Optional text columns may come back as `null`.
#[derive(Debug, Deserialize)]
pub struct CaseRow {
  pub id:                i64,
  pub asunto_principal:  String,
  pub asunto_secundario: Option<String>,
  pub fecha_recibido:    NaiveDate,
  pub fecha_vencimiento: NaiveDate,
  pub tipo_id:           i64,
  pub pais_id:           i64,
  pub estado_id:         i64,
  pub observaciones:     Option<String>,
  pub tramite_padre_id:  Option<i64>,
}

impl From<CaseRow> for Case {
  fn from(row: CaseRow) -> Self {
    Self {
      id:                CaseId(row.id),
      primary_subject:   row.asunto_principal,
      secondary_subject: row.asunto_secundario.unwrap_or_default(),
      received_date:     row.fecha_recibido,
      due_date:          row.fecha_vencimiento,
      case_type_id:      CatalogId(row.tipo_id),
      country_id:        CatalogId(row.pais_id),
      status_id:         CatalogId(row.estado_id),
      notes:             row.observaciones.unwrap_or_default(),
      parent_id:         row.tramite_padre_id.map(CaseId),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct NewCaseRow<'a> {
  pub asunto_principal:  &'a str,
  pub asunto_secundario: &'a str,
  pub fecha_recibido:    NaiveDate,
  pub fecha_vencimiento: NaiveDate,
  pub tipo_id:           i64,
  pub pais_id:           i64,
  pub estado_id:         i64,
  pub observaciones:     &'a str,
  pub tramite_padre_id:  Option<i64>,
}

impl<'a> From<&'a CaseRecord> for NewCaseRow<'a> {
  fn from(r: &'a CaseRecord) -> Self {
    Self {
      asunto_principal:  &r.primary_subject,
      asunto_secundario: &r.secondary_subject,
      fecha_recibido:    r.received_date,
      fecha_vencimiento: r.due_date,
      tipo_id:           r.case_type_id.0,
      pais_id:           r.country_id.0,
      estado_id:         r.status_id.0,
      observaciones:     &r.notes,
      tramite_padre_id:  r.parent_id.map(|p| p.0),
    }
  }
}

// ─── Follow-ups ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FollowUpRow {
  pub id:                i64,
  pub tramite_id:        i64,
  pub fecha_seguimiento: NaiveDate,
  pub anotaciones:       Option<String>,
  pub creado_en:         DateTime<Utc>,
}

impl From<FollowUpRow> for FollowUp {
  fn from(row: FollowUpRow) -> Self {
    Self {
      id:             FollowUpId(row.id),
      case_id:        CaseId(row.tramite_id),
      follow_up_date: row.fecha_seguimiento,
      annotation:     row.anotaciones.unwrap_or_default(),
      recorded_at:    row.creado_en,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct NewFollowUpRow<'a> {
  pub tramite_id:        i64,
  pub fecha_seguimiento: NaiveDate,
  pub anotaciones:       &'a str,
  pub creado_en:         DateTime<Utc>,
}

impl<'a> NewFollowUpRow<'a> {
  pub fn new(input: &'a NewFollowUp, recorded_at: DateTime<Utc>) -> Self {
    Self {
      tramite_id:        input.case_id.0,
      fecha_seguimiento: input.follow_up_date,
      anotaciones:       &input.annotation,
      creado_en:         recorded_at,
    }
  }
}
