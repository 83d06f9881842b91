//! [`RestStore`] — the hosted implementation of [`RecordStore`].

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use tramites_core::{
  case::{Case, CaseRecord},
  catalog::{CatalogEntry, CatalogKind},
  follow_up::{FollowUp, NewFollowUp},
  id::CaseId,
  store::RecordStore,
};

use crate::{
  Error, Result,
  wire::{
    CASES_TABLE, CaseRow, CatalogRow, FOLLOW_UPS_TABLE, FollowUpRow, NewCaseRow,
    NewCatalogRow, NewFollowUpRow, catalog_table,
  },
};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Connection settings: the service location and its access key.
#[derive(Debug, Clone)]
pub struct RestConfig {
  /// Project URL, e.g. `https://xyzcompany.supabase.co`.
  pub base_url: String,
  pub api_key:  String,
  pub timeout:  Duration,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A trámites store behind a PostgREST table API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct RestStore {
  client: Client,
  config: Arc<RestConfig>,
}

impl RestStore {
  pub fn new(config: RestConfig) -> Result<Self> {
    if config.base_url.trim().is_empty() {
      return Err(Error::Config("service URL is empty".into()));
    }
    if config.api_key.trim().is_empty() {
      return Err(Error::Config("access key is empty".into()));
    }
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, config: Arc::new(config) })
  }

  fn url(&self, table: &str) -> String {
    format!(
      "{}/rest/v1/{}",
      self.config.base_url.trim_end_matches('/'),
      table
    )
  }

  fn auth(&self, req: RequestBuilder) -> RequestBuilder {
    req
      .header("apikey", &self.config.api_key)
      .bearer_auth(&self.config.api_key)
  }

  /// `GET /rest/v1/<table>?select=*&<filters>`
  async fn select<T: DeserializeOwned>(
    &self,
    table: &str,
    filters: &[(&str, String)],
  ) -> Result<Vec<T>> {
    debug!(table, ?filters, "select");
    let resp = self
      .auth(self.client.get(self.url(table)))
      .query(&[("select", "*")])
      .query(filters)
      .send()
      .await?;
    let resp = check_status(resp, "GET", table).await?;
    Ok(resp.json().await?)
  }

  /// `POST /rest/v1/<table>` returning the inserted row.
  async fn insert<B: Serialize, T: DeserializeOwned>(&self, table: &str, body: &B) -> Result<T> {
    debug!(table, "insert");
    let resp = self
      .auth(self.client.post(self.url(table)))
      .header("Prefer", "return=representation")
      .json(body)
      .send()
      .await?;
    let resp = check_status(resp, "POST", table).await?;
    let mut rows: Vec<T> = resp.json().await?;
    if rows.is_empty() {
      return Err(Error::EmptyInsert(table.to_owned()));
    }
    Ok(rows.swap_remove(0))
  }
}

async fn check_status(resp: Response, method: &'static str, table: &str) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let body = resp.text().await.unwrap_or_default();
  Err(Error::Status { method, table: table.to_owned(), status, body })
}

fn eq(value: impl std::fmt::Display) -> String { format!("eq.{value}") }

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for RestStore {
  type Error = Error;

  // ── Catalogs ──────────────────────────────────────────────────────────────

  async fn list_catalog(&self, kind: CatalogKind) -> Result<Vec<CatalogEntry>> {
    let rows: Vec<CatalogRow> = self
      .select(catalog_table(kind), &[("order", "id.asc".into())])
      .await?;
    Ok(rows.into_iter().map(CatalogEntry::from).collect())
  }

  async fn insert_catalog(&self, kind: CatalogKind, name: String) -> Result<CatalogEntry> {
    let row: CatalogRow = self
      .insert(catalog_table(kind), &NewCatalogRow { nombre: &name })
      .await?;
    Ok(row.into())
  }

  // ── Cases ─────────────────────────────────────────────────────────────────

  async fn list_cases(&self) -> Result<Vec<Case>> {
    let rows: Vec<CaseRow> = self
      .select(CASES_TABLE, &[("order", "id.asc".into())])
      .await?;
    Ok(rows.into_iter().map(Case::from).collect())
  }

  async fn get_case(&self, id: CaseId) -> Result<Option<Case>> {
    let rows: Vec<CaseRow> = self.select(CASES_TABLE, &[("id", eq(id))]).await?;
    Ok(rows.into_iter().next().map(Case::from))
  }

  async fn insert_case(&self, record: CaseRecord) -> Result<Case> {
    let row: CaseRow = self
      .insert(CASES_TABLE, &NewCaseRow::from(&record))
      .await?;
    Ok(row.into())
  }

  // ── Follow-ups ────────────────────────────────────────────────────────────

  async fn list_follow_ups(&self, case_id: CaseId) -> Result<Vec<FollowUp>> {
    let rows: Vec<FollowUpRow> = self
      .select(FOLLOW_UPS_TABLE, &[
        ("tramite_id", eq(case_id)),
        ("order", "id.asc".into()),
      ])
      .await?;
    Ok(rows.into_iter().map(FollowUp::from).collect())
  }

  async fn insert_follow_up(&self, input: NewFollowUp) -> Result<FollowUp> {
    let row: FollowUpRow = self
      .insert(FOLLOW_UPS_TABLE, &NewFollowUpRow::new(&input, Utc::now()))
      .await?;
    Ok(row.into())
  }
}
