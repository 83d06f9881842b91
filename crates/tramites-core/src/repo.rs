//! Repositories — validation and derived fields on top of a [`RecordStore`].
//!
//! Each repository owns the store handle it was constructed with; there is
//! no process-wide connection. Every backend failure surfaces as
//! [`Error::StoreUnavailable`]. Nothing is retried.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::{
  case::{Case, CaseDetail, CaseRecord, NewCase},
  catalog::{CatalogEntry, CatalogKind, CatalogSnapshot, Catalogs},
  due_date::due_date,
  error::{Error, ReferenceError, Result},
  follow_up::{FollowUp, NewFollowUp, sort_for_display},
  id::CaseId,
  store::RecordStore,
};

// ─── Catalog store ───────────────────────────────────────────────────────────

/// List and append catalog entries.
#[derive(Debug, Clone)]
pub struct CatalogStore<S> {
  store: S,
}

impl<S: RecordStore> CatalogStore<S> {
  pub fn new(store: S) -> Self { Self { store } }

  /// All entries of `kind`; empty if the catalog has none.
  pub async fn list_all(&self, kind: CatalogKind) -> Result<Vec<CatalogEntry>> {
    debug!(%kind, "listing catalog");
    self.store.list_catalog(kind).await.map_err(Error::store)
  }

  /// Append `name` to `kind`. Duplicate names are accepted.
  pub async fn append(&self, kind: CatalogKind, name: &str) -> Result<CatalogEntry> {
    let name = name.trim();
    if name.is_empty() {
      return Err(Error::Validation(format!("{kind} name must not be empty")));
    }
    let entry = self
      .store
      .insert_catalog(kind, name.to_owned())
      .await
      .map_err(Error::store)?;
    info!(%kind, id = %entry.id, name = %entry.name, "catalog entry added");
    Ok(entry)
  }

  pub async fn snapshot(&self, kind: CatalogKind) -> Result<CatalogSnapshot> {
    fetch_snapshot(&self.store, kind).await
  }

  /// Fetch all three catalogs.
  pub async fn snapshot_all(&self) -> Result<Catalogs> { fetch_catalogs(&self.store).await }
}

async fn fetch_catalogs<S: RecordStore>(store: &S) -> Result<Catalogs> {
  Ok(Catalogs {
    countries:  fetch_snapshot(store, CatalogKind::Country).await?,
    case_types: fetch_snapshot(store, CatalogKind::CaseType).await?,
    statuses:   fetch_snapshot(store, CatalogKind::Status).await?,
  })
}

async fn fetch_snapshot<S: RecordStore>(
  store: &S,
  kind: CatalogKind,
) -> Result<CatalogSnapshot> {
  let entries = store.list_catalog(kind).await.map_err(Error::store)?;
  Ok(CatalogSnapshot::new(kind, entries))
}

// ─── Case repository ─────────────────────────────────────────────────────────

/// List, inspect and create cases.
#[derive(Debug, Clone)]
pub struct CaseRepository<S> {
  store: S,
}

impl<S: RecordStore> CaseRepository<S> {
  pub fn new(store: S) -> Self { Self { store } }

  /// All cases in store order; empty if none exist.
  pub async fn list_all(&self) -> Result<Vec<Case>> {
    debug!("listing cases");
    self.store.list_cases().await.map_err(Error::store)
  }

  pub async fn get(&self, id: CaseId) -> Result<Option<Case>> {
    self.store.get_case(id).await.map_err(Error::store)
  }

  /// Direct sub-cases of `id`.
  pub async fn children(&self, id: CaseId) -> Result<Vec<Case>> {
    let mut cases = self.list_all().await?;
    cases.retain(|c| c.parent_id == Some(id));
    Ok(cases)
  }

  /// Validate `input`, compute its due date and insert it.
  ///
  /// Rejects a blank primary subject, catalog ids missing from the current
  /// catalogs, a parent that does not exist and a parent whose ancestor
  /// chain loops.
  pub async fn create(&self, input: NewCase) -> Result<Case> {
    let primary_subject = input.primary_subject.trim();
    if primary_subject.is_empty() {
      return Err(Error::Validation("primary subject must not be empty".into()));
    }

    let due = due_date(input.received_date)?;

    let catalogs = fetch_catalogs(&self.store).await?;
    for (kind, id) in [
      (CatalogKind::CaseType, input.case_type_id),
      (CatalogKind::Country, input.country_id),
      (CatalogKind::Status, input.status_id),
    ] {
      if !catalogs.get(kind).contains(id) {
        warn!(%kind, %id, "rejecting case with unknown catalog entry");
        return Err(ReferenceError::CatalogEntry { kind, id }.into());
      }
    }

    if let Some(parent) = input.parent_id {
      let cases = self.list_all().await?;
      check_parent(parent, &cases).inspect_err(|e| {
        warn!(%parent, error = %e, "rejecting case with invalid parent");
      })?;
    }

    let record = CaseRecord {
      primary_subject: primary_subject.to_owned(),
      secondary_subject: input.secondary_subject,
      received_date: input.received_date,
      due_date: due,
      case_type_id: input.case_type_id,
      country_id: input.country_id,
      status_id: input.status_id,
      notes: input.notes,
      parent_id: input.parent_id,
    };

    let case = self.store.insert_case(record).await.map_err(Error::store)?;
    info!(id = %case.id, due_date = %case.due_date, "case created");
    Ok(case)
  }

  /// Materialise the [`CaseDetail`] for `id`. Returns `None` if the case
  /// does not exist.
  pub async fn detail(&self, id: CaseId) -> Result<Option<CaseDetail>> {
    let cases = self.list_all().await?;
    let Some(case) = cases.iter().find(|c| c.id == id).cloned() else {
      return Ok(None);
    };

    let catalogs = fetch_catalogs(&self.store).await?;
    let parent = case
      .parent_id
      .and_then(|p| cases.iter().find(|c| c.id == p).cloned());
    let children = cases
      .iter()
      .filter(|c| c.parent_id == Some(id))
      .cloned()
      .collect();

    Ok(Some(CaseDetail {
      case_type: catalogs.case_types.find(case.case_type_id).cloned(),
      country: catalogs.countries.find(case.country_id).cloned(),
      status: catalogs.statuses.find(case.status_id).cloned(),
      parent,
      children,
      case,
    }))
  }
}

/// Check that `parent` exists in `cases` and that walking up from it never
/// revisits a case.
///
/// The walk is bounded by the number of cases. An ancestor above `parent`
/// that is missing ends the walk without error; only the direct parent must
/// exist.
pub fn check_parent(parent: CaseId, cases: &[Case]) -> Result<()> {
  let parents: HashMap<CaseId, Option<CaseId>> =
    cases.iter().map(|c| (c.id, c.parent_id)).collect();

  let mut current = match parents.get(&parent) {
    Some(next) => *next,
    None => return Err(ReferenceError::Case(parent).into()),
  };

  let mut steps = 1;
  while let Some(id) = current {
    if id == parent || steps > parents.len() {
      return Err(ReferenceError::Cycle(parent).into());
    }
    current = parents.get(&id).copied().flatten();
    steps += 1;
  }
  Ok(())
}

// ─── Follow-up repository ────────────────────────────────────────────────────

/// List and append follow-ups for a case.
#[derive(Debug, Clone)]
pub struct FollowUpRepository<S> {
  store: S,
}

impl<S: RecordStore> FollowUpRepository<S> {
  pub fn new(store: S) -> Self { Self { store } }

  /// Follow-ups for `case_id`, oldest first. An unknown case yields an
  /// empty list.
  pub async fn list_by_case(&self, case_id: CaseId) -> Result<Vec<FollowUp>> {
    debug!(%case_id, "listing follow-ups");
    let mut follow_ups = self
      .store
      .list_follow_ups(case_id)
      .await
      .map_err(Error::store)?;
    sort_for_display(&mut follow_ups);
    Ok(follow_ups)
  }

  /// Append a note to `case_id`. The annotation may be empty; the case must
  /// exist.
  pub async fn append(
    &self,
    case_id: CaseId,
    date: NaiveDate,
    annotation: &str,
  ) -> Result<FollowUp> {
    if self.store.get_case(case_id).await.map_err(Error::store)?.is_none() {
      warn!(%case_id, "rejecting follow-up for unknown case");
      return Err(ReferenceError::Case(case_id).into());
    }

    let follow_up = self
      .store
      .insert_follow_up(NewFollowUp {
        case_id,
        follow_up_date: date,
        annotation: annotation.to_owned(),
      })
      .await
      .map_err(Error::store)?;
    info!(%case_id, id = %follow_up.id, "follow-up added");
    Ok(follow_up)
  }
}
