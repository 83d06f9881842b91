//! Catalogs — the small id/name lookup lists used to classify cases.
//!
//! The three catalogs are structurally identical; [`CatalogKind`] selects
//! which one an operation targets. Entries are append-only.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{
  error::{Error, ReferenceError, Result},
  id::CatalogId,
};

// ─── Kind ────────────────────────────────────────────────────────────────────

/// Which lookup list a catalog entry belongs to.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum CatalogKind {
  Country,
  CaseType,
  Status,
}

// ─── Entry ───────────────────────────────────────────────────────────────────

/// One row of a catalog. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
  pub id:   CatalogId,
  pub name: String,
}

// ─── Selection ───────────────────────────────────────────────────────────────

/// How a caller picks a catalog entry: by id, by display name, or by bare
/// digits that could be either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
  Id(CatalogId),
  Name(String),
  /// All-digit text. Resolves only when the id and the name agree, or when
  /// just one of them matches.
  IdOrName(CatalogId, String),
}

impl Selection {
  /// Interpret user text. `id:N` and `name:TEXT` force one reading; bare
  /// digits are ambiguous; anything else is a name.
  pub fn parse(input: &str) -> Self {
    let input = input.trim();
    if let Some(rest) = input.strip_prefix("name:") {
      return Self::Name(rest.trim().to_owned());
    }
    if let Some(rest) = input.strip_prefix("id:") {
      if let Ok(id) = rest.trim().parse::<CatalogId>() {
        return Self::Id(id);
      }
    }
    match input.parse::<CatalogId>() {
      Ok(id) => Self::IdOrName(id, input.to_owned()),
      Err(_) => Self::Name(input.to_owned()),
    }
  }
}

// ─── Snapshots ───────────────────────────────────────────────────────────────

/// A catalog as fetched at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
  pub kind:    CatalogKind,
  pub entries: Vec<CatalogEntry>,
}

impl CatalogSnapshot {
  pub fn new(kind: CatalogKind, entries: Vec<CatalogEntry>) -> Self {
    Self { kind, entries }
  }

  pub fn find(&self, id: CatalogId) -> Option<&CatalogEntry> {
    self.entries.iter().find(|e| e.id == id)
  }

  pub fn contains(&self, id: CatalogId) -> bool { self.find(id).is_some() }

  /// Resolve a [`Selection`] to a single entry.
  ///
  /// Names are compared exactly after trimming. Because duplicate names are
  /// allowed, a name shared by several entries is rejected and the caller
  /// must select by id instead. Bare digits that match one entry by id and a
  /// different one by name are rejected the same way.
  pub fn resolve(&self, selection: &Selection) -> Result<&CatalogEntry> {
    match selection {
      Selection::Id(id) => self.find(*id).ok_or_else(|| {
        ReferenceError::CatalogEntry { kind: self.kind, id: *id }.into()
      }),
      Selection::Name(name) => self.resolve_name(name),
      Selection::IdOrName(id, text) => {
        let by_name = self.entries.iter().any(|e| e.name.trim() == text.as_str());
        match (self.find(*id), by_name) {
          (Some(entry), false) => Ok(entry),
          (None, true) => self.resolve_name(text),
          (None, false) => {
            Err(ReferenceError::CatalogEntry { kind: self.kind, id: *id }.into())
          }
          (Some(entry), true) => {
            let named = self.resolve_name(text)?;
            if named.id == entry.id {
              return Ok(entry);
            }
            Err(Error::Validation(format!(
              "{} {text:?} matches #{} by id and #{} by name; use id:{text} or \
               name:{text}",
              self.kind, entry.id, named.id
            )))
          }
        }
      }
    }
  }

  fn resolve_name(&self, name: &str) -> Result<&CatalogEntry> {
    let mut matches = self.entries.iter().filter(|e| e.name.trim() == name);
    let first = matches.next().ok_or_else(|| ReferenceError::CatalogName {
      kind: self.kind,
      name: name.to_owned(),
    })?;
    if matches.next().is_some() {
      return Err(Error::Validation(format!(
        "{} name {name:?} is ambiguous; select it by id",
        self.kind
      )));
    }
    Ok(first)
  }
}

/// Snapshots of all three catalogs, fetched together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalogs {
  pub countries:  CatalogSnapshot,
  pub case_types: CatalogSnapshot,
  pub statuses:   CatalogSnapshot,
}

impl Catalogs {
  pub fn get(&self, kind: CatalogKind) -> &CatalogSnapshot {
    match kind {
      CatalogKind::Country => &self.countries,
      CatalogKind::CaseType => &self.case_types,
      CatalogKind::Status => &self.statuses,
    }
  }
}
