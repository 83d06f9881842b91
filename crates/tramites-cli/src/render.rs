//! Plain-text and JSON rendering of command results.

use std::fmt::Write as _;

use anyhow::Context as _;
use serde::Serialize;
use tramites_core::{
  case::Case,
  catalog::{CatalogEntry, CatalogKind},
  follow_up::FollowUp,
  id::CatalogId,
};

use crate::commands::CaseReport;

/// Where and how results are printed.
pub struct Output {
  pub json: bool,
}

impl Output {
  /// Print `value` as JSON, or the text produced by `text`.
  pub fn emit<T: Serialize>(
    &self,
    value: &T,
    text: impl FnOnce() -> String,
  ) -> anyhow::Result<()> {
    if self.json {
      let json = serde_json::to_string_pretty(value).context("failed to serialise output")?;
      println!("{json}");
    } else {
      println!("{}", text().trim_end());
    }
    Ok(())
  }
}

pub fn catalog(kind: CatalogKind, entries: &[CatalogEntry]) -> String {
  if entries.is_empty() {
    return format!("The {kind} list is empty.");
  }
  let mut out = format!("{:>5}  NAME\n", "ID");
  for e in entries {
    let _ = writeln!(out, "{:>5}  {}", e.id, e.name);
  }
  out
}

pub fn case_table(cases: &[Case]) -> String {
  if cases.is_empty() {
    return "No cases registered.".into();
  }
  let width = cases
    .iter()
    .map(|c| c.primary_subject.chars().count())
    .max()
    .unwrap_or(0)
    .max("SUBJECT".len());

  let mut out = format!("{:>5}  {:<width$}  {:<10}  PARENT\n", "ID", "SUBJECT", "DUE");
  for c in cases {
    let parent = c.parent_id.map(|p| p.to_string()).unwrap_or_else(|| "-".into());
    let _ = writeln!(
      out,
      "{:>5}  {:<width$}  {}  {}",
      c.id, c.primary_subject, c.due_date, parent
    );
  }
  out
}

pub fn follow_ups(follow_ups: &[FollowUp]) -> String {
  if follow_ups.is_empty() {
    return "No follow-ups recorded.".into();
  }
  let mut out = String::new();
  for f in follow_ups {
    let _ = writeln!(out, "{}  {}", f.follow_up_date, f.annotation);
  }
  out
}

pub fn case_report(report: &CaseReport) -> String {
  let d = &report.detail;
  let c = &d.case;
  let name = |entry: &Option<CatalogEntry>, id: CatalogId| match entry {
    Some(e) => e.name.clone(),
    None => format!("#{id} (missing)"),
  };

  let mut out = format!("Case #{}: {}\n", c.id, c.primary_subject);
  if !c.secondary_subject.is_empty() {
    let _ = writeln!(out, "  Secondary: {}", c.secondary_subject);
  }
  let _ = writeln!(out, "  Received:  {}", c.received_date);
  let _ = writeln!(out, "  Due:       {}", c.due_date);
  let _ = writeln!(out, "  Type:      {}", name(&d.case_type, c.case_type_id));
  let _ = writeln!(out, "  Country:   {}", name(&d.country, c.country_id));
  let _ = writeln!(out, "  Status:    {}", name(&d.status, c.status_id));
  if !c.notes.is_empty() {
    let _ = writeln!(out, "  Notes:     {}", c.notes);
  }
  if let Some(parent) = &d.parent {
    let _ = writeln!(out, "  Parent:    #{} {}", parent.id, parent.primary_subject);
  }
  if !d.children.is_empty() {
    out.push_str("\nSub-cases:\n");
    for child in &d.children {
      let _ = writeln!(out, "  #{} {} (due {})", child.id, child.primary_subject, child.due_date);
    }
  }
  out.push_str("\nFollow-ups:\n");
  for line in follow_ups(&report.follow_ups).lines() {
    let _ = writeln!(out, "  {line}");
  }
  out
}
