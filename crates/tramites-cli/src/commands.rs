//! Command handlers. Each one performs its reads and writes through the
//! repositories and hands the result to [`Output`].

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tramites_core::{
  case::{CaseDetail, NewCase},
  catalog::{CatalogKind, Selection},
  due_date::{self as calculator, parse_date},
  follow_up::FollowUp,
  repo::{CaseRepository, CatalogStore, FollowUpRepository},
  store::RecordStore,
};

use crate::{
  cli::{CaseCommand, CatalogCommand, Command, CreateCase, FollowUpCommand},
  render::{self, Output},
};

/// A case with its follow-up history, as shown by `case show`.
#[derive(Debug, Serialize)]
pub struct CaseReport {
  #[serde(flatten)]
  pub detail:     CaseDetail,
  pub follow_ups: Vec<FollowUp>,
}

#[derive(Debug, Serialize)]
struct DueDateReport {
  received: NaiveDate,
  due:      NaiveDate,
}

/// `due-date <date>`
pub fn due_date(input: &str, output: &Output) -> anyhow::Result<()> {
  let received = parse_date(input)?;
  let due = calculator::due_date(received)?;
  output.emit(&DueDateReport { received, due }, || format!("{due}"))?;
  Ok(())
}

/// Run a store-backed command against `store`.
pub async fn run<S>(store: S, command: Command, output: &Output) -> anyhow::Result<()>
where
  S: RecordStore + Clone,
{
  match command {
    Command::Catalog { action } => catalog(CatalogStore::new(store), action, output).await,
    Command::Case { action } => case(store, action, output).await,
    Command::FollowUp { action } => follow_up(FollowUpRepository::new(store), action, output).await,
    Command::DueDate { date } => due_date(&date, output),
  }
}

async fn catalog<S: RecordStore>(
  catalogs: CatalogStore<S>,
  action: CatalogCommand,
  output: &Output,
) -> anyhow::Result<()> {
  match action {
    CatalogCommand::List { kind } => {
      let entries = catalogs.list_all(kind).await?;
      output.emit(&entries, || render::catalog(kind, &entries))?;
    }
    CatalogCommand::Add { kind, name } => {
      let entry = catalogs.append(kind, &name).await?;
      output.emit(&entry, || format!("Added {kind} #{}: {}", entry.id, entry.name))?;
    }
  }
  Ok(())
}

async fn case<S>(store: S, action: CaseCommand, output: &Output) -> anyhow::Result<()>
where
  S: RecordStore + Clone,
{
  let cases = CaseRepository::new(store.clone());
  match action {
    CaseCommand::List => {
      let all = cases.list_all().await?;
      output.emit(&all, || render::case_table(&all))?;
    }
    CaseCommand::Create(args) => {
      let input = resolve_new_case(&CatalogStore::new(store), args).await?;
      let created = cases.create(input).await?;
      output.emit(&created, || {
        format!("Case #{} saved. Due on {}", created.id, created.due_date)
      })?;
    }
    CaseCommand::Show { id } => {
      let detail = cases
        .detail(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("case {id} not found"))?;
      let follow_ups = FollowUpRepository::new(store).list_by_case(id).await?;
      let report = CaseReport { detail, follow_ups };
      output.emit(&report, || render::case_report(&report))?;
    }
  }
  Ok(())
}

/// Turn the form arguments into a [`NewCase`], resolving each catalog
/// selection against a fresh snapshot.
async fn resolve_new_case<S: RecordStore>(
  catalogs: &CatalogStore<S>,
  args: CreateCase,
) -> anyhow::Result<NewCase> {
  let snapshot = catalogs.snapshot_all().await?;
  let pick = |kind: CatalogKind, text: &str| {
    snapshot
      .get(kind)
      .resolve(&Selection::parse(text))
      .map(|entry| entry.id)
  };

  Ok(NewCase {
    primary_subject:   args.subject,
    secondary_subject: args.secondary,
    received_date:     args.received.unwrap_or_else(today),
    case_type_id:      pick(CatalogKind::CaseType, &args.case_type)?,
    country_id:        pick(CatalogKind::Country, &args.country)?,
    status_id:         pick(CatalogKind::Status, &args.status)?,
    notes:             args.notes,
    parent_id:         args.parent,
  })
}

async fn follow_up<S: RecordStore>(
  follow_ups: FollowUpRepository<S>,
  action: FollowUpCommand,
  output: &Output,
) -> anyhow::Result<()> {
  match action {
    FollowUpCommand::List { case_id } => {
      let listed = follow_ups.list_by_case(case_id).await?;
      output.emit(&listed, || render::follow_ups(&listed))?;
    }
    FollowUpCommand::Add { case_id, date, note } => {
      let created = follow_ups
        .append(case_id, date.unwrap_or_else(today), &note)
        .await?;
      output.emit(&created, || {
        format!("Follow-up #{} added to case #{case_id}", created.id)
      })?;
    }
  }
  Ok(())
}

fn today() -> NaiveDate { Local::now().date_naive() }
