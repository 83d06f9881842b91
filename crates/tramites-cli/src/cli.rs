//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tramites_core::{catalog::CatalogKind, due_date::parse_date, id::CaseId};

#[derive(Parser, Debug)]
#[command(name = "tramites", version, about = "Register and follow up administrative cases")]
pub struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "tramites.toml", global = true)]
  pub config: PathBuf,

  /// Log at debug level (overridden by RUST_LOG).
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Print results as JSON.
  #[arg(long, global = true)]
  pub json: bool,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Country, case-type and status lists.
  Catalog {
    #[command(subcommand)]
    action: CatalogCommand,
  },
  /// Case records.
  Case {
    #[command(subcommand)]
    action: CaseCommand,
  },
  /// Follow-up notes on a case.
  FollowUp {
    #[command(subcommand)]
    action: FollowUpCommand,
  },
  /// Print the due date for a received date (YYYY-MM-DD).
  DueDate { date: String },
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
  /// List the entries of a catalog (country, case-type, status).
  List { kind: CatalogKind },
  /// Append an entry to a catalog.
  Add { kind: CatalogKind, name: String },
}

#[derive(Subcommand, Debug)]
pub enum CaseCommand {
  /// List all cases.
  List,
  /// Register a new case.
  Create(CreateCase),
  /// Show a case with its sub-cases and follow-ups.
  Show { id: CaseId },
}

/// Catalog fields accept an id or an entry name. Bare digits must not match
/// one entry by id and another by name; `id:N` or `name:TEXT` settles it.
#[derive(Args, Debug)]
pub struct CreateCase {
  #[arg(long)]
  pub subject:   String,
  #[arg(long, default_value = "")]
  pub secondary: String,
  /// Received date; defaults to today.
  #[arg(long, value_parser = date_arg)]
  pub received:  Option<NaiveDate>,
  #[arg(long, value_name = "[id:|name:]VALUE")]
  pub case_type: String,
  #[arg(long, value_name = "[id:|name:]VALUE")]
  pub country:   String,
  #[arg(long, value_name = "[id:|name:]VALUE")]
  pub status:    String,
  #[arg(long, default_value = "")]
  pub notes:     String,
  /// Make this a sub-case of an existing case.
  #[arg(long, value_name = "CASE_ID")]
  pub parent:    Option<CaseId>,
}

#[derive(Subcommand, Debug)]
pub enum FollowUpCommand {
  /// List a case's follow-ups, oldest first.
  List { case_id: CaseId },
  /// Add a follow-up to a case.
  Add {
    case_id: CaseId,
    /// Follow-up date; defaults to today.
    #[arg(long, value_parser = date_arg)]
    date:    Option<NaiveDate>,
    #[arg(default_value = "")]
    note:    String,
  },
}

fn date_arg(input: &str) -> Result<NaiveDate, String> {
  parse_date(input).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("tramites").chain(args.iter().copied())).unwrap()
  }

  #[test]
  fn command_definition_is_consistent() { Cli::command().debug_assert(); }

  #[test]
  fn parses_catalog_kind() {
    let cli = parse(&["catalog", "add", "case-type", "Visa"]);
    match cli.command {
      Command::Catalog { action: CatalogCommand::Add { kind, name } } => {
        assert_eq!(kind, CatalogKind::CaseType);
        assert_eq!(name, "Visa");
      }
      other => panic!("unexpected command: {other:?}"),
    }
  }

  #[test]
  fn rejects_unknown_catalog_kind() {
    let res = Cli::try_parse_from(["tramites", "catalog", "list", "colour"]);
    assert!(res.is_err());
  }

  #[test]
  fn parses_case_create() {
    let cli = parse(&[
      "case", "create", "--subject", "Renovación", "--received", "2024-05-10",
      "--case-type", "Visa", "--country", "2", "--status", "Abierto", "--parent", "7",
      "--json",
    ]);
    assert!(cli.json);
    let Command::Case { action: CaseCommand::Create(args) } = cli.command else {
      panic!("expected case create");
    };
    assert_eq!(args.received, NaiveDate::from_ymd_opt(2024, 5, 10));
    assert_eq!(args.country, "2");
    assert_eq!(args.parent, Some(CaseId(7)));
    assert_eq!(args.secondary, "");
  }

  #[test]
  fn rejects_malformed_dates() {
    let res = Cli::try_parse_from([
      "tramites", "follow-up", "add", "3", "--date", "10/05/2024", "nota",
    ]);
    assert!(res.is_err());
  }

  #[test]
  fn follow_up_note_may_be_omitted() {
    let cli = parse(&["follow-up", "add", "3"]);
    let Command::FollowUp { action: FollowUpCommand::Add { case_id, date, note } } = cli.command
    else {
      panic!("expected follow-up add");
    };
    assert_eq!(case_id, CaseId(3));
    assert!(date.is_none());
    assert!(note.is_empty());
  }

  #[test]
  fn config_path_is_accepted_after_the_subcommand() {
    let cli = parse(&["case", "list", "--config", "otro.toml"]);
    assert_eq!(cli.config, PathBuf::from("otro.toml"));
    assert!(matches!(cli.command, Command::Case { action: CaseCommand::List }));

    let cli = parse(&["due-date", "2024-05-10"]);
    assert_eq!(cli.config, PathBuf::from("tramites.toml"));
  }
}
