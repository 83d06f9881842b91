//! `tramites` — command-line front end for the trámites register.
//!
//! # Usage
//!
//! ```text
//! tramites catalog add country "México"
//! tramites case create --subject "Renovación" --case-type Visa --country México --status 1
//! tramites case show 4
//! tramites follow-up add 4 "Llamada al consulado"
//! ```
//!
//! The hosted backend needs `TRAMITES_SUPABASE_URL` and
//! `TRAMITES_SUPABASE_KEY` (or the same keys in the config file).

mod cli;
mod commands;
mod render;
mod settings;

use anyhow::Context as _;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tramites_store_rest::RestStore;
use tramites_store_sqlite::SqliteStore;

use cli::{Cli, Command};
use render::Output;
use settings::{Backend, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  // Logs go to stderr so command output stays pipeable.
  let default_level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .init();

  let output = Output { json: cli.json };

  // The calculator needs no store and no secrets.
  if let Command::DueDate { date } = &cli.command {
    return commands::due_date(date, &output);
  }

  let settings = Settings::load(&cli.config)?;

  match settings.backend {
    Backend::Rest => {
      let config = settings.rest_config()?;
      tracing::debug!(url = %config.base_url, "using hosted backend");
      let store = RestStore::new(config).context("failed to build HTTP client")?;
      commands::run(store, cli.command, &output).await
    }
    Backend::Sqlite => {
      let path = settings.database_path();
      let store = SqliteStore::open(&path)
        .await
        .with_context(|| format!("failed to open store at {path:?}"))?;
      commands::run(store, cli.command, &output).await
    }
  }
}
