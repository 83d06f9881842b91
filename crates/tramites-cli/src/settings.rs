//! Runtime configuration: an optional TOML file overlaid by `TRAMITES_*`
//! environment variables.

use std::{
  collections::HashMap,
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::{Context as _, bail};
use serde::Deserialize;
use tramites_store_rest::RestConfig;

/// Which [`RecordStore`](tramites_core::store::RecordStore) backs the
/// register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  /// The hosted table API.
  #[default]
  Rest,
  /// A local SQLite file.
  Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  #[serde(default)]
  pub backend:      Backend,
  /// Service location of the hosted API.
  pub supabase_url: Option<String>,
  /// Access key of the hosted API.
  pub supabase_key: Option<String>,
  #[serde(default = "default_database")]
  pub database:     PathBuf,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_database() -> PathBuf { PathBuf::from("tramites.db") }

fn default_timeout_secs() -> u64 { 30 }

impl Settings {
  /// Read `path` (if it exists) and the process environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> { Self::load_with_env(path, None) }

  /// Like [`Settings::load`], with the environment replaced by `env` when
  /// given.
  pub fn load_with_env(
    path: &Path,
    env: Option<HashMap<String, String>>,
  ) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("TRAMITES")
          .try_parsing(true)
          .source(env),
      )
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  /// The hosted-API connection settings. Both secrets are required.
  pub fn rest_config(&self) -> anyhow::Result<RestConfig> {
    let base_url = match self.supabase_url.as_deref().map(str::trim) {
      Some(url) if !url.is_empty() => url.to_owned(),
      _ => bail!("supabase_url is not configured (set TRAMITES_SUPABASE_URL)"),
    };
    let api_key = match self.supabase_key.as_deref().map(str::trim) {
      Some(key) if !key.is_empty() => key.to_owned(),
      _ => bail!("supabase_key is not configured (set TRAMITES_SUPABASE_KEY)"),
    };
    Ok(RestConfig {
      base_url,
      api_key,
      timeout: Duration::from_secs(self.timeout_secs),
    })
  }

  /// SQLite path with a leading `~` expanded.
  pub fn database_path(&self) -> PathBuf { expand_tilde(&self.database) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
    Some(
      pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
    )
  }

  fn no_file() -> PathBuf { PathBuf::from("does-not-exist/tramites.toml") }

  #[test]
  fn defaults_without_file_or_env() {
    let s = Settings::load_with_env(&no_file(), env(&[])).unwrap();
    assert_eq!(s.backend, Backend::Rest);
    assert_eq!(s.database, PathBuf::from("tramites.db"));
    assert_eq!(s.timeout_secs, 30);
  }

  #[test]
  fn environment_supplies_secrets() {
    let s = Settings::load_with_env(
      &no_file(),
      env(&[
        ("TRAMITES_SUPABASE_URL", "https://demo.supabase.co"),
        ("TRAMITES_SUPABASE_KEY", "anon-key"),
        ("TRAMITES_TIMEOUT_SECS", "5"),
      ]),
    )
    .unwrap();

    let rest = s.rest_config().unwrap();
    assert_eq!(rest.base_url, "https://demo.supabase.co");
    assert_eq!(rest.api_key, "anon-key");
    assert_eq!(rest.timeout, Duration::from_secs(5));
  }

  #[test]
  fn missing_secrets_are_fatal() {
    let s = Settings::load_with_env(
      &no_file(),
      env(&[("TRAMITES_SUPABASE_URL", "https://demo.supabase.co")]),
    )
    .unwrap();
    let err = s.rest_config().unwrap_err();
    assert!(err.to_string().contains("supabase_key"));
  }

  #[test]
  fn file_is_overridden_by_environment() {
    let dir = std::env::temp_dir().join(format!("tramites-settings-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("tramites.toml");
    std::fs::write(
      &path,
      "backend = \"sqlite\"\ndatabase = \"casos.db\"\nsupabase_url = \"https://file\"\n",
    )
    .unwrap();

    let s = Settings::load_with_env(
      &path,
      env(&[("TRAMITES_SUPABASE_URL", "https://env")]),
    )
    .unwrap();
    assert_eq!(s.backend, Backend::Sqlite);
    assert_eq!(s.database, PathBuf::from("casos.db"));
    assert_eq!(s.supabase_url.as_deref(), Some("https://env"));

    let _ = std::fs::remove_dir_all(&dir);
  }
}
