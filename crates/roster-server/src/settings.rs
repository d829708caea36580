//! Server configuration: an optional TOML file overlaid by `ROSTER_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  /// SQLite database file; a leading `~/` is expanded to `$HOME`.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "0.0.0.0".to_owned() }

fn default_port() -> u16 { 8000 }

fn default_store_path() -> PathBuf { PathBuf::from("roster.db") }

/// Read `path` (if it exists) and the environment into a [`ServerConfig`].
pub fn load(path: &Path) -> anyhow::Result<ServerConfig> {
  resolve(
    Config::builder()
      .add_source(File::from(path).required(false))
      .add_source(Environment::with_prefix("ROSTER")),
  )
}

fn resolve(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<ServerConfig> {
  builder
    .build()
    .context("failed to read config file")?
    .try_deserialize()
    .context("failed to deserialise ServerConfig")
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
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
  use config::FileFormat;

  use super::*;

  #[test]
  fn empty_sources_use_defaults() {
    let cfg = resolve(Config::builder()).unwrap();
    assert_eq!(cfg, ServerConfig {
      host:       "0.0.0.0".into(),
      port:       8000,
      store_path: PathBuf::from("roster.db"),
    });
  }

  #[test]
  fn toml_overrides_defaults() {
    let toml = "port = 9001\nstore_path = \"/var/lib/roster/contacts.db\"\n";
    let cfg =
      resolve(Config::builder().add_source(File::from_str(toml, FileFormat::Toml))).unwrap();
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.port, 9001);
    assert_eq!(cfg.store_path, PathBuf::from("/var/lib/roster/contacts.db"));
  }

  #[test]
  fn bad_port_is_an_error() {
    let toml = "port = \"eighty\"\n";
    let res = resolve(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)));
    assert!(res.is_err());
  }

  #[test]
  fn missing_file_is_not_an_error() {
    assert!(load(Path::new("/nonexistent/roster/config.toml")).is_ok());
  }

  #[test]
  fn tilde_paths_expand_only_at_the_front() {
    assert_eq!(expand_tilde(Path::new("/abs/roster.db")), PathBuf::from("/abs/roster.db"));
    assert_eq!(expand_tilde(Path::new("a/~/b")), PathBuf::from("a/~/b"));
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(
        expand_tilde(Path::new("~/roster.db")),
        PathBuf::from(home).join("roster.db")
      );
    }
  }
}
