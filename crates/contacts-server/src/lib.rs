//! HTTP front end for the contacts service.
//!
//! Assembles the top-level axum [`Router`] (root redirect, `/api` nest, HTTP
//! tracing) and the runtime configuration read from `conf.json`.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, response::Redirect, routing::get};
use config::{ConfigError, FileFormat};
use contacts_core::store::ContactStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Which [`ContactStore`] backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
  /// Relational store in a SQLite file named by `dbname`.
  Sqlite,
  /// Process-local list; nothing survives a restart.
  Memory,
}

/// Runtime server configuration, deserialised from `conf.json`.
///
/// `host`, `port`, `user` and `password` describe a networked database. They
/// are accepted so existing config files keep loading, but the SQLite
/// dialect does not use them.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub dialect:  Dialect,
  #[serde(default)]
  pub host:     String,
  #[serde(default)]
  pub port:     u16,
  #[serde(default)]
  pub dbname:   String,
  #[serde(default)]
  pub user:     String,
  #[serde(default)]
  pub password: String,
  /// Address the HTTP server binds to.
  #[serde(default = "default_listen")]
  pub listen:   String,
}

fn default_listen() -> String { "0.0.0.0:8000".to_string() }

impl ServerConfig {
  /// Read the JSON file at `path`, overlaid with `CONTACTS_*` environment
  /// variables. A missing file is an error.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::from_source(config::File::from(path).format(FileFormat::Json))
  }

  fn from_source<T>(source: T) -> Result<Self, ConfigError>
  where
    T: config::Source + Send + Sync + 'static,
  {
    config::Config::builder()
      .add_source(source)
      .add_source(config::Environment::with_prefix("CONTACTS"))
      .build()?
      .try_deserialize()
  }

  /// The SQLite database path, with a leading `~` expanded.
  pub fn database_path(&self) -> PathBuf { expand_tilde(Path::new(&self.dbname)) }

  /// Names of the networked-database fields that are set but unused.
  pub fn ignored_fields(&self) -> Vec<&'static str> {
    let mut ignored = Vec::new();
    if !self.host.is_empty() {
      ignored.push("host");
    }
    if self.port != 0 {
      ignored.push("port");
    }
    if !self.user.is_empty() {
      ignored.push("user");
    }
    if !self.password.is_empty() {
      ignored.push("password");
    }
    ignored
  }
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

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `store`.
///
/// Unmatched paths fall through to axum's default 404.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: ContactStore + 'static,
{
  Router::new()
    .route("/", get(index))
    .nest("/api", contacts_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

/// `GET /` — permanent redirect to the contact listing.
async fn index() -> Redirect { Redirect::permanent("/api/contacts") }

// ─── Integration tests ────────────────────────────────────────────────────────
