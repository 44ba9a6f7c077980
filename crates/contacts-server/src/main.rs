//! contacts-server binary.
//!
//! Reads `conf.json` (or the path given with `--config`), opens the store
//! named by `dialect`, and serves the contacts JSON API over HTTP.
//!
//! ```text
//! cargo run -p contacts-server -- --config conf.json
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use contacts_core::store::ContactStore;
use contacts_server::{Dialect, ServerConfig};
use contacts_store_memory::MemoryStore;
use contacts_store_sqlite::{SchemaInit, SqliteStore};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Contacts CRUD server")]
struct Cli {
  /// Path to the JSON configuration file.
  #[arg(short, long, default_value = "conf.json")]
  config: PathBuf,

  /// Drop and recreate the database tables on startup. Destroys all data.
  #[arg(long)]
  reset_schema: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  match cfg.dialect {
    Dialect::Sqlite => {
      anyhow::ensure!(
        !cfg.dbname.is_empty(),
        "`dbname` is required for the sqlite dialect"
      );
      let ignored = cfg.ignored_fields();
      if !ignored.is_empty() {
        tracing::warn!(?ignored, "config fields unused by the sqlite dialect");
      }

      let init = if cli.reset_schema {
        SchemaInit::Reset
      } else {
        SchemaInit::Preserve
      };
      let path = cfg.database_path();
      let store = SqliteStore::open(&path, init)
        .await
        .with_context(|| format!("failed to open store at {path:?}"))?;
      store.ping().await.context("database did not answer ping")?;

      tracing::info!(?path, "opened sqlite store");
      serve(store, &cfg.listen).await
    }
    Dialect::Memory => {
      if cli.reset_schema {
        tracing::warn!("--reset-schema has no effect on the memory dialect");
      }
      tracing::info!("using in-memory store; contacts will not persist");
      serve(MemoryStore::new(), &cfg.listen).await
    }
  }
}

async fn serve<S>(store: S, address: &str) -> anyhow::Result<()>
where
  S: ContactStore + 'static,
{
  let app = contacts_server::router(Arc::new(store));

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
