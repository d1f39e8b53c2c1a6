//! Command-line and environment configuration.

use clap::Parser;
use history_core::{Catalog, CatalogError, FileStore, HistoryService, ServiceError};
use std::path::PathBuf;
use std::sync::Arc;

/// File the TUI writes its logs to, inside the data directory.
pub const LOG_FILE_NAME: &str = "history.log";

#[derive(Parser, Debug, Clone)]
#[command(name = "history", author, version)]
#[command(about = "Rank your favourite games per console and see them on a life timeline", long_about = None)]
pub struct Args {
    /// Run in headless mode (line-oriented, no TUI)
    #[arg(long)]
    pub headless: bool,

    /// Directory holding saved rankings and profiles
    #[arg(long, env = "HISTORY_DATA_DIR", default_value = "history-data")]
    pub data_dir: PathBuf,

    /// User whose history is opened
    #[arg(long, env = "HISTORY_USER", default_value = "local")]
    pub user: String,

    /// Catalog JSON file to use instead of the bundled catalog
    #[arg(long, env = "HISTORY_CATALOG")]
    pub catalog: Option<PathBuf>,
}

impl Args {
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }

    /// The catalog named on the command line, or the bundled one.
    pub async fn load_catalog(&self) -> Result<Arc<Catalog>, CatalogError> {
        match &self.catalog {
            Some(path) => Ok(Arc::new(Catalog::load(path).await?)),
            None => Ok(Arc::new(Catalog::bundled().clone())),
        }
    }

    /// Open the configured user's history from the data directory.
    pub async fn open_history(&self, catalog: Arc<Catalog>) -> Result<HistoryService, ServiceError> {
        let store = Arc::new(FileStore::new(&self.data_dir));
        HistoryService::open(catalog, store, self.user.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::try_parse_from([
            "history",
            "--headless",
            "--data-dir",
            "/tmp/h",
            "--user",
            "alice",
            "--catalog",
            "games.json",
        ])
        .unwrap();
        assert!(args.headless);
        assert_eq!(args.data_dir, PathBuf::from("/tmp/h"));
        assert_eq!(args.user, "alice");
        assert_eq!(args.catalog, Some(PathBuf::from("games.json")));
        assert_eq!(args.log_file(), PathBuf::from("/tmp/h/history.log"));
    }

    #[tokio::test]
    async fn test_bundled_catalog_without_flag() {
        let args = Args::try_parse_from(["history", "--user", "bob"]).unwrap();
        let catalog = Args {
            catalog: None,
            ..args
        }
        .load_catalog()
        .await
        .unwrap();
        assert_eq!(catalog.len(), Catalog::bundled().len());
    }
}
