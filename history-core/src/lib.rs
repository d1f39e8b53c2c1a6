//! Game history engine.
//!
//! This crate provides:
//! - A read-only reference catalog of notable games per console
//! - Fuzzy matching of user-entered titles against that catalog
//! - Per-console top-10 rankings and a year-grouped timeline built from them
//! - A life chronicle merging the timeline with the user's own life events
//! - A title quiz drawn from catalog descriptions
//! - Document-store persistence and JSON export/import
//!
//! # Quick Start
//!
//! ```ignore
//! use history_core::{Catalog, FileStore, HistoryService};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Arc::new(Catalog::bundled().clone());
//!     let store = Arc::new(FileStore::new("history-data"));
//!     let mut history = HistoryService::open(catalog, store, "local").await?;
//!
//!     history.edit_ranking("SFC").set_title(1, "クロノ・トリガー")?;
//!     history.save_ranking("SFC").await?;
//!
//!     for group in history.timeline().groups() {
//!         println!("{}: {} games", group.label, group.entries.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod chronicle;
pub mod console;
pub mod persist;
pub mod profile;
pub mod quiz;
pub mod ranking;
pub mod resolve;
pub mod service;
pub mod store;
pub mod testing;
pub mod timeline;

// Primary public API
pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use chronicle::{compose_chronicle, Chronicle, ChronicleRow};
pub use console::Console;
pub use persist::{ExportBundle, PersistError};
pub use profile::{AgeGroup, LifeEvent, ProfileError, UserProfile};
pub use quiz::{Quiz, QuizResult};
pub use ranking::{RankedGame, Ranking, RankingError, Rankings};
pub use resolve::{normalize_title, resolve_title};
pub use service::{HistoryService, ServiceError};
pub use store::{DocumentPath, DocumentStore, FileStore, MemoryStore, StoreError};
pub use timeline::{build_timeline, Timeline, TimelineEntry, YearGroup, YearLabel};
