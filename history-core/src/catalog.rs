//! Reference catalog of notable games per console.
//!
//! The catalog is generated offline from a spreadsheet export and shipped as
//! JSON shaped `{ "<console id>": [ { title, year, genre, description } ] }`.
//! It is read-only for the lifetime of the process and shared behind an `Arc`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;
use tokio::fs;

/// Genre recorded when the source row has none.
pub const UNKNOWN_GENRE: &str = "UNKNOWN";

static BUNDLED_CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::from_json(include_str!("../data/catalog.json")).unwrap_or_else(|e| {
        tracing::error!("bundled catalog is malformed: {e}");
        Catalog::default()
    })
});

/// Errors from loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single reference game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    /// Release year. Zero when the source row had no parseable year.
    pub year: i32,
    #[serde(default = "unknown_genre")]
    pub genre: String,
    /// Short blurb; empty when the source row had none.
    #[serde(default)]
    pub description: String,
}

fn unknown_genre() -> String {
    UNKNOWN_GENRE.to_string()
}

impl CatalogEntry {
    pub fn new(title: impl Into<String>, year: i32, genre: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year,
            genre: genre.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The description, if the entry has one.
    pub fn description(&self) -> Option<&str> {
        if self.description.trim().is_empty() {
            None
        } else {
            Some(&self.description)
        }
    }

    /// Whether the build step recorded a release year.
    pub fn has_year(&self) -> bool {
        self.year != 0
    }
}

/// Mapping from console id to that console's games, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    consoles: BTreeMap<String, Vec<CatalogEntry>>,
}

impl Catalog {
    /// The catalog compiled into this crate.
    pub fn bundled() -> &'static Catalog {
        &BUNDLED_CATALOG
    }

    /// Parse a catalog from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a catalog from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let catalog = Self::from_json(&content)?;
        tracing::info!(
            "loaded catalog from {}: {} games across {} consoles",
            path.display(),
            catalog.len(),
            catalog.consoles.len()
        );
        Ok(catalog)
    }

    /// Add (or replace) the games for a console.
    pub fn with_console(mut self, console_id: impl Into<String>, games: Vec<CatalogEntry>) -> Self {
        self.consoles.insert(console_id.into(), games);
        self
    }

    /// Games for a console in catalog order. Unknown consoles yield an empty slice.
    pub fn games(&self, console_id: &str) -> &[CatalogEntry] {
        self.consoles
            .get(console_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the catalog has a list for this console.
    pub fn has_console(&self, console_id: &str) -> bool {
        self.consoles.contains_key(console_id)
    }

    /// Console ids present in the catalog.
    pub fn consoles(&self) -> impl Iterator<Item = &str> {
        self.consoles.keys().map(String::as_str)
    }

    /// Every entry with its console id.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.consoles
            .iter()
            .flat_map(|(id, games)| games.iter().map(move |g| (id.as_str(), g)))
    }

    /// Total number of games.
    pub fn len(&self) -> usize {
        self.consoles.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Games of a console whose title contains `term`, ignoring case.
    ///
    /// An empty term lists every game of the console.
    pub fn search<'a>(&'a self, console_id: &str, term: &str) -> Vec<&'a CatalogEntry> {
        let term = term.to_lowercase();
        self.games(console_id)
            .iter()
            .filter(|g| g.title.to_lowercase().contains(&term))
            .collect()
    }

    /// Resolve a free-text title against this catalog.
    ///
    /// See [`crate::resolve::resolve_title`].
    pub fn resolve(&self, console_id: &str, title: &str) -> Option<&CatalogEntry> {
        crate::resolve::resolve_title(self, console_id, title)
    }
}
