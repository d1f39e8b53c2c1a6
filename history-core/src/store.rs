//! Document store abstraction for user data.
//!
//! Rankings and the profile are stored as JSON documents addressed by
//! collection and id, e.g. `users/<uid>/rankings/SFC` and
//! `users/<uid>/profile/settings`. Writes replace the whole document; the last
//! write wins.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::sync::RwLock;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid document path segment: {0:?}")]
    InvalidSegment(String),
}

/// Address of a single document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    collection: String,
    id: String,
}

impl DocumentPath {
    /// Build a path, rejecting empty segments and anything that could escape
    /// a directory when used as a file name.
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Result<Self, StoreError> {
        let collection = collection.into();
        let id = id.into();
        for segment in collection.split('/').chain(std::iter::once(id.as_str())) {
            validate_segment(segment)?;
        }
        Ok(Self { collection, id })
    }

    /// `users/<uid>/rankings/<console id>`
    pub fn ranking(user_id: &str, console_id: &str) -> Result<Self, StoreError> {
        validate_segment(user_id)?;
        Self::new(rankings_collection(user_id), console_id)
    }

    /// `users/<uid>/profile/settings`
    pub fn profile(user_id: &str) -> Result<Self, StoreError> {
        validate_segment(user_id)?;
        Self::new(format!("users/{user_id}/profile"), "settings")
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// Collection holding a user's rankings.
pub fn rankings_collection(user_id: &str) -> String {
    format!("users/{user_id}/rankings")
}

fn validate_segment(segment: &str) -> Result<(), StoreError> {
    let bad = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['\\', '/', '\0']);
    if bad {
        Err(StoreError::InvalidSegment(segment.to_string()))
    } else {
        Ok(())
    }
}

/// Storage backend for user documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a document. Missing documents are `Ok(None)`.
    async fn get(&self, path: &DocumentPath) -> Result<Option<Value>, StoreError>;

    /// Create or overwrite a document.
    async fn set(&self, path: &DocumentPath, document: Value) -> Result<(), StoreError>;

    /// Delete a document, returning whether it existed.
    async fn delete(&self, path: &DocumentPath) -> Result<bool, StoreError>;

    /// All documents of a collection as `(id, document)`, ordered by id.
    /// Documents that are not valid JSON are left out.
    async fn list(&self, collection: &str) -> Result<Vec<(String, Value)>, StoreError>;
}

/// In-process store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(path.collection())
            .and_then(|docs| docs.get(path.id()))
            .cloned())
    }

    async fn set(&self, path: &DocumentPath, document: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(path.collection().to_string())
            .or_default()
            .insert(path.id().to_string(), document);
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(path.collection())
            .and_then(|docs| docs.remove(path.id()))
            .is_some())
    }

    async fn list(&self, collection: &str) -> Result<Vec<(String, Value)>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default())
    }
}

/// Filesystem store: one pretty-printed JSON file per document under `root`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: &str) -> PathBuf {
        collection
            .split('/')
            .fold(self.root.clone(), |dir, segment| dir.join(segment))
    }

    fn document_file(&self, path: &DocumentPath) -> PathBuf {
        self.collection_dir(path.collection())
            .join(format!("{}.json", path.id()))
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Value>, StoreError> {
        let file = self.document_file(path);
        match fs::read_to_string(&file).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, path: &DocumentPath, document: Value) -> Result<(), StoreError> {
        let dir = self.collection_dir(path.collection());
        fs::create_dir_all(&dir).await?;

        let file = self.document_file(path);
        let tmp = file.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&document)?).await?;
        fs::rename(&tmp, &file).await?;
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> Result<bool, StoreError> {
        match fs::remove_file(self.document_file(path)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self, collection: &str) -> Result<Vec<(String, Value)>, StoreError> {
        let dir = self.collection_dir(collection);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().map(|e| e != "json").unwrap_or(true) {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let content = fs::read_to_string(&path).await?;
            match serde_json::from_str(&content) {
                Ok(document) => documents.push((id.to_string(), document)),
                Err(e) => tracing::warn!("skipping unreadable document {}: {e}", path.display()),
            }
        }

        documents.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(documents)
    }
}
