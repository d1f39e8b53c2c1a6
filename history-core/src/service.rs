//! HistoryService - the primary public API for a user's game history.
//!
//! Wraps the reference catalog, a document store and the user's in-memory
//! state (rankings and profile) behind one type. Derived views such as the
//! timeline are recomputed on every call.

use crate::catalog::{Catalog, CatalogEntry};
use crate::chronicle::{compose_chronicle, Chronicle};
use crate::persist::{ExportBundle, PersistError};
use crate::profile::{LifeEvent, ProfileError, UserProfile};
use crate::ranking::{Ranking, RankingError, Rankings};
use crate::store::{rankings_collection, DocumentPath, DocumentStore, StoreError};
use crate::timeline::{build_timeline, Timeline};
use std::sync::Arc;
use thiserror::Error;

/// Errors from HistoryService operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Ranking error: {0}")]
    Ranking(#[from] RankingError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Import error: {0}")]
    Persist(#[from] PersistError),

    #[error("No ranking for console {0}")]
    NoRanking(String),
}

/// A user's game history backed by a document store.
pub struct HistoryService {
    catalog: Arc<Catalog>,
    store: Arc<dyn DocumentStore>,
    user_id: String,
    rankings: Rankings,
    profile: UserProfile,
}

impl HistoryService {
    /// Create a service with empty state. Call [`HistoryService::load`] to
    /// read what the store already holds.
    pub fn new(
        catalog: Arc<Catalog>,
        store: Arc<dyn DocumentStore>,
        user_id: impl Into<String>,
    ) -> Result<Self, ServiceError> {
        let user_id = user_id.into();
        // Fails early on user ids that cannot form a document path.
        DocumentPath::profile(&user_id)?;
        Ok(Self {
            catalog,
            store,
            user_id,
            rankings: Rankings::new(),
            profile: UserProfile::default(),
        })
    }

    /// Create a service and load the user's stored data.
    pub async fn open(
        catalog: Arc<Catalog>,
        store: Arc<dyn DocumentStore>,
        user_id: impl Into<String>,
    ) -> Result<Self, ServiceError> {
        let mut service = Self::new(catalog, store, user_id)?;
        service.load().await?;
        Ok(service)
    }

    /// Replace in-memory state with the stored rankings and profile.
    ///
    /// Unusable ranking documents are skipped with a warning, including one
    /// stored under another console's id. A missing or unusable profile
    /// means defaults.
    pub async fn load(&mut self) -> Result<(), ServiceError> {
        let documents = self.store.list(&rankings_collection(&self.user_id)).await?;

        let mut rankings = Rankings::new();
        for (id, document) in documents {
            let ranking: Ranking = match serde_json::from_value(document) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!("skipping unreadable ranking {id} for {}: {e}", self.user_id);
                    continue;
                }
            };
            if ranking.console_id != id {
                tracing::warn!(
                    "skipping ranking {id} for {}: it belongs to {}",
                    self.user_id,
                    ranking.console_id
                );
                continue;
            }
            if let Err(e) = ranking.validate() {
                tracing::warn!("skipping invalid ranking {id} for {}: {e}", self.user_id);
                continue;
            }
            rankings.insert(id, ranking);
        }

        let profile = self.load_profile().await?;

        tracing::debug!(
            "loaded {} rankings for {}",
            rankings.len(),
            self.user_id
        );
        self.rankings = rankings;
        self.profile = profile;
        Ok(())
    }

    /// The stored profile, or defaults when it is missing or unusable.
    async fn load_profile(&self) -> Result<UserProfile, ServiceError> {
        let document = match self.store.get(&DocumentPath::profile(&self.user_id)?).await {
            Ok(Some(document)) => document,
            Ok(None) => return Ok(UserProfile::default()),
            Err(StoreError::Json(e)) => {
                tracing::warn!("unreadable profile for {}, using defaults: {e}", self.user_id);
                return Ok(UserProfile::default());
            }
            Err(e) => return Err(e.into()),
        };

        let mut profile: UserProfile = match serde_json::from_value(document) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("unreadable profile for {}, using defaults: {e}", self.user_id);
                return Ok(UserProfile::default());
            }
        };
        if let Err(e) = profile.validate() {
            tracing::warn!("invalid profile for {}, using defaults: {e}", self.user_id);
            return Ok(UserProfile::default());
        }
        profile.sort_life_events();
        Ok(profile)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rankings(&self) -> &Rankings {
        &self.rankings
    }

    pub fn ranking(&self, console_id: &str) -> Option<&Ranking> {
        self.rankings.get(console_id)
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Ranking to edit, created empty if the user has none for this console.
    ///
    /// Edits stay in memory until [`HistoryService::save_ranking`].
    pub fn edit_ranking(&mut self, console_id: &str) -> &mut Ranking {
        self.rankings
            .entry(console_id.to_string())
            .or_insert_with(|| Ranking::new(console_id))
    }

    /// Write one ranking to the store.
    pub async fn save_ranking(&self, console_id: &str) -> Result<(), ServiceError> {
        let ranking = self
            .rankings
            .get(console_id)
            .ok_or_else(|| ServiceError::NoRanking(console_id.to_string()))?;
        ranking.validate()?;

        let path = DocumentPath::ranking(&self.user_id, console_id)?;
        self.store.set(&path, serde_json::to_value(ranking)?).await?;
        tracing::info!("saved {path}");
        Ok(())
    }

    /// Remove a ranking locally and from the store.
    pub async fn delete_ranking(&mut self, console_id: &str) -> Result<bool, ServiceError> {
        let existed = self.rankings.remove(console_id).is_some();
        let path = DocumentPath::ranking(&self.user_id, console_id)?;
        let stored = self.store.delete(&path).await?;
        tracing::info!("deleted {path}");
        Ok(existed || stored)
    }

    /// Write the profile to the store.
    pub async fn save_profile(&self) -> Result<(), ServiceError> {
        let path = DocumentPath::profile(&self.user_id)?;
        self.store
            .set(&path, serde_json::to_value(&self.profile)?)
            .await?;
        tracing::info!("saved {path}");
        Ok(())
    }

    /// Parse and store a new birth year.
    pub async fn set_birth_year(&mut self, input: &str) -> Result<i32, ServiceError> {
        self.profile.set_birth_year(input)?;
        self.save_profile().await?;
        Ok(self.profile.birth_year)
    }

    /// Record a life event and store the profile.
    pub async fn add_life_event(
        &mut self,
        age: u32,
        event: impl Into<String>,
    ) -> Result<(), ServiceError> {
        let event = LifeEvent::new(age, event)?;
        self.profile.add_life_event(event);
        self.save_profile().await
    }

    /// Remove the life event at `index` and store the profile.
    pub async fn remove_life_event(&mut self, index: usize) -> Result<LifeEvent, ServiceError> {
        let removed = self.profile.remove_life_event(index)?;
        self.save_profile().await?;
        Ok(removed)
    }

    /// Look a title up in the catalog.
    pub fn resolve(&self, console_id: &str, title: &str) -> Option<&CatalogEntry> {
        self.catalog.resolve(console_id, title)
    }

    /// Year-grouped view of the current rankings.
    pub fn timeline(&self) -> Timeline {
        build_timeline(&self.catalog, &self.rankings)
    }

    /// Timeline merged with the profile's life events.
    pub fn chronicle(&self) -> Chronicle {
        compose_chronicle(&self.timeline(), &self.profile)
    }

    /// Snapshot of the user's data for export.
    pub fn export(&self) -> ExportBundle {
        ExportBundle::new(self.profile.clone(), self.rankings.clone())
    }

    /// Replace all user data with an imported bundle and store it.
    ///
    /// Stored rankings absent from the bundle are deleted so the store
    /// matches the bundle afterwards.
    pub async fn import(&mut self, bundle: ExportBundle) -> Result<(), ServiceError> {
        bundle.validate()?;

        let stale: Vec<String> = self
            .store
            .list(&rankings_collection(&self.user_id))
            .await?
            .into_iter()
            .map(|(id, _)| id)
            .filter(|id| !bundle.rankings.contains_key(id))
            .collect();

        self.profile = bundle.profile();
        self.rankings = bundle.rankings;

        self.save_profile().await?;
        for console_id in self.rankings.keys() {
            self.save_ranking(console_id).await?;
        }
        for console_id in stale {
            self.store
                .delete(&DocumentPath::ranking(&self.user_id, &console_id)?)
                .await?;
        }

        tracing::info!(
            "imported {} rankings for {}",
            self.rankings.len(),
            self.user_id
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::testing::sample_catalog;
    use crate::timeline::YearLabel;

    fn service(store: Arc<MemoryStore>) -> HistoryService {
        HistoryService::new(Arc::new(sample_catalog()), store, "tester").unwrap()
    }

    #[test]
    fn test_rejects_bad_user_id() {
        let result = HistoryService::new(
            Arc::new(sample_catalog()),
            Arc::new(MemoryStore::new()),
            "../etc",
        );
        assert!(matches!(result, Err(ServiceError::Store(_))));
    }

    #[tokio::test]
    async fn test_edit_save_reload() {
        let store = Arc::new(MemoryStore::new());
        let mut history = service(store.clone());

        let sfc = history.edit_ranking("SFC");
        sfc.set_title(1, "Chrono Trigger").unwrap();
        history.save_ranking("SFC").await.unwrap();

        let reloaded = HistoryService::open(Arc::new(sample_catalog()), store, "tester")
            .await
            .unwrap();
        assert_eq!(
            reloaded.ranking("SFC").unwrap().games[0].title,
            "Chrono Trigger"
        );
        assert_eq!(
            reloaded.timeline().labels().collect::<Vec<_>>(),
            vec![YearLabel::Year(1995)]
        );
    }

    #[tokio::test]
    async fn test_save_unknown_ranking_fails() {
        let history = service(Arc::new(MemoryStore::new()));
        assert!(matches!(
            history.save_ranking("GB").await,
            Err(ServiceError::NoRanking(_))
        ));
    }

    #[tokio::test]
    async fn test_load_skips_broken_rankings() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                &DocumentPath::ranking("tester", "FC").unwrap(),
                serde_json::json!({}),
            )
            .await
            .unwrap();
        store
            .set(
                &DocumentPath::ranking("tester", "GB").unwrap(),
                serde_json::to_value(Ranking::new("GB")).unwrap(),
            )
            .await
            .unwrap();

        let history = HistoryService::open(Arc::new(sample_catalog()), store, "tester")
            .await
            .unwrap();
        assert!(history.ranking("FC").is_none());
        assert!(history.ranking("GB").is_some());
        assert_eq!(history.profile(), &UserProfile::default());
    }

    #[tokio::test]
    async fn test_load_skips_ranking_under_wrong_key() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                &DocumentPath::ranking("tester", "GB").unwrap(),
                serde_json::to_value(Ranking::new("FC")).unwrap(),
            )
            .await
            .unwrap();

        let history = HistoryService::open(Arc::new(sample_catalog()), store, "tester")
            .await
            .unwrap();
        assert!(history.rankings().is_empty());
    }

    #[tokio::test]
    async fn test_load_falls_back_on_invalid_profile() {
        let store = Arc::new(MemoryStore::new());
        let path = DocumentPath::profile("tester").unwrap();

        store
            .set(
                &path,
                serde_json::json!({
                    "birthYear": 2_147_483_600i64,
                    "lifeEvents": [{"age": 500, "event": ""}]
                }),
            )
            .await
            .unwrap();
        let history = HistoryService::open(Arc::new(sample_catalog()), store.clone(), "tester")
            .await
            .unwrap();
        assert_eq!(history.profile(), &UserProfile::default());
        assert!(history.chronicle().is_empty());

        store
            .set(&path, serde_json::json!({"birthYear": "not a year"}))
            .await
            .unwrap();
        let history = HistoryService::open(Arc::new(sample_catalog()), store.clone(), "tester")
            .await
            .unwrap();
        assert_eq!(history.profile(), &UserProfile::default());

        store
            .set(
                &path,
                serde_json::json!({
                    "birthYear": 1980,
                    "lifeEvents": [{"age": 20, "event": "b"}, {"age": 7, "event": "a"}]
                }),
            )
            .await
            .unwrap();
        let history = HistoryService::open(Arc::new(sample_catalog()), store, "tester")
            .await
            .unwrap();
        let ages: Vec<_> = history.profile().life_events.iter().map(|e| e.age).collect();
        assert_eq!(ages, vec![7, 20]);
    }

    #[tokio::test]
    async fn test_import_rejects_overflowing_profile() {
        let mut history = service(Arc::new(MemoryStore::new()));
        let bundle: ExportBundle = serde_json::from_str(
            r#"{"userProfile":{"birthYear":2147483600},"lifeEvents":[{"age":500,"event":""}]}"#,
        )
        .unwrap();

        assert!(matches!(
            history.import(bundle).await,
            Err(ServiceError::Persist(PersistError::InvalidProfile(_)))
        ));
        assert_eq!(history.profile(), &UserProfile::default());
        assert!(history.chronicle().is_empty());
    }

    #[tokio::test]
    async fn test_delete_ranking() {
        let store = Arc::new(MemoryStore::new());
        let mut history = service(store.clone());
        history.edit_ranking("N64");
        history.save_ranking("N64").await.unwrap();

        assert!(history.delete_ranking("N64").await.unwrap());
        assert!(history.ranking("N64").is_none());
        assert!(store
            .get(&DocumentPath::ranking("tester", "N64").unwrap())
            .await
            .unwrap()
            .is_none());
        assert!(!history.delete_ranking("N64").await.unwrap());
    }

    #[tokio::test]
    async fn test_profile_edits_are_stored() {
        let store = Arc::new(MemoryStore::new());
        let mut history = service(store.clone());

        assert_eq!(history.set_birth_year("1985").await.unwrap(), 1985);
        history.add_life_event(10, "got a Super Famicom").await.unwrap();
        assert!(matches!(
            history.add_life_event(120, "too late").await,
            Err(ServiceError::Profile(ProfileError::AgeOutOfRange(120)))
        ));
        assert!(history.set_birth_year("nineteen").await.is_err());

        let reloaded = HistoryService::open(Arc::new(sample_catalog()), store, "tester")
            .await
            .unwrap();
        assert_eq!(reloaded.profile().birth_year, 1985);
        assert_eq!(reloaded.profile().life_events.len(), 1);

        let chronicle = reloaded.chronicle();
        assert_eq!(chronicle.rows()[0].label, YearLabel::Year(1995));
    }

    #[tokio::test]
    async fn test_import_replaces_stored_rankings() {
        let store = Arc::new(MemoryStore::new());
        let mut history = service(store.clone());
        history.edit_ranking("GB");
        history.save_ranking("GB").await.unwrap();

        let mut fc = Ranking::new("FC");
        fc.set_title(1, "MOTHER").unwrap();
        let bundle = ExportBundle::new(
            UserProfile {
                birth_year: 1979,
                ..UserProfile::default()
            },
            Rankings::from([("FC".to_string(), fc)]),
        );
        history.import(bundle).await.unwrap();

        let reloaded = HistoryService::open(Arc::new(sample_catalog()), store, "tester")
            .await
            .unwrap();
        let ids: Vec<_> = reloaded.rankings().keys().cloned().collect();
        assert_eq!(ids, vec!["FC"]);
        assert_eq!(reloaded.profile().birth_year, 1979);
    }
}
