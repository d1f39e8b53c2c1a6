//! Export and import of a user's whole history as a single JSON file.

use crate::profile::{LifeEvent, ProfileError, UserProfile};
use crate::ranking::{RankingError, Rankings};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Errors from export/import operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid ranking: {0}")]
    InvalidRanking(#[from] RankingError),

    #[error("Invalid profile: {0}")]
    InvalidProfile(#[from] ProfileError),

    #[error("Ranking stored under {key} belongs to {console_id}")]
    MismatchedKey { key: String, console_id: String },
}

/// Everything needed to restore a user's history elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    #[serde(default)]
    pub user_profile: UserProfile,
    #[serde(default)]
    pub rankings: Rankings,
    /// Duplicated from the profile for files written by older versions,
    /// which kept events only at the top level.
    #[serde(default)]
    pub life_events: Vec<LifeEvent>,
    #[serde(default)]
    pub export_date: Option<DateTime<Utc>>,
}

impl ExportBundle {
    /// Snapshot the given state, stamped with the current time.
    pub fn new(user_profile: UserProfile, rankings: Rankings) -> Self {
        let life_events = user_profile.life_events.clone();
        Self {
            user_profile,
            rankings,
            life_events,
            export_date: Some(Utc::now()),
        }
    }

    /// Profile to restore, events sorted by age. Top-level events take
    /// precedence when present.
    pub fn profile(&self) -> UserProfile {
        let mut profile = self.user_profile.clone();
        if !self.life_events.is_empty() {
            profile.life_events = self.life_events.clone();
        }
        profile.sort_life_events();
        profile
    }

    /// Check the profile that would be restored, then every ranking's
    /// invariants and that it sits under its own key.
    pub fn validate(&self) -> Result<(), PersistError> {
        self.profile().validate()?;
        for (key, ranking) in &self.rankings {
            if key != &ranking.console_id {
                return Err(PersistError::MismatchedKey {
                    key: key.clone(),
                    console_id: ranking.console_id.clone(),
                });
            }
            ranking.validate()?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a bundle. Missing sections take their defaults.
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let bundle: Self = serde_json::from_str(json)?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Save to a JSON file.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let content = self.to_json()?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Load from a JSON file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let content = fs::read_to_string(path).await?;
        Self::from_json(&content)
    }
}

/// File name for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("game-history_{}.json", date.format("%Y-%m-%d"))
}

/// Path for today's export inside `base_dir`.
pub fn export_path(base_dir: impl AsRef<Path>) -> PathBuf {
    base_dir
        .as_ref()
        .join(export_file_name(Utc::now().date_naive()))
}
