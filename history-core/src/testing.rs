//! Testing utilities.
//!
//! Fixture builders shared by unit and integration tests:
//! - `sample_catalog` for a small, fixed reference catalog
//! - `RankingBuilder` for terse ranking setup
//! - `memory_service` for a service backed by an in-memory store

use crate::catalog::{Catalog, CatalogEntry};
use crate::ranking::{Ranking, Rankings};
use crate::service::HistoryService;
use crate::store::MemoryStore;
use std::sync::Arc;

/// A small catalog with stable contents, independent of the bundled data.
pub fn sample_catalog() -> Catalog {
    Catalog::default()
        .with_console(
            "FC",
            vec![
                CatalogEntry::new("Super Mario Bros.", 1985, "ACT")
                    .with_description("Run right, stomp goombas, save the princess."),
                CatalogEntry::new("Dragon Quest III", 1988, "RPG")
                    .with_description("The hero sets out to defeat the archfiend Baramos."),
                CatalogEntry::new("MOTHER", 1989, "RPG"),
            ],
        )
        .with_console(
            "SFC",
            vec![
                CatalogEntry::new("Super Mario World", 1990, "ACT"),
                CatalogEntry::new("Chrono Trigger", 1995, "RPG")
                    .with_description("A time-travelling party tries to stop Lavos."),
                CatalogEntry::new("F-ZERO", 1990, "RAC"),
            ],
        )
        .with_console("GB", vec![CatalogEntry::new("Tetris", 1989, "PZL")])
}

/// Builder for rankings in tests.
pub struct RankingBuilder {
    ranking: Ranking,
}

impl RankingBuilder {
    pub fn new(console_id: &str) -> Self {
        Self {
            ranking: Ranking::new(console_id),
        }
    }

    /// Put `title` at `rank`, growing the ranking if needed.
    pub fn title(mut self, rank: usize, title: &str) -> Self {
        while self.ranking.games.len() < rank {
            if self.ranking.add_rank().is_err() {
                return self;
            }
        }
        let _ = self.ranking.set_title(rank, title);
        self
    }

    /// Set the comment at `rank`.
    pub fn comment(mut self, rank: usize, comment: &str) -> Self {
        let _ = self.ranking.set_comment(rank, comment);
        self
    }

    pub fn build(self) -> Ranking {
        self.ranking
    }
}

/// Collect rankings into the keyed form used by the aggregator.
pub fn rankings_of(rankings: impl IntoIterator<Item = Ranking>) -> Rankings {
    rankings
        .into_iter()
        .map(|r| (r.console_id.clone(), r))
        .collect()
}

/// A service over [`sample_catalog`] and a fresh in-memory store.
pub fn memory_service(user_id: &str) -> (HistoryService, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let service = HistoryService::new(Arc::new(sample_catalog()), store.clone(), user_id)
        .unwrap_or_else(|e| panic!("invalid test user id {user_id:?}: {e}"));
    (service, store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_grows_ranking() {
        let ranking = RankingBuilder::new("FC")
            .title(5, "MOTHER")
            .comment(5, "Onett forever")
            .build();
        assert_eq!(ranking.games.len(), 5);
        assert_eq!(ranking.game(5).unwrap().comment, "Onett forever");
        assert!(ranking.validate().is_ok());
    }

    #[test]
    fn test_rankings_of_keys_by_console() {
        let rankings = rankings_of([RankingBuilder::new("GB").build()]);
        assert!(rankings.contains_key("GB"));
    }
}
