//! Per-console top-N rankings entered by the user.

use crate::console::Console;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Smallest number of ranks a ranking can hold.
pub const MIN_RANKS: usize = 1;
/// Largest number of ranks a ranking can hold.
pub const MAX_RANKS: usize = 10;
/// Number of empty ranks a new ranking starts with.
pub const INITIAL_RANKS: usize = 3;

/// All rankings of a user, keyed by console id.
pub type Rankings = BTreeMap<String, Ranking>;

/// Errors from editing or validating a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankingError {
    #[error("ranking already has the maximum of 10 games")]
    Full,

    #[error("ranking must keep at least 1 game")]
    AtMinimum,

    #[error("no rank {0} in this ranking")]
    NoSuchRank(usize),

    #[error("ranking for {console_id} has {len} games, expected 1 to 10")]
    InvalidLength { console_id: String, len: usize },

    #[error("ranking for {console_id} has rank {found} at position {position}")]
    RankOutOfOrder {
        console_id: String,
        position: usize,
        found: u32,
    },
}

/// One ranked slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedGame {
    /// 1-based rank, matching the slot's position.
    pub rank: u32,
    /// Title as typed by the user; may be empty.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub comment: String,
}

impl RankedGame {
    pub fn empty(rank: u32) -> Self {
        Self {
            rank,
            title: String::new(),
            comment: String::new(),
        }
    }

    /// Whether a title has been entered.
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }
}

/// A user's ranking for one console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    #[serde(rename = "id")]
    pub console_id: String,
    pub name: String,
    pub games: Vec<RankedGame>,
}

impl Ranking {
    /// A fresh ranking with [`INITIAL_RANKS`] empty slots.
    pub fn new(console_id: impl Into<String>) -> Self {
        let console_id = console_id.into();
        let name = Console::display_name(&console_id).to_string();
        let games = (1..=INITIAL_RANKS as u32).map(RankedGame::empty).collect();
        Self {
            console_id,
            name,
            games,
        }
    }

    /// Append an empty slot at the bottom.
    pub fn add_rank(&mut self) -> Result<(), RankingError> {
        if self.games.len() >= MAX_RANKS {
            return Err(RankingError::Full);
        }
        let next = self.games.len() as u32 + 1;
        self.games.push(RankedGame::empty(next));
        Ok(())
    }

    /// Remove the bottom slot, returning it.
    pub fn remove_rank(&mut self) -> Result<RankedGame, RankingError> {
        if self.games.len() <= MIN_RANKS {
            return Err(RankingError::AtMinimum);
        }
        self.games.pop().ok_or(RankingError::AtMinimum)
    }

    /// The slot holding `rank` (1-based).
    pub fn game(&self, rank: usize) -> Option<&RankedGame> {
        rank.checked_sub(1).and_then(|i| self.games.get(i))
    }

    fn game_mut(&mut self, rank: usize) -> Result<&mut RankedGame, RankingError> {
        rank.checked_sub(1)
            .and_then(|i| self.games.get_mut(i))
            .ok_or(RankingError::NoSuchRank(rank))
    }

    pub fn set_title(&mut self, rank: usize, title: impl Into<String>) -> Result<(), RankingError> {
        self.game_mut(rank)?.title = title.into();
        Ok(())
    }

    pub fn set_comment(
        &mut self,
        rank: usize,
        comment: impl Into<String>,
    ) -> Result<(), RankingError> {
        self.game_mut(rank)?.comment = comment.into();
        Ok(())
    }

    /// Slots with a title entered.
    pub fn titled_games(&self) -> impl Iterator<Item = &RankedGame> {
        self.games.iter().filter(|g| g.has_title())
    }

    /// Check the length bounds and that ranks run 1, 2, 3... in order.
    pub fn validate(&self) -> Result<(), RankingError> {
        let len = self.games.len();
        if !(MIN_RANKS..=MAX_RANKS).contains(&len) {
            return Err(RankingError::InvalidLength {
                console_id: self.console_id.clone(),
                len,
            });
        }
        for (position, game) in self.games.iter().enumerate() {
            if game.rank as usize != position + 1 {
                return Err(RankingError::RankOutOfOrder {
                    console_id: self.console_id.clone(),
                    position,
                    found: game.rank,
                });
            }
        }
        Ok(())
    }
}
