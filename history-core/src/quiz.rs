//! Title quiz: guess a game from its catalog description.

use crate::catalog::Catalog;
use rand::seq::IteratorRandom;
use rand::Rng;
use serde::Serialize;

/// A question drawn from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub console_id: String,
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub description: String,
}

/// Outcome of answering a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub is_correct: bool,
    pub correct_title: String,
    pub genre: String,
    pub year: i32,
}

impl Quiz {
    /// Draw a random game that has a description.
    pub fn draw(catalog: &Catalog) -> Option<Self> {
        Self::draw_with_rng(catalog, &mut rand::thread_rng())
    }

    /// Draw with a caller-supplied RNG.
    pub fn draw_with_rng<R: Rng>(catalog: &Catalog, rng: &mut R) -> Option<Self> {
        let (console_id, entry) = catalog
            .entries()
            .filter(|(_, g)| g.description().is_some())
            .choose(rng)?;

        Some(Self {
            console_id: console_id.to_string(),
            title: entry.title.clone(),
            year: entry.year,
            genre: entry.genre.clone(),
            description: entry.description.clone(),
        })
    }

    /// Hint shown on request: genre and release year.
    pub fn hint(&self) -> String {
        format!("{} / {}", self.genre, self.year)
    }

    /// Check an answer. Blank answers are not graded.
    ///
    /// The comparison ignores case and surrounding whitespace but is otherwise
    /// exact.
    pub fn answer(&self, answer: &str) -> Option<QuizResult> {
        let answer = answer.trim();
        if answer.is_empty() {
            return None;
        }

        Some(QuizResult {
            is_correct: self.title.to_lowercase() == answer.to_lowercase(),
            correct_title: self.title.clone(),
            genre: self.genre.clone(),
            year: self.year,
        })
    }
}
