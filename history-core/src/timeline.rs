//! Chronological view of every ranked game.
//!
//! [`build_timeline`] flattens all rankings, resolves each title against the
//! reference catalog to find its release year, and groups the result by year.
//! It is a pure function of its inputs: the caller re-runs it whenever the
//! rankings change and renders the groups in the order given.

use crate::catalog::{Catalog, UNKNOWN_GENRE};
use crate::console::Console;
use crate::ranking::Rankings;
use serde::{Serialize, Serializer};
use std::fmt;

/// Year assigned to entries the catalog could not date.
pub const UNKNOWN_YEAR: i32 = 9999;

/// Label used for the group of undated entries.
pub const UNKNOWN_PERIOD_LABEL: &str = "unknown-period";

/// Key of a timeline group.
///
/// Dated years sort ascending and the unknown bucket sorts after all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum YearLabel {
    Year(i32),
    Unknown,
}

impl YearLabel {
    /// Label for a resolved year. [`UNKNOWN_YEAR`] and anything after it
    /// fall in the unknown bucket, so label order matches year order.
    pub fn from_resolved(year: i32) -> Self {
        if year >= UNKNOWN_YEAR {
            YearLabel::Unknown
        } else {
            YearLabel::Year(year)
        }
    }

    pub fn year(&self) -> Option<i32> {
        match self {
            YearLabel::Year(y) => Some(*y),
            YearLabel::Unknown => None,
        }
    }
}

impl fmt::Display for YearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearLabel::Year(y) => write!(f, "{y}"),
            YearLabel::Unknown => f.write_str(UNKNOWN_PERIOD_LABEL),
        }
    }
}

impl Serialize for YearLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A ranked game placed on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub title: String,
    pub comment: String,
    pub console_id: String,
    pub console_name: String,
    pub console_icon: Option<String>,
    pub rank: u32,
    /// Catalog release year, or [`UNKNOWN_YEAR`].
    pub resolved_year: i32,
    pub genre: String,
}

impl TimelineEntry {
    pub fn label(&self) -> YearLabel {
        YearLabel::from_resolved(self.resolved_year)
    }
}

/// One year's worth of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearGroup {
    pub label: YearLabel,
    pub entries: Vec<TimelineEntry>,
}

/// Ordered mapping from year label to entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    groups: Vec<YearGroup>,
}

impl Timeline {
    pub fn groups(&self) -> &[YearGroup] {
        &self.groups
    }

    pub fn labels(&self) -> impl Iterator<Item = YearLabel> + '_ {
        self.groups.iter().map(|g| g.label)
    }

    /// Entries for a label, if that year has any.
    pub fn get(&self, label: YearLabel) -> Option<&[TimelineEntry]> {
        self.groups
            .iter()
            .find(|g| g.label == label)
            .map(|g| g.entries.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of entries across all groups.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }
}

/// Build the year-grouped timeline of every titled game in `rankings`.
///
/// Rankings are visited in console-id order and games in rank order. Entries
/// sharing a year keep that relative order. Untitled slots are skipped.
pub fn build_timeline(catalog: &Catalog, rankings: &Rankings) -> Timeline {
    let mut entries: Vec<TimelineEntry> = rankings
        .values()
        .flat_map(|ranking| {
            ranking.titled_games().map(move |game| {
                let info = catalog.resolve(&ranking.console_id, &game.title);
                let resolved_year = info
                    .filter(|entry| entry.has_year())
                    .map(|entry| entry.year)
                    .unwrap_or(UNKNOWN_YEAR);
                let genre = info
                    .map(|entry| entry.genre.clone())
                    .unwrap_or_else(|| UNKNOWN_GENRE.to_string());

                TimelineEntry {
                    title: game.title.clone(),
                    comment: game.comment.clone(),
                    console_id: ranking.console_id.clone(),
                    console_name: ranking.name.clone(),
                    console_icon: Console::icon_for(&ranking.console_id).map(str::to_string),
                    rank: game.rank,
                    resolved_year,
                    genre,
                }
            })
        })
        .collect();

    // Vec::sort_by_key is stable.
    entries.sort_by_key(|e| e.resolved_year);

    let mut groups: Vec<YearGroup> = Vec::new();
    for entry in entries {
        let label = entry.label();
        match groups.last_mut() {
            Some(group) if group.label == label => group.entries.push(entry),
            _ => groups.push(YearGroup {
                label,
                entries: vec![entry],
            }),
        }
    }

    Timeline { groups }
}
