//! Life chronicle: the game timeline merged with the user's life events.
//!
//! The merge lives outside [`crate::timeline`] so the aggregated timeline
//! stays a function of the rankings alone. A chronicle row exists for every
//! year that has games, life events, or both.

use crate::profile::{AgeGroup, LifeEvent, UserProfile};
use crate::timeline::{Timeline, TimelineEntry, YearLabel};
use serde::Serialize;
use std::collections::BTreeSet;

/// One year of the chronicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChronicleRow {
    pub label: YearLabel,
    /// Age during this year; absent for the unknown period.
    pub age: Option<i32>,
    pub age_group: Option<AgeGroup>,
    pub games: Vec<TimelineEntry>,
    pub events: Vec<LifeEvent>,
}

/// The whole chronicle, oldest year first with the unknown period last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Chronicle {
    rows: Vec<ChronicleRow>,
}

impl Chronicle {
    pub fn rows(&self) -> &[ChronicleRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Merge a timeline with the life events of `profile`.
///
/// Events are labelled the same way as games, so an event in year 9999 or
/// later lands in the unknown period.
pub fn compose_chronicle(timeline: &Timeline, profile: &UserProfile) -> Chronicle {
    let event_label =
        |event: &LifeEvent| event.year(profile.birth_year).map(YearLabel::from_resolved);

    let labels: BTreeSet<YearLabel> = timeline
        .labels()
        .chain(profile.life_events.iter().filter_map(event_label))
        .collect();

    let rows = labels
        .into_iter()
        .map(|label| {
            let games = timeline.get(label).map(<[_]>::to_vec).unwrap_or_default();
            let events = profile
                .life_events
                .iter()
                .filter(|e| event_label(*e) == Some(label))
                .cloned()
                .collect();
            let age = label.year().map(|year| profile.age_in(year));
            ChronicleRow {
                label,
                age,
                age_group: age.map(|age| profile.age_group(age)),
                games,
                events,
            }
        })
        .collect();

    Chronicle { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogEntry};
    use crate::ranking::{Ranking, Rankings};
    use crate::timeline::build_timeline;

    fn timeline() -> Timeline {
        let catalog = Catalog::default().with_console(
            "SFC",
            vec![
                CatalogEntry::new("Chrono Trigger", 1995, "RPG"),
                CatalogEntry::new("F-ZERO", 1990, "RAC"),
            ],
        );
        let mut sfc = Ranking::new("SFC");
        sfc.set_title(1, "Chrono Trigger").unwrap();
        sfc.set_title(2, "F-ZERO").unwrap();
        sfc.set_title(3, "Homebrew").unwrap();
        build_timeline(&catalog, &Rankings::from([("SFC".to_string(), sfc)]))
    }

    #[test]
    fn test_empty_inputs_give_empty_chronicle() {
        let chronicle = compose_chronicle(&Timeline::default(), &UserProfile::default());
        assert!(chronicle.is_empty());
    }

    #[test]
    fn test_union_of_game_years_and_event_years() {
        let mut profile = UserProfile {
            birth_year: 1984,
            ..UserProfile::default()
        };
        profile.add_life_event(LifeEvent::new(8, "moved to Osaka").unwrap());
        profile.add_life_event(LifeEvent::new(11, "first part-time job?").unwrap());

        let chronicle = compose_chronicle(&timeline(), &profile);
        let labels: Vec<_> = chronicle.rows().iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            vec![
                YearLabel::Year(1990),
                YearLabel::Year(1992),
                YearLabel::Year(1995),
                YearLabel::Unknown,
            ]
        );

        let row_1992 = &chronicle.rows()[1];
        assert!(row_1992.games.is_empty());
        assert_eq!(row_1992.events[0].event, "moved to Osaka");
        assert_eq!(row_1992.age, Some(8));
        assert_eq!(row_1992.age_group, Some(AgeGroup::Elementary));

        let row_1995 = &chronicle.rows()[2];
        assert_eq!(row_1995.games[0].title, "Chrono Trigger");
        assert_eq!(row_1995.events.len(), 1);

        let unknown = chronicle.rows().last().unwrap();
        assert_eq!(unknown.age, None);
        assert_eq!(unknown.games[0].title, "Homebrew");
    }

    #[test]
    fn test_event_year_shared_with_games_yields_one_row() {
        let mut profile = UserProfile {
            birth_year: 1990,
            ..UserProfile::default()
        };
        profile.add_life_event(LifeEvent::new(0, "born").unwrap());

        let chronicle = compose_chronicle(&timeline(), &profile);
        let rows_1990: Vec<_> = chronicle
            .rows()
            .iter()
            .filter(|r| r.label == YearLabel::Year(1990))
            .collect();
        assert_eq!(rows_1990.len(), 1);
        assert_eq!(rows_1990[0].games.len(), 1);
        assert_eq!(rows_1990[0].events.len(), 1);
        assert_eq!(rows_1990[0].age_group, Some(AgeGroup::EarlyChildhood));
    }

    #[test]
    fn test_far_future_event_joins_unknown_period() {
        let mut profile = UserProfile {
            birth_year: 9990,
            ..UserProfile::default()
        };
        profile.add_life_event(LifeEvent::new(9, "time capsule").unwrap());
        profile.add_life_event(LifeEvent::new(20, "even later").unwrap());

        let chronicle = compose_chronicle(&timeline(), &profile);
        let labels: Vec<_> = chronicle.rows().iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            vec![
                YearLabel::Year(1990),
                YearLabel::Year(1995),
                YearLabel::Unknown,
            ]
        );

        let unknown = chronicle.rows().last().unwrap();
        assert_eq!(unknown.age, None);
        assert_eq!(unknown.games[0].title, "Homebrew");
        assert_eq!(unknown.events.len(), 2);
    }
}
