//! QA tests for title matching and timeline aggregation.
//!
//! These tests exercise the public API end to end with fixture catalogs.
//! Run with: `cargo test -p history-core --test qa_timeline`

use history_core::testing::{rankings_of, sample_catalog, RankingBuilder};
use history_core::{
    build_timeline, compose_chronicle, resolve_title, Catalog, CatalogEntry, LifeEvent, Rankings,
    UserProfile, YearLabel,
};

fn titles(entries: &[history_core::TimelineEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.title.as_str()).collect()
}

// =============================================================================
// Title resolution
// =============================================================================

#[test]
fn test_unknown_console_never_resolves() {
    let catalog = sample_catalog();
    for title in ["Tetris", "MOTHER", "", "x"] {
        assert!(resolve_title(&catalog, "PCE", title).is_none());
    }
}

#[test]
fn test_empty_title_never_resolves() {
    let catalog = sample_catalog();
    for console in ["FC", "SFC", "GB", "N64"] {
        assert!(resolve_title(&catalog, console, "").is_none());
    }
}

#[test]
fn test_fullwidth_and_case_variants_resolve() {
    let catalog = Catalog::default().with_console(
        "FC",
        vec![
            CatalogEntry::new("ドラゴンクエストIII", 1988, "RPG"),
            CatalogEntry::new("Dragon Quest", 1986, "RPG"),
            CatalogEntry::new("Dragon Quest III", 1988, "RPG"),
        ],
    );

    assert_eq!(
        resolve_title(&catalog, "FC", "ドラゴンクエストIII").unwrap().title,
        "ドラゴンクエストIII"
    );
    assert_eq!(
        resolve_title(&catalog, "FC", "ドラゴンクエストＩＩＩ").unwrap().title,
        "ドラゴンクエストIII"
    );
    assert_eq!(
        resolve_title(&catalog, "FC", "dragon quest").unwrap().title,
        "Dragon Quest"
    );

    // Without the exact entry, the longer title is found by containment.
    let catalog = Catalog::default().with_console(
        "FC",
        vec![CatalogEntry::new("Dragon Quest III", 1988, "RPG")],
    );
    assert_eq!(
        resolve_title(&catalog, "FC", "dragon quest").unwrap().title,
        "Dragon Quest III"
    );
}

#[test]
fn test_bundled_catalog_resolves_japanese_titles() {
    let catalog = Catalog::bundled();
    let entry = resolve_title(catalog, "SFC", "クロノ・トリガー").expect("should resolve");
    assert_eq!(entry.year, 1995);

    // Partial titles match by containment.
    let entry = resolve_title(catalog, "FC", "ドラゴンクエストIII").expect("should resolve");
    assert_eq!(entry.year, 1988);
}

// =============================================================================
// Timeline aggregation
// =============================================================================

#[test]
fn test_no_rankings_no_timeline() {
    let timeline = build_timeline(&sample_catalog(), &Rankings::new());
    assert!(timeline.is_empty());
}

#[test]
fn test_groups_in_year_order_without_blank_slots() {
    let catalog = Catalog::default().with_console(
        "FC",
        vec![
            CatalogEntry::new("Game A", 1990, "RPG"),
            CatalogEntry::new("Game B", 1985, "ACT"),
        ],
    );
    let rankings = rankings_of([RankingBuilder::new("FC")
        .title(1, "Game A")
        .title(3, "Game B")
        .build()]);

    let timeline = build_timeline(&catalog, &rankings);
    let labels: Vec<_> = timeline.labels().collect();
    assert_eq!(labels, vec![YearLabel::Year(1985), YearLabel::Year(1990)]);
    assert_eq!(titles(timeline.get(YearLabel::Year(1985)).unwrap()), vec!["Game B"]);
    assert_eq!(titles(timeline.get(YearLabel::Year(1990)).unwrap()), vec!["Game A"]);
    assert_eq!(timeline.entry_count(), 2);
}

#[test]
fn test_unmatched_titles_are_unknown_period() {
    let rankings = rankings_of([RankingBuilder::new("GB")
        .title(1, "Tetris")
        .title(2, "Some Homebrew")
        .build()]);

    let timeline = build_timeline(&sample_catalog(), &rankings);
    let unknown = timeline.get(YearLabel::Unknown).expect("unknown bucket");
    assert_eq!(unknown[0].title, "Some Homebrew");
    assert_eq!(unknown[0].genre, "UNKNOWN");
    assert_eq!(unknown[0].resolved_year, 9999);
    assert_eq!(timeline.groups().last().unwrap().label.to_string(), "unknown-period");
}

#[test]
fn test_equal_years_keep_input_order_across_consoles() {
    let rankings = rankings_of([
        RankingBuilder::new("FC").title(1, "MOTHER").build(),
        RankingBuilder::new("GB").title(1, "Tetris").build(),
    ]);

    let timeline = build_timeline(&sample_catalog(), &rankings);
    let in_1989 = timeline.get(YearLabel::Year(1989)).unwrap();
    assert_eq!(titles(in_1989), vec!["MOTHER", "Tetris"]);
    assert_eq!(in_1989[0].console_id, "FC");
    assert_eq!(in_1989[1].console_id, "GB");
}

#[test]
fn test_timeline_is_reproducible() {
    let catalog = sample_catalog();
    let rankings = rankings_of([
        RankingBuilder::new("SFC")
            .title(1, "chrono trigger")
            .title(2, "F-ZERO")
            .comment(2, "Mute City")
            .build(),
        RankingBuilder::new("FC").title(1, "Unknown Thing").build(),
    ]);

    let first = build_timeline(&catalog, &rankings);
    let second = build_timeline(&catalog, &rankings);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

// =============================================================================
// Chronicle
// =============================================================================

#[test]
fn test_chronicle_places_life_events_between_games() {
    let rankings = rankings_of([RankingBuilder::new("FC")
        .title(1, "Super Mario Bros.")
        .title(2, "MOTHER")
        .build()]);
    let timeline = build_timeline(&sample_catalog(), &rankings);

    let mut profile = UserProfile {
        birth_year: 1980,
        ..UserProfile::default()
    };
    profile.add_life_event(LifeEvent::new(7, "entered elementary school").unwrap());

    let chronicle = compose_chronicle(&timeline, &profile);
    let labels: Vec<String> = chronicle.rows().iter().map(|r| r.label.to_string()).collect();
    assert_eq!(labels, vec!["1985", "1987", "1989"]);
    assert_eq!(chronicle.rows()[1].events[0].event, "entered elementary school");
    assert_eq!(chronicle.rows()[2].age, Some(9));
}
