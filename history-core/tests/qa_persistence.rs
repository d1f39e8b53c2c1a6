//! QA tests for storage, export and import.
//!
//! These tests verify that a user's history survives a restart and moves
//! between data directories through an export file.
//! Run with: `cargo test -p history-core --test qa_persistence -- --nocapture`

use history_core::persist::export_path;
use history_core::testing::sample_catalog;
use history_core::{
    Catalog, DocumentPath, DocumentStore, ExportBundle, FileStore, HistoryService, PersistError,
    UserProfile, YearLabel,
};
use std::sync::Arc;
use tempfile::TempDir;

async fn open(dir: &TempDir, user: &str) -> HistoryService {
    HistoryService::open(
        Arc::new(sample_catalog()),
        Arc::new(FileStore::new(dir.path())),
        user,
    )
    .await
    .expect("Failed to open history")
}

// =============================================================================
// TEST 1: Rankings and profile survive a restart
// =============================================================================

#[tokio::test]
async fn test_file_store_round_trip() {
    println!("\n=== TEST: File Store Round Trip ===\n");

    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    {
        let mut history = open(&temp_dir, "alice").await;
        let fc = history.edit_ranking("FC");
        fc.set_title(1, "MOTHER").unwrap();
        fc.set_comment(1, "Eight melodies").unwrap();
        fc.add_rank().unwrap();
        fc.set_title(4, "super mario").unwrap();
        history.save_ranking("FC").await.expect("save should succeed");

        history.set_birth_year("1982").await.unwrap();
        history.add_life_event(12, "summer in the countryside").await.unwrap();
    }

    let history = open(&temp_dir, "alice").await;
    let fc = history.ranking("FC").expect("ranking should be stored");
    assert_eq!(fc.games.len(), 4);
    assert_eq!(fc.game(1).unwrap().comment, "Eight melodies");
    assert_eq!(history.profile().birth_year, 1982);

    let labels: Vec<_> = history.timeline().labels().collect();
    println!("Timeline labels: {:?}", labels);
    assert_eq!(labels, vec![YearLabel::Year(1985), YearLabel::Year(1989)]);

    let chronicle = history.chronicle();
    assert!(chronicle
        .rows()
        .iter()
        .any(|row| row.label == YearLabel::Year(1994) && row.events.len() == 1));

    // Users do not see each other's data.
    let other = open(&temp_dir, "bob").await;
    assert!(other.rankings().is_empty());
}

// =============================================================================
// TEST 2: Export in one data directory, import in another
// =============================================================================

#[tokio::test]
async fn test_export_then_import_elsewhere() {
    println!("\n=== TEST: Export and Import ===\n");

    let source_dir = TempDir::new().expect("Failed to create temp directory");
    let target_dir = TempDir::new().expect("Failed to create temp directory");

    let mut source = open(&source_dir, "local").await;
    source.edit_ranking("SFC").set_title(1, "Chrono Trigger").unwrap();
    source.save_ranking("SFC").await.unwrap();
    source.add_life_event(5, "first console").await.unwrap();

    let path = export_path(source_dir.path());
    source.export().save_json(&path).await.expect("export should succeed");
    println!("Exported to {}", path.display());
    assert!(path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("game-history_") && n.ends_with(".json")));

    let mut target = open(&target_dir, "local").await;
    target.edit_ranking("GB").set_title(1, "Tetris").unwrap();
    target.save_ranking("GB").await.unwrap();

    let bundle = ExportBundle::load_json(&path).await.expect("import should parse");
    target.import(bundle).await.expect("import should succeed");

    let reopened = open(&target_dir, "local").await;
    assert_eq!(reopened.timeline(), source.timeline());
    assert_eq!(reopened.profile(), source.profile());
    assert!(reopened.ranking("GB").is_none());
}

// =============================================================================
// TEST 3: Bad import files change nothing
// =============================================================================

#[tokio::test]
async fn test_invalid_import_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("broken.json");

    tokio::fs::write(&path, r#"{"rankings": {"FC": {"id": "SFC", "name": "x", "games": []}}}"#)
        .await
        .unwrap();
    let result = ExportBundle::load_json(&path).await;
    println!("Import result: {:?}", result);
    assert!(matches!(result, Err(PersistError::MismatchedKey { .. })));

    tokio::fs::write(
        &path,
        r#"{"userProfile":{"birthYear":2147483600},"lifeEvents":[{"age":500,"event":""}]}"#,
    )
    .await
    .unwrap();
    assert!(matches!(
        ExportBundle::load_json(&path).await,
        Err(PersistError::InvalidProfile(_))
    ));

    tokio::fs::write(&path, "not json").await.unwrap();
    assert!(matches!(
        ExportBundle::load_json(&path).await,
        Err(PersistError::Json(_))
    ));
}

// =============================================================================
// TEST 4: Deleted rankings stay deleted
// =============================================================================

#[tokio::test]
async fn test_delete_ranking_removes_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let mut history = open(&temp_dir, "local").await;

    history.edit_ranking("N64");
    history.save_ranking("N64").await.unwrap();
    assert!(temp_dir.path().join("users/local/rankings/N64.json").exists());

    assert!(history.delete_ranking("N64").await.unwrap());
    let store = FileStore::new(temp_dir.path());
    let path = DocumentPath::ranking("local", "N64").unwrap();
    assert!(store.get(&path).await.unwrap().is_none());

    let reopened = open(&temp_dir, "local").await;
    assert!(reopened.ranking("N64").is_none());
}

// =============================================================================
// TEST 5: Catalogs load from custom files
// =============================================================================

#[tokio::test]
async fn test_custom_catalog_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("catalog.json");
    tokio::fs::write(
        &path,
        r#"{"PCE": [{"title": "R-TYPE", "year": 1988, "genre": "STG"}]}"#,
    )
    .await
    .unwrap();

    let catalog = Catalog::load(&path).await.expect("catalog should load");
    assert_eq!(catalog.resolve("PCE", "r-type").unwrap().year, 1988);
    assert!(!Catalog::bundled().is_empty());
}

// =============================================================================
// TEST 6: Corrupt files on disk do not lock the user out
// =============================================================================

#[tokio::test]
async fn test_open_survives_corrupt_files() {
    println!("\n=== TEST: Open With Corrupt Files ===\n");

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    {
        let mut history = open(&temp_dir, "carol").await;
        history.edit_ranking("GB").set_title(1, "Tetris").unwrap();
        history.save_ranking("GB").await.unwrap();
        history.set_birth_year("1985").await.unwrap();
    }

    let user_dir = temp_dir.path().join("users/carol");
    std::fs::write(user_dir.join("rankings/FC.json"), "{oops").unwrap();
    std::fs::write(user_dir.join("profile/settings.json"), "{oops").unwrap();

    let history = open(&temp_dir, "carol").await;
    let consoles: Vec<_> = history.rankings().keys().cloned().collect();
    println!("Loaded consoles: {:?}", consoles);
    assert_eq!(consoles, vec!["GB".to_string()]);
    assert_eq!(history.profile(), &UserProfile::default());
}
