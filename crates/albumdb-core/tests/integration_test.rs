//! Integration tests for the file-backed album store.

use albumdb_core::model::{InsertOutcome, NewAlbum};
use albumdb_core::render::render_albums;
use albumdb_core::schema::Database;
use tempfile::TempDir;

/// Test database initialization and schema creation
#[test]
fn test_database_schema_creation() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("albums.db");

    let db = Database::open(&db_path).expect("Failed to open database");

    assert!(db_path.exists());
    assert_eq!(db.list_albums().expect("Failed to list albums").len(), 0);
}

/// Albums survive closing and reopening the database file
#[test]
fn test_albums_persist_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("albums.db");

    {
        let db = Database::open(&db_path).unwrap();
        db.insert_album(&NewAlbum::new("A")).unwrap();
        db.insert_album(&NewAlbum::new("B").with_year(2001)).unwrap();
    }

    let db = Database::open(&db_path).unwrap();
    db.insert_album(&NewAlbum::new("C")).unwrap();

    let artists: Vec<String> = db
        .list_albums()
        .unwrap()
        .into_iter()
        .map(|a| a.artist)
        .collect();
    assert_eq!(artists, vec!["A", "B", "C"]);
}

/// Uniqueness holds across separate connections to the same file
#[test]
fn test_duplicate_rejected_after_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("albums.db");

    {
        let db = Database::open(&db_path).unwrap();
        db.insert_album(&NewAlbum::new("Bowie")).unwrap();
    }

    let db = Database::open(&db_path).unwrap();
    let outcome = db.insert_album(&NewAlbum::new("Bowie")).unwrap();

    assert_eq!(outcome, InsertOutcome::AlreadyExists);
    assert_eq!(db.count_albums().unwrap(), 1);
}

/// Migrations are recorded once no matter how often the file is opened
#[test]
fn test_migrations_applied_once() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("albums.db");

    for _ in 0..3 {
        Database::open(&db_path).unwrap();
    }

    let db = Database::open(&db_path).unwrap();
    let count: i64 = db
        .conn()
        .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(count, 1);
}

/// Store output feeds straight into the renderer
#[test]
fn test_render_stored_albums() {
    let temp_dir = TempDir::new().unwrap();
    let db = Database::open(temp_dir.path().join("albums.db")).unwrap();

    db.insert_album(
        &NewAlbum::new("Bowie")
            .with_genre("Rock")
            .with_year(1977)
            .classic(true),
    )
    .unwrap();

    let table = render_albums(&db.list_albums().unwrap());
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "1  | Bowie  | Rock  | 1977 | Yes    ");
}
