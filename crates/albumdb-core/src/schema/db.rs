use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{Album, AlbumId, InsertOutcome, NewAlbum};

use super::migrations::MIGRATIONS;

const ALBUM_COLUMNS: &str = "id, artist, genre, year, is_classic";

/// A database connection holding the album record store.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at the given path and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Get a reference to the underlying connection (for advanced queries).
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;

        let mut stmt = self
            .conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")?;
        let applied: Vec<u32> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for migration in MIGRATIONS {
            if !applied.contains(&migration.version) {
                log::info!(
                    "Applying migration {} ({})",
                    migration.version,
                    migration.name
                );
                self.conn.execute_batch(migration.sql)?;
                self.conn.execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    rusqlite::params![migration.version, migration.name],
                )?;
            }
        }

        Ok(())
    }
}

// Album store
impl Database {
    /// Insert an album unless its artist is already stored.
    ///
    /// A duplicate artist is reported as [`InsertOutcome::AlreadyExists`];
    /// any other database failure is returned as an error.
    pub fn insert_album(&self, album: &NewAlbum) -> Result<InsertOutcome> {
        if album.artist.trim().is_empty() {
            return Err(Error::InvalidData("artist name must not be empty".into()));
        }

        let inserted = self.conn.execute(
            "INSERT INTO albums (artist, genre, year, is_classic) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![album.artist, album.genre, album.year, album.is_classic],
        );

        match inserted {
            Ok(_) => {
                let id = AlbumId::from_i64(self.conn.last_insert_rowid());
                log::debug!("Inserted album {} for artist {:?}", id, album.artist);
                Ok(InsertOutcome::Inserted(id))
            }
            Err(e) if is_unique_violation(&e) => {
                log::debug!("Artist {:?} already stored, skipping", album.artist);
                Ok(InsertOutcome::AlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List every album in insertion (id) order.
    pub fn list_albums(&self) -> Result<Vec<Album>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {ALBUM_COLUMNS} FROM albums ORDER BY id"))?;

        let albums = stmt
            .query_map([], row_to_album)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(albums)
    }

    /// Look up the album stored for an exact (case-sensitive) artist name.
    pub fn find_album_by_artist(&self, artist: &str) -> Result<Option<Album>> {
        let album = self
            .conn
            .query_row(
                &format!("SELECT {ALBUM_COLUMNS} FROM albums WHERE artist = ?1"),
                [artist],
                row_to_album,
            )
            .optional()?;
        Ok(album)
    }

    /// Count all stored albums.
    pub fn count_albums(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM albums", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Count albums flagged as classics.
    pub fn count_classics(&self) -> Result<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM albums WHERE is_classic <> 0",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn row_to_album(row: &rusqlite::Row) -> rusqlite::Result<Album> {
    Ok(Album {
        id: AlbumId::from_i64(row.get(0)?),
        artist: row.get(1)?,
        genre: row.get(2)?,
        year: row.get(3)?,
        is_classic: row.get::<_, Option<bool>>(4)?.unwrap_or(false),
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, MIGRATIONS.len() as i64);
        assert_eq!(db.count_albums().unwrap(), 0);
    }

    #[test]
    fn test_insert_new_artist() {
        let db = Database::open_in_memory().unwrap();

        let album = NewAlbum::new("Miles Davis")
            .with_genre("Jazz")
            .with_year(1959);
        let outcome = db.insert_album(&album).unwrap();

        assert!(outcome.is_inserted());
        assert_eq!(db.count_albums().unwrap(), 1);
    }

    #[test]
    fn test_insert_duplicate_artist() {
        let db = Database::open_in_memory().unwrap();

        db.insert_album(&NewAlbum::new("Miles Davis")).unwrap();
        let outcome = db
            .insert_album(&NewAlbum::new("Miles Davis").with_genre("Fusion"))
            .unwrap();

        assert_eq!(outcome, InsertOutcome::AlreadyExists);
        assert_eq!(db.count_albums().unwrap(), 1);

        // The first entry is untouched
        let stored = db.find_album_by_artist("Miles Davis").unwrap().unwrap();
        assert_eq!(stored.genre, None);
    }

    #[test]
    fn test_artist_match_is_case_sensitive() {
        let db = Database::open_in_memory().unwrap();

        let upper = db.insert_album(&NewAlbum::new("Bowie")).unwrap();
        let lower = db.insert_album(&NewAlbum::new("bowie")).unwrap();

        assert!(upper.is_inserted());
        assert!(lower.is_inserted());
        assert_eq!(db.count_albums().unwrap(), 2);
    }

    #[test]
    fn test_empty_artist_rejected() {
        let db = Database::open_in_memory().unwrap();

        let result = db.insert_album(&NewAlbum::new("   "));
        assert!(matches!(result, Err(Error::InvalidData(_))));
        assert_eq!(db.count_albums().unwrap(), 0);
    }

    #[test]
    fn test_list_albums_in_insertion_order() {
        let db = Database::open_in_memory().unwrap();

        db.insert_album(&NewAlbum::new("A")).unwrap();
        db.insert_album(&NewAlbum::new("B")).unwrap();
        db.insert_album(&NewAlbum::new("A")).unwrap();
        db.insert_album(&NewAlbum::new("C")).unwrap();

        let artists: Vec<String> = db
            .list_albums()
            .unwrap()
            .into_iter()
            .map(|a| a.artist)
            .collect();
        assert_eq!(artists, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_ids_strictly_increasing() {
        let db = Database::open_in_memory().unwrap();

        let first = db.insert_album(&NewAlbum::new("A")).unwrap();
        db.insert_album(&NewAlbum::new("A")).unwrap();
        let second = db.insert_album(&NewAlbum::new("B")).unwrap();

        let (InsertOutcome::Inserted(first), InsertOutcome::Inserted(second)) = (first, second)
        else {
            panic!("expected both inserts to succeed");
        };
        assert!(second > first);
    }

    #[test]
    fn test_album_round_trip() {
        let db = Database::open_in_memory().unwrap();

        db.insert_album(
            &NewAlbum::new("David Bowie")
                .with_genre("Rock")
                .with_year(1977)
                .classic(true),
        )
        .unwrap();
        db.insert_album(&NewAlbum::new("Unknown")).unwrap();

        let albums = db.list_albums().unwrap();
        assert_eq!(albums.len(), 2);
        assert_eq!(albums[0].genre, Some("Rock".to_string()));
        assert_eq!(albums[0].year, Some(1977));
        assert!(albums[0].is_classic);
        assert_eq!(albums[1].genre, None);
        assert_eq!(albums[1].year, None);
        assert!(!albums[1].is_classic);
        assert_eq!(db.count_classics().unwrap(), 1);
    }

    #[test]
    fn test_find_missing_artist() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.find_album_by_artist("Nobody").unwrap().is_none());
    }
}
