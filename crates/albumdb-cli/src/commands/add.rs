use anyhow::{Context, Result};
use std::path::Path;

use albumdb_core::model::{InsertOutcome, NewAlbum};
use albumdb_core::render::render_albums;
use albumdb_core::schema::Database;

use crate::prompt::{self, InputProvider, PromptError, Terminal};

/// Field values supplied up front. Any field left `None` is prompted for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryValues {
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub is_classic: Option<bool>,
}

impl EntryValues {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Counts of what an interactive session did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub added: usize,
    pub skipped: usize,
}

/// Run the interactive add session against stdin/stdout.
pub fn run_add(db_path: &Path, preset: EntryValues) -> Result<()> {
    let db = Database::open(db_path).context("Failed to open database")?;
    let mut terminal = Terminal::stdio();

    let summary = run_session(&db, &mut terminal, preset)?;
    log::info!(
        "Session finished: {} added, {} skipped",
        summary.added,
        summary.skipped
    );
    Ok(())
}

/// Add entries until the user declines, then print the stored albums.
///
/// A non-empty `preset` is recorded first, without asking whether to add it.
pub fn run_session(
    db: &Database,
    input: &mut impl InputProvider,
    preset: EntryValues,
) -> Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    input.notify("Album DB - add entries (artist must be unique).")?;

    let mut open = true;
    if !preset.is_empty() {
        open = add_entry(db, input, preset, &mut summary)?;
    }

    while open {
        let Some(answer) = input.read_line("Add new entry? (y/n): ")? else {
            break;
        };
        match answer.trim().to_lowercase().as_str() {
            "n" | "no" => break,
            "y" | "yes" | "" => {
                open = add_entry(db, input, EntryValues::default(), &mut summary)?;
            }
            _ => input.notify("Please enter 'y' or 'n'.")?,
        }
    }

    let albums = db.list_albums()?;
    input.notify("")?;
    input.notify("Current database contents:")?;
    input.notify(render_albums(&albums).trim_end_matches('\n'))?;

    Ok(summary)
}

/// Collect one entry and insert it. Returns `false` once input has closed.
fn add_entry(
    db: &Database,
    input: &mut impl InputProvider,
    values: EntryValues,
    summary: &mut SessionSummary,
) -> Result<bool> {
    let album = match collect_album(input, values) {
        Ok(album) => album,
        Err(PromptError::Closed(field)) => {
            log::debug!("Input closed while reading {field}");
            input.notify("Input closed; entry discarded.")?;
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    match db.insert_album(&album)? {
        InsertOutcome::Inserted(_) => {
            summary.added += 1;
            input.notify(&format!("Added '{}' to the database.", album.artist))?;
        }
        InsertOutcome::AlreadyExists => {
            summary.skipped += 1;
            input.notify(&format!(
                "Artist '{}' already exists in the database. Skipping.",
                album.artist
            ))?;
        }
    }
    Ok(true)
}

fn collect_album(
    input: &mut impl InputProvider,
    values: EntryValues,
) -> Result<NewAlbum, PromptError> {
    let artist = prompt::artist(input, values.artist)?;
    let genre = prompt::genre(input, values.genre)?;
    let year = prompt::year(input, values.year)?;
    let is_classic = prompt::is_classic(input, values.is_classic)?;

    Ok(NewAlbum {
        artist,
        genre,
        year: Some(year),
        is_classic,
    })
}
