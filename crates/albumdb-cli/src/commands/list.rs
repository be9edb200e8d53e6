use anyhow::{Context, Result};
use std::path::Path;

use albumdb_core::render::render_albums;
use albumdb_core::schema::Database;

/// Print every stored album, as a table or as JSON.
pub fn list_albums(db_path: &Path, json: bool) -> Result<()> {
    let db = Database::open(db_path).context("Failed to open database")?;
    let albums = db.list_albums()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&albums)?);
    } else {
        print!("{}", render_albums(&albums));
    }

    Ok(())
}
