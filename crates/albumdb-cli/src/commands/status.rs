use anyhow::{Context, Result};
use std::path::Path;

use albumdb_core::schema::Database;

pub fn show_status(db_path: &Path) -> Result<()> {
    let db = Database::open(db_path).context("Failed to open database")?;

    let albums = db.count_albums()?;
    let classics = db.count_classics()?;

    println!("\nalbumdb status\n");
    println!("  Database: {}", db_path.display());
    println!("  Albums:   {}", albums);
    println!("  Classics: {}", classics);

    if albums == 0 {
        println!("\n  Run `albumdb add` to record your first album");
    }

    Ok(())
}
