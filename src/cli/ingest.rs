use std::path::PathBuf;

use crate::db::get_connection;
use crate::engine::classify;
use crate::error::Result;
use crate::ingest::ingest_file;
use crate::settings::get_data_dir;

pub fn run(file: &str, source: &str, year: Option<i32>) -> Result<()> {
    let file_path = PathBuf::from(file);
    let conn = get_connection(&get_data_dir().join("penny.db"))?;

    let result = ingest_file(&conn, &file_path, source, year)?;

    if result.duplicate_file {
        println!("This file has already been ingested (duplicate checksum).");
        return Ok(());
    }

    println!(
        "{} inserted, {} skipped (duplicates or dropped rows)",
        result.inserted, result.skipped
    );

    let classified = classify(&conn)?;
    println!(
        "{} classified, {} still uncategorized",
        classified.updated, classified.remaining
    );

    Ok(())
}
