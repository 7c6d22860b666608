use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::{PennyError, Result};
use crate::models::Bucket;
use crate::settings::get_data_dir;

pub fn add(keyword: &str, category: &str, bucket: &str) -> Result<()> {
    let bucket = Bucket::parse(bucket)?;
    let conn = get_connection(&get_data_dir().join("penny.db"))?;

    conn.execute(
        "INSERT INTO rules (keyword, category, bucket) VALUES (?1, ?2, ?3)",
        rusqlite::params![keyword, category, bucket.as_str()],
    )?;
    println!("Added rule: '{keyword}' \u{2192} {category} ({bucket})");
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("penny.db"))?;
    let mut stmt =
        conn.prepare("SELECT id, keyword, category, bucket FROM rules ORDER BY id")?;
    let rows: Vec<(i64, String, String, String)> = stmt
        .query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Keyword", "Category", "Bucket"]);
    for (id, keyword, category, bucket) in rows {
        table.add_row(vec![
            Cell::new(id),
            Cell::new(keyword),
            Cell::new(category),
            Cell::new(bucket),
        ]);
    }
    println!("Rules (applied in order)\n{table}");
    Ok(())
}

pub fn delete(id: i64) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("penny.db"))?;

    let row: std::result::Result<(String, String), _> = conn.query_row(
        "SELECT keyword, category FROM rules WHERE id = ?1",
        [id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    );

    match row {
        Err(_) => Err(PennyError::Other(format!("No rule with ID {id}"))),
        Ok((keyword, category)) => {
            conn.execute("DELETE FROM rules WHERE id = ?1", [id])?;
            println!("Deleted rule {id}: '{keyword}' \u{2192} {category}");
            Ok(())
        }
    }
}
