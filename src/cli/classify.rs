use crate::db::get_connection;
use crate::engine::classify;
use crate::error::Result;
use crate::settings::get_data_dir;

pub fn run() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("penny.db"))?;
    let result = classify(&conn)?;
    println!(
        "{} classified, {} still uncategorized",
        result.updated, result.remaining
    );
    Ok(())
}
