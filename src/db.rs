use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS transactions (
    id TEXT PRIMARY KEY,
    date TEXT NOT NULL,
    name TEXT NOT NULL,
    amount REAL NOT NULL,
    category TEXT NOT NULL DEFAULT 'Uncategorized',
    bucket TEXT NOT NULL DEFAULT 'SPEND',
    source TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS rules (
    id INTEGER PRIMARY KEY,
    keyword TEXT NOT NULL,
    category TEXT NOT NULL,
    bucket TEXT NOT NULL DEFAULT 'SPEND',
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS imports (
    id INTEGER PRIMARY KEY,
    filename TEXT NOT NULL,
    source TEXT NOT NULL,
    record_count INTEGER,
    inserted INTEGER,
    skipped INTEGER,
    checksum TEXT,
    imported_at TEXT DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category);
";

// (keyword, category, bucket)
const STARTER_RULES: &[(&str, &str, &str)] = &[
    ("payroll", "Paycheck", "INCOME"),
    ("direct deposit", "Paycheck", "INCOME"),
    ("interest paid", "Interest", "INCOME"),
    ("rent", "Rent", "BILL"),
    ("electric", "Utilities", "BILL"),
    ("internet", "Utilities", "BILL"),
    ("insurance", "Insurance", "BILL"),
    ("transfer", "Transfer", "TRANSFER"),
    ("zelle", "Transfer", "TRANSFER"),
];

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;

    let count: i64 = conn.query_row("SELECT count(*) FROM rules", [], |row| row.get(0))?;
    if count == 0 {
        for (keyword, category, bucket) in STARTER_RULES {
            conn.execute(
                "INSERT INTO rules (keyword, category, bucket) VALUES (?1, ?2, ?3)",
                rusqlite::params![keyword, category, bucket],
            )?;
        }
    }
    Ok(())
}
