//! The store contract the pipeline consumes: insert-if-absent keyed by the
//! content fingerprint, a snapshot of unclassified rows, per-rule bulk
//! updates, and the import audit log. Every function takes the connection
//! explicitly; nothing here is ambient state.

use rusqlite::Connection;

use crate::error::Result;
use crate::models::{Bucket, Rule, TransactionRecord, UNCATEGORIZED};

/// Insert a record unless its fingerprint already exists. Returns true when
/// a row was actually written. A duplicate is a no-op and never updates the
/// existing row's fields.
pub fn insert_if_absent(conn: &Connection, rec: &TransactionRecord) -> Result<bool> {
    let n = conn.execute(
        "INSERT OR IGNORE INTO transactions (id, date, name, amount, category, bucket, source) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            rec.id,
            rec.date,
            rec.name,
            rec.amount,
            rec.category,
            rec.bucket.as_str(),
            rec.source,
        ],
    )?;
    Ok(n > 0)
}

/// Snapshot of records still carrying the default category, as (id, name).
pub fn unclassified(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut stmt =
        conn.prepare("SELECT id, name FROM transactions WHERE category = ?1 ORDER BY rowid")?;
    let rows = stmt
        .query_map([UNCATEGORIZED], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn set_classification(
    conn: &Connection,
    id: &str,
    category: &str,
    bucket: Bucket,
) -> Result<()> {
    conn.execute(
        "UPDATE transactions SET category = ?1, bucket = ?2 WHERE id = ?3",
        rusqlite::params![category, bucket.as_str(), id],
    )?;
    Ok(())
}

/// Rules in application order (insertion order).
pub fn load_rules(conn: &Connection) -> Result<Vec<Rule>> {
    let mut stmt = conn.prepare("SELECT keyword, category, bucket FROM rules ORDER BY id")?;
    let raw: Vec<(String, String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut rules = Vec::with_capacity(raw.len());
    for (keyword, category, bucket) in raw {
        rules.push(Rule {
            keyword,
            category,
            bucket: Bucket::parse(&bucket)?,
        });
    }
    Ok(rules)
}

pub fn import_seen(conn: &Connection, checksum: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM imports WHERE checksum = ?1")?;
    Ok(stmt.exists([checksum])?)
}

pub fn record_import(
    conn: &Connection,
    filename: &str,
    source: &str,
    record_count: usize,
    inserted: usize,
    skipped: usize,
    checksum: &str,
) -> Result<()> {
    conn.execute(
        "INSERT INTO imports (filename, source, record_count, inserted, skipped, checksum) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            filename,
            source,
            record_count as i64,
            inserted as i64,
            skipped as i64,
            checksum,
        ],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};
    use crate::fingerprint::fingerprint;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    fn record(date: &str, name: &str, amount: f64) -> TransactionRecord {
        TransactionRecord {
            id: fingerprint(date, name, amount),
            date: date.to_string(),
            name: name.to_string(),
            amount,
            category: UNCATEGORIZED.to_string(),
            bucket: Bucket::Spend,
            source: "chase".to_string(),
        }
    }

    #[test]
    fn test_insert_if_absent_dedupes() {
        let (_dir, conn) = test_db();
        let rec = record("2024-01-05", "COFFEE", -4.5);
        assert!(insert_if_absent(&conn, &rec).unwrap());
        assert!(!insert_if_absent(&conn, &rec).unwrap());
        let count: i64 = conn
            .query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_duplicate_insert_does_not_update_fields() {
        let (_dir, conn) = test_db();
        let rec = record("2024-01-05", "COFFEE", -4.5);
        insert_if_absent(&conn, &rec).unwrap();
        set_classification(&conn, &rec.id, "Eating Out", Bucket::Spend).unwrap();

        // Same triple arrives again, still carrying defaults.
        insert_if_absent(&conn, &rec).unwrap();
        let category: String = conn
            .query_row("SELECT category FROM transactions WHERE id = ?1", [&rec.id], |r| r.get(0))
            .unwrap();
        assert_eq!(category, "Eating Out");
    }

    #[test]
    fn test_unclassified_snapshot() {
        let (_dir, conn) = test_db();
        let a = record("2024-01-05", "COFFEE", -4.5);
        let b = record("2024-01-06", "GROCERY", -25.0);
        insert_if_absent(&conn, &a).unwrap();
        insert_if_absent(&conn, &b).unwrap();
        set_classification(&conn, &a.id, "Eating Out", Bucket::Spend).unwrap();

        let pending = unclassified(&conn).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].1, "GROCERY");
    }

    #[test]
    fn test_load_rules_in_insertion_order() {
        let (_dir, conn) = test_db();
        conn.execute("DELETE FROM rules", []).unwrap();
        conn.execute(
            "INSERT INTO rules (keyword, category, bucket) VALUES ('coffee', 'Eating Out', 'SPEND')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO rules (keyword, category, bucket) VALUES ('shop', 'Shopping', 'SPEND')",
            [],
        )
        .unwrap();
        let rules = load_rules(&conn).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].keyword, "coffee");
        assert_eq!(rules[1].keyword, "shop");
        assert_eq!(rules[1].bucket, Bucket::Spend);
    }

    #[test]
    fn test_import_audit_log() {
        let (_dir, conn) = test_db();
        assert!(!import_seen(&conn, "deadbeef").unwrap());
        record_import(&conn, "stmt.csv", "chase", 10, 8, 2, "deadbeef").unwrap();
        assert!(import_seen(&conn, "deadbeef").unwrap());
    }
}
