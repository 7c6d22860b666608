use rusqlite::Connection;

use crate::error::Result;

/// Bucket totals for one calendar month. Income counts positive INCOME
/// rows; bills and spending count negative rows only; TRANSFER stays out
/// of budget math entirely.
pub struct MonthlySummary {
    pub income: f64,
    pub bills: f64,
    pub spending: f64,
    pub net_saved: f64,
}

pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: i64,
}

fn bucket_total(conn: &Connection, month: &str, bucket: &str, inflow: bool) -> Result<f64> {
    let cmp = if inflow { "> 0" } else { "< 0" };
    let sql = format!(
        "SELECT coalesce(sum(amount), 0) FROM transactions \
         WHERE bucket = ?1 AND date LIKE ?2 || '-%' AND amount {cmp}"
    );
    let total: f64 = conn.query_row(&sql, rusqlite::params![bucket, month], |r| r.get(0))?;
    Ok(total)
}

/// `month` is `YYYY-MM`.
pub fn monthly_summary(conn: &Connection, month: &str) -> Result<MonthlySummary> {
    let income = bucket_total(conn, month, "INCOME", true)?;
    let bills = bucket_total(conn, month, "BILL", false)?;
    let spending = bucket_total(conn, month, "SPEND", false)?;
    Ok(MonthlySummary {
        income,
        bills,
        spending,
        net_saved: income + bills + spending,
    })
}

/// Per-category outflow totals for one bucket in one month, largest first.
pub fn category_totals(conn: &Connection, month: &str, bucket: &str) -> Result<Vec<CategoryTotal>> {
    let cmp = if bucket == "INCOME" { "> 0" } else { "< 0" };
    let sql = format!(
        "SELECT category, sum(abs(amount)) as total, count(*) FROM transactions \
         WHERE bucket = ?1 AND date LIKE ?2 || '-%' AND amount {cmp} \
         GROUP BY category ORDER BY total DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params![bucket, month], |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                total: row.get(1)?,
                count: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    fn add(conn: &Connection, id: &str, date: &str, amount: f64, category: &str, bucket: &str) {
        conn.execute(
            "INSERT INTO transactions (id, date, name, amount, category, bucket, source) \
             VALUES (?1, ?2, 'X', ?3, ?4, ?5, 'chase')",
            rusqlite::params![id, date, amount, category, bucket],
        )
        .unwrap();
    }

    #[test]
    fn test_monthly_summary_math() {
        let (_dir, conn) = test_db();
        add(&conn, "a", "2024-01-05", 2000.0, "Paycheck", "INCOME");
        add(&conn, "b", "2024-01-06", -900.0, "Rent", "BILL");
        add(&conn, "c", "2024-01-07", -150.0, "Groceries", "SPEND");
        add(&conn, "d", "2024-01-08", -50.0, "Eating Out", "SPEND");
        // Ignored: transfers and other months.
        add(&conn, "e", "2024-01-09", -500.0, "Transfer", "TRANSFER");
        add(&conn, "f", "2024-02-05", -75.0, "Groceries", "SPEND");

        let summary = monthly_summary(&conn, "2024-01").unwrap();
        assert_eq!(summary.income, 2000.0);
        assert_eq!(summary.bills, -900.0);
        assert_eq!(summary.spending, -200.0);
        assert_eq!(summary.net_saved, 900.0);
    }

    #[test]
    fn test_monthly_summary_sign_filters() {
        let (_dir, conn) = test_db();
        // A refund in SPEND is positive and stays out of the spending total.
        add(&conn, "a", "2024-01-05", 25.0, "Groceries", "SPEND");
        add(&conn, "b", "2024-01-06", -100.0, "Groceries", "SPEND");

        let summary = monthly_summary(&conn, "2024-01").unwrap();
        assert_eq!(summary.spending, -100.0);
    }

    #[test]
    fn test_category_totals_sorted_desc() {
        let (_dir, conn) = test_db();
        add(&conn, "a", "2024-01-05", -150.0, "Groceries", "SPEND");
        add(&conn, "b", "2024-01-06", -50.0, "Eating Out", "SPEND");
        add(&conn, "c", "2024-01-07", -60.0, "Groceries", "SPEND");

        let totals = category_totals(&conn, "2024-01", "SPEND").unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].category, "Groceries");
        assert_eq!(totals[0].total, 210.0);
        assert_eq!(totals[0].count, 2);
        assert_eq!(totals[1].category, "Eating Out");
    }

    #[test]
    fn test_empty_month_is_all_zeros() {
        let (_dir, conn) = test_db();
        let summary = monthly_summary(&conn, "2024-03").unwrap();
        assert_eq!(summary.income, 0.0);
        assert_eq!(summary.net_saved, 0.0);
    }
}
