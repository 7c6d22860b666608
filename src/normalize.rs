use chrono::NaiveDate;

use crate::error::{PennyError, Result};
use crate::fingerprint::fingerprint;
use crate::models::{Bucket, RawAmount, RawRecord, TransactionRecord, UNCATEGORIZED};

/// Parse a money string to a signed value: strips `$`, `,` and quotes, and
/// reads a parenthesized amount as negative. Returns None when the remainder
/// is not numeric.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '"'))
        .collect();
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return inner.trim().parse::<f64>().ok().map(|v| -v);
    }
    s.parse().ok()
}

fn parse_mdy(raw: &str) -> Option<String> {
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    let m: u32 = parts[0].parse().ok()?;
    let d: u32 = parts[1].parse().ok()?;
    let y: i32 = parts[2].parse().ok()?;
    let y = if parts[2].len() == 2 { y + 2000 } else { y };
    NaiveDate::from_ymd_opt(y, m, d).map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// Convert date text to ISO calendar form. Accepted inputs: `M/D/YYYY`,
/// `M/D/YY`, `YYYY-MM-DD`, and the `Mon D, YYYY` form the statement parser
/// emits. Returns None for anything else; callers drop such rows.
pub fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Some(iso) = parse_mdy(raw) {
        return Some(iso);
    }
    for fmt in ["%Y-%m-%d", "%b %d, %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d.format("%Y-%m-%d").to_string());
        }
    }
    None
}

/// One row, normalized. Ok(None) means the date was unparseable (hard
/// filter, not an error); InvalidAmount means a dated row whose amount
/// would not coerce.
pub fn normalize_row(row: &RawRecord, source: &str) -> Result<Option<TransactionRecord>> {
    let Some(date) = normalize_date(&row.date_text) else {
        return Ok(None);
    };
    let amount = match &row.amount {
        RawAmount::Value(v) => *v,
        RawAmount::Text(t) => {
            parse_amount(t).ok_or_else(|| PennyError::InvalidAmount(t.clone()))?
        }
    };
    let name = row.name.trim().to_string();
    Ok(Some(TransactionRecord {
        id: fingerprint(&date, &name, amount),
        date,
        name,
        amount,
        category: UNCATEGORIZED.to_string(),
        bucket: Bucket::Spend,
        source: source.to_string(),
    }))
}

pub struct NormalizedBatch {
    pub records: Vec<TransactionRecord>,
    pub dropped: usize,
}

/// Normalize a whole extracted row set. Row-level failures are absorbed
/// here: undated rows and dated rows with uncoercible amounts are dropped
/// and counted, and the rest of the file goes through.
pub fn normalize(rows: Vec<RawRecord>, source: &str) -> NormalizedBatch {
    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in rows {
        match normalize_row(&row, source) {
            Ok(Some(rec)) => records.push(rec),
            Ok(None) => dropped += 1,
            Err(e) => {
                eprintln!("warning: dropping row {:?}: {e}", row.name);
                dropped += 1;
            }
        }
    }
    NormalizedBatch { records, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_row(date: &str, name: &str, amount: &str) -> RawRecord {
        RawRecord {
            date_text: date.to_string(),
            name: name.to_string(),
            amount: RawAmount::Text(amount.to_string()),
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,234.56"), Some(1234.56));
        assert_eq!(parse_amount("$1,234.56"), Some(1234.56));
        assert_eq!(parse_amount("\"500.00\""), Some(500.0));
        assert_eq!(parse_amount("  -42.50  "), Some(-42.5));
        assert_eq!(parse_amount("(12.34)"), Some(-12.34));
        assert_eq!(parse_amount("($1,000.00)"), Some(-1000.0));
        assert_eq!(parse_amount("0"), Some(0.0));
        assert_eq!(parse_amount("pending"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_normalize_date_forms() {
        assert_eq!(normalize_date("1/5/2024"), Some("2024-01-05".to_string()));
        assert_eq!(normalize_date("01/05/24"), Some("2024-01-05".to_string()));
        assert_eq!(normalize_date("2024-01-05"), Some("2024-01-05".to_string()));
        assert_eq!(normalize_date("Jan 5, 2024"), Some("2024-01-05".to_string()));
        assert_eq!(normalize_date("Dec 31, 2023"), Some("2023-12-31".to_string()));
    }

    #[test]
    fn test_normalize_date_rejects_invalid() {
        assert_eq!(normalize_date("13/01/2024"), None);
        assert_eq!(normalize_date("02/30/2024"), None);
        assert_eq!(normalize_date("BALANCE FORWARD"), None);
        assert_eq!(normalize_date(""), None);
    }

    #[test]
    fn test_normalize_row_fills_defaults() {
        let rec = normalize_row(&text_row("2024-01-05", "Coffee Shop", "-4.50"), "chase")
            .unwrap()
            .unwrap();
        assert_eq!(rec.date, "2024-01-05");
        assert_eq!(rec.name, "Coffee Shop");
        assert_eq!(rec.amount, -4.5);
        assert_eq!(rec.category, UNCATEGORIZED);
        assert_eq!(rec.bucket, Bucket::Spend);
        assert_eq!(rec.source, "chase");
        assert_eq!(rec.id, fingerprint("2024-01-05", "Coffee Shop", -4.5));
    }

    #[test]
    fn test_normalize_row_drops_bad_date() {
        let out = normalize_row(&text_row("not a date", "X", "1.00"), "chase").unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn test_normalize_row_invalid_amount_is_an_error() {
        let err = normalize_row(&text_row("2024-01-05", "X", "abc"), "chase").unwrap_err();
        assert!(matches!(err, PennyError::InvalidAmount(_)));
    }

    #[test]
    fn test_normalize_batch_absorbs_row_failures() {
        let rows = vec![
            text_row("2024-01-05", "GOOD", "-1.00"),
            text_row("garbage", "NO DATE", "-1.00"),
            text_row("2024-01-06", "BAD AMOUNT", "n/a"),
        ];
        let batch = normalize(rows, "chase");
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.dropped, 2);
        assert_eq!(batch.records[0].name, "GOOD");
    }
}
