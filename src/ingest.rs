use std::io::BufReader;
use std::path::Path;

use chrono::Datelike;
use rusqlite::Connection;
use sha2::{Digest, Sha256};

use crate::adapter::{self, SourceAdapter};
use crate::error::{PennyError, Result};
use crate::models::RawRecord;
use crate::normalize;
use crate::statement::{year_from_filename, StatementParser};
use crate::store;

#[derive(Debug)]
pub struct IngestResult {
    pub inserted: usize,
    pub skipped: usize,
    pub duplicate_file: bool,
}

fn compute_checksum(file_path: &Path) -> Result<String> {
    let data = std::fs::read(file_path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

fn file_name(file_path: &Path) -> &str {
    file_path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}

/// Ingest one uploaded file: extract rows (tabular adapter for CSV,
/// statement text parser for everything else), normalize, and insert with
/// at-most-once semantics. Re-ingesting a byte-identical file is caught by
/// the import log checksum and short-circuits; overlapping files fall back
/// to row-level fingerprint dedup.
pub fn ingest_file(
    conn: &Connection,
    file_path: &Path,
    source: &str,
    year: Option<i32>,
) -> Result<IngestResult> {
    let checksum = compute_checksum(file_path)?;
    if store::import_seen(conn, &checksum)? {
        return Ok(IngestResult {
            inserted: 0,
            skipped: 0,
            duplicate_file: true,
        });
    }

    let is_csv = file_path
        .extension()
        .map_or(false, |e| e.eq_ignore_ascii_case("csv"));
    let raw = if is_csv {
        let adapter =
            adapter::get(source).ok_or_else(|| PennyError::UnknownSource(source.to_string()))?;
        read_tabular(file_path, adapter)?
    } else {
        read_statement(file_path, year)?
    };

    let record_count = raw.len();
    let batch = normalize::normalize(raw, source);

    let mut inserted = 0usize;
    let mut skipped = batch.dropped;
    for rec in &batch.records {
        if store::insert_if_absent(conn, rec)? {
            inserted += 1;
        } else {
            skipped += 1;
        }
    }

    store::record_import(
        conn,
        file_name(file_path),
        source,
        record_count,
        inserted,
        skipped,
        &checksum,
    )?;

    Ok(IngestResult {
        inserted,
        skipped,
        duplicate_file: false,
    })
}

/// Read a CSV export, locating the adapter's header row below any preamble
/// the bank prepends (account metadata, balance summaries).
fn read_tabular(file_path: &Path, adapter: &SourceAdapter) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(file_path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut headers: Option<Vec<String>> = None;
    let mut first_row: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let cells: Vec<String> = record.iter().map(|f| f.to_string()).collect();
        if cells.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        if headers.is_none() {
            if first_row.is_none() {
                first_row = Some(cells.clone());
            }
            if adapter.is_header_row(&cells) {
                headers = Some(cells);
            }
            continue;
        }
        rows.push(cells);
    }

    // No header row found: report whatever came first so the caller can see
    // what the file actually contained.
    let headers = headers.or(first_row).unwrap_or_default();
    adapter.map_rows(&headers, &rows)
}

/// Read extracted statement text. Pages are form-feed separated (the
/// pdftotext convention) and processed independently.
fn read_statement(file_path: &Path, year: Option<i32>) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(file_path)?;
    let fallback_year = year
        .or_else(|| year_from_filename(file_name(file_path)))
        .unwrap_or_else(|| chrono::Local::now().year());

    let parser = StatementParser::new(fallback_year);
    let pages: Vec<String> = text.split('\u{0c}').map(|p| p.to_string()).collect();
    Ok(parser.parse_pages(&pages).collect())
}
