use crate::error::{PennyError, Result};
use crate::models::{RawAmount, RawRecord};
use crate::normalize::parse_amount;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Date,
    Name,
    Amount,
}

/// Per-institution mapping from a raw export layout to the canonical
/// `{date, name, amount}` field set. One descriptor per source; adding an
/// institution means adding a row to `REGISTRY`, nothing else changes.
pub struct SourceAdapter {
    pub key: &'static str,
    pub name: &'static str,
    /// normalized raw header -> canonical field
    aliases: &'static [(&'static str, Field)],
    /// debit/credit split columns; amount = credit - debit
    debit_credit: Option<(&'static str, &'static str)>,
    /// source reports charges as positive
    flip_sign: bool,
}

// The shared synonym table. Institution descriptors extend it with their
// own header quirks.
const BASE_ALIASES: &[(&str, Field)] = &[
    ("date", Field::Date),
    ("post date", Field::Date),
    ("posting date", Field::Date),
    ("transaction date", Field::Date),
    ("payment date", Field::Date),
    ("description", Field::Name),
    ("merchant", Field::Name),
    ("merchant name", Field::Name),
    ("amount", Field::Amount),
];

const BOFA_ALIASES: &[(&str, Field)] = &[
    ("date", Field::Date),
    ("posting date", Field::Date),
    ("description", Field::Name),
    ("payee", Field::Name),
    ("amount", Field::Amount),
];

const REGISTRY: &[SourceAdapter] = &[
    SourceAdapter {
        key: "chase",
        name: "Chase checking/credit CSV",
        aliases: BASE_ALIASES,
        debit_credit: None,
        flip_sign: false,
    },
    SourceAdapter {
        key: "bofa",
        name: "Bank of America CSV",
        aliases: BOFA_ALIASES,
        debit_credit: None,
        flip_sign: false,
    },
    SourceAdapter {
        key: "capitalone",
        name: "Capital One CSV (split debit/credit)",
        aliases: BASE_ALIASES,
        debit_credit: Some(("debit", "credit")),
        flip_sign: false,
    },
    SourceAdapter {
        key: "amex",
        name: "American Express CSV (charges positive)",
        aliases: BASE_ALIASES,
        debit_credit: None,
        flip_sign: true,
    },
    SourceAdapter {
        key: "generic",
        name: "Generic export with recognizable headers",
        aliases: BASE_ALIASES,
        debit_credit: Some(("debit", "credit")),
        flip_sign: false,
    },
];

pub fn get(key: &str) -> Option<&'static SourceAdapter> {
    REGISTRY.iter().find(|a| a.key == key)
}

pub fn all() -> &'static [SourceAdapter] {
    REGISTRY
}

/// Trim, lowercase, strip marker characters, collapse whitespace.
/// "Running Bal.*" and "running bal" alias to the same thing.
fn normalize_header(raw: &str) -> String {
    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '*' | '#' | ':' | '.'))
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn cell<'a>(row: &'a [String], idx: usize) -> &'a str {
    row.get(idx).map(|s| s.as_str()).unwrap_or("")
}

impl SourceAdapter {
    fn position(&self, headers: &[String], field: Field) -> Option<usize> {
        headers.iter().position(|h| {
            self.aliases
                .iter()
                .any(|(alias, f)| *f == field && alias == h)
        })
    }

    /// True when a raw CSV row looks like this adapter's header row. Bank
    /// exports often carry preamble (account metadata, balance summaries)
    /// above the real header.
    pub fn is_header_row(&self, row: &[String]) -> bool {
        let normalized: Vec<String> = row.iter().map(|c| normalize_header(c)).collect();
        self.position(&normalized, Field::Date).is_some()
            && self.position(&normalized, Field::Name).is_some()
    }

    /// Map a raw row set to canonical records, or fail the whole file when a
    /// required column cannot be located after aliasing.
    pub fn map_rows(&self, headers: &[String], rows: &[Vec<String>]) -> Result<Vec<RawRecord>> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

        let missing = |field: &'static str| PennyError::UnrecognizedSchema {
            missing: field,
            headers: headers.to_vec(),
        };

        let date_idx = self
            .position(&normalized, Field::Date)
            .ok_or_else(|| missing("date"))?;
        let name_idx = self
            .position(&normalized, Field::Name)
            .ok_or_else(|| missing("name"))?;

        let amount_idx = self.position(&normalized, Field::Amount);
        let split = self.debit_credit.map(|(debit, credit)| {
            (
                normalized.iter().position(|h| h == debit),
                normalized.iter().position(|h| h == credit),
            )
        });
        let has_split = matches!(split, Some((d, c)) if d.is_some() || c.is_some());
        if amount_idx.is_none() && !has_split {
            return Err(missing("amount"));
        }

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let date_text = cell(row, date_idx).trim().to_string();
            let name = cell(row, name_idx).trim().to_string();
            if date_text.is_empty() && name.is_empty() {
                continue;
            }
            let amount = match amount_idx {
                Some(i) if !self.flip_sign => RawAmount::Text(cell(row, i).to_string()),
                Some(i) => match parse_amount(cell(row, i)) {
                    // Charges come in positive; flip to the outflow-negative
                    // convention. Unparseable cells stay textual so the
                    // normalizer reports them.
                    Some(v) => RawAmount::Value(-v),
                    None => RawAmount::Text(cell(row, i).to_string()),
                },
                None => {
                    let (debit_idx, credit_idx) = split.unwrap_or((None, None));
                    let debit = debit_idx
                        .and_then(|i| parse_amount(cell(row, i)))
                        .unwrap_or(0.0);
                    let credit = credit_idx
                        .and_then(|i| parse_amount(cell(row, i)))
                        .unwrap_or(0.0);
                    RawAmount::Value(credit - debit)
                }
            };
            out.push(RawRecord {
                date_text,
                name,
                amount,
            });
        }
        Ok(out)
    }
}
