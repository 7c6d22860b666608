use regex::Regex;

use crate::models::{RawAmount, RawRecord};

const MONTHS: &[&str] = &[
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Heuristic extractor for transaction lines in text pulled out of PDF
/// statements. A line is a transaction when it starts with a date token
/// (`M/D/YYYY`, `M/D/YY`, or `Mon D` with the year taken from context) and
/// its remainder ends in a well-formed money token. Page headers, balance
/// summaries and the like are skipped, never an error.
pub struct StatementParser {
    fallback_year: i32,
    slash_date: Regex,
    money: Regex,
}

impl StatementParser {
    pub fn new(fallback_year: i32) -> Self {
        Self {
            fallback_year,
            slash_date: Regex::new(r"^\d{1,2}/\d{1,2}/\d{2,4}$").unwrap(),
            money: Regex::new(r"^-?\d+\.\d{2}$").unwrap(),
        }
    }

    /// Lazily extract triples from one page of statement text. Pages carry
    /// no state across each other, so callers just chain the results.
    pub fn parse_page<'a>(&'a self, text: &'a str) -> impl Iterator<Item = RawRecord> + 'a {
        text.lines().filter_map(move |line| self.parse_line(line))
    }

    pub fn parse_pages<'a>(&'a self, pages: &'a [String]) -> impl Iterator<Item = RawRecord> + 'a {
        pages.iter().flat_map(|page| self.parse_page(page))
    }

    fn parse_line(&self, line: &str) -> Option<RawRecord> {
        let mut tokens = line.split_whitespace();
        let first = tokens.next()?;

        let date_text = if self.slash_date.is_match(first) {
            first.to_string()
        } else if MONTHS.contains(&first) {
            // Month-abbreviation dates carry no year; append the one
            // supplied from context before date parsing.
            let day = tokens.next()?;
            if day.len() > 2 || !day.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            format!("{first} {day}, {}", self.fallback_year)
        } else {
            return None;
        };

        let rest: Vec<&str> = tokens.collect();

        // The amount is the last well-formed money token on the line;
        // descriptions may themselves contain digits, so scan from the right.
        let (idx, amount) = rest
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, tok)| self.money_token(tok).map(|v| (i, v)))?;

        Some(RawRecord {
            date_text,
            name: rest[..idx].join(" "),
            amount: RawAmount::Value(amount),
        })
    }

    fn money_token(&self, token: &str) -> Option<f64> {
        let stripped: String = token
            .chars()
            .filter(|c| !matches!(c, '$' | ','))
            .collect();
        let stripped = match stripped
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
        {
            Some(inner) => format!("-{inner}"),
            None => stripped,
        };
        if self.money.is_match(&stripped) {
            stripped.parse().ok()
        } else {
            None
        }
    }
}

/// Pull a statement year out of a filename like `statement_jan_2024.txt`.
pub fn year_from_filename(name: &str) -> Option<i32> {
    name.split(|c: char| !c.is_ascii_digit())
        .filter(|tok| tok.len() == 4)
        .filter_map(|tok| tok.parse::<i32>().ok())
        .find(|y| (1990..=2099).contains(y))
}
