use crate::error::PennyError;

/// Category value a record carries until a rule or a manual edit claims it.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Coarse budget bucket. TRANSFER is ignored in budget math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Spend,
    Bill,
    Income,
    Transfer,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spend => "SPEND",
            Self::Bill => "BILL",
            Self::Income => "INCOME",
            Self::Transfer => "TRANSFER",
        }
    }

    pub fn parse(raw: &str) -> Result<Bucket, PennyError> {
        match raw.trim().to_uppercase().as_str() {
            "SPEND" => Ok(Self::Spend),
            "BILL" => Ok(Self::Bill),
            "INCOME" => Ok(Self::Income),
            "TRANSFER" => Ok(Self::Transfer),
            _ => Err(PennyError::UnknownBucket(raw.to_string())),
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical record as persisted. `id` is the content fingerprint over
/// (date, name, amount), so an identical triple is always the same row.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub id: String,
    pub date: String,
    pub name: String,
    pub amount: f64,
    pub category: String,
    pub bucket: Bucket,
    pub source: String,
}

/// Keyword classification rule. Applied in insertion order.
#[derive(Debug, Clone)]
pub struct Rule {
    pub keyword: String,
    pub category: String,
    pub bucket: Bucket,
}

/// Amount as produced by an adapter or the statement parser. Adapters that
/// pass a raw cell through leave it textual; derived and parsed amounts are
/// already numeric.
#[derive(Debug, Clone, PartialEq)]
pub enum RawAmount {
    Text(String),
    Value(f64),
}

/// Intermediate row between extraction and normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub date_text: String,
    pub name: String,
    pub amount: RawAmount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_parse() {
        assert_eq!(Bucket::parse("SPEND").unwrap(), Bucket::Spend);
        assert_eq!(Bucket::parse("bill").unwrap(), Bucket::Bill);
        assert_eq!(Bucket::parse(" Income ").unwrap(), Bucket::Income);
        assert_eq!(Bucket::parse("TRANSFER").unwrap(), Bucket::Transfer);
        assert!(Bucket::parse("SAVINGS").is_err());
    }

    #[test]
    fn test_bucket_round_trip() {
        for b in [Bucket::Spend, Bucket::Bill, Bucket::Income, Bucket::Transfer] {
            assert_eq!(Bucket::parse(b.as_str()).unwrap(), b);
        }
    }
}
