use sha2::{Digest, Sha256};

/// Stable identity for a transaction: SHA-256 over the canonical
/// `date|name|amount` form, hex-encoded.
///
/// Identical triples always collide to the same id, which is what makes
/// re-importing a statement a no-op. Two genuinely distinct transactions
/// sharing date, description and amount collapse to one record; that
/// approximation is deliberate.
pub fn fingerprint(date: &str, name: &str, amount: f64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{date}|{name}|{amount:.2}").as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_deterministic() {
        let a = fingerprint("2024-01-05", "Coffee Shop", -4.5);
        let b = fingerprint("2024-01-05", "Coffee Shop", -4.5);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_fingerprint_canonicalizes_amount_precision() {
        // -4.5 and -4.50 are the same money value, so the same record.
        assert_eq!(
            fingerprint("2024-01-05", "Coffee Shop", -4.5),
            fingerprint("2024-01-05", "Coffee Shop", -4.50),
        );
    }

    #[test]
    fn test_fingerprint_sensitive_to_each_field() {
        let base = fingerprint("2024-01-05", "Coffee Shop", -4.5);
        assert_ne!(base, fingerprint("2024-01-06", "Coffee Shop", -4.5));
        assert_ne!(base, fingerprint("2024-01-05", "Coffee Shop ", -4.5));
        assert_ne!(base, fingerprint("2024-01-05", "Coffee Shop", 4.5));
    }
}
