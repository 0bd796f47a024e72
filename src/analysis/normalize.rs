//! Term normalization.
//!
//! Every brand and adjective comparison in the engine happens on the
//! normalized form produced here.

/// Canonical form of a brand or adjective: lower-cased.
pub fn normalize(term: &str) -> String {
    term.to_lowercase()
}

/// Canonical form of a user-supplied query term: trimmed, then lower-cased.
pub fn normalize_query(term: &str) -> String {
    normalize(term.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize("Nike"), "nike");
        assert_eq!(normalize("UNDER Armour"), "under armour");
        assert_eq!(normalize("already"), "already");
    }

    #[test]
    fn test_normalize_keeps_whitespace() {
        assert_eq!(normalize("  Bold "), "  bold ");
    }

    #[test]
    fn test_normalize_query_trims() {
        assert_eq!(normalize_query("  New Balance \n"), "new balance");
        assert_eq!(normalize_query("   "), "");
    }
}
