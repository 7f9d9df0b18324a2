//! Process-wide signature cache
//!
//! Signatures are pure functions of their string, so one parse per distinct string is
//! shared by every macro occurrence and every document.

use super::parser::parse_signature_uncached;
use super::spec::Signature;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

static CACHE: Lazy<RwLock<HashMap<String, Arc<Signature>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Parse a signature, reusing a previous parse of the same string.
///
/// Unknown characters are logged once, when the string is first parsed.
pub fn parse_signature(input: &str) -> Arc<Signature> {
    if let Some(hit) = CACHE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(input)
    {
        return Arc::clone(hit);
    }

    let parsed = Arc::new(parse_signature_uncached(input));
    for diagnostic in &parsed.diagnostics {
        tracing::warn!(
            signature = input,
            offset = diagnostic.offset,
            found = %diagnostic.found,
            "skipping unknown character in argument signature"
        );
    }

    let mut cache = CACHE.write().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(cache.entry(input.to_string()).or_insert(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_string_shares_parse() {
        let first = parse_signature("o m o !o m");
        let second = parse_signature("o m o !o m");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 5);
        assert!(CACHE
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key("o m o !o m"));
    }
}
