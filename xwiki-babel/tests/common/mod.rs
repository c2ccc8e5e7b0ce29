//! Shared helpers for the integration tests.

use std::fs;
use std::path::PathBuf;

/// Read a file from `tests/fixtures`.
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// Number of non-overlapping occurrences of `needle`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Whether any character of the protected-span alphabet leaked into `text`.
pub fn has_stash_tokens(text: &str) -> bool {
    text.chars().any(|c| ('\u{E000}'..='\u{E0FF}').contains(&c))
}
