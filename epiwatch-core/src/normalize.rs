//! Raw country identity to canonical key.
//!
//! Normalization is exact-match-after-folding only: providers that spell the
//! same country under genuinely different names (aliases, historical names)
//! remain distinct keys. Resolving that would require an explicit alias
//! table, which is out of scope.

use crate::CountryKey;

impl CountryKey {
    /// Normalize a raw provider identity into the canonical country key.
    ///
    /// Total function: trims, case-folds, collapses internal whitespace runs,
    /// and strips trailing annotation punctuation (`"Taiwan*"`). Input that
    /// normalizes to nothing maps to the [`CountryKey::unknown`] sentinel so
    /// one bad record cannot abort the pipeline.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let mut key = String::with_capacity(raw.len());
        let mut pending_space = false;
        for ch in raw.trim().chars() {
            if ch.is_whitespace() {
                pending_space = !key.is_empty();
                continue;
            }
            if pending_space {
                key.push(' ');
                pending_space = false;
            }
            for folded in ch.to_lowercase() {
                key.push(folded);
            }
        }
        while key.ends_with(['*', '.', ' ']) {
            key.pop();
        }
        if key.is_empty() {
            return Self::unknown();
        }
        Self(key)
    }
}
