//! Whole-word brand-name matching over free text.

use regex::{Regex, RegexBuilder};

use ftdb_core::KnownBrandSet;

use crate::error::AnalysisError;

/// A brand found in one piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandHit {
    /// Canonical (title-cased) brand name.
    pub brand: String,
    /// Non-overlapping whole-word occurrences in the text.
    pub count: u64,
}

/// Compiled matcher for a known-brand roster.
///
/// Each brand gets a case-insensitive, word-boundary-anchored pattern, so
/// "nike" matches "Nike shoes" but not "niketown". Brands are scanned in
/// roster order, which fixes first-encounter order in the tally.
#[derive(Debug)]
pub struct BrandMatcher {
    patterns: Vec<(String, Regex)>,
}

impl BrandMatcher {
    /// Compile patterns for every brand in the roster.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::BrandPattern`] if a brand name produces an
    /// uncompilable pattern. This is the matcher's only fallible path;
    /// matching itself never fails.
    pub fn new(brands: &KnownBrandSet) -> Result<Self, AnalysisError> {
        let mut patterns = Vec::with_capacity(brands.len());
        for brand in brands.iter() {
            let pattern = format!(r"\b{}\b", regex::escape(brand));
            let regex = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| AnalysisError::BrandPattern {
                    brand: brand.to_string(),
                    source,
                })?;
            patterns.push((title_case(brand), regex));
        }
        Ok(Self { patterns })
    }

    /// Count occurrences of every known brand in `text`.
    ///
    /// Returns only brands with at least one hit, in roster order.
    #[must_use]
    pub fn find_in_text(&self, text: &str) -> Vec<BrandHit> {
        let mut hits = Vec::new();
        for (canonical, regex) in &self.patterns {
            let count = u64::try_from(regex.find_iter(text).count()).unwrap_or(u64::MAX);
            if count > 0 {
                hits.push(BrandHit {
                    brand: canonical.clone(),
                    count,
                });
            }
        }
        hits
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Title-case a lowercase brand name.
///
/// Uppercases every letter that follows a non-letter, except after an
/// apostrophe: "calvin klein" -> "Calvin Klein", "h&m" -> "H&M", but
/// "levi's" -> "Levi's" rather than "Levi'S".
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev: Option<char> = None;
    for c in name.chars() {
        let at_word_start = match prev {
            None => true,
            Some('\'') => false,
            Some(p) => !p.is_alphabetic(),
        };
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}
