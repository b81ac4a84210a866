use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Trend-indicator words, split into two signal classes.
///
/// Strong indicators (current-year markers, "viral", "trending", ...) push a
/// keyword toward the upward-trend statuses; moderate ones (prior-year
/// markers, "moda", "popular") only support the stable-with-potential status.
/// Words are stored lowercase; matching is done against lowercased text.
///
/// Empty sets are a valid, degenerate configuration: no indicators are ever
/// found and scores come from result counts and structured sections alone.
#[derive(Debug, Clone, Default)]
pub struct TrendLexicon {
    strong: BTreeSet<String>,
    moderate: BTreeSet<String>,
}

impl TrendLexicon {
    /// Build a lexicon from raw word lists, lowercasing and trimming each.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any word is empty after trimming.
    pub fn from_words<I, J, S>(strong: I, moderate: J) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            strong: normalize_words(strong)?,
            moderate: normalize_words(moderate)?,
        })
    }

    /// All indicator words, strong and moderate, in lexicographic order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.strong
            .iter()
            .chain(self.moderate.iter())
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_strong(&self, word: &str) -> bool {
        self.strong.contains(word)
    }

    #[must_use]
    pub fn is_moderate(&self, word: &str) -> bool {
        self.moderate.contains(word)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strong.is_empty() && self.moderate.is_empty()
    }
}

fn normalize_words<I, S>(words: I) -> Result<BTreeSet<String>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = BTreeSet::new();
    for word in words {
        let lower = word.as_ref().trim().to_lowercase();
        if lower.is_empty() {
            return Err(ConfigError::Validation(
                "lexicon word must be non-empty".to_string(),
            ));
        }
        set.insert(lower);
    }
    Ok(set)
}

#[derive(Debug, Deserialize)]
struct LexiconFile {
    strong: Vec<String>,
    moderate: Vec<String>,
}

/// Load the trend lexicon from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or contains
/// empty words.
pub fn load_lexicon(path: &Path) -> Result<TrendLexicon, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: LexiconFile = serde_yaml::from_str(&content)?;
    TrendLexicon::from_words(&file.strong, &file.moderate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_strong_and_moderate() {
        let lexicon = TrendLexicon::from_words(["Viral", "2025"], ["moda"]).unwrap();
        assert!(lexicon.is_strong("viral"));
        assert!(lexicon.is_strong("2025"));
        assert!(lexicon.is_moderate("moda"));
        assert!(!lexicon.is_strong("moda"));
        assert!(!lexicon.is_moderate("viral"));
    }

    #[test]
    fn words_covers_both_classes() {
        let lexicon = TrendLexicon::from_words(["viral"], ["moda", "popular"]).unwrap();
        let words: Vec<&str> = lexicon.words().collect();
        assert_eq!(words, ["viral", "moda", "popular"]);
    }

    #[test]
    fn empty_lexicon_is_valid() {
        let lexicon =
            TrendLexicon::from_words(Vec::<String>::new(), Vec::<String>::new()).unwrap();
        assert!(lexicon.is_empty());
        assert_eq!(lexicon.words().count(), 0);
    }

    #[test]
    fn rejects_blank_word() {
        let err = TrendLexicon::from_words(["viral", " "], []).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn parses_yaml_lexicon_file() {
        let yaml = "strong:\n  - viral\nmoderate:\n  - moda\n";
        let file: LexiconFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.strong, ["viral"]);
        assert_eq!(file.moderate, ["moda"]);
    }
}
