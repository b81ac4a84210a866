use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// The roster of known brand names, lowercased, in file order.
///
/// File order matters: the matcher scans brands in this order, so it decides
/// first-encounter order in the mention tally. The set is read-only after
/// loading.
#[derive(Debug, Clone, Default)]
pub struct KnownBrandSet {
    brands: Vec<String>,
}

impl KnownBrandSet {
    /// Build a brand set from raw names, lowercasing and trimming each.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` on empty names or case-insensitive
    /// duplicates.
    pub fn from_names<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut brands = Vec::new();
        let mut seen = HashSet::new();

        for name in names {
            let lower = name.as_ref().trim().to_lowercase();
            if lower.is_empty() {
                return Err(ConfigError::Validation(
                    "brand name must be non-empty".to_string(),
                ));
            }
            if !seen.insert(lower.clone()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate brand name: '{lower}'"
                )));
            }
            brands.push(lower);
        }

        Ok(Self { brands })
    }

    /// Iterate brand names in file order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.brands.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.brands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct BrandsFile {
    brands: Vec<String>,
}

/// Load and validate the known-brand roster from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_brands(path: &Path) -> Result<KnownBrandSet, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: BrandsFile = serde_yaml::from_str(&content)?;
    KnownBrandSet::from_names(&file.brands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_lowercased_in_file_order() {
        let set = KnownBrandSet::from_names(["Nike", "Calvin Klein", "H&M"]).unwrap();
        let names: Vec<&str> = set.iter().collect();
        assert_eq!(names, ["nike", "calvin klein", "h&m"]);
    }

    #[test]
    fn rejects_empty_name() {
        let err = KnownBrandSet::from_names(["nike", "  "]).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn rejects_case_insensitive_duplicate() {
        let err = KnownBrandSet::from_names(["Nike", "NIKE"]).unwrap_err();
        assert!(err.to_string().contains("duplicate brand name"));
    }

    #[test]
    fn empty_roster_is_valid() {
        let set = KnownBrandSet::from_names(Vec::<String>::new()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn parses_yaml_brands_file() {
        let file: BrandsFile = serde_yaml::from_str("brands:\n  - zara\n  - nike\n").unwrap();
        assert_eq!(file.brands, ["zara", "nike"]);
    }
}
