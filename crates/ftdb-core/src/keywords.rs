use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// The candidate keyword list for a trend-analysis run, in file order.
///
/// Input order is significant: ranking ties are broken by it.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordsFile {
    pub keywords: Vec<String>,
}

/// Load and validate the keyword list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed, or if any
/// keyword is blank.
pub fn load_keywords(path: &Path) -> Result<KeywordsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: KeywordsFile = serde_yaml::from_str(&content)?;

    for keyword in &file.keywords {
        if keyword.trim().is_empty() {
            return Err(ConfigError::Validation(
                "keyword must be non-empty".to_string(),
            ));
        }
    }

    Ok(file)
}
