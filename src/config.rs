use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

const DEFAULT_SPLICE_SITE_LENGTH: i64 = 2;

fn default_splice_site_length() -> i64 {
    DEFAULT_SPLICE_SITE_LENGTH
}

/// Annotator settings read from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnnotatorConfig {
    /// Bases upstream of a transcript reported as promoter; 0 disables it.
    #[serde(default)]
    pub promoter_len: i64,
    /// Intronic bases next to each exon edge that count as splice site.
    #[serde(default = "default_splice_site_length")]
    pub splice_site_length: i64,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            promoter_len: 0,
            splice_site_length: DEFAULT_SPLICE_SITE_LENGTH,
        }
    }
}

impl AnnotatorConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.promoter_len < 0 {
            bail!(
                "invalid promoterLen: expected a non-negative length, got {}",
                self.promoter_len
            );
        }
        if self.splice_site_length < 1 {
            bail!(
                "invalid spliceSiteLength: expected at least 1, got {}",
                self.splice_site_length
            );
        }
        Ok(())
    }
}
