// src/config.rs
//! Sweep settings file: filter toggles, ordering and crawler limits

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::classify::FilterOptions;
use crate::discovery::DiscoveryOptions;
use crate::pipeline::SortOptions;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub filters: FilterOptions,
    pub sort: SortOptions,
    pub discovery: DiscoveryOptions,
}

impl SweepConfig {
    /// Format follows the extension: `.yaml`/`.yml` or `.toml`
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let config = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml(&raw),
            "toml" => Self::from_toml(&raw),
            other => bail!(
                "Unsupported config format '{}' for {} (use .yaml, .yml or .toml)",
                other,
                path.display()
            ),
        }
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

        info!("Loaded sweep config from {}", path.display());
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw).context("Failed to parse YAML")
    }

    fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("Failed to parse TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::MissingDatePolicy;
    use std::io::Write;
    use tempfile::Builder;

    fn write_config(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_yaml_partial_overrides_keep_defaults() {
        let file = write_config(
            ".yaml",
            "filters:\n  us_only: false\n  extra_agencies: [Acme Staffing]\nsort:\n  missing_dates: oldest\n",
        );
        let config = SweepConfig::load(file.path()).unwrap();
        assert!(!config.filters.us_only);
        assert!(config.filters.exclude_agencies);
        assert_eq!(config.filters.extra_agencies, vec!["Acme Staffing".to_string()]);
        assert_eq!(config.sort.missing_dates, MissingDatePolicy::Oldest);
        assert_eq!(config.discovery.per_domain_cap, 3);
    }

    #[test]
    fn test_toml_discovery_section() {
        let file = write_config(
            ".toml",
            "[discovery]\nper_query = 4\npause_ms = 0\nblocked_domains = [\"example.com\"]\n",
        );
        let config = SweepConfig::load(file.path()).unwrap();
        assert_eq!(config.discovery.per_query, 4);
        assert_eq!(config.discovery.pause_ms, 0);
        assert_eq!(config.discovery.blocked_domains, vec!["example.com".to_string()]);
        assert_eq!(config.discovery.timeout_secs, 20);
        assert!(config.filters.us_only);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let file = write_config(".yml", "");
        let config = SweepConfig::load(file.path()).unwrap();
        assert_eq!(config.sort.missing_dates, MissingDatePolicy::Now);
    }

    #[test]
    fn test_unknown_extension_and_missing_file_fail() {
        let file = write_config(".ini", "us_only=false");
        assert!(SweepConfig::load(file.path()).is_err());
        assert!(SweepConfig::load(Path::new("/nonexistent/sweep.yaml")).is_err());
        assert!(SweepConfig::load_or_default(None).is_ok());
    }
}
