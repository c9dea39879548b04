//! Top-level configuration document and file loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use crate::feeds::PriceFeedRegistry;
use crate::market::MarketRegistry;
use crate::thresholds::RiskThresholds;

/// Complete Loanscope configuration.
///
/// # Example
///
/// ```rust
/// use loanscope_config::LoanscopeConfig;
///
/// let config = LoanscopeConfig::from_toml_str(r#"
///     [[markets]]
///     id = "aave-v3-ethereum"
///     name = "Aave V3 Ethereum"
///     endpoints = ["https://primary.example/graphql"]
///
///     [price_feeds]
///     feeds = [{ symbol = "ETH", feed_id = "0xff61" }]
///     aliases = { WETH = "ETH" }
/// "#).unwrap();
///
/// assert_eq!(config.markets.display_name("aave-v3-ethereum"), "Aave V3 Ethereum");
/// assert_eq!(config.price_feeds.feed_id("WETH"), Some("0xff61"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanscopeConfig {
    /// Lending markets.
    #[serde(default)]
    pub markets: MarketRegistry,

    /// Price feeds and aliases.
    #[serde(default)]
    pub price_feeds: PriceFeedRegistry,

    /// Advisory thresholds.
    #[serde(default)]
    pub thresholds: RiskThresholds,
}

impl LoanscopeConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or fails validation.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or fails validation.
    pub fn from_json_str(source: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads a `.toml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unsupported
    /// extension, is malformed, or fails validation.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let source = std::fs::read_to_string(path)?;
        match extension.as_str() {
            "toml" => Self::from_toml_str(&source),
            "json" => Self::from_json_str(&source),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl Validate for LoanscopeConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = self.markets.validate();
        errors.extend(self.price_feeds.validate());
        errors.extend(self.thresholds.validate());
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TOML: &str = r#"
        [[markets]]
        id = "aave-v3-ethereum"
        name = "Aave V3 Ethereum"
        endpoints = ["https://a.example", "https://b.example"]

        [[markets]]
        id = "aave-v3-arbitrum"
        name = "Aave V3 Arbitrum"
        endpoints = ["https://c.example"]

        [price_feeds]
        feeds = [
            { symbol = "ETH", feed_id = "0xff61" },
            { symbol = "USDC", feed_id = "0xeaa0" },
        ]

        [price_feeds.aliases]
        WETH = "ETH"

        [thresholds]
        alert_health_factor = 1.8
    "#;

    #[test]
    fn test_from_toml() {
        let config = LoanscopeConfig::from_toml_str(TOML).unwrap();
        assert_eq!(config.markets.len(), 2);
        assert_eq!(config.price_feeds.canonical_symbol("weth"), "ETH");
        assert_eq!(config.thresholds.alert_health_factor, 1.8);
        // unspecified thresholds keep their defaults
        assert_eq!(config.thresholds.danger_health_factor, 1.1);
    }

    #[test]
    fn test_from_json_roundtrip() {
        let config = LoanscopeConfig::from_toml_str(TOML).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = LoanscopeConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = LoanscopeConfig::from_toml_str("").unwrap();
        assert!(config.markets.is_empty());
        assert_eq!(config.thresholds, RiskThresholds::default());
    }

    #[test]
    fn test_validation_failure() {
        let result = LoanscopeConfig::from_toml_str(
            r#"
            [[markets]]
            id = "m"
            name = "no endpoints"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_malformed() {
        let result = LoanscopeConfig::from_toml_str("markets = 3");
        assert!(matches!(result, Err(ConfigError::Deserialization(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(TOML.as_bytes()).unwrap();
        let config = LoanscopeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.markets.len(), 2);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            LoanscopeConfig::from_file(file.path()),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            LoanscopeConfig::from_file("/definitely/not/here.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
