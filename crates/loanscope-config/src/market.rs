//! Registry of lending markets and their candidate data endpoints.

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One lending market deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Market tag carried on raw reserve records (e.g. `aave-v3-ethereum`).
    pub id: String,

    /// Human-readable market name.
    pub name: String,

    /// Candidate endpoints, tried in order until one succeeds.
    #[serde(default)]
    pub endpoints: Vec<String>,
}

impl MarketConfig {
    /// Creates a market with no endpoints.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            endpoints: Vec::new(),
        }
    }

    /// Appends a candidate endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoints.push(endpoint.into());
        self
    }
}

/// Ordered, immutable set of markets.
///
/// Iteration order is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketRegistry {
    markets: Vec<MarketConfig>,
}

impl MarketRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a market.
    #[must_use]
    pub fn with_market(mut self, market: MarketConfig) -> Self {
        self.markets.push(market);
        self
    }

    /// Looks up a market by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MarketConfig> {
        self.markets.iter().find(|m| m.id == id)
    }

    /// Looks up a market by id, failing if it is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if no market has this id.
    pub fn require(&self, id: &str) -> ConfigResult<&MarketConfig> {
        self.get(id).ok_or_else(|| ConfigError::NotFound {
            key: format!("market.{id}"),
        })
    }

    /// Display name for a market tag, or the tag itself if unregistered.
    #[must_use]
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map_or(id, |m| m.name.as_str())
    }

    /// Iterates over markets in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &MarketConfig> {
        self.markets.iter()
    }

    /// Number of markets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markets.len()
    }

    /// Returns true if no markets are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }
}

impl Validate for MarketRegistry {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for (i, market) in self.markets.iter().enumerate() {
            let field = format!("markets[{i}]");
            if market.id.trim().is_empty() {
                errors.push(ValidationError::new(&field, "id must not be empty"));
            } else if !seen.insert(market.id.as_str()) {
                errors.push(ValidationError::new(
                    &field,
                    format!("duplicate market id '{}'", market.id),
                ));
            }
            if market.endpoints.is_empty() {
                errors.push(ValidationError::new(
                    &field,
                    format!("market '{}' has no endpoints", market.id),
                ));
            }
        }

        errors
    }
}
