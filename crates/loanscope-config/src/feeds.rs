//! Ticker to price-feed mapping used by the price lookup collaborator.

use crate::error::{Validate, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Price feed for one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFeed {
    /// Upper-case ticker.
    pub symbol: String,
    /// Identifier understood by the price source (e.g. an oracle feed id).
    pub feed_id: String,
}

impl PriceFeed {
    /// Creates a feed; the symbol is upper-cased.
    #[must_use]
    pub fn new(symbol: impl Into<String>, feed_id: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            feed_id: feed_id.into(),
        }
    }
}

/// Immutable set of price feeds plus symbol aliases.
///
/// An alias maps a wrapped or bridged ticker onto the ticker whose price it
/// tracks, e.g. `WETH -> ETH`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFeedRegistry {
    /// Registered feeds.
    #[serde(default)]
    pub feeds: Vec<PriceFeed>,

    /// Alias ticker to canonical ticker.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

impl PriceFeedRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a feed.
    #[must_use]
    pub fn with_feed(mut self, feed: PriceFeed) -> Self {
        self.feeds.push(feed);
        self
    }

    /// Adds an alias; both sides are upper-cased.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.aliases.insert(
            alias.into().to_uppercase(),
            canonical.into().to_uppercase(),
        );
        self
    }

    /// Ticker whose price should be used for `symbol`.
    #[must_use]
    pub fn canonical_symbol(&self, symbol: &str) -> String {
        let upper = symbol.to_uppercase();
        // aliases may have been deserialized without normalization
        self.aliases
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(&upper))
            .map_or(upper, |(_, canonical)| canonical.to_uppercase())
    }

    /// Feed id for `symbol`, resolving aliases first.
    #[must_use]
    pub fn feed_id(&self, symbol: &str) -> Option<&str> {
        let canonical = self.canonical_symbol(symbol);
        self.feeds
            .iter()
            .find(|f| f.symbol.eq_ignore_ascii_case(&canonical))
            .map(|f| f.feed_id.as_str())
    }

    /// All registered feeds.
    #[must_use]
    pub fn feeds(&self) -> &[PriceFeed] {
        &self.feeds
    }
}

impl Validate for PriceFeedRegistry {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for (i, feed) in self.feeds.iter().enumerate() {
            let field = format!("price_feeds.feeds[{i}]");
            if feed.symbol.trim().is_empty() {
                errors.push(ValidationError::new(&field, "symbol must not be empty"));
            } else if !seen.insert(feed.symbol.to_uppercase()) {
                errors.push(ValidationError::new(
                    &field,
                    format!("duplicate feed for '{}'", feed.symbol),
                ));
            }
            if feed.feed_id.trim().is_empty() {
                errors.push(ValidationError::new(&field, "feed_id must not be empty"));
            }
        }

        for (alias, canonical) in &self.aliases {
            if alias.eq_ignore_ascii_case(canonical) {
                errors.push(ValidationError::new(
                    format!("price_feeds.aliases.{alias}"),
                    "alias points at itself",
                ));
            }
        }

        errors
    }
}
