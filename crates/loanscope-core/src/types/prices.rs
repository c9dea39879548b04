//! Symbol to USD price lookup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from upper-case ticker to current USD price.
///
/// Keys are upper-cased on insertion and on lookup. An absent, negative or
/// non-finite price reads as `0.0`: a missing quote is a data-quality issue
/// for the presentation layer, never an error here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, f64>", into = "HashMap<String, f64>")]
pub struct PriceMap {
    prices: HashMap<String, f64>,
}

impl PriceMap {
    /// Creates an empty price map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the price for `symbol`.
    pub fn insert(&mut self, symbol: impl AsRef<str>, price: f64) {
        self.prices.insert(symbol.as_ref().to_uppercase(), price);
    }

    /// Builder-style variant of [`insert`](Self::insert).
    #[must_use]
    pub fn with_price(mut self, symbol: impl AsRef<str>, price: f64) -> Self {
        self.insert(symbol, price);
        self
    }

    /// Returns the usable price for `symbol`, if any.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.prices
            .get(&symbol.to_uppercase())
            .copied()
            .filter(|p| p.is_finite() && *p >= 0.0)
    }

    /// Returns the price for `symbol`, or `0.0` if there is none.
    #[must_use]
    pub fn price_of(&self, symbol: &str) -> f64 {
        self.get(symbol).unwrap_or(0.0)
    }

    /// Returns the symbols from `symbols` that have no usable price.
    ///
    /// Output is upper-cased and deduplicated, in first-seen order.
    #[must_use]
    pub fn missing<'a>(&self, symbols: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for symbol in symbols {
            let key = symbol.to_uppercase();
            if self.get(&key).is_none() && !missing.contains(&key) {
                missing.push(key);
            }
        }
        missing
    }

    /// Number of symbols with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Iterates over `(symbol, price)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.prices.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl From<HashMap<String, f64>> for PriceMap {
    fn from(raw: HashMap<String, f64>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<PriceMap> for HashMap<String, f64> {
    fn from(map: PriceMap) -> Self {
        map.prices
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for PriceMap {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (symbol, price) in iter {
            map.insert(symbol, price);
        }
        map
    }
}
