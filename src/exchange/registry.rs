//! Registry of the two monitored exchanges.

use crate::config::Config;

use super::endpoint::{AssetPair, BookFormat, Endpoint};

/// Name of the flat-format exchange.
pub const BITBAY: &str = "BITBAY";
/// Name of the nested-format exchange.
pub const BITTREX: &str = "BITTREX";

/// Immutable set of exchange endpoints plus the pair they are queried for.
///
/// Built once at startup and shared by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    /// First exchange in every comparison ("A").
    pub primary: Endpoint,
    /// Second exchange in every comparison ("B").
    pub secondary: Endpoint,
    /// Monitored asset pair.
    pub pair: AssetPair,
}

impl Registry {
    /// Create a registry from explicit endpoints.
    pub fn new(primary: Endpoint, secondary: Endpoint, pair: AssetPair) -> Self {
        Self {
            primary,
            secondary,
            pair,
        }
    }

    /// Build the BITBAY/BITTREX registry from configuration.
    pub fn from_config(config: &Config) -> Self {
        let bitbay = Endpoint::new(
            BITBAY,
            config.bitbay_url_template.clone(),
            config.bitbay_taker_fee,
            config.bitbay_transfer_fee,
            BookFormat::Flat,
        );
        let bittrex = Endpoint::new(
            BITTREX,
            config.bittrex_url_template.clone(),
            config.bittrex_taker_fee,
            config.bittrex_transfer_fee,
            BookFormat::Nested,
        );

        Self::new(
            bitbay,
            bittrex,
            AssetPair::new(config.base_asset.clone(), config.quote_asset.clone()),
        )
    }

    /// All registered endpoints, primary first.
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        [&self.primary, &self.secondary].into_iter()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
