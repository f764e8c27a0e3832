use std::{fmt::Display, str::FromStr};

use log::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::definitions::{CurrencyDefinition, CurrencyLookupError, CurrencyRegistries, CurrencyRegistry};

//--------------------------------------     NetworkMode       ---------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMode {
    #[default]
    Mainnet,
    Testnet,
    Regtest,
}

impl NetworkMode {
    /// Testnet and regtest share the testnet currency table.
    pub fn is_test(&self) -> bool {
        matches!(self, NetworkMode::Testnet | NetworkMode::Regtest)
    }
}

impl Display for NetworkMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkMode::Mainnet => write!(f, "mainnet"),
            NetworkMode::Testnet => write!(f, "testnet"),
            NetworkMode::Regtest => write!(f, "regtest"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid network mode: {0}")]
pub struct NetworkModeParseError(String);

impl FromStr for NetworkMode {
    type Err = NetworkModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            "regtest" => Ok(Self::Regtest),
            _ => Err(NetworkModeParseError(s.to_string())),
        }
    }
}

//--------------------------------------   CurrencyResolver    ---------------------------------------------------------
/// Resolves currency codes against the registries, taking the node's network mode into account.
///
/// The network mode is fixed when the resolver is created. Crypto currencies are looked up in the table for that
/// network first; fiat currencies are always available regardless of the network.
#[derive(Debug, Clone)]
pub struct CurrencyResolver {
    network: NetworkMode,
    registries: CurrencyRegistries,
}

impl CurrencyResolver {
    pub fn new(network: NetworkMode, registries: CurrencyRegistries) -> Self {
        Self { network, registries }
    }

    pub fn network(&self) -> NetworkMode {
        self.network
    }

    fn crypto_registry(&self) -> &CurrencyRegistry {
        if self.network.is_test() {
            &self.registries.testnet
        } else {
            &self.registries.mainnet
        }
    }

    pub fn resolve(&self, code: &str) -> Result<CurrencyDefinition, CurrencyLookupError> {
        if let Ok(def) = self.crypto_registry().lookup(code) {
            return Ok(def.clone());
        }
        self.registries.fiat.lookup(code).cloned().map_err(|e| {
            debug!("🪛️ Currency {code} is not known on {} or as a fiat currency", self.network);
            e
        })
    }

    /// The code to use when querying external exchange-rate feeds.
    ///
    /// Testnet registry keys carry a leading `T` that rate feeds don't know about, so exactly one leading `T` is
    /// stripped in test modes. Do not use the result for registry lookups.
    pub fn exchange_rate_code<'a>(&self, code: &'a str) -> &'a str {
        if self.network.is_test() {
            code.strip_prefix('T').unwrap_or(code)
        } else {
            code
        }
    }
}
