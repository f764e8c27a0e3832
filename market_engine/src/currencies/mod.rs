//! # Currency definitions and resolution
//!
//! Currency definitions live in three disjoint registries: testnet crypto, mainnet crypto and fiat. They are loaded
//! once at startup, either from the built-in defaults or from a TOML file (see [`CurrencyRegistries`]).
//!
//! The [`CurrencyResolver`] answers "what is this currency code?" for the network the node is running on.
mod definitions;
mod resolver;

pub use definitions::{
    CurrencyDefinition,
    CurrencyLookupError,
    CurrencyRegistries,
    CurrencyRegistry,
    CurrencyRegistryError,
    CurrencyScope,
};
pub use resolver::{CurrencyResolver, NetworkMode, NetworkModeParseError};
