//! Engine configuration, read from `MKT_*` environment variables.
//!
//! Invalid values are logged and replaced by their defaults, so a node always starts with a usable configuration.
use std::{env, path::PathBuf};

use log::*;
use mkt_common::helpers::parse_list;

use crate::currencies::{CurrencyRegistries, CurrencyResolver, NetworkMode};
#[cfg(feature = "sqlite")]
use crate::sqlite::SqliteDatabase;

pub const SQLITE_DB_URL: &str = "sqlite://data/market_store.db";
const DEFAULT_MAX_DB_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub network: NetworkMode,
    pub database_url: String,
    pub max_db_connections: u32,
    /// A TOML file that replaces the built-in currency registries.
    pub currency_file: Option<PathBuf>,
    /// Currency codes the node prefers to be paid in. Each must have a wallet registered.
    pub preferred_currencies: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            network: NetworkMode::default(),
            database_url: SQLITE_DB_URL.to_string(),
            max_db_connections: DEFAULT_MAX_DB_CONNECTIONS,
            currency_file: None,
            preferred_currencies: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where F: Fn(&str) -> Option<String> {
        let network = lookup("MKT_NETWORK")
            .map(|s| {
                s.parse::<NetworkMode>().unwrap_or_else(|e| {
                    error!("🪛️ {e}. MKT_NETWORK must be one of mainnet, testnet or regtest. Using mainnet.");
                    NetworkMode::default()
                })
            })
            .unwrap_or_default();
        let database_url = lookup("MKT_DATABASE_URL").unwrap_or_else(|| {
            info!("🪛️ MKT_DATABASE_URL is not set. Using the default, {SQLITE_DB_URL}.");
            SQLITE_DB_URL.to_string()
        });
        let max_db_connections = lookup("MKT_MAX_DB_CONNECTIONS")
            .map(|s| match s.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    error!(
                        "🪛️ {s} is not a valid value for MKT_MAX_DB_CONNECTIONS. Using the default, \
                         {DEFAULT_MAX_DB_CONNECTIONS}, instead."
                    );
                    DEFAULT_MAX_DB_CONNECTIONS
                },
            })
            .unwrap_or(DEFAULT_MAX_DB_CONNECTIONS);
        let currency_file = lookup("MKT_CURRENCY_FILE").filter(|s| !s.trim().is_empty()).map(PathBuf::from);
        let preferred_currencies =
            parse_list(lookup("MKT_PREFERRED_CURRENCIES")).into_iter().map(|c| c.to_uppercase()).collect();
        Self { network, database_url, max_db_connections, currency_file, preferred_currencies }
    }

    /// Loads the currency registries from `currency_file`, if set. A missing or broken file falls back to the
    /// built-in registries.
    pub fn registries(&self) -> CurrencyRegistries {
        match &self.currency_file {
            Some(path) => CurrencyRegistries::from_toml_file(path).unwrap_or_else(|e| {
                error!(
                    "🪛️ Could not load currencies from {}. {e}. Reverting to the built-in currencies.",
                    path.display()
                );
                CurrencyRegistries::default()
            }),
            None => CurrencyRegistries::default(),
        }
    }

    pub fn resolver(&self) -> CurrencyResolver {
        CurrencyResolver::new(self.network, self.registries())
    }

    /// Connects to the message store and brings its schema up to date.
    #[cfg(feature = "sqlite")]
    pub async fn open_message_store(&self) -> Result<SqliteDatabase, sqlx::Error> {
        let db = SqliteDatabase::new_with_url(&self.database_url, self.max_db_connections).await?;
        db.migrate().await?;
        Ok(db)
    }
}
