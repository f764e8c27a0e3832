use std::{collections::HashMap, fmt::Display, fs, path::Path};

use log::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//--------------------------------------    CurrencyScope      ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyScope {
    TestnetCrypto,
    MainnetCrypto,
    Fiat,
}

impl Display for CurrencyScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurrencyScope::TestnetCrypto => write!(f, "testnet-crypto"),
            CurrencyScope::MainnetCrypto => write!(f, "mainnet-crypto"),
            CurrencyScope::Fiat => write!(f, "fiat"),
        }
    }
}

//--------------------------------------  CurrencyDefinition   ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyDefinition {
    pub code: String,
    pub name: String,
    pub scope: CurrencyScope,
    /// The number of decimal places in one whole unit of the currency.
    pub divisibility: u32,
}

impl CurrencyDefinition {
    pub fn new(code: &str, name: &str, scope: CurrencyScope, divisibility: u32) -> Self {
        Self { code: code.to_string(), name: name.to_string(), scope, divisibility }
    }

    pub fn is_crypto(&self) -> bool {
        self.scope != CurrencyScope::Fiat
    }
}

impl Display for CurrencyDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.code, self.name, self.scope)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyLookupError {
    #[error("Unknown currency code: {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum CurrencyRegistryError {
    #[error("Could not read currency file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse currency file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Currency {0} is defined more than once")]
    DuplicateCode(String),
}

//--------------------------------------   CurrencyRegistry    ---------------------------------------------------------
/// A read-only lookup table of currency definitions sharing the same scope.
#[derive(Debug, Clone)]
pub struct CurrencyRegistry {
    scope: CurrencyScope,
    currencies: HashMap<String, CurrencyDefinition>,
}

impl CurrencyRegistry {
    pub fn new(scope: CurrencyScope) -> Self {
        Self { scope, currencies: HashMap::new() }
    }

    pub fn scope(&self) -> CurrencyScope {
        self.scope
    }

    pub fn lookup(&self, code: &str) -> Result<&CurrencyDefinition, CurrencyLookupError> {
        self.currencies.get(code).ok_or_else(|| CurrencyLookupError::NotFound(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.currencies.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.currencies.keys().map(String::as_str)
    }

    fn insert(&mut self, code: &str, name: &str, divisibility: u32) -> Result<(), CurrencyRegistryError> {
        if self.contains(code) {
            return Err(CurrencyRegistryError::DuplicateCode(code.to_string()));
        }
        let def = CurrencyDefinition::new(code, name, self.scope, divisibility);
        self.currencies.insert(code.to_string(), def);
        Ok(())
    }

    fn from_entries(scope: CurrencyScope, entries: &[CurrencyEntry]) -> Result<Self, CurrencyRegistryError> {
        let mut registry = Self::new(scope);
        for entry in entries {
            registry.insert(&entry.code, &entry.name, entry.divisibility)?;
        }
        Ok(registry)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct CurrencyEntry {
    code: String,
    name: String,
    divisibility: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CurrencyFile {
    #[serde(default)]
    testnet: Vec<CurrencyEntry>,
    #[serde(default)]
    mainnet: Vec<CurrencyEntry>,
    #[serde(default)]
    fiat: Vec<CurrencyEntry>,
}

//--------------------------------------  CurrencyRegistries   ---------------------------------------------------------
/// The three disjoint currency tables consulted by the [`super::CurrencyResolver`].
#[derive(Debug, Clone)]
pub struct CurrencyRegistries {
    pub testnet: CurrencyRegistry,
    pub mainnet: CurrencyRegistry,
    pub fiat: CurrencyRegistry,
}

const DEFAULT_CRYPTO: [(&str, &str, u32); 5] = [
    ("BTC", "Bitcoin", 8),
    ("BCH", "Bitcoin Cash", 8),
    ("LTC", "Litecoin", 8),
    ("ZEC", "Zcash", 8),
    ("ETH", "Ethereum", 18),
];

const DEFAULT_FIAT: [(&str, &str, u32); 8] = [
    ("USD", "United States Dollar", 2),
    ("EUR", "Euro", 2),
    ("GBP", "Pound Sterling", 2),
    ("CAD", "Canadian Dollar", 2),
    ("AUD", "Australian Dollar", 2),
    ("CHF", "Swiss Franc", 2),
    ("JPY", "Japanese Yen", 0),
    ("ZAR", "South African Rand", 2),
];

impl Default for CurrencyRegistries {
    fn default() -> Self {
        let mut testnet = CurrencyRegistry::new(CurrencyScope::TestnetCrypto);
        let mut mainnet = CurrencyRegistry::new(CurrencyScope::MainnetCrypto);
        let mut fiat = CurrencyRegistry::new(CurrencyScope::Fiat);
        for (code, name, divisibility) in DEFAULT_CRYPTO {
            mainnet.currencies.insert(code.into(), CurrencyDefinition::new(code, name, mainnet.scope, divisibility));
            let test_code = format!("T{code}");
            let test_name = format!("Testnet {name}");
            let def = CurrencyDefinition::new(&test_code, &test_name, testnet.scope, divisibility);
            testnet.currencies.insert(test_code, def);
        }
        for (code, name, divisibility) in DEFAULT_FIAT {
            fiat.currencies.insert(code.into(), CurrencyDefinition::new(code, name, fiat.scope, divisibility));
        }
        Self { testnet, mainnet, fiat }
    }
}

impl CurrencyRegistries {
    /// Parses the registries from a TOML document with `[[testnet]]`, `[[mainnet]]` and `[[fiat]]` tables. Codes must
    /// be unique across all three tables.
    pub fn from_toml_str(s: &str) -> Result<Self, CurrencyRegistryError> {
        let file = toml::from_str::<CurrencyFile>(s)?;
        let testnet = CurrencyRegistry::from_entries(CurrencyScope::TestnetCrypto, &file.testnet)?;
        let mainnet = CurrencyRegistry::from_entries(CurrencyScope::MainnetCrypto, &file.mainnet)?;
        let fiat = CurrencyRegistry::from_entries(CurrencyScope::Fiat, &file.fiat)?;
        let result = Self { testnet, mainnet, fiat };
        result.check_disjoint()?;
        Ok(result)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, CurrencyRegistryError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let registries = Self::from_toml_str(&contents)?;
        info!(
            "🪛️ Loaded {} testnet, {} mainnet and {} fiat currencies from {}",
            registries.testnet.len(),
            registries.mainnet.len(),
            registries.fiat.len(),
            path.display()
        );
        Ok(registries)
    }

    fn check_disjoint(&self) -> Result<(), CurrencyRegistryError> {
        let tables = [&self.testnet, &self.mainnet, &self.fiat];
        for (i, table) in tables.iter().enumerate() {
            for other in &tables[i + 1..] {
                if let Some(code) = table.codes().find(|c| other.contains(c)) {
                    return Err(CurrencyRegistryError::DuplicateCode(code.to_string()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_registries() {
        let reg = CurrencyRegistries::default();
        assert_eq!(reg.mainnet.lookup("BTC").unwrap().divisibility, 8);
        assert_eq!(reg.testnet.lookup("TBTC").unwrap().scope, CurrencyScope::TestnetCrypto);
        assert_eq!(reg.fiat.lookup("JPY").unwrap().divisibility, 0);
        assert!(reg.mainnet.lookup("TBTC").is_err());
        assert!(reg.testnet.lookup("BTC").is_err());
        assert!(reg.check_disjoint().is_ok());
    }

    #[test]
    fn load_from_toml() {
        let doc = r#"
            [[testnet]]
            code = "TXMR"
            name = "Testnet Monero"
            divisibility = 12

            [[mainnet]]
            code = "XMR"
            name = "Monero"
            divisibility = 12

            [[fiat]]
            code = "NZD"
            name = "New Zealand Dollar"
            divisibility = 2
        "#;
        let reg = CurrencyRegistries::from_toml_str(doc).unwrap();
        assert_eq!(reg.testnet.len(), 1);
        assert_eq!(reg.mainnet.lookup("XMR").unwrap().name, "Monero");
        assert_eq!(reg.fiat.lookup("NZD").unwrap().scope, CurrencyScope::Fiat);
        assert!(reg.mainnet.lookup("BTC").is_err());
    }

    #[test]
    fn overlapping_tables_are_rejected() {
        let doc = r#"
            [[mainnet]]
            code = "XMR"
            name = "Monero"
            divisibility = 12

            [[fiat]]
            code = "XMR"
            name = "Not Monero"
            divisibility = 2
        "#;
        let err = CurrencyRegistries::from_toml_str(doc).unwrap_err();
        assert!(matches!(err, CurrencyRegistryError::DuplicateCode(c) if c == "XMR"));

        let doc = r#"
            [[fiat]]
            code = "USD"
            name = "Dollar"
            divisibility = 2

            [[fiat]]
            code = "USD"
            name = "Dollar again"
            divisibility = 2
        "#;
        assert!(CurrencyRegistries::from_toml_str(doc).is_err());
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let err = CurrencyRegistries::from_toml_str("[[fiat]]\ncode = 12").unwrap_err();
        assert!(matches!(err, CurrencyRegistryError::Parse(_)));
    }
}
