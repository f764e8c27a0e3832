use std::{fmt::Display, str::FromStr};

use thiserror::Error;

const HASH_SIZE: usize = 32;
const MAX_HASH_STRING_SIZE: usize = HASH_SIZE * 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxHashError {
    #[error("Transaction hash is empty")]
    Empty,
    #[error("Transaction hash is longer than {MAX_HASH_STRING_SIZE} characters: {0}")]
    TooLong(String),
    #[error("Transaction hash is not valid hex: {0}")]
    InvalidHex(String),
}

/// Strips a literal `0x` prefix from a chain transaction id. Account-based chains report ids with the prefix, while
/// wallet backends expect the bare hash.
pub fn canonical_txid(txid: &str) -> &str {
    txid.strip_prefix("0x").unwrap_or(txid)
}

/// A 32-byte transaction hash.
///
/// The hex form is the conventional byte-reversed display order used by block explorers. Short strings are
/// left-padded with zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash([u8; HASH_SIZE]);

impl TxHash {
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }
}

impl FromStr for TxHash {
    type Err = TxHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(TxHashError::Empty);
        }
        if s.len() > MAX_HASH_STRING_SIZE {
            return Err(TxHashError::TooLong(s.to_string()));
        }
        let padded = format!("{:0>width$}", s, width = MAX_HASH_STRING_SIZE);
        let mut bytes = [0u8; HASH_SIZE];
        hex::decode_to_slice(padded, &mut bytes).map_err(|_| TxHashError::InvalidHex(s.to_string()))?;
        bytes.reverse();
        Ok(Self(bytes))
    }
}

impl Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut bytes = self.0;
        bytes.reverse();
        write!(f, "{}", hex::encode(bytes))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const TXID: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn parse_and_display() {
        let hash = TxHash::from_str(TXID).unwrap();
        assert_eq!(hash.to_string(), TXID);
        assert_eq!(hash.as_bytes()[0], 0x55);
        assert_eq!(hash.as_bytes()[31], 0xe3);
    }

    #[test]
    fn short_hashes_are_padded() {
        let hash = TxHash::from_str("abc").unwrap();
        assert_eq!(hash.to_string(), format!("{}abc", "0".repeat(61)));
    }

    #[test]
    fn invalid_hashes() {
        assert_eq!(TxHash::from_str(""), Err(TxHashError::Empty));
        assert!(matches!(TxHash::from_str(&format!("{TXID}00")), Err(TxHashError::TooLong(_))));
        assert!(matches!(TxHash::from_str("not-a-hash"), Err(TxHashError::InvalidHex(_))));
        // The prefix must be removed before parsing
        assert!(TxHash::from_str(&format!("0x{}", &TXID[2..])).is_err());
    }

    #[test]
    fn canonical_ids() {
        assert_eq!(canonical_txid("0xabc"), "abc");
        assert_eq!(canonical_txid("abc"), "abc");
        assert_eq!(canonical_txid("0x0xabc"), "0xabc");
        assert_eq!(canonical_txid("0Xabc"), "0Xabc");
    }
}
