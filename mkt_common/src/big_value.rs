use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub},
    str::FromStr,
};

use num_bigint::{BigInt, Sign};
use num_traits::Zero;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::op;

//--------------------------------------      BigValue       ---------------------------------------------------------
/// An arbitrary-precision signed amount, expressed in the smallest unit of its currency.
///
/// On the wire a `BigValue` is always a base-10 string, so that amounts larger than 64 bits survive JSON encoding
/// intact.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigValue(BigInt);

op!(binary BigValue, Add, add);
op!(binary BigValue, Sub, sub);
op!(binary_ref BigValue, Add, add);
op!(binary_ref BigValue, Sub, sub);
op!(inplace BigValue, AddAssign, add_assign);
op!(inplace_ref BigValue, AddAssign, add_assign);
op!(unary BigValue, Neg, neg);
op!(unary_ref BigValue, Neg, neg);

impl Sum for BigValue {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Value is not a base-10 integer: '{0}'")]
pub struct BigValueParseError(String);

impl FromStr for BigValue {
    type Err = BigValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BigValueParseError(s.to_string()));
        }
        BigInt::from_str(s).map(Self).map_err(|_| BigValueParseError(s.to_string()))
    }
}

impl From<i64> for BigValue {
    fn from(value: i64) -> Self {
        Self(BigInt::from(value))
    }
}

impl From<u64> for BigValue {
    fn from(value: u64) -> Self {
        Self(BigInt::from(value))
    }
}

impl From<BigInt> for BigValue {
    fn from(value: BigInt) -> Self {
        Self(value)
    }
}

impl Display for BigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl BigValue {
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    pub fn value(&self) -> &BigInt {
        &self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn abs(&self) -> Self {
        if self.is_negative() {
            -self.clone()
        } else {
            self.clone()
        }
    }
}

impl Serialize for BigValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for BigValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de> {
        let s = String::deserialize(deserializer)?;
        BigValue::from_str(&s).map_err(de::Error::custom)
    }
}
