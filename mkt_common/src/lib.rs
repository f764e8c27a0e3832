mod big_value;

pub mod helpers;
pub mod op;

pub use big_value::{BigValue, BigValueParseError};
