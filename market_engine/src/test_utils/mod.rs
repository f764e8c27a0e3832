//! Helpers for crates that want a throw-away message store in their tests.
pub mod prepare_env;
