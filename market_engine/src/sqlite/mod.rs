//! SQLite storage for the market engine.
//!
//! [`SqliteDatabase`] implements [`crate::traits::MessageStore`]. The low-level queries live in [`db`].
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
