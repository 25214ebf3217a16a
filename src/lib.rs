//! Coin collection tracker
//!
//! SQLite storage, backup files and collection operations on top of
//! `coin-collection-common`.

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod manager;
pub mod store;
