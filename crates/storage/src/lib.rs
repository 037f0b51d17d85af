//! Storage abstraction and implementations for the DTFE case store.
//!
//! This crate provides a trait-based storage interface with a JSON-file
//! reference implementation. The engine itself never touches storage; it
//! is handed a snapshot of a case's progress history and returns data.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;

pub use trait_::{Storage, StorageError, Result};
pub use json_storage::JsonStorage;
