//! # Storage Layer
//!
//! Persistence is split in two:
//!
//! 1. [`KeyValueStore`]: raw string-keyed storage. This is the "how"
//!    (filesystem or memory).
//! 2. [`records::RecordStore`]: the restaurant collection stored as one
//!    JSON array under [`RESTAURANTS_KEY`]. This is the "what".
//!
//! ## Single-Blob Model
//!
//! There are no per-record keys and no index. Every mutation is
//! read-all, modify in memory, write-all. Collections are personal-sized
//! (dozens of entries), so the O(n) rewrite is irrelevant.
//!
//! Two mutations racing on the same blob would lose an update, so reads
//! hand out a [`records::Revision`] and writes can be made conditional on
//! it (`save_if_unchanged`). A stale write fails with `Conflict` and
//! leaves the stored blob untouched.
//!
//! ## Implementations
//!
//! - [`fs::FsKv`]: one file per key inside the data directory, written
//!   atomically (tmp file + rename).
//! - [`memory::MemKv`]: in-memory, for tests. Can simulate write failures.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── @restaurants.json   # The record collection
//! └── config.json         # User configuration
//! ```

use crate::error::Result;

pub mod fs;
pub mod memory;
pub mod records;

/// The key holding the serialized restaurant collection.
pub const RESTAURANTS_KEY: &str = "@restaurants";

/// Abstract string-keyed storage.
///
/// Methods take `&self`; implementations use interior mutability where
/// needed. The app is single-threaded.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `Ok(None)` if it was never written
    /// or has been removed.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    /// Must be atomic from the caller's perspective.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}
