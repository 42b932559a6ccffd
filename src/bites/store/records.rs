use super::{KeyValueStore, RESTAURANTS_KEY};
use crate::error::{BitesError, Result};
use crate::model::RestaurantRecord;
use tracing::{debug, warn};

/// Identifies one stored version of the collection blob.
///
/// The blake3 digest of the raw stored string, so no extra key is needed
/// and the persisted layout stays a bare JSON array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision(Option<blake3::Hash>);

impl Revision {
    /// The revision of a key that holds nothing.
    pub fn empty() -> Self {
        Self(None)
    }

    fn of(raw: Option<&str>) -> Self {
        Self(raw.map(|s| blake3::hash(s.as_bytes())))
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(hash) => write!(f, "{}", &hash.to_hex()[..12]),
            None => write!(f, "empty"),
        }
    }
}

/// The collection as read, together with the revision it was read at.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub records: Vec<RestaurantRecord>,
    pub revision: Revision,
}

/// The restaurant collection, persisted as one JSON array under one key.
pub struct RecordStore<K: KeyValueStore> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> RecordStore<K> {
    pub fn new(kv: K) -> Self {
        Self::with_key(kv, RESTAURANTS_KEY)
    }

    pub fn with_key(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// All records in stored order; empty if nothing was ever written.
    pub fn load_all(&self) -> Result<Vec<RestaurantRecord>> {
        Ok(self.load_snapshot()?.records)
    }

    pub fn load_snapshot(&self) -> Result<Snapshot> {
        let raw = self.kv.get_item(&self.key)?;
        let revision = Revision::of(raw.as_deref());
        let records = match raw.as_deref() {
            None => Vec::new(),
            Some(blob) => self.decode(blob)?,
        };
        debug!(key = %self.key, count = records.len(), %revision, "loaded records");
        Ok(Snapshot { records, revision })
    }

    /// Replace the whole collection with a single key write.
    pub fn save_all(&self, records: &[RestaurantRecord]) -> Result<()> {
        let blob = serde_json::to_string(records).map_err(BitesError::Serialization)?;
        self.kv.set_item(&self.key, &blob)?;
        debug!(key = %self.key, count = records.len(), "saved records");
        Ok(())
    }

    /// Replace the collection only if it is still at `expected`.
    ///
    /// Fails with [`BitesError::Conflict`] when someone else wrote in
    /// between; nothing is written in that case.
    pub fn save_if_unchanged(
        &self,
        records: &[RestaurantRecord],
        expected: &Revision,
    ) -> Result<()> {
        let current = Revision::of(self.kv.get_item(&self.key)?.as_deref());
        if &current != expected {
            warn!(key = %self.key, %expected, %current, "rejecting write based on a stale read");
            return Err(BitesError::Conflict {
                key: self.key.clone(),
            });
        }
        self.save_all(records)
    }

    /// Remove the key entirely.
    pub fn clear(&self) -> Result<()> {
        self.kv.remove_item(&self.key)?;
        debug!(key = %self.key, "cleared records");
        Ok(())
    }

    fn decode(&self, blob: &str) -> Result<Vec<RestaurantRecord>> {
        serde_json::from_str(blob).map_err(|source| BitesError::Decode {
            key: self.key.clone(),
            source,
        })
    }
}

/// Replace the first record whose id matches. Returns false, leaving the
/// collection unchanged, when there is none.
pub fn update_by_id(
    records: &mut [RestaurantRecord],
    id: &str,
    replacement: RestaurantRecord,
) -> bool {
    match records.iter_mut().find(|r| r.id == id) {
        Some(slot) => {
            *slot = replacement;
            true
        }
        None => false,
    }
}

/// Remove every record whose id matches; returns how many were removed.
pub fn delete_by_id(records: &mut Vec<RestaurantRecord>, id: &str) -> usize {
    let before = records.len();
    records.retain(|r| r.id != id);
    before - records.len()
}
