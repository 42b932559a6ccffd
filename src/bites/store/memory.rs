use super::KeyValueStore;
use crate::error::{BitesError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;

/// In-memory key-value storage for testing.
///
/// Uses `RefCell` for interior mutability since bites is single-threaded.
#[derive(Default)]
pub struct MemKv {
    items: RefCell<HashMap<String, String>>,
    simulate_write_error: Cell<bool>,
    simulate_read_error: Cell<bool>,
}

impl MemKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set_item`/`remove_item` fail.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Make every subsequent `get_item` fail.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// Put a raw value in place, bypassing the record layer.
    pub fn put_raw(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn simulated(key: &str, what: &str) -> BitesError {
        BitesError::storage(key, io::Error::other(format!("simulated {} error", what)))
    }
}

impl KeyValueStore for MemKv {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        if self.simulate_read_error.get() {
            return Err(Self::simulated(key, "read"));
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(Self::simulated(key, "write"));
        }
        self.put_raw(key, value);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(Self::simulated(key, "write"));
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{sample_records, Coordinates, RestaurantRecord};
    use crate::store::records::RecordStore;

    pub struct StoreFixture {
        pub store: RecordStore<MemKv>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: RecordStore::new(MemKv::new()),
            }
        }

        pub fn with_samples(self) -> Self {
            self.store.save_all(&sample_records()).unwrap();
            self
        }

        pub fn with_record(self, id: &str, name: &str, rating: i64) -> Self {
            let mut records = self.store.load_all().unwrap();
            records.push(RestaurantRecord::new(
                id,
                name,
                rating,
                Coordinates::new(1.0, 2.0),
            ));
            self.store.save_all(&records).unwrap();
            self
        }
    }
}
