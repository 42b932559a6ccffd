use super::KeyValueStore;
use crate::error::{BitesError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// File-backed key-value storage: key `k` lives in `<root>/<k>.json`.
pub struct FsKv {
    root: PathBuf,
}

impl FsKv {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    ///
    /// Characters outside `[A-Za-z0-9@._-]` become `_` so any key maps to a
    /// portable file name.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{}.json", name))
    }

    fn ensure_root(&self, key: &str) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|e| BitesError::storage(key, e))?;
        }
        Ok(())
    }
}

impl KeyValueStore for FsKv {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(key, bytes = content.len(), "read item");
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BitesError::storage(key, e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_root(key)?;
        let target = self.path_for(key);

        // Atomic write
        let tmp = self.root.join(format!(".kv-{}.tmp", Uuid::new_v4()));
        let written = fs::write(&tmp, value).and_then(|()| fs::rename(&tmp, &target));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(BitesError::storage(key, e));
        }

        debug!(key, bytes = value.len(), "wrote item");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => {
                debug!(key, "removed item");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BitesError::storage(key, e)),
        }
    }
}
