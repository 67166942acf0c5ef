//! Mock catalogue store for unit testing.
//!
//! Allows tests to exercise [`CatalogueStore`] consumers without touching
//! the filesystem, and to inject read/write failures on demand.

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};

use cmdstash_core::{default_catalogue, Catalogue};

use super::{CatalogueStore, StoreError};

/// An in-memory implementation of [`CatalogueStore`].
///
/// `None` contents model a file that does not exist yet; `ensure_initialized`
/// seeds it with the defaults just like the real store. Failure flags make
/// every operation's error path reachable from tests.
pub struct MemoryStore {
    contents: Mutex<Option<Catalogue>>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    save_count: AtomicUsize,
}

impl MemoryStore {
    /// Creates a store with no stored catalogue, as on a first run.
    pub fn new() -> Self {
        Self {
            contents: Mutex::new(None),
            fail_loads: AtomicBool::new(false),
            fail_saves: AtomicBool::new(false),
            save_count: AtomicUsize::new(0),
        }
    }

    /// Creates a store that already holds `catalogue`.
    pub fn with_catalogue(catalogue: Catalogue) -> Self {
        let store = Self::new();
        *store.contents.lock().expect("lock poisoned") = Some(catalogue);
        store
    }

    /// Makes every subsequent `load` fail with [`StoreError::Read`].
    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::Relaxed);
    }

    /// Makes every subsequent `save` fail with [`StoreError::Write`].
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::Relaxed);
    }

    /// Replaces the stored catalogue directly, simulating an external edit
    /// of the file between persists.
    pub fn replace_contents(&self, catalogue: Catalogue) {
        *self.contents.lock().expect("lock poisoned") = Some(catalogue);
    }

    /// Returns a copy of the stored catalogue, if any.
    pub fn stored(&self) -> Option<Catalogue> {
        self.contents.lock().expect("lock poisoned").clone()
    }

    /// Returns the number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::Relaxed)
    }

    fn placeholder_path() -> PathBuf {
        PathBuf::from("<memory>")
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogueStore for MemoryStore {
    fn ensure_initialized(&self) -> Result<(), StoreError> {
        let mut contents = self.contents.lock().expect("lock poisoned");
        if contents.is_none() {
            *contents = Some(default_catalogue());
        }
        Ok(())
    }

    fn load(&self) -> Result<Catalogue, StoreError> {
        if self.fail_loads.load(Ordering::Relaxed) {
            return Err(StoreError::Read {
                path: Self::placeholder_path(),
                source: std::io::Error::other("injected load failure"),
            });
        }
        self.contents
            .lock()
            .expect("lock poisoned")
            .clone()
            .ok_or_else(|| StoreError::Read {
                path: Self::placeholder_path(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
    }

    fn save(&self, catalogue: &Catalogue) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::Relaxed) {
            return Err(StoreError::Write {
                path: Self::placeholder_path(),
                source: std::io::Error::other("injected save failure"),
            });
        }
        *self.contents.lock().expect("lock poisoned") = Some(catalogue.clone());
        self.save_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
