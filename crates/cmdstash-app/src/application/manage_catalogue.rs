//! ManageCatalogueUseCase: the in-memory authoritative catalogue and its
//! CRUD/reload contract.
//!
//! The [`CatalogueManager`] holds the single in-memory copy of the
//! catalogue the desktop shell displays. Every mutating call persists the
//! whole catalogue through the injected [`CatalogueStore`] so the file on
//! disk and the in-memory copy agree after each successful operation.
//!
//! # Startup lifecycle
//!
//! ```text
//! CatalogueManager::new(store)      -- empty catalogue, nothing on screen yet
//!          │
//!          ▼ initialize()
//!   ensure_initialized()            -- seed config.yaml with defaults if absent
//!   load()                          -- file contents become the catalogue
//! ```
//!
//! `initialize` failing is not fatal: the manager keeps its empty catalogue
//! and stays fully usable, so the user can re-author a config from scratch
//! even when the existing file is unreadable. The caller decides how to
//! present the failure (see `infrastructure::ui_bridge`).
//!
//! # Failure isolation
//!
//! Mutations follow a scratch-copy discipline: clone the catalogue, apply
//! the edit to the clone, persist the clone, and only then swap it into the
//! authoritative slot. A failed persist therefore leaves BOTH the in-memory
//! catalogue and the last durable file content exactly as they were, for
//! every operation, the same isolation `reload` gets by construction.

use thiserror::Error;
use tracing::{debug, info};

use cmdstash_core::{Catalogue, CatalogueError, CommandGroup};

use crate::infrastructure::storage::{CatalogueStore, StoreError};

/// Error type for catalogue management operations.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// A positional edit referenced a group that does not exist.
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    /// Persistence failed; the in-memory catalogue was not modified.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Owns the in-memory catalogue and delegates persistence to the store.
///
/// Constructed empty; [`initialize`](Self::initialize) populates it from
/// disk once at startup. The manager itself is single-owner (`&mut self`
/// mutations); shared access from the shell goes through the mutex in
/// `infrastructure::ui_bridge`.
pub struct CatalogueManager<S: CatalogueStore> {
    store: S,
    catalogue: Catalogue,
}

impl<S: CatalogueStore> CatalogueManager<S> {
    /// Creates a manager with an empty catalogue.
    pub fn new(store: S) -> Self {
        Self {
            store,
            catalogue: Catalogue::new(),
        }
    }

    /// Seeds the backing file if absent, then loads it into memory.
    ///
    /// # Errors
    ///
    /// Returns the store error unchanged. On failure the manager keeps its
    /// current (empty) catalogue and every operation remains callable.
    pub fn initialize(&mut self) -> Result<(), ManagerError> {
        self.store.ensure_initialized()?;
        self.catalogue = self.store.load()?;
        info!(groups = self.catalogue.len(), "catalogue loaded");
        Ok(())
    }

    /// Returns a snapshot of the current in-memory catalogue.
    pub fn list(&self) -> Catalogue {
        self.catalogue.clone()
    }

    /// Appends `group` at the end of the catalogue and persists.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Store`] when the persist fails; the
    /// in-memory catalogue is left unchanged.
    pub fn add(&mut self, group: CommandGroup) -> Result<(), ManagerError> {
        let mut next = self.catalogue.clone();
        next.append(group);
        self.commit(next)
    }

    /// Replaces the group at `index` and persists.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Catalogue`] when `index` is out of bounds
    /// (nothing is persisted), or [`ManagerError::Store`] when the persist
    /// fails; either way the in-memory catalogue is left unchanged.
    pub fn update(&mut self, index: usize, group: CommandGroup) -> Result<(), ManagerError> {
        let mut next = self.catalogue.clone();
        next.replace(index, group)?;
        self.commit(next)
    }

    /// Removes the group at `index` (later groups shift down) and persists.
    ///
    /// # Errors
    ///
    /// Same contract as [`update`](Self::update).
    pub fn delete(&mut self, index: usize) -> Result<(), ManagerError> {
        let mut next = self.catalogue.clone();
        next.remove(index)?;
        self.commit(next)
    }

    /// Re-reads the file from disk and replaces the in-memory catalogue
    /// wholesale, picking up edits the user made in a text editor.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Store`] on read or parse failure; the
    /// existing in-memory catalogue is left untouched.
    pub fn reload(&mut self) -> Result<(), ManagerError> {
        let fresh = self.store.load()?;
        info!(groups = fresh.len(), "catalogue reloaded from disk");
        self.catalogue = fresh;
        Ok(())
    }

    /// Persists `next` and, only on success, makes it the authoritative
    /// in-memory catalogue.
    fn commit(&mut self, next: Catalogue) -> Result<(), ManagerError> {
        self.store.save(&next)?;
        debug!(groups = next.len(), "catalogue persisted");
        self.catalogue = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::mock::MemoryStore;
    use cmdstash_core::{default_catalogue, CommandItem};

    fn group(name: &str) -> CommandGroup {
        CommandGroup {
            name: name.to_string(),
            items: vec![CommandItem {
                description: format!("run {name}"),
                command: format!("echo {name}"),
            }],
        }
    }

    fn ready_manager() -> CatalogueManager<MemoryStore> {
        let mut manager = CatalogueManager::new(MemoryStore::new());
        manager.initialize().expect("initialize");
        manager
    }

    // ── Startup ───────────────────────────────────────────────────────────────

    #[test]
    fn test_initialize_seeds_and_loads_defaults() {
        // Arrange
        let mut manager = CatalogueManager::new(MemoryStore::new());
        assert!(manager.list().is_empty(), "starts empty before initialize");

        // Act
        manager.initialize().expect("initialize");

        // Assert
        assert_eq!(manager.list(), default_catalogue());
    }

    #[test]
    fn test_initialize_failure_leaves_manager_empty_but_usable() {
        // Arrange: the store exists but its contents cannot be read.
        let store = MemoryStore::with_catalogue(default_catalogue());
        store.set_fail_loads(true);
        let mut manager = CatalogueManager::new(store);

        // Act
        let result = manager.initialize();

        // Assert: explicit error, empty catalogue, still operational.
        assert!(matches!(result, Err(ManagerError::Store(_))));
        assert!(manager.list().is_empty());
        manager.add(group("still-works")).expect("add after failed init");
        assert_eq!(manager.list().len(), 1);
    }

    // ── list ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_list_returns_a_detached_snapshot() {
        let manager = ready_manager();

        let mut snapshot = manager.list();
        snapshot.append(group("local-only"));

        // Mutating the snapshot must not affect the manager.
        assert_eq!(manager.list(), default_catalogue());
    }

    // ── add / update / delete ─────────────────────────────────────────────────

    #[test]
    fn test_add_appends_and_persists() {
        let mut manager = ready_manager();
        let before = manager.list().len();

        manager.add(group("new")).expect("add");

        let listed = manager.list();
        assert_eq!(listed.len(), before + 1);
        assert_eq!(listed.get(before).unwrap().name, "new");
    }

    #[test]
    fn test_update_replaces_group_in_place() {
        let mut manager = ready_manager();
        manager.add(group("old")).unwrap();

        manager.update(1, group("renamed")).expect("update");

        assert_eq!(manager.list().get(1).unwrap().name, "renamed");
        assert_eq!(manager.list().len(), 2);
    }

    #[test]
    fn test_update_out_of_bounds_changes_nothing() {
        let mut manager = ready_manager();
        let before = manager.list();
        let len = before.len();

        let err = manager.update(len, group("x")).unwrap_err();

        assert!(matches!(
            err,
            ManagerError::Catalogue(CatalogueError::InvalidIndex { .. })
        ));
        assert_eq!(manager.list(), before);
    }

    #[test]
    fn test_delete_removes_and_shifts() {
        let mut manager = ready_manager();
        manager.add(group("second")).unwrap();
        manager.add(group("third")).unwrap();

        manager.delete(0).expect("delete head");

        let listed = manager.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed.get(0).unwrap().name, "second");
        assert_eq!(listed.get(1).unwrap().name, "third");
    }

    #[test]
    fn test_delete_out_of_bounds_changes_nothing_and_skips_persist() {
        let store = MemoryStore::with_catalogue(default_catalogue());
        let mut manager = CatalogueManager::new(store);
        manager.initialize().unwrap();

        let err = manager.delete(5).unwrap_err();

        assert!(matches!(err, ManagerError::Catalogue(_)));
        assert_eq!(manager.list(), default_catalogue());
        // A rejected index must not reach the store at all.
        assert_eq!(manager.store.save_count(), 0);
    }

    // ── Persist-failure isolation ─────────────────────────────────────────────

    #[test]
    fn test_failed_persist_leaves_memory_and_store_unchanged() {
        let store = MemoryStore::with_catalogue(default_catalogue());
        let mut manager = CatalogueManager::new(store);
        manager.initialize().unwrap();

        // Break the store, then attempt each mutation.
        let before = manager.list();
        let store = &manager.store;
        store.set_fail_saves(true);
        let stored_before = store.stored();

        assert!(manager.add(group("a")).is_err());
        assert!(manager.update(0, group("b")).is_err());
        assert!(manager.delete(0).is_err());

        assert_eq!(manager.list(), before, "memory must not change");
        assert_eq!(
            manager.store.stored(),
            stored_before,
            "durable copy must not change"
        );
    }

    // ── reload ────────────────────────────────────────────────────────────────

    #[test]
    fn test_reload_picks_up_external_changes() {
        let mut manager = ready_manager();
        let edited = Catalogue::from_groups(vec![group("edited-by-hand")]);
        manager.store.replace_contents(edited.clone());

        manager.reload().expect("reload");

        assert_eq!(manager.list(), edited);
    }

    #[test]
    fn test_reload_failure_keeps_in_memory_catalogue() {
        let mut manager = ready_manager();
        manager.add(group("kept")).unwrap();
        let before = manager.list();
        manager.store.set_fail_loads(true);

        let err = manager.reload().unwrap_err();

        assert!(matches!(err, ManagerError::Store(StoreError::Read { .. })));
        assert_eq!(manager.list(), before);
    }
}
