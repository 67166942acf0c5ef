//! UI command bridge: exposes the catalogue operations to the desktop shell.
//!
//! The GUI shell is the only consumer of this module; it registers each
//! command function and calls it in request/response style, one call at a
//! time. Everything here delegates to the shared [`AppState`], which is the
//! single owner of the [`CatalogueManager`].
//!
//! # Serialization to the shell
//!
//! The domain types in `cmdstash-core` are plain `Serialize`/`Deserialize`
//! data carrying their wire names (`desc`, `cmd`, `command`), so they cross
//! the shell boundary directly and no separate DTO layer is needed.
//!
//! # `CommandResult<T>` wrapper
//!
//! All commands return [`CommandResult<T>`] rather than `Result<T, E>` so
//! every shell-facing response has the same shape:
//! `{ success: bool, data: T | null, error: string | null }`.
//! The shell can always check `result.success` without wrapping the call in
//! its own error handling.
//!
//! # Why `std::sync::Mutex` (not an async mutex)?
//!
//! The backend performs synchronous, blocking file I/O and runs no async
//! runtime, so there is no task to suspend while waiting for the lock. A
//! plain `std::sync::Mutex` held across mutate + persist is exactly the
//! serialization the catalogue needs: overlapping shell calls queue up and
//! can never interleave a read with a half-finished write.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::warn;

use cmdstash_core::CommandGroup;

use crate::application::manage_catalogue::CatalogueManager;
use crate::infrastructure::storage::{ConfigStore, StoreError};

// ── Shared application state ──────────────────────────────────────────────────

/// Application state shared between shell commands.
///
/// One lock guards both the in-memory catalogue and the persist step; a
/// command that mutates holds it from the first memory change until the
/// file write completes.
pub struct AppState {
    catalogue: Mutex<CatalogueManager<ConfigStore>>,
}

impl AppState {
    /// Creates the state with the store discovered next to the executable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PathResolution`] when the executable's
    /// location cannot be determined; without it there is nowhere to
    /// persist, so this is the one startup failure that is not degradable.
    pub fn new() -> Result<Self, StoreError> {
        Ok(Self::with_store(ConfigStore::discover()?))
    }

    /// Creates the state over an explicit store, used by tests to point the
    /// whole backend at a temporary file.
    pub fn with_store(store: ConfigStore) -> Self {
        Self {
            catalogue: Mutex::new(CatalogueManager::new(store)),
        }
    }

    fn manager(&self) -> MutexGuard<'_, CatalogueManager<ConfigStore>> {
        // A poisoned lock means a previous command panicked; the catalogue
        // itself is still structurally sound, so keep serving.
        self.catalogue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Response wrapper ──────────────────────────────────────────────────────────

/// Unified response wrapper used by all shell commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// ── Shell commands ────────────────────────────────────────────────────────────

/// Startup command: seeds the catalogue file if absent and loads it.
///
/// Initialization failure is reported in the result but never leaves the
/// backend unusable: the catalogue stays empty and every other command
/// keeps working, so the shell may show either an empty list or an error
/// banner, its choice.
pub fn init_catalogue(state: &AppState) -> CommandResult<Vec<CommandGroup>> {
    let mut manager = state.manager();
    match manager.initialize() {
        Ok(()) => CommandResult::ok(manager.list().into_groups()),
        Err(e) => {
            warn!("catalogue initialization failed, starting empty: {e}");
            CommandResult::err(e.to_string())
        }
    }
}

/// Returns all command groups in display order.
pub fn get_commands(state: &AppState) -> CommandResult<Vec<CommandGroup>> {
    CommandResult::ok(state.manager().list().into_groups())
}

/// Appends a new group at the end of the catalogue and persists.
pub fn add_command(state: &AppState, group: CommandGroup) -> CommandResult<()> {
    match state.manager().add(group) {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Replaces the group at `index` and persists.
pub fn update_command(state: &AppState, index: usize, group: CommandGroup) -> CommandResult<()> {
    match state.manager().update(index, group) {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Deletes the group at `index` and persists. Later groups shift down, so
/// the shell must refresh its list before issuing another positional call.
pub fn delete_command(state: &AppState, index: usize) -> CommandResult<()> {
    match state.manager().delete(index) {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Re-reads `config.yaml` from disk and returns the refreshed groups.
///
/// On failure the in-memory catalogue is untouched and the previous content
/// remains what `get_commands` serves.
pub fn reload_commands(state: &AppState) -> CommandResult<Vec<CommandGroup>> {
    let mut manager = state.manager();
    match manager.reload() {
        Ok(()) => CommandResult::ok(manager.list().into_groups()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdstash_core::CommandItem;
    use tempfile::tempdir;

    fn group(name: &str) -> CommandGroup {
        CommandGroup {
            name: name.to_string(),
            items: vec![CommandItem {
                description: "say hi".to_string(),
                command: "echo hi".to_string(),
            }],
        }
    }

    fn temp_state() -> (AppState, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let state = AppState::with_store(ConfigStore::at(dir.path().join("config.yaml")));
        (state, dir)
    }

    #[test]
    fn test_command_result_shapes() {
        let ok: CommandResult<u32> = CommandResult::ok(7);
        assert!(ok.success);
        assert_eq!(ok.data, Some(7));
        assert!(ok.error.is_none());

        let err: CommandResult<u32> = CommandResult::err("boom");
        assert!(!err.success);
        assert!(err.data.is_none());
        assert_eq!(err.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_init_catalogue_seeds_and_returns_defaults() {
        let (state, _dir) = temp_state();

        let result = init_catalogue(&state);

        assert!(result.success);
        let groups = result.data.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Win-AddUser");
    }

    #[test]
    fn test_add_then_get_round_trips_through_the_bridge() {
        let (state, _dir) = temp_state();
        init_catalogue(&state);

        assert!(add_command(&state, group("Docker")).success);

        let groups = get_commands(&state).data.unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].name, "Docker");
    }

    #[test]
    fn test_update_command_invalid_index_reports_error() {
        let (state, _dir) = temp_state();
        init_catalogue(&state);

        let result = update_command(&state, 9, group("x"));

        assert!(!result.success);
        assert!(
            result.error.as_deref().unwrap().contains("invalid group index"),
            "got {:?}",
            result.error
        );
        // The catalogue is untouched.
        assert_eq!(get_commands(&state).data.unwrap().len(), 1);
    }

    #[test]
    fn test_delete_command_shifts_positions() {
        let (state, _dir) = temp_state();
        init_catalogue(&state);
        add_command(&state, group("second"));

        assert!(delete_command(&state, 0).success);

        let groups = get_commands(&state).data.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "second");
    }

    #[test]
    fn test_init_failure_reports_error_but_backend_stays_usable() {
        // Arrange: point the store into a directory that does not exist, so
        // seeding cannot create the file.
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("config.yaml");
        let state = AppState::with_store(ConfigStore::at(missing));

        // Act
        let result = init_catalogue(&state);

        // Assert: explicit failure, then an empty but working catalogue.
        assert!(!result.success);
        assert!(result.error.is_some());
        let listed = get_commands(&state);
        assert!(listed.success);
        assert!(listed.data.unwrap().is_empty());
    }

    #[test]
    fn test_reload_commands_failure_keeps_previous_listing() {
        let (state, dir) = temp_state();
        init_catalogue(&state);
        let before = get_commands(&state).data.unwrap();

        std::fs::write(dir.path().join("config.yaml"), "][ not yaml").unwrap();
        let result = reload_commands(&state);

        assert!(!result.success);
        assert_eq!(get_commands(&state).data.unwrap(), before);
    }
}
