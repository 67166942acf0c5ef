//! Snippet catalogue domain entity.
//!
//! The catalogue is the unit of persistence: the backend always loads and
//! saves it as a whole. Groups are addressed by position, and positions
//! shift when an earlier group is deleted, so an index is only valid at the
//! moment a call is made.
//!
//! Serialized field names (`name`, `command`, `desc`, `cmd`) are part of the
//! on-disk file format and must not change; the Rust field names are the
//! readable ones and `#[serde(rename)]` bridges the two.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when editing the catalogue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogueError {
    /// The given position does not exist in the catalogue.
    #[error("invalid group index {index}: catalogue holds {len} group(s)")]
    InvalidIndex { index: usize, len: usize },
}

/// A single labeled shell-command template.
///
/// The `command` string may contain `${...}` placeholder tokens for
/// user-supplied values (e.g. `net user ${username} ${password} /add`).
/// Placeholders are opaque here; substitution happens in the shell UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandItem {
    /// Human-readable label shown in the UI list.
    #[serde(rename = "desc")]
    pub description: String,
    /// The command template itself.
    #[serde(rename = "cmd")]
    pub command: String,
}

/// A named, ordered collection of command items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandGroup {
    /// Display name of the group. Not unique, a label only.
    pub name: String,
    /// The group's items, in display order.
    #[serde(rename = "command")]
    pub items: Vec<CommandItem>,
}

/// The full ordered collection of command groups.
///
/// Serializes as a bare YAML sequence (`#[serde(transparent)]`), matching
/// the `config.yaml` file format:
///
/// ```yaml
/// - name: Win-AddUser
///   command:
///   - desc: Add a user and set the password
///     cmd: net user ${username} ${password} /add
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalogue {
    groups: Vec<CommandGroup>,
}

impl Catalogue {
    /// Creates an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalogue from an existing ordered list of groups.
    pub fn from_groups(groups: Vec<CommandGroup>) -> Self {
        Self { groups }
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` when the catalogue holds no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Borrows the groups in display order.
    pub fn groups(&self) -> &[CommandGroup] {
        &self.groups
    }

    /// Consumes the catalogue, yielding its groups.
    pub fn into_groups(self) -> Vec<CommandGroup> {
        self.groups
    }

    /// Returns the group at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&CommandGroup> {
        self.groups.get(index)
    }

    /// Appends `group` at the end of the catalogue.
    pub fn append(&mut self, group: CommandGroup) {
        self.groups.push(group);
    }

    /// Replaces the group at `index` with `group`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::InvalidIndex`] when `index` is out of
    /// bounds; the catalogue is left unchanged.
    pub fn replace(&mut self, index: usize, group: CommandGroup) -> Result<(), CatalogueError> {
        match self.groups.get_mut(index) {
            Some(slot) => {
                *slot = group;
                Ok(())
            }
            None => Err(CatalogueError::InvalidIndex {
                index,
                len: self.groups.len(),
            }),
        }
    }

    /// Removes and returns the group at `index`. Later groups shift down by
    /// one position.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::InvalidIndex`] when `index` is out of
    /// bounds; the catalogue is left unchanged.
    pub fn remove(&mut self, index: usize) -> Result<CommandGroup, CatalogueError> {
        if index < self.groups.len() {
            Ok(self.groups.remove(index))
        } else {
            Err(CatalogueError::InvalidIndex {
                index,
                len: self.groups.len(),
            })
        }
    }
}

/// The catalogue seeded on first run, before a `config.yaml` exists.
///
/// One example group demonstrating Windows user management, so a fresh
/// install shows the user what a group looks like instead of a blank list.
pub fn default_catalogue() -> Catalogue {
    Catalogue::from_groups(vec![CommandGroup {
        name: "Win-AddUser".to_string(),
        items: vec![
            CommandItem {
                description: "Add a user and set the password".to_string(),
                command: "net user ${username} ${password} /add".to_string(),
            },
            CommandItem {
                description: "Add the user to the administrators group".to_string(),
                command: "net localgroup administrators ${username} /add".to_string(),
            },
        ],
    }])
}
