//! YAML-based catalogue persistence.
//!
//! Reads and writes the catalogue to `config.yaml` in the directory that
//! contains the running executable. Keeping the file next to the binary
//! (instead of a platform config directory) makes the tool relocatable: the
//! executable and its catalogue move together as one folder, on a USB stick
//! if need be.
//!
//! # What is YAML? (for beginners)
//!
//! YAML is a human-editable data format built from indented mappings and
//! `-`-prefixed sequences. The catalogue file is a sequence of group
//! mappings:
//!
//! ```yaml
//! - name: Win-AddUser
//!   command:
//!   - desc: Add a user and set the password
//!     cmd: net user ${username} ${password} /add
//!   - desc: Add the user to the administrators group
//!     cmd: net localgroup administrators ${username} /add
//! ```
//!
//! The `serde` library provides automatic serialisation/deserialisation
//! between the Rust structs in `cmdstash-core` and this text, with
//! `serde_yaml` supplying the YAML front end.
//!
//! # Atomic replacement
//!
//! `save` never writes into `config.yaml` directly. It serializes into a
//! temporary file in the same directory and renames it over the target, so
//! an interrupted or failed write leaves the last successfully persisted
//! content untouched rather than a truncated file.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

use cmdstash_core::{default_catalogue, Catalogue};

use super::{CatalogueStore, StoreError};

/// File name of the catalogue, always adjacent to the executable.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// File-backed [`CatalogueStore`] implementation.
///
/// The path is resolved once at construction and owned by the store, so
/// tests can construct isolated instances pointing at temporary files
/// instead of sharing a process-wide location.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Resolves the store location as `<executable directory>/config.yaml`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PathResolution`] when the executable's own
    /// location cannot be determined.
    pub fn discover() -> Result<Self, StoreError> {
        let exe = std::env::current_exe().map_err(StoreError::PathResolution)?;
        let dir = exe.parent().ok_or_else(|| {
            StoreError::PathResolution(std::io::Error::other(
                "executable path has no parent directory",
            ))
        })?;
        Ok(Self::at(dir.join(CONFIG_FILE_NAME)))
    }

    /// Creates a store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The resolved catalogue file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogueStore for ConfigStore {
    /// Seeds `config.yaml` with the built-in default catalogue on first run.
    ///
    /// The seeded file is created owner read/write, group/other read-only
    /// (`0644`) on POSIX systems. An existing file is never touched, user
    /// edits survive restarts.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] when the file cannot be created, or
    /// [`StoreError::Serialize`] if the defaults fail to serialize.
    fn ensure_initialized(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }
        info!(path = %self.path.display(), "no catalogue file found, seeding defaults");
        self.save(&default_catalogue())
    }

    /// Loads the full catalogue from disk.
    ///
    /// An empty or `null` document is an empty catalogue, not a parse error;
    /// a user may truncate the file to start over.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] when the file is missing or unreadable,
    /// or [`StoreError::Parse`] when the content does not match the
    /// catalogue shape. Failure is atomic: no partial catalogue is produced.
    fn load(&self) -> Result<Catalogue, StoreError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        let catalogue = serde_yaml::from_str::<Option<Catalogue>>(&content)
            .map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?
            .unwrap_or_default();
        Ok(catalogue)
    }

    /// Serializes the full catalogue and atomically replaces the file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialize`] if serialization fails, or
    /// [`StoreError::Write`] for any file-system failure. On error the
    /// previously persisted file is left intact.
    fn save(&self, catalogue: &Catalogue) -> Result<(), StoreError> {
        let text = serde_yaml::to_string(catalogue).map_err(StoreError::Serialize)?;

        // The temp file must live in the target directory: rename(2) is only
        // atomic within one filesystem.
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let write_err = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(text.as_bytes()).map_err(write_err)?;

        // Rename swaps the inode, so the replaced file would otherwise end up
        // with the temp file's private mode. Carry over the permissions of
        // the file being replaced, or apply the creation policy for a new one.
        match std::fs::metadata(&self.path) {
            Ok(meta) => tmp.as_file().set_permissions(meta.permissions()).map_err(write_err)?,
            Err(_) => {
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    tmp.as_file()
                        .set_permissions(std::fs::Permissions::from_mode(0o644))
                        .map_err(write_err)?;
                }
            }
        }

        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}
