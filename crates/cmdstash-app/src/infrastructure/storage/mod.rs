//! Storage infrastructure: catalogue file persistence.
//!
//! This module is the only part of the backend that touches the filesystem.
//! The `config` sub-module owns the file-path resolution and the YAML
//! serialization; the [`CatalogueStore`] trait is the seam the application
//! layer is injected with, so unit tests can substitute the in-memory
//! [`mock::MemoryStore`] and exercise failure paths without touching disk.

use std::path::PathBuf;

use thiserror::Error;

use cmdstash_core::Catalogue;

pub mod config;
pub mod mock;

pub use config::ConfigStore;

/// Error type for catalogue persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The directory containing the running executable could not be
    /// determined, so there is nowhere to put `config.yaml`.
    #[error("could not determine the executable's directory: {0}")]
    PathResolution(#[source] std::io::Error),

    /// The catalogue file is missing or unreadable.
    #[error("failed to read catalogue file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalogue file could not be created or replaced.
    #[error("failed to write catalogue file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not valid YAML of the catalogue shape.
    #[error("catalogue file {path} is not valid YAML: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The catalogue could not be serialized to YAML.
    #[error("failed to serialize catalogue: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

/// Persistence contract for the snippet catalogue.
///
/// The catalogue is always persisted as a whole: `save` is a full-replace
/// write, never an incremental patch. Implementations must guarantee that a
/// failed `load` produces no partial catalogue and that a failed `save`
/// leaves the previously persisted content intact.
pub trait CatalogueStore: Send {
    /// Creates the backing file seeded with the built-in default catalogue
    /// if it does not exist yet. Does nothing when the file is present.
    fn ensure_initialized(&self) -> Result<(), StoreError>;

    /// Reads and deserializes the full catalogue.
    fn load(&self) -> Result<Catalogue, StoreError>;

    /// Serializes `catalogue` and replaces the stored copy with it.
    fn save(&self, catalogue: &Catalogue) -> Result<(), StoreError>;
}
