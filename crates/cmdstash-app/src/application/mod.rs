//! Application layer use cases for the CmdStash backend.
//!
//! The application layer sits between the domain (the pure catalogue model
//! in `cmdstash-core`) and the infrastructure (file storage, UI bridge).
//! Use cases here orchestrate domain objects, depend on storage only
//! through the [`crate::infrastructure::storage::CatalogueStore`] trait, and
//! perform no file I/O of their own.
//!
//! # Sub-modules
//!
//! - **`manage_catalogue`** – owns the in-memory authoritative catalogue and
//!   implements the CRUD/reload contract consumed by the desktop shell.

pub mod manage_catalogue;
