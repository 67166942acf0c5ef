//! # cmdstash-core
//!
//! Domain crate for CmdStash, a personal command-snippet manager. It defines
//! the catalogue data model shared by the backend and the desktop shell.
//!
//! This crate has zero dependencies on OS APIs, the filesystem, or UI
//! frameworks. Persistence lives in `cmdstash-app`.
//!
//! # The catalogue (for beginners)
//!
//! CmdStash stores shell-command snippets the user wants to keep at hand.
//! The unit of storage is the **catalogue**: an ordered list of named
//! **command groups**, each holding an ordered list of **command items**
//! (a human-readable label plus the command template itself).
//!
//! ```text
//! Catalogue
//!  ├─ CommandGroup "Win-AddUser"
//!  │    ├─ CommandItem { description, command }
//!  │    └─ CommandItem { description, command }
//!  └─ CommandGroup "Docker"
//!       └─ ...
//! ```
//!
//! Ordering is meaningful at both levels: it drives list position in the UI
//! and index-based addressing for update/delete. Names are labels, not keys,
//! so duplicates are allowed anywhere.

pub mod domain;

// Re-export the domain types at the crate root so callers can write
// `cmdstash_core::Catalogue` instead of `cmdstash_core::domain::catalogue::Catalogue`.
pub use domain::catalogue::{
    default_catalogue, Catalogue, CatalogueError, CommandGroup, CommandItem,
};
