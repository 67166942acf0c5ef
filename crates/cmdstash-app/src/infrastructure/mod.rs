//! Infrastructure layer for the CmdStash backend.
//!
//! Contains the adapters that face the outside world: file-system storage
//! for the catalogue and the command bridge consumed by the desktop shell.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `cmdstash_core`, but MUST NOT be imported by the application or domain
//! layers (the `storage` trait the application consumes is the one
//! exception, it defines the seam the application is injected with).

pub mod storage;
pub mod ui_bridge;
