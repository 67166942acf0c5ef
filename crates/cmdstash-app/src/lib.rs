//! cmdstash-app library entry point.
//!
//! The backend of the CmdStash desktop application. The GUI shell links this
//! crate and registers the command functions from
//! [`infrastructure::ui_bridge`]; integration tests in `tests/` drive the
//! same public API.

pub mod application;
pub mod infrastructure;
