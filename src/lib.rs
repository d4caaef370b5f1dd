//! rift library crate — re-exports for integration tests.
//!
//! The primary interface is the `rift` binary. This lib.rs exposes the
//! domain modules so that integration tests can exercise the parser, store,
//! resolution engine, diff engine, and git collaborator directly without
//! going through the CLI.

pub mod config;
pub mod diff;
pub mod document;
pub mod error;
pub mod git;
pub mod model;
pub mod parse;
pub mod session;
pub mod store;
pub mod telemetry;

// Binary-only modules (status, show, resolve, revert, strip, done) are
// declared in main.rs — presentation never leaks into the library.
