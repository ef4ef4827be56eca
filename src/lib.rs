//! Session tracker for code editors. Consumes editor events (focus switches, edits, saves)
//! from a host feed and accumulates per-file time statistics, reported as plain text lines.
//! The editor side only needs a thin shim that pipes events as json lines.
//!

pub mod cli;
pub mod host;
pub mod tracker;
pub mod utils;
