//! ducklink-cli library entry point.
//!
//! Holds everything the `ducklink` binary does apart from argument parsing
//! and process setup, so command behaviour can be tested without spawning
//! the binary.

pub mod commands;
pub mod config;
pub mod logging;
pub mod output;
