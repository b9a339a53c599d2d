//! `scout-runner` library crate.
//!
//! Re-exports the configuration module for integration testing. The
//! binary entrypoint lives in `main.rs`.

pub mod config;
