//! SWAPI Console Library
//!
//! This module exposes the fetch/cache core, its orchestration and the
//! trigger server for use by the binary and integration tests.

pub mod cache;
pub mod cli;
pub mod data;
pub mod logging;
pub mod metrics;
pub mod orchestrator;
pub mod server;
pub mod state;
pub mod ui;
