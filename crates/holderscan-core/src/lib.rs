//! Core domain + application logic for holderscan.
//!
//! This crate is intentionally framework-agnostic. Telegram and the Dune
//! warehouse live behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod ports;
pub mod report;
pub mod security;

pub use errors::{Error, Result};
