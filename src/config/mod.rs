//! # Configuration Module
//!
//! This module provides the tunables shared by the CLI and the placement core.

pub mod config;

pub use config::PlacerConfig;
