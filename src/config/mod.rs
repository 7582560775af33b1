//! Configuration module for Aureon
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Report fetching preferences

pub mod paths;
pub mod settings;

pub use paths::AureonPaths;
pub use settings::{FetchSettings, Settings};
