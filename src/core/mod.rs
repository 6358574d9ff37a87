//! Core module - shared infrastructure for replkit
//!
//! This module contains configuration and error handling used throughout
//! the crate.

pub mod config;
pub mod error;

pub use config::ReplConfig;
pub use error::{ReplError, Result};
