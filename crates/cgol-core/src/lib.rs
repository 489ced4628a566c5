//! Core types and utilities shared by the CGoL simulation engine, service and client.

pub mod types;
pub mod config;
pub mod error;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;
