//! Common library for the user registry
//!
//! This crate provides functionality shared by the registry service:
//! configuration loading and the associated error types.
//!
//! ```rust,no_run
//! use common::config::ServerConfig;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Listening on {}", config.bind_address());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
