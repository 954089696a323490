//! Fordefi custody CLI library
//!
//! Typed client for the Fordefi HTTP API: vault creation, ERC20 transfers
//! and WETH wrapping, with ECDSA P-256 request signing.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod evm;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
