//! # laberator-accounts
//!
//! Account directory for the Laberator service.
//!
//! This crate provides:
//! - Account registration with unique logins
//! - Existence checks
//! - Credential validation
//! - Local storage (`SQLite`)
//! - Directory configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
pub mod config;
mod error;

pub use account::{Account, AccountDirectory, AccountId};
pub use config::DirectoryConfig;
pub use error::{Error, Result};
