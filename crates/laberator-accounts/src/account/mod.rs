//! Account management module.
//!
//! Provides the account model and the directory that stores accounts.

mod directory;
mod model;

pub use directory::AccountDirectory;
pub use model::{Account, AccountId};
