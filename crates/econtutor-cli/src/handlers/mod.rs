//! Command handlers.
//!
//! Each handler is `pub async fn execute(...) -> Result<()>` and delegates
//! to the adapter crates.

pub mod health;
pub mod invoke;
pub mod serve;
