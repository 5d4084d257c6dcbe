//! HTTP request handlers for the cleaner API.
//!
//! - `cleanup` - Manual trigger and run/schedule status
//! - `common` - Response envelope shared by all handlers
//! - `health` - Liveness

pub mod cleanup;
pub mod common;
pub mod health;

pub use cleanup::*;
pub use health::*;
