//! This module provides reusable test utilities:
//! - In-memory WordPress / WooCommerce test databases
//! - Test configuration builders
//! - Common test data

// Not every test binary uses every fixture
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod test_config;
pub mod test_data;
pub mod test_database;

// Re-export commonly used items
pub use test_config::{test_config, TestConfigBuilder};
pub use test_data::*;
pub use test_database::{Schema, TestDatabase};
