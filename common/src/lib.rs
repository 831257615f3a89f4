//! Common Utilities and Types Library
//!
//! This crate provides the cell configuration, constants and grid addressing
//! shared by the LTE downlink PHY layers.

pub mod types;
pub mod utils;

// Re-export commonly used items
pub use types::*;
pub use utils::*;
