//! Protocol Stack Layers Library
//!
//! This crate implements the LTE downlink cell-specific reference signals
//! according to 3GPP TS 36.211.

pub mod phy;

use common::types::CellConfigError;
use thiserror::Error;

/// Common errors for protocol layers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Allocation failed: {0}")]
    AllocationFailure(String),

    #[error("Sequence generation failed: {0}")]
    SequenceFailure(String),
}

impl From<CellConfigError> for LayerError {
    fn from(e: CellConfigError) -> Self {
        LayerError::InvalidInput(format!("cell configuration: {}", e))
    }
}
