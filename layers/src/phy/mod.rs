//! Physical Layer (PHY) Submodules
//!
//! This module contains the LTE downlink cell-specific reference signals
//! according to 3GPP TS 36.211.

pub mod sequence;
pub mod refsignal;
pub mod resource_grid;
pub mod cell_rs;

// Re-export commonly used types
pub use sequence::{GoldSequenceGenerator, LtePrs, SequenceGenerator};
pub use refsignal::{CellReferenceSignal, ReferenceSymbol, refsignal_k, refsignal_v};
pub use resource_grid::{ResourceElement, SlotGrid};
pub use cell_rs::CellRsTable;
