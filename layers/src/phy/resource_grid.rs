//! Resource Grid for one LTE downlink slot
//!
//! Holds the resource elements of a single slot for one antenna port, laid
//! out so that the flat buffer matches `common::sample_index`.

use crate::LayerError;
use common::types::{LteCell, SUBCARRIERS_PER_RB};
use common::utils::sample_index;
use ndarray::{Array2, ArrayView1};
use num_complex::Complex32;
use num_traits::Zero;
use tracing::{debug, warn};

/// Resource element in the grid
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResourceElement {
    /// Subcarrier index (0 to N_RB * 12 - 1)
    pub subcarrier: u16,
    /// OFDM symbol index within slot (0 to 6 for normal CP)
    pub symbol: u8,
    /// Complex value
    pub value: Complex32,
}

/// Resource grid for one slot
#[derive(Debug, Clone)]
pub struct SlotGrid {
    /// 2D grid: [symbols, subcarriers]
    grid: Array2<Complex32>,
    /// Number of resource blocks
    nof_prb: u16,
    /// Number of symbols per slot
    symbols_per_slot: u8,
}

impl SlotGrid {
    /// Create a zeroed slot grid for the given cell
    pub fn new(cell: &LteCell) -> Result<Self, LayerError> {
        cell.validate()?;

        let symbols_per_slot = cell.symbols_per_slot();
        let nof_subcarriers = cell.nof_subcarriers();

        debug!("Creating slot grid with dimensions: ({}, {})", symbols_per_slot, nof_subcarriers);
        let grid = Array2::zeros((symbols_per_slot as usize, nof_subcarriers));

        Ok(Self {
            grid,
            nof_prb: cell.nof_prb,
            symbols_per_slot,
        })
    }

    /// Number of resource blocks
    pub fn nof_prb(&self) -> u16 {
        self.nof_prb
    }

    /// Number of OFDM symbols
    pub fn symbols_per_slot(&self) -> u8 {
        self.symbols_per_slot
    }

    /// Number of subcarriers
    pub fn nof_subcarriers(&self) -> u16 {
        self.nof_prb * SUBCARRIERS_PER_RB
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.grid.fill(Complex32::zero());
    }

    /// Clear a specific symbol
    pub fn clear_symbol(&mut self, symbol: u8) {
        if symbol >= self.symbols_per_slot {
            warn!("Attempting to clear invalid symbol {} (max: {})", symbol, self.symbols_per_slot - 1);
            return;
        }

        self.grid.row_mut(symbol as usize).fill(Complex32::zero());
    }

    /// Map a resource element
    pub fn map_re(&mut self, subcarrier: u16, symbol: u8, value: Complex32) -> Result<(), LayerError> {
        if subcarrier >= self.nof_subcarriers() || symbol >= self.symbols_per_slot {
            return Err(LayerError::InvalidInput(
                format!("RE out of bounds: subcarrier={}, symbol={}", subcarrier, symbol)
            ));
        }

        self.grid[(symbol as usize, subcarrier as usize)] = value;
        Ok(())
    }

    /// Get a resource element
    pub fn get_re(&self, subcarrier: u16, symbol: u8) -> Option<Complex32> {
        self.grid.get((symbol as usize, subcarrier as usize)).copied()
    }

    /// Get symbol data as a view (no copy)
    pub fn symbol(&self, symbol: u8) -> Option<ArrayView1<Complex32>> {
        if symbol >= self.symbols_per_slot {
            return None;
        }

        Some(self.grid.row(symbol as usize))
    }

    /// Flat slot buffer, indexed with `sample_index`
    pub fn as_slice(&self) -> Option<&[Complex32]> {
        self.grid.as_slice()
    }

    /// Mutable flat slot buffer, indexed with `sample_index`
    pub fn as_slice_mut(&mut self) -> Option<&mut [Complex32]> {
        self.grid.as_slice_mut()
    }

    /// Linear offset of a resource element in the flat buffer
    pub fn offset(&self, subcarrier: u16, symbol: u8) -> usize {
        sample_index(self.nof_prb, symbol, subcarrier)
    }
}
