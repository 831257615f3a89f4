//! Common Types for the LTE downlink PHY
//!
//! Defines the cell configuration and the small value types shared by the
//! reference signal layers

use serde::{Deserialize, Serialize};
use num_derive::{FromPrimitive, ToPrimitive};
use thiserror::Error;

/// Maximum number of downlink resource blocks (20 MHz)
pub const MAX_PRB: u16 = 110;

/// Minimum number of downlink resource blocks (1.4 MHz)
pub const MIN_PRB: u16 = 6;

/// Maximum number of cell-specific antenna ports
pub const MAX_PORTS: u8 = 4;

/// Number of slots in a 10 ms radio frame
pub const SLOTS_PER_FRAME: u8 = 20;

/// Number of subcarriers per resource block
pub const SUBCARRIERS_PER_RB: u16 = 12;

/// Physical Cell Identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PhysicalCellId(pub u16);

impl PhysicalCellId {
    /// Maximum valid LTE PCI value (0-503)
    pub const MAX: u16 = 503;

    /// Create a new PCI with validation
    pub fn new(value: u16) -> Option<Self> {
        if value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Frequency shift of the cell-specific reference signals (PCI mod 6)
    pub fn v_shift(&self) -> u8 {
        (self.0 % 6) as u8
    }
}

/// Cyclic prefix length class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclicPrefix {
    /// Normal CP, 7 OFDM symbols per slot
    #[default]
    Normal,
    /// Extended CP, 6 OFDM symbols per slot
    Extended,
}

impl CyclicPrefix {
    /// Number of OFDM symbols per slot
    pub fn symbols_per_slot(&self) -> u8 {
        match self {
            CyclicPrefix::Normal => 7,
            CyclicPrefix::Extended => 6,
        }
    }

    /// N_cp term of the reference signal seed (1 for normal, 0 for extended)
    pub fn n_cp(&self) -> u32 {
        match self {
            CyclicPrefix::Normal => 1,
            CyclicPrefix::Extended => 0,
        }
    }
}

/// Cell-specific antenna port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum AntennaPort {
    Port0 = 0,
    Port1 = 1,
    Port2 = 2,
    Port3 = 3,
}

impl AntennaPort {
    /// Get the port number
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Number of OFDM symbols per slot carrying reference signals
    pub fn pilot_symbol_count(&self) -> usize {
        match self {
            AntennaPort::Port0 | AntennaPort::Port1 => 2,
            AntennaPort::Port2 | AntennaPort::Port3 => 1,
        }
    }

    /// OFDM symbols of a slot carrying reference signals for this port
    pub fn pilot_symbols(&self, cp: CyclicPrefix) -> Vec<u8> {
        match self {
            AntennaPort::Port0 | AntennaPort::Port1 => vec![0, cp.symbols_per_slot() - 3],
            AntennaPort::Port2 | AntennaPort::Port3 => vec![1],
        }
    }
}

/// Errors raised by cell configuration validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellConfigError {
    #[error("Invalid PCI {0} (max {max})", max = PhysicalCellId::MAX)]
    InvalidPci(u16),

    #[error("Invalid number of PRB {0} (expected {min}-{max})", min = MIN_PRB, max = MAX_PRB)]
    InvalidNofPrb(u16),

    #[error("Invalid number of antenna ports {0} (expected 1, 2 or {max})", max = MAX_PORTS)]
    InvalidNofPorts(u8),
}

/// LTE cell configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LteCell {
    /// Physical cell ID
    pub id: PhysicalCellId,
    /// Number of downlink resource blocks
    pub nof_prb: u16,
    /// Number of cell-specific antenna ports
    #[serde(default = "default_nof_ports")]
    pub nof_ports: u8,
    /// Cyclic prefix
    #[serde(default)]
    pub cp: CyclicPrefix,
}

fn default_nof_ports() -> u8 {
    1
}

impl LteCell {
    /// Create a new cell configuration, validating every field
    pub fn new(
        id: u16,
        nof_prb: u16,
        nof_ports: u8,
        cp: CyclicPrefix,
    ) -> Result<Self, CellConfigError> {
        let cell = Self {
            id: PhysicalCellId(id),
            nof_prb,
            nof_ports,
            cp,
        };
        cell.validate()?;
        Ok(cell)
    }

    /// Check the configuration and report the first offending field
    pub fn validate(&self) -> Result<(), CellConfigError> {
        if self.id.0 > PhysicalCellId::MAX {
            return Err(CellConfigError::InvalidPci(self.id.0));
        }
        if !(MIN_PRB..=MAX_PRB).contains(&self.nof_prb) {
            return Err(CellConfigError::InvalidNofPrb(self.nof_prb));
        }
        if !matches!(self.nof_ports, 1 | 2 | MAX_PORTS) {
            return Err(CellConfigError::InvalidNofPorts(self.nof_ports));
        }
        Ok(())
    }

    /// Number of OFDM symbols per slot
    pub fn symbols_per_slot(&self) -> u8 {
        self.cp.symbols_per_slot()
    }

    /// Number of used subcarriers
    pub fn nof_subcarriers(&self) -> usize {
        self.nof_prb as usize * SUBCARRIERS_PER_RB as usize
    }
}
