//! Per-cell CRS table
//!
//! Holds the reference signals of every configured antenna port for every
//! slot of a radio frame, so the transmit path only copies values per slot.

use super::refsignal::CellReferenceSignal;
use super::resource_grid::SlotGrid;
use super::sequence::{LtePrs, SequenceGenerator};
use crate::LayerError;
use common::types::{LteCell, SLOTS_PER_FRAME};
use tracing::{debug, info};

/// CRS of one cell for a full radio frame
#[derive(Debug, Clone, Default)]
pub struct CellRsTable {
    /// Cell the table was built for, `None` when released
    cell: Option<LteCell>,
    /// Sets indexed by `port * SLOTS_PER_FRAME + ns`
    sets: Vec<CellReferenceSignal>,
}

impl CellRsTable {
    /// Build the table with the LTE pseudo-random sequence
    pub fn new(cell: &LteCell) -> Result<Self, LayerError> {
        Self::new_with(cell, &LtePrs)
    }

    /// Build the table drawing bits from `prs`
    pub fn new_with<G>(cell: &LteCell, prs: &G) -> Result<Self, LayerError>
    where
        G: SequenceGenerator + ?Sized,
    {
        cell.validate()?;

        let mut sets = Vec::with_capacity(cell.nof_ports as usize * SLOTS_PER_FRAME as usize);
        for port in 0..cell.nof_ports {
            for ns in 0..SLOTS_PER_FRAME {
                sets.push(CellReferenceSignal::generate_with(port, ns, cell, prs)?);
            }
        }

        info!("CRS table ready: PCI {}, {} PRB, {} ports, {:?} CP",
              cell.id.0, cell.nof_prb, cell.nof_ports, cell.cp);

        Ok(Self {
            cell: Some(*cell),
            sets,
        })
    }

    /// Cell configuration, `None` when released
    pub fn cell(&self) -> Option<&LteCell> {
        self.cell.as_ref()
    }

    /// Number of antenna ports in the table
    pub fn nof_ports(&self) -> u8 {
        self.cell.map(|c| c.nof_ports).unwrap_or(0)
    }

    /// Reference signals of `port` in slot `ns`
    pub fn get(&self, port: u8, ns: u8) -> Option<&CellReferenceSignal> {
        if port >= self.nof_ports() || ns >= SLOTS_PER_FRAME {
            return None;
        }
        self.sets.get(port as usize * SLOTS_PER_FRAME as usize + ns as usize)
    }

    /// Write slot `ns` of every port into its grid (`grids[port]`)
    pub fn put_slot(&self, ns: u8, grids: &mut [SlotGrid]) -> Result<(), LayerError> {
        let cell = self.cell.ok_or_else(|| {
            LayerError::InvalidInput("CRS table not configured".to_string())
        })?;
        if ns >= SLOTS_PER_FRAME {
            return Err(LayerError::InvalidInput(format!("slot {}", ns)));
        }
        if grids.len() != cell.nof_ports as usize {
            return Err(LayerError::InvalidInput(
                format!("{} grids for {} ports", grids.len(), cell.nof_ports)
            ));
        }
        if let Some(grid) = grids.iter().find(|g| {
            g.nof_prb() != cell.nof_prb || g.symbols_per_slot() != cell.symbols_per_slot()
        }) {
            return Err(LayerError::InvalidInput(format!(
                "grid of {} PRB x {} symbols does not match cell",
                grid.nof_prb(), grid.symbols_per_slot()
            )));
        }

        for (port, grid) in grids.iter_mut().enumerate() {
            let rs = self.get(port as u8, ns).ok_or_else(|| {
                LayerError::InvalidInput(format!("no CRS for port {} slot {}", port, ns))
            })?;
            let slot = grid.as_slice_mut().ok_or_else(|| {
                LayerError::InvalidInput("slot grid is not contiguous".to_string())
            })?;
            rs.put(slot)?;
        }

        debug!("Mapped CRS of slot {} on {} ports", ns, grids.len());
        Ok(())
    }

    /// Release every set
    pub fn release(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
