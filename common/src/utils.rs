//! Common Utilities
//!
//! Resource grid addressing and slot/frame helpers shared by the PHY layers

use crate::types::{CyclicPrefix, SLOTS_PER_FRAME, SUBCARRIERS_PER_RB};
use tracing::trace;

/// Linear offset of a resource element inside a slot buffer.
///
/// The slot buffer is laid out symbol-major: all `12 * nof_prb` subcarriers
/// of symbol 0, then symbol 1, and so on.
pub fn sample_index(nof_prb: u16, symbol: u8, subcarrier: u16) -> usize {
    symbol as usize * nof_prb as usize * SUBCARRIERS_PER_RB as usize + subcarrier as usize
}

/// Number of resource elements in one slot
pub fn slot_len(nof_prb: u16, cp: CyclicPrefix) -> usize {
    let len = cp.symbols_per_slot() as usize * nof_prb as usize * SUBCARRIERS_PER_RB as usize;

    trace!("Slot buffer of {} REs for {} PRB, {:?} CP", len, nof_prb, cp);

    len
}

/// Slot and frame numbering
pub mod time {
    use super::SLOTS_PER_FRAME;

    /// Subframe index carrying the given slot
    pub fn subframe_of_slot(ns: u8) -> u8 {
        (ns % SLOTS_PER_FRAME) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_index() {
        assert_eq!(sample_index(6, 0, 0), 0);
        assert_eq!(sample_index(6, 0, 71), 71);
        assert_eq!(sample_index(6, 1, 0), 72);
        assert_eq!(sample_index(25, 4, 3), 4 * 300 + 3);
    }

    #[test]
    fn test_slot_len() {
        assert_eq!(slot_len(6, CyclicPrefix::Normal), 7 * 72);
        assert_eq!(slot_len(100, CyclicPrefix::Extended), 6 * 1200);

        // Last RE of the slot addresses the last buffer entry
        assert_eq!(sample_index(6, 6, 71) + 1, slot_len(6, CyclicPrefix::Normal));
    }

    #[test]
    fn test_slot_numbering() {
        assert_eq!(time::subframe_of_slot(0), 0);
        assert_eq!(time::subframe_of_slot(19), 9);
        assert_eq!(time::subframe_of_slot(21), 0);
    }
}
