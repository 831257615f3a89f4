/// Pseudo-random sequence generation
/// Based on 3GPP TS 36.211 Section 7.2

use crate::LayerError;
use tracing::trace;

/// Number of initial shifts discarded before output (N_c)
const NC: usize = 1600;

/// Mask of the 31-bit shift registers
const MASK_31: u32 = 0x7FFFFFFF;

/// Source of pseudo-random bits.
///
/// Implementations must be deterministic in `(c_init, length)` and safe to
/// call from several threads at once.
pub trait SequenceGenerator {
    /// Produce `length` bits (one per byte, 0 or 1) for the given seed
    fn produce(&self, c_init: u32, length: usize) -> Result<Vec<u8>, LayerError>;
}

/// Length-31 Gold sequence generator
#[derive(Debug, Clone)]
pub struct GoldSequenceGenerator {
    x1: u32,
    x2: u32,
}

impl GoldSequenceGenerator {
    /// Create new generator with initialization value
    pub fn new(c_init: u32) -> Self {
        // x1(0) = 1, x1(n) = 0 for n = 1..30
        let x1 = 1;
        let x2 = c_init & MASK_31;

        let mut lfsr = Self { x1, x2 };
        for _ in 0..NC {
            lfsr.advance();
        }
        lfsr
    }

    /// Advance LFSR state
    fn advance(&mut self) {
        // x1(n+31) = (x1(n+3) + x1(n)) mod 2
        let x1_new = ((self.x1 >> 3) ^ self.x1) & 1;
        self.x1 = ((self.x1 >> 1) | (x1_new << 30)) & MASK_31;

        // x2(n+31) = (x2(n+3) + x2(n+2) + x2(n+1) + x2(n)) mod 2
        let x2_new = ((self.x2 >> 3) ^ (self.x2 >> 2) ^ (self.x2 >> 1) ^ self.x2) & 1;
        self.x2 = ((self.x2 >> 1) | (x2_new << 30)) & MASK_31;
    }

    /// Generate next bit from the sequence
    pub fn next_bit(&mut self) -> u8 {
        let c = (self.x1 ^ self.x2) & 1;
        self.advance();
        c as u8
    }
}

/// LTE pseudo-random sequence c(n)
#[derive(Debug, Clone, Copy, Default)]
pub struct LtePrs;

impl SequenceGenerator for LtePrs {
    fn produce(&self, c_init: u32, length: usize) -> Result<Vec<u8>, LayerError> {
        if c_init > MASK_31 {
            return Err(LayerError::SequenceFailure(
                format!("c_init {:#x} exceeds 31 bits", c_init)
            ));
        }

        let mut bits = Vec::new();
        bits.try_reserve_exact(length).map_err(|e| {
            LayerError::SequenceFailure(format!("cannot hold {} bits: {}", length, e))
        })?;

        let mut lfsr = GoldSequenceGenerator::new(c_init);
        bits.extend((0..length).map(|_| lfsr.next_bit()));

        trace!("Generated {} PRS bits for c_init={:#x}", length, c_init);
        Ok(bits)
    }
}
