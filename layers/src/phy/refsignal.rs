/// Cell-specific Reference Signals (CRS) for the LTE downlink
/// Based on 3GPP TS 36.211 Section 6.10.1

use super::resource_grid::ResourceElement;
use super::sequence::{LtePrs, SequenceGenerator};
use crate::LayerError;
use common::types::{AntennaPort, LteCell, MAX_PORTS, MAX_PRB, SLOTS_PER_FRAME};
use common::utils::sample_index;
use num_complex::Complex32;
use num_traits::{FromPrimitive, Zero};
use std::f32::consts::FRAC_1_SQRT_2;
use tracing::{debug, trace, warn};

/// A single pilot: value plus its position in the slot
pub type ReferenceSymbol = ResourceElement;

/// PRS bits drawn per pilot symbol, always sized for the widest bandwidth
const PRS_LEN: usize = 4 * MAX_PRB as usize;

/// Frequency shift base value v for an antenna port.
///
/// Returns `None` for ports outside 0-3.
pub fn refsignal_v(port: u8, ns: u8, l: u8) -> Option<u8> {
    match port {
        0 => Some(if l == 0 { 0 } else { 3 }),
        1 => Some(if l == 0 { 3 } else { 0 }),
        2 => Some(3 * (ns % 2)),
        3 => Some(3 + 3 * (ns % 2)),
        _ => None,
    }
}

/// Subcarrier k carrying reference index m.
///
/// `m` must stay below `2 * MAX_PRB`.
pub fn refsignal_k(m: u16, v: u8, cell_id: u16) -> u16 {
    6 * m + ((v as u16 + cell_id % 6) % 6)
}

/// Position of reference `i` of the `l`-th pilot symbol in the flat array
pub fn ref_index(l: usize, i: usize, refs_per_symbol: usize) -> usize {
    l * refs_per_symbol + i
}

/// Calculate CRS initialization value
/// c_init = 2^10 * (7 * (n_s + 1) + l + 1) * (2 * N_ID + 1) + 2 * N_ID + N_cp
///
/// Expects a slot below `SLOTS_PER_FRAME` and a cell that passed
/// `LteCell::validate`, which keeps the result within 31 bits.
pub fn refsignal_cinit(ns: u8, l: u8, cell: &LteCell) -> u32 {
    let n_id = cell.id.0 as u32;
    1024 * (7 * (ns as u32 + 1) + l as u32 + 1) * (2 * n_id + 1) + 2 * n_id + cell.cp.n_cp()
}

fn qpsk(c0: u8, c1: u8) -> Complex32 {
    Complex32::new(
        FRAC_1_SQRT_2 * (1.0 - 2.0 * c0 as f32),
        FRAC_1_SQRT_2 * (1.0 - 2.0 * c1 as f32),
    )
}

fn try_alloc<T: Clone>(len: usize, fill: T, what: &str) -> Result<Vec<T>, LayerError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|e| {
        LayerError::AllocationFailure(format!("{} ({} entries): {}", what, len, e))
    })?;
    buf.resize(len, fill);
    Ok(buf)
}

/// Reference signals of one antenna port for one slot.
///
/// `Default` is the released state: no port, no buffers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellReferenceSignal {
    /// Antenna port, `None` when released
    port: Option<AntennaPort>,
    /// Slot number the values were generated for
    ns: u8,
    /// Number of resource blocks
    nof_prb: u16,
    /// PCI mod 6
    voffset: u8,
    /// OFDM symbols carrying pilots
    symbols_ref: Vec<u8>,
    /// Pilots, symbol-major (see `ref_index`)
    refs: Vec<ReferenceSymbol>,
    /// Channel estimates at the pilot positions, filled by the estimator
    ch_est: Vec<Complex32>,
}

impl CellReferenceSignal {
    /// Generate the reference signals of `port` for slot `ns`
    pub fn generate(port: u8, ns: u8, cell: &LteCell) -> Result<Self, LayerError> {
        Self::generate_with(port, ns, cell, &LtePrs)
    }

    /// Generate the reference signals drawing bits from `prs`
    pub fn generate_with<G>(port: u8, ns: u8, cell: &LteCell, prs: &G) -> Result<Self, LayerError>
    where
        G: SequenceGenerator + ?Sized,
    {
        let antenna_port = AntennaPort::from_u8(port).ok_or_else(|| {
            warn!("Rejecting CRS for antenna port {}", port);
            LayerError::InvalidInput(format!("antenna port {} (max {})", port, MAX_PORTS - 1))
        })?;
        if ns >= SLOTS_PER_FRAME {
            warn!("Rejecting CRS for slot {}", ns);
            return Err(LayerError::InvalidInput(
                format!("slot {} (max {})", ns, SLOTS_PER_FRAME - 1)
            ));
        }
        cell.validate()?;

        let symbols_ref = antenna_port.pilot_symbols(cell.cp);
        let refs_per_symbol = 2 * cell.nof_prb as usize;
        let nof_refs = refs_per_symbol * symbols_ref.len();

        let mut refs = try_alloc(nof_refs, ReferenceSymbol::default(), "reference symbols")?;
        let ch_est = try_alloc(nof_refs, Complex32::zero(), "channel estimates")?;

        // Offset into the sequence so the used band sits at the centre of MAX_PRB
        let m_offset = (MAX_PRB - cell.nof_prb) as usize;

        for (l_idx, &l) in symbols_ref.iter().enumerate() {
            let c_init = refsignal_cinit(ns, l, cell);
            let c = prs.produce(c_init, PRS_LEN)?;
            if c.len() < PRS_LEN {
                return Err(LayerError::SequenceFailure(
                    format!("got {} bits for c_init={:#x}, need {}", c.len(), c_init, PRS_LEN)
                ));
            }

            let v = refsignal_v(port, ns, l).ok_or_else(|| {
                LayerError::InvalidInput(format!("no frequency shift for port {}", port))
            })?;

            trace!("CRS port={} ns={} l={} c_init={:#x} v={}", port, ns, l, c_init, v);

            for i in 0..refs_per_symbol {
                let mp = i + m_offset;
                refs[ref_index(l_idx, i, refs_per_symbol)] = ReferenceSymbol {
                    subcarrier: refsignal_k(i as u16, v, cell.id.0),
                    symbol: l,
                    value: qpsk(c[2 * mp], c[2 * mp + 1]),
                };
            }
        }

        debug!("Generated {} CRS for port {} slot {} (PCI {}, {} PRB)",
               nof_refs, port, ns, cell.id.0, cell.nof_prb);

        Ok(Self {
            port: Some(antenna_port),
            ns,
            nof_prb: cell.nof_prb,
            voffset: cell.id.v_shift(),
            symbols_ref,
            refs,
            ch_est,
        })
    }

    /// Regenerate the configured port for a new slot.
    ///
    /// Invalid input leaves the set untouched. An allocation or sequence
    /// failure leaves it released.
    pub fn regenerate(&mut self, ns: u8, cell: &LteCell) -> Result<(), LayerError> {
        self.regenerate_with(ns, cell, &LtePrs)
    }

    /// Regenerate the configured port for a new slot drawing bits from `prs`
    pub fn regenerate_with<G>(&mut self, ns: u8, cell: &LteCell, prs: &G) -> Result<(), LayerError>
    where
        G: SequenceGenerator + ?Sized,
    {
        let port = self.port.ok_or_else(|| {
            LayerError::InvalidInput("reference signal not configured".to_string())
        })?;
        if ns >= SLOTS_PER_FRAME {
            warn!("Rejecting CRS regeneration for slot {}", ns);
            return Err(LayerError::InvalidInput(
                format!("slot {} (max {})", ns, SLOTS_PER_FRAME - 1)
            ));
        }
        cell.validate()?;

        // Inputs are good, so only allocation or sequence failures remain
        match Self::generate_with(port.index(), ns, cell, prs) {
            Ok(next) => {
                *self = next;
                Ok(())
            }
            Err(e) => {
                self.release();
                Err(e)
            }
        }
    }

    /// Free all buffers and return to the empty state
    pub fn release(&mut self) {
        *self = Self::default();
    }

    /// Write the pilots into a slot buffer addressed with `sample_index`
    pub fn put(&self, slot: &mut [Complex32]) -> Result<(), LayerError> {
        let nof_prb = self.nof_prb;
        self.put_with(slot, move |_, symbol, subcarrier| sample_index(nof_prb, symbol, subcarrier))
    }

    /// Write the pilots into a slot buffer using a caller-supplied
    /// `(nof_prb, symbol, subcarrier) -> offset` addressing function.
    ///
    /// Nothing is written unless every offset fits the buffer.
    pub fn put_with<F>(&self, slot: &mut [Complex32], addr: F) -> Result<(), LayerError>
    where
        F: Fn(u16, u8, u16) -> usize,
    {
        self.check_addressing(slot.len(), &addr)?;

        for re in &self.refs {
            slot[addr(self.nof_prb, re.symbol, re.subcarrier)] = re.value;
        }
        Ok(())
    }

    /// Read the received values at the pilot positions, in `refs()` order
    pub fn extract(&self, slot: &[Complex32]) -> Result<Vec<Complex32>, LayerError> {
        let nof_prb = self.nof_prb;
        self.extract_with(slot, move |_, symbol, subcarrier| sample_index(nof_prb, symbol, subcarrier))
    }

    /// Read the received values at the pilot positions using `addr`
    pub fn extract_with<F>(&self, slot: &[Complex32], addr: F) -> Result<Vec<Complex32>, LayerError>
    where
        F: Fn(u16, u8, u16) -> usize,
    {
        self.check_addressing(slot.len(), &addr)?;

        Ok(self.refs
            .iter()
            .map(|re| slot[addr(self.nof_prb, re.symbol, re.subcarrier)])
            .collect())
    }

    fn check_addressing<F>(&self, len: usize, addr: &F) -> Result<(), LayerError>
    where
        F: Fn(u16, u8, u16) -> usize,
    {
        if self.is_empty() {
            return Err(LayerError::InvalidInput("reference signal not configured".to_string()));
        }
        if len == 0 {
            return Err(LayerError::InvalidInput("empty slot buffer".to_string()));
        }

        if let Some(re) = self.refs
            .iter()
            .find(|re| addr(self.nof_prb, re.symbol, re.subcarrier) >= len)
        {
            return Err(LayerError::InvalidInput(format!(
                "RE (subcarrier={}, symbol={}) outside slot buffer of {} samples",
                re.subcarrier, re.symbol, len
            )));
        }
        Ok(())
    }

    /// Antenna port, `None` when released
    pub fn port(&self) -> Option<AntennaPort> {
        self.port
    }

    /// Slot number of the current values
    pub fn ns(&self) -> u8 {
        self.ns
    }

    /// Number of resource blocks
    pub fn nof_prb(&self) -> u16 {
        self.nof_prb
    }

    /// Cell frequency shift (PCI mod 6)
    pub fn voffset(&self) -> u8 {
        self.voffset
    }

    /// OFDM symbols carrying pilots
    pub fn symbols_ref(&self) -> &[u8] {
        &self.symbols_ref
    }

    /// Number of pilots per OFDM symbol
    pub fn refs_per_symbol(&self) -> usize {
        2 * self.nof_prb as usize
    }

    /// All pilots
    pub fn refs(&self) -> &[ReferenceSymbol] {
        &self.refs
    }

    /// Pilot `i` of the `l`-th pilot-carrying symbol
    pub fn get(&self, l: usize, i: usize) -> Option<&ReferenceSymbol> {
        if l >= self.symbols_ref.len() || i >= self.refs_per_symbol() {
            return None;
        }
        self.refs.get(ref_index(l, i, self.refs_per_symbol()))
    }

    /// Number of pilots
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Channel estimates at the pilot positions
    pub fn ch_est(&self) -> &[Complex32] {
        &self.ch_est
    }

    /// Mutable channel estimate buffer for the estimator
    pub fn ch_est_mut(&mut self) -> &mut [Complex32] {
        &mut self.ch_est
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phy::resource_grid::SlotGrid;
    use common::types::CyclicPrefix;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    struct FailingPrs;

    impl SequenceGenerator for FailingPrs {
        fn produce(&self, c_init: u32, _length: usize) -> Result<Vec<u8>, LayerError> {
            Err(LayerError::SequenceFailure(format!("no bits for {:#x}", c_init)))
        }
    }

    struct ShortPrs;

    impl SequenceGenerator for ShortPrs {
        fn produce(&self, _c_init: u32, length: usize) -> Result<Vec<u8>, LayerError> {
            Ok(vec![0; length / 2])
        }
    }

    fn cell(id: u16, nof_prb: u16, cp: CyclicPrefix) -> LteCell {
        LteCell::new(id, nof_prb, 4, cp).unwrap()
    }

    #[test]
    fn test_shift_table() {
        for ns in 0..SLOTS_PER_FRAME {
            for l in [0u8, 4] {
                assert_eq!(refsignal_v(0, ns, l), Some(if l == 0 { 0 } else { 3 }));
                assert_eq!(refsignal_v(1, ns, l), Some(if l == 0 { 3 } else { 0 }));
            }
            assert_eq!(refsignal_v(2, ns, 1), Some(if ns % 2 == 0 { 0 } else { 3 }));
            assert_eq!(refsignal_v(3, ns, 1), Some(if ns % 2 == 0 { 3 } else { 6 }));
        }
        assert_eq!(refsignal_v(4, 0, 0), None);
        assert_eq!(refsignal_v(255, 1, 1), None);
    }

    #[test]
    fn test_subcarrier_mapping() {
        assert_eq!(refsignal_k(0, 0, 0), 0);
        assert_eq!(refsignal_k(1, 3, 0), 9);
        assert_eq!(refsignal_k(2, 3, 4), 13);
        assert_eq!(refsignal_k(0, 6, 1), 1);

        for cell_id in [0u16, 5, 301, 503] {
            for v in [0u8, 3, 6, 9] {
                let nof_refs = 2 * MAX_PRB;
                let ks: Vec<u16> = (0..nof_refs).map(|m| refsignal_k(m, v, cell_id)).collect();
                assert!(ks.windows(2).all(|w| w[0] < w[1]));
                assert!(ks.iter().all(|&k| k < 6 * nof_refs));
            }
        }
    }

    #[test]
    fn test_cinit() {
        let c = cell(0, 6, CyclicPrefix::Normal);
        assert_eq!(refsignal_cinit(0, 0, &c), 1024 * 8 + 1);

        let c = cell(10, 6, CyclicPrefix::Extended);
        assert_eq!(refsignal_cinit(3, 3, &c), 1024 * (7 * 4 + 4) * 21 + 20);

        // Largest seed stays within 31 bits
        let c = cell(503, 6, CyclicPrefix::Normal);
        assert!(refsignal_cinit(19, 4, &c) < 1 << 31);
    }

    #[test]
    fn test_port0_scenario() {
        let c = cell(0, 6, CyclicPrefix::Normal);
        let rs = CellReferenceSignal::generate(0, 0, &c).unwrap();

        assert_eq!(rs.symbols_ref(), &[0, 4]);
        assert_eq!(rs.len(), 24);
        assert_eq!(rs.voffset(), 0);
        assert_eq!(rs.ch_est().len(), 24);

        for m in 0..12 {
            let re = rs.get(0, m).unwrap();
            assert_eq!(re.symbol, 0);
            assert_eq!(re.subcarrier as usize, 6 * m);

            let re = rs.get(1, m).unwrap();
            assert_eq!(re.symbol, 4);
            assert_eq!(re.subcarrier as usize, 6 * m + 3);
        }
        assert!(rs.get(2, 0).is_none());
        assert!(rs.get(0, 12).is_none());
    }

    #[test]
    fn test_values_follow_prs() {
        let c = cell(0, 6, CyclicPrefix::Normal);
        let rs = CellReferenceSignal::generate(0, 0, &c).unwrap();

        let bits = LtePrs.produce(refsignal_cinit(0, 0, &c), PRS_LEN).unwrap();
        for i in 0..12 {
            let mp = i + (MAX_PRB - 6) as usize;
            assert_eq!(rs.get(0, i).unwrap().value, qpsk(bits[2 * mp], bits[2 * mp + 1]));
        }
    }

    #[test]
    fn test_pilots_centred_in_max_bandwidth() {
        // Same absolute position relative to the carrier centre gives the same value
        let narrow = CellReferenceSignal::generate(1, 7, &cell(42, 6, CyclicPrefix::Normal)).unwrap();
        let wide = CellReferenceSignal::generate(1, 7, &cell(42, 25, CyclicPrefix::Normal)).unwrap();

        let shift = (25 - 6) as usize;
        for l in 0..2 {
            for i in 0..12 {
                assert_eq!(narrow.get(l, i).unwrap().value, wide.get(l, i + shift).unwrap().value);
            }
        }
    }

    #[test]
    fn test_ports_2_3_single_symbol() {
        let c = cell(7, 15, CyclicPrefix::Extended);
        for port in [2u8, 3] {
            let rs = CellReferenceSignal::generate(port, 1, &c).unwrap();
            assert_eq!(rs.symbols_ref(), &[1]);
            assert_eq!(rs.len(), 30);
            assert!(rs.refs().iter().all(|re| re.symbol == 1));
        }

        let rs = CellReferenceSignal::generate(0, 1, &c).unwrap();
        assert_eq!(rs.symbols_ref(), &[0, 3]);
    }

    #[test]
    fn test_deterministic() {
        let c = cell(123, 50, CyclicPrefix::Normal);
        let a = CellReferenceSignal::generate(2, 11, &c).unwrap();
        let b = CellReferenceSignal::generate(2, 11, &c).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invariants_random_cells() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..200 {
            let cp = if rng.gen_bool(0.5) { CyclicPrefix::Normal } else { CyclicPrefix::Extended };
            let c = cell(rng.gen_range(0..=503), rng.gen_range(6..=MAX_PRB), cp);
            let port = rng.gen_range(0..MAX_PORTS);
            let ns = rng.gen_range(0..SLOTS_PER_FRAME);

            let rs = CellReferenceSignal::generate(port, ns, &c).unwrap();

            let pilot_symbols = AntennaPort::from_u8(port).unwrap().pilot_symbol_count();
            assert_eq!(rs.len(), 2 * c.nof_prb as usize * pilot_symbols);
            assert_eq!(rs.ch_est().len(), rs.len());

            let mut seen = HashSet::new();
            for re in rs.refs() {
                assert!((re.subcarrier as usize) < 12 * c.nof_prb as usize);
                assert!(rs.symbols_ref().contains(&re.symbol));
                assert!((re.value.norm() - 1.0).abs() < 1e-6);
                assert!(seen.insert((re.subcarrier, re.symbol)));
            }
        }
    }

    #[test]
    fn test_invalid_inputs() {
        let c = cell(1, 6, CyclicPrefix::Normal);

        assert!(matches!(
            CellReferenceSignal::generate(4, 0, &c),
            Err(LayerError::InvalidInput(_))
        ));
        assert!(matches!(
            CellReferenceSignal::generate(0, 20, &c),
            Err(LayerError::InvalidInput(_))
        ));

        let mut bad = c;
        bad.nof_prb = 111;
        assert!(matches!(
            CellReferenceSignal::generate(0, 0, &bad),
            Err(LayerError::InvalidInput(_))
        ));

        let mut bad = c;
        bad.id.0 = 504;
        assert!(matches!(
            CellReferenceSignal::generate(0, 0, &bad),
            Err(LayerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_sequence_failures() {
        let c = cell(1, 6, CyclicPrefix::Normal);

        assert!(matches!(
            CellReferenceSignal::generate_with(0, 0, &c, &FailingPrs),
            Err(LayerError::SequenceFailure(_))
        ));
        assert!(matches!(
            CellReferenceSignal::generate_with(2, 0, &c, &ShortPrs),
            Err(LayerError::SequenceFailure(_))
        ));
    }

    #[test]
    fn test_regenerate() {
        let c = cell(5, 6, CyclicPrefix::Normal);
        let mut rs = CellReferenceSignal::generate(1, 0, &c).unwrap();
        let first = rs.clone();

        rs.regenerate(1, &c).unwrap();
        assert_eq!(rs.port(), Some(AntennaPort::Port1));
        assert_eq!(rs.ns(), 1);
        assert_eq!(rs.len(), first.len());
        assert_eq!(rs.symbols_ref(), first.symbols_ref());
        assert_ne!(rs.refs(), first.refs());

        // Port 1 positions do not depend on the slot
        for (a, b) in rs.refs().iter().zip(first.refs()) {
            assert_eq!((a.subcarrier, a.symbol), (b.subcarrier, b.symbol));
        }
    }

    #[test]
    fn test_regenerate_failure_releases() {
        let c = cell(5, 6, CyclicPrefix::Normal);
        let mut rs = CellReferenceSignal::generate(0, 0, &c).unwrap();

        let err = rs.regenerate_with(1, &c, &FailingPrs).unwrap_err();
        assert!(matches!(err, LayerError::SequenceFailure(_)));
        assert_eq!(rs, CellReferenceSignal::default());

        // Nothing left to regenerate
        assert!(matches!(rs.regenerate(1, &c), Err(LayerError::InvalidInput(_))));
    }

    #[test]
    fn test_regenerate_invalid_input_keeps_set() {
        let c = cell(5, 6, CyclicPrefix::Normal);
        let mut rs = CellReferenceSignal::generate(0, 3, &c).unwrap();
        let before = rs.clone();

        let err = rs.regenerate(20, &c).unwrap_err();
        assert!(matches!(err, LayerError::InvalidInput(_)));
        assert_eq!(rs, before);

        let mut bad = c;
        bad.nof_prb = 5;
        let err = rs.regenerate(4, &bad).unwrap_err();
        assert!(matches!(err, LayerError::InvalidInput(_)));
        assert_eq!(rs, before);

        // Still usable afterwards
        rs.regenerate(4, &c).unwrap();
        assert_eq!(rs.ns(), 4);
        assert_eq!(rs.len(), before.len());
    }

    #[test]
    fn test_allocation_failure() {
        let err = try_alloc(usize::MAX, 0u8, "bytes").unwrap_err();
        assert!(matches!(err, LayerError::AllocationFailure(_)));

        let err = try_alloc(usize::MAX / 4, Complex32::zero(), "estimates").unwrap_err();
        assert!(matches!(err, LayerError::AllocationFailure(_)));

        assert_eq!(try_alloc(3, 7u8, "bytes").unwrap(), vec![7, 7, 7]);
    }

    #[test]
    fn test_put_round_trip() {
        let c = cell(77, 25, CyclicPrefix::Normal);
        let rs = CellReferenceSignal::generate(0, 4, &c).unwrap();

        let mut grid = SlotGrid::new(&c).unwrap();
        rs.put(grid.as_slice_mut().unwrap()).unwrap();

        let slot = grid.as_slice().unwrap();
        for re in rs.refs() {
            assert_eq!(slot[sample_index(c.nof_prb, re.symbol, re.subcarrier)], re.value);
            assert_eq!(grid.get_re(re.subcarrier, re.symbol), Some(re.value));
        }

        // Only pilot positions are touched
        let written = slot.iter().filter(|v| !v.is_zero()).count();
        assert_eq!(written, rs.len());

        assert_eq!(rs.extract(slot).unwrap(), rs.refs().iter().map(|re| re.value).collect::<Vec<_>>());
    }

    #[test]
    fn test_put_with_custom_addressing() {
        let c = cell(3, 6, CyclicPrefix::Normal);
        let rs = CellReferenceSignal::generate(3, 9, &c).unwrap();

        // Subcarrier-major layout
        let nsymb = c.symbols_per_slot() as usize;
        let addr = |_nof_prb: u16, symbol: u8, subcarrier: u16| subcarrier as usize * nsymb + symbol as usize;

        let mut slot = vec![Complex32::zero(); c.nof_subcarriers() * nsymb];
        rs.put_with(&mut slot, addr).unwrap();

        for re in rs.refs() {
            assert_eq!(slot[addr(c.nof_prb, re.symbol, re.subcarrier)], re.value);
        }
    }

    #[test]
    fn test_put_preconditions() {
        let c = cell(3, 6, CyclicPrefix::Normal);
        let rs = CellReferenceSignal::generate(0, 0, &c).unwrap();

        let mut empty: Vec<Complex32> = Vec::new();
        assert!(matches!(rs.put(&mut empty), Err(LayerError::InvalidInput(_))));

        let mut slot = vec![Complex32::zero(); 10];
        assert!(matches!(rs.put(&mut slot), Err(LayerError::InvalidInput(_))));
        assert!(slot.iter().all(|v| v.is_zero()));

        let mut slot = vec![Complex32::zero(); 7 * 72];
        let released = CellReferenceSignal::default();
        assert!(matches!(released.put(&mut slot), Err(LayerError::InvalidInput(_))));
        assert!(matches!(released.extract(&slot), Err(LayerError::InvalidInput(_))));
    }

    #[test]
    fn test_ch_est_buffer() {
        let c = cell(3, 6, CyclicPrefix::Normal);
        let mut rs = CellReferenceSignal::generate(0, 0, &c).unwrap();
        assert!(rs.ch_est().iter().all(|v| v.is_zero()));

        rs.ch_est_mut()[5] = Complex32::new(0.5, 0.5);
        assert_eq!(rs.ch_est()[5], Complex32::new(0.5, 0.5));
    }

    #[test]
    fn test_release_twice() {
        let c = cell(3, 6, CyclicPrefix::Normal);
        let mut rs = CellReferenceSignal::generate(0, 0, &c).unwrap();

        rs.release();
        assert!(rs.is_empty());
        assert!(rs.ch_est().is_empty());
        assert!(rs.symbols_ref().is_empty());
        assert_eq!(rs.port(), None);

        rs.release();
        assert_eq!(rs, CellReferenceSignal::default());
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CellReferenceSignal>();
        assert_send_sync::<LtePrs>();
    }
}
