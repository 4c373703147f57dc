//! Quadrature encoder decoding
//!
//! Each wheel carries a two-channel quadrature encoder. Every pin edge shifts
//! the new pin pair into a 4-bit history (previous pair in the high bits) and
//! a 16-entry table turns that history into a signed tick increment. Illegal
//! transitions, where both channels appear to change at once, decode to 0 and
//! are silently dropped rather than surfaced as errors.

use core::sync::atomic::{AtomicI32, Ordering};
use defmt::Format;

/// Wheel identifiers, also used to index the tick counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Wheel {
    Left = 0,
    Right = 1,
}

/// Signed increment per 4-bit transition history
pub const DECODE_TABLE: [i8; 16] = [
    0, -1, 1, 0, //
    1, 0, 0, -1, //
    -1, 0, 0, 1, //
    0, 1, -1, 0,
];

/// Accumulated signed tick counts per wheel, written only by the encoder
/// tasks. Read by future motion estimation; monotonic with direction.
static TICKS: [AtomicI32; 2] = [AtomicI32::new(0), AtomicI32::new(0)];

/// Adds a decoded tick delta to a wheel's running count
pub fn add_ticks(wheel: Wheel, delta: i8) {
    TICKS[wheel as usize].fetch_add(delta as i32, Ordering::Relaxed);
}

/// Returns a wheel's running tick count
pub fn ticks(wheel: Wheel) -> i32 {
    TICKS[wheel as usize].load(Ordering::Relaxed)
}

/// Transition decoder for one encoder
pub struct QuadratureDecoder {
    history: u8,
}

impl QuadratureDecoder {
    pub const fn new() -> Self {
        Self { history: 0 }
    }

    /// Seeds the history with the current pin pair without counting, so the
    /// first real edge is decoded against the true resting state.
    pub fn sync(&mut self, a: bool, b: bool) {
        self.history = ((a as u8) << 1) | b as u8;
    }

    /// Shifts in a new pin pair and returns the signed tick increment.
    pub fn step(&mut self, a: bool, b: bool) -> i8 {
        let pair = ((a as u8) << 1) | b as u8;
        self.history = ((self.history << 2) | pair) & 0x0F;
        DECODE_TABLE[self.history as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One full quadrature cycle as (a, b) pin pairs
    const CYCLE: [(bool, bool); 4] = [(false, true), (true, true), (true, false), (false, false)];

    fn net(decoder: &mut QuadratureDecoder, pairs: impl Iterator<Item = (bool, bool)>) -> i32 {
        pairs.map(|(a, b)| decoder.step(a, b) as i32).sum()
    }

    #[test]
    fn full_cycle_counts_four_ticks() {
        let mut decoder = QuadratureDecoder::new();
        decoder.sync(false, false);
        let forward = net(&mut decoder, CYCLE.iter().copied());
        assert_eq!(forward.abs(), 4);

        let mut decoder = QuadratureDecoder::new();
        decoder.sync(false, false);
        let reverse = net(&mut decoder, CYCLE.iter().rev().skip(1).copied().chain([(false, false)]));
        assert_eq!(reverse, -forward);
    }

    #[test]
    fn illegal_double_transition_is_dropped() {
        let mut decoder = QuadratureDecoder::new();
        decoder.sync(false, false);
        // Both channels flipping at once is impossible on a real encoder.
        assert_eq!(decoder.step(true, true), 0);
        assert_eq!(decoder.step(false, false), 0);
    }

    #[test]
    fn repeated_pair_does_not_count() {
        let mut decoder = QuadratureDecoder::new();
        decoder.sync(true, false);
        assert_eq!(decoder.step(true, false), 0);
        assert_eq!(decoder.step(true, false), 0);
    }

    #[test]
    fn table_is_antisymmetric() {
        // Swapping old and new pair must negate the increment.
        for old in 0..4u8 {
            for new in 0..4u8 {
                let fwd = DECODE_TABLE[((old << 2) | new) as usize];
                let rev = DECODE_TABLE[((new << 2) | old) as usize];
                assert_eq!(fwd, -rev);
            }
        }
    }
}
