//! Fault accumulation
//!
//! The control task records one classification per control period. Runs of
//! consecutive fault periods are counted here; a single normal period wipes
//! both counters. Recovery fires strictly above `FAULT_THRESHOLD`, i.e. on
//! the 11th consecutive fault period, and exactly once per run so the
//! orchestrator never sees a pile-up of duplicate recovery requests.

use crate::system::steering::Steering;
use defmt::Format;

/// Consecutive fault periods tolerated before recovery triggers
pub const FAULT_THRESHOLD: u8 = 10;

/// The two recoverable fault conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum FaultKind {
    /// Line lost or ambiguous sensor combination
    LostLine,
    /// Full-stop marker under all sensors
    StopMarker,
}

/// Saturating counters for consecutive fault periods
pub struct FaultCounters {
    lost: u8,
    stop: u8,
}

impl FaultCounters {
    pub const fn new() -> Self {
        Self { lost: 0, stop: 0 }
    }

    /// Records one control period's classification.
    ///
    /// At most one counter moves per period. Returns the fault kind exactly
    /// on the increment that crosses the threshold.
    pub fn record(&mut self, steering: &Steering) -> Option<FaultKind> {
        match steering {
            Steering::Normal { .. } => {
                self.lost = 0;
                self.stop = 0;
                None
            }
            Steering::Lost => {
                self.lost = self.lost.saturating_add(1);
                (self.lost == FAULT_THRESHOLD + 1).then_some(FaultKind::LostLine)
            }
            Steering::Stop => {
                self.stop = self.stop.saturating_add(1);
                (self.stop == FAULT_THRESHOLD + 1).then_some(FaultKind::StopMarker)
            }
        }
    }

    /// Resets both counters after a recovery action completed
    pub fn clear(&mut self) {
        self.lost = 0;
        self.stop = 0;
    }

    pub fn lost(&self) -> u8 {
        self.lost
    }

    pub fn stop(&self) -> u8 {
        self.stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenth_fault_period_does_not_trigger() {
        let mut counters = FaultCounters::new();
        for _ in 0..FAULT_THRESHOLD {
            assert_eq!(counters.record(&Steering::Lost), None);
        }
        assert_eq!(counters.lost(), 10);
    }

    #[test]
    fn eleventh_fault_period_triggers_once() {
        let mut counters = FaultCounters::new();
        for _ in 0..FAULT_THRESHOLD {
            assert_eq!(counters.record(&Steering::Lost), None);
        }
        assert_eq!(counters.record(&Steering::Lost), Some(FaultKind::LostLine));
        // The run continues but the crossing already fired.
        assert_eq!(counters.record(&Steering::Lost), None);
    }

    #[test]
    fn normal_period_resets_both_counters() {
        let mut counters = FaultCounters::new();
        for _ in 0..5 {
            counters.record(&Steering::Lost);
        }
        counters.record(&Steering::Stop);
        counters.record(&Steering::Normal { right: 25, left: 25 });
        assert_eq!(counters.lost(), 0);
        assert_eq!(counters.stop(), 0);
    }

    #[test]
    fn counters_are_monotonic_within_a_run() {
        let mut counters = FaultCounters::new();
        let mut previous = 0;
        for _ in 0..20 {
            counters.record(&Steering::Stop);
            assert!(counters.stop() >= previous);
            previous = counters.stop();
        }
    }

    #[test]
    fn counters_saturate_instead_of_wrapping() {
        let mut counters = FaultCounters::new();
        for _ in 0..300 {
            counters.record(&Steering::Lost);
        }
        assert_eq!(counters.lost(), u8::MAX);
    }

    #[test]
    fn at_most_one_counter_moves_per_period() {
        let mut counters = FaultCounters::new();
        counters.record(&Steering::Lost);
        assert_eq!((counters.lost(), counters.stop()), (1, 0));
        counters.record(&Steering::Stop);
        assert_eq!((counters.lost(), counters.stop()), (1, 1));
    }

    #[test]
    fn fifty_centered_periods_keep_counters_clear() {
        use crate::system::steering::classify;
        let mut counters = FaultCounters::new();
        for _ in 0..50 {
            let steering = classify(0b010);
            assert_eq!(
                steering,
                Steering::Normal {
                    right: 25,
                    left: 25
                }
            );
            assert_eq!(counters.record(&steering), None);
        }
        assert_eq!((counters.lost(), counters.stop()), (0, 0));
    }

    #[test]
    fn eleven_dark_periods_request_lost_recovery() {
        use crate::system::steering::classify;
        let mut counters = FaultCounters::new();
        for period in 1..=11 {
            let crossing = counters.record(&classify(0b000));
            if period < 11 {
                assert_eq!(crossing, None);
            } else {
                assert_eq!(crossing, Some(FaultKind::LostLine));
            }
        }
    }

    #[test]
    fn eleven_stop_marker_periods_request_stop_recovery() {
        use crate::system::steering::classify;
        let mut counters = FaultCounters::new();
        for period in 1..=11 {
            let crossing = counters.record(&classify(0b111));
            if period < 11 {
                assert_eq!(crossing, None);
            } else {
                assert_eq!(crossing, Some(FaultKind::StopMarker));
            }
        }
    }

    #[test]
    fn cleared_run_must_recount_to_retrigger() {
        let mut counters = FaultCounters::new();
        for _ in 0..=FAULT_THRESHOLD {
            counters.record(&Steering::Stop);
        }
        counters.clear();
        for _ in 0..FAULT_THRESHOLD {
            assert_eq!(counters.record(&Steering::Stop), None);
        }
        assert_eq!(counters.record(&Steering::Stop), Some(FaultKind::StopMarker));
    }
}
