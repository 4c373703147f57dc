//! Line sensor round-robin state machine
//!
//! The three downward-facing IR sensors share one ADC, so they are sampled in
//! a fixed rotating order. Each sensor gets `READINGS_MAX` conversions per
//! turn: the first is a settling sample taken right after the mux switch and
//! is discarded, the second is binarized against `ADC_CUTOFF` and folded into
//! the pattern accumulator. A completed 3-bit pattern is only published when
//! the scan wraps back to the first sensor, so the control task never sees a
//! half-built pattern.

use core::sync::atomic::{AtomicU8, Ordering};

/// Number of IR sensors in the array
pub const SENSOR_COUNT: usize = 3;

/// ADC conversions taken per sensor per scan turn
pub const READINGS_MAX: u8 = 2;

/// Binarization cutoff on the 12-bit ADC range (~85% of full scale)
pub const ADC_CUTOFF: u16 = 3500;

/// One IR sensor of the array.
///
/// `pattern_bit` and `display_bit` are fixed by sensor identity, not by scan
/// order, so the published pattern keeps the same bit layout regardless of
/// how the ring is traversed.
pub struct IrSensor {
    /// Index of the sensor's ADC channel
    pub channel: usize,
    /// Bit position in the 3-bit line pattern
    pub pattern_bit: u8,
    /// Bit position in the status display byte
    pub display_bit: u8,
}

/// The fixed sensor array, in scan order. Sensor 0 is the leftmost sensor
/// when looking in the driving direction.
pub const SENSORS: [IrSensor; SENSOR_COUNT] = [
    IrSensor {
        channel: 0,
        pattern_bit: 0,
        display_bit: 6,
    },
    IrSensor {
        channel: 1,
        pattern_bit: 1,
        display_bit: 5,
    },
    IrSensor {
        channel: 2,
        pattern_bit: 2,
        display_bit: 4,
    },
];

/// Latest completed line pattern, written only by the sampling task
static LINE_PATTERN: AtomicU8 = AtomicU8::new(0);

/// Live binarized sensor bits for the status display, written only by the
/// sampling task
static SENSOR_BITS: AtomicU8 = AtomicU8::new(0);

/// Publishes a completed 3-bit line pattern
pub fn publish(pattern: u8) {
    LINE_PATTERN.store(pattern, Ordering::Relaxed);
}

/// Returns the latest completed line pattern
pub fn latest() -> u8 {
    LINE_PATTERN.load(Ordering::Relaxed)
}

/// Mirrors the live sensor bits for the display task
pub fn set_sensor_bits(bits: u8) {
    SENSOR_BITS.store(bits, Ordering::Relaxed);
}

/// Returns the live sensor bits for the display byte
pub fn sensor_bits() -> u8 {
    SENSOR_BITS.load(Ordering::Relaxed)
}

/// Round-robin scanner over the sensor array.
///
/// Two cursors range over the array: `loaded` is the sensor whose conversion
/// results are currently arriving, `next` is the sensor the ADC mux will be
/// pointed at for the following conversion. When the last reading for the
/// loaded sensor is in progress, `next` is pre-advanced to the ring
/// successor; the scanner adopts it on the next sample arrival, which is also
/// the moment a finished pattern is published if the scan wrapped around.
pub struct LineScanner {
    loaded: usize,
    next: usize,
    readings: u8,
    pattern_acc: u8,
    display_acc: u8,
}

impl LineScanner {
    pub const fn new() -> Self {
        Self {
            loaded: 0,
            next: 0,
            readings: 0,
            pattern_acc: 0,
            display_acc: 0,
        }
    }

    /// ADC channel to convert next. Always follows the `next` cursor, which
    /// is what makes the first sample after a mux switch belong to the new
    /// sensor.
    pub fn channel(&self) -> usize {
        SENSORS[self.next].channel
    }

    /// Live binarized display bits accumulated so far
    pub fn display_bits(&self) -> u8 {
        self.display_acc
    }

    /// Feeds one completed raw conversion into the scanner.
    ///
    /// Returns the finished 3-bit pattern exactly when the scan cursor
    /// returns to the first sensor with a fresh reading count, i.e. once per
    /// full round of 6 conversions.
    pub fn on_sample(&mut self, raw: u16) -> Option<u8> {
        let mut published = None;

        // Adopt a pre-advanced cursor before counting this sample against it.
        if self.next != self.loaded {
            self.loaded = self.next;
            self.readings = 0;
            if self.loaded == 0 {
                // Scan wrapped around: the accumulator holds one fresh bit
                // per sensor and is safe to hand to the classifier.
                published = Some(self.pattern_acc);
            }
        }

        self.readings += 1;
        if self.readings != 1 {
            // Not the settling sample, classify it.
            let sensor = &SENSORS[self.loaded];
            if raw >= ADC_CUTOFF {
                self.pattern_acc |= 1 << sensor.pattern_bit;
                self.display_acc |= 1 << sensor.display_bit;
            } else {
                self.pattern_acc &= !(1 << sensor.pattern_bit);
                self.display_acc &= !(1 << sensor.display_bit);
            }

            if self.readings == READINGS_MAX {
                // The reading in progress is the last one for this sensor,
                // point the mux at the ring successor.
                self.next = (self.loaded + 1) % SENSOR_COUNT;
            }
        }

        published
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DARK: u16 = 100;
    const LINE: u16 = 4000;

    /// Feeds one full scan round (2 samples per sensor) and returns what got
    /// published on the first sample of the following round.
    fn run_round(scanner: &mut LineScanner, samples: [(u16, u16); SENSOR_COUNT]) -> Option<u8> {
        for (settle, measure) in samples {
            assert_eq!(scanner.on_sample(settle), None);
            assert_eq!(scanner.on_sample(measure), None);
        }
        // First settling sample of the next round triggers the publish.
        scanner.on_sample(DARK)
    }

    #[test]
    fn publishes_second_sample_of_each_sensor() {
        let mut scanner = LineScanner::new();
        // Settling samples contradict the measured ones on every sensor; only
        // the second sample of each may end up in the pattern.
        let published = run_round(&mut scanner, [(LINE, DARK), (DARK, LINE), (LINE, DARK)]);
        assert_eq!(published, Some(0b010));
    }

    #[test]
    fn pattern_bits_follow_sensor_identity() {
        let mut scanner = LineScanner::new();
        let published = run_round(&mut scanner, [(DARK, LINE), (DARK, DARK), (DARK, DARK)]);
        // Sensor 0 occupies bit 0 no matter where it sits in the scan order.
        assert_eq!(published, Some(0b001));

        let mut scanner = LineScanner::new();
        let published = run_round(&mut scanner, [(DARK, DARK), (DARK, DARK), (DARK, LINE)]);
        assert_eq!(published, Some(0b100));
    }

    #[test]
    fn no_publish_mid_cycle() {
        let mut scanner = LineScanner::new();
        for _ in 0..SENSOR_COUNT {
            assert_eq!(scanner.on_sample(LINE), None);
            assert_eq!(scanner.on_sample(LINE), None);
        }
        // Only the wrap-around sample publishes.
        assert_eq!(scanner.on_sample(DARK), Some(0b111));
    }

    #[test]
    fn mux_channel_advances_after_last_reading() {
        let mut scanner = LineScanner::new();
        assert_eq!(scanner.channel(), 0);
        scanner.on_sample(DARK);
        // Still on sensor 0 for its measured sample.
        assert_eq!(scanner.channel(), 0);
        scanner.on_sample(DARK);
        // Pre-advanced: the following conversion belongs to sensor 1.
        assert_eq!(scanner.channel(), 1);
        scanner.on_sample(DARK);
        assert_eq!(scanner.channel(), 1);
    }

    #[test]
    fn cutoff_is_inclusive() {
        let mut scanner = LineScanner::new();
        let published = run_round(
            &mut scanner,
            [(DARK, ADC_CUTOFF), (DARK, ADC_CUTOFF - 1), (DARK, DARK)],
        );
        assert_eq!(published, Some(0b001));
    }

    #[test]
    fn stale_bits_are_cleared_on_the_next_round() {
        let mut scanner = LineScanner::new();
        let first = run_round(&mut scanner, [(DARK, LINE), (DARK, LINE), (DARK, LINE)]);
        assert_eq!(first, Some(0b111));

        // The publishing sample above was also sensor 0's settling sample of
        // the new round; finish that round with the line gone.
        assert_eq!(scanner.on_sample(DARK), None);
        for _ in 0..(SENSOR_COUNT - 1) {
            assert_eq!(scanner.on_sample(DARK), None);
            assert_eq!(scanner.on_sample(DARK), None);
        }
        assert_eq!(scanner.on_sample(DARK), Some(0b000));
    }

    #[test]
    fn display_bits_mirror_measurements() {
        let mut scanner = LineScanner::new();
        run_round(&mut scanner, [(DARK, LINE), (DARK, DARK), (DARK, LINE)]);
        // Sensor 0 -> bit 6, sensor 2 -> bit 4.
        assert_eq!(scanner.display_bits(), 0b0101_0000);
    }
}
