//! Steering classifier
//!
//! Maps a 3-bit line pattern to a motor duty pair or a fault condition. This
//! is an open-loop proportional lookup, not a feedback controller: the duty
//! values are fixed constants on the 0-50 scale consumed by the motor driver.

use defmt::Format;

/// Upper bound of the proportional duty scale
pub const DUTY_MAX: u8 = 50;

/// Result of classifying one line pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Steering {
    /// Line acquired, drive with the given duty pair
    Normal { right: u8, left: u8 },
    /// No sensor or an ambiguous combination sees the line
    Lost,
    /// All sensors agree on the full-stop marker
    Stop,
}

/// Classifies a 3-bit line pattern.
///
/// Bit 0 is the leftmost sensor. A line under the left sensor means the robot
/// drifted right, so the right wheel speeds up to steer back onto the line.
pub fn classify(pattern: u8) -> Steering {
    match pattern & 0b111 {
        0b001 => Steering::Normal { right: 50, left: 0 },
        0b011 => Steering::Normal {
            right: 35,
            left: 15,
        },
        0b010 => Steering::Normal {
            right: 25,
            left: 25,
        },
        0b110 => Steering::Normal {
            right: 15,
            left: 35,
        },
        0b100 => Steering::Normal { right: 0, left: 50 },
        0b111 => Steering::Stop,
        // 000 (no signal) and 101 (contradictory) both read as a lost line.
        _ => Steering::Lost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_pattern_table() {
        assert_eq!(classify(0b000), Steering::Lost);
        assert_eq!(classify(0b001), Steering::Normal { right: 50, left: 0 });
        assert_eq!(
            classify(0b011),
            Steering::Normal {
                right: 35,
                left: 15
            }
        );
        assert_eq!(
            classify(0b010),
            Steering::Normal {
                right: 25,
                left: 25
            }
        );
        assert_eq!(
            classify(0b110),
            Steering::Normal {
                right: 15,
                left: 35
            }
        );
        assert_eq!(classify(0b100), Steering::Normal { right: 0, left: 50 });
        assert_eq!(classify(0b101), Steering::Lost);
        assert_eq!(classify(0b111), Steering::Stop);
    }

    #[test]
    fn duties_stay_within_scale() {
        for pattern in 0..8u8 {
            if let Steering::Normal { right, left } = classify(pattern) {
                assert!(right <= DUTY_MAX);
                assert!(left <= DUTY_MAX);
            }
        }
    }

    #[test]
    fn only_low_three_bits_matter() {
        for pattern in 0..8u8 {
            assert_eq!(classify(pattern), classify(pattern | 0b1111_1000));
        }
    }
}
