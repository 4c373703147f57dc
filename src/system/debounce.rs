//! Go-button debounce filter
//!
//! A raw edge on the button line arms the filter with the level seen right
//! after the edge; a one-shot timer later re-samples the line. Only when both
//! samples agree is the edge accepted, anything else is discarded as contact
//! noise. The go latch itself lives in the system state and is only toggled
//! on a confirmed press, never on the release.

/// Filter states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No press event pending
    Idle,
    /// An edge was seen, waiting for the settling timer
    Armed { pressed: bool },
}

/// Outcome of the settling timer expiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Both samples agreed, the edge is real
    Confirmed { pressed: bool },
    /// The line moved during the settling window
    Noise,
}

/// One-shot debounce state machine for the go button
pub struct DebounceFilter {
    state: State,
}

impl DebounceFilter {
    pub const fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Arms the filter with the level sampled right after a raw edge
    pub fn arm(&mut self, pressed: bool) {
        self.state = State::Armed { pressed };
    }

    /// Called when the settling timer fires with a fresh sample of the line.
    /// Returns to idle either way.
    pub fn expire(&mut self, pressed: bool) -> Verdict {
        let verdict = match self.state {
            State::Armed { pressed: armed } if armed == pressed => Verdict::Confirmed { pressed },
            _ => Verdict::Noise,
        };
        self.state = State::Idle;
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_press_is_confirmed() {
        let mut filter = DebounceFilter::new();
        filter.arm(true);
        assert_eq!(filter.expire(true), Verdict::Confirmed { pressed: true });
    }

    #[test]
    fn stable_release_is_confirmed_as_release() {
        let mut filter = DebounceFilter::new();
        filter.arm(false);
        assert_eq!(filter.expire(false), Verdict::Confirmed { pressed: false });
    }

    #[test]
    fn reversal_during_settling_is_noise() {
        let mut filter = DebounceFilter::new();
        filter.arm(true);
        assert_eq!(filter.expire(false), Verdict::Noise);
    }

    #[test]
    fn expiry_without_arming_is_noise() {
        let mut filter = DebounceFilter::new();
        assert_eq!(filter.expire(true), Verdict::Noise);
    }

    #[test]
    fn filter_returns_to_idle_after_expiry() {
        let mut filter = DebounceFilter::new();
        filter.arm(true);
        filter.expire(true);
        // Without a fresh edge the next expiry must not confirm anything.
        assert_eq!(filter.expire(true), Verdict::Noise);
    }

    #[test]
    fn rearm_overwrites_previous_edge() {
        let mut filter = DebounceFilter::new();
        filter.arm(true);
        filter.arm(false);
        assert_eq!(filter.expire(false), Verdict::Confirmed { pressed: false });
    }
}
