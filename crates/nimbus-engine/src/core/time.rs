/// Timing for the current tick. All values are in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Time since the previous tick.
    pub delta: f64,
    /// Instantaneous frames per second, `round(1000 / delta)`.
    pub fps: f64,
    /// Time since the first timestamp was recorded.
    pub elapsed: f64,
    /// Ticks run so far, starting at 1 for the first tick that does work.
    pub frame: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ClockState {
    /// No timestamp yet, so no delta can be computed.
    AwaitingFirstTimestamp,
    Running { first: f64, prev: f64 },
}

/// Variable-delta frame clock driven by host refresh timestamps.
#[derive(Debug, Clone)]
pub struct FrameClock {
    state: ClockState,
    frame: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            state: ClockState::AwaitingFirstTimestamp,
            frame: 0,
        }
    }

    /// Feed the host timestamp for this refresh.
    ///
    /// Returns None on the very first call, which only records the timestamp.
    /// A timestamp older than the previous one yields a zero delta.
    pub fn advance(&mut self, timestamp: f64) -> Option<FrameTime> {
        match self.state {
            ClockState::AwaitingFirstTimestamp => {
                self.state = ClockState::Running {
                    first: timestamp,
                    prev: timestamp,
                };
                None
            }
            ClockState::Running { first, prev } => {
                let raw = timestamp - prev;
                if raw < 0.0 {
                    log::warn!("frame clock went backwards by {:.3}ms; clamping delta to 0", -raw);
                }
                let delta = raw.max(0.0);
                self.state = ClockState::Running {
                    first,
                    prev: timestamp.max(prev),
                };
                self.frame += 1;
                Some(FrameTime {
                    delta,
                    fps: (1000.0 / delta).round(),
                    elapsed: timestamp.max(prev) - first,
                    frame: self.frame,
                })
            }
        }
    }

    /// Whether a first timestamp has been seen.
    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running { .. })
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_timestamp_only_primes() {
        let mut clock = FrameClock::new();
        assert!(!clock.is_running());
        assert!(clock.advance(1000.0).is_none());
        assert!(clock.is_running());
    }

    #[test]
    fn delta_and_fps_from_consecutive_timestamps() {
        let mut clock = FrameClock::new();
        clock.advance(1000.0);
        let t = clock.advance(1016.0).unwrap();
        assert_eq!(t.delta, 16.0);
        assert_eq!(t.fps, 63.0); // round(62.5) rounds half away from zero
        assert_eq!(t.frame, 1);

        let t = clock.advance(1036.0).unwrap();
        assert_eq!(t.delta, 20.0);
        assert_eq!(t.fps, 50.0);
        assert_eq!(t.elapsed, 36.0);
        assert_eq!(t.frame, 2);
    }

    #[test]
    fn backwards_timestamp_clamps_to_zero() {
        let mut clock = FrameClock::new();
        clock.advance(500.0);
        let t = clock.advance(480.0).unwrap();
        assert_eq!(t.delta, 0.0);
        assert!(t.fps.is_infinite());
        // The later timestamp is kept, so the next delta is measured from 500.
        let t = clock.advance(510.0).unwrap();
        assert_eq!(t.delta, 10.0);
    }
}
