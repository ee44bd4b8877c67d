//! Fixed-timestep clock.
use std::time::Duration;

use crate::constants::*;

/// Accumulator that converts elapsed wall time into a whole number of
/// fixed-length cycles.
///
/// It is designed to work with the yielding cooperative pattern
/// of the interpreter loop. The caller reports how much time elapsed
/// since it last resumed the VM, and the VM drains as many cycles as
/// fit into the accumulated time. The remainder carries over to the
/// next call.
///
/// Time is kept as nanoseconds scaled by the frequency, so one cycle
/// costs exactly one second worth of nanoseconds. No rounding error
/// builds up regardless of how the deltas are sliced.
#[derive(Debug, Clone)]
pub(crate) struct Clock {
    frequency: u64,
    accumulator: u128,
}

impl Clock {
    /// Creates a clock ticking `frequency` times per simulated second.
    ///
    /// A frequency of zero never ticks.
    pub(crate) fn new(frequency: u64) -> Self {
        Self {
            frequency,
            accumulator: 0,
        }
    }

    pub(crate) fn frequency(&self) -> u64 {
        self.frequency
    }

    /// Set the clock state back to zero.
    pub(crate) fn reset(&mut self) {
        self.accumulator = 0;
    }

    /// Add elapsed time to the accumulator.
    pub(crate) fn advance(&mut self, delta: Duration) {
        let scaled = delta.as_nanos().saturating_mul(self.frequency as u128);
        self.accumulator = self.accumulator.saturating_add(scaled);
    }

    /// Consume one cycle from the accumulator.
    ///
    /// Returns `false` when less than a full cycle is left.
    pub(crate) fn tick(&mut self) -> bool {
        let cycle = NANOS_IN_SECOND as u128;
        if self.frequency > 0 && self.accumulator >= cycle {
            self.accumulator -= cycle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn drain(clock: &mut Clock) -> usize {
        let mut count = 0;
        while clock.tick() {
            count += 1;
        }
        count
    }

    #[test]
    fn test_one_second() {
        let mut clock = Clock::new(750);
        clock.advance(Duration::from_secs(1));
        assert_eq!(drain(&mut clock), 750);

        let mut timer = Clock::new(DELAY_FREQUENCY);
        timer.advance(Duration::from_secs(1));
        assert_eq!(drain(&mut timer), 60);
    }

    /// Odd frame deltas must add up to the same count without drift.
    #[test]
    fn test_uneven_deltas() {
        let mut clock = Clock::new(750);
        let mut count = 0;
        for _ in 0..7 {
            clock.advance(Duration::from_nanos(NANOS_IN_SECOND / 7));
            count += drain(&mut clock);
        }
        // 7 * (1e9 / 7) is slightly short of a full second.
        assert_eq!(count, 749);

        clock.advance(Duration::from_nanos(NANOS_IN_SECOND % 7));
        count += drain(&mut clock);
        assert_eq!(count, 750);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut clock = Clock::new(DELAY_FREQUENCY);
        clock.advance(Duration::from_millis(10));
        assert!(!clock.tick());
        clock.advance(Duration::from_millis(10));
        assert!(clock.tick());
        assert!(!clock.tick());
    }

    #[test]
    fn test_zero_frequency() {
        let mut clock = Clock::new(0);
        clock.advance(Duration::from_secs(10));
        assert!(!clock.tick());
    }
}
