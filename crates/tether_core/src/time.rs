//! Frame clock
//!
//! Fixed tick rate; the clock only counts ticks, it never sleeps.

use std::time::Duration;

/// Default simulation tick rate (60 Hz = 16.666ms per tick)
pub const DEFAULT_TICK_RATE_HZ: u32 = 60;

/// Tick counter for the frame driver.
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick_rate_hz: u32,
    tick_duration: Duration,
    tick_count: u64,
    accumulated_time: Duration,
}

impl FrameClock {
    /// A rate of zero is treated as 1 Hz.
    pub fn new(tick_rate_hz: u32) -> Self {
        let tick_rate_hz = tick_rate_hz.max(1);
        Self {
            tick_rate_hz,
            tick_duration: Duration::from_secs(1) / tick_rate_hz,
            tick_count: 0,
            accumulated_time: Duration::ZERO,
        }
    }

    pub fn tick_rate_hz(&self) -> u32 {
        self.tick_rate_hz
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn advance_tick(&mut self) {
        self.tick_count += 1;
        self.accumulated_time += self.tick_duration;
    }

    pub fn total_time(&self) -> Duration {
        self.accumulated_time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE_HZ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_by_fixed_ticks() {
        let mut clock = FrameClock::new(50);
        assert_eq!(clock.tick_duration(), Duration::from_millis(20));

        clock.advance_tick();
        clock.advance_tick();
        assert_eq!(clock.tick_count(), 2);
        assert_eq!(clock.total_time(), Duration::from_millis(40));
    }

    #[test]
    fn zero_rate_is_clamped() {
        let clock = FrameClock::new(0);
        assert_eq!(clock.tick_rate_hz(), 1);
        assert_eq!(clock.tick_duration(), Duration::from_secs(1));
    }
}
