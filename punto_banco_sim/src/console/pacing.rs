use std::thread;
use std::time::Duration;

/// Default pause before the outcome of a round is announced.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// Struct controlling the dramatic pauses between reveals. Every pause is the base delay divided by some step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    base: Duration,
}

impl Pacing {
    pub fn new(base: Duration) -> Pacing {
        Pacing { base }
    }

    /// Pacing that never sleeps.
    pub fn disabled() -> Pacing {
        Pacing {
            base: Duration::ZERO,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.base.is_zero()
    }

    /// The pause for the given divisor, a divisor of zero is treated as one.
    pub fn delay(&self, divisor: u32) -> Duration {
        self.base / divisor.max(1)
    }

    /// Sleeps for `self.delay(divisor)`.
    pub fn pause(&self, divisor: u32) {
        if self.is_enabled() {
            thread::sleep(self.delay(divisor));
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::new(DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn schedule_shrinks_with_divisor() {
        let pacing = Pacing::default();
        assert_eq!(pacing.delay(1), Duration::from_secs(2));
        assert_eq!(pacing.delay(2), Duration::from_secs(1));
        assert_eq!(pacing.delay(5), Duration::from_millis(400));
        assert_eq!(pacing.delay(0), pacing.delay(1));
    }

    #[test]
    fn disabled_never_sleeps() {
        let pacing = Pacing::disabled();
        assert!(!pacing.is_enabled());
        let start = Instant::now();
        for divisor in 1..=5 {
            pacing.pause(divisor);
        }
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
