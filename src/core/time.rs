//! Time provider abstraction for testable time-dependent logic
//!
//! Element timestamps and age queries go through a [`TimeProvider`] so tests
//! can advance the clock deterministically instead of sleeping.

#[cfg(test)]
use std::sync::{Arc, Mutex};
#[cfg(test)]
use std::time::Duration;
use std::time::SystemTime;

/// Abstraction over wall-clock time.
pub trait TimeProvider: Send + Sync {
    /// Current system time (for timestamps and age computation)
    fn system_time(&self) -> SystemTime;
}

/// Production time provider using the actual system clock.
#[derive(Debug, Default, Clone)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn system_time(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Mock time provider for deterministic testing.
#[derive(Clone)]
#[cfg(test)]
pub struct MockTimeProvider {
    current: Arc<Mutex<SystemTime>>,
}

#[cfg(test)]
impl MockTimeProvider {
    /// Create a mock starting at the real current time.
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(SystemTime::now())),
        }
    }

    /// Advance the mock clock by the given duration.
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap();
        *current += duration;
    }

    /// Rewind the mock clock by the given duration (clock-skew scenarios).
    pub fn rewind(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap();
        *current -= duration;
    }
}

#[cfg(test)]
impl TimeProvider for MockTimeProvider {
    fn system_time(&self) -> SystemTime {
        *self.current.lock().unwrap()
    }
}
