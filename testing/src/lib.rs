//! # Tasklist Testing
//!
//! Testing utilities for reducers and stores built on `tasklist-core`.
//!
//! This crate provides:
//! - Deterministic [`Clock`] implementations
//! - A Given-When-Then builder for reducer tests ([`ReducerTest`])
//! - Assertion helpers for returned effects
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_testing::{test_clock, ReducerTest};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(test_environment())
//!     .given_state(TodoState::default())
//!     .when_action(TodoAction::Add { title: "Buy milk".into() })
//!     .then_state(|state| assert_eq!(state.items.len(), 1))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use tasklist_core::environment::Clock;


/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use chrono::Duration;
    use std::sync::Mutex;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time.
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_testing::mocks::FixedClock;
    /// use tasklist_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that moves forward by a fixed step on every read
    ///
    /// Useful when a test needs each mutation to observe a strictly later
    /// timestamp than the previous one.
    ///
    /// ```
    /// use chrono::Duration;
    /// use tasklist_core::environment::Clock;
    /// use tasklist_testing::{mocks::SteppingClock, test_clock};
    ///
    /// let clock = SteppingClock::new(test_clock().now(), Duration::seconds(1));
    /// let first = clock.now();
    /// assert_eq!(clock.now() - first, Duration::seconds(1));
    /// ```
    #[derive(Debug)]
    pub struct SteppingClock {
        next: Mutex<DateTime<Utc>>,
        step: Duration,
    }

    impl SteppingClock {
        /// Create a clock whose first reading is `start`
        #[must_use]
        pub const fn new(start: DateTime<Utc>, step: Duration) -> Self {
            Self {
                next: Mutex::new(start),
                step,
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let mut next = match self.next.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let current = *next;
            *next = current + self.step;
            current
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default())
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, SteppingClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
