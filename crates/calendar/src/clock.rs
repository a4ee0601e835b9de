//! Source of "now" for every operation that defaults to the current instant.
//!
//! The engine never reads the system clock directly; it asks a [`Clock`].
//! Tests inject a [`FixedClock`] so "today", "yesterday", and partial
//! component construction stay deterministic.

use chrono::Utc;

use crate::instant::Instant;

pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Wall clock of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::from(Utc::now())
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Instant);

impl FixedClock {
    pub fn new(at: Instant) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.0
    }
}

impl<K: Clock + ?Sized> Clock for &K {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
