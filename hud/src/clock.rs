// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Time sources for receive timestamps and staleness checks

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Nanoseconds on a monotonic time base
pub type Nanos = u64;

pub const NANOS_PER_SEC: Nanos = 1_000_000_000;

/// A monotonic source of nanoseconds
pub trait Clock {
    fn now_nanos(&self) -> Nanos;
}

/// Clock shared between activities
pub type SharedClock = std::sync::Arc<dyn Clock + Send + Sync>;

/// Startup instant (initialized on first use)
static STARTUP: OnceLock<Instant> = OnceLock::new();

/// Monotonic clock counting nanoseconds since the first clock was read in this process
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl MonotonicClock {
    pub fn new() -> Self {
        // Pin the startup instant
        let _ = STARTUP.get_or_init(Instant::now);
        Self
    }
}

impl Clock for MonotonicClock {
    fn now_nanos(&self) -> Nanos {
        let startup = *STARTUP.get_or_init(Instant::now);
        // Saturates after ~584 years
        u64::try_from(startup.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// A clock that only moves when told to
///
/// Shared between the owner advancing time and the consumers reading it.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Nanos) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    /// Move the clock forward by `duration`
    pub fn advance(&self, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.now.fetch_add(nanos, Ordering::Relaxed);
    }

    pub fn set(&self, now: Nanos) {
        self.now.store(now, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_nanos(&self) -> Nanos {
        self.now.load(Ordering::Relaxed)
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now_nanos(&self) -> Nanos {
        (**self).now_nanos()
    }
}
