// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Units of work stepped by the tick loop

use std::fmt::Display;

/// Identifies an activity and fixes its position within a tick
///
/// Lower ids are stepped first, so producers get lower ids than their consumers.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ActivityId(usize);

impl From<usize> for ActivityId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<ActivityId> for usize {
    fn from(value: ActivityId) -> Self {
        value.0
    }
}

impl Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A{}", self.0)
    }
}

/// A consumer or producer run once per tick on the tick thread
pub trait Activity {
    fn id(&self) -> ActivityId;

    /// Called once before the first tick
    fn startup(&mut self) {}

    /// Called once per tick. Must return well within the cycle time.
    fn step(&mut self);

    /// Called once after the last tick
    fn shutdown(&mut self) {}
}
