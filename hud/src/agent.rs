// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Fixed-rate tick loop

use crate::activity::Activity;
use log::{debug, error, info, trace};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Steps a set of activities at a fixed cycle time on the calling thread
///
/// Activities are stepped in the order of their ids. A tick that takes longer than the
/// cycle time is logged and the next tick starts right away.
pub struct TickLoop {
    /// Target duration of one tick
    cycle_time: Duration,
    activities: Vec<Box<dyn Activity>>,
    ticks: u64,
}

impl TickLoop {
    pub fn new(cycle_time: Duration) -> Self {
        Self {
            cycle_time,
            activities: Vec::new(),
            ticks: 0,
        }
    }

    /// Add an activity, keeping the list sorted by id
    pub fn add(&mut self, activity: Box<dyn Activity>) {
        let pos = self
            .activities
            .partition_point(|a| a.id() <= activity.id());
        self.activities.insert(pos, activity);
    }

    pub fn cycle_time(&self) -> Duration {
        self.cycle_time
    }

    /// Number of completed ticks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Step every activity once
    pub fn step_all(&mut self) {
        for activity in self.activities.iter_mut() {
            trace!("Stepping activity {}", activity.id());
            activity.step();
        }
        self.ticks += 1;
    }

    /// Run the activity lifecycle: startup, stepping, shutdown
    ///
    /// Steps until `running` is cleared or `max_ticks` ticks have run.
    pub fn run(&mut self, max_ticks: Option<u64>, running: &AtomicBool) {
        for activity in self.activities.iter_mut() {
            activity.startup();
        }
        info!(
            "Running {} activities every {:?}",
            self.activities.len(),
            self.cycle_time
        );

        while running.load(Ordering::Relaxed) && max_ticks.map_or(true, |max| self.ticks < max) {
            let tick_start = Instant::now();
            self.step_all();

            let tick_duration = tick_start.elapsed();
            let time_left = self.cycle_time.saturating_sub(tick_duration);
            if time_left.is_zero() {
                error!(
                    "Finished tick after {tick_duration:?}. Expected to be less than {:?}",
                    self.cycle_time
                );
            } else {
                trace!("Finished tick after {tick_duration:?}. Sleeping for {time_left:?}");
                thread::sleep(time_left);
            }
        }

        debug!("Stopping after {} ticks", self.ticks);
        for activity in self.activities.iter_mut() {
            activity.shutdown();
        }
    }
}
