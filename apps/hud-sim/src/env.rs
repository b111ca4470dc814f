// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Logging stand-ins for display, backlight and speaker

use hud::error::Error;
use hud::prelude::{Hardware, Loops, SoundEffect};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Hardware printing every call
#[derive(Debug, Default)]
pub struct LogHardware;

impl Hardware for LogHardware {
    fn set_display_power(&self, on: bool) {
        info!("Display power {}", if on { "on" } else { "off" });
    }

    fn set_brightness(&self, percent: i32) {
        debug!("Backlight {percent} %");
    }

    fn set_volume(&self, volume: f32) {
        debug!("Volume {volume:.2}");
    }

    fn is_pc(&self) -> bool {
        true
    }
}

/// Sound effect printing playback
///
/// Finite sounds count as finished as soon as they were started.
#[derive(Debug)]
pub struct LogEffect {
    file: PathBuf,
    loops: Loops,
    remaining: Loops,
}

impl LogEffect {
    pub fn load(dir: &Path, file: &str) -> Result<Box<dyn SoundEffect>, Error> {
        Ok(Box::new(LogEffect {
            file: dir.join(file),
            loops: Loops::Finite(1),
            remaining: Loops::Finite(0),
        }))
    }
}

impl SoundEffect for LogEffect {
    fn set_loop_count(&mut self, loops: Loops) {
        self.loops = loops;
    }

    fn play(&mut self) {
        info!("Playing {} {:?}", self.file.display(), self.loops);
        self.remaining = match self.loops {
            Loops::Infinite => Loops::Infinite,
            Loops::Finite(_) => Loops::Finite(0),
        };
    }

    fn stop(&mut self) {
        if self.remaining != Loops::Finite(0) {
            info!("Stopping {}", self.file.display());
        }
        self.remaining = Loops::Finite(0);
    }

    fn loops_remaining(&self) -> Loops {
        self.remaining
    }
}
