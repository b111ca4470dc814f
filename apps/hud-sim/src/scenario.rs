// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Scripted drive

use anyhow::{Context, Error};
use hud::messages::{ControlsState, ImageSensor, PandaType};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A controlsState published from `tick` on
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduledControls {
    pub tick: u64,
    #[serde(default)]
    pub controls_state: ControlsState,
}

/// Drive script, all times in ticks
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub ignition_on: u64,
    pub ignition_off: Option<u64>,
    pub panda_type: PandaType,
    pub camera_sensor: ImageSensor,
    /// Driver monitoring in active mode
    pub dm_active: bool,
    pub is_rhd: bool,
    /// Controls states in tick order
    pub controls: Vec<ScheduledControls>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            ignition_on: 20,
            ignition_off: None,
            panda_type: PandaType::Dos,
            camera_sensor: ImageSensor::Ar0231,
            dm_active: true,
            is_rhd: false,
            controls: vec![ScheduledControls {
                tick: 60,
                controls_state: ControlsState {
                    enabled: true,
                    ..Default::default()
                },
            }],
        }
    }
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Parse a scenario, putting the controls states in tick order
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let mut scenario: Scenario = serde_json::from_str(text)?;
        scenario.controls.sort_by_key(|c| c.tick);
        Ok(scenario)
    }

    pub fn ignition(&self, tick: u64) -> bool {
        tick >= self.ignition_on && self.ignition_off.map_or(true, |off| tick < off)
    }

    /// Controls state in effect at `tick`
    pub fn controls_state(&self, tick: u64) -> Option<&ControlsState> {
        self.controls
            .iter()
            .take_while(|c| c.tick <= tick)
            .last()
            .map(|c| &c.controls_state)
    }
}
