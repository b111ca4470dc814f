// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// lateralPlan
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LateralPlan {
    pub lane_width: f32,
    pub d_prob: f32,
    pub l_prob: f32,
    pub r_prob: f32,
    pub standstill_elapsed_time: i32,
    pub laneless_mode: bool,
    pub total_camera_offset: f32,
}

/// longitudinalPlan
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LongitudinalPlan {
    pub e2e_x: Vec<f32>,
    pub lead0_obstacle: Vec<f32>,
    pub lead1_obstacle: Vec<f32>,
    pub cruise_target: Vec<f32>,
}
