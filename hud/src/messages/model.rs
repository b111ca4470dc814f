// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use nalgebra::Vector3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Capacity of a model trajectory
pub const TRAJECTORY_SIZE: usize = 33;

/// Trajectory in the calibrated car frame
///
/// Fixed-capacity buffers: `x` forward, `y` lateral (right positive), `z` down, `t` time.
/// Samples are ordered by increasing `x` by construction and never re-sorted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XyztData {
    pub x: [f32; TRAJECTORY_SIZE],
    pub y: [f32; TRAJECTORY_SIZE],
    pub z: [f32; TRAJECTORY_SIZE],
    pub t: [f32; TRAJECTORY_SIZE],
    len: usize,
}

impl Default for XyztData {
    fn default() -> Self {
        Self {
            x: [0.0; TRAJECTORY_SIZE],
            y: [0.0; TRAJECTORY_SIZE],
            z: [0.0; TRAJECTORY_SIZE],
            t: [0.0; TRAJECTORY_SIZE],
            len: 0,
        }
    }
}

impl XyztData {
    /// Build a trajectory from point samples. Samples beyond the capacity are dropped.
    pub fn from_points(points: impl IntoIterator<Item = Vector3<f32>>) -> Self {
        let mut data = Self::default();
        for p in points {
            if !data.push(p.x, p.y, p.z, 0.0) {
                break;
            }
        }
        data
    }

    /// Append a sample. Returns false when the trajectory is full.
    pub fn push(&mut self, x: f32, y: f32, z: f32, t: f32) -> bool {
        if self.len == TRAJECTORY_SIZE {
            return false;
        }
        self.x[self.len] = x;
        self.y[self.len] = y;
        self.z[self.len] = z;
        self.t[self.len] = t;
        self.len += 1;
        true
    }

    /// Number of valid samples
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether all [TRAJECTORY_SIZE] samples are present
    pub fn is_full(&self) -> bool {
        self.len == TRAJECTORY_SIZE
    }

    /// Sample `i` as a point. Indices past the valid range read zeroed buffer slots.
    pub fn point(&self, i: usize) -> Vector3<f32> {
        Vector3::new(self.x[i], self.y[i], self.z[i])
    }

    /// Forward distance of the furthest valid sample
    pub fn last_x(&self) -> f32 {
        self.len.checked_sub(1).map_or(0.0, |i| self.x[i])
    }
}

/// modelV2
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ModelV2 {
    /// Predicted path of the car
    pub position: XyztData,
    pub lane_lines: [XyztData; 4],
    pub lane_line_probs: [f32; 4],
    pub road_edges: [XyztData; 2],
    pub road_edge_stds: [f32; 2],
}

/// uiPlan
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UiPlan {
    /// Planned path; shorter than [TRAJECTORY_SIZE] when no plan is available
    pub position: XyztData,
}

/// A tracked lead vehicle
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LeadData {
    /// Forward distance in m
    pub d_rel: f32,
    /// Lateral offset in m (left positive)
    pub y_rel: f32,
    /// Relative speed in m/s
    pub v_rel: f32,
    /// Whether the track is valid
    pub status: bool,
}

/// radarState
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RadarState {
    pub lead_one: LeadData,
    pub lead_two: LeadData,
}

impl RadarState {
    pub fn leads(&self) -> [&LeadData; 2] {
        [&self.lead_one, &self.lead_two]
    }
}

/// Per-seat driver state estimate
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DriverData {
    /// Face orientation, pitch, yaw, roll in radians
    pub face_orientation: [f32; 3],
    pub face_prob: f32,
}

/// driverStateV2
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DriverStateV2 {
    pub left_driver_data: DriverData,
    pub right_driver_data: DriverData,
}

impl DriverStateV2 {
    /// Driver seat data for the given hand drive
    pub fn driver(&self, is_rhd: bool) -> &DriverData {
        if is_rhd {
            &self.right_driver_data
        } else {
            &self.left_driver_data
        }
    }
}

/// driverMonitoringState
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DriverMonitoringState {
    pub is_active_mode: bool,
    pub is_rhd: bool,
}
