// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Driver monitoring face overlay
//!
//! Smooths the face orientation reported by the driver camera model and rotates a flat
//! face outline accordingly. The fade state blends between the live pose and a flat
//! outline shown while monitoring is inactive.

use crate::messages::DriverStateV2;
use nalgebra::{Matrix3, Vector3};

/// Number of points in the face outline
pub const FACE_KPTS_SIZE: usize = 33;

/// Depth the outline flattens to when fully faded
const FADED_DEPTH: f32 = 8.0;

/// Weight of a new sample in the orientation filter
const POSE_FILTER_K: f32 = 0.8;

/// Change of the fade state per tick
const FADE_STEP: f32 = 0.2;

/// Face outline in the head frame
pub const DEFAULT_FACE_KPTS_3D: [[f32; 3]; FACE_KPTS_SIZE] = [
    [-5.98, -51.20, 8.00],
    [-17.64, -49.14, 8.00],
    [-23.81, -46.40, 8.00],
    [-29.98, -40.91, 8.00],
    [-32.04, -37.49, 8.00],
    [-34.10, -32.00, 8.00],
    [-36.16, -21.03, 8.00],
    [-36.16, 6.40, 8.00],
    [-35.47, 10.51, 8.00],
    [-32.73, 19.43, 8.00],
    [-29.30, 26.29, 8.00],
    [-24.50, 33.83, 8.00],
    [-19.01, 41.37, 8.00],
    [-14.21, 46.17, 8.00],
    [-12.16, 47.54, 8.00],
    [-4.61, 49.60, 8.00],
    [4.99, 49.60, 8.00],
    [12.53, 47.54, 8.00],
    [14.59, 46.17, 8.00],
    [19.39, 41.37, 8.00],
    [24.87, 33.83, 8.00],
    [29.67, 26.29, 8.00],
    [33.10, 19.43, 8.00],
    [35.84, 10.51, 8.00],
    [36.53, 6.40, 8.00],
    [36.53, -21.03, 8.00],
    [34.47, -32.00, 8.00],
    [32.42, -37.49, 8.00],
    [30.36, -40.91, 8.00],
    [24.19, -46.40, 8.00],
    [18.02, -49.14, 8.00],
    [6.36, -51.20, 8.00],
    [-5.98, -51.20, 8.00],
];

/// Filtered driver head pose and the rotated face outline
#[derive(Debug, Clone, PartialEq)]
pub struct DriverPose {
    /// Filtered pitch, yaw, roll
    pub vals: [f32; 3],
    /// Distance of the last sample from the previous filtered value
    pub diff: [f32; 3],
    pub sins: [f32; 3],
    pub coss: [f32; 3],
    pub rotation: Matrix3<f32>,
    pub face_kpts_draw: [Vector3<f32>; FACE_KPTS_SIZE],
}

impl Default for DriverPose {
    fn default() -> Self {
        Self {
            vals: [0.0; 3],
            diff: [0.0; 3],
            sins: [0.0; 3],
            coss: [1.0; 3],
            rotation: Matrix3::identity(),
            face_kpts_draw: DEFAULT_FACE_KPTS_3D.map(Vector3::from),
        }
    }
}

/// Scale a raw orientation angle to the on-screen range
///
/// Looking down (negative pitch) is damped less than looking up.
fn gain(axis: usize, raw: f32) -> f32 {
    match axis {
        0 if raw < 0.0 => 0.7,
        0 => 0.9,
        _ => 0.4,
    }
}

impl DriverPose {
    /// Feed one orientation sample
    pub fn update(&mut self, orientation: &[f32; 3], fade_state: f32) {
        for (i, raw) in orientation.iter().enumerate() {
            let target = gain(i, *raw) * raw;
            self.diff[i] = (self.vals[i] - target).abs();
            self.vals[i] = POSE_FILTER_K * target + (1.0 - POSE_FILTER_K) * self.vals[i];

            let angle = self.vals[i] * (1.0 - fade_state);
            self.sins[i] = angle.sin();
            self.coss[i] = angle.cos();
        }

        let (s, c) = (&self.sins, &self.coss);
        self.rotation = Matrix3::new(
            c[1] * c[2],
            c[1] * s[2],
            -s[1],
            -s[0] * s[1] * c[2] - c[0] * s[2],
            -s[0] * s[1] * s[2] + c[0] * c[2],
            -s[0] * c[1],
            c[0] * s[1] * c[2] - s[0] * s[2],
            c[0] * s[1] * s[2] + s[0] * c[2],
            c[0] * c[1],
        );

        for (draw, kpt) in self.face_kpts_draw.iter_mut().zip(DEFAULT_FACE_KPTS_3D) {
            let rotated = self.rotation * Vector3::from(kpt);
            *draw = Vector3::new(
                rotated.x,
                rotated.y,
                rotated.z * (1.0 - fade_state) + FADED_DEPTH * fade_state,
            );
        }
    }
}

/// Update the pose from the face of the driver seat
pub fn update_dmonitoring(
    pose: &mut DriverPose,
    driver_state: &DriverStateV2,
    fade_state: f32,
    is_rhd: bool,
) {
    pose.update(&driver_state.driver(is_rhd).face_orientation, fade_state);
}

/// Step the fade state towards 0 while monitoring is active and towards 1 otherwise
pub fn step_fade_state(fade_state: f32, is_active_mode: bool) -> f32 {
    let active = if is_active_mode { 1.0 } else { 0.0 };
    (fade_state + FADE_STEP * (0.5 - active)).clamp(0.0, 1.0)
}
