// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GearShifter {
    #[default]
    Unknown,
    Park,
    Drive,
    Neutral,
    Reverse,
    Sport,
    Low,
    Brake,
    Eco,
    Manumatic,
}

/// Tire pressures
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Tpms {
    pub unit: i32,
    pub fl: f32,
    pub fr: f32,
    pub rl: f32,
    pub rr: f32,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CruiseState {
    pub enabled: bool,
    pub speed: f32,
    /// Cruise main switch
    pub cruise_sw_state: bool,
}

/// carState
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CarState {
    pub v_ego: f32,
    pub cruise_state: CruiseState,
    pub brake_pressed: bool,
    pub gas_pressed: bool,
    pub brake_lights: bool,
    pub gear_shifter: GearShifter,
    pub left_blinker: bool,
    pub right_blinker: bool,
    pub left_blindspot: bool,
    pub right_blindspot: bool,
    pub tpms: Tpms,
    pub radar_distance: f32,
    pub stand_still: bool,
    pub v_set_dis: f32,
    pub cruise_acc_status: bool,
    pub driver_acc: bool,
    pub steering_angle_deg: f32,
    pub cruise_gap_set: i32,
    pub auto_hold: bool,
    pub steer_fault_temporary: bool,
    pub a_req_value: f32,
    pub engine_rpm: f32,
    pub gear_step: i32,
    pub charge_meter: f32,
}

/// carParams
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CarParams {
    pub car_fingerprint: String,
    pub openpilot_longitudinal_control: bool,
    pub steer_actuator_delay: f32,
}

/// liveParameters
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LiveParameters {
    pub angle_offset_deg: f32,
    pub angle_offset_average_deg: f32,
    pub stiffness_factor: f32,
    pub steer_ratio: f32,
}
