// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// deviceState
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DeviceState {
    pub started: bool,
    pub cpu_usage_percent: Vec<i8>,
    pub cpu_temp_c: Vec<f32>,
    pub ambient_temp_c: f32,
    pub fan_speed_percent_desired: i32,
    pub storage_usage: i32,
    pub ip_address: String,
}

/// peripheralState
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PeripheralState {
    pub fan_speed_rpm: i32,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PandaType {
    #[default]
    Unknown,
    WhitePanda,
    GreyPanda,
    BlackPanda,
    Pedal,
    Uno,
    Dos,
    RedPanda,
    RedPandaV2,
    Tres,
}

/// One element of pandaStates
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PandaState {
    pub panda_type: PandaType,
    pub ignition_line: bool,
    pub ignition_can: bool,
    pub controls_allowed: bool,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationStatus {
    #[default]
    Uncalibrated,
    Calibrated,
    Invalid,
    Recalibrating,
}

/// liveCalibration
///
/// Angle lists are roll, pitch, yaw in radians. Anything but three components counts as
/// "not provided".
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LiveCalibration {
    pub cal_status: CalibrationStatus,
    pub rpy_calib: Vec<f32>,
    pub wide_from_device_euler: Vec<f32>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ImageSensor {
    #[default]
    Unknown,
    Ar0231,
    Ox03c10,
}

/// Camera frame metadata, used for wideRoadCameraState
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameData {
    pub sensor: ImageSensor,
    pub exposure_val_percent: f32,
}

/// microphone
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Microphone {
    pub filtered_sound_pressure_weighted_db: f32,
}
