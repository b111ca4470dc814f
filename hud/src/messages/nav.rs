// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// ubloxGnss
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UbloxGnss {
    MeasurementReport { num_meas: i32 },
    Ephemeris,
    IonoData,
    HwStatus,
}

impl Default for UbloxGnss {
    fn default() -> Self {
        UbloxGnss::MeasurementReport { num_meas: 0 }
    }
}

/// gpsLocationExternal
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct GpsLocationExternal {
    pub accuracy: f32,
    pub altitude: f32,
    pub bearing_deg: f32,
}

/// Navigation hints from the Waze bridge
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WazeData {
    pub alert_id: i32,
    pub alert_distance: i32,
    pub road_speed_limit: i32,
    pub current_speed: i32,
    pub road_name: String,
    pub nav_sign: i32,
    pub nav_distance: i32,
    pub alert_type: String,
}

/// liveENaviData, feed of the external navigation bridge
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LiveENaviData {
    pub speed_limit: i32,
    pub safety_distance: f32,
    pub safety_sign: i32,
    pub turn_info: i32,
    pub distance_to_turn: f32,
    pub connection_alive: bool,
    pub road_limit_speed: i32,
    pub link_length: i32,
    pub current_link_angle: i32,
    pub next_link_angle: i32,
    pub road_name: String,
    pub is_highway: bool,
    pub is_tunnel: bool,
    /// Ten free-form debug lines
    pub debug: Vec<String>,
    pub waze: WazeData,
}

/// liveMapData, feed of the OSM speed limit service
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LiveMapData {
    pub speed_limit: f32,
    pub speed_limit_ahead: f32,
    pub speed_limit_ahead_distance: f32,
    pub turn_speed_limit: f32,
    pub turn_speed_limit_end_distance: f32,
    pub turn_speed_limit_sign: i32,
    pub current_road_name: String,
    pub road_ref: String,
}
