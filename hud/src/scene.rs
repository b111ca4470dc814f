// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! The scene: everything the renderer needs to draw one frame

use crate::config::{UiConfig, UiParams};
use crate::dmonitoring::DriverPose;
use crate::geometry::{Calibration, ModelGeometry};
use crate::messages::{
    CarParams, CarState, ControlsState, DeviceState, GpsLocationExternal, LateralPlan,
    LiveENaviData, LiveMapData, LiveParameters, LongitudinalPlan, PandaType,
};

/// Frames the blinker indicator keeps flashing after a blinker change
pub const BLINKER_BLINK_FRAMES: i32 = 120;

/// Latest state copied from the bus plus everything derived from it
///
/// Owned by [UiState](crate::state::UiState) and updated in place every tick.
#[derive(Debug, Clone)]
pub struct Scene {
    pub started: bool,
    pub ignition: bool,
    /// Frame in which the car was last started
    pub started_frame: u64,
    /// Controls are engaged
    pub enabled: bool,
    pub experimental_mode: bool,
    pub panda_type: PandaType,
    pub controls_allowed: bool,

    pub calibration: Calibration,
    /// Draw on the wide road camera
    pub wide_cam: bool,
    pub geometry: ModelGeometry,

    pub driver_pose: DriverPose,
    /// 0 while monitoring is active, fading to 1 otherwise
    pub dm_fade_state: f32,
    /// Driver monitoring is in active mode
    pub dm_active: bool,
    pub is_rhd: bool,

    pub controls_state: ControlsState,
    /// Output of the active lateral controller
    pub output_scale: f32,
    /// Blend selection of the atom lateral controller
    pub multi_lat_selected: f32,
    pub car_state: CarState,
    pub live_parameters: LiveParameters,
    pub car_params: CarParams,
    pub device_state: DeviceState,
    pub cpu_perc: i8,
    pub cpu_temp: f32,
    pub fan_speed_rpm: i32,
    pub lateral_plan: LateralPlan,
    pub longitudinal_plan: LongitudinalPlan,
    pub gps: GpsLocationExternal,
    pub satellite_count: i32,
    pub live_enavi_data: LiveENaviData,
    pub live_map_data: LiveMapData,

    /// Ambient light in 0..=100 estimated from the wide camera exposure
    pub light_sensor: f32,
    /// Remaining frames of blinker flashing
    pub blinker_blinkrate: i32,

    pub params: UiParams,
    pub config: UiConfig,
    pub read_params_once: bool,
    /// Display sleep timeout in ticks, -1 for never
    pub n_time: i32,
    pub auto_gitpull: bool,

    /// The screen was touched since the last tick
    pub touched: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            started: false,
            ignition: false,
            started_frame: 0,
            enabled: false,
            experimental_mode: false,
            panda_type: PandaType::Unknown,
            controls_allowed: false,
            calibration: Calibration::default(),
            wide_cam: false,
            geometry: ModelGeometry::default(),
            driver_pose: DriverPose::default(),
            dm_fade_state: 1.0,
            dm_active: false,
            is_rhd: false,
            controls_state: ControlsState::default(),
            output_scale: 0.0,
            multi_lat_selected: 0.0,
            car_state: CarState::default(),
            live_parameters: LiveParameters::default(),
            car_params: CarParams::default(),
            device_state: DeviceState::default(),
            cpu_perc: 0,
            cpu_temp: 0.0,
            fan_speed_rpm: 0,
            lateral_plan: LateralPlan::default(),
            longitudinal_plan: LongitudinalPlan::default(),
            gps: GpsLocationExternal::default(),
            satellite_count: 0,
            live_enavi_data: LiveENaviData::default(),
            live_map_data: LiveMapData::default(),
            light_sensor: 0.0,
            blinker_blinkrate: 0,
            params: UiParams::default(),
            config: UiConfig::default(),
            read_params_once: false,
            n_time: -1,
            auto_gitpull: false,
            touched: false,
        }
    }
}

impl Scene {
    /// Copy controlsState and derive the lateral controller output
    pub fn set_controls_state(&mut self, controls_state: &ControlsState) {
        self.controls_state = controls_state.clone();
        let lateral = &controls_state.lateral_control_state;
        self.output_scale = lateral.output();
        if let Some(selected) = lateral.selected() {
            self.multi_lat_selected = selected;
        }
        self.enabled = controls_state.enabled;
        self.experimental_mode = controls_state.experimental_mode;
    }

    /// Copy carState, restarting the blinker animation if a blinker changed
    pub fn set_car_state(&mut self, car_state: &CarState) {
        if self.car_state.left_blinker != car_state.left_blinker
            || self.car_state.right_blinker != car_state.right_blinker
        {
            self.blinker_blinkrate = BLINKER_BLINK_FRAMES;
        }
        self.car_state = car_state.clone();
    }

    pub fn set_device_state(&mut self, device_state: &DeviceState) {
        self.device_state = device_state.clone();
        if let Some(cpu_perc) = device_state.cpu_usage_percent.first() {
            self.cpu_perc = *cpu_perc;
        }
        if let Some(cpu_temp) = device_state.cpu_temp_c.first() {
            self.cpu_temp = *cpu_temp;
        }
    }

    /// Copy navigation data
    ///
    /// Debug lines are only taken with the debug flag set and Waze data only with Waze
    /// selected as navigation provider.
    pub fn set_live_enavi_data(&mut self, data: &LiveENaviData) {
        let previous = std::mem::take(&mut self.live_enavi_data);
        let mut data = data.clone();
        if !self.config.debug {
            data.debug = previous.debug;
        }
        if self.config.navi_select != 2 {
            data.waze = previous.waze;
        }
        self.live_enavi_data = data;
    }
}
