// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! User settings read from the parameter store

use crate::params::{get_float, get_int, Params};
use crate::UI_FREQ;
use log::warn;

/// Param keys read by the UI
pub mod keys {
    pub const IS_METRIC: &str = "IsMetric";
    pub const NAV_SETTING_LEFT_SIDE: &str = "NavSettingLeftSide";
    pub const IS_OPENPILOT_VIEW_ENABLED: &str = "IsOpenpilotViewEnabled";
    pub const GIT_PULL_ON_BOOT: &str = "GitPullOnBoot";
    pub const RUN_CUSTOM_COMMAND: &str = "RunCustomCommand";
    pub const PRIME_TYPE: &str = "PrimeType";
    pub const LANGUAGE_SETTING: &str = "LanguageSetting";
    pub const COMMA_STOCK_UI: &str = "CommaStockUI";
    pub const DO_NOT_DISTURB_MODE: &str = "DoNotDisturbMode";
    pub const UI_VOLUME_BOOST: &str = "OpkrUIVolumeBoost";
}

/// Integer value of `key` with default substitution
///
/// Missing values silently take the default. Malformed values take the default with a
/// warning.
pub fn int_or_default(params: &dyn Params, key: &str, default: i32) -> i32 {
    match get_int(params, key) {
        Ok(value) => value.unwrap_or(default),
        Err(e) => {
            warn!("{e}. Using default {default}");
            default
        }
    }
}

/// Float value of `key` with default substitution, like [int_or_default]
pub fn float_or_default(params: &dyn Params, key: &str, default: f32) -> f32 {
    match get_float(params, key) {
        Ok(value) => value.unwrap_or(default),
        Err(e) => {
            warn!("{e}. Using default {default}");
            default
        }
    }
}

struct Reader<'p> {
    params: &'p dyn Params,
}

impl Reader<'_> {
    fn int(&self, key: &str, default: i32) -> i32 {
        int_or_default(self.params, key, default)
    }

    fn flag(&self, key: &str) -> bool {
        self.params.get_bool(key)
    }
}

/// Display settings re-read on demand
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UiParams {
    pub is_metric: bool,
    pub map_on_left: bool,
}

impl UiParams {
    pub fn load(params: &dyn Params) -> Self {
        Self {
            is_metric: params.get_bool(keys::IS_METRIC),
            map_on_left: params.get_bool(keys::NAV_SETTING_LEFT_SIDE),
        }
    }
}

/// Tunables read once after the car is started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    pub driving_record: bool,
    pub debug_ui: [bool; 3],
    pub force_gear_d: bool,
    pub blind_spot_detect: bool,
    pub laneless_mode: i32,
    pub recording_count: i32,
    pub recording_quality: i32,
    pub monitoring_mode: bool,
    /// Fixed display brightness in percent, 0 for automatic
    pub brightness: i32,
    /// Volume override in percent, 0 for ambient-driven volume, negative to mute
    pub volume_boost: i32,
    /// Screen-off policy: minutes if positive, 0 / -1 / -2 for 30 / 15 / 5 s, -3 never
    pub auto_screen_off: i32,
    /// Brightness of the dimmed screen in percent of the automatic level
    pub brightness_off: i32,
    pub camera_offset: i32,
    pub path_offset: i32,
    pub pid_kp: i32,
    pub pid_ki: i32,
    pub pid_kd: i32,
    pub pid_kf: i32,
    pub torque_kp: i32,
    pub torque_kf: i32,
    pub torque_ki: i32,
    pub torque_friction: i32,
    pub torque_max_lat_accel: i32,
    pub indi_inner_loop_gain: i32,
    pub indi_outer_loop_gain: i32,
    pub indi_time_constant: i32,
    pub indi_actuator_effectiveness: i32,
    pub lqr_scale: i32,
    pub lqr_ki: i32,
    pub lqr_dc_gain: i32,
    /// Navigation provider, 2 is Waze
    pub navi_select: i32,
    pub radar_long_helper: i32,
    pub live_tune_panel_enable: bool,
    pub bottom_text_view: i32,
    pub animated_rpm: bool,
    pub max_animated_rpm: i32,
    pub show_error: bool,
    pub speedlimit_signtype: bool,
    pub sl_decel_off: bool,
    pub osm_enabled: bool,
    pub lateral_control_method: i32,
    pub do_not_disturb_mode: i32,
    pub depart_chime_at_resume: bool,
    pub debug: bool,
    pub low_ui_profile: bool,
    pub stock_lkas_on_disengagement: bool,
    pub ufc_mode: bool,
    /// 1 for the stock look, 2 additionally enables do-not-disturb
    pub comma_stock_ui: i32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::load(&crate::params::MemoryParams::new())
    }
}

impl UiConfig {
    /// Read all tunables from `params`
    pub fn load(params: &dyn Params) -> Self {
        let r = Reader { params };
        let curv_decel_option = r.int("CurvDecelOption", 0);
        Self {
            driving_record: r.flag("OpkrDrivingRecord"),
            debug_ui: [r.flag("DebugUi1"), r.flag("DebugUi2"), r.flag("DebugUi3")],
            force_gear_d: r.flag("JustDoGearD"),
            blind_spot_detect: r.flag("OpkrBlindSpotDetect"),
            laneless_mode: r.int("LanelessMode", 0),
            recording_count: r.int("RecordingCount", 100),
            recording_quality: r.int("RecordingQuality", 1),
            monitoring_mode: r.flag("OpkrMonitoringMode"),
            brightness: r.int("OpkrUIBrightness", 0),
            volume_boost: r.int(keys::UI_VOLUME_BOOST, 0),
            auto_screen_off: r.int("OpkrAutoScreenOff", -2),
            brightness_off: r.int("OpkrUIBrightnessOff", 10),
            camera_offset: r.int("CameraOffsetAdj", 60),
            path_offset: r.int("PathOffsetAdj", 0),
            pid_kp: r.int("PidKp", 25),
            pid_ki: r.int("PidKi", 50),
            pid_kd: r.int("PidKd", 150),
            pid_kf: r.int("PidKf", 7),
            torque_kp: r.int("TorqueKp", 10),
            torque_kf: r.int("TorqueKf", 10),
            torque_ki: r.int("TorqueKi", 1),
            torque_friction: r.int("TorqueFriction", 80),
            torque_max_lat_accel: r.int("TorqueMaxLatAccel", 27),
            indi_inner_loop_gain: r.int("InnerLoopGain", 35),
            indi_outer_loop_gain: r.int("OuterLoopGain", 20),
            indi_time_constant: r.int("TimeConstant", 14),
            indi_actuator_effectiveness: r.int("ActuatorEffectiveness", 20),
            lqr_scale: r.int("Scale", 1800),
            lqr_ki: r.int("LqrKi", 16),
            lqr_dc_gain: r.int("DcGain", 30),
            navi_select: r.int("OPKRNaviSelect", 0),
            radar_long_helper: r.int("RadarLongHelper", 0),
            live_tune_panel_enable: r.flag("OpkrLiveTunePanelEnable"),
            bottom_text_view: r.int("BottomTextView", 0),
            animated_rpm: r.flag("AnimatedRPM"),
            max_animated_rpm: r.int("AnimatedRPMMax", 3600),
            show_error: r.flag("ShowError"),
            speedlimit_signtype: r.flag("OpkrSpeedLimitSignType"),
            sl_decel_off: r.flag("SpeedLimitDecelOff"),
            osm_enabled: r.flag("OSMEnable")
                || r.flag("OSMSpeedLimitEnable")
                || curv_decel_option == 1
                || curv_decel_option == 3,
            lateral_control_method: r.int("LateralControlMethod", 0),
            do_not_disturb_mode: r.int(keys::DO_NOT_DISTURB_MODE, 0),
            depart_chime_at_resume: r.flag("DepartChimeAtResume"),
            debug: r.flag("OPKRDebug"),
            low_ui_profile: r.flag("LowUIProfile"),
            stock_lkas_on_disengagement: r.flag("StockLKASEnabled"),
            ufc_mode: r.flag("UFCModeEnabled"),
            comma_stock_ui: r.int(keys::COMMA_STOCK_UI, 0),
        }
    }

    /// Display sleep timeout in ticks, -1 if the display never sleeps
    pub fn n_time(&self) -> i32 {
        let freq = UI_FREQ as i32;
        match self.auto_screen_off {
            minutes if minutes > 0 => minutes.saturating_mul(60 * freq),
            0 => 30 * freq,
            -1 => 15 * freq,
            -2 => 5 * freq,
            _ => -1,
        }
    }

    /// Screen do-not-disturb: stock look 2 with DND mode 1 or 3
    pub fn do_not_disturb(&self) -> bool {
        self.comma_stock_ui == 2 && matches!(self.do_not_disturb_mode, 1 | 3)
    }
}

/// Speaker settings, re-read on every volume update
///
/// Parsed as floats, so `"1.5"` is a valid stock look.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SoundConfig {
    pub comma_stock_ui: f32,
    pub do_not_disturb_mode: f32,
    /// Volume override in percent
    pub volume_boost: f32,
}

impl SoundConfig {
    pub fn load(params: &dyn Params) -> Self {
        Self {
            comma_stock_ui: float_or_default(params, keys::COMMA_STOCK_UI, 0.0),
            do_not_disturb_mode: float_or_default(params, keys::DO_NOT_DISTURB_MODE, 0.0),
            volume_boost: float_or_default(params, keys::UI_VOLUME_BOOST, 0.0),
        }
    }

    /// Sound do-not-disturb: stock look and DND mode both above 1
    pub fn mute(&self) -> bool {
        self.comma_stock_ui > 1.0 && self.do_not_disturb_mode > 1.0
    }
}

#[cfg(test)]
mod test {
    use super::{SoundConfig, UiConfig, UiParams};
    use crate::params::MemoryParams;

    #[test]
    fn missing_values_take_defaults() {
        let config = UiConfig::load(&MemoryParams::new());
        assert_eq!(config.recording_count, 100);
        assert_eq!(config.auto_screen_off, -2);
        assert!(!config.osm_enabled);
        assert_eq!(config, UiConfig::default());
    }

    #[test]
    fn malformed_values_take_defaults() {
        let params = MemoryParams::with([
            ("OpkrUIBrightness", "bright"),
            ("PidKp", "30"),
            ("OpkrAutoScreenOff", "1.5"),
        ]);
        let config = UiConfig::load(&params);
        assert_eq!(config.brightness, 0);
        assert_eq!(config.pid_kp, 30);
        assert_eq!(config.auto_screen_off, -2);
    }

    #[test]
    fn osm_follows_any_source() {
        for (key, value) in [
            ("OSMEnable", "1"),
            ("OSMSpeedLimitEnable", "1"),
            ("CurvDecelOption", "1"),
            ("CurvDecelOption", "3"),
        ] {
            let config = UiConfig::load(&MemoryParams::with([(key, value)]));
            assert!(config.osm_enabled, "{key}={value}");
        }
        let config = UiConfig::load(&MemoryParams::with([("CurvDecelOption", "2")]));
        assert!(!config.osm_enabled);
    }

    #[test]
    fn screen_off_timeout() {
        let n_time = |auto_screen_off| {
            UiConfig {
                auto_screen_off,
                ..UiConfig::default()
            }
            .n_time()
        };
        assert_eq!(n_time(3), 3 * 60 * 20);
        assert_eq!(n_time(0), 600);
        assert_eq!(n_time(-1), 300);
        assert_eq!(n_time(-2), 100);
        assert_eq!(n_time(-3), -1);
    }

    #[test]
    fn display_params() {
        let params = MemoryParams::with([("IsMetric", "1"), ("NavSettingLeftSide", "0")]);
        assert_eq!(
            UiParams::load(&params),
            UiParams {
                is_metric: true,
                map_on_left: false
            }
        );
    }

    #[test]
    fn sound_settings_parse_as_floats() {
        assert!(!SoundConfig::load(&MemoryParams::new()).mute());

        let params = MemoryParams::with([
            ("CommaStockUI", "1.5"),
            ("DoNotDisturbMode", "2"),
            ("OpkrUIVolumeBoost", "loud"),
        ]);
        let config = SoundConfig::load(&params);
        assert_eq!(config.comma_stock_ui, 1.5);
        assert_eq!(config.volume_boost, 0.0);
        assert!(config.mute());

        let params = MemoryParams::with([("CommaStockUI", "1"), ("DoNotDisturbMode", "3")]);
        assert!(!SoundConfig::load(&params).mute());
    }
}
