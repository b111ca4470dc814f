// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Size class of the alert banner
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertSize {
    #[default]
    None,
    Small,
    Mid,
    Full,
}

/// Severity class of the alert banner
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertStatus {
    #[default]
    Normal,
    UserPrompt,
    Critical,
}

/// Sound requested by an alert
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AudibleAlert {
    #[default]
    None,
    Engage,
    Disengage,
    Refuse,
    Prompt,
    PromptRepeat,
    PromptDistracted,
    WarningSoft,
    WarningImmediate,
}

/// State of the driving assistance state machine
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OpenpilotState {
    #[default]
    Disabled,
    PreEnabled,
    Enabled,
    SoftDisabling,
    Overriding,
}

/// Output of a controller that only reports an actuator output
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PidState {
    pub active: bool,
    pub output: f32,
    pub saturated: bool,
}

/// Output of the blended lateral controller
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AtomState {
    pub active: bool,
    pub output: f32,
    pub saturated: bool,
    /// Blend factor between the underlying controllers
    pub selected: f32,
}

/// Lateral controller state, one variant per controller type
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LateralControlState {
    Pid(PidState),
    Indi(PidState),
    Lqr(PidState),
    Torque(PidState),
    Atom(AtomState),
}

impl Default for LateralControlState {
    fn default() -> Self {
        LateralControlState::Pid(PidState::default())
    }
}

impl LateralControlState {
    /// Numeric tag of the controller type as stored in the `LateralControlMethod` param
    pub fn method(&self) -> i32 {
        match self {
            LateralControlState::Pid(_) => 0,
            LateralControlState::Indi(_) => 1,
            LateralControlState::Lqr(_) => 2,
            LateralControlState::Torque(_) => 3,
            LateralControlState::Atom(_) => 4,
        }
    }

    /// Actuator output of the active controller
    pub fn output(&self) -> f32 {
        match self {
            LateralControlState::Pid(s)
            | LateralControlState::Indi(s)
            | LateralControlState::Lqr(s)
            | LateralControlState::Torque(s) => s.output,
            LateralControlState::Atom(s) => s.output,
        }
    }

    /// Blend selection of the atom controller, `None` for all others
    pub fn selected(&self) -> Option<f32> {
        match self {
            LateralControlState::Atom(s) => Some(s.selected),
            _ => None,
        }
    }
}

/// controlsState
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ControlsState {
    pub enabled: bool,
    pub state: OpenpilotState,
    pub experimental_mode: bool,

    pub alert_text1: String,
    pub alert_text2: String,
    pub alert_type: String,
    pub alert_size: AlertSize,
    pub alert_status: AlertStatus,
    pub alert_sound: AudibleAlert,

    pub lateral_control_state: LateralControlState,

    /// Free-form debug lines
    pub alert_text_msg1: String,
    pub alert_text_msg2: String,
    pub alert_text_msg3: String,

    pub limit_speed_camera: i32,
    pub limit_speed_camera_dist: f32,
    pub map_sign: i32,
    pub map_sign_cam: i32,
    pub steer_ratio: f32,
    pub dynamic_tr_mode: i32,
    pub dynamic_tr_value: f32,
    pub pause_spd_limit: bool,
    pub accel: f32,
    pub safety_speed: f32,
    pub steering_angle_desired_deg: f32,
    pub gap_by_speed_on: bool,
    pub exp_mode_temp: bool,
    pub btn_pressing: i32,
}
