// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Messages
//!
//! Plain data records, one per consumed bus topic. They carry exactly the fields the
//! display layer reads and are independent of any wire format.

mod car;
mod controls;
mod device;
mod model;
mod nav;
mod plan;

pub use car::{CarParams, CarState, CruiseState, GearShifter, LiveParameters, Tpms};
pub use controls::{
    AlertSize, AlertStatus, AtomState, AudibleAlert, ControlsState, LateralControlState,
    OpenpilotState, PidState,
};
pub use device::{
    CalibrationStatus, DeviceState, FrameData, ImageSensor, LiveCalibration, Microphone,
    PandaState, PandaType, PeripheralState,
};
pub use model::{
    DriverData, DriverMonitoringState, DriverStateV2, LeadData, ModelV2, RadarState, UiPlan,
    XyztData, TRAJECTORY_SIZE,
};
pub use nav::{GpsLocationExternal, LiveENaviData, LiveMapData, UbloxGnss, WazeData};
pub use plan::{LateralPlan, LongitudinalPlan};
