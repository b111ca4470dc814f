// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use crate::messages::{
    CarParams, CarState, ControlsState, DeviceState, DriverMonitoringState, DriverStateV2,
    FrameData, GpsLocationExternal, LateralPlan, LiveCalibration, LiveENaviData, LiveMapData,
    LiveParameters, LongitudinalPlan, Microphone, ModelV2, PandaState, PeripheralState,
    RadarState, UbloxGnss, UiPlan,
};
use std::fmt::Display;

/// Bus topics consumed by the display layer
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Topic {
    ControlsState,
    CarState,
    LiveParameters,
    LiveCalibration,
    DeviceState,
    PeripheralState,
    PandaStates,
    UbloxGnss,
    GpsLocationExternal,
    CarParams,
    WideRoadCameraState,
    LateralPlan,
    LongitudinalPlan,
    Microphone,
    ModelV2,
    RadarState,
    UiPlan,
    DriverStateV2,
    DriverMonitoringState,
    LiveENaviData,
    LiveMapData,
}

impl Topic {
    pub const COUNT: usize = 21;

    pub const ALL: [Topic; Topic::COUNT] = [
        Topic::ControlsState,
        Topic::CarState,
        Topic::LiveParameters,
        Topic::LiveCalibration,
        Topic::DeviceState,
        Topic::PeripheralState,
        Topic::PandaStates,
        Topic::UbloxGnss,
        Topic::GpsLocationExternal,
        Topic::CarParams,
        Topic::WideRoadCameraState,
        Topic::LateralPlan,
        Topic::LongitudinalPlan,
        Topic::Microphone,
        Topic::ModelV2,
        Topic::RadarState,
        Topic::UiPlan,
        Topic::DriverStateV2,
        Topic::DriverMonitoringState,
        Topic::LiveENaviData,
        Topic::LiveMapData,
    ];

    /// Service name on the bus
    pub fn name(&self) -> &'static str {
        match self {
            Topic::ControlsState => "controlsState",
            Topic::CarState => "carState",
            Topic::LiveParameters => "liveParameters",
            Topic::LiveCalibration => "liveCalibration",
            Topic::DeviceState => "deviceState",
            Topic::PeripheralState => "peripheralState",
            Topic::PandaStates => "pandaStates",
            Topic::UbloxGnss => "ubloxGnss",
            Topic::GpsLocationExternal => "gpsLocationExternal",
            Topic::CarParams => "carParams",
            Topic::WideRoadCameraState => "wideRoadCameraState",
            Topic::LateralPlan => "lateralPlan",
            Topic::LongitudinalPlan => "longitudinalPlan",
            Topic::Microphone => "microphone",
            Topic::ModelV2 => "modelV2",
            Topic::RadarState => "radarState",
            Topic::UiPlan => "uiPlan",
            Topic::DriverStateV2 => "driverStateV2",
            Topic::DriverMonitoringState => "driverMonitoringState",
            Topic::LiveENaviData => "liveENaviData",
            Topic::LiveMapData => "liveMapData",
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A message on one topic
#[derive(Debug, Clone)]
pub enum Event {
    ControlsState(ControlsState),
    CarState(CarState),
    LiveParameters(LiveParameters),
    LiveCalibration(LiveCalibration),
    DeviceState(DeviceState),
    PeripheralState(PeripheralState),
    PandaStates(Vec<PandaState>),
    UbloxGnss(UbloxGnss),
    GpsLocationExternal(GpsLocationExternal),
    CarParams(CarParams),
    WideRoadCameraState(FrameData),
    LateralPlan(LateralPlan),
    LongitudinalPlan(LongitudinalPlan),
    Microphone(Microphone),
    ModelV2(Box<ModelV2>),
    RadarState(RadarState),
    UiPlan(Box<UiPlan>),
    DriverStateV2(DriverStateV2),
    DriverMonitoringState(DriverMonitoringState),
    LiveENaviData(LiveENaviData),
    LiveMapData(LiveMapData),
}

impl Event {
    /// Topic this event is published on
    pub fn topic(&self) -> Topic {
        match self {
            Event::ControlsState(_) => Topic::ControlsState,
            Event::CarState(_) => Topic::CarState,
            Event::LiveParameters(_) => Topic::LiveParameters,
            Event::LiveCalibration(_) => Topic::LiveCalibration,
            Event::DeviceState(_) => Topic::DeviceState,
            Event::PeripheralState(_) => Topic::PeripheralState,
            Event::PandaStates(_) => Topic::PandaStates,
            Event::UbloxGnss(_) => Topic::UbloxGnss,
            Event::GpsLocationExternal(_) => Topic::GpsLocationExternal,
            Event::CarParams(_) => Topic::CarParams,
            Event::WideRoadCameraState(_) => Topic::WideRoadCameraState,
            Event::LateralPlan(_) => Topic::LateralPlan,
            Event::LongitudinalPlan(_) => Topic::LongitudinalPlan,
            Event::Microphone(_) => Topic::Microphone,
            Event::ModelV2(_) => Topic::ModelV2,
            Event::RadarState(_) => Topic::RadarState,
            Event::UiPlan(_) => Topic::UiPlan,
            Event::DriverStateV2(_) => Topic::DriverStateV2,
            Event::DriverMonitoringState(_) => Topic::DriverMonitoringState,
            Event::LiveENaviData(_) => Topic::LiveENaviData,
            Event::LiveMapData(_) => Topic::LiveMapData,
        }
    }
}

#[cfg(test)]
mod test {
    use super::Topic;

    #[test]
    fn indices_match_table() {
        for (i, topic) in Topic::ALL.iter().enumerate() {
            assert_eq!(topic.index(), i, "{topic} out of place");
        }
    }
}
