// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use super::{Event, Subscription, Topic};
use crate::clock::Nanos;
use crate::messages::{
    CarParams, CarState, ControlsState, DeviceState, DriverMonitoringState, DriverStateV2,
    FrameData, GpsLocationExternal, LateralPlan, LiveCalibration, LiveENaviData, LiveMapData,
    LiveParameters, LongitudinalPlan, Microphone, ModelV2, PandaState, PeripheralState,
    RadarState, UbloxGnss, UiPlan,
};
use log::{trace, warn};

/// Receive bookkeeping of one topic
#[derive(Debug, Default, Clone, Copy)]
struct TopicMeta {
    subscribed: bool,
    updated: bool,
    rcv_frame: u64,
    rcv_time: Nanos,
}

/// Latest record per topic
#[derive(Debug, Default)]
struct Latest {
    controls_state: ControlsState,
    car_state: CarState,
    live_parameters: LiveParameters,
    live_calibration: LiveCalibration,
    device_state: DeviceState,
    peripheral_state: PeripheralState,
    panda_states: Vec<PandaState>,
    ublox_gnss: UbloxGnss,
    gps_location_external: GpsLocationExternal,
    car_params: CarParams,
    wide_road_camera_state: FrameData,
    lateral_plan: LateralPlan,
    longitudinal_plan: LongitudinalPlan,
    microphone: Microphone,
    model_v2: Box<ModelV2>,
    radar_state: RadarState,
    ui_plan: Box<UiPlan>,
    driver_state_v2: DriverStateV2,
    driver_monitoring_state: DriverMonitoringState,
    live_enavi_data: LiveENaviData,
    live_map_data: LiveMapData,
}

impl Latest {
    fn store(&mut self, event: Event) {
        match event {
            Event::ControlsState(m) => self.controls_state = m,
            Event::CarState(m) => self.car_state = m,
            Event::LiveParameters(m) => self.live_parameters = m,
            Event::LiveCalibration(m) => self.live_calibration = m,
            Event::DeviceState(m) => self.device_state = m,
            Event::PeripheralState(m) => self.peripheral_state = m,
            Event::PandaStates(m) => self.panda_states = m,
            Event::UbloxGnss(m) => self.ublox_gnss = m,
            Event::GpsLocationExternal(m) => self.gps_location_external = m,
            Event::CarParams(m) => self.car_params = m,
            Event::WideRoadCameraState(m) => self.wide_road_camera_state = m,
            Event::LateralPlan(m) => self.lateral_plan = m,
            Event::LongitudinalPlan(m) => self.longitudinal_plan = m,
            Event::Microphone(m) => self.microphone = m,
            Event::ModelV2(m) => self.model_v2 = m,
            Event::RadarState(m) => self.radar_state = m,
            Event::UiPlan(m) => self.ui_plan = m,
            Event::DriverStateV2(m) => self.driver_state_v2 = m,
            Event::DriverMonitoringState(m) => self.driver_monitoring_state = m,
            Event::LiveENaviData(m) => self.live_enavi_data = m,
            Event::LiveMapData(m) => self.live_map_data = m,
        }
    }
}

/// Polls a subscription once per tick and keeps the latest record of each subscribed topic
///
/// `frame` counts calls to [SubMaster::update], starting at 1 for the first one. Before a
/// topic has been received its getter returns the record's default value and its
/// receive frame and time are 0.
#[derive(Debug)]
pub struct SubMaster {
    input: Subscription,
    frame: u64,
    meta: [TopicMeta; Topic::COUNT],
    latest: Latest,
    disconnected: bool,
}

impl SubMaster {
    pub fn new(topics: &[Topic], input: Subscription) -> SubMaster {
        let mut meta = [TopicMeta::default(); Topic::COUNT];
        for topic in topics {
            meta[topic.index()].subscribed = true;
        }
        SubMaster {
            input,
            frame: 0,
            meta,
            latest: Latest::default(),
            disconnected: false,
        }
    }

    /// Drain all pending events. `now` is stamped as receive time.
    pub fn update(&mut self, now: Nanos) {
        self.frame += 1;
        self.meta.iter_mut().for_each(|m| m.updated = false);

        loop {
            match self.input.read() {
                Ok(Some(event)) => {
                    let topic = event.topic();
                    let meta = &mut self.meta[topic.index()];
                    if !meta.subscribed {
                        continue;
                    }
                    trace!("Received {topic} in frame {}", self.frame);
                    meta.updated = true;
                    meta.rcv_frame = self.frame;
                    meta.rcv_time = now;
                    self.latest.store(event);
                }
                Ok(None) => break,
                Err(e) => {
                    if !self.disconnected {
                        warn!("Bus input lost: {e}. Keeping last received state");
                        self.disconnected = true;
                    }
                    break;
                }
            }
        }
    }

    /// Number of updates so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Whether `topic` received a message in the last update
    pub fn updated(&self, topic: Topic) -> bool {
        self.meta[topic.index()].updated
    }

    /// Frame of the last message on `topic`, 0 if none yet
    pub fn rcv_frame(&self, topic: Topic) -> u64 {
        self.meta[topic.index()].rcv_frame
    }

    /// Receive time of the last message on `topic`, 0 if none yet
    pub fn rcv_time(&self, topic: Topic) -> Nanos {
        self.meta[topic.index()].rcv_time
    }

    pub fn controls_state(&self) -> &ControlsState {
        &self.latest.controls_state
    }

    pub fn car_state(&self) -> &CarState {
        &self.latest.car_state
    }

    pub fn live_parameters(&self) -> &LiveParameters {
        &self.latest.live_parameters
    }

    pub fn live_calibration(&self) -> &LiveCalibration {
        &self.latest.live_calibration
    }

    pub fn device_state(&self) -> &DeviceState {
        &self.latest.device_state
    }

    pub fn peripheral_state(&self) -> &PeripheralState {
        &self.latest.peripheral_state
    }

    pub fn panda_states(&self) -> &[PandaState] {
        &self.latest.panda_states
    }

    pub fn ublox_gnss(&self) -> &UbloxGnss {
        &self.latest.ublox_gnss
    }

    pub fn gps_location_external(&self) -> &GpsLocationExternal {
        &self.latest.gps_location_external
    }

    pub fn car_params(&self) -> &CarParams {
        &self.latest.car_params
    }

    pub fn wide_road_camera_state(&self) -> &FrameData {
        &self.latest.wide_road_camera_state
    }

    pub fn lateral_plan(&self) -> &LateralPlan {
        &self.latest.lateral_plan
    }

    pub fn longitudinal_plan(&self) -> &LongitudinalPlan {
        &self.latest.longitudinal_plan
    }

    pub fn microphone(&self) -> &Microphone {
        &self.latest.microphone
    }

    pub fn model_v2(&self) -> &ModelV2 {
        &self.latest.model_v2
    }

    pub fn radar_state(&self) -> &RadarState {
        &self.latest.radar_state
    }

    pub fn ui_plan(&self) -> &UiPlan {
        &self.latest.ui_plan
    }

    pub fn driver_state_v2(&self) -> &DriverStateV2 {
        &self.latest.driver_state_v2
    }

    pub fn driver_monitoring_state(&self) -> &DriverMonitoringState {
        &self.latest.driver_monitoring_state
    }

    pub fn live_enavi_data(&self) -> &LiveENaviData {
        &self.latest.live_enavi_data
    }

    pub fn live_map_data(&self) -> &LiveMapData {
        &self.latest.live_map_data
    }
}
