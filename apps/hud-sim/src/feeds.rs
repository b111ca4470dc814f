// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Synthetic bus traffic

use crate::scenario::Scenario;
use hud::messages::{
    CalibrationStatus, CarState, DeviceState, DriverData, DriverMonitoringState, DriverStateV2,
    FrameData, LeadData, LiveCalibration, Microphone, ModelV2, PandaState, RadarState, XyztData,
    TRAJECTORY_SIZE,
};
use hud::prelude::{Activity, ActivityId, Event, Publisher, UI_FREQ};
use log::{debug, error, info};
use rand::Rng;
use tracing::instrument;

/// Lane width of the synthetic road in m
const LANE_WIDTH: f32 = 3.6;

/// Publishes a random drive along the scenario
///
/// Slow topics are published at 2 Hz, the rest every tick.
pub struct Feed {
    id: ActivityId,
    publisher: Publisher,
    scenario: Scenario,
    tick: u64,

    // Local state for pseudo-random output generation
    curvature: f32,
    lead_distance: f32,
    lead_visible: bool,
    speed: f32,
    exposure: f32,
    noise_db: f32,
    face_yaw: f32,
}

impl Feed {
    pub fn new(id: ActivityId, publisher: Publisher, scenario: Scenario) -> Self {
        Self {
            id,
            publisher,
            scenario,
            tick: 0,
            curvature: 0.0,
            lead_distance: 40.0,
            lead_visible: true,
            speed: 20.0,
            exposure: 30.0,
            noise_db: 45.0,
            face_yaw: 0.0,
        }
    }

    fn publish(&self, event: Event) {
        let topic = event.topic();
        if let Err(e) = self.publisher.send(event) {
            error!("Failed to publish {topic}: {e}");
        }
    }

    fn publish_slow(&self) {
        let ignition = self.scenario.ignition(self.tick);
        self.publish(Event::DeviceState(DeviceState {
            started: ignition,
            cpu_usage_percent: vec![rand::thread_rng().gen_range(5..=40)],
            cpu_temp_c: vec![random_walk(50.0, 1.0, 5.0)],
            ..Default::default()
        }));
        self.publish(Event::PandaStates(vec![PandaState {
            panda_type: self.scenario.panda_type,
            ignition_line: ignition,
            ignition_can: false,
            controls_allowed: ignition,
        }]));
        self.publish(Event::LiveCalibration(LiveCalibration {
            cal_status: CalibrationStatus::Calibrated,
            rpy_calib: vec![0.0, 0.01, -0.005],
            wide_from_device_euler: vec![0.0, 0.0, 0.0],
        }));
        self.publish(Event::DriverMonitoringState(DriverMonitoringState {
            is_active_mode: self.scenario.dm_active,
            is_rhd: self.scenario.is_rhd,
        }));
    }

    fn publish_drive(&mut self) {
        self.curvature = random_walk(self.curvature, 0.3, 0.0005).clamp(-0.01, 0.01);
        self.speed = random_walk(self.speed, 0.5, 0.3).clamp(0.0, 35.0);
        self.publish(Event::CarState(CarState {
            v_ego: self.speed,
            ..Default::default()
        }));
        self.publish(Event::ModelV2(Box::new(road_model(self.curvature))));

        if rand::thread_rng().gen_bool(0.01) {
            self.lead_visible = !self.lead_visible;
            debug!("Lead {}", if self.lead_visible { "appeared" } else { "lost" });
        }
        self.lead_distance = random_walk(self.lead_distance, 0.8, 0.5).clamp(5.0, 120.0);
        self.publish(Event::RadarState(RadarState {
            lead_one: LeadData {
                d_rel: self.lead_distance,
                y_rel: 0.0,
                v_rel: random_walk(0.0, 1.0, 2.0),
                status: self.lead_visible,
            },
            lead_two: LeadData::default(),
        }));

        self.exposure = random_walk(self.exposure, 0.5, 2.0).clamp(0.0, 100.0);
        self.publish(Event::WideRoadCameraState(FrameData {
            sensor: self.scenario.camera_sensor,
            exposure_val_percent: self.exposure,
        }));

        self.noise_db = random_walk(self.noise_db, 0.5, 1.0).clamp(20.0, 80.0);
        self.publish(Event::Microphone(Microphone {
            filtered_sound_pressure_weighted_db: self.noise_db,
        }));

        self.face_yaw = random_walk(self.face_yaw, 0.5, 0.05).clamp(-0.6, 0.6);
        self.publish(Event::DriverStateV2(DriverStateV2 {
            left_driver_data: DriverData {
                face_orientation: [0.0, self.face_yaw, 0.0],
                face_prob: 0.9,
            },
            right_driver_data: DriverData::default(),
        }));
    }
}

impl Activity for Feed {
    fn id(&self) -> ActivityId {
        self.id
    }

    fn startup(&mut self) {
        info!(
            "Feed starting, ignition on at tick {} and off at {:?}",
            self.scenario.ignition_on, self.scenario.ignition_off
        );
    }

    #[instrument(name = "Feed", skip(self))]
    fn step(&mut self) {
        if self.tick % (UI_FREQ / 2) == 0 {
            self.publish_slow();
        }
        if self.scenario.ignition(self.tick) {
            self.publish_drive();
        }
        if let Some(controls_state) = self.scenario.controls_state(self.tick) {
            self.publish(Event::ControlsState(controls_state.clone()));
        }
        self.tick += 1;
    }

    fn shutdown(&mut self) {
        debug!("Feed stopping after {} ticks", self.tick);
    }
}

/// Random walk from `previous` with a probability of `change_prop` in a range of +/-`max_delta`
fn random_walk(previous: f32, change_prop: f64, max_delta: f32) -> f32 {
    let mut rng = rand::thread_rng();
    if rng.gen_bool(change_prop) {
        previous + rng.gen_range(-max_delta..=max_delta)
    } else {
        previous
    }
}

/// Straight-ish road of constant curvature
///
/// Samples are spaced quadratically like the model output, up to 100 m ahead.
fn road_model(curvature: f32) -> ModelV2 {
    let xs = || (0..TRAJECTORY_SIZE).map(|i| 100.0 * (i as f32 / 32.0).powi(2));
    let line = |offset: f32| {
        let mut data = XyztData::default();
        for x in xs() {
            data.push(x, offset + 0.5 * curvature * x * x, 0.0, x / 20.0);
        }
        data
    };

    ModelV2 {
        position: line(0.0),
        lane_lines: [
            line(-1.5 * LANE_WIDTH),
            line(-0.5 * LANE_WIDTH),
            line(0.5 * LANE_WIDTH),
            line(1.5 * LANE_WIDTH),
        ],
        lane_line_probs: [0.1, 0.9, 0.9, 0.1],
        road_edges: [line(-1.5 * LANE_WIDTH), line(1.5 * LANE_WIDTH)],
        road_edge_stds: [0.4, 0.4],
    }
}

#[cfg(test)]
mod test {
    use super::{random_walk, road_model};
    use hud::messages::TRAJECTORY_SIZE;

    #[test]
    fn road_model_is_full() {
        let model = road_model(0.001);
        assert!(model.position.is_full());
        assert_eq!(model.position.len(), TRAJECTORY_SIZE);
        assert_eq!(model.position.last_x(), 100.0);
        assert!(model.lane_lines[1].y[0] < 0.0 && model.lane_lines[2].y[0] > 0.0);
    }

    #[test]
    fn random_walk_stays_in_delta() {
        for _ in 0..100 {
            let x = random_walk(10.0, 1.0, 0.5);
            assert!((9.5..=10.5).contains(&x));
        }
        assert_eq!(random_walk(10.0, 0.0, 0.5), 10.0);
    }
}
