// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! UI state: the per-tick aggregation of bus records into the [Scene]

use crate::activity::{Activity, ActivityId};
use crate::alert::Alert;
use crate::clock::{Clock, SharedClock};
use crate::com::{SubMaster, Subscription, Topic};
use crate::config::{int_or_default, keys, UiConfig, UiParams};
use crate::device::{Device, DeviceEvent, Hardware};
use crate::dmonitoring::{step_fade_state, update_dmonitoring};
use crate::error::Error;
use crate::geometry::{update_leads, update_model, DrawDistance, Projector, ScreenTransform};
use crate::messages::{ImageSensor, OpenpilotState, PandaType, UbloxGnss};
use crate::params::Params;
use crate::scene::Scene;
use crate::UI_FREQ;
use log::{debug, info, warn};
use std::sync::Arc;
use tracing::instrument;

/// Topics the UI state listens to
pub const UI_TOPICS: [Topic; 20] = [
    Topic::ModelV2,
    Topic::ControlsState,
    Topic::LiveCalibration,
    Topic::RadarState,
    Topic::DeviceState,
    Topic::PeripheralState,
    Topic::PandaStates,
    Topic::CarParams,
    Topic::DriverMonitoringState,
    Topic::CarState,
    Topic::DriverStateV2,
    Topic::WideRoadCameraState,
    Topic::UiPlan,
    Topic::LiveParameters,
    Topic::UbloxGnss,
    Topic::GpsLocationExternal,
    Topic::LateralPlan,
    Topic::LongitudinalPlan,
    Topic::LiveENaviData,
    Topic::LiveMapData,
];

/// Default frame size of the onroad view in pixels
pub const DEFAULT_FRAME_SIZE: (f32, f32) = (2160.0, 1080.0);

/// Prime subscription type when none is stored
const PRIME_TYPE_UNKNOWN: i32 = -1;

/// Frames without pandaStates after which the panda counts as gone
const PANDA_TIMEOUT_FRAMES: u64 = 5 * UI_FREQ;

/// Frames between reads of the view-enable flag
const VIEW_ENABLED_PERIOD: u64 = 8 * UI_FREQ;

/// Engagement status shown by the border colour
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UiStatus {
    #[default]
    Disengaged,
    Override,
    Engaged,
    /// Engaged with the do-not-disturb stock look
    Dnd,
}

/// Notifications of [UiState::update]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Emitted on every start/stop edge with `true` when going offroad
    OffroadTransition(bool),
    PrimeTypeChanged(i32),
    Device(DeviceEvent),
}

/// UI state activity
///
/// Polls the bus once per tick, updates the [Scene] and drives the [Device].
pub struct UiState {
    id: ActivityId,
    sm: SubMaster,
    clock: SharedClock,
    params: Arc<dyn Params>,
    hardware: Arc<dyn Hardware>,
    device: Device,
    scene: Scene,
    status: UiStatus,
    started_prev: bool,
    view_enabled: bool,
    prime_type: i32,
    language: String,
    frame_size: (f32, f32),
    draw_distance: DrawDistance,
    events: Vec<UiEvent>,
}

impl UiState {
    pub fn new(
        id: ActivityId,
        input: Subscription,
        clock: SharedClock,
        params: Arc<dyn Params>,
        hardware: Arc<dyn Hardware>,
    ) -> Result<Self, Error> {
        let device = Device::new(hardware.clone())?;
        let prime_type = int_or_default(params.as_ref(), keys::PRIME_TYPE, PRIME_TYPE_UNKNOWN);
        let language = params.get(keys::LANGUAGE_SETTING).unwrap_or_default();
        debug!("UI state with prime type {prime_type} and language {language:?}");

        Ok(Self {
            id,
            sm: SubMaster::new(&UI_TOPICS, input),
            clock,
            params,
            hardware,
            device,
            scene: Scene::default(),
            status: UiStatus::default(),
            started_prev: false,
            view_enabled: false,
            prime_type,
            language,
            frame_size: DEFAULT_FRAME_SIZE,
            draw_distance: DrawDistance::default(),
            events: Vec::new(),
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn status(&self) -> UiStatus {
        self.status
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut Device {
        &mut self.device
    }

    pub fn sm(&self) -> &SubMaster {
        &self.sm
    }

    pub fn prime_type(&self) -> i32 {
        self.prime_type
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Store a new prime type
    ///
    /// The type is persisted and announced only if it changed.
    pub fn set_prime_type(&mut self, prime_type: i32) -> Result<(), Error> {
        if prime_type != self.prime_type {
            self.prime_type = prime_type;
            self.params.put(keys::PRIME_TYPE, &prime_type.to_string())?;
            self.events.push(UiEvent::PrimeTypeChanged(prime_type));
        }
        Ok(())
    }

    /// Size of the frame the geometry is projected into
    pub fn set_frame_size(&mut self, width: f32, height: f32) {
        self.frame_size = (width, height);
    }

    pub fn set_wide_cam(&mut self, wide_cam: bool) {
        self.scene.wide_cam = wide_cam;
    }

    /// Register a touch of the screen
    pub fn touch(&mut self) {
        self.scene.touched = true;
        self.device.reset_interactive_timeout(None);
    }

    /// Re-read the display settings
    pub fn update_params(&mut self) {
        self.scene.params = UiParams::load(self.params.as_ref());
    }

    /// Calibration was received since the car was started
    pub fn world_objects_visible(&self) -> bool {
        self.sm.rcv_frame(Topic::LiveCalibration) > self.scene.started_frame
    }

    pub fn engaged(&self) -> bool {
        self.scene.started && self.sm.controls_state().enabled
    }

    /// Alert to show right now
    pub fn alert(&self) -> Alert {
        Alert::get(
            &self.sm,
            self.scene.started_frame,
            self.clock.now_nanos(),
            self.hardware.is_pc(),
        )
    }

    /// Events since the last call
    pub fn take_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run one tick
    pub fn update(&mut self) {
        self.sm.update(self.clock.now_nanos());
        self.update_state();
        self.update_status();
        self.update_geometry();
        self.update_driver_monitoring();

        self.device.update(&self.scene);
        self.events
            .extend(self.device.take_events().into_iter().map(UiEvent::Device));
        self.scene.touched = false;
        self.scene.blinker_blinkrate = (self.scene.blinker_blinkrate - 1).max(0);
    }

    fn update_state(&mut self) {
        let sm = &self.sm;
        let scene = &mut self.scene;

        if sm.updated(Topic::ControlsState) {
            scene.set_controls_state(sm.controls_state());
        }
        if sm.updated(Topic::CarState) {
            scene.set_car_state(sm.car_state());
        }
        if sm.updated(Topic::LiveParameters) {
            scene.live_parameters = *sm.live_parameters();
        }
        if sm.updated(Topic::LiveCalibration) {
            scene.calibration.update(sm.live_calibration());
        }
        if sm.updated(Topic::DeviceState) {
            scene.set_device_state(sm.device_state());
        }
        if sm.updated(Topic::PeripheralState) {
            scene.fan_speed_rpm = sm.peripheral_state().fan_speed_rpm;
        }
        if sm.updated(Topic::PandaStates) {
            let panda_states = sm.panda_states();
            if let Some(first) = panda_states.first() {
                scene.panda_type = first.panda_type;
                if scene.panda_type != PandaType::Unknown {
                    scene.ignition = panda_states
                        .iter()
                        .any(|p| p.ignition_line || p.ignition_can);
                    if let Some(last) = panda_states.last() {
                        scene.controls_allowed = last.controls_allowed;
                    }
                }
            }
        } else if sm.frame().saturating_sub(sm.rcv_frame(Topic::PandaStates))
            > PANDA_TIMEOUT_FRAMES
        {
            scene.panda_type = PandaType::Unknown;
        }
        if sm.updated(Topic::UbloxGnss) {
            if let UbloxGnss::MeasurementReport { num_meas } = sm.ublox_gnss() {
                scene.satellite_count = *num_meas;
            }
        }
        if sm.updated(Topic::GpsLocationExternal) {
            scene.gps = *sm.gps_location_external();
        }
        if sm.updated(Topic::CarParams) {
            scene.car_params = sm.car_params().clone();
        }
        if sm.updated(Topic::WideRoadCameraState) {
            let camera = sm.wide_road_camera_state();
            let scale = if camera.sensor == ImageSensor::Ar0231 {
                6.0
            } else {
                1.0
            };
            scene.light_sensor = (100.0 - scale * camera.exposure_val_percent).max(0.0);
        }
        if sm.updated(Topic::LateralPlan) {
            scene.lateral_plan = sm.lateral_plan().clone();
        }
        if sm.updated(Topic::LongitudinalPlan) {
            scene.longitudinal_plan = sm.longitudinal_plan().clone();
        }
        if sm.updated(Topic::LiveENaviData) {
            scene.set_live_enavi_data(sm.live_enavi_data());
        }
        if sm.updated(Topic::LiveMapData) {
            scene.live_map_data = sm.live_map_data().clone();
        }
        if sm.updated(Topic::DriverMonitoringState) {
            let dm = sm.driver_monitoring_state();
            scene.is_rhd = dm.is_rhd;
            scene.dm_active = dm.is_active_mode;
        }

        if sm.frame() % VIEW_ENABLED_PERIOD == 0 {
            self.view_enabled = self.params.get_bool(keys::IS_OPENPILOT_VIEW_ENABLED);
        }
        let device_started = sm.device_state().started;
        scene.started = device_started && (scene.ignition || self.view_enabled);
    }

    fn update_status(&mut self) {
        let frame = self.sm.frame();

        if self.scene.started && self.sm.updated(Topic::ControlsState) {
            let controls_state = self.sm.controls_state();
            self.status = match controls_state.state {
                OpenpilotState::PreEnabled | OpenpilotState::Overriding => UiStatus::Override,
                _ if !controls_state.enabled => UiStatus::Disengaged,
                _ if self.scene.config.comma_stock_ui == 2 => UiStatus::Dnd,
                _ => UiStatus::Engaged,
            };
        }

        if self.scene.started != self.started_prev || frame == 1 {
            if self.scene.started {
                self.status = UiStatus::Disengaged;
                self.scene.started_frame = frame;
            }
            self.started_prev = self.scene.started;
            info!(
                "Going {} in frame {frame}",
                if self.scene.started { "onroad" } else { "offroad" }
            );
            self.events
                .push(UiEvent::OffroadTransition(!self.scene.started));
        }

        let since_start = frame.saturating_sub(self.scene.started_frame);
        if !self.scene.auto_gitpull && since_start > 30 * UI_FREQ {
            let command = if self.params.get_bool(keys::GIT_PULL_ON_BOOT) {
                Some("2")
            } else if since_start > 60 * UI_FREQ {
                Some("1")
            } else {
                None
            };
            if let Some(command) = command {
                self.scene.auto_gitpull = true;
                info!("Requesting update check {command}");
                if let Err(e) = self.params.put(keys::RUN_CUSTOM_COMMAND, command) {
                    warn!("{e}");
                }
            }
        }

        if !self.scene.read_params_once {
            self.scene.config = UiConfig::load(self.params.as_ref());
            self.scene.n_time = self.scene.config.n_time();
            self.scene.read_params_once = true;
        }
    }

    fn update_geometry(&mut self) {
        let started_frame = self.scene.started_frame;
        if !self.world_objects_visible() || self.sm.rcv_frame(Topic::ModelV2) <= started_frame {
            return;
        }

        let scene = &mut self.scene;
        let (width, height) = self.frame_size;
        let transform = ScreenTransform::for_camera(width, height, &scene.calibration, scene.wide_cam);
        let projector = Projector::new(&scene.calibration, scene.wide_cam, transform, width, height);

        let model = self.sm.model_v2();
        let radar = self.sm.radar_state();
        update_model(
            &mut scene.geometry,
            &projector,
            model,
            self.sm.ui_plan(),
            radar,
            &self.draw_distance,
        );
        if self.sm.rcv_frame(Topic::RadarState) > started_frame {
            update_leads(&mut scene.geometry, &projector, radar, &model.position);
        }
    }

    fn update_driver_monitoring(&mut self) {
        let scene = &mut self.scene;
        scene.dm_fade_state = step_fade_state(scene.dm_fade_state, scene.dm_active);
        if self.sm.updated(Topic::DriverStateV2) {
            update_dmonitoring(
                &mut scene.driver_pose,
                self.sm.driver_state_v2(),
                scene.dm_fade_state,
                scene.is_rhd,
            );
        }
    }
}

impl Activity for UiState {
    fn id(&self) -> ActivityId {
        self.id
    }

    fn startup(&mut self) {
        debug!("UI state {} starting", self.id);
        self.update_params();
    }

    #[instrument(name = "UiState", skip(self))]
    fn step(&mut self) {
        self.update();
    }

    fn shutdown(&mut self) {
        debug!("UI state {} stopping in frame {}", self.id, self.sm.frame());
    }
}
