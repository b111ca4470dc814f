// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use hud::prelude::{Activity, ActivityId, UiEvent, UiState, UI_FREQ};
use log::{debug, info};

/// UI state printing a scene summary once per second
pub struct Dashboard {
    state: UiState,
    ticks: u64,
}

impl Dashboard {
    pub fn new(state: UiState) -> Self {
        Self { state, ticks: 0 }
    }

    fn summary(&self) {
        let scene = self.state.scene();
        let geometry = &scene.geometry;
        let leads = geometry.lead_vertices.iter().flatten().count();
        info!(
            "{:?} started={} light={:.0} brightness={} awake={} track={} leads={} alert={:?}",
            self.state.status(),
            scene.started,
            scene.light_sensor,
            self.state.device().brightness(),
            self.state.device().is_awake(),
            geometry.track_vertices.len(),
            leads,
            self.state.alert().alert_type,
        );
        debug!(
            "path {:.1} m, driver yaw {:.2}, dm fade {:.2}",
            geometry.path_distance, scene.driver_pose.vals[1], scene.dm_fade_state
        );
    }
}

impl Activity for Dashboard {
    fn id(&self) -> ActivityId {
        self.state.id()
    }

    fn startup(&mut self) {
        self.state.startup();
    }

    fn step(&mut self) {
        self.state.step();
        for event in self.state.take_events() {
            match event {
                UiEvent::OffroadTransition(offroad) => info!("Offroad: {offroad}"),
                UiEvent::PrimeTypeChanged(prime_type) => info!("Prime type: {prime_type}"),
                UiEvent::Device(event) => info!("Device: {event:?}"),
            }
        }
        if self.ticks % UI_FREQ == 0 {
            self.summary();
        }
        self.ticks += 1;
    }

    fn shutdown(&mut self) {
        self.state.shutdown();
    }
}
