// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Driver-facing alert derivation
//!
//! The alert normally mirrors the fields of the latest controlsState. When controlsState
//! stops arriving a synthetic alert takes its place.

use crate::clock::{Nanos, NANOS_PER_SEC};
use crate::com::{SubMaster, Topic};
use crate::UI_FREQ;

pub use crate::messages::{AlertSize, AlertStatus, AudibleAlert};

/// Seconds of controlsState silence before the controls count as unresponsive
const CONTROLS_TIMEOUT: u64 = 5;

/// Seconds after the timeout during which an engaged driver is told to take over
const TAKE_CONTROL_WINDOW: u64 = 10;

/// Frames after start before missing controlsState raises an alert
const STARTUP_GRACE_FRAMES: u64 = 5 * UI_FREQ;

/// An alert as shown on the banner and heard from the speaker
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Alert {
    pub text1: String,
    pub text2: String,
    pub alert_type: String,
    pub size: AlertSize,
    pub status: AlertStatus,
    pub sound: AudibleAlert,
}

impl Alert {
    fn synthetic(
        text1: &str,
        text2: &str,
        alert_type: &str,
        size: AlertSize,
        status: AlertStatus,
        sound: AudibleAlert,
    ) -> Self {
        Self {
            text1: text1.to_owned(),
            text2: text2.to_owned(),
            alert_type: alert_type.to_owned(),
            size,
            status,
            sound,
        }
    }

    /// Whether both alerts sound the same
    ///
    /// Size and status only change the banner, so they are ignored.
    pub fn same_cue(&self, other: &Alert) -> bool {
        self.text1 == other.text1
            && self.text2 == other.text2
            && self.alert_type == other.alert_type
            && self.sound == other.sound
    }

    /// Alert derived from the latest controlsState in `sm`
    pub fn get(sm: &SubMaster, started_frame: u64, now: Nanos, is_pc: bool) -> Alert {
        AlertState::derive(sm, started_frame, now, is_pc).into_alert()
    }
}

/// Where the current alert comes from
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum AlertState {
    #[default]
    NoAlert,
    /// Fields of a controlsState received since start
    Bus(Alert),
    /// controlsState never arrived since start
    ControlsWaiting,
    /// controlsState stopped while engaged, driver must take over
    ControlsUnresponsive,
    /// controlsState stopped for good
    ControlsUnresponsivePermanent,
}

impl AlertState {
    /// Derive the alert state for the current frame of `sm`
    ///
    /// `started_frame` is the frame the car was started in; controlsState received
    /// before it is stale. `is_pc` disables the unresponsive alerts.
    pub fn derive(sm: &SubMaster, started_frame: u64, now: Nanos, is_pc: bool) -> AlertState {
        let controls_frame = sm.rcv_frame(Topic::ControlsState);
        let controls_state = sm.controls_state();

        let mut state = AlertState::NoAlert;
        if controls_frame >= started_frame {
            let alert = Alert {
                text1: controls_state.alert_text1.clone(),
                text2: controls_state.alert_text2.clone(),
                alert_type: controls_state.alert_type.clone(),
                size: controls_state.alert_size,
                status: controls_state.alert_status,
                sound: controls_state.alert_sound,
            };
            if alert != Alert::default() {
                state = AlertState::Bus(alert);
            }
        }

        if !sm.updated(Topic::ControlsState)
            && sm.frame().saturating_sub(started_frame) > STARTUP_GRACE_FRAMES
        {
            let missing_secs =
                now.saturating_sub(sm.rcv_time(Topic::ControlsState)) / NANOS_PER_SEC;
            if controls_frame < started_frame {
                state = AlertState::ControlsWaiting;
            } else if missing_secs > CONTROLS_TIMEOUT && !is_pc {
                state = if controls_state.enabled
                    && missing_secs - CONTROLS_TIMEOUT < TAKE_CONTROL_WINDOW
                {
                    AlertState::ControlsUnresponsive
                } else {
                    AlertState::ControlsUnresponsivePermanent
                };
            }
        }
        state
    }

    pub fn into_alert(self) -> Alert {
        match self {
            AlertState::NoAlert => Alert::default(),
            AlertState::Bus(alert) => alert,
            AlertState::ControlsWaiting => Alert::synthetic(
                "openpilot Unavailable",
                "Waiting for controls to start",
                "controlsWaiting",
                AlertSize::Mid,
                AlertStatus::Normal,
                AudibleAlert::None,
            ),
            AlertState::ControlsUnresponsive => Alert::synthetic(
                "TAKE CONTROL IMMEDIATELY",
                "Controls Unresponsive",
                "controlsUnresponsive",
                AlertSize::Full,
                AlertStatus::Critical,
                AudibleAlert::WarningImmediate,
            ),
            AlertState::ControlsUnresponsivePermanent => Alert::synthetic(
                "Controls Unresponsive",
                "Reboot Device",
                "controlsUnresponsivePermanent",
                AlertSize::Mid,
                AlertStatus::Normal,
                AudibleAlert::None,
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Alert, AlertSize, AlertState, AlertStatus, AudibleAlert};
    use crate::clock::NANOS_PER_SEC;
    use crate::com::{channel, Event, Publisher, SubMaster, Topic};
    use crate::messages::ControlsState;
    use crate::UI_FREQ;

    const TICK: u64 = NANOS_PER_SEC / UI_FREQ;

    struct Harness {
        publisher: Publisher,
        sm: SubMaster,
        now: u64,
    }

    impl Harness {
        fn new() -> Self {
            let (publisher, subscription) = channel();
            Self {
                publisher,
                sm: SubMaster::new(&[Topic::ControlsState], subscription),
                now: 0,
            }
        }

        fn tick(&mut self, controls: Option<ControlsState>) {
            if let Some(cs) = controls {
                self.publisher.send(Event::ControlsState(cs)).unwrap();
            }
            self.now += TICK;
            self.sm.update(self.now);
        }

        fn derive(&self, started_frame: u64) -> AlertState {
            AlertState::derive(&self.sm, started_frame, self.now, false)
        }
    }

    fn enabled_controls() -> ControlsState {
        ControlsState {
            enabled: true,
            ..Default::default()
        }
    }

    #[test]
    fn bus_alert_is_adopted() {
        let mut h = Harness::new();
        h.tick(None);
        let started_frame = h.sm.frame();
        h.tick(Some(ControlsState {
            alert_text1: "Steer Unavailable".to_owned(),
            alert_type: "steerUnavailable".to_owned(),
            alert_size: AlertSize::Small,
            alert_sound: AudibleAlert::Prompt,
            ..Default::default()
        }));
        let AlertState::Bus(alert) = h.derive(started_frame) else {
            panic!("expected a bus alert");
        };
        assert_eq!(alert.text1, "Steer Unavailable");
        assert_eq!(alert.sound, AudibleAlert::Prompt);
    }

    #[test]
    fn empty_fields_mean_no_alert() {
        let mut h = Harness::new();
        h.tick(Some(ControlsState::default()));
        assert_eq!(h.derive(1), AlertState::NoAlert);
    }

    #[test]
    fn alert_from_before_start_is_ignored() {
        let mut h = Harness::new();
        h.tick(Some(ControlsState {
            alert_text1: "old".to_owned(),
            ..Default::default()
        }));
        h.tick(None);
        assert_eq!(h.derive(2), AlertState::NoAlert);
    }

    #[test]
    fn silent_controls_after_start_wait() {
        let mut h = Harness::new();
        h.tick(None);
        let started_frame = h.sm.frame();
        for _ in 0..5 * UI_FREQ {
            h.tick(None);
            assert_eq!(h.derive(started_frame), AlertState::NoAlert);
        }
        h.tick(None);
        assert_eq!(h.derive(started_frame), AlertState::ControlsWaiting);
        let alert = h.derive(started_frame).into_alert();
        assert_eq!(alert.alert_type, "controlsWaiting");
        assert_eq!(alert.size, AlertSize::Mid);
    }

    #[test]
    fn stopped_controls_become_unresponsive() {
        let mut h = Harness::new();
        h.tick(None);
        let started_frame = h.sm.frame();
        // Long enough to pass the startup grace period
        for _ in 0..6 * UI_FREQ {
            h.tick(Some(enabled_controls()));
        }
        assert_eq!(h.derive(started_frame), AlertState::NoAlert);

        // Up to and including 5 s of silence nothing happens
        for _ in 0..6 * UI_FREQ - 1 {
            h.tick(None);
            assert_eq!(h.derive(started_frame), AlertState::NoAlert);
        }
        h.tick(None);
        assert_eq!(h.derive(started_frame), AlertState::ControlsUnresponsive);
        let alert = h.derive(started_frame).into_alert();
        assert_eq!(alert.status, AlertStatus::Critical);
        assert_eq!(alert.sound, AudibleAlert::WarningImmediate);

        // Critical until 15 s of silence, permanent afterwards
        for _ in 0..9 * UI_FREQ - 1 {
            h.tick(None);
            assert_eq!(h.derive(started_frame), AlertState::ControlsUnresponsive);
        }
        h.tick(None);
        assert_eq!(
            h.derive(started_frame),
            AlertState::ControlsUnresponsivePermanent
        );

        // Fresh message clears the synthetic alert
        h.tick(Some(enabled_controls()));
        assert_eq!(h.derive(started_frame), AlertState::NoAlert);
    }

    #[test]
    fn disengaged_controls_go_straight_to_permanent() {
        let mut h = Harness::new();
        for _ in 0..6 * UI_FREQ {
            h.tick(Some(ControlsState::default()));
        }
        for _ in 0..6 * UI_FREQ {
            h.tick(None);
        }
        assert_eq!(h.derive(1), AlertState::ControlsUnresponsivePermanent);
    }

    #[test]
    fn pc_never_reports_unresponsive() {
        let mut h = Harness::new();
        for _ in 0..6 * UI_FREQ {
            h.tick(Some(enabled_controls()));
        }
        for _ in 0..10 * UI_FREQ {
            h.tick(None);
        }
        assert_eq!(
            AlertState::derive(&h.sm, 1, h.now, true),
            AlertState::NoAlert
        );
    }

    #[test]
    fn sound_equality_ignores_banner_fields() {
        let alert = Alert {
            text1: "Brake!".to_owned(),
            text2: "Risk of Collision".to_owned(),
            alert_type: "fcw".to_owned(),
            size: AlertSize::Full,
            status: AlertStatus::Critical,
            sound: AudibleAlert::WarningImmediate,
        };
        let resized = Alert {
            size: AlertSize::Mid,
            status: AlertStatus::UserPrompt,
            ..alert.clone()
        };
        assert!(alert.same_cue(&resized));
        assert_ne!(alert, resized);

        let retexted = Alert {
            text2: "Other".to_owned(),
            ..alert.clone()
        };
        assert!(!alert.same_cue(&retexted));
    }
}
