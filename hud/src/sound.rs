// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Alert sounds and speaker volume

use crate::activity::{Activity, ActivityId};
use crate::alert::{Alert, AudibleAlert};
use crate::clock::{Clock, SharedClock};
use crate::com::{SubMaster, Subscription, Topic};
use crate::config::SoundConfig;
use crate::device::Hardware;
use crate::error::Error;
use crate::params::Params;
use log::{debug, error, info};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::instrument;

/// Repetitions of a sound effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loops {
    Finite(u32),
    Infinite,
}

impl Loops {
    /// Whether more than one repetition is left
    pub fn is_repeating(&self) -> bool {
        match self {
            Loops::Finite(n) => *n > 1,
            Loops::Infinite => true,
        }
    }
}

/// A loaded sound that can be played on the speaker
pub trait SoundEffect {
    fn set_loop_count(&mut self, loops: Loops);

    fn play(&mut self);

    fn stop(&mut self);

    /// Repetitions left including the one playing, `Finite(0)` when idle
    fn loops_remaining(&self) -> Loops;
}

/// Sound file and repetitions of every audible alert
pub const SOUND_LIST: [(AudibleAlert, &str, Loops); 8] = [
    (AudibleAlert::Engage, "engage.wav", Loops::Finite(1)),
    (AudibleAlert::Disengage, "disengage.wav", Loops::Finite(1)),
    (AudibleAlert::Refuse, "refuse.wav", Loops::Finite(1)),
    (AudibleAlert::Prompt, "prompt.wav", Loops::Finite(1)),
    (AudibleAlert::PromptRepeat, "prompt.wav", Loops::Infinite),
    (AudibleAlert::PromptDistracted, "prompt_distracted.wav", Loops::Infinite),
    (AudibleAlert::WarningSoft, "warning_soft.wav", Loops::Infinite),
    (AudibleAlert::WarningImmediate, "warning_immediate.wav", Loops::Infinite),
];

/// Topics the sound activity listens to
pub const SOUND_TOPICS: [Topic; 2] = [Topic::ControlsState, Topic::Microphone];

/// Load every sound of [SOUND_LIST] with `load`
///
/// A sound that fails to load is logged and left out; its alerts stay silent.
pub fn load_effects<F>(mut load: F) -> BTreeMap<AudibleAlert, (Box<dyn SoundEffect>, Loops)>
where
    F: FnMut(&str) -> Result<Box<dyn SoundEffect>, Error>,
{
    let mut effects = BTreeMap::new();
    for (alert, file, loops) in SOUND_LIST {
        match load(file) {
            Ok(effect) => {
                effects.insert(alert, (effect, loops));
            }
            Err(e) => error!("Failed to load {file} for {alert:?}: {e}"),
        }
    }
    effects
}

/// Linear speaker volume for the ambient noise level in dB
///
/// 30 dB and below map to silence, 60 dB and above to full volume. The linear mapping
/// is taken as a perceived loudness and converted to amplitude.
pub fn ambient_volume(sound_pressure_db: f32) -> f32 {
    let perceived = ((sound_pressure_db - 30.0) / 30.0).clamp(0.0, 1.0);
    if perceived > 0.99 {
        1.0
    } else {
        -(1.0 - perceived).ln() / 100f32.ln()
    }
}

/// Volume after user settings
///
/// `volume_boost` is a percentage. Below -3 % the speaker is muted, above 3 % it
/// replaces the ambient volume.
pub fn effective_volume(ambient: f32, volume_boost: f32, mute: bool) -> f32 {
    let boost = volume_boost * 0.01;
    if mute || boost < -0.03 {
        0.0
    } else if boost > 0.03 {
        boost
    } else {
        ambient
    }
}

/// Plays the sound of the current alert
pub struct Sound {
    id: ActivityId,
    sm: SubMaster,
    clock: SharedClock,
    hardware: Arc<dyn Hardware>,
    params: Arc<dyn Params>,
    effects: BTreeMap<AudibleAlert, (Box<dyn SoundEffect>, Loops)>,
    current_alert: Alert,
}

impl Sound {
    pub fn new(
        id: ActivityId,
        input: Subscription,
        clock: SharedClock,
        hardware: Arc<dyn Hardware>,
        params: Arc<dyn Params>,
        effects: BTreeMap<AudibleAlert, (Box<dyn SoundEffect>, Loops)>,
    ) -> Self {
        Self {
            id,
            sm: SubMaster::new(&SOUND_TOPICS, input),
            clock,
            hardware,
            params,
            effects,
            current_alert: Alert::default(),
        }
    }

    /// Alert whose sound is playing
    pub fn current_alert(&self) -> &Alert {
        &self.current_alert
    }

    fn update_volume(&self) {
        let db = self.sm.microphone().filtered_sound_pressure_weighted_db;
        let config = SoundConfig::load(self.params.as_ref());
        self.hardware.set_volume(effective_volume(
            ambient_volume(db),
            config.volume_boost,
            config.mute(),
        ));
    }

    /// Switch to the sound of `alert`
    ///
    /// Nothing happens if `alert` sounds like the current one. Otherwise repeating sounds
    /// are stopped and the new sound is started. One-shot sounds play out.
    pub fn set_alert(&mut self, alert: Alert) {
        if self.current_alert.same_cue(&alert) {
            return;
        }
        if !alert.alert_type.is_empty() {
            info!("Alert changed to {} ({:?})", alert.alert_type, alert.sound);
        }

        for (sound, (effect, _)) in self.effects.iter_mut() {
            if effect.loops_remaining().is_repeating() {
                debug!("Stopping {sound:?}");
                effect.stop();
            }
        }

        if alert.sound != AudibleAlert::None {
            if let Err(e) = self.play(alert.sound) {
                error!("{e}");
            }
        }
        self.current_alert = alert;
    }

    fn play(&mut self, sound: AudibleAlert) -> Result<(), Error> {
        let (effect, loops) = self
            .effects
            .get_mut(&sound)
            .ok_or(Error::UnknownSound(sound))?;
        debug!("Playing {sound:?} {loops:?}");
        effect.set_loop_count(*loops);
        effect.play();
        Ok(())
    }
}

impl Activity for Sound {
    fn id(&self) -> ActivityId {
        self.id
    }

    fn startup(&mut self) {
        debug!("Sound {} starting with {} effects", self.id, self.effects.len());
    }

    #[instrument(name = "Sound", skip(self))]
    fn step(&mut self) {
        let now = self.clock.now_nanos();
        self.sm.update(now);

        if self.sm.updated(Topic::Microphone) {
            self.update_volume();
        }

        let alert = Alert::get(&self.sm, 0, now, self.hardware.is_pc());
        self.set_alert(alert);
    }

    fn shutdown(&mut self) {
        for (_, (effect, _)) in self.effects.iter_mut() {
            effect.stop();
        }
    }
}
