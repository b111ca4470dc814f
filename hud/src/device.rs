// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Display brightness and wakefulness

use crate::error::Error;
use crate::messages::AlertSize;
use crate::scene::Scene;
use crate::worker::BrightnessWorker;
use crate::UI_FREQ;
use log::debug;
use std::sync::Arc;

/// Brightness used while the car is not started, in percent
pub const OFFROAD_BRIGHTNESS_DEFAULT: i32 = 50;

const BACKLIGHT_DT: f32 = 0.05;
const BACKLIGHT_TS: f32 = 10.0;

/// Countdown of the do-not-disturb screen in ticks
const DND_SLEEP_TICKS: i32 = 10 * UI_FREQ as i32;

/// Auto screen off setting that keeps the screen on
const SCREEN_OFF_NEVER: i32 = -3;

/// Display and speaker of the device
///
/// Supplied by the environment. Calls may block, brightness is therefore applied from a
/// [BrightnessWorker].
pub trait Hardware: Send + Sync {
    fn set_display_power(&self, on: bool);

    /// Backlight in percent
    fn set_brightness(&self, percent: i32);

    /// Speaker volume in 0..=1
    fn set_volume(&self, volume: f32);

    /// Running on a development machine instead of the device
    fn is_pc(&self) -> bool;
}

/// Discrete first order low-pass filter
#[derive(Debug, Clone, Copy)]
pub struct FirstOrderFilter {
    x: f32,
    k: f32,
}

impl FirstOrderFilter {
    /// Filter starting at `x0` with time constant `ts` sampled every `dt` seconds
    pub fn new(x0: f32, ts: f32, dt: f32) -> Self {
        let ratio = dt / ts;
        Self {
            x: x0,
            k: ratio / (1.0 + ratio),
        }
    }

    pub fn update(&mut self, x: f32) -> f32 {
        self.x = (1.0 - self.k) * self.x + self.k * x;
        self.x
    }

    pub fn x(&self) -> f32 {
        self.x
    }
}

/// Onroad brightness in percent for an ambient light level in 0..=100
///
/// The light level is taken as CIE 1931 lightness and converted to luminance.
pub fn brightness_target(light_sensor: f32) -> f32 {
    let luminance = if light_sensor <= 8.0 {
        light_sensor / 903.3
    } else {
        ((light_sensor + 16.0) / 116.0).powi(3)
    };
    (luminance * 100.0).clamp(10.0, 100.0)
}

/// Notifications of [Device::update]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    DisplayPowerChanged(bool),
    /// The screen was left untouched for the interactive timeout
    InteractiveTimeout,
}

/// Brightness and wakefulness of the display
pub struct Device {
    hardware: Arc<dyn Hardware>,
    worker: BrightnessWorker,
    awake: bool,
    /// Remaining ticks until the display may turn off
    interactive_timeout: i32,
    ignition_on: bool,
    offroad_brightness: i32,
    brightness_filter: FirstOrderFilter,
    /// Last computed output brightness
    brightness: i32,
    /// Last brightness handed to the worker
    last_brightness: i32,
    /// Ticks until the screen dims, -1 while not counting
    sleep_time: i32,
    events: Vec<DeviceEvent>,
}

impl Device {
    /// Create the device and turn the display on
    pub fn new(hardware: Arc<dyn Hardware>) -> Result<Self, Error> {
        let worker = BrightnessWorker::new(hardware.clone())?;
        let mut device = Self {
            hardware,
            worker,
            awake: false,
            interactive_timeout: 0,
            ignition_on: false,
            offroad_brightness: OFFROAD_BRIGHTNESS_DEFAULT,
            brightness_filter: FirstOrderFilter::new(
                OFFROAD_BRIGHTNESS_DEFAULT as f32,
                BACKLIGHT_TS,
                BACKLIGHT_DT,
            ),
            brightness: 0,
            last_brightness: 0,
            sleep_time: -1,
            events: Vec::new(),
        };
        device.set_awake(true);
        device.reset_interactive_timeout(None);
        Ok(device)
    }

    /// Advance brightness and wakefulness by one tick
    pub fn update(&mut self, scene: &Scene) {
        self.update_brightness(scene);
        self.update_wakefulness(scene);
    }

    pub fn is_awake(&self) -> bool {
        self.awake
    }

    pub fn brightness(&self) -> i32 {
        self.brightness
    }

    pub fn sleep_time(&self) -> i32 {
        self.sleep_time
    }

    pub fn interactive_timeout(&self) -> i32 {
        self.interactive_timeout
    }

    pub fn offroad_brightness(&self) -> i32 {
        self.offroad_brightness
    }

    /// Brightness used while not started, clamped to 0..=100
    pub fn set_offroad_brightness(&mut self, brightness: i32) {
        self.offroad_brightness = brightness.clamp(0, 100);
    }

    /// Restart the interactive timeout
    ///
    /// `None` picks 10 s with ignition and 30 s without.
    pub fn reset_interactive_timeout(&mut self, seconds: Option<i32>) {
        let seconds = seconds.unwrap_or(if self.ignition_on { 10 } else { 30 });
        self.interactive_timeout = seconds.saturating_mul(UI_FREQ as i32);
    }

    pub fn set_awake(&mut self, on: bool) {
        if on != self.awake {
            self.awake = on;
            debug!("Setting display power {}", if on { "on" } else { "off" });
            self.hardware.set_display_power(on);
            self.events.push(DeviceEvent::DisplayPowerChanged(on));
        }
    }

    /// Events since the last call
    pub fn take_events(&mut self) -> Vec<DeviceEvent> {
        std::mem::take(&mut self.events)
    }

    fn update_sleep_time(&mut self, scene: &Scene) {
        let config = &scene.config;
        let screen_off = config.auto_screen_off != SCREEN_OFF_NEVER;
        if config.do_not_disturb() {
            if scene.touched {
                self.sleep_time = DND_SLEEP_TICKS;
            } else if self.sleep_time > 0 {
                self.sleep_time -= 1;
            } else if scene.started && self.sleep_time == -1 {
                self.sleep_time = DND_SLEEP_TICKS;
            }
        } else if screen_off && scene.touched {
            self.sleep_time = scene.n_time;
        } else if screen_off && scene.controls_state.alert_size != AlertSize::None {
            self.sleep_time = scene.n_time;
        } else if screen_off && self.sleep_time > 0 {
            self.sleep_time -= 1;
        } else if screen_off && scene.started && self.sleep_time == -1 {
            self.sleep_time = scene.n_time;
        }
    }

    fn update_brightness(&mut self, scene: &Scene) {
        let clipped = if scene.started {
            brightness_target(scene.light_sensor)
        } else {
            self.offroad_brightness as f32
        };
        let filtered = self.brightness_filter.update(clipped) as i32;

        self.update_sleep_time(scene);

        let config = &scene.config;
        let asleep = scene.started && self.sleep_time == 0;
        let brightness = if !self.awake {
            0
        } else if scene.enabled && config.do_not_disturb() && asleep {
            0
        } else if asleep && config.auto_screen_off != SCREEN_OFF_NEVER {
            match config.brightness_off {
                off if off < 4 => 0,
                off if off < 9 => 1,
                off => (off as f32 * 0.01 * filtered as f32) as i32,
            }
        } else if config.brightness != 0 {
            config.brightness
        } else {
            filtered
        };
        self.brightness = brightness;

        if brightness != self.last_brightness
            && !self.worker.is_busy()
            && self.worker.submit(brightness)
        {
            self.last_brightness = brightness;
        }
    }

    fn update_wakefulness(&mut self, scene: &Scene) {
        let ignition_just_turned_off = !scene.ignition && self.ignition_on;
        self.ignition_on = scene.ignition;

        if ignition_just_turned_off {
            self.reset_interactive_timeout(None);
        } else if self.interactive_timeout > 0 {
            self.interactive_timeout -= 1;
            if self.interactive_timeout == 0 {
                debug!("Interactive timeout");
                self.events.push(DeviceEvent::InteractiveTimeout);
            }
        }

        self.set_awake(scene.ignition || self.interactive_timeout > 0);
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::{brightness_target, Device, DeviceEvent, FirstOrderFilter, Hardware};
    use crate::scene::Scene;
    use crate::worker::test::wait_idle;
    use std::sync::{Arc, Condvar, Mutex};

    /// Hardware recording every call
    #[derive(Default)]
    pub(crate) struct MockHardware {
        brightness: Mutex<Vec<i32>>,
        hold: Mutex<bool>,
        released: Condvar,
        volume: Mutex<Option<f32>>,
        display_power: Mutex<Vec<bool>>,
        pub(crate) pc: bool,
    }

    impl MockHardware {
        /// Block brightness calls until released
        pub(crate) fn hold_brightness(&self, hold: bool) {
            *self.hold.lock().unwrap() = hold;
            self.released.notify_all();
        }

        pub(crate) fn brightness_calls(&self) -> Vec<i32> {
            self.brightness.lock().unwrap().clone()
        }

        pub(crate) fn volume(&self) -> Option<f32> {
            *self.volume.lock().unwrap()
        }

        pub(crate) fn display_power_calls(&self) -> Vec<bool> {
            self.display_power.lock().unwrap().clone()
        }
    }

    impl Hardware for MockHardware {
        fn set_display_power(&self, on: bool) {
            self.display_power.lock().unwrap().push(on);
        }

        fn set_brightness(&self, percent: i32) {
            let mut hold = self.hold.lock().unwrap();
            while *hold {
                hold = self.released.wait(hold).unwrap();
            }
            self.brightness.lock().unwrap().push(percent);
        }

        fn set_volume(&self, volume: f32) {
            *self.volume.lock().unwrap() = Some(volume);
        }

        fn is_pc(&self) -> bool {
            self.pc
        }
    }

    fn device() -> (Device, Arc<MockHardware>) {
        let hardware = Arc::new(MockHardware::default());
        let device = Device::new(hardware.clone()).unwrap();
        (device, hardware)
    }

    #[test]
    fn brightness_curve() {
        assert_eq!(brightness_target(0.0), 10.0);
        assert_eq!(brightness_target(100.0), 100.0);
        let mid = brightness_target(50.0);
        assert!((mid - (66f32 / 116.0).powi(3) * 100.0).abs() < 1e-3);
        assert!(brightness_target(30.0) < mid && mid < brightness_target(70.0));
    }

    #[test]
    fn filter_moves_slowly() {
        let mut filter = FirstOrderFilter::new(50.0, 10.0, 0.05);
        let x = filter.update(100.0);
        assert!(x > 50.0 && x < 50.5);
        for _ in 0..10_000 {
            filter.update(100.0);
        }
        assert!((filter.x() - 100.0).abs() < 1e-2);
    }

    #[test]
    fn starts_awake() {
        let (mut device, hardware) = device();
        assert!(device.is_awake());
        assert_eq!(device.interactive_timeout(), 30 * 20);
        assert_eq!(hardware.display_power_calls(), [true]);
        assert_eq!(device.take_events(), [DeviceEvent::DisplayPowerChanged(true)]);
    }

    #[test]
    fn offroad_brightness_is_applied_once() {
        let (mut device, hardware) = device();
        let scene = Scene::default();
        device.update(&scene);
        wait_idle(&device.worker);
        device.update(&scene);
        wait_idle(&device.worker);
        assert_eq!(device.brightness(), 50);
        assert_eq!(hardware.brightness_calls(), [50]);

        device.set_offroad_brightness(150);
        assert_eq!(device.offroad_brightness(), 100);
    }

    #[test]
    fn values_are_dropped_while_in_flight() {
        let (mut device, hardware) = device();
        hardware.hold_brightness(true);
        let mut scene = Scene::default();

        scene.config.brightness = 70;
        device.update(&scene);
        scene.config.brightness = 80;
        device.update(&scene);
        assert_eq!(device.brightness(), 80);

        hardware.hold_brightness(false);
        wait_idle(&device.worker);
        device.update(&scene);
        wait_idle(&device.worker);
        assert_eq!(hardware.brightness_calls(), [70, 80]);
    }

    #[test]
    fn screen_dims_after_sleep_time() {
        let (mut device, _hardware) = device();
        let mut scene = Scene {
            started: true,
            n_time: 3,
            ..Default::default()
        };
        scene.config.brightness_off = 2;

        device.update(&scene);
        assert_eq!(device.sleep_time(), 3);
        for _ in 0..3 {
            device.update(&scene);
        }
        assert_eq!(device.sleep_time(), 0);
        assert_eq!(device.brightness(), 0);

        scene.touched = true;
        device.update(&scene);
        assert_eq!(device.sleep_time(), 3);
        assert!(device.brightness() > 0);
    }

    #[test]
    fn screen_never_dims_when_disabled() {
        let (mut device, _hardware) = device();
        let mut scene = Scene {
            started: true,
            n_time: 3,
            ..Default::default()
        };
        scene.config.auto_screen_off = -3;
        for _ in 0..10 {
            device.update(&scene);
        }
        assert_eq!(device.sleep_time(), -1);
        assert!(device.brightness() > 0);
    }

    #[test]
    fn display_turns_off_after_ignition_off() {
        let (mut device, hardware) = device();
        let mut scene = Scene {
            ignition: true,
            ..Default::default()
        };
        device.update(&scene);
        device.take_events();

        scene.ignition = false;
        device.update(&scene);
        assert_eq!(device.interactive_timeout(), 30 * 20);

        let mut ticks = 0;
        while device.is_awake() && ticks < 10_000 {
            device.update(&scene);
            ticks += 1;
        }
        assert_eq!(ticks, 30 * 20);
        assert_eq!(
            device.take_events(),
            [
                DeviceEvent::InteractiveTimeout,
                DeviceEvent::DisplayPowerChanged(false)
            ]
        );
        assert_eq!(hardware.display_power_calls(), [true, false]);

        device.reset_interactive_timeout(Some(1));
        device.update(&scene);
        assert!(device.is_awake());
        assert_eq!(device.interactive_timeout(), 20 - 1);
    }
}
