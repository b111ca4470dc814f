// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! HUD is the on-screen state layer of a driver-assistance display.
//!
//! # Ticks
//!
//! Everything happens inside a fixed-rate tick ([UI_FREQ] Hz) on one thread.
//! Each tick polls the bus ([com::SubMaster]), copies the latest records into the
//! [scene::Scene], derives renderable geometry ([geometry], [dmonitoring]) and
//! finally lets the consumers act on it: [sound] plays alert sounds and [device]
//! manages display brightness and wakefulness.
//!
//! # Activities
//!
//! The consumers are [Activities](crate::activity::Activity) stepped in a fixed order by
//! the [agent::TickLoop]. The only work leaving the tick thread is brightness application,
//! which runs on a [worker::BrightnessWorker].

pub mod activity;
pub mod agent;
pub mod alert;
pub mod clock;
pub mod com;
pub mod config;
pub mod device;
pub mod dmonitoring;
pub mod error;
pub mod geometry;
pub mod messages;
pub mod params;
pub mod scene;
pub mod sound;
pub mod state;
pub mod worker;

/// Tick rate of the UI state and sound loops in Hz
pub const UI_FREQ: u64 = 20;

/// Re-export the public API
pub mod prelude {
    pub use crate::activity::{Activity, ActivityId};
    pub use crate::agent::TickLoop;
    pub use crate::alert::{Alert, AlertSize, AlertState, AlertStatus, AudibleAlert};
    pub use crate::clock::{Clock, ManualClock, MonotonicClock};
    pub use crate::com::{channel, Event, Publisher, SubMaster, Subscription, Topic};
    pub use crate::device::{Device, DeviceEvent, Hardware};
    pub use crate::params::{FileParams, MemoryParams, Params};
    pub use crate::sound::{Loops, Sound, SoundEffect};
    pub use crate::state::{UiEvent, UiState, UiStatus};
    pub use crate::UI_FREQ;
}
