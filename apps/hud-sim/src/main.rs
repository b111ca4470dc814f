// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Runs the HUD state layer against a synthetic drive

mod dashboard;
mod env;
mod feeds;
mod scenario;

use crate::dashboard::Dashboard;
use crate::env::{LogEffect, LogHardware};
use crate::feeds::Feed;
use crate::scenario::Scenario;
use anyhow::{anyhow, Error};
use argh::FromArgs;
use hud::clock::SharedClock;
use hud::com::Bus;
use hud::prelude::*;
use hud::sound::load_effects;
use log::{error, info, LevelFilter};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::{runtime, signal};

const CYCLE_TIME: Duration = Duration::from_millis(1000 / UI_FREQ);

#[derive(FromArgs, Debug)]
/// Drive the HUD state with synthetic sensor data
struct Args {
    /// directory of persisted params, in memory if omitted
    #[argh(option, short = 'p')]
    params: Option<PathBuf>,

    /// drive scenario as JSON
    #[argh(option, short = 's')]
    scenario: Option<PathBuf>,

    /// number of ticks to run, forever if omitted
    #[argh(option, short = 'n')]
    ticks: Option<u64>,

    /// log level
    #[argh(option, short = 'l', default = "LevelFilter::Info")]
    log_level: LevelFilter,

    /// append log lines to this file
    #[argh(option)]
    log_file: Option<PathBuf>,

    /// directory the sound files are loaded from
    #[argh(option, default = "PathBuf::from(\"sounds\")")]
    sounds: PathBuf,

    /// print tracing spans of every step
    #[argh(switch)]
    trace: bool,
}

fn main() -> Result<(), Error> {
    let args: Args = argh::from_env();

    hud_logger::init(args.log_level, true, args.log_file.as_deref())?;
    if args.trace {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;
    }

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    let params: Arc<dyn Params> = match &args.params {
        Some(dir) => Arc::new(FileParams::new(dir)?),
        None => Arc::new(MemoryParams::new()),
    };
    let clock: SharedClock = Arc::new(MonotonicClock::new());
    let hardware: Arc<dyn Hardware> = Arc::new(LogHardware);

    let bus = Bus::new();
    let ui_state = UiState::new(
        1.into(),
        bus.subscribe(),
        clock.clone(),
        params.clone(),
        hardware.clone(),
    )?;
    let effects = load_effects(|file| LogEffect::load(&args.sounds, file));
    let sound = Sound::new(2.into(), bus.subscribe(), clock, hardware, params, effects);

    let mut tick_loop = TickLoop::new(CYCLE_TIME);
    tick_loop.add(Box::new(Feed::new(0.into(), bus.publisher(), scenario)));
    tick_loop.add(Box::new(Dashboard::new(ui_state)));
    tick_loop.add(Box::new(sound));

    let running = Arc::new(AtomicBool::new(true));
    stop_on_ctrl_c(running.clone())?;
    tick_loop.run(args.ticks, &running);
    info!("Simulation finished after {} ticks", tick_loop.ticks());

    Ok(())
}

/// Clear `running` on Ctrl-C so the tick loop shuts the activities down
fn stop_on_ctrl_c(running: Arc<AtomicBool>) -> Result<(), Error> {
    let runtime = runtime::Builder::new_current_thread().enable_all().build()?;
    thread::Builder::new()
        .name("hud-sim-signal".to_owned())
        .spawn(move || {
            runtime.block_on(async {
                match signal::ctrl_c().await {
                    Ok(()) => {
                        info!("Interrupted. Shutting down...");
                        running.store(false, Ordering::Relaxed);
                    }
                    Err(e) => error!("Failed to listen for Ctrl-C: {e}"),
                }
            })
        })?;
    Ok(())
}
