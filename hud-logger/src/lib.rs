// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! The HUD logger
//!
//! Console and file logger behind the `log` facade.

use log::{LevelFilter, Log, Metadata, Record};
use std::path::Path;
use std::str::FromStr;
use std::time::SystemTime;
use std::{io, process};

pub mod fmt;
pub mod record;
mod sink;

const ENV_RUST_LOG: &str = "RUST_LOG";

/// Initialize the logger.
///
/// A valid level passed as `RUST_LOG` environment variable overrides `level`.
/// Enable output to `stdout` via `console`. Lines are additionally appended to `file`
/// if given.
pub fn init(level: LevelFilter, console: bool, file: Option<&Path>) -> io::Result<()> {
    let logger = Logger::new(console, file)?;

    // Set the maximum log level the log subsystem will forward to this logger impl.
    log::set_max_level(level_from_env().unwrap_or(level));
    // Set the logger in the global subsystem.
    log::set_boxed_logger(Box::new(logger)).map_err(io::Error::other)
}

/// The HUD logger.
#[derive(Debug)]
pub struct Logger {
    console: Option<sink::Console>,
    file: Option<sink::FileSink>,
}

impl Logger {
    /// Create a new logger.
    pub fn new(console: bool, file: Option<&Path>) -> io::Result<Self> {
        let console = console.then(sink::Console::default);
        let file = file.map(sink::FileSink::open).transpose()?;
        Ok(Self { console, file })
    }
}

impl Log for Logger {
    /// Check if a log message with the specified metadata would be logged.
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let args_buffer = &mut [0u8; record::MAX_ARGS_SIZE];
        let record = record::Record {
            timestamp: SystemTime::now(),
            level: record.level(),
            target: record.target(),
            file: record.file(),
            line: record.line(),
            tgid: process::id(),
            tid: record::current_tid(),
            args: record::write_args(record.args(), args_buffer),
        };

        if let Some(console) = &self.console {
            // Nothing sensible left to do if stdout is gone
            let _ = console.write(&record);
        }

        if let Some(file) = &self.file {
            file.write(&record);
        }
    }

    fn flush(&self) {}
}

/// Try to parse the log level from the environment variable `RUST_LOG`.
fn level_from_env() -> Option<LevelFilter> {
    std::env::var(ENV_RUST_LOG).ok().and_then(|s| {
        LevelFilter::from_str(&s)
            .inspect_err(|_| eprintln!("Failed to parse log level from `RUST_LOG={s}`"))
            .ok()
    })
}
