// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use crate::fmt;
use crate::record::Record;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct Console;

impl Console {
    pub fn write(&self, record: &Record) -> io::Result<()> {
        fmt::format(record, true, io::stdout().lock())
    }
}

/// Appends uncoloured lines to a file
#[derive(Debug)]
pub struct FileSink {
    file: Mutex<File>,
    failed: AtomicBool,
}

impl FileSink {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
            failed: AtomicBool::new(false),
        })
    }

    /// Write `record`. The first failure is reported on stderr, later ones are silent.
    pub fn write(&self, record: &Record) {
        let result = match self.file.lock() {
            Ok(mut file) => {
                let mut line = Vec::with_capacity(256);
                fmt::format(record, false, &mut line).and_then(|_| file.write_all(&line))
            }
            Err(_) => Err(io::Error::other("log file lock poisoned")),
        };
        if let Err(e) = result {
            if !self.failed.swap(true, Ordering::Relaxed) {
                eprintln!("Failed to write log file: {e}");
            }
        }
    }
}
