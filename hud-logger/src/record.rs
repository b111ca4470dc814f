// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use log::Level;
use std::io::{self, Write};
use std::time::SystemTime;

/// Maximum size of a formatted message in bytes. Longer messages are truncated.
pub const MAX_ARGS_SIZE: usize = 8 * 1024;

/// A log record with its message already formatted
#[derive(Debug)]
pub struct Record<'a> {
    pub timestamp: SystemTime,
    pub level: Level,
    pub target: &'a str,
    pub file: Option<&'a str>,
    pub line: Option<u32>,
    pub tgid: u32,
    pub tid: u32,
    pub args: &'a str,
}

/// Kernel id of the calling thread
pub fn current_tid() -> u32 {
    // Safety: gettid(2) cannot fail
    unsafe { libc::gettid() as u32 }
}

/// Format `args` into `buffer` without allocating
///
/// A message that does not fit is cut at the last complete character.
pub fn write_args<'b>(args: &std::fmt::Arguments, buffer: &'b mut [u8]) -> &'b str {
    let len = {
        let mut writer = io::Cursor::new(&mut buffer[..]);
        // A full buffer ends the write with an error, everything up to it is kept
        let _ = write!(&mut writer, "{args}");
        writer.position() as usize
    };
    let buffer: &'b [u8] = buffer;
    let written = &buffer[..len];
    match std::str::from_utf8(written) {
        Ok(s) => s,
        Err(e) => std::str::from_utf8(&written[..e.valid_up_to()]).unwrap_or_default(),
    }
}
