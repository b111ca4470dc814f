// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Line format shared by all sinks

use crate::record::Record;
use console::{style, Color, StyledObject};
use log::Level;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::SystemTime;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour]:[minute]:[second].[subsecond digits:3]");

static TARGET_SIZE: AtomicUsize = AtomicUsize::new(16);
static TGID_SIZE: AtomicUsize = AtomicUsize::new(4);
static TID_SIZE: AtomicUsize = AtomicUsize::new(4);

/// Write `record` as one line to `writer`
///
/// Colours are left out if `color` is false.
pub fn format<W: std::io::Write>(
    record: &Record,
    color: bool,
    mut writer: W,
) -> Result<(), std::io::Error> {
    let timestamp = format_timestamp(record.timestamp);

    let level = {
        let level_color = match record.level {
            Level::Error => Color::Red,
            Level::Warn => Color::Yellow,
            Level::Info => Color::Green,
            Level::Debug => Color::Color256(243),
            Level::Trace => Color::White,
        };
        paint(style(record.level).bold().fg(level_color), color)
    };

    let tgid = paint(format_id(record.tgid, &TGID_SIZE, true), color);
    let tid = paint(format_id(record.tid, &TID_SIZE, false), color);
    let message = record.args;

    let target = {
        let target = record.target;
        TARGET_SIZE.fetch_max(target.len(), Ordering::Relaxed);
        let target_size = TARGET_SIZE.load(Ordering::Relaxed);
        let target_color = target.color();
        paint(
            style(format!("{target:<s$}", s = target_size)).fg(target_color),
            color,
        )
    };

    // Log location on trace level - otherwise just the message.
    if record.level == Level::Trace {
        let file = record.file.unwrap_or("file unknown");
        let file = paint(style(file).fg(file.color()), color);
        let line = record.line.unwrap_or(0);
        writeln!(
            writer,
            "{timestamp} {target} ({tgid} {tid}): {level:<5}: {file}:{line}: {message}",
        )
    } else {
        writeln!(
            writer,
            "{timestamp} {target} ({tgid} {tid}): {level:<5}: {message}"
        )
    }
}

/// Wall clock time of day in UTC with millisecond resolution
fn format_timestamp(timestamp: SystemTime) -> String {
    OffsetDateTime::from(timestamp)
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| "??:??:??.???".to_owned())
}

fn paint<D>(object: StyledObject<D>, color: bool) -> StyledObject<D> {
    if color {
        object
    } else {
        object.force_styling(false)
    }
}

/// Generate a color of `self`.
trait HashColor {
    fn color(&self) -> Color;
}

impl HashColor for &str {
    fn color(&self) -> Color {
        let hash = self.bytes().fold(42u8, |c, x| c ^ x);
        Color::Color256(hash)
    }
}

impl HashColor for u32 {
    fn color(&self) -> Color {
        // Some colors are hard to read on dark terminals
        let color = match *self as u8 {
            c @ 0..=1 => c + 2,
            c @ 16..=21 => c + 6,
            c @ 52..=55 | c @ 126..=129 => c + 4,
            c @ 163..=165 | c @ 200..=201 => c + 3,
            c @ 207 => c + 1,
            c @ 232..=240 => c + 9,
            c => c,
        };
        Color::Color256(color)
    }
}

/// Format `id` in hex with a color based on its hash. Update `width` with the
/// maximum length of the formatted ids.
fn format_id(id: u32, width: &AtomicUsize, align_left: bool) -> StyledObject<String> {
    width.fetch_max(num_hex_digits(id), Ordering::Relaxed);
    let len = width.load(Ordering::Relaxed);
    let text = if align_left {
        format!("{id:<len$x}")
    } else {
        format!("{id:>len$x}")
    };
    style(text).fg(id.color())
}

// Calculate the number of hex digits needed to represent `n`.
fn num_hex_digits(n: u32) -> usize {
    (1 + n.checked_ilog2().unwrap_or_default() / 4) as usize
}
