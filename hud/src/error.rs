// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! HUD Error implementation

use crate::alert::AudibleAlert;

/// HUD Error type
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    Channel(&'static str),
    Io((std::io::Error, &'static str)),
    Param {
        key: String,
        value: String,
        reason: &'static str,
    },
    UnknownSound(AudibleAlert),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Channel(description) => write!(f, "Channel error, {}", description),
            Error::Io((e, description)) => write!(f, "Io error: {}, {}", description, e),
            Error::Param { key, value, reason } => {
                write!(f, "Param error: {key}={value:?}, {reason}")
            }
            Error::UnknownSound(sound) => write!(f, "No sound effect loaded for {sound:?}"),
        }
    }
}
