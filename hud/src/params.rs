// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Persisted key-value parameters
//!
//! Values are plain strings. Numbers are stored in decimal notation and booleans as
//! `"1"` (true) or anything else (false).

use crate::error::Error;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use std::{fs, io};

/// A string-keyed parameter store
pub trait Params: Send + Sync {
    /// Value of `key`, `None` if not set
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`
    fn put(&self, key: &str, value: &str) -> Result<(), Error>;

    fn get_bool(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| v == "1")
    }

    fn put_bool(&self, key: &str, value: bool) -> Result<(), Error> {
        self.put(key, if value { "1" } else { "0" })
    }
}

fn parse<T: FromStr>(
    params: &dyn Params,
    key: &str,
    reason: &'static str,
) -> Result<Option<T>, Error> {
    let Some(value) = params.get(key) else {
        return Ok(None);
    };
    value.trim().parse().map(Some).map_err(|_| Error::Param {
        key: key.to_owned(),
        value,
        reason,
    })
}

/// Integer value of `key`, `None` if not set
pub fn get_int(params: &dyn Params, key: &str) -> Result<Option<i32>, Error> {
    parse(params, key, "not an integer")
}

/// Float value of `key`, `None` if not set
pub fn get_float(params: &dyn Params, key: &str) -> Result<Option<f32>, Error> {
    parse(params, key, "not a number")
}

/// Parameters stored one file per key in a directory
#[derive(Debug)]
pub struct FileParams {
    dir: PathBuf,
}

impl FileParams {
    /// Open the store at `dir`, creating the directory if needed
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let dir = dir.as_ref().to_owned();
        fs::create_dir_all(&dir)
            .map_err(|e| Error::Io((e, "failed to create params directory")))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Params for FileParams {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.dir.join(key)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Failed to read param {key}: {e}");
                None
            }
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), Error> {
        // Write to a temporary file first so readers never see a partial value
        let tmp = self.dir.join(format!(".tmp_{key}"));
        fs::write(&tmp, value).map_err(|e| Error::Io((e, "failed to write param")))?;
        fs::rename(&tmp, self.dir.join(key))
            .map_err(|e| Error::Io((e, "failed to commit param")))
    }
}

/// Parameters kept in memory
#[derive(Debug, Default)]
pub struct MemoryParams {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from key-value pairs
    pub fn with<'a>(values: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let values = values
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }
}

impl Params for MemoryParams {
    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{get_float, get_int, FileParams, MemoryParams, Params};
    use crate::error::Error;

    #[test]
    fn typed_access() {
        let params = MemoryParams::with([("Int", "-2"), ("Float", "0.35"), ("Bool", "1")]);
        assert_eq!(get_int(&params, "Int").unwrap(), Some(-2));
        assert_eq!(get_float(&params, "Float").unwrap(), Some(0.35));
        assert!(params.get_bool("Bool"));
        assert!(!params.get_bool("Missing"));
        assert_eq!(get_int(&params, "Missing").unwrap(), None);
    }

    #[test]
    fn malformed_number_is_an_error() {
        let params = MemoryParams::with([("Int", "abc")]);
        match get_int(&params, "Int") {
            Err(Error::Param { key, value, .. }) => {
                assert_eq!(key, "Int");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("hud-params-{}", std::process::id()));
        let params = FileParams::new(&dir).unwrap();
        assert_eq!(params.get("RunCustomCommand"), None);

        params.put("RunCustomCommand", "2").unwrap();
        assert_eq!(params.get("RunCustomCommand").as_deref(), Some("2"));
        params.put_bool("IsMetric", true).unwrap();
        assert!(params.get_bool("IsMetric"));
        // Trailing newlines from hand-edited files are tolerated by the typed getters
        std::fs::write(dir.join("OpkrUIBrightness"), "35\n").unwrap();
        assert_eq!(get_int(&params, "OpkrUIBrightness").unwrap(), Some(35));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
