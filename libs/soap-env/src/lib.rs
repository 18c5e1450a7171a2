// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Host configuration access.
//!
//! Every configurable aspect of metadata generation (feature gates, route paths, the externally
//! visible host URL, ...) is read through the [`Environment`] trait, so that the process
//! environment can be swapped for an in-memory map in tests.

mod map;

pub use map::MapEnvironment;

pub trait Environment: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Interpret the value of `key` as a boolean, falling back to `default_value` when unset.
    fn enabled(&self, key: &str, default_value: bool) -> Result<bool, EnvError> {
        match self.get(key) {
            Some(value) => parse_bool(key, value),
            None => Ok(default_value),
        }
    }

    /// Like [`Environment::get`], but treats blank values as unset.
    fn get_non_empty(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

fn parse_bool(key: &str, value: String) -> Result<bool, EnvError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "enabled" | "enable" => Ok(true),
        "false" | "0" | "no" | "off" | "disabled" | "disable" => Ok(false),
        _ => Err(EnvError::InvalidBoolean {
            key: key.to_string(),
            value,
        }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error(
        "Invalid value for {key}: {value}. Expected true, 1, yes, on, enabled, enable OR false, 0, no, off, disabled, disable"
    )]
    InvalidBoolean { key: String, value: String },

    #[error("Invalid env value {env_value} for {env_key}: {message}")]
    InvalidValue {
        env_key: &'static str,
        env_value: String,
        message: String,
    },
}

/// Reads configuration from the process environment.
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}
