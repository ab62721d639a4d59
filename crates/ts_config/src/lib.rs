//! Layered configuration.
//!
//! A [`Config`] is built from, in order of increasing precedence:
//!
//! 1. built-in defaults,
//! 2. a configuration file (see [`find_config_file`]),
//! 3. `THINKSPLIT_*` environment variables,
//! 4. `KEY=VALUE` assignments, usually from the command line.

pub mod assignment;
pub mod error;
pub mod fs;
pub mod stream;
pub mod style;
pub mod transport;

use std::env;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub use crate::{
    assignment::{AssignKeyValue, KvAssignment},
    error::Error,
    stream::StreamConfig,
    style::StyleConfig,
    transport::TransportConfig,
};
use crate::{
    assignment::missing_key,
    error::Result,
    fs::{ConfigFile, user_config_dir},
};

/// Environment variable pointing to a specific configuration file.
pub const CONFIG_FILE_ENV_VAR: &str = "THINKSPLIT_CONFIG_FILE";

/// The file stem searched for from the working directory upwards.
const LOCAL_FILE_STEM: &str = "thinksplit";

/// Environment variables and the key each of them assigns.
const ENV_ASSIGNMENTS: &[(&str, &str)] = &[
    ("THINKSPLIT_ENDPOINT", "transport.endpoint"),
    ("THINKSPLIT_CONVERSATION_ID", "transport.conversation_id"),
];

/// The full configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub stream: StreamConfig,
    pub transport: TransportConfig,
    pub style: StyleConfig,
}

impl Config {
    /// Load the configuration from all layers, and validate it.
    pub fn load(cwd: &Utf8Path, overrides: impl IntoIterator<Item = KvAssignment>) -> Result<Self> {
        let mut config = match find_config_file(cwd)? {
            Some(file) => file.deserialize()?,
            None => Self::default(),
        };

        config.load_envs()?;
        for kv in overrides {
            trace!(key = kv.key(), value = kv.value(), "Applying configuration override.");
            config.assign(kv)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply the `THINKSPLIT_*` environment variables.
    pub fn load_envs(&mut self) -> Result<()> {
        for (var, key) in ENV_ASSIGNMENTS {
            if let Ok(value) = env::var(var) {
                debug!(var, key, "Applying environment variable.");
                self.assign(KvAssignment::new(*key, value))?;
            }
        }

        Ok(())
    }

    /// Reject configurations that cannot work.
    pub fn validate(&self) -> Result<()> {
        let invalid = |key: &str, value: &str, reason: &str| Error::InvalidConfigValue {
            key: key.to_owned(),
            value: value.to_owned(),
            reason: reason.to_owned(),
        };

        let StreamConfig {
            open_marker,
            close_marker,
            max_decode_passes,
            ..
        } = &self.stream;

        if open_marker.is_empty() {
            return Err(invalid("stream.open_marker", open_marker, "must not be empty"));
        }

        if close_marker.is_empty() {
            return Err(invalid("stream.close_marker", close_marker, "must not be empty"));
        }

        if open_marker == close_marker {
            return Err(invalid(
                "stream.close_marker",
                close_marker,
                "must differ from stream.open_marker",
            ));
        }

        if *max_decode_passes == 0 {
            return Err(invalid("stream.max_decode_passes", "0", "must be at least 1"));
        }

        self.transport.endpoint_url()?;

        Ok(())
    }
}

impl AssignKeyValue for Config {
    fn assign(&mut self, mut kv: KvAssignment) -> Result<()> {
        if kv.p("stream") {
            self.stream.assign(kv)
        } else if kv.p("transport") {
            self.transport.assign(kv)
        } else if kv.p("style") {
            self.style.assign(kv)
        } else {
            missing_key(&kv, &["stream", "transport", "style"])
        }
    }
}

/// Find the configuration file to load, if any.
///
/// The first of these wins:
///
/// 1. the file named by [`CONFIG_FILE_ENV_VAR`],
/// 2. `thinksplit.{toml,json}` in `cwd` or any of its parents,
/// 3. `config.{toml,json}` in the user's configuration directory.
pub fn find_config_file(cwd: &Utf8Path) -> Result<Option<ConfigFile>> {
    if let Ok(path) = env::var(CONFIG_FILE_ENV_VAR) {
        debug!(path = %path, "Custom configuration file path configured.");
        return ConfigFile::read(path).map(Some);
    }

    if let Some(file) = fs::find_upwards(cwd, LOCAL_FILE_STEM)? {
        return Ok(Some(file));
    }

    match user_config_dir() {
        Some(dir) => fs::find_in(&dir, "config"),
        None => Ok(None),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
