/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::path::Path;

use anyhow::Context;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::common::Timeout;

/// Configuration for `courier`
///
/// This struct contains the process-wide defaults used by channels, dispatchers and
/// endpoints when they are constructed without explicit settings. It is loaded from
/// TOML files in XDG-compliant directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourierConfig {
    /// Channel buffer configuration
    pub channels: ChannelsConfig,
    /// Send and receive timeout configuration
    pub timeouts: TimeoutConfig,
    /// Dispatch behavior configuration
    pub dispatch: DispatchConfig,
}

/// Channel buffer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelsConfig {
    /// Default capacity for queue and priority channels; `0` means unbounded
    pub queue_capacity: usize,
}

/// Timeout-related configuration values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Default send timeout in milliseconds; negative waits forever, zero does not wait
    pub send_timeout_ms: i64,
    /// Default receive timeout in milliseconds; negative waits forever, zero does not wait
    pub receive_timeout_ms: i64,
}

/// Dispatch behavior configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Whether broadcasting dispatchers stamp sequence headers on each copy
    pub apply_sequence: bool,
    /// Maximum number of tasks a shared executor runs at once; `0` means unlimited
    pub max_concurrent_tasks: usize,
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        Self { queue_capacity: 0 }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            send_timeout_ms: -1,
            receive_timeout_ms: -1,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            apply_sequence: false,
            max_concurrent_tasks: 0,
        }
    }
}

impl CourierConfig {
    /// Default queue capacity, `None` when unbounded.
    #[must_use]
    pub const fn queue_capacity(&self) -> Option<usize> {
        match self.channels.queue_capacity {
            0 => None,
            capacity => Some(capacity),
        }
    }

    /// Default send timeout.
    #[must_use]
    pub fn send_timeout(&self) -> Timeout {
        Timeout::from_millis(self.timeouts.send_timeout_ms)
    }

    /// Default receive timeout.
    #[must_use]
    pub fn receive_timeout(&self) -> Timeout {
        Timeout::from_millis(self.timeouts.receive_timeout_ms)
    }

    /// Default executor concurrency limit, `None` when unlimited.
    #[must_use]
    pub const fn max_concurrent_tasks(&self) -> Option<usize> {
        match self.dispatch.max_concurrent_tasks {
            0 => None,
            limit => Some(limit),
        }
    }

    /// Parses a configuration from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not valid TOML for this structure.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid courier configuration")
    }

    /// Reads and parses the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Load configuration from XDG-compliant locations
    ///
    /// Looks for `courier/config.toml` under the XDG configuration directories
    /// (`$XDG_CONFIG_HOME`, then `$XDG_CONFIG_DIRS`).
    ///
    /// If no configuration file is found, returns the default configuration.
    /// If a configuration file exists but is malformed, logs an error and uses defaults.
    pub fn load() -> Self {
        use tracing::{error, info};

        let xdg_dirs = match xdg::BaseDirectories::with_prefix("courier") {
            Ok(dirs) => dirs,
            Err(e) => {
                error!("Failed to initialize XDG directories: {}", e);
                return Self::default();
            }
        };

        match xdg_dirs.find_config_file("config.toml") {
            Some(path) => {
                info!("Loading configuration from: {}", path.display());
                match Self::load_from(&path) {
                    Ok(config) => config,
                    Err(e) => {
                        error!("{:#}", e);
                        Self::default()
                    }
                }
            }
            None => {
                info!("No configuration file found, using defaults");
                Self::default()
            }
        }
    }
}

lazy_static! {
    /// Global configuration instance loaded from XDG-compliant locations
    pub static ref CONFIG: CourierConfig = CourierConfig::load();
}
