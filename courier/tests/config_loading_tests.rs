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
use std::fs;
use std::time::Duration;

use courier::common::config::{ChannelsConfig, CourierConfig};
use courier::prelude::Timeout;
use tempfile::TempDir;

use crate::setup::*;

mod setup;

#[test]
fn test_load_from_file() -> anyhow::Result<()> {
    initialize_tracing();
    let dir = TempDir::new()?;
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r"
[channels]
queue_capacity = 64

[timeouts]
send_timeout_ms = 0
receive_timeout_ms = 1500

[dispatch]
apply_sequence = true
max_concurrent_tasks = 8
",
    )?;

    let config = CourierConfig::load_from(&path)?;
    assert_eq!(config.queue_capacity(), Some(64));
    assert_eq!(config.send_timeout(), Timeout::Immediate);
    assert_eq!(
        config.receive_timeout(),
        Timeout::After(Duration::from_millis(1500))
    );
    assert!(config.dispatch.apply_sequence);
    assert_eq!(config.max_concurrent_tasks(), Some(8));
    Ok(())
}

#[test]
fn test_load_from_missing_file_is_an_error() -> anyhow::Result<()> {
    initialize_tracing();
    let dir = TempDir::new()?;
    assert!(CourierConfig::load_from(dir.path().join("absent.toml")).is_err());
    Ok(())
}

#[test]
fn test_empty_file_yields_defaults() -> anyhow::Result<()> {
    initialize_tracing();
    let dir = TempDir::new()?;
    let path = dir.path().join("config.toml");
    fs::write(&path, "")?;

    let config = CourierConfig::load_from(&path)?;
    assert_eq!(config, CourierConfig::default());
    assert_eq!(config.channels, ChannelsConfig { queue_capacity: 0 });
    Ok(())
}

#[test]
fn test_load_reads_xdg_config_home() -> anyhow::Result<()> {
    initialize_tracing();
    let dir = TempDir::new()?;
    let app_dir = dir.path().join("courier");
    fs::create_dir_all(&app_dir)?;
    fs::write(app_dir.join("config.toml"), "[channels]\nqueue_capacity = 5\n")?;

    std::env::set_var("XDG_CONFIG_HOME", dir.path());
    let loaded = CourierConfig::load();
    assert_eq!(loaded.queue_capacity(), Some(5));

    fs::write(app_dir.join("config.toml"), "[channels]\nqueue_capacity = []\n")?;
    let fallback = CourierConfig::load();
    std::env::remove_var("XDG_CONFIG_HOME");
    assert_eq!(fallback, CourierConfig::default());
    Ok(())
}
