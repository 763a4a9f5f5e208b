// EmuFog: Emulating Fog Computing Infrastructures
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Test loading and validating the configuration.

use crate::settings::{ConfigError, DeviceSampling, Settings};

const FULL_CONFIG: &str = r#"
max-fog-nodes: 100
cost-threshold: 5.5
backbone-degree-factor: 0.8
device-sampling: deterministic
time-measuring: true
base-address: 10.2.0.1
num-threads: 4
device-node-types:
  - image: emufog/device
    tag: v2
    memory-limit: 268435456
    cpu-share: 0.1
    scaling-factor: 2
    average-device-count: 3.5
fog-node-types:
  - image: emufog/fog
    memory-limit: 1073741824
    cpu-share: 0.7
    cost: 4.0
    max-clients: 50
"#;

const MINIMAL_CONFIG: &str = r#"
max-fog-nodes: 10
cost-threshold: 1.0
device-node-types:
  - image: emufog/device
    memory-limit: 1048576
    cpu-share: 0.1
    average-device-count: 1.0
fog-node-types:
  - image: emufog/fog
    memory-limit: 1048576
    cpu-share: 0.5
    cost: 1.0
    max-clients: 10
"#;

#[test]
fn test_full_config() {
    let settings = Settings::from_yaml(FULL_CONFIG).unwrap();

    assert_eq!(settings.max_fog_nodes, 100);
    assert_eq!(settings.cost_threshold, 5.5);
    assert_eq!(settings.backbone_degree_factor, 0.8);
    assert_eq!(settings.device_sampling, DeviceSampling::Deterministic);
    assert!(settings.time_measuring);
    assert_eq!(settings.base_address, "10.2.0.1");
    assert_eq!(settings.num_threads, 4);

    let device = &settings.device_node_types[0];
    assert_eq!(device.container.image_name(), "emufog/device:v2");
    assert_eq!(device.scaling_factor, 2);
    assert_eq!(device.average_device_count, 3.5);

    let fog = &settings.fog_node_types[0];
    assert_eq!(fog.container.image_name(), "emufog/fog:latest");
    assert_eq!(fog.cost, 4.0);
    assert_eq!(fog.max_clients, 50);
}

#[test]
fn test_defaults() {
    let settings = Settings::from_yaml(MINIMAL_CONFIG).unwrap();

    assert_eq!(settings.backbone_degree_factor, 0.6);
    assert_eq!(settings.device_sampling, DeviceSampling::Poisson);
    assert!(!settings.time_measuring);
    assert_eq!(settings.base_address, "10.0.0.1");
    assert_eq!(settings.num_threads, 0);
    assert_eq!(settings.device_node_types[0].scaling_factor, 1);
}

#[test]
fn test_missing_fog_types() {
    let broken = r#"
max-fog-nodes: 10
cost-threshold: 1.0
device-node-types:
  - image: emufog/device
    memory-limit: 1048576
    cpu-share: 0.1
    average-device-count: 1.0
fog-node-types: []
"#;
    assert!(matches!(Settings::from_yaml(broken).unwrap_err(), ConfigError::NoFogTypes));
}

#[test]
fn test_invalid_cost_threshold() {
    let broken = MINIMAL_CONFIG.replace("cost-threshold: 1.0", "cost-threshold: -3.0");
    assert!(matches!(
        Settings::from_yaml(&broken).unwrap_err(),
        ConfigError::InvalidCostThreshold
    ));
}

#[test]
fn test_invalid_max_clients() {
    let broken = MINIMAL_CONFIG.replace("max-clients: 10", "max-clients: 0");
    assert!(matches!(
        Settings::from_yaml(&broken).unwrap_err(),
        ConfigError::InvalidMaxClients(_)
    ));
}

#[test]
fn test_invalid_base_address() {
    let broken = format!("{}base-address: not-an-address\n", MINIMAL_CONFIG);
    assert!(matches!(
        Settings::from_yaml(&broken).unwrap_err(),
        ConfigError::InvalidBaseAddress(_)
    ));
}

#[test]
fn test_unknown_option() {
    let broken = format!("{}unknown-option: 1\n", MINIMAL_CONFIG);
    assert!(matches!(Settings::from_yaml(&broken).unwrap_err(), ConfigError::Yaml(_)));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        Settings::from_file("/nonexistent/emufog.yaml").unwrap_err(),
        ConfigError::Io(_)
    ));
}
