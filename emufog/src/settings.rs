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

//! Module to load and validate the YAML configuration of a transformation run.

use std::net::Ipv4Addr;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::container::{DeviceType, FogType};

/// Configuration Errors, fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Cannot read the configuration file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file could not be parsed
    #[error("Cannot parse the configuration file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The list of device node types is empty
    #[error("At least one device node type must be configured")]
    NoDeviceTypes,
    /// The list of fog node types is empty
    #[error("At least one fog node type must be configured")]
    NoFogTypes,
    /// The cost threshold is not a positive number
    #[error("The cost threshold must be a positive number")]
    InvalidCostThreshold,
    /// A fog node type cannot serve any client
    #[error("Fog node type {0} must serve at least one client")]
    InvalidMaxClients(String),
    /// A device node type has a scaling factor of zero
    #[error("Device node type {0} must have a scaling factor of at least 1")]
    InvalidScalingFactor(String),
    /// A device node type has an invalid average count
    #[error("Device node type {0} must have a non-negative average device count")]
    InvalidAverageDeviceCount(String),
    /// The base address is not a valid IPv4 address
    #[error("Cannot parse the base address: {0}")]
    InvalidBaseAddress(String),
}

/// How the number of devices attached to an edge router is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceSampling {
    /// Draw the count from a Poisson distribution with the configured average
    Poisson,
    /// Round the configured average, for reproducible runs
    Deterministic,
}

impl Default for DeviceSampling {
    fn default() -> Self {
        Self::Poisson
    }
}

/// # Settings
///
/// All recognized options of a transformation run, loaded from a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Hard ceiling on the total number of placed fog nodes
    pub max_fog_nodes: u32,
    /// Maximum latency in milliseconds between an edge router and its fog node
    pub cost_threshold: f32,
    /// Multiplier applied to the average node degree when promoting high-degree routers to the
    /// backbone
    #[serde(default = "default_backbone_degree_factor")]
    pub backbone_degree_factor: f32,
    /// The device containers to attach to edge routers
    pub device_node_types: Vec<DeviceType>,
    /// The fog containers available for placement
    pub fog_node_types: Vec<FogType>,
    /// How the device counts per router are drawn
    #[serde(default)]
    pub device_sampling: DeviceSampling,
    /// Log the time each pipeline stage takes
    #[serde(default)]
    pub time_measuring: bool,
    /// First IPv4 address handed out to emulated containers
    #[serde(default = "default_base_address")]
    pub base_address: String,
    /// Number of worker threads for the per-AS stages, 0 picks the number of cpus
    #[serde(default)]
    pub num_threads: usize,
}

impl Settings {
    /// Load and validate the settings from the YAML file at the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse and validate the settings from a YAML string.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.device_node_types.is_empty() {
            return Err(ConfigError::NoDeviceTypes);
        }
        if self.fog_node_types.is_empty() {
            return Err(ConfigError::NoFogTypes);
        }
        if !(self.cost_threshold > 0.0) || !self.cost_threshold.is_finite() {
            return Err(ConfigError::InvalidCostThreshold);
        }
        for device_type in &self.device_node_types {
            if device_type.scaling_factor == 0 {
                return Err(ConfigError::InvalidScalingFactor(device_type.container.image_name()));
            }
            if !(device_type.average_device_count >= 0.0)
                || !device_type.average_device_count.is_finite()
            {
                return Err(ConfigError::InvalidAverageDeviceCount(
                    device_type.container.image_name(),
                ));
            }
        }
        for fog_type in &self.fog_node_types {
            if fog_type.max_clients == 0 {
                return Err(ConfigError::InvalidMaxClients(fog_type.container.image_name()));
            }
        }
        if self.base_address.parse::<Ipv4Addr>().is_err() {
            return Err(ConfigError::InvalidBaseAddress(self.base_address.clone()));
        }
        Ok(())
    }
}

fn default_backbone_degree_factor() -> f32 {
    0.6
}

fn default_base_address() -> String {
    String::from("10.0.0.1")
}
