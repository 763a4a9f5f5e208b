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

//! Module defining the container catalogue: the docker images deployed for emulated devices and
//! for placed fog nodes, and the emulation binding attached to graph nodes.

use serde::{Deserialize, Serialize};

/// A docker container image together with its resource limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Container {
    /// Name of the docker image to deploy
    pub image: String,
    /// Tag of the docker image to deploy
    #[serde(default = "default_tag")]
    pub tag: String,
    /// Upper limit of memory to use in bytes
    pub memory_limit: u64,
    /// Share of the sum of available computing resources
    pub cpu_share: f32,
}

impl Container {
    /// Return the full image name in the form `image:tag`.
    pub fn image_name(&self) -> String {
        format!("{}:{}", self.image, self.tag)
    }
}

/// A container image representing a host device connected to an edge router. By using the
/// scaling factor a single container can simulate the load of multiple devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeviceType {
    /// The docker container to deploy for each device
    #[serde(flatten)]
    pub container: Container,
    /// Scaling factor of the container, factor >= 1
    #[serde(default = "default_scaling_factor")]
    pub scaling_factor: u32,
    /// Average number of devices of this type deployed to each edge router
    pub average_device_count: f32,
}

/// A container image that can host fog computing workloads, together with its deployment cost
/// and the maximum number of clients it can serve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FogType {
    /// The docker container to deploy on the fog node
    #[serde(flatten)]
    pub container: Container,
    /// Deployment costs of an instance of this container
    pub cost: f32,
    /// Maximum number of clients this container can serve
    pub max_clients: u32,
}

/// The container deployed for an emulated node, either a device or a fog container.
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerSpec {
    /// An end-user device container
    Device(DeviceType),
    /// A fog node container
    Fog(FogType),
}

impl ContainerSpec {
    /// Return the underlying docker container.
    pub fn container(&self) -> &Container {
        match self {
            Self::Device(d) => &d.container,
            Self::Fog(f) => &f.container,
        }
    }

    /// Return the number of devices this container stands for. Fog containers always count as
    /// one.
    pub fn scaling_factor(&self) -> u32 {
        match self {
            Self::Device(d) => d.scaling_factor,
            Self::Fog(_) => 1,
        }
    }
}

/// The binding of a graph node to the container that emulates it.
#[derive(Debug, Clone, PartialEq)]
pub struct EmulationBinding {
    /// The IP address assigned to the container
    pub ip: String,
    /// The container to deploy
    pub container: ContainerSpec,
}

impl EmulationBinding {
    /// Create a binding for an emulated end-user device.
    pub fn device(ip: String, device_type: DeviceType) -> Self {
        Self { ip, container: ContainerSpec::Device(device_type) }
    }

    /// Create a binding for a placed fog container.
    pub fn fog(ip: String, fog_type: FogType) -> Self {
        Self { ip, container: ContainerSpec::Fog(fog_type) }
    }
}

fn default_tag() -> String {
    String::from("latest")
}

fn default_scaling_factor() -> u32 {
    1
}
