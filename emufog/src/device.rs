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

//! # Device placement
//!
//! This module attaches the emulated end-user devices to the edge routers of the classified
//! graph. For every edge router and every configured device type, a count is drawn (either from
//! a Poisson distribution, or deterministically by rounding the configured average), and the
//! resulting devices are created with a fresh id and IP address, linked to their router with a
//! zero latency edge. A single device container stands in for `scaling_factor` devices, so the
//! fog placer later counts every device with that multiplicity.
//!
//! Routers are processed in ascending `(as_id, node_id)` order, so the ids handed out to the
//! new devices are reproducible.

use log::*;
use rand::prelude::*;
use rand_distr::{Distribution, Poisson};

use crate::container::{DeviceType, EmulationBinding};
use crate::graph::{AsId, Graph, NodeId};
use crate::settings::{ConfigError, DeviceSampling, Settings};
use crate::util::IpPool;
use crate::Error;

/// Bandwidth sentinel for the link between an edge router and an attached device, in Mbit/s.
const DEVICE_BANDWIDTH: f32 = 1000.0;

/// Attach the configured device types to all edge routers of the graph.
///
/// Every created device carries an emulation binding with the container of its device type and
/// a fresh address from the configured base address pool. After this step, every edge device
/// has exactly one incident edge, terminating at an edge router of the same AS.
pub fn place_devices(graph: &mut Graph, settings: &Settings) -> Result<(), Error> {
    let mut pool = IpPool::new(&settings.base_address)
        .ok_or_else(|| ConfigError::InvalidBaseAddress(settings.base_address.clone()))?;
    let mut rng = thread_rng();

    let mut system_ids: Vec<AsId> = graph.systems().map(|s| s.id()).collect();
    system_ids.sort();

    let mut created = 0usize;
    for as_id in system_ids {
        let mut routers: Vec<NodeId> = match graph.system(as_id) {
            Some(system) => system.edge_routers().map(|n| n.id()).collect(),
            None => continue,
        };
        routers.sort();

        for router in routers {
            for device_type in &settings.device_node_types {
                let count = draw_count(device_type, settings.device_sampling, &mut rng);
                for _ in 0..count {
                    let device = graph.next_free_node_id();
                    let binding =
                        EmulationBinding::device(pool.next_address(), device_type.clone());
                    graph.create_edge_device(device, as_id, binding)?;
                    let edge = graph.next_free_edge_id();
                    graph.create_edge(edge, router, device, 0.0, DEVICE_BANDWIDTH)?;
                    created += 1;
                }
            }
        }
    }

    info!("Placed {} edge devices", created);
    Ok(())
}

/// Draw the number of devices of the given type for one edge router.
fn draw_count(device_type: &DeviceType, sampling: DeviceSampling, rng: &mut ThreadRng) -> u32 {
    match sampling {
        DeviceSampling::Deterministic => device_type.average_device_count.round() as u32,
        DeviceSampling::Poisson => {
            match Poisson::new(f64::from(device_type.average_device_count)) {
                Ok(distribution) => distribution.sample(rng) as u32,
                // a zero average has no valid Poisson distribution
                Err(_) => 0,
            }
        }
    }
}
