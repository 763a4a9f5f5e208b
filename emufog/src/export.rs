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

//! # Emulation plan exporter
//!
//! This module writes the transformed topology as a Python experiment file for MaxiNet. Every
//! router becomes a switch, every edge device and every placed fog node becomes a Docker host,
//! and every link of the graph becomes an emulated link with its latency and bandwidth. The
//! graph is only read, never modified; the output is ordered by `(as_id, node_id)` so that two
//! runs produce identical files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::*;
use thiserror::Error;

use crate::container::Container;
use crate::fog::{FogPlacement, FogResult};
use crate::graph::{AutonomousSystem, Edge, Graph, Node, NodeId, NodeRef};
use crate::settings::Settings;
use crate::util::IpPool;

/// Export Errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// An I/O error while writing the experiment file
    #[error("Cannot write the experiment file: {0}")]
    Io(#[from] std::io::Error),
    /// The configured base address is invalid
    #[error("Cannot parse the base address: {0}")]
    InvalidBaseAddress(String),
}

/// Write the MaxiNet experiment file for the transformed graph and the fog placement result to
/// the given path.
pub fn write_experiment_file(
    graph: &Graph,
    result: &FogResult,
    settings: &Settings,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_experiment(graph, result, settings, &mut writer)?;
    writer.flush()?;
    info!("Wrote the experiment file to {}", path.as_ref().display());
    Ok(())
}

/// Write the MaxiNet experiment to the given writer.
pub fn write_experiment(
    graph: &Graph,
    result: &FogResult,
    settings: &Settings,
    out: &mut impl Write,
) -> Result<(), ExportError> {
    // the device placer handed out addresses from the same pool first
    let mut pool = IpPool::new(&settings.base_address)
        .ok_or_else(|| ExportError::InvalidBaseAddress(settings.base_address.clone()))?;
    pool.advance(graph.edge_device_count() as u32);

    writeln!(out, "#!/usr/bin/env python2")?;
    writeln!(out)?;
    writeln!(out, "import time")?;
    writeln!(out)?;
    writeln!(out, "from MaxiNet.Frontend import maxinet")?;
    writeln!(out, "from MaxiNet.Frontend.container import Docker")?;
    writeln!(out, "from mininet.topo import Topo")?;
    writeln!(out, "from mininet.node import OVSSwitch")?;
    writeln!(out)?;
    if !result.is_success() {
        writeln!(out, "# WARNING: the fog node budget was exhausted before all devices")?;
        writeln!(out, "# were covered; this plan is incomplete.")?;
    }
    writeln!(out, "topo = Topo()")?;

    let mut systems: Vec<&AutonomousSystem> = graph.systems().collect();
    systems.sort_by_key(|s| s.id());

    for system in &systems {
        writeln!(out)?;
        writeln!(out, "# {}", system.id())?;
        for node in sorted(system.edge_routers().chain(system.backbone_routers())) {
            writeln!(out, "{} = topo.addSwitch(\"s{}\")", switch_var(node.id()), node.id())?;
        }
        for node in sorted(system.edge_devices()) {
            match node.emulation() {
                Some(binding) => write_docker_host(
                    out,
                    &host_var(node.id()),
                    &format!("h{}", node.id()),
                    &binding.ip,
                    binding.container.container(),
                )?,
                None => warn!("Edge device {} carries no emulation binding", node.id()),
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "# links")?;
    let mut edges: Vec<&Edge> = graph.edges().collect();
    edges.sort_by_key(|e| e.id());
    for edge in edges {
        let (from, to) = edge.endpoints();
        writeln!(
            out,
            "topo.addLink({}, {}, delay=\"{}ms\", bw={})",
            endpoint_var(graph, from),
            endpoint_var(graph, to),
            edge.latency(),
            edge.bandwidth()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "# fog nodes")?;
    for placement in &result.placements {
        write_fog_placement(out, placement, &mut pool)?;
    }

    writeln!(out)?;
    writeln!(out, "cluster = maxinet.Cluster()")?;
    writeln!(out, "exp = maxinet.Experiment(cluster, topo, switch=OVSSwitch)")?;
    writeln!(out, "exp.setup()")?;

    Ok(())
}

/// Write one placed fog container: a Docker host attached to the switch of its router.
fn write_fog_placement(
    out: &mut impl Write,
    placement: &FogPlacement,
    pool: &mut IpPool,
) -> Result<(), ExportError> {
    let variable = format!("f{}", placement.node);
    write_docker_host(
        out,
        &variable,
        &variable,
        &pool.next_address(),
        &placement.fog_type.container,
    )?;
    writeln!(
        out,
        "topo.addLink({}, {}, delay=\"0ms\")",
        variable,
        switch_var(placement.node)
    )?;
    Ok(())
}

fn write_docker_host(
    out: &mut impl Write,
    variable: &str,
    name: &str,
    ip: &str,
    container: &Container,
) -> Result<(), ExportError> {
    writeln!(
        out,
        "{} = topo.addHost(\"{}\", cls=Docker, ip=\"{}\", dimage=\"{}\", \
         mem_limit={}, cpu_shares={})",
        variable,
        name,
        ip,
        container.image_name(),
        container.memory_limit,
        container.cpu_share
    )?;
    Ok(())
}

/// The Python variable naming a router switch.
fn switch_var(node: NodeId) -> String {
    format!("s{}", node)
}

/// The Python variable naming a device host.
fn host_var(node: NodeId) -> String {
    format!("h{}", node)
}

/// The Python variable of a link endpoint, which is a host for devices and a switch otherwise.
fn endpoint_var(graph: &Graph, node: NodeId) -> String {
    match graph.node(node) {
        NodeRef::EdgeDevice(_) => host_var(node),
        _ => switch_var(node),
    }
}

/// Sort nodes by id for a reproducible output order.
fn sorted<'a>(nodes: impl Iterator<Item = &'a Node>) -> Vec<&'a Node> {
    let mut nodes: Vec<&Node> = nodes.collect();
    nodes.sort_by_key(|n| n.id());
    nodes
}
