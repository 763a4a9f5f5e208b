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

//! Worker operating on a single AS of the graph, executing the 2nd and 3rd step of the
//! classification algorithm.

use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Instant;

use log::*;

use crate::graph::{AutonomousSystem, Edge, EdgeId, GraphError, NodeId};
use crate::settings::Settings;
use crate::util::interval_to_string;

pub(super) fn run(
    system: &mut AutonomousSystem,
    edges: &HashMap<EdgeId, Edge>,
    settings: &Settings,
) -> Result<(), GraphError> {
    // 2nd step
    let start = Instant::now();
    convert_high_degrees(system, settings.backbone_degree_factor)?;
    if settings.time_measuring {
        info!("{} step 2 - Time: {}", system.id(), interval_to_string(start.elapsed()));
    }

    // 3rd step
    let start = Instant::now();
    build_single_backbone(system, edges)?;
    if settings.time_measuring {
        info!("{} step 3 - Time: {}", system.id(), interval_to_string(start.elapsed()));
    }

    debug!(
        "{} backbone size: {}, edge size: {}",
        system.id(),
        system.backbone_router_count(),
        system.edge_router_count()
    );
    Ok(())
}

/// Converts edge routers whose degree reaches the given fraction of the average degree.
fn convert_high_degrees(
    system: &mut AutonomousSystem,
    degree_factor: f32,
) -> Result<(), GraphError> {
    let threshold = average_degree(system) * f64::from(degree_factor);
    let to_convert: Vec<NodeId> = system
        .edge_routers()
        .filter(|n| n.degree() as f64 >= threshold)
        .map(|n| n.id())
        .collect();

    for node in to_convert {
        system.replace_by_backbone(node)?;
    }
    Ok(())
}

/// Returns the average degree of the autonomous system based on the router nodes. Edge devices
/// are not part of the calculation.
fn average_degree(system: &AutonomousSystem) -> f64 {
    let sum: usize =
        system.edge_routers().chain(system.backbone_routers()).map(|n| n.degree()).sum();
    let count = system.edge_router_count() + system.backbone_router_count();

    if count == 0 {
        return 0.0;
    }
    sum as f64 / count as f64
}

/// Creates a single connected backbone inside the AS using a breadth-first search.
///
/// The search starts at the backbone router with the smallest id, so the result is independent
/// of the iteration order of the node buckets. Whenever a backbone router is reached through a
/// chain of edge routers, the chain is promoted to the backbone; predecessors of nodes that are
/// already queued are overwritten to prefer paths running through the backbone.
fn build_single_backbone(
    system: &mut AutonomousSystem,
    edges: &HashMap<EdgeId, Edge>,
) -> Result<(), GraphError> {
    let start = match system.backbone_routers().map(|n| n.id()).min() {
        Some(start) => start,
        None => return Ok(()),
    };

    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    // map nodes to their respective predecessors
    let mut predecessors: HashMap<NodeId, Option<NodeId>> = HashMap::new();

    predecessors.insert(start, None);
    seen.insert(start);
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        if visited.contains(&node) {
            continue;
        }
        visited.insert(node);

        // follow the trace via the predecessors to convert all edge routers on this way
        if system.node(node).is_backbone_router() {
            let mut predecessor = predecessors.get(&node).copied().flatten();
            while let Some(p) = predecessor {
                if !system.node(p).is_edge_router() {
                    break;
                }
                system.replace_by_backbone(p)?;
                predecessor = predecessors.get(&p).copied().flatten();
            }
        }

        let node_is_backbone = system.node(node).is_backbone_router();
        let edge_ids: Vec<EdgeId> = match system.node(node).node() {
            Some(n) => n.edges().to_vec(),
            None => continue,
        };

        // add or update the neighborhood
        for edge_id in edge_ids {
            let edge = match edges.get(&edge_id) {
                Some(edge) => edge,
                None => continue,
            };
            if edge.is_cross_as() {
                continue;
            }
            let neighbor = match edge.other(node) {
                Some(neighbor) => neighbor,
                None => continue,
            };
            // avoid visiting twice
            if visited.contains(&neighbor) {
                continue;
            }

            if seen.contains(&neighbor) {
                // update the predecessor if necessary
                let predecessor_is_edge = predecessors
                    .get(&neighbor)
                    .copied()
                    .flatten()
                    .map(|p| system.node(p).is_edge_router())
                    .unwrap_or(false);
                if node_is_backbone && predecessor_is_edge {
                    predecessors.insert(neighbor, Some(node));
                }
            } else {
                // push a new node to the queue
                predecessors.insert(neighbor, Some(node));
                seen.insert(neighbor);
                queue.push_back(neighbor);
            }
        }
    }

    Ok(())
}
