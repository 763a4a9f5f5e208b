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

//! # Fog node placement
//!
//! This module picks the routers that host fog containers. Every AS is processed independently
//! and concurrently: within an AS, the placer determines which routers can reach each
//! device-bearing edge router within the configured latency threshold (a bounded Dijkstra per
//! starting node), assigns every reachable router the fog container minimising the cost per
//! served connection, and then greedily selects routers until all devices are covered.
//!
//! The number of fog nodes placed over the entire graph is bounded by a shared budget. The
//! counter is read optimistically, so concurrent workers can overshoot the budget by at most
//! one placement each; the aggregated result still counts as a success.
//!
//! The placer never mutates the graph. Its output is the list of [`FogPlacement`]s, ordered by
//! `(as_id, node_id)`.

mod candidate;
mod reachability;
mod worker;

use std::sync::atomic::AtomicI64;
use std::sync::Mutex;
use std::thread;

use log::*;

use crate::container::FogType;
use crate::graph::{AsId, AutonomousSystem, Graph, NodeId};
use crate::settings::Settings;
use crate::util::pool_size;

/// A single placed fog node: the router hosting the container and the chosen container type.
#[derive(Debug, Clone, PartialEq)]
pub struct FogPlacement {
    /// id of the router the container is deployed on
    pub node: NodeId,
    /// the autonomous system of the router
    pub as_id: AsId,
    /// the chosen container type
    pub fog_type: FogType,
}

/// Whether the placement covered all devices within the fog node budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStatus {
    /// every device-bearing edge router is served by a placed fog node
    Success,
    /// the budget ran out before all edge routers were covered
    Failure,
}

/// The outcome of the fog placement: the status and all placements made. On a failure the
/// placements made before the budget ran out are still present.
#[derive(Debug, Clone, PartialEq)]
pub struct FogResult {
    /// whether all devices were covered
    pub status: PlacementStatus,
    /// the placed fog nodes
    pub placements: Vec<FogPlacement>,
}

impl FogResult {
    pub(crate) fn success(placements: Vec<FogPlacement>) -> Self {
        Self { status: PlacementStatus::Success, placements }
    }

    pub(crate) fn failure(placements: Vec<FogPlacement>) -> Self {
        Self { status: PlacementStatus::Failure, placements }
    }

    /// Returns true if and only if all devices were covered.
    pub fn is_success(&self) -> bool {
        self.status == PlacementStatus::Success
    }
}

/// Place fog nodes for every AS of the graph.
///
/// The per-AS results are merged into a single [`FogResult`]: the aggregate is a failure if any
/// AS ran out of budget, and the merged placements are sorted by `(as_id, node_id)` so that two
/// runs on the same classified graph produce the same ordered list.
pub fn place_fog_nodes(graph: &Graph, settings: &Settings) -> FogResult {
    let budget = AtomicI64::new(i64::from(settings.max_fog_nodes));
    let systems: Vec<&AutonomousSystem> = graph.systems().collect();
    let edges = graph.edge_map();
    let n_workers = pool_size(settings.num_threads, systems.len());
    let queue = Mutex::new(systems);

    debug!("Start fog placement with {} workers", n_workers);
    let mut results: Vec<FogResult> = Vec::new();
    thread::scope(|s| {
        let handles: Vec<_> = (0..n_workers)
            .map(|_| {
                s.spawn(|| {
                    let mut out = Vec::new();
                    loop {
                        let system = queue.lock().unwrap().pop();
                        match system {
                            Some(system) => {
                                out.push(worker::process_system(system, edges, settings, &budget))
                            }
                            None => return out,
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            results.extend(handle.join().unwrap());
        }
    });

    let mut merged = FogResult::success(Vec::new());
    for result in results {
        if !result.is_success() {
            merged.status = PlacementStatus::Failure;
        }
        merged.placements.extend(result.placements);
    }
    merged.placements.sort_by_key(|p| (p.as_id, p.node));

    match merged.status {
        PlacementStatus::Success => info!("Placed {} fog nodes", merged.placements.len()),
        PlacementStatus::Failure => warn!(
            "Fog node budget of {} exhausted after {} placements",
            settings.max_fog_nodes,
            merged.placements.len()
        ),
    }
    merged
}
