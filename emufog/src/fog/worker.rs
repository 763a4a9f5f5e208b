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

//! Worker placing fog nodes inside a single AS of the graph.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};

use log::*;

use crate::fog::candidate::{self, Candidate, StartingNode};
use crate::fog::reachability;
use crate::fog::{FogPlacement, FogResult};
use crate::graph::{AutonomousSystem, Edge, EdgeId, NodeId};
use crate::settings::Settings;

/// Place fog nodes inside the given AS. The worker never mutates the graph; all placement state
/// lives in a side table owned by this call.
///
/// The shared budget counter is decremented once per emitted placement. When it is exhausted
/// before all starting nodes are covered, the worker stops and reports a failure, keeping the
/// placements made so far.
pub(super) fn process_system(
    system: &AutonomousSystem,
    edges: &HashMap<EdgeId, Edge>,
    settings: &Settings,
    budget: &AtomicI64,
) -> FogResult {
    // every edge router with at least one attached device must be covered
    let mut starting: BTreeMap<NodeId, StartingNode> = system
        .edge_routers()
        .filter_map(|n| {
            let devices = system.device_count(n, edges);
            (devices > 0).then(|| (n.id(), StartingNode::new(devices)))
        })
        .collect();

    debug!("{}: {} edge routers with devices to cover", system.id(), starting.len());

    // determine which routers each starting node can reach within the cost threshold
    let mut candidates: BTreeMap<NodeId, Candidate> = BTreeMap::new();
    let start_ids: Vec<NodeId> = starting.keys().copied().collect();
    for source in start_ids {
        for settled in
            reachability::reachable_within(system, edges, source, settings.cost_threshold)
        {
            candidates
                .entry(settled.node)
                .or_insert_with(|| Candidate::new(settled.node))
                .set_cost(source, settled.predecessor, settled.cost);
            if let Some(s) = starting.get_mut(&source) {
                s.possible_nodes.insert(settled.node);
            }
        }
    }

    let mut placements: Vec<FogPlacement> = Vec::new();
    loop {
        if starting.is_empty() {
            debug!("{}: all edge routers covered, {} fog nodes placed", system.id(),
                placements.len());
            return FogResult::success(placements);
        }
        if budget.load(Ordering::Relaxed) <= 0 {
            warn!(
                "{}: no more fog nodes to place available, {} edge routers remain uncovered",
                system.id(),
                starting.len()
            );
            return FogResult::failure(placements);
        }

        // refresh the fog type of every candidate whose registration set changed
        for candidate in candidates.values_mut() {
            candidate.assign_fog_type(&settings.fog_node_types, &starting);
        }

        // pick the best remaining candidate
        let winner_id = match candidates.values().min_by(|a, b| candidate::compare(a, b)) {
            Some(winner) => winner.node(),
            None => {
                error!("{}: uncovered edge routers remain but no candidate is left", system.id());
                return FogResult::failure(placements);
            }
        };
        let winner = match candidates.remove(&winner_id) {
            Some(winner) => winner,
            None => unreachable!("the winner was chosen from the candidate pool"),
        };
        budget.fetch_sub(1, Ordering::Relaxed);

        let fog_type = match winner.fog_type(&settings.fog_node_types) {
            Some(fog_type) => fog_type.clone(),
            None => {
                error!("{}: candidate {} has no fog type assigned", system.id(), winner_id);
                return FogResult::failure(placements);
            }
        };
        debug!(
            "{}: placing fog node {} on router {}, serving {} devices",
            system.id(),
            fog_type.container.image_name(),
            winner_id,
            winner.covered_count()
        );
        placements.push(FogPlacement { node: winner_id, as_id: system.id(), fog_type });

        // hand the capacity of the winner out to the starting nodes, cheapest paths first
        let mut capacity = winner.covered_count();
        for (start_id, _) in winner.covered_order() {
            if capacity == 0 {
                break;
            }
            let remaining = match starting.get_mut(&start_id) {
                Some(s) => {
                    let taken = s.device_count.min(capacity);
                    s.device_count -= taken;
                    capacity -= taken;
                    s.device_count
                }
                None => continue,
            };
            if remaining == 0 {
                if let Some(info) = winner.path_info(start_id) {
                    trace!(
                        "{}: router {} fully covered via {} at cost {}",
                        system.id(),
                        start_id,
                        info.predecessor,
                        info.cost
                    );
                }
                // the starting node is fully covered, unregister it everywhere
                if let Some(s) = starting.remove(&start_id) {
                    for candidate_id in &s.possible_nodes {
                        if let Some(candidate) = candidates.get_mut(candidate_id) {
                            candidate.remove_starting_node(start_id);
                        }
                    }
                }
            }
        }

        // the winner cannot be selected twice
        for start_id in winner.registered() {
            if let Some(s) = starting.get_mut(start_id) {
                s.possible_nodes.remove(&winner_id);
            }
        }
        candidates.retain(|_, candidate| !candidate.is_unused());
    }
}
