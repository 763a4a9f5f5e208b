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

//! The transient placement state of the fog placer. Nothing in here touches the graph; the
//! worker keeps one [`Candidate`] per reachable router and one [`StartingNode`] per edge router
//! that still has uncovered devices.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::container::FogType;
use crate::graph::NodeId;

/// An edge router with attached devices that the placer still has to cover.
#[derive(Debug, Clone)]
pub(crate) struct StartingNode {
    /// number of device slots not yet served by a placed fog node
    pub(crate) device_count: u32,
    /// the candidates that can reach this router within the cost threshold
    pub(crate) possible_nodes: BTreeSet<NodeId>,
}

impl StartingNode {
    pub(crate) fn new(device_count: u32) -> Self {
        Self { device_count, possible_nodes: BTreeSet::new() }
    }
}

/// The cheapest known path from a starting node to a candidate.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PathInfo {
    /// the node preceding the candidate on the path
    pub(crate) predecessor: NodeId,
    /// accumulated latency of the path in milliseconds
    pub(crate) cost: f32,
}

/// A router that may become a fog node, together with the starting nodes that reach it and the
/// currently assigned fog type.
///
/// The `modified` flag tracks whether the set of registered starting nodes changed since the
/// fog type was last assigned; the scoring fields are only meaningful while it is unset.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    node: NodeId,
    costs: BTreeMap<NodeId, PathInfo>,
    modified: bool,
    fog_type: Option<usize>,
    covered_count: u32,
    average_connection_cost: f32,
    average_deployment_cost: f32,
}

impl Candidate {
    pub(crate) fn new(node: NodeId) -> Self {
        Self {
            node,
            costs: BTreeMap::new(),
            modified: true,
            fog_type: None,
            covered_count: 0,
            average_connection_cost: f32::MAX,
            average_deployment_cost: f32::MAX,
        }
    }

    pub(crate) fn node(&self) -> NodeId {
        self.node
    }

    /// Record the cheapest path from the given starting node to this candidate.
    pub(crate) fn set_cost(&mut self, starting: NodeId, predecessor: NodeId, cost: f32) {
        self.costs.insert(starting, PathInfo { predecessor, cost });
        self.modified = true;
    }

    /// The cheapest path recorded for the given starting node.
    pub(crate) fn path_info(&self, starting: NodeId) -> Option<PathInfo> {
        self.costs.get(&starting).copied()
    }

    /// Unregister a fully covered starting node.
    pub(crate) fn remove_starting_node(&mut self, starting: NodeId) {
        if self.costs.remove(&starting).is_some() {
            self.modified = true;
        }
    }

    /// The starting nodes currently registered with this candidate.
    pub(crate) fn registered(&self) -> impl Iterator<Item = &NodeId> {
        self.costs.keys()
    }

    /// Returns true if no starting node registers this candidate anymore.
    pub(crate) fn is_unused(&self) -> bool {
        self.costs.is_empty()
    }

    pub(crate) fn covered_count(&self) -> u32 {
        self.covered_count
    }

    /// The fog type assigned by the last call to [`Candidate::assign_fog_type`].
    pub(crate) fn fog_type<'a>(&self, fog_types: &'a [FogType]) -> Option<&'a FogType> {
        self.fog_type.and_then(|i| fog_types.get(i))
    }

    /// Pick the fog type minimising the cost per served connection, based on the devices of the
    /// registered starting nodes. Ties are broken towards the cheaper container. A no-op unless
    /// the registration set was modified since the last assignment.
    pub(crate) fn assign_fog_type(
        &mut self,
        fog_types: &[FogType],
        starting: &BTreeMap<NodeId, StartingNode>,
    ) {
        if !self.modified {
            return;
        }

        let device_count: u32 =
            self.costs.keys().filter_map(|s| starting.get(s)).map(|s| s.device_count).sum();

        self.fog_type = None;
        self.covered_count = 0;
        let mut costs_per_connection = f32::MAX;

        for (index, fog_type) in fog_types.iter().enumerate() {
            let connections = device_count.min(fog_type.max_clients);
            if connections == 0 {
                continue;
            }
            let costs = fog_type.cost / connections as f32;
            let better = match self.fog_type {
                None => true,
                Some(best) => {
                    costs < costs_per_connection
                        || (costs == costs_per_connection && fog_type.cost < fog_types[best].cost)
                }
            };
            if better {
                self.fog_type = Some(index);
                self.covered_count = connections;
                costs_per_connection = costs;
            }
        }

        self.average_deployment_cost = match (self.fog_type, self.covered_count) {
            (Some(index), covered) if covered > 0 => fog_types[index].cost / covered as f32,
            _ => f32::MAX,
        };
        self.average_connection_cost = if self.costs.is_empty() {
            f32::MAX
        } else {
            self.costs.values().map(|info| info.cost).sum::<f32>() / self.costs.len() as f32
        };
        self.modified = false;
    }

    /// The registered starting nodes in the order in which the capacity of this candidate is
    /// handed out: ascending path cost, ties towards the smaller node id.
    pub(crate) fn covered_order(&self) -> Vec<(NodeId, f32)> {
        let mut order: Vec<(NodeId, f32)> =
            self.costs.iter().map(|(s, info)| (*s, info.cost)).collect();
        order.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        order
    }
}

/// Compare two candidates for the greedy selection. The best candidate has the lowest average
/// deployment cost, then the lowest average connection cost, then the highest covered count,
/// and finally the smallest node id, which keeps the selection deterministic.
pub(crate) fn compare(a: &Candidate, b: &Candidate) -> Ordering {
    a.average_deployment_cost
        .total_cmp(&b.average_deployment_cost)
        .then(a.average_connection_cost.total_cmp(&b.average_connection_cost))
        .then(b.covered_count.cmp(&a.covered_count))
        .then(a.node.cmp(&b.node))
}
