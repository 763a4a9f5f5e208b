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

//! Latency-bounded single-source shortest paths inside one AS.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::graph::{AutonomousSystem, Edge, EdgeId, NodeId};

/// A router settled by the bounded search, together with the cheapest path found.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SettledNode {
    /// the settled router
    pub(crate) node: NodeId,
    /// the node preceding it on the cheapest path (the source itself for the source)
    pub(crate) predecessor: NodeId,
    /// accumulated latency of the path in milliseconds
    pub(crate) cost: f32,
}

#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    cost: f32,
    node: NodeId,
    predecessor: NodeId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cost.total_cmp(&other.cost).then(self.node.cmp(&other.node))
    }
}

/// Run Dijkstra's algorithm from the given source, using the edge latency as the cost measure.
/// Relaxation never crosses AS boundaries or enters an edge device, and stops along a branch as
/// soon as the accumulated cost would exceed the threshold. Returns every settled router in
/// settle order, the source included with cost zero.
pub(crate) fn reachable_within(
    system: &AutonomousSystem,
    edges: &HashMap<EdgeId, Edge>,
    source: NodeId,
    threshold: f32,
) -> Vec<SettledNode> {
    let mut result: Vec<SettledNode> = Vec::new();
    let mut settled: HashSet<NodeId> = HashSet::new();
    let mut best: HashMap<NodeId, f32> = HashMap::new();
    let mut heap: BinaryHeap<Reverse<QueueEntry>> = BinaryHeap::new();

    best.insert(source, 0.0);
    heap.push(Reverse(QueueEntry { cost: 0.0, node: source, predecessor: source }));

    while let Some(Reverse(entry)) = heap.pop() {
        if !settled.insert(entry.node) {
            continue;
        }
        result.push(SettledNode {
            node: entry.node,
            predecessor: entry.predecessor,
            cost: entry.cost,
        });

        let node = match system.node(entry.node).node() {
            Some(node) => node,
            None => continue,
        };
        for edge_id in node.edges() {
            let edge = match edges.get(edge_id) {
                Some(edge) => edge,
                None => continue,
            };
            if edge.is_cross_as() {
                continue;
            }
            let neighbor = match edge.other(entry.node) {
                Some(neighbor) => neighbor,
                None => continue,
            };
            if settled.contains(&neighbor) {
                continue;
            }
            // devices are endpoints of the emulation, never transit or fog locations
            let neighbor_ref = system.node(neighbor);
            if neighbor_ref.is_edge_device() || neighbor_ref.is_none() {
                continue;
            }

            let cost = entry.cost + edge.latency();
            if cost > threshold {
                continue;
            }
            if best.get(&neighbor).map_or(true, |&known| cost < known) {
                best.insert(neighbor, cost);
                heap.push(Reverse(QueueEntry { cost, node: neighbor, predecessor: entry.node }));
            }
        }
    }

    result
}
