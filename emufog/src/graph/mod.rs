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

//! # Graph module
//!
//! This module represents the network topology that is transformed into an emulation plan. The
//! topology consists of [`AutonomousSystem`]s owning their [`Node`]s (split by variant into edge
//! routers, backbone routers and edge devices), and a central arena of undirected [`Edge`]s.
//!
//! Nodes and edges reference each other through ids only: an edge stores the ids of its two
//! endpoints, and every node keeps the ordered list of its incident edge ids. All lookups go
//! through the [`Graph`], which keeps a global id index. This indirection makes node variant
//! conversion a pure move between the buckets of the owning system, with no references to fix
//! up afterwards.

pub mod autonomous_system;
pub mod edge;
pub mod node;
pub mod types;

pub use autonomous_system::AutonomousSystem;
pub use edge::Edge;
pub use node::{Node, NodeRef};
pub use types::{AsId, Bandwidth, EdgeId, GraphError, Latency, NodeId};

use crate::container::EmulationBinding;
use std::collections::HashMap;

/// # Network graph
///
/// The container of the entire topology. Nodes are created exclusively through the factory
/// operations of the graph, which enforce graph-wide id uniqueness and create the owning
/// autonomous system on demand. Nodes are never deleted; they only change their variant through
/// the conversion operations of their [`AutonomousSystem`].
#[derive(Debug, Clone, Default)]
pub struct Graph {
    systems: HashMap<AsId, AutonomousSystem>,
    edges: HashMap<EdgeId, Edge>,
    node_index: HashMap<NodeId, AsId>,
    next_node_id: u32,
    next_edge_id: u32,
}

impl Graph {
    /// Generate an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new edge router with the given graph-wide unique id, creating the autonomous
    /// system if it does not exist yet. Fails if the id is already in use.
    pub fn create_edge_router(&mut self, id: NodeId, as_id: AsId) -> Result<&Node, GraphError> {
        if self.node_index.contains_key(&id) {
            return Err(GraphError::DuplicateNodeId(id));
        }
        self.node_index.insert(id, as_id);
        self.next_node_id = self.next_node_id.max(id.0 + 1);
        let system = self.systems.entry(as_id).or_insert_with(|| AutonomousSystem::new(as_id));
        Ok(system.insert_edge_router(Node::new(id, as_id)))
    }

    /// Create a new edge device with the given graph-wide unique id and emulation binding,
    /// creating the autonomous system if it does not exist yet. Fails if the id is already in
    /// use.
    pub fn create_edge_device(
        &mut self,
        id: NodeId,
        as_id: AsId,
        emulation: EmulationBinding,
    ) -> Result<&Node, GraphError> {
        if self.node_index.contains_key(&id) {
            return Err(GraphError::DuplicateNodeId(id));
        }
        self.node_index.insert(id, as_id);
        self.next_node_id = self.next_node_id.max(id.0 + 1);
        let system = self.systems.entry(as_id).or_insert_with(|| AutonomousSystem::new(as_id));
        Ok(system.insert_edge_device(Node::with_emulation(id, as_id, emulation)))
    }

    /// Create a new undirected edge between the two given nodes. Both endpoints must already be
    /// present in the graph, and the edge id must be unused.
    pub fn create_edge(
        &mut self,
        id: EdgeId,
        from: NodeId,
        to: NodeId,
        latency: Latency,
        bandwidth: Bandwidth,
    ) -> Result<&Edge, GraphError> {
        if self.edges.contains_key(&id) {
            return Err(GraphError::DuplicateEdgeId(id));
        }
        let from_as = *self.node_index.get(&from).ok_or(GraphError::NodeNotFound(from))?;
        let to_as = *self.node_index.get(&to).ok_or(GraphError::NodeNotFound(to))?;

        let edge = Edge::new(id, from, to, from_as, to_as, latency, bandwidth);
        self.next_edge_id = self.next_edge_id.max(id.0 + 1);

        // register the edge on both endpoints; a self loop is registered only once
        if let Some(node) = self.node_mut(from) {
            node.add_edge(id);
        }
        if from != to {
            if let Some(node) = self.node_mut(to) {
                node.add_edge(id);
            }
        }

        Ok(self.edges.entry(id).or_insert(edge))
    }

    /// Look up a node anywhere in the graph by id.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        match self.node_index.get(&id).and_then(|as_id| self.systems.get(as_id)) {
            Some(system) => system.node(id),
            None => NodeRef::None,
        }
    }

    /// Look up an edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Iterate over all edges of the graph
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Look up an autonomous system by id.
    pub fn system(&self, id: AsId) -> Option<&AutonomousSystem> {
        self.systems.get(&id)
    }

    /// Iterate over all autonomous systems of the graph
    pub fn systems(&self) -> impl Iterator<Item = &AutonomousSystem> {
        self.systems.values()
    }

    /// Iterate over all edge routers of the graph
    pub fn edge_routers(&self) -> impl Iterator<Item = &Node> {
        self.systems.values().flat_map(|s| s.edge_routers())
    }

    /// Iterate over all backbone routers of the graph
    pub fn backbone_routers(&self) -> impl Iterator<Item = &Node> {
        self.systems.values().flat_map(|s| s.backbone_routers())
    }

    /// Iterate over all edge devices of the graph
    pub fn edge_devices(&self) -> impl Iterator<Item = &Node> {
        self.systems.values().flat_map(|s| s.edge_devices())
    }

    /// Return the number of nodes of the graph
    pub fn node_count(&self) -> usize {
        self.node_index.len()
    }

    /// Return the number of edges of the graph
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Return the number of edge devices of the graph
    pub fn edge_device_count(&self) -> usize {
        self.systems.values().map(|s| s.edge_device_count()).sum()
    }

    /// Return the smallest node id not yet in use by the graph.
    pub fn next_free_node_id(&self) -> NodeId {
        NodeId(self.next_node_id)
    }

    /// Return the smallest edge id not yet in use by the graph.
    pub fn next_free_edge_id(&self) -> EdgeId {
        EdgeId(self.next_edge_id)
    }

    pub(crate) fn edge_map(&self) -> &HashMap<EdgeId, Edge> {
        &self.edges
    }

    pub(crate) fn system_mut(&mut self, id: AsId) -> Option<&mut AutonomousSystem> {
        self.systems.get_mut(&id)
    }

    /// Split the graph into mutable references onto all systems and a shared reference onto the
    /// edge arena. This is the borrow boundary for the per-AS workers: every worker receives one
    /// system, while the edges stay read-only and shared.
    pub(crate) fn split_systems_mut(
        &mut self,
    ) -> (Vec<&mut AutonomousSystem>, &HashMap<EdgeId, Edge>) {
        (self.systems.values_mut().collect(), &self.edges)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let as_id = *self.node_index.get(&id)?;
        self.systems.get_mut(&as_id)?.node_mut(id)
    }
}
