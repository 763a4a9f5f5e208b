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

//! Module defining a single autonomous system of the graph.

use std::collections::HashMap;

use crate::container::EmulationBinding;
use crate::graph::edge::Edge;
use crate::graph::node::{Node, NodeRef};
use crate::graph::types::{AsId, EdgeId, GraphError, NodeId};

/// # Autonomous System
///
/// An administrative partition of the topology, and the unit of parallel work for the backbone
/// classifier and the fog placer. The system owns its nodes, split into three disjoint buckets,
/// one per node variant. A node id appears in at most one bucket, and a node belongs to exactly
/// one system for its entire lifetime.
///
/// Variant conversions (`replace_by_*`) move the node header between the buckets. The header
/// (id, AS membership and incident edge list) is preserved; since edges refer to nodes by id,
/// no edge needs to be rewritten.
#[derive(Debug, Clone)]
pub struct AutonomousSystem {
    id: AsId,
    edge_nodes: HashMap<NodeId, Node>,
    backbone_nodes: HashMap<NodeId, Node>,
    edge_device_nodes: HashMap<NodeId, Node>,
}

impl AutonomousSystem {
    pub(crate) fn new(id: AsId) -> Self {
        Self {
            id,
            edge_nodes: HashMap::new(),
            backbone_nodes: HashMap::new(),
            edge_device_nodes: HashMap::new(),
        }
    }

    /// Return the id of the autonomous system
    pub fn id(&self) -> AsId {
        self.id
    }

    /// Look up a node of this system by id.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        if let Some(n) = self.edge_nodes.get(&id) {
            NodeRef::EdgeRouter(n)
        } else if let Some(n) = self.backbone_nodes.get(&id) {
            NodeRef::BackboneRouter(n)
        } else if let Some(n) = self.edge_device_nodes.get(&id) {
            NodeRef::EdgeDevice(n)
        } else {
            NodeRef::None
        }
    }

    /// Returns true if and only if the node belongs to this system.
    pub fn contains(&self, id: NodeId) -> bool {
        !self.node(id).is_none()
    }

    /// Iterate over all edge routers of this system
    pub fn edge_routers(&self) -> impl Iterator<Item = &Node> {
        self.edge_nodes.values()
    }

    /// Iterate over all backbone routers of this system
    pub fn backbone_routers(&self) -> impl Iterator<Item = &Node> {
        self.backbone_nodes.values()
    }

    /// Iterate over all edge devices of this system
    pub fn edge_devices(&self) -> impl Iterator<Item = &Node> {
        self.edge_device_nodes.values()
    }

    /// Return the number of edge routers of this system
    pub fn edge_router_count(&self) -> usize {
        self.edge_nodes.len()
    }

    /// Return the number of backbone routers of this system
    pub fn backbone_router_count(&self) -> usize {
        self.backbone_nodes.len()
    }

    /// Return the number of edge devices of this system
    pub fn edge_device_count(&self) -> usize {
        self.edge_device_nodes.len()
    }

    /// Convert the given node into an edge router, preserving its id, AS membership and
    /// incident edges. A no-op if the node already is an edge router. Fails if the node does
    /// not belong to this system.
    pub fn replace_by_edge(&mut self, id: NodeId) -> Result<(), GraphError> {
        if self.edge_nodes.contains_key(&id) {
            return Ok(());
        }
        let node = self
            .backbone_nodes
            .remove(&id)
            .or_else(|| self.edge_device_nodes.remove(&id))
            .ok_or(GraphError::NodeNotInSystem(id, self.id))?;
        self.edge_nodes.insert(id, node);
        Ok(())
    }

    /// Convert the given node into a backbone router, preserving its id, AS membership and
    /// incident edges. A no-op if the node already is a backbone router. Fails if the node does
    /// not belong to this system.
    pub fn replace_by_backbone(&mut self, id: NodeId) -> Result<(), GraphError> {
        if self.backbone_nodes.contains_key(&id) {
            return Ok(());
        }
        let node = self
            .edge_nodes
            .remove(&id)
            .or_else(|| self.edge_device_nodes.remove(&id))
            .ok_or(GraphError::NodeNotInSystem(id, self.id))?;
        self.backbone_nodes.insert(id, node);
        Ok(())
    }

    /// Convert the given node into an edge device carrying the given emulation binding,
    /// preserving its id, AS membership and incident edges. Fails if the node does not belong
    /// to this system.
    pub fn replace_by_edge_device(
        &mut self,
        id: NodeId,
        emulation: EmulationBinding,
    ) -> Result<(), GraphError> {
        let mut node = self
            .edge_device_nodes
            .remove(&id)
            .or_else(|| self.edge_nodes.remove(&id))
            .or_else(|| self.backbone_nodes.remove(&id))
            .ok_or(GraphError::NodeNotInSystem(id, self.id))?;
        node.set_emulation(emulation);
        self.edge_device_nodes.insert(id, node);
        Ok(())
    }

    /// Return the number of device slots attached to the given node: the sum over all adjacent
    /// edge devices of their container scaling factor.
    pub fn device_count(&self, node: &Node, edges: &HashMap<EdgeId, Edge>) -> u32 {
        node.edges()
            .iter()
            .filter_map(|e| edges.get(e))
            .filter_map(|e| e.other(node.id()))
            .filter_map(|n| self.edge_device_nodes.get(&n))
            .map(|d| d.emulation().map(|b| b.container.scaling_factor()).unwrap_or(1))
            .sum()
    }

    pub(crate) fn insert_edge_router(&mut self, node: Node) -> &Node {
        let id = node.id();
        self.edge_nodes.entry(id).or_insert(node)
    }

    pub(crate) fn insert_edge_device(&mut self, node: Node) -> &Node {
        let id = node.id();
        self.edge_device_nodes.entry(id).or_insert(node)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.edge_nodes
            .get_mut(&id)
            .or_else(|| self.backbone_nodes.get_mut(&id))
            .or_else(|| self.edge_device_nodes.get_mut(&id))
    }
}
