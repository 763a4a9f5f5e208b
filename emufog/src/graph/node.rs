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

//! Module defining the nodes of the graph.
//!
//! All three node variants (edge router, backbone router and edge device) share the same
//! [`Node`] header. The variant itself is not stored on the node; it is given by the bucket of
//! the owning [`AutonomousSystem`](super::AutonomousSystem) the node currently lives in, and
//! surfaces in the API as a [`NodeRef`].

use crate::container::EmulationBinding;
use crate::graph::types::{AsId, EdgeId, NodeId};

/// # Node header
///
/// The attributes shared by every node variant: the graph-wide unique id, the autonomous system
/// the node belongs to, the ordered list of incident edges, and the optional emulation binding
/// describing the container to launch for this node.
///
/// The edge list is kept in insertion order. A variant conversion moves the entire header
/// between the buckets of the owning autonomous system, so the id, the AS membership and the
/// incident edges are preserved by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    as_id: AsId,
    edges: Vec<EdgeId>,
    emulation: Option<EmulationBinding>,
}

impl Node {
    pub(crate) fn new(id: NodeId, as_id: AsId) -> Self {
        Self { id, as_id, edges: Vec::new(), emulation: None }
    }

    pub(crate) fn with_emulation(id: NodeId, as_id: AsId, emulation: EmulationBinding) -> Self {
        Self { id, as_id, edges: Vec::new(), emulation: Some(emulation) }
    }

    /// Return the id of the node
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Return the id of the autonomous system the node belongs to
    pub fn as_id(&self) -> AsId {
        self.as_id
    }

    /// Return the incident edges of the node, in insertion order
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Return the degree of the node
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// Return the emulation binding of the node, if one is set
    pub fn emulation(&self) -> Option<&EmulationBinding> {
        self.emulation.as_ref()
    }

    pub(crate) fn add_edge(&mut self, edge: EdgeId) {
        self.edges.push(edge);
    }

    pub(crate) fn set_emulation(&mut self, emulation: EmulationBinding) {
        self.emulation = Some(emulation);
    }
}

/// # Node reference (similar to `Option`)
///
/// Enumerates all possible node variants. This struct behaves similar to an `Option`, but it
/// knows three different `Some` values, one per variant. Lookups on the graph or on an
/// autonomous system return `NodeRef::None` if the id is unknown.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    /// A router at the network edge
    EdgeRouter(&'a Node),
    /// A router belonging to the backbone of the network
    BackboneRouter(&'a Node),
    /// An emulated end-user device attached to an edge router
    EdgeDevice(&'a Node),
    /// No node was found
    None,
}

impl<'a> NodeRef<'a> {
    /// Returns true if and only if self contains an edge router.
    pub fn is_edge_router(&self) -> bool {
        matches!(self, Self::EdgeRouter(_))
    }

    /// Returns true if and only if self contains a backbone router.
    pub fn is_backbone_router(&self) -> bool {
        matches!(self, Self::BackboneRouter(_))
    }

    /// Returns true if and only if self contains an edge device.
    pub fn is_edge_device(&self) -> bool {
        matches!(self, Self::EdgeDevice(_))
    }

    /// Returns true if and only if self contains `NodeRef::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Maps the `NodeRef` to an option over the shared node header.
    pub fn node(self) -> Option<&'a Node> {
        match self {
            Self::EdgeRouter(n) | Self::BackboneRouter(n) | Self::EdgeDevice(n) => Some(n),
            Self::None => None,
        }
    }

    /// Returns the node or **panics**, if the enum is not a `NodeRef::EdgeRouter`
    pub fn unwrap_edge_router(self) -> &'a Node {
        match self {
            Self::EdgeRouter(n) => n,
            _ => panic!("`unwrap_edge_router()` called on {:?}", self),
        }
    }

    /// Returns the node or **panics**, if the enum is not a `NodeRef::BackboneRouter`
    pub fn unwrap_backbone_router(self) -> &'a Node {
        match self {
            Self::BackboneRouter(n) => n,
            _ => panic!("`unwrap_backbone_router()` called on {:?}", self),
        }
    }

    /// Returns the node or **panics**, if the enum is not a `NodeRef::EdgeDevice`
    pub fn unwrap_edge_device(self) -> &'a Node {
        match self {
            Self::EdgeDevice(n) => n,
            _ => panic!("`unwrap_edge_device()` called on {:?}", self),
        }
    }
}
