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

//! Module defining the undirected links of the graph.

use crate::graph::types::{AsId, Bandwidth, EdgeId, Latency, NodeId};

/// # Undirected link
///
/// Edges are stored once, in a central arena owned by the [`Graph`](super::Graph), and refer to
/// their endpoints by node id. The AS membership of both endpoints is captured at creation time;
/// it never changes afterwards, since variant conversions preserve the AS of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: EdgeId,
    from: NodeId,
    to: NodeId,
    from_as: AsId,
    to_as: AsId,
    latency: Latency,
    bandwidth: Bandwidth,
}

impl Edge {
    pub(crate) fn new(
        id: EdgeId,
        from: NodeId,
        to: NodeId,
        from_as: AsId,
        to_as: AsId,
        latency: Latency,
        bandwidth: Bandwidth,
    ) -> Self {
        Self { id, from, to, from_as, to_as, latency, bandwidth }
    }

    /// Return the id of the edge
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Return both endpoints of the edge
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.from, self.to)
    }

    /// Return the endpoint opposite to the given node, or `None` if the node is not an endpoint
    /// of this edge.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.from {
            Some(self.to)
        } else if node == self.to {
            Some(self.from)
        } else {
            None
        }
    }

    /// Returns true if and only if the two endpoints belong to different autonomous systems.
    pub fn is_cross_as(&self) -> bool {
        self.from_as != self.to_as
    }

    /// Return the latency of the link in milliseconds
    pub fn latency(&self) -> Latency {
        self.latency
    }

    /// Return the bandwidth of the link in Mbit/s
    pub fn bandwidth(&self) -> Bandwidth {
        self.bandwidth
    }

    pub(crate) fn endpoint_systems(&self) -> (AsId, AsId) {
        (self.from_as, self.to_as)
    }
}
