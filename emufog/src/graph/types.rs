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

//! Module containing all type definitions of the graph

use std::fmt;
use thiserror::Error;

/// Node Identification, unique over the entire graph
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct NodeId(pub u32);

/// Edge Identification, unique over the entire graph
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct EdgeId(pub u32);

/// AS Number
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct AsId(pub u32);

/// Link latency in milliseconds
pub type Latency = f32;

/// Link bandwidth in Mbit/s
pub type Bandwidth = f32;

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for AsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AS{}", self.0)
    }
}

/// Graph Integrity Errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError {
    /// The node id is already used by another node of the graph
    #[error("Node id {0:?} is already in use")]
    DuplicateNodeId(NodeId),
    /// The edge id is already used by another edge of the graph
    #[error("Edge id {0:?} is already in use")]
    DuplicateEdgeId(EdgeId),
    /// The node is not present in the graph
    #[error("Node {0:?} was not found in the graph")]
    NodeNotFound(NodeId),
    /// The autonomous system is not present in the graph
    #[error("Autonomous system {0} was not found in the graph")]
    SystemNotFound(AsId),
    /// A node variant conversion was invoked on the wrong autonomous system
    #[error("Node {0:?} does not belong to {1}")]
    NodeNotInSystem(NodeId, AsId),
}
