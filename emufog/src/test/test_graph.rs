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

//! Test the graph model: factories, lookups and variant conversions.

use crate::container::EmulationBinding;
use crate::graph::{AsId, EdgeId, Graph, GraphError, NodeId};
use crate::test::fixtures::*;

#[test]
fn test_create_and_lookup() {
    let mut graph = Graph::new();
    graph.create_edge_router(NodeId(1), AsId(0)).unwrap();
    graph.create_edge_router(NodeId(2), AsId(0)).unwrap();
    graph.create_edge_router(NodeId(3), AsId(1)).unwrap();
    graph.create_edge(EdgeId(0), NodeId(1), NodeId(2), 5.0, 1000.0).unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.node(NodeId(1)).is_edge_router());
    assert!(graph.node(NodeId(3)).is_edge_router());
    assert!(graph.node(NodeId(4)).is_none());
    assert_eq!(graph.node(NodeId(1)).unwrap_edge_router().as_id(), AsId(0));

    let edge = graph.edge(EdgeId(0)).unwrap();
    assert_eq!(edge.endpoints(), (NodeId(1), NodeId(2)));
    assert_eq!(edge.other(NodeId(1)), Some(NodeId(2)));
    assert_eq!(edge.other(NodeId(3)), None);
    assert!(!edge.is_cross_as());
}

#[test]
fn test_duplicate_ids() {
    let mut graph = Graph::new();
    graph.create_edge_router(NodeId(1), AsId(0)).unwrap();
    assert_eq!(
        graph.create_edge_router(NodeId(1), AsId(1)).unwrap_err(),
        GraphError::DuplicateNodeId(NodeId(1))
    );

    graph.create_edge_router(NodeId(2), AsId(0)).unwrap();
    graph.create_edge(EdgeId(0), NodeId(1), NodeId(2), 1.0, 1000.0).unwrap();
    assert_eq!(
        graph.create_edge(EdgeId(0), NodeId(1), NodeId(2), 1.0, 1000.0).unwrap_err(),
        GraphError::DuplicateEdgeId(EdgeId(0))
    );
}

#[test]
fn test_missing_endpoint() {
    let mut graph = Graph::new();
    graph.create_edge_router(NodeId(1), AsId(0)).unwrap();
    assert_eq!(
        graph.create_edge(EdgeId(0), NodeId(1), NodeId(9), 1.0, 1000.0).unwrap_err(),
        GraphError::NodeNotFound(NodeId(9))
    );
}

#[test]
fn test_cross_as_edge() {
    let mut graph = Graph::new();
    graph.create_edge_router(NodeId(1), AsId(0)).unwrap();
    graph.create_edge_router(NodeId(2), AsId(1)).unwrap();
    graph.create_edge(EdgeId(0), NodeId(1), NodeId(2), 1.0, 1000.0).unwrap();

    assert!(graph.edge(EdgeId(0)).unwrap().is_cross_as());
}

/// A node id never appears in more than one variant bucket of its AS, and a conversion
/// round-trip restores the initial state.
#[test]
fn test_conversion_round_trip() {
    let mut graph = Graph::new();
    graph.create_edge_router(NodeId(1), AsId(0)).unwrap();
    graph.create_edge_router(NodeId(2), AsId(0)).unwrap();
    graph.create_edge_router(NodeId(3), AsId(0)).unwrap();
    let e1 = connect(&mut graph, NodeId(1), NodeId(2), 1.0);
    let e2 = connect(&mut graph, NodeId(1), NodeId(3), 2.0);

    let initial_edges: Vec<EdgeId> =
        graph.node(NodeId(1)).unwrap_edge_router().edges().to_vec();
    assert_eq!(initial_edges, vec![e1, e2]);

    let system = graph.system_mut(AsId(0)).unwrap();
    system.replace_by_backbone(NodeId(1)).unwrap();
    assert!(system.node(NodeId(1)).is_backbone_router());
    assert_eq!(system.edge_router_count(), 2);
    assert_eq!(system.backbone_router_count(), 1);

    // the incident edges moved along with the node
    assert_eq!(system.node(NodeId(1)).unwrap_backbone_router().edges(), &initial_edges[..]);

    // converting twice is a no-op
    system.replace_by_backbone(NodeId(1)).unwrap();
    assert_eq!(system.backbone_router_count(), 1);

    system.replace_by_edge(NodeId(1)).unwrap();
    let node = system.node(NodeId(1)).unwrap_edge_router();
    assert_eq!(node.id(), NodeId(1));
    assert_eq!(node.as_id(), AsId(0));
    assert_eq!(node.edges(), &initial_edges[..]);
    assert_eq!(system.edge_router_count(), 3);
    assert_eq!(system.backbone_router_count(), 0);
}

#[test]
fn test_conversion_wrong_system() {
    let mut graph = Graph::new();
    graph.create_edge_router(NodeId(1), AsId(0)).unwrap();
    graph.create_edge_router(NodeId(2), AsId(1)).unwrap();

    let system = graph.system_mut(AsId(1)).unwrap();
    assert_eq!(
        system.replace_by_backbone(NodeId(1)).unwrap_err(),
        GraphError::NodeNotInSystem(NodeId(1), AsId(1))
    );
}

#[test]
fn test_replace_by_edge_device() {
    let mut graph = Graph::new();
    graph.create_edge_router(NodeId(1), AsId(0)).unwrap();
    graph.create_edge_router(NodeId(2), AsId(0)).unwrap();
    connect(&mut graph, NodeId(1), NodeId(2), 1.0);

    let binding = EmulationBinding::device(String::from("10.0.0.1"), device_type(2, 1.0));
    let system = graph.system_mut(AsId(0)).unwrap();
    system.replace_by_edge_device(NodeId(2), binding.clone()).unwrap();

    let device = system.node(NodeId(2)).unwrap_edge_device();
    assert_eq!(device.emulation(), Some(&binding));
    assert_eq!(device.degree(), 1);
}

#[test]
fn test_device_count() {
    let mut graph = Graph::new();
    graph.create_edge_router(NodeId(1), AsId(0)).unwrap();
    attach_devices(&mut graph, NodeId(1), AsId(0), 2, 3);
    attach_devices(&mut graph, NodeId(1), AsId(0), 1, 1);

    let system = graph.system(AsId(0)).unwrap();
    let router = system.node(NodeId(1)).unwrap_edge_router();
    assert_eq!(system.device_count(router, graph.edge_map()), 7);
    assert_eq!(graph.edge_device_count(), 3);
}

#[test]
fn test_fresh_ids() {
    let mut graph = Graph::new();
    graph.create_edge_router(NodeId(10), AsId(0)).unwrap();
    assert_eq!(graph.next_free_node_id(), NodeId(11));
    graph.create_edge_router(NodeId(5), AsId(0)).unwrap();
    assert_eq!(graph.next_free_node_id(), NodeId(11));
    connect(&mut graph, NodeId(10), NodeId(5), 1.0);
    assert_eq!(graph.next_free_edge_id(), EdgeId(1));
}
