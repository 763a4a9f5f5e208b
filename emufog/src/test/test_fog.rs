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

//! Test the fog node placement.

use crate::fog::place_fog_nodes;
use crate::graph::{AsId, Graph, NodeId};
use crate::test::fixtures::*;

use lazy_static::lazy_static;

lazy_static! {
    /// A cheap container serving up to ten clients.
    static ref SMALL_FOG: crate::container::FogType = fog_type(1.0, 10);
}

/// A single AS with two routers and one device: the device's own router hosts the fog node,
/// since it reaches the device at no cost.
#[test]
fn test_single_device() {
    let mut graph = Graph::new();
    graph.create_edge_router(NodeId(1), AsId(0)).unwrap();
    graph.create_edge_router(NodeId(2), AsId(0)).unwrap();
    connect(&mut graph, NodeId(1), NodeId(2), 5.0);
    attach_devices(&mut graph, NodeId(1), AsId(0), 1, 1);

    let settings = settings(10.0, 1, vec![SMALL_FOG.clone()]);
    let result = place_fog_nodes(&graph, &settings);

    assert!(result.is_success());
    assert_eq!(result.placements.len(), 1);
    assert_eq!(result.placements[0].node, NodeId(1));
    assert_eq!(result.placements[0].as_id, AsId(0));
    assert_eq!(result.placements[0].fog_type, *SMALL_FOG);
}

/// The reachability search never crosses an AS boundary: a router in another AS is no
/// placement candidate, no matter how low the latency towards it is.
#[test]
fn test_no_cross_as_traversal() {
    let mut graph = Graph::new();
    graph.create_edge_router(NodeId(1), AsId(0)).unwrap();
    graph.create_edge_router(NodeId(2), AsId(1)).unwrap();
    connect(&mut graph, NodeId(1), NodeId(2), 0.1);
    attach_devices(&mut graph, NodeId(1), AsId(0), 1, 1);

    let settings = settings(10.0, 5, vec![SMALL_FOG.clone()]);
    let result = place_fog_nodes(&graph, &settings);

    assert!(result.is_success());
    assert_eq!(result.placements.len(), 1);
    assert_eq!(result.placements[0].node, NodeId(1));
    assert_eq!(result.placements[0].as_id, AsId(0));
}

/// A router beyond the cost threshold is never a candidate.
#[test]
fn test_unreachable_router() {
    let mut graph = Graph::new();
    graph.create_edge_router(NodeId(1), AsId(0)).unwrap();
    graph.create_edge_router(NodeId(2), AsId(0)).unwrap();
    connect(&mut graph, NodeId(1), NodeId(2), 100.0);
    attach_devices(&mut graph, NodeId(1), AsId(0), 1, 1);

    let settings = settings(10.0, 5, vec![SMALL_FOG.clone()]);
    let result = place_fog_nodes(&graph, &settings);

    assert!(result.is_success());
    assert_eq!(result.placements.len(), 1);
    assert_eq!(result.placements[0].node, NodeId(1));
}

/// When the budget runs out before all systems are covered, the aggregate is a failure, but
/// the placements made before are kept.
#[test]
fn test_budget_exhaustion() {
    let mut graph = Graph::new();
    graph.create_edge_router(NodeId(1), AsId(0)).unwrap();
    graph.create_edge_router(NodeId(2), AsId(1)).unwrap();
    attach_devices(&mut graph, NodeId(1), AsId(0), 1, 1);
    attach_devices(&mut graph, NodeId(2), AsId(1), 1, 1);

    let settings = settings(10.0, 1, vec![SMALL_FOG.clone()]);
    let result = place_fog_nodes(&graph, &settings);

    assert!(!result.is_success());
    assert_eq!(result.placements.len(), 1);
}

/// Two candidates with identical scores: the smaller node id wins.
#[test]
fn test_tie_break() {
    let mut graph = Graph::new();
    graph.create_edge_router(NodeId(1), AsId(0)).unwrap();
    graph.create_edge_router(NodeId(2), AsId(0)).unwrap();
    connect(&mut graph, NodeId(1), NodeId(2), 3.0);
    attach_devices(&mut graph, NodeId(1), AsId(0), 1, 1);
    attach_devices(&mut graph, NodeId(2), AsId(0), 1, 1);

    // both routers cover both devices at the same average cost
    let settings = settings(10.0, 5, vec![fog_type(1.0, 2)]);
    let result = place_fog_nodes(&graph, &settings);

    assert!(result.is_success());
    assert_eq!(result.placements.len(), 1);
    assert_eq!(result.placements[0].node, NodeId(1));
}

/// All device slots are allocated on success, spilling over to further placements when the
/// container capacity is not sufficient.
#[test]
fn test_full_coverage() {
    let mut graph = Graph::new();
    graph.create_edge_router(NodeId(1), AsId(0)).unwrap();
    graph.create_edge_router(NodeId(2), AsId(0)).unwrap();
    connect(&mut graph, NodeId(1), NodeId(2), 5.0);
    attach_devices(&mut graph, NodeId(1), AsId(0), 3, 1);

    let settings = settings(10.0, 10, vec![fog_type(1.0, 2)]);
    let result = place_fog_nodes(&graph, &settings);

    assert!(result.is_success());
    let placed: Vec<NodeId> = result.placements.iter().map(|p| p.node).collect();
    assert_eq!(placed, vec![NodeId(1), NodeId(2)]);
    let covered: u32 = result.placements.iter().map(|p| p.fog_type.max_clients).sum();
    assert!(covered >= 3);
}

/// The scaling factor of a device weighs into the required capacity: a single device standing
/// for four hosts needs a container serving four clients.
#[test]
fn test_scaled_devices() {
    let mut graph = Graph::new();
    graph.create_edge_router(NodeId(1), AsId(0)).unwrap();
    attach_devices(&mut graph, NodeId(1), AsId(0), 1, 4);

    // the large container serves all four hosts cheaper per connection than the small one
    let settings = settings(10.0, 5, vec![fog_type(1.0, 1), fog_type(2.0, 4)]);
    let result = place_fog_nodes(&graph, &settings);

    assert!(result.is_success());
    assert_eq!(result.placements.len(), 1);
    assert_eq!(result.placements[0].fog_type, fog_type(2.0, 4));
}

/// The cheaper container wins when two types tie on the cost per served connection.
#[test]
fn test_fog_type_cost_tie_break() {
    let mut graph = Graph::new();
    graph.create_edge_router(NodeId(1), AsId(0)).unwrap();
    graph.create_edge_router(NodeId(2), AsId(0)).unwrap();
    connect(&mut graph, NodeId(1), NodeId(2), 1.0);
    attach_devices(&mut graph, NodeId(1), AsId(0), 2, 1);

    // both types cost 2 per connection for the two devices, the second one is cheaper
    let settings = settings(10.0, 5, vec![fog_type(4.0, 8), fog_type(2.0, 1)]);
    let result = place_fog_nodes(&graph, &settings);

    assert!(result.is_success());
    assert_eq!(result.placements.len(), 2);
    for placement in &result.placements {
        assert_eq!(placement.fog_type, fog_type(2.0, 1));
    }
}

/// Placements are ordered by `(as_id, node_id)`, and two runs produce the identical list.
#[test]
fn test_deterministic_placements() {
    let build = || {
        let mut graph = Graph::new();
        for as_id in 0..3 {
            let base = as_id * 10;
            graph.create_edge_router(NodeId(base), AsId(as_id)).unwrap();
            graph.create_edge_router(NodeId(base + 1), AsId(as_id)).unwrap();
            graph.create_edge_router(NodeId(base + 2), AsId(as_id)).unwrap();
            connect(&mut graph, NodeId(base), NodeId(base + 1), 2.0);
            connect(&mut graph, NodeId(base + 1), NodeId(base + 2), 2.0);
            attach_devices(&mut graph, NodeId(base), AsId(as_id), 2, 1);
            attach_devices(&mut graph, NodeId(base + 2), AsId(as_id), 2, 1);
        }
        graph
    };

    let settings = settings(10.0, 20, vec![fog_type(1.0, 2), fog_type(3.0, 8)]);
    let first = place_fog_nodes(&build(), &settings);
    let second = place_fog_nodes(&build(), &settings);

    assert!(first.is_success());
    assert_eq!(first, second);

    let mut sorted = first.placements.clone();
    sorted.sort_by_key(|p| (p.as_id, p.node));
    assert_eq!(first.placements, sorted);
}

/// An AS without any devices needs no fog nodes and consumes no budget.
#[test]
fn test_empty_system() {
    let mut graph = Graph::new();
    graph.create_edge_router(NodeId(1), AsId(0)).unwrap();
    graph.create_edge_router(NodeId(2), AsId(1)).unwrap();
    attach_devices(&mut graph, NodeId(2), AsId(1), 1, 1);

    let settings = settings(10.0, 1, vec![SMALL_FOG.clone()]);
    let result = place_fog_nodes(&graph, &settings);

    assert!(result.is_success());
    assert_eq!(result.placements.len(), 1);
    assert_eq!(result.placements[0].as_id, AsId(1));
}
