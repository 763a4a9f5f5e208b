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

//! Test the topology readers.

use crate::graph::{AsId, EdgeId, NodeId};
use crate::reader::{read_topology, InputFormat, ReadError, TopologyReader};

use std::path::PathBuf;

const BRITE_CONTENT: &str = "Topology: ( 4 Nodes, 2 Edges )\n\
    Model (1 - RTWaxman): 4 2 1 2 1 10.0 1024.0\n\
    \n\
    Nodes: (4)\n\
    0\t1.1\t9.4\t3\t3\t0\tRT_NODE\n\
    1\t5.3\t2.2\t2\t2\t0\tRT_NODE\n\
    2\t8.0\t4.7\t3\t3\t1\tRT_NODE\n\
    3\t8.0\t4.7\t3\t3\tx\tRT_NODE\n\
    short\tline\n\
    \n\
    Edges: (2)\n\
    0\t0\t1\t2.8\t5.0\t1024.0\t0\t0\tE_RT\tU\n\
    1\t1\t2\t1.4\t2.5\t512.0\t0\t1\tE_RT\tU\n\
    2\t1\t7\t1.4\t2.5\t512.0\t0\t1\tE_RT\tU\n\
    broken\tedge\tline\n";

#[test]
fn test_brite_parse() {
    let dir = std::env::temp_dir().join("emufog_brite_test");
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("test.brite");
    std::fs::write(&file, BRITE_CONTENT).unwrap();

    let graph = read_topology(InputFormat::Brite, &[file]).unwrap();
    std::fs::remove_dir_all(&dir).ok();

    // node 3 and the short line are skipped, edge to the unknown node 7 is skipped
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);

    assert_eq!(graph.node(NodeId(0)).unwrap_edge_router().as_id(), AsId(0));
    assert_eq!(graph.node(NodeId(2)).unwrap_edge_router().as_id(), AsId(1));

    let edge = graph.edge(EdgeId(0)).unwrap();
    assert_eq!(edge.endpoints(), (NodeId(0), NodeId(1)));
    assert_eq!(edge.latency(), 5.0);
    assert_eq!(edge.bandwidth(), 1024.0);
    assert!(!edge.is_cross_as());
    assert!(graph.edge(EdgeId(1)).unwrap().is_cross_as());
}

#[test]
fn test_brite_single_file() {
    let err = read_topology(InputFormat::Brite, &[PathBuf::from("a"), PathBuf::from("b")])
        .unwrap_err();
    assert!(matches!(err, ReadError::SingleFileExpected));
}

#[test]
fn test_no_files() {
    let err = read_topology(InputFormat::Brite, &[]).unwrap_err();
    assert!(matches!(err, ReadError::NoFiles));
}

#[test]
fn test_input_format() {
    assert_eq!("brite".parse::<InputFormat>().unwrap(), InputFormat::Brite);
    assert_eq!("CAIDA".parse::<InputFormat>().unwrap(), InputFormat::Caida);
    assert!("gml".parse::<InputFormat>().is_err());
}

#[test]
fn test_caida_read() {
    let dir = std::env::temp_dir().join("emufog_caida_test");
    std::fs::create_dir_all(&dir).unwrap();

    let geo = dir.join("test.nodes.geo");
    let as_file = dir.join("test.nodes.as");
    let links = dir.join("test.links");

    std::fs::write(
        &geo,
        "# comment\n\
         node.geo N1:\tDE\tBerlin\tregion\t0\t52.5\t13.4\n\
         node.geo N2:\tDE\tMunich\tregion\t0\t48.1\t11.5\n\
         node.geo N3:\tCH\tZurich\tregion\t0\t47.3\t8.5\n",
    )
    .unwrap();
    std::fs::write(&as_file, "node.AS N1 100\nnode.AS N2 100\nnode.AS N3 200\nnode.AS N9 300\n")
        .unwrap();
    std::fs::write(&links, "link L1: irrelevant N1:52.5 N2:48.1 N3\nlink L2: x N2 N9\n").unwrap();

    let files = vec![geo, as_file, links];
    let graph = crate::reader::CaidaReader::default().read(&files).unwrap();

    // node 9 has no coordinates, the second link references it and is skipped
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.node(NodeId(1)).unwrap_edge_router().as_id(), AsId(100));
    assert_eq!(graph.node(NodeId(3)).unwrap_edge_router().as_id(), AsId(200));

    // the multi point link creates an edge per consecutive endpoint pair
    assert_eq!(graph.edge_count(), 2);
    let edge = graph.edge(EdgeId(1)).unwrap();
    assert_eq!(edge.endpoints(), (NodeId(1), NodeId(2)));
    // the default latency calculator assigns a constant latency
    assert_eq!(edge.latency(), 1.0);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_caida_missing_file() {
    let err = read_topology(
        InputFormat::Caida,
        &[PathBuf::from("test.nodes.geo"), PathBuf::from("test.links")],
    )
    .unwrap_err();
    assert!(matches!(err, ReadError::MissingFileSuffix(".nodes.as")));
}
