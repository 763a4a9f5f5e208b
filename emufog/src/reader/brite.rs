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

//! Reads a graph from the BRITE file format, as specified in the documentation
//! (<https://www.cs.bu.edu/brite/user_manual/node29.html>).

use std::fs::read_to_string;
use std::path::PathBuf;

use log::*;

use crate::graph::{AsId, EdgeId, Graph, NodeId};
use crate::reader::{ReadError, TopologyReader};

/// Reader for the output files of the BRITE topology generator.
///
/// A BRITE file contains a `Nodes:` and an `Edges:` section. Node lines are tab-separated with
/// at least 7 columns, carrying the node id in the first and the AS id in the sixth column.
/// Edge lines have at least 9 columns: the edge id, both endpoints, the length, the delay and
/// the bandwidth. Lines that do not match are skipped and counted.
#[derive(Debug, Default)]
pub struct BriteReader {}

impl BriteReader {
    /// Create a new BRITE format reader.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TopologyReader for BriteReader {
    fn read(&self, files: &[PathBuf]) -> Result<Graph, ReadError> {
        if files.is_empty() {
            return Err(ReadError::NoFiles);
        }
        if files.len() != 1 {
            return Err(ReadError::SingleFileExpected);
        }
        let content = read_to_string(&files[0])?;
        parse(&content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Nodes,
    Edges,
}

/// Parse the content of a BRITE file into a graph.
pub(crate) fn parse(content: &str) -> Result<Graph, ReadError> {
    let mut graph = Graph::new();
    let mut section = Section::None;

    let mut node_lines_skipped = 0usize;
    let mut edge_lines_skipped = 0usize;
    let mut endpoint_not_found = 0usize;

    for line in content.lines() {
        if line.starts_with("Nodes:") {
            section = Section::Nodes;
            continue;
        }
        if line.starts_with("Edges:") {
            section = Section::Edges;
            continue;
        }
        if line.trim().is_empty() {
            section = Section::None;
            continue;
        }

        match section {
            Section::None => {}
            Section::Nodes => {
                if !extract_node(&mut graph, line)? {
                    debug!("Skipping malformed BRITE node line: {}", line);
                    node_lines_skipped += 1;
                }
            }
            Section::Edges => match extract_edge(&mut graph, line)? {
                EdgeLine::Created => {}
                EdgeLine::Malformed => {
                    debug!("Skipping malformed BRITE edge line: {}", line);
                    edge_lines_skipped += 1;
                }
                EdgeLine::EndpointMissing => {
                    debug!("Skipping BRITE edge with unknown endpoint: {}", line);
                    endpoint_not_found += 1;
                }
            },
        }
    }

    debug!("Number of node lines skipped: {}", node_lines_skipped);
    debug!("Number of edge lines skipped: {}", edge_lines_skipped);
    debug!("Number of edges with missing endpoints: {}", endpoint_not_found);
    info!("Read {} nodes and {} edges", graph.node_count(), graph.edge_count());

    Ok(graph)
}

/// Read in a node of the graph. Returns false if the line does not describe a node.
fn extract_node(graph: &mut Graph, line: &str) -> Result<bool, ReadError> {
    let values: Vec<&str> = line.split('\t').collect();
    if values.len() < 7 {
        return Ok(false);
    }
    let id: u32 = match values[0].parse() {
        Ok(id) => id,
        Err(_) => return Ok(false),
    };
    let as_id: u32 = match values[5].parse() {
        Ok(as_id) => as_id,
        Err(_) => return Ok(false),
    };
    graph.create_edge_router(NodeId(id), AsId(as_id))?;
    Ok(true)
}

enum EdgeLine {
    Created,
    Malformed,
    EndpointMissing,
}

/// Read in an edge of the graph. The referenced nodes must already be present.
fn extract_edge(graph: &mut Graph, line: &str) -> Result<EdgeLine, ReadError> {
    let values: Vec<&str> = line.split('\t').collect();
    if values.len() < 9 {
        return Ok(EdgeLine::Malformed);
    }
    let parsed = (
        values[0].parse::<u32>(),
        values[1].parse::<u32>(),
        values[2].parse::<u32>(),
        values[4].parse::<f32>(),
        values[5].parse::<f32>(),
    );
    let (id, from, to, delay, bandwidth) = match parsed {
        (Ok(id), Ok(from), Ok(to), Ok(delay), Ok(bandwidth)) => {
            (id, from, to, delay, bandwidth)
        }
        _ => return Ok(EdgeLine::Malformed),
    };

    if graph.node(NodeId(from)).is_none() || graph.node(NodeId(to)).is_none() {
        return Ok(EdgeLine::EndpointMissing);
    }
    graph.create_edge(EdgeId(id), NodeId(from), NodeId(to), delay, bandwidth)?;
    Ok(EdgeLine::Created)
}
