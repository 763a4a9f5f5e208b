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

//! Reads the CAIDA macroscopic topology measurements and builds a graph based on that data.

use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::PathBuf;

use log::*;

use crate::graph::{AsId, EdgeId, Graph, NodeId};
use crate::reader::{file_with_ending, ReadError, TopologyReader};

/// Bandwidth assigned to CAIDA links, which carry no bandwidth information, in Mbit/s.
const CAIDA_BANDWIDTH: f32 = 1000.0;

/// Computes the latency of a link from the coordinates of its two endpoints.
pub trait LatencyCalculator: Send + Sync {
    /// Return the latency in milliseconds between the two coordinates.
    fn latency(&self, x1: f32, y1: f32, x2: f32, y2: f32) -> f32;
}

/// The default latency calculator, assigning a constant latency to every link.
#[derive(Debug, Clone, Copy)]
struct ConstantLatency;

impl LatencyCalculator for ConstantLatency {
    fn latency(&self, _x1: f32, _y1: f32, _x2: f32, _y2: f32) -> f32 {
        1.0
    }
}

/// Coordinates of a node, collected from the `.nodes.geo` file.
#[derive(Debug, Clone, Copy)]
struct Coordinates {
    x: f32,
    y: f32,
}

/// Per-kind counters of skipped records, reported after the read.
#[derive(Debug, Default)]
struct SkipCounters {
    id_out_of_range: usize,
    as_out_of_range: usize,
    coordinates_out_of_range: usize,
    no_node_found_for_as: usize,
    no_node_found_for_edge: usize,
    node_lines_skipped: usize,
    as_lines_skipped: usize,
    link_lines_skipped: usize,
}

impl SkipCounters {
    fn log(&self, unassigned_nodes: usize) {
        debug!("ID out of integer range: {}", self.id_out_of_range);
        debug!("AS out of integer range: {}", self.as_out_of_range);
        debug!("Coordinates out of float range: {}", self.coordinates_out_of_range);
        debug!("Number of times no nodes were found to assign an AS: {}", self.no_node_found_for_as);
        debug!("Number of times no nodes were found to build an edge: {}", self.no_node_found_for_edge);
        debug!("Nodes read without an AS: {}", unassigned_nodes);
        debug!("Number of node lines skipped: {}", self.node_lines_skipped);
        debug!("Number of AS lines skipped: {}", self.as_lines_skipped);
        debug!("Number of link lines skipped: {}", self.link_lines_skipped);
    }
}

/// Reader for the CAIDA topology, spread over three files: node coordinates in `.nodes.geo`, AS
/// assignments in `.nodes.as`, and the links in `.links`. Only nodes with both coordinates and
/// an AS assignment become routers of the graph.
pub struct CaidaReader {
    calculator: Box<dyn LatencyCalculator>,
}

impl std::fmt::Debug for CaidaReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaidaReader").finish()
    }
}

impl Default for CaidaReader {
    fn default() -> Self {
        Self::new(Box::new(ConstantLatency))
    }
}

impl CaidaReader {
    /// Create a new CAIDA reader using the given latency calculator for the links.
    pub fn new(calculator: Box<dyn LatencyCalculator>) -> Self {
        Self { calculator }
    }
}

impl TopologyReader for CaidaReader {
    fn read(&self, files: &[PathBuf]) -> Result<Graph, ReadError> {
        let nodes_file =
            file_with_ending(files, ".nodes.geo").ok_or(ReadError::MissingFileSuffix(".nodes.geo"))?;
        let as_file =
            file_with_ending(files, ".nodes.as").ok_or(ReadError::MissingFileSuffix(".nodes.as"))?;
        let link_file =
            file_with_ending(files, ".links").ok_or(ReadError::MissingFileSuffix(".links"))?;

        let mut counters = SkipCounters::default();
        let mut coordinates: HashMap<u32, Coordinates> = HashMap::new();
        let mut router_coordinates: HashMap<u32, Coordinates> = HashMap::new();
        let mut graph = Graph::new();

        // read in the nodes
        for line in read_to_string(nodes_file)?.lines() {
            process_node_line(line, &mut coordinates, &mut counters);
        }

        // read in the AS assignments, creating the routers. Assigned nodes move over to the
        // router coordinate map, so only the unassigned ones remain behind.
        for line in read_to_string(as_file)?.lines() {
            process_as_line(
                &mut graph,
                line,
                &mut coordinates,
                &mut router_coordinates,
                &mut counters,
            )?;
        }

        // read in the links
        for line in read_to_string(link_file)?.lines() {
            process_link_line(
                &mut graph,
                line,
                &router_coordinates,
                &*self.calculator,
                &mut counters,
            )?;
        }

        counters.log(coordinates.len());
        info!("Read {} nodes and {} edges", graph.node_count(), graph.edge_count());

        Ok(graph)
    }
}

/// Parse the id out of a token like `N123`, `N123:` or `N123:<address>`.
fn parse_id(token: &str) -> Option<u32> {
    let token = token.strip_prefix('N')?;
    let end = token.find(':').unwrap_or(token.len());
    token[..end].parse().ok()
}

/// Read in and process a line of the `.nodes.geo` file.
fn process_node_line(
    line: &str,
    coordinates: &mut HashMap<u32, Coordinates>,
    counters: &mut SkipCounters,
) {
    if !line.starts_with("node.geo ") {
        return;
    }

    let values: Vec<&str> = line.split('\t').collect();
    if values.len() < 7 {
        debug!("The number of values in the line doesn't match the expectations of >= 7: {}", line);
        counters.node_lines_skipped += 1;
        return;
    }

    // the first column reads `node.geo N<id>:`
    let id = match values[0].strip_prefix("node.geo ").and_then(parse_id) {
        Some(id) => id,
        None => {
            debug!("Failed to parse the node id of: {}", values[0]);
            counters.id_out_of_range += 1;
            return;
        }
    };

    let (x, y) = match (values[5].parse::<f32>(), values[6].parse::<f32>()) {
        (Ok(x), Ok(y)) => (x, y),
        _ => {
            debug!("Failed to parse coordinates {} and {} to floats.", values[5], values[6]);
            counters.coordinates_out_of_range += 1;
            return;
        }
    };

    coordinates.insert(id, Coordinates { x, y });
}

/// Process a line of the `.nodes.as` file, creating the router identified in it.
fn process_as_line(
    graph: &mut Graph,
    line: &str,
    coordinates: &mut HashMap<u32, Coordinates>,
    router_coordinates: &mut HashMap<u32, Coordinates>,
    counters: &mut SkipCounters,
) -> Result<(), ReadError> {
    if !line.starts_with("node.AS ") {
        return Ok(());
    }

    let values: Vec<&str> = line.split(' ').collect();
    if values.len() < 3 {
        debug!("The number of values in the line doesn't match the expectations of >= 3: {}", line);
        counters.as_lines_skipped += 1;
        return Ok(());
    }

    let id = match parse_id(values[1]) {
        Some(id) => id,
        None => {
            debug!("Failed to parse the id {} to an integer.", values[1]);
            counters.id_out_of_range += 1;
            return Ok(());
        }
    };
    let as_id: u32 = match values[2].parse() {
        Ok(as_id) => as_id,
        Err(_) => {
            debug!("Failed to parse the autonomous system id {} to an integer.", values[2]);
            counters.as_out_of_range += 1;
            return Ok(());
        }
    };

    let position = match coordinates.remove(&id) {
        Some(position) => position,
        None => {
            debug!("No node was found for the id: {}", id);
            counters.no_node_found_for_as += 1;
            return Ok(());
        }
    };

    graph.create_edge_router(NodeId(id), AsId(as_id))?;
    router_coordinates.insert(id, position);
    Ok(())
}

/// Process a line of the `.links` file, creating an edge between each consecutive endpoint pair.
fn process_link_line(
    graph: &mut Graph,
    line: &str,
    router_coordinates: &HashMap<u32, Coordinates>,
    calculator: &dyn LatencyCalculator,
    counters: &mut SkipCounters,
) -> Result<(), ReadError> {
    if !line.starts_with("link ") {
        return Ok(());
    }

    let values: Vec<&str> = line.split(' ').collect();
    if values.len() < 4 {
        debug!("The number of values in the line doesn't match the expectations of >= 4: {}", line);
        counters.link_lines_skipped += 1;
        return Ok(());
    }

    // the second column reads `L<id>:`
    let link_id = match values[1].strip_prefix('L').map(|v| v.trim_end_matches(':')) {
        Some(id_str) => match id_str.parse::<u32>() {
            Ok(id) => id,
            Err(_) => {
                debug!("Failed to parse the link id {} to an integer.", values[1]);
                counters.id_out_of_range += 1;
                return Ok(());
            }
        },
        None => {
            debug!("Failed to parse the link id {} to an integer.", values[1]);
            counters.id_out_of_range += 1;
            return Ok(());
        }
    };

    for (pair, window) in values[3..].windows(2).enumerate() {
        let from = match parse_id(window[0]) {
            Some(id) => id,
            None => {
                debug!("Failed to parse the link's source id {} to an integer.", window[0]);
                counters.id_out_of_range += 1;
                return Ok(());
            }
        };
        let to = match parse_id(window[1]) {
            Some(id) => id,
            None => {
                debug!("Failed to parse the link's destination id {} to an integer.", window[1]);
                counters.id_out_of_range += 1;
                return Ok(());
            }
        };

        if graph.node(NodeId(from)).is_none() || graph.node(NodeId(to)).is_none() {
            debug!("To create a link source and destination must be found.");
            counters.no_node_found_for_edge += 1;
            continue;
        }

        let latency = match (router_coordinates.get(&from), router_coordinates.get(&to)) {
            (Some(a), Some(b)) => calculator.latency(a.x, a.y, b.x, b.y),
            _ => calculator.latency(0.0, 0.0, 0.0, 0.0),
        };

        // a link over more than two endpoints only keeps the file id for its first pair
        let edge_id = if pair == 0 && graph.edge(EdgeId(link_id)).is_none() {
            EdgeId(link_id)
        } else {
            graph.next_free_edge_id()
        };
        graph.create_edge(edge_id, NodeId(from), NodeId(to), latency, CAIDA_BANDWIDTH)?;
    }

    Ok(())
}
