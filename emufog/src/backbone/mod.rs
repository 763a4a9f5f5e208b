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

//! # Backbone classification
//!
//! This module decides which routers of the topology are promoted to backbone routers. The
//! algorithm runs in three steps:
//!
//! 1. Both endpoints of every cross-AS edge become backbone routers (sequential).
//! 2. Within each AS, every edge router whose degree reaches the configured fraction of the
//!    average router degree becomes a backbone router (parallel per AS).
//! 3. Within each AS, a BFS over the intra-AS topology promotes the edge routers lying on paths
//!    between backbone routers, so that the backbone of the AS forms a single connected
//!    subgraph (parallel per AS).
//!
//! The AS partitioning is the concurrency boundary: each worker owns exactly one AS at a time
//! and only reads the shared edge arena.

mod worker;

use std::sync::Mutex;
use std::thread;
use std::time::Instant;

use log::*;

use crate::graph::{AsId, Graph, GraphError, NodeId};
use crate::settings::Settings;
use crate::util::{interval_to_string, pool_size};

/// Starts the backbone classification algorithm on the given graph. Modifies the graph,
/// including backbone and edge of the network.
pub fn identify_backbone(graph: &mut Graph, settings: &Settings) -> Result<(), GraphError> {
    debug!("Start backbone classification");

    // 1st step sequentially
    let start = Instant::now();
    mark_cross_as_nodes(graph)?;
    if settings.time_measuring {
        info!("Backbone step 1 - Time: {}", interval_to_string(start.elapsed()));
    }

    // 2nd and 3rd step in parallel, one AS per worker
    let start = Instant::now();
    let result: Result<(), GraphError> = {
        let (systems, edges) = graph.split_systems_mut();
        let n_workers = pool_size(settings.num_threads, systems.len());
        let queue = Mutex::new(systems);

        thread::scope(|s| {
            let handles: Vec<_> = (0..n_workers)
                .map(|_| {
                    s.spawn(|| -> Result<(), GraphError> {
                        loop {
                            let system = queue.lock().unwrap().pop();
                            match system {
                                Some(system) => worker::run(system, edges, settings)?,
                                None => return Ok(()),
                            }
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap()?;
            }
            Ok(())
        })
    };
    result?;
    if settings.time_measuring {
        info!("Backbone steps 2 and 3 - Time: {}", interval_to_string(start.elapsed()));
    }

    let backbone: usize = graph.systems().map(|s| s.backbone_router_count()).sum();
    let edge: usize = graph.systems().map(|s| s.edge_router_count()).sum();
    info!("Finished backbone classification. Backbone size: {}, edge size: {}", backbone, edge);
    Ok(())
}

/// Marks the endpoints of all cross-AS edges as backbone nodes.
fn mark_cross_as_nodes(graph: &mut Graph) -> Result<(), GraphError> {
    let endpoints: Vec<(AsId, NodeId)> = graph
        .edges()
        .filter(|e| e.is_cross_as())
        .flat_map(|e| {
            let (from, to) = e.endpoints();
            let (from_as, to_as) = e.endpoint_systems();
            [(from_as, from), (to_as, to)]
        })
        .collect();

    for (as_id, node) in endpoints {
        graph
            .system_mut(as_id)
            .ok_or(GraphError::SystemNotFound(as_id))?
            .replace_by_backbone(node)?;
    }
    Ok(())
}
