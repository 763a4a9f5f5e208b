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

//! Wrapper function running the entire transformation pipeline.

use std::time::Instant;

use log::*;

use crate::backbone::identify_backbone;
use crate::device::place_devices;
use crate::fog::{place_fog_nodes, FogResult};
use crate::graph::Graph;
use crate::settings::Settings;
use crate::util::interval_to_string;
use crate::Error;

/// # Transform a topology into an emulation plan
///
/// This is the main function to interact with the library. It runs the three stages of the
/// transformation in order on the given graph: the backbone classification, the device
/// placement, and the fog node placement. The graph is modified in place by the first two
/// stages; the fog placement only produces the returned [`FogResult`].
///
/// A failed placement (the fog node budget ran out) is not an error: the result carries the
/// failure status along with all placements that were made.
///
/// ## Usage
///
/// ```no_run
/// use emufog::settings::Settings;
/// use emufog::reader::{read_topology, InputFormat};
/// use emufog::transform;
///
/// fn main() -> Result<(), emufog::Error> {
///     let settings = Settings::from_file("config.yaml")?;
///     let mut graph = read_topology(InputFormat::Brite, &["topo.brite".into()])?;
///
///     let result = transform(&mut graph, &settings)?;
///
///     println!("{} fog nodes placed", result.placements.len());
///     Ok(())
/// }
/// ```
pub fn transform(graph: &mut Graph, settings: &Settings) -> Result<FogResult, Error> {
    info!("Transforming a graph with {} nodes and {} edges", graph.node_count(), graph.edge_count());

    let start = Instant::now();
    identify_backbone(graph, settings)?;
    if settings.time_measuring {
        info!("Backbone classification - Time: {}", interval_to_string(start.elapsed()));
    }

    let start = Instant::now();
    place_devices(graph, settings)?;
    if settings.time_measuring {
        info!("Device placement - Time: {}", interval_to_string(start.elapsed()));
    }

    let start = Instant::now();
    let result = place_fog_nodes(graph, settings);
    if settings.time_measuring {
        info!("Fog placement - Time: {}", interval_to_string(start.elapsed()));
    }

    if result.is_success() {
        info!("Finished the transformation");
    } else {
        warn!("Finished the transformation, but the fog placement is incomplete");
    }
    Ok(result)
}
