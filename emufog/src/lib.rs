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

#![deny(missing_docs)]

//! # EmuFog: Emulating Fog Computing Infrastructures
//!
//! This is a library for transforming real-world network topologies into emulation plans for
//! fog computing experiments. Starting from a flat router topology (as produced by the BRITE
//! generator, or measured by CAIDA), the transformation classifies every router as either an
//! edge or a backbone router, attaches emulated end-user devices to the network edge, and picks
//! a cost-minimal set of routers that host fog containers, such that every device reaches a fog
//! node within a configured latency threshold. The resulting plan is written as an experiment
//! file for the MaxiNet emulator, which materialises every emulated node as a Docker container.
//!
//! ## Structure
//!
//! This library is structured in the following way:
//!
//! - **[`Graph`](graph)**: The topology model. The graph owns its
//!   [`AutonomousSystems`](graph::AutonomousSystem), each of which owns its nodes, split by
//!   variant into edge routers, backbone routers and edge devices. Edges live in a central
//!   arena and refer to their endpoints by id. See the main structure [`Graph`](graph::Graph).
//!
//! - **[`Backbone`](backbone)**: The three step backbone classification. Both endpoints of
//!   every cross-AS link, every router with a sufficiently high degree, and every router on a
//!   path connecting two backbone routers within an AS are promoted to the backbone.
//!
//! - **[`Device`](device)**: The device placement, attaching the configured device containers
//!   to the edge routers of the classified graph.
//!
//! - **[`Fog`](fog)**: The fog node placement. For every AS independently, a greedy covering
//!   algorithm picks the routers hosting fog containers, minimising the deployment cost per
//!   served device, bounded by a global fog node budget.
//!
//! - **[`Reader`](reader)**: Parsers building the graph from the BRITE and CAIDA file formats.
//!
//! - **[`Export`](export)**: The MaxiNet experiment file writer.
//!
//! - **[`Settings`](settings)**: The YAML configuration of a run.
//!
//! ## Usage
//!
//! ```no_run
//! use emufog::reader::{read_topology, InputFormat};
//! use emufog::settings::Settings;
//!
//! fn main() -> Result<(), emufog::Error> {
//!     let settings = Settings::from_file("config.yaml")?;
//!     let mut graph = read_topology(InputFormat::Brite, &["topology.brite".into()])?;
//!
//!     let result = emufog::transform(&mut graph, &settings)?;
//!     emufog::export::write_experiment_file(&graph, &result, &settings, "output.py")?;
//!
//!     std::process::exit(if result.is_success() { 0 } else { 2 });
//! }
//! ```

// test modules
mod test;

pub mod backbone;
pub mod container;
pub mod device;
pub mod export;
pub mod fog;
pub mod graph;
pub mod reader;
pub mod settings;

mod error;
mod pipeline;
mod util;

pub use error::Error;
pub use pipeline::transform;
