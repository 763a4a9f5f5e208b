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

//! # Topology readers
//!
//! This module reads a [`Graph`] from the files of the supported Internet topology corpora.
//! Malformed records are counted per kind, logged, and skipped; only violations of the graph
//! integrity (duplicate ids) abort the read.

mod brite;
mod caida;

pub use brite::BriteReader;
pub use caida::{CaidaReader, LatencyCalculator};

use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::graph::{Graph, GraphError};

/// Input Reader Errors
#[derive(Debug, Error)]
pub enum ReadError {
    /// An I/O error while reading an input file
    #[error("Cannot read the input file: {0}")]
    Io(#[from] std::io::Error),
    /// No input files were given
    #[error("No files given to read in")]
    NoFiles,
    /// The reader supports exactly one input file
    #[error("The BRITE reader only supports one input file")]
    SingleFileExpected,
    /// A required input file is missing
    #[error("The given files do not contain a {0} file")]
    MissingFileSuffix(&'static str),
    /// A graph integrity violation while building the topology
    #[error("Graph Error: {0}")]
    Graph(#[from] GraphError),
    /// The requested input format is not known
    #[error("Unknown input format: {0}")]
    UnknownFormat(String),
}

/// The supported input topology formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// The BRITE topology generator output format
    Brite,
    /// The CAIDA macroscopic topology measurements
    Caida,
}

impl FromStr for InputFormat {
    type Err = ReadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "brite" => Ok(Self::Brite),
            "caida" => Ok(Self::Caida),
            _ => Err(ReadError::UnknownFormat(s.to_string())),
        }
    }
}

/// Interface of all topology readers.
pub trait TopologyReader {
    /// Read a graph from the given input files.
    fn read(&self, files: &[PathBuf]) -> Result<Graph, ReadError>;
}

/// Read a topology in the given format.
pub fn read_topology(format: InputFormat, files: &[PathBuf]) -> Result<Graph, ReadError> {
    if files.is_empty() {
        return Err(ReadError::NoFiles);
    }
    match format {
        InputFormat::Brite => BriteReader::new().read(files),
        InputFormat::Caida => CaidaReader::default().read(files),
    }
}

/// Returns the path of the file matching the given file extension at the end.
fn file_with_ending<'a>(files: &'a [PathBuf], ending: &str) -> Option<&'a Path> {
    files.iter().find(|f| f.to_string_lossy().ends_with(ending)).map(|f| f.as_path())
}
