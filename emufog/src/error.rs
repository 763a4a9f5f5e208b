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

//! Module containing all error types

use crate::export::ExportError;
use crate::graph::GraphError;
use crate::reader::ReadError;
use crate::settings::ConfigError;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// A graph integrity violation, fatal for the run
    #[error("Graph Error: {0}")]
    GraphError(#[from] GraphError),
    /// An error while reading the input topology
    #[error("Reader Error: {0}")]
    ReadError(#[from] ReadError),
    /// An invalid or unreadable configuration, fatal at startup
    #[error("Configuration Error: {0}")]
    ConfigError(#[from] ConfigError),
    /// An error while writing the experiment file
    #[error("Export Error: {0}")]
    ExportError(#[from] ExportError),
}
