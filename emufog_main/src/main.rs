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

use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use log::*;

use emufog::export::write_experiment_file;
use emufog::fog::PlacementStatus;
use emufog::reader::{read_topology, InputFormat};
use emufog::settings::Settings;

/// This is the binary to run the EmuFog transformation. It reads in a network topology,
/// classifies the backbone, places the emulated devices and the fog nodes according to the
/// configuration, and writes the resulting MaxiNet experiment file.
#[derive(Parser, Debug)]
#[clap(name = "emufog", author = "Tibor Schneider")]
struct Arguments {
    /// config file to use
    #[clap(short = 'c', long = "config")]
    config: PathBuf,
    /// input format to read in
    #[clap(short = 't', long = "type")]
    input_type: String,
    /// path to the output file
    #[clap(short = 'o', long = "output", default_value = "output.py")]
    output: PathBuf,
    /// files to read in
    #[clap(short = 'f', long = "file", required = true)]
    files: Vec<PathBuf>,
}

fn main() {
    pretty_env_logger::init();
    let args = Arguments::parse();

    exit(match run(args) {
        Ok(PlacementStatus::Success) => 0,
        Ok(PlacementStatus::Failure) => {
            error!("The fog node budget was exhausted before all devices were covered");
            2
        }
        Err(e) => {
            error!("{}", e);
            1
        }
    })
}

fn run(args: Arguments) -> Result<PlacementStatus, emufog::Error> {
    let settings = Settings::from_file(&args.config)?;
    let format: InputFormat = args.input_type.parse().map_err(emufog::Error::from)?;

    let mut graph = read_topology(format, &args.files)?;
    let result = emufog::transform(&mut graph, &settings)?;
    write_experiment_file(&graph, &result, &settings, &args.output)?;

    Ok(result.status)
}
