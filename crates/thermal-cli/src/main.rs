// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Thermal envelope sessions for single-board computers
// Run with: thermal-envelope <stress|minmax> <prefix> [options]

mod cli;
mod console;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use thermal_control::ThermalController;
use thermal_infra::{CsvRecordSink, HostTelemetry, ProcessLoadGenerator, SinkOpening, TemperatureProbe};

use crate::cli::Cli;

fn main() {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Cli::parse()) {
        console::print_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.command.session_config();
    config
        .validate()
        .context("Invalid session configuration")?;

    let session = cli.command.session();
    let flags = session.hardware.flags();
    let path = cli.command.output_path();

    console::print_banner();
    console::print_startup(&path, SinkOpening::probe(&path), &flags, &config);
    console::countdown(Duration::from_secs(session.startup_delay));

    let sink = CsvRecordSink::open(&path, config.mode.schema())
        .with_context(|| format!("Failed to open output file '{}'", path.display()))?;
    let telemetry = HostTelemetry::new(TemperatureProbe::detect(session.thermal_zone.clone()));
    let load = ProcessLoadGenerator::new(session.stress_bin.clone());

    let mut controller = ThermalController::new(config, telemetry, load, sink)?;
    let report = controller.run().context("Session aborted")?;

    console::print_report(&report, controller.sink().rows_written());
    Ok(())
}
