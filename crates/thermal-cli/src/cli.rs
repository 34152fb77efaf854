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

//! Command-line arguments and their translation into a session configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use thermal_control::{MinMaxSettings, RandomizedSettings, SessionConfig, SessionMode};
use thermal_core::{output_file_name, HardwareFlags, RecordSchema};
use thermal_infra::{DEFAULT_STRESS_PROGRAM, DEFAULT_THERMAL_ZONE};

#[derive(Debug, Parser)]
#[command(name = "thermal-envelope")]
#[command(about = "Drive CPU load and record how the board's temperature responds")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run random stress and rest episodes until the duration elapses
    Stress {
        /// Prefix of the output file name
        prefix: String,

        /// Session length in minutes
        #[arg(long, default_value_t = 60)]
        duration: u64,

        /// Highest number of CPUs an episode may stress
        #[arg(long, default_value_t = 4)]
        max_threads: u32,

        /// Also write the stress level as a trailing `load` column
        #[arg(long)]
        load_column: bool,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Alternate cooldown and warmup phases, each until its extremum plateaus
    Minmax {
        /// Prefix of the output file name
        prefix: String,

        /// Session length in minutes
        #[arg(long, default_value_t = 60)]
        duration: u64,

        /// Number of CPUs stressed during warmup
        #[arg(long, default_value_t = 4)]
        threads: u32,

        /// Samples an extremum must hold before it counts as converged
        #[arg(long, default_value_t = 10)]
        wait: u32,

        /// Length of each warmup stress task in seconds (defaults to --wait)
        #[arg(long)]
        task_seconds: Option<u64>,

        #[command(flatten)]
        session: SessionArgs,
    },
}

/// Options shared by both modes.
#[derive(Debug, Args)]
pub struct SessionArgs {
    #[command(flatten)]
    pub hardware: HardwareArgs,

    /// Directory the CSV file is written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Seconds to wait before the first load task starts
    #[arg(long, default_value_t = 10)]
    pub startup_delay: u64,

    /// Interval between two samples in milliseconds
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    pub cadence_ms: u64,

    /// Sysfs file holding the CPU temperature in millidegrees
    #[arg(long, default_value = DEFAULT_THERMAL_ZONE)]
    pub thermal_zone: PathBuf,

    /// Program used to generate CPU load
    #[arg(long, default_value = DEFAULT_STRESS_PROGRAM)]
    pub stress_bin: String,
}

/// The board's enclosure and cooling setup.
#[derive(Debug, Args)]
pub struct HardwareArgs {
    /// The bottom of the case is on
    #[arg(short = 'a', long)]
    pub case_under: bool,
    /// The case frame is on
    #[arg(short = 'b', long)]
    pub case_frame: bool,
    /// The cable-side panel is on
    #[arg(short = 'c', long)]
    pub case_cable: bool,
    /// The GPIO-side panel is on
    #[arg(short = 'd', long)]
    pub case_gpio: bool,
    /// The solid top panel is on
    #[arg(short = 'm', long)]
    pub top_solid: bool,
    /// The top panel with a fan hole is on
    #[arg(short = 'n', long)]
    pub top_hole: bool,
    /// A fan pulls air into the case
    #[arg(short = 'o', long)]
    pub top_intake: bool,
    /// A fan pushes air out of the case
    #[arg(short = 'p', long)]
    pub top_exhaust: bool,
    /// A heatsink sits on the main SoC
    #[arg(short = 'x', long)]
    pub heatsink_main: bool,
    /// A heatsink sits on the secondary SoC
    #[arg(short = 'y', long)]
    pub heatsink_sub: bool,
}

impl HardwareArgs {
    pub fn flags(&self) -> HardwareFlags {
        HardwareFlags {
            case_under: self.case_under,
            case_frame: self.case_frame,
            case_cable: self.case_cable,
            case_gpio: self.case_gpio,
            top_solid: self.top_solid,
            top_hole: self.top_hole,
            top_intake: self.top_intake,
            top_exhaust: self.top_exhaust,
            heatsink_main: self.heatsink_main,
            heatsink_sub: self.heatsink_sub,
        }
    }
}

impl Command {
    pub fn session(&self) -> &SessionArgs {
        match self {
            Command::Stress { session, .. } | Command::Minmax { session, .. } => session,
        }
    }

    /// Builds the controller configuration this command asks for.
    pub fn session_config(&self) -> SessionConfig {
        let (minutes, mode) = match self {
            Command::Stress {
                duration,
                max_threads,
                load_column,
                ..
            } => {
                let schema = if *load_column {
                    RecordSchema::RandomizedWithLoad
                } else {
                    RecordSchema::Randomized
                };
                let settings = RandomizedSettings {
                    max_intensity: *max_threads,
                    schema,
                };
                (*duration, SessionMode::Randomized(settings))
            }
            Command::Minmax {
                duration,
                threads,
                wait,
                task_seconds,
                ..
            } => {
                let mut settings = MinMaxSettings::new(*threads, *wait);
                if let Some(seconds) = task_seconds {
                    settings.task_seconds = *seconds;
                }
                (*duration, SessionMode::MinMax(settings))
            }
        };

        // Out-of-range durations saturate here and are rejected by `validate`.
        let mut config = SessionConfig::new(Duration::from_secs(minutes.saturating_mul(60)), mode);
        config.cadence = Duration::from_millis(self.session().cadence_ms);
        config
    }

    /// Returns the output path, named after the prefix and the hardware flags.
    pub fn output_path(&self) -> PathBuf {
        let session = self.session();
        let flags = session.hardware.flags();
        let name = match self {
            Command::Stress { prefix, .. } => output_file_name(prefix, &flags, None),
            Command::Minmax { prefix, wait, .. } => output_file_name(prefix, &flags, Some(*wait)),
        };
        session.output_dir.join(name)
    }
}
