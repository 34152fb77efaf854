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

//! Operator-facing console output, kept apart from the log stream.

use std::path::Path;
use std::thread;
use std::time::Duration;

use thermal_control::{SessionConfig, SessionMode, SessionReport};
use thermal_core::{HardwareFlags, PhaseTag};
use thermal_infra::SinkOpening;

// ANSI color codes
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const BLUE: &str = "\x1b[34m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

// Visual symbols
pub const CHECK: &str = "✓";
pub const CROSS: &str = "✗";
pub const THERMOMETER: &str = "🌡";

pub const BANNER: &str = concat!(
    "\x1b[1m",
    "\x1b[36m", // BOLD, CYAN
    "╔═══════════════════════════════════════════════════════════╗\n",
    "║                  ",
    "🌡",
    "  THERMAL ENVELOPE                     ║\n",
    "║              Adaptive load-and-converge runs              ║\n",
    "╚═══════════════════════════════════════════════════════════╝",
    "\x1b[0m" // RESET
);

pub fn print_banner() {
    println!("{}", BANNER);
}

pub fn print_startup(path: &Path, opening: SinkOpening, flags: &HardwareFlags, config: &SessionConfig) {
    match opening {
        SinkOpening::Created => println!(
            "{}[Startup]{} Writing to new file {}{}{}",
            BOLD,
            RESET,
            CYAN,
            path.display(),
            RESET
        ),
        SinkOpening::Appended => println!(
            "{}{}[Startup]{} File {} exists, new rows will be appended",
            BOLD,
            YELLOW,
            RESET,
            path.display()
        ),
    }
    println!(
        "{}[Startup]{} Active hardware flags: {}",
        BOLD,
        RESET,
        flags.summary()
    );
    println!("{}[Startup]{} {}", BOLD, RESET, describe_mode(config));
    println!(
        "{}{}[Startup]{} Press Ctrl+C now if this is not what you meant to run",
        BOLD, YELLOW, RESET
    );
}

fn describe_mode(config: &SessionConfig) -> String {
    let minutes = config.duration.as_secs() / 60;
    match config.mode {
        SessionMode::Randomized(settings) => format!(
            "Randomized stress for {} min, up to {} cpus",
            minutes, settings.max_intensity
        ),
        SessionMode::MinMax(settings) => format!(
            "Min/max for {} min, {} cpus, wait window {} samples",
            minutes, settings.intensity, settings.wait_window
        ),
    }
}

/// Counts down the confirmation delay, one line per second.
pub fn countdown(delay: Duration) {
    let seconds = delay.as_secs();
    for remaining in (1..=seconds).rev() {
        println!("{}[Startup]{} Starting in {}s ...", BOLD, RESET, remaining);
        thread::sleep(Duration::from_secs(1));
    }
}

pub fn print_report(report: &SessionReport, rows_written: usize) {
    println!(
        "\n{}{}━━━ {} Session report {}━━━{}",
        BOLD, BLUE, THERMOMETER, THERMOMETER, RESET
    );
    println!(
        "{} load tasks, {} samples, {} rows written",
        report.episodes, report.samples, rows_written
    );
    for extremum in &report.extrema {
        let color = match extremum.tag {
            PhaseTag::Max => RED,
            _ => CYAN,
        };
        println!(
            "  {}{:>3}{} {}C after {} samples",
            color, extremum.tag, RESET, extremum.temperature, extremum.samples
        );
    }
    print_success("Done!");
}

pub fn print_success(message: &str) {
    println!("{}{} {} {}{}", BOLD, GREEN, CHECK, message, RESET);
}

pub fn print_error(message: &str) {
    eprintln!("{}{} {} {}{}", BOLD, RED, CROSS, message, RESET);
}

#[cfg(test)]
mod tests {
    use super::*;
    use thermal_control::{MinMaxSettings, RandomizedSettings};

    #[test]
    fn test_describe_mode() {
        let randomized = SessionConfig::new(
            Duration::from_secs(30 * 60),
            SessionMode::Randomized(RandomizedSettings::default()),
        );
        assert_eq!(
            describe_mode(&randomized),
            "Randomized stress for 30 min, up to 4 cpus"
        );

        let min_max = SessionConfig::new(
            Duration::from_secs(3600),
            SessionMode::MinMax(MinMaxSettings::new(2, 15)),
        );
        assert_eq!(
            describe_mode(&min_max),
            "Min/max for 60 min, 2 cpus, wait window 15 samples"
        );
    }

    #[test]
    fn test_zero_countdown_returns_immediately() {
        countdown(Duration::ZERO);
    }
}
