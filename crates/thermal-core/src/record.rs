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

//! Measurement records and the sink contract that persists them.

use std::fmt::{self, Display};

use chrono::{DateTime, Local};

use crate::error::ThermalResult;

/// The `strftime` pattern used for the `datetime` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// The kind of observation a [`Reading`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseTag {
    /// A tick taken during a randomized stress or rest episode.
    Stress,
    /// A tick taken while load is active and the maximum is tracked.
    Warmup,
    /// A tick taken while idle and the minimum is tracked.
    Cooldown,
    /// The converged minimum of a cooldown phase.
    Min,
    /// The converged maximum of a warmup phase.
    Max,
}

impl PhaseTag {
    /// Returns the tag as written in the `obs_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseTag::Stress => "stress",
            PhaseTag::Warmup => "warmup",
            PhaseTag::Cooldown => "cooldown",
            PhaseTag::Min => "min",
            PhaseTag::Max => "max",
        }
    }

    /// Returns `true` for the per-phase summary tags (`min` / `max`).
    pub fn is_summary(&self) -> bool {
        matches!(self, PhaseTag::Min | PhaseTag::Max)
    }
}

impl Display for PhaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single immutable measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Local wall-clock time the reading was taken.
    pub timestamp: DateTime<Local>,
    /// CPU utilization in percent. `None` on summary rows.
    pub utilization_percent: Option<f64>,
    /// CPU temperature in degrees Celsius.
    pub temperature: f64,
    /// What kind of observation this is.
    pub phase: PhaseTag,
    /// The load intensity active when the reading was taken.
    pub load_level: u32,
}

impl Reading {
    /// Creates a tick reading stamped with the current time.
    pub fn sample(phase: PhaseTag, load_level: u32, utilization_percent: f64, temperature: f64) -> Self {
        Self {
            timestamp: Local::now(),
            utilization_percent: Some(utilization_percent),
            temperature,
            phase,
            load_level,
        }
    }

    /// Creates a summary reading (no utilization) stamped with the current time.
    pub fn summary(phase: PhaseTag, load_level: u32, temperature: f64) -> Self {
        Self {
            timestamp: Local::now(),
            utilization_percent: None,
            temperature,
            phase,
            load_level,
        }
    }

    /// Returns the timestamp formatted with [`TIMESTAMP_FORMAT`].
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// The column layout of an output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordSchema {
    /// `datetime,usage,temp,stress`
    #[default]
    Randomized,
    /// `datetime,usage,temp,stress,load`, the revision that repeats the load
    /// level as an informational column.
    RandomizedWithLoad,
    /// `datetime,obs_type,usage,temp`
    MinMax,
}

impl RecordSchema {
    /// Returns the header columns for this schema.
    pub fn header(&self) -> &'static [&'static str] {
        match self {
            RecordSchema::Randomized => &["datetime", "usage", "temp", "stress"],
            RecordSchema::RandomizedWithLoad => &["datetime", "usage", "temp", "stress", "load"],
            RecordSchema::MinMax => &["datetime", "obs_type", "usage", "temp"],
        }
    }

    /// Returns the header as one comma-separated line (no line terminator).
    pub fn header_line(&self) -> String {
        self.header().join(",")
    }

    /// Renders a reading as the fields of one row, in header order.
    pub fn fields(&self, reading: &Reading) -> Vec<String> {
        let usage = reading
            .utilization_percent
            .map(|u| format!("{u:.1}"))
            .unwrap_or_default();
        let temp = reading.temperature.to_string();
        let datetime = reading.formatted_timestamp();

        match self {
            RecordSchema::Randomized => {
                vec![datetime, usage, temp, reading.load_level.to_string()]
            }
            RecordSchema::RandomizedWithLoad => vec![
                datetime,
                usage,
                temp,
                reading.load_level.to_string(),
                reading.load_level.to_string(),
            ],
            RecordSchema::MinMax => vec![datetime, reading.phase.to_string(), usage, temp],
        }
    }

    /// Renders a reading as one comma-separated line (no line terminator).
    pub fn row_line(&self, reading: &Reading) -> String {
        self.fields(reading).join(",")
    }
}

/// An append-only destination for readings.
///
/// Every successful `append` must be durable on its own: the session can be
/// interrupted at any tick and the rows already written must stay valid.
pub trait RecordSink {
    /// Appends one reading.
    fn append(&mut self, reading: &Reading) -> ThermalResult<()>;
}
