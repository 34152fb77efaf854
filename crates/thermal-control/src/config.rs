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

//! Session configuration and validation.

use std::time::Duration;

use thermal_core::{RecordSchema, ThermalError, ThermalResult};

use crate::clock::SessionClock;

/// Settings for randomized stress sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomizedSettings {
    /// Highest number of stressed CPUs an episode may use.
    pub max_intensity: u32,
    /// Column layout of the output stream.
    pub schema: RecordSchema,
}

impl Default for RandomizedSettings {
    fn default() -> Self {
        Self {
            max_intensity: 4,
            schema: RecordSchema::Randomized,
        }
    }
}

/// Settings for alternating min/max sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinMaxSettings {
    /// Number of stressed CPUs during warmup.
    pub intensity: u32,
    /// Number of samples an extremum must hold before it counts as converged.
    pub wait_window: u32,
    /// Length of each re-issued warmup stress task, in seconds.
    pub task_seconds: u64,
}

impl MinMaxSettings {
    /// Creates settings whose warmup task lasts as long as the wait window.
    pub fn new(intensity: u32, wait_window: u32) -> Self {
        Self {
            intensity,
            wait_window,
            task_seconds: u64::from(wait_window),
        }
    }
}

impl Default for MinMaxSettings {
    fn default() -> Self {
        Self::new(4, 10)
    }
}

/// Which controller state machine to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Bounded random load/rest episodes until the deadline.
    Randomized(RandomizedSettings),
    /// Alternating cooldown/warmup phases, each run to convergence.
    MinMax(MinMaxSettings),
}

impl SessionMode {
    /// Returns the record layout this mode writes.
    pub fn schema(&self) -> RecordSchema {
        match self {
            SessionMode::Randomized(settings) => settings.schema,
            SessionMode::MinMax(_) => RecordSchema::MinMax,
        }
    }
}

/// Configuration for one controller run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long the controller keeps issuing new phases or episodes.
    pub duration: Duration,
    /// Interval between two telemetry samples.
    pub cadence: Duration,
    /// The operating mode.
    pub mode: SessionMode,
}

impl SessionConfig {
    /// Creates a configuration with the default one-second cadence.
    pub fn new(duration: Duration, mode: SessionMode) -> Self {
        Self {
            duration,
            cadence: Duration::from_secs(1),
            mode,
        }
    }

    /// Rejects configurations that would make a session undefined.
    pub fn validate(&self) -> ThermalResult<()> {
        SessionClock::starting_now(self.duration)?;

        match self.mode {
            SessionMode::Randomized(settings) => {
                if settings.max_intensity == 0 {
                    return Err(ThermalError::InvalidConfig(
                        "max intensity must be at least 1 for randomized sessions".into(),
                    ));
                }
                if settings.schema == RecordSchema::MinMax {
                    return Err(ThermalError::InvalidConfig(
                        "randomized sessions cannot write the min/max schema".into(),
                    ));
                }
            }
            SessionMode::MinMax(settings) => {
                if settings.intensity == 0 {
                    return Err(ThermalError::InvalidConfig(
                        "warmup intensity must be at least 1".into(),
                    ));
                }
                if settings.wait_window == 0 {
                    return Err(ThermalError::InvalidConfig(
                        "wait window must be at least 1 sample".into(),
                    ));
                }
                if settings.task_seconds == 0 {
                    return Err(ThermalError::InvalidConfig(
                        "warmup task duration must be positive".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(60 * 60),
            SessionMode::Randomized(RandomizedSettings::default()),
        )
    }
}
