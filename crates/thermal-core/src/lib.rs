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

//! # Thermal Core
//!
//! Foundational crate containing the contracts, record types, and errors shared
//! by the thermal characterization workspace.
//!
//! This crate defines the abstract "what" of a session: what a reading is, how
//! telemetry and load are requested, and where records go. `thermal-control`
//! drives these contracts and `thermal-infra` provides concrete implementations
//! for real hardware.

#![warn(missing_docs)]

pub mod error;
pub mod flags;
pub mod load;
pub mod record;
pub mod telemetry;

pub use error::{ThermalError, ThermalResult};
pub use flags::{output_file_name, HardwareFlags, FLAG_LABELS};
pub use load::{LoadEpisode, LoadGenerator, TaskHandle, TimedWait};
pub use record::{PhaseTag, Reading, RecordSchema, RecordSink, TIMESTAMP_FORMAT};
pub use telemetry::TelemetrySource;
