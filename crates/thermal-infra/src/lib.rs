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

//! Concrete implementations of the session collaborators.
//!
//! - [`HostTelemetry`] reads the CPU temperature from a sysfs thermal zone (or
//!   the `sysinfo` component list) and the CPU utilization from `sysinfo`.
//! - [`ProcessLoadGenerator`] runs the `stress` utility for loaded episodes and
//!   an in-process timed wait for idle ones.
//! - [`CsvRecordSink`] appends rows to a CSV file, writing the header only when
//!   it creates the file.

pub mod csv_sink;
pub mod process;
pub mod telemetry;

pub use csv_sink::{CsvRecordSink, SinkOpening};
pub use process::{ProcessLoadGenerator, ProcessTask, DEFAULT_STRESS_PROGRAM};
pub use telemetry::{HostTelemetry, TemperatureProbe, DEFAULT_THERMAL_ZONE};
