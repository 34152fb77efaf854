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

//! # Thermal Control
//!
//! The adaptive load-and-converge controller. It drives a [`LoadGenerator`]
//! through randomized or directed load profiles, samples telemetry on a fixed
//! cadence while load is active, and detects when a measured extremum has
//! stabilized.
//!
//! [`LoadGenerator`]: thermal_core::LoadGenerator

#![warn(missing_docs)]

pub mod clock;
pub mod config;
pub mod controller;
pub mod convergence;
pub mod sampler;
pub mod scheduler;

pub use clock::SessionClock;
pub use config::{MinMaxSettings, RandomizedSettings, SessionConfig, SessionMode};
pub use controller::{MinMaxState, PhaseExtremum, SessionReport, ThermalController};
pub use convergence::{ConvergenceDetector, ExtremumKind, ExtremumSeries};
pub use sampler::{EpisodeSummary, Sampler};
pub use scheduler::{LoadScheduler, MAX_EPISODE_SECONDS, MIN_EPISODE_SECONDS};
