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

//! Fixed-cadence sampling while a load episode is active.

use std::thread;
use std::time::Duration;

use thermal_core::{PhaseTag, Reading, RecordSink, TaskHandle, TelemetrySource, ThermalResult};

use crate::convergence::ConvergenceDetector;

/// Outcome of one sampled episode.
#[derive(Debug, Clone, Default)]
pub struct EpisodeSummary {
    /// Number of ticks taken.
    pub sample_count: usize,
    /// The last reading written, if any tick happened.
    pub final_reading: Option<Reading>,
}

/// Drives the sampling loop: sleep one cadence, read telemetry, persist, observe.
///
/// Every tick writes exactly one record before the next sleep; nothing is
/// buffered across ticks.
#[derive(Debug, Clone)]
pub struct Sampler {
    cadence: Duration,
}

impl Sampler {
    /// Creates a sampler that ticks every `cadence`.
    pub fn new(cadence: Duration) -> Self {
        Self { cadence }
    }

    /// Returns the sampling cadence.
    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    /// Samples for as long as `task` reports that it is running.
    ///
    /// Liveness is polled before every tick, so a task that has already
    /// finished yields no sample.
    pub fn run_episode(
        &self,
        task: &mut dyn TaskHandle,
        phase: PhaseTag,
        load_level: u32,
        telemetry: &mut dyn TelemetrySource,
        sink: &mut dyn RecordSink,
        mut detector: Option<&mut ConvergenceDetector>,
    ) -> ThermalResult<EpisodeSummary> {
        let mut summary = EpisodeSummary::default();
        while task.is_running()? {
            let reading = self.tick(phase, load_level, telemetry, sink, detector.as_deref_mut())?;
            summary.sample_count += 1;
            summary.final_reading = Some(reading);
        }
        log::trace!("{:?} task finished after {} ticks", task, summary.sample_count);
        Ok(summary)
    }

    /// Takes exactly `ticks` samples with no load task attached.
    pub fn run_ticks(
        &self,
        ticks: usize,
        phase: PhaseTag,
        load_level: u32,
        telemetry: &mut dyn TelemetrySource,
        sink: &mut dyn RecordSink,
        mut detector: Option<&mut ConvergenceDetector>,
    ) -> ThermalResult<EpisodeSummary> {
        let mut summary = EpisodeSummary::default();
        for _ in 0..ticks {
            let reading = self.tick(phase, load_level, telemetry, sink, detector.as_deref_mut())?;
            summary.sample_count += 1;
            summary.final_reading = Some(reading);
        }
        Ok(summary)
    }

    fn tick(
        &self,
        phase: PhaseTag,
        load_level: u32,
        telemetry: &mut dyn TelemetrySource,
        sink: &mut dyn RecordSink,
        detector: Option<&mut ConvergenceDetector>,
    ) -> ThermalResult<Reading> {
        if !self.cadence.is_zero() {
            thread::sleep(self.cadence);
        }

        let temperature = telemetry.current_temperature()?;
        let utilization = telemetry.current_utilization()?;
        let reading = Reading::sample(phase, load_level, utilization, temperature);

        sink.append(&reading)?;
        if let Some(detector) = detector {
            detector.observe(temperature);
        }

        log::info!(
            "[{}] {}C {} ...",
            reading.formatted_timestamp(),
            temperature,
            phase
        );
        Ok(reading)
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
