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

//! Scripted collaborators for controller scenarios.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use thermal_core::{
    LoadEpisode, LoadGenerator, Reading, RecordSink, TaskHandle, TelemetrySource, ThermalError,
    ThermalResult,
};

/// Replays a temperature script, then repeats its last value.
pub struct ScriptedTelemetry {
    temperatures: VecDeque<f64>,
    last: f64,
    read_delay: Duration,
    pub reads: usize,
}

impl ScriptedTelemetry {
    pub fn new(script: &[f64]) -> Self {
        Self {
            temperatures: script.iter().copied().collect(),
            last: script.last().copied().unwrap_or(0.0),
            read_delay: Duration::ZERO,
            reads: 0,
        }
    }

    pub fn constant(temperature: f64) -> Self {
        Self::new(&[temperature])
    }

    /// Makes every temperature read block for `delay`.
    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = delay;
        self
    }
}

impl TelemetrySource for ScriptedTelemetry {
    fn current_temperature(&mut self) -> ThermalResult<f64> {
        if !self.read_delay.is_zero() {
            thread::sleep(self.read_delay);
        }
        self.reads += 1;
        if let Some(t) = self.temperatures.pop_front() {
            self.last = t;
        }
        Ok(self.last)
    }

    fn current_utilization(&mut self) -> ThermalResult<f64> {
        Ok(25.0)
    }
}

/// A task that reports "running" for a fixed number of polls.
#[derive(Debug)]
pub struct PolledTask {
    remaining: usize,
}

impl TaskHandle for PolledTask {
    fn is_running(&mut self) -> ThermalResult<bool> {
        if self.remaining == 0 {
            return Ok(false);
        }
        self.remaining -= 1;
        Ok(true)
    }
}

/// Simulates one tick per second of episode duration and records every start.
#[derive(Default)]
pub struct SimulatedLoad {
    pub started: Vec<LoadEpisode>,
    pub fail_on_start: bool,
}

impl SimulatedLoad {
    pub fn failing() -> Self {
        Self {
            started: Vec::new(),
            fail_on_start: true,
        }
    }
}

impl LoadGenerator for SimulatedLoad {
    fn start(&mut self, episode: &LoadEpisode) -> ThermalResult<Box<dyn TaskHandle>> {
        if self.fail_on_start {
            return Err(ThermalError::load(
                episode.intensity,
                std::io::Error::new(std::io::ErrorKind::NotFound, "stress: command not found"),
            ));
        }
        self.started.push(*episode);
        Ok(Box::new(PolledTask {
            remaining: episode.duration_seconds as usize,
        }))
    }
}

/// Keeps every appended reading in memory.
#[derive(Default)]
pub struct MemorySink {
    pub readings: Vec<Reading>,
    pub fail_after: Option<usize>,
}

impl RecordSink for MemorySink {
    fn append(&mut self, reading: &Reading) -> ThermalResult<()> {
        if self.fail_after.is_some_and(|limit| self.readings.len() >= limit) {
            return Err(ThermalError::Sink(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )));
        }
        self.readings.push(reading.clone());
        Ok(())
    }
}
