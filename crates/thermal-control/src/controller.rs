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

//! The orchestrating state machine of a thermal session.
//!
//! Two modes are supported:
//!
//! - **Randomized**: bounded load/rest episodes chosen by the [`LoadScheduler`]
//!   until the session deadline. Episodes are time-bounded; no plateau test runs.
//! - **Min/max**: alternating [`MinMaxState::Cooldown`] and
//!   [`MinMaxState::Warmup`] phases, each run until its extremum plateaus. The
//!   deadline is only checked between phases, so a phase in flight always
//!   finishes its own convergence condition.

use thermal_core::{
    LoadEpisode, LoadGenerator, PhaseTag, Reading, RecordSink, TelemetrySource, ThermalError,
    ThermalResult,
};

use crate::clock::SessionClock;
use crate::config::{MinMaxSettings, SessionConfig, SessionMode};
use crate::convergence::{ConvergenceDetector, ExtremumKind};
use crate::sampler::{EpisodeSummary, Sampler};
use crate::scheduler::LoadScheduler;

/// The states of a min/max session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinMaxState {
    /// Idle, tracking the running minimum.
    Cooldown,
    /// Under load, tracking the running maximum.
    Warmup,
    /// The deadline was reached between two phases.
    Done,
}

impl MinMaxState {
    /// Returns the state that follows a completed phase.
    pub fn next(self, deadline_reached: bool) -> Self {
        match self {
            _ if deadline_reached => MinMaxState::Done,
            MinMaxState::Cooldown => MinMaxState::Warmup,
            MinMaxState::Warmup => MinMaxState::Cooldown,
            MinMaxState::Done => MinMaxState::Done,
        }
    }
}

/// A converged extremum emitted at the end of a min/max phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseExtremum {
    /// [`PhaseTag::Min`] or [`PhaseTag::Max`].
    pub tag: PhaseTag,
    /// The converged temperature.
    pub temperature: f64,
    /// Ticks sampled during the phase.
    pub samples: usize,
    /// Load tasks issued during the phase (zero for cooldown).
    pub tasks: usize,
}

/// What a finished session did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
    /// Load episodes or warmup tasks started.
    pub episodes: usize,
    /// Tick records written (summary rows excluded).
    pub samples: usize,
    /// Converged extrema, in the order they were emitted.
    pub extrema: Vec<PhaseExtremum>,
}

impl SessionReport {
    fn record_episode(&mut self, summary: &EpisodeSummary) {
        self.episodes += 1;
        self.samples += summary.sample_count;
    }

    /// Returns the converged minima, in order.
    pub fn minima(&self) -> Vec<f64> {
        self.extrema_for(PhaseTag::Min)
    }

    /// Returns the converged maxima, in order.
    pub fn maxima(&self) -> Vec<f64> {
        self.extrema_for(PhaseTag::Max)
    }

    fn extrema_for(&self, tag: PhaseTag) -> Vec<f64> {
        self.extrema
            .iter()
            .filter(|e| e.tag == tag)
            .map(|e| e.temperature)
            .collect()
    }
}

/// Drives load, sampling, and convergence for one session.
///
/// The controller is single-threaded: it starts at most one load task at a
/// time, sleeps for the sampling cadence, then polls the task's liveness. The
/// task itself runs concurrently outside the controller.
pub struct ThermalController<T, L, S> {
    config: SessionConfig,
    sampler: Sampler,
    telemetry: T,
    load: L,
    sink: S,
}

impl<T, L, S> ThermalController<T, L, S>
where
    T: TelemetrySource,
    L: LoadGenerator,
    S: RecordSink,
{
    /// Creates a controller after validating the configuration.
    ///
    /// An invalid configuration is rejected here, before any load task can start.
    pub fn new(config: SessionConfig, telemetry: T, load: L, sink: S) -> ThermalResult<Self> {
        config.validate()?;
        Ok(Self {
            sampler: Sampler::new(config.cadence),
            config,
            telemetry,
            load,
            sink,
        })
    }

    /// Returns the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the record sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the controller and returns its collaborators.
    pub fn into_parts(self) -> (T, L, S) {
        (self.telemetry, self.load, self.sink)
    }

    /// Runs the configured mode with a deadline starting now.
    pub fn run(&mut self) -> ThermalResult<SessionReport> {
        let clock = SessionClock::starting_now(self.config.duration)?;
        self.run_until(&clock)
    }

    /// Runs the configured mode against an explicit deadline.
    pub fn run_until(&mut self, clock: &SessionClock) -> ThermalResult<SessionReport> {
        match self.config.mode {
            SessionMode::Randomized(settings) => {
                let mut scheduler = LoadScheduler::new(settings.max_intensity)?;
                self.run_randomized(clock, &mut scheduler)
            }
            SessionMode::MinMax(settings) => self.run_min_max(clock, settings),
        }
    }

    /// Runs bounded random episodes until the deadline.
    ///
    /// The deadline is checked before each episode. The first episode is drawn
    /// with a previous intensity of zero, so a session never opens idle.
    pub fn run_randomized(
        &mut self,
        clock: &SessionClock,
        scheduler: &mut LoadScheduler,
    ) -> ThermalResult<SessionReport> {
        let mut report = SessionReport::default();
        let mut previous_intensity = 0;

        while !clock.is_expired() {
            let episode = scheduler.next_episode(previous_intensity);
            previous_intensity = episode.intensity;

            if episode.is_idle() {
                log::info!("sleep {} seconds ...", episode.duration_seconds);
            } else {
                log::info!(
                    "stress {} cpus for {} seconds ...",
                    episode.intensity,
                    episode.duration_seconds
                );
            }

            let mut task = self.load.start(&episode)?;
            let summary = self.sampler.run_episode(
                task.as_mut(),
                PhaseTag::Stress,
                episode.intensity,
                &mut self.telemetry,
                &mut self.sink,
                None,
            )?;
            report.record_episode(&summary);
        }

        log::info!(
            "Randomized session done: {} episodes, {} samples",
            report.episodes,
            report.samples
        );
        Ok(report)
    }

    /// Alternates cooldown and warmup phases until the deadline.
    pub fn run_min_max(
        &mut self,
        clock: &SessionClock,
        settings: MinMaxSettings,
    ) -> ThermalResult<SessionReport> {
        let mut report = SessionReport::default();
        let mut state = if clock.is_expired() {
            MinMaxState::Done
        } else {
            MinMaxState::Cooldown
        };

        while state != MinMaxState::Done {
            let extremum = match state {
                MinMaxState::Cooldown => self.run_cooldown(&settings)?,
                MinMaxState::Warmup => self.run_warmup(&settings)?,
                MinMaxState::Done => break,
            };
            report.episodes += extremum.tasks;
            report.samples += extremum.samples;
            report.extrema.push(extremum);

            let next = state.next(clock.is_expired());
            log::debug!("Phase: {:?} → {:?}", state, next);
            state = next;
        }

        log::info!(
            "Min/max session done: {} minima, {} maxima",
            report.minima().len(),
            report.maxima().len()
        );
        Ok(report)
    }

    /// Samples idle batches of `wait_window` ticks until the minimum plateaus,
    /// then writes the `min` summary row.
    pub fn run_cooldown(&mut self, settings: &MinMaxSettings) -> ThermalResult<PhaseExtremum> {
        let window = settings.wait_window as usize;
        let mut detector = ConvergenceDetector::new(ExtremumKind::Min);
        let mut samples = 0;

        loop {
            log::info!("sleep for {} seconds ...", settings.wait_window);
            let batch = self.sampler.run_ticks(
                window,
                PhaseTag::Cooldown,
                0,
                &mut self.telemetry,
                &mut self.sink,
                Some(&mut detector),
            )?;
            samples += batch.sample_count;

            if detector.is_converged(window) {
                break;
            }
            log::debug!(
                "Cooldown minimum still moving ({:?} after {} samples)",
                detector.extremum(),
                samples
            );
        }

        let minimum = detector.extremum().ok_or(ThermalError::EmptyEpisode {
            phase: PhaseTag::Cooldown,
        })?;
        self.sink.append(&Reading::summary(PhaseTag::Min, 0, minimum))?;
        log::info!("Converged minimum: {}C after {} samples", minimum, samples);

        Ok(PhaseExtremum {
            tag: PhaseTag::Min,
            temperature: minimum,
            samples,
            tasks: 0,
        })
    }

    /// Re-issues a bounded stress task until the maximum plateaus, then writes
    /// the `max` summary row.
    ///
    /// Every failed plateau check restarts the external load task instead of
    /// extending a single continuous one.
    pub fn run_warmup(&mut self, settings: &MinMaxSettings) -> ThermalResult<PhaseExtremum> {
        let window = settings.wait_window as usize;
        let episode = LoadEpisode::new(settings.intensity, settings.task_seconds);
        let mut detector = ConvergenceDetector::new(ExtremumKind::Max);
        let mut samples = 0;
        let mut tasks = 0;

        loop {
            log::info!(
                "stress {} cpus for {} seconds ...",
                episode.intensity,
                episode.duration_seconds
            );
            let mut task = self.load.start(&episode)?;
            tasks += 1;
            let batch = self.sampler.run_episode(
                task.as_mut(),
                PhaseTag::Warmup,
                episode.intensity,
                &mut self.telemetry,
                &mut self.sink,
                Some(&mut detector),
            )?;
            if batch.sample_count == 0 {
                return Err(ThermalError::EmptyEpisode {
                    phase: PhaseTag::Warmup,
                });
            }
            samples += batch.sample_count;

            if detector.is_converged(window) {
                break;
            }
            log::debug!(
                "Warmup maximum still rising ({:?} after {} samples), restarting load",
                detector.extremum(),
                samples
            );
        }

        let maximum = detector.extremum().ok_or(ThermalError::EmptyEpisode {
            phase: PhaseTag::Warmup,
        })?;
        self.sink
            .append(&Reading::summary(PhaseTag::Max, settings.intensity, maximum))?;
        log::info!("Converged maximum: {}C after {} samples", maximum, samples);

        Ok(PhaseExtremum {
            tag: PhaseTag::Max,
            temperature: maximum,
            samples,
            tasks,
        })
    }
}
