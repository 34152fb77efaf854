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

//! Randomized episode selection.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thermal_core::{LoadEpisode, ThermalError, ThermalResult};

/// Shortest episode the duration distribution can produce, in seconds.
pub const MIN_EPISODE_SECONDS: u64 = 3;
/// Longest episode the duration distribution can produce, in seconds.
pub const MAX_EPISODE_SECONDS: u64 = 21;

/// Chooses the next load episode for randomized stress sessions.
///
/// Durations follow `ceil(exp(1 + 2u))` for `u` uniform in `[0, 1)`, a
/// right-skewed spread over 3..=21 seconds that favours short episodes.
/// Intensities are uniform over `0..=max_intensity` minus the previous
/// intensity, so two consecutive episodes never share a load level.
#[derive(Debug, Clone)]
pub struct LoadScheduler {
    max_intensity: u32,
    rng: StdRng,
}

impl LoadScheduler {
    /// Creates a scheduler seeded from the operating system.
    ///
    /// Fails if `max_intensity` is zero: the exclusion rule would leave
    /// nothing to choose from.
    pub fn new(max_intensity: u32) -> ThermalResult<Self> {
        Self::with_rng(max_intensity, StdRng::from_entropy())
    }

    /// Creates a deterministic scheduler from a seed.
    pub fn with_seed(max_intensity: u32, seed: u64) -> ThermalResult<Self> {
        Self::with_rng(max_intensity, StdRng::seed_from_u64(seed))
    }

    fn with_rng(max_intensity: u32, rng: StdRng) -> ThermalResult<Self> {
        if max_intensity == 0 {
            return Err(ThermalError::InvalidConfig(
                "max intensity must be at least 1 for randomized sessions".into(),
            ));
        }
        Ok(Self { max_intensity, rng })
    }

    /// Returns the highest intensity this scheduler can pick.
    pub fn max_intensity(&self) -> u32 {
        self.max_intensity
    }

    /// Draws the next episode, never repeating `previous_intensity`.
    pub fn next_episode(&mut self, previous_intensity: u32) -> LoadEpisode {
        let u: f64 = self.rng.gen();
        let duration_seconds = episode_seconds(u);

        let candidates: Vec<u32> = (0..=self.max_intensity)
            .filter(|&level| level != previous_intensity)
            .collect();
        // `max_intensity >= 1` leaves at least one candidate.
        let intensity = candidates
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(self.max_intensity);

        LoadEpisode::new(intensity, duration_seconds)
    }
}

fn episode_seconds(u: f64) -> u64 {
    let raw = (1.0 + 2.0 * u).exp().ceil() as u64;
    raw.clamp(MIN_EPISODE_SECONDS, MAX_EPISODE_SECONDS)
}
