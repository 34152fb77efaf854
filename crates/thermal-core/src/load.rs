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

//! Contracts for generating CPU load.
//!
//! A [`LoadGenerator`] launches one bounded unit of work per [`LoadEpisode`] and
//! hands back a [`TaskHandle`]. The work runs outside the controller's thread of
//! control. The controller only polls the handle for liveness.

use std::fmt::Debug;
use std::time::{Duration, Instant};

use crate::error::ThermalResult;

/// One bounded span of constant load intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadEpisode {
    /// Number of stressed CPUs. `0` means an idle episode with no load.
    pub intensity: u32,
    /// Length of the episode in whole seconds.
    pub duration_seconds: u64,
}

impl LoadEpisode {
    /// Creates a new episode.
    pub fn new(intensity: u32, duration_seconds: u64) -> Self {
        Self {
            intensity,
            duration_seconds,
        }
    }

    /// Returns `true` if this episode applies no load.
    pub fn is_idle(&self) -> bool {
        self.intensity == 0
    }

    /// Returns the episode length as a [`Duration`].
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_seconds)
    }
}

/// A handle to a load task that was started by a [`LoadGenerator`].
///
/// Implementations that own an external resource (such as a child process)
/// should release it when dropped, so an aborted session leaves nothing behind.
pub trait TaskHandle: Debug {
    /// Returns `true` while the task is still running.
    fn is_running(&mut self) -> ThermalResult<bool>;
}

/// The capability to start bounded load tasks.
pub trait LoadGenerator {
    /// Starts the given episode and returns a handle to poll its liveness.
    ///
    /// Idle episodes (`intensity == 0`) must not apply CPU load; a plain timed
    /// wait such as [`TimedWait`] is the expected task.
    fn start(&mut self, episode: &LoadEpisode) -> ThermalResult<Box<dyn TaskHandle>>;
}

/// An in-process task that is "running" until a deadline passes.
#[derive(Debug, Clone, Copy)]
pub struct TimedWait {
    until: Instant,
}

impl TimedWait {
    /// Creates a wait that runs for `duration` from now.
    pub fn new(duration: Duration) -> Self {
        Self {
            until: Instant::now() + duration,
        }
    }
}

impl TaskHandle for TimedWait {
    fn is_running(&mut self) -> ThermalResult<bool> {
        Ok(Instant::now() < self.until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_episode() {
        assert!(LoadEpisode::new(0, 5).is_idle());
        assert!(!LoadEpisode::new(3, 5).is_idle());
        assert_eq!(LoadEpisode::new(3, 5).duration(), Duration::from_secs(5));
    }

    #[test]
    fn test_timed_wait_expires() {
        let mut wait = TimedWait::new(Duration::ZERO);
        assert!(!wait.is_running().unwrap());

        let mut wait = TimedWait::new(Duration::from_secs(60));
        assert!(wait.is_running().unwrap());
    }
}
