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

//! The session deadline.

use std::time::{Duration, Instant};

use thermal_core::{ThermalError, ThermalResult};

/// A single deadline, fixed for the lifetime of one controller run.
#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    deadline: Instant,
}

impl SessionClock {
    /// Starts a clock that expires `duration` from now.
    ///
    /// Fails if the deadline cannot be represented on this platform.
    pub fn starting_now(duration: Duration) -> ThermalResult<Self> {
        Instant::now()
            .checked_add(duration)
            .map(Self::until)
            .ok_or_else(|| {
                ThermalError::InvalidConfig(format!(
                    "session duration of {}s is out of range",
                    duration.as_secs()
                ))
            })
    }

    /// Creates a clock with an explicit deadline.
    pub fn until(deadline: Instant) -> Self {
        Self { deadline }
    }

    /// Returns the deadline.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Returns `true` once the deadline has been reached.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Returns the time left before the deadline (zero once expired).
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }
}
