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

//! Defines the error taxonomy for a thermal session.
//!
//! Every variant is fatal to the running session. There is no recoverable class:
//! a gap in telemetry or a lost record would corrupt the thermal history, so the
//! controller aborts instead of degrading.

use crate::record::PhaseTag;

/// A specialized `Result` type for thermal session operations.
pub type ThermalResult<T> = Result<T, ThermalError>;

/// An error that aborts a thermal session.
#[derive(Debug, thiserror::Error)]
pub enum ThermalError {
    /// The session configuration was rejected before any load task started.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The temperature or utilization source could not be read.
    #[error("Telemetry unavailable: {0}")]
    Telemetry(String),

    /// A load task could not be started or polled.
    #[error("Load generator failed at intensity {intensity}: {source}")]
    LoadGenerator {
        /// The intensity of the episode that failed.
        intensity: u32,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A record could not be appended to the sink.
    #[error("Record sink failure: {0}")]
    Sink(#[from] std::io::Error),

    /// A bounded episode ended without producing a single sample.
    #[error("Episode in phase '{phase}' finished without any sample")]
    EmptyEpisode {
        /// The phase the empty episode was tagged with.
        phase: PhaseTag,
    },
}

impl ThermalError {
    /// Wraps an I/O error raised while starting or polling a load task.
    pub fn load(intensity: u32, source: std::io::Error) -> Self {
        ThermalError::LoadGenerator { intensity, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ThermalError::InvalidConfig("max intensity must be at least 1".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: max intensity must be at least 1"
        );

        let err = ThermalError::load(
            4,
            std::io::Error::new(std::io::ErrorKind::NotFound, "stress not found"),
        );
        assert_eq!(
            err.to_string(),
            "Load generator failed at intensity 4: stress not found"
        );

        let err = ThermalError::EmptyEpisode {
            phase: PhaseTag::Warmup,
        };
        assert_eq!(
            err.to_string(),
            "Episode in phase 'warmup' finished without any sample"
        );
    }

    #[test]
    fn test_io_error_converts_to_sink_error() {
        fn fails() -> ThermalResult<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(ThermalError::Sink(_))));
    }
}
