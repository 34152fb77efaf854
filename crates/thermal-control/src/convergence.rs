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

//! Running-extremum tracking and plateau detection.

/// Which extremum a series tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremumKind {
    /// Running maximum, used while warming up.
    Max,
    /// Running minimum, used while cooling down.
    Min,
}

impl ExtremumKind {
    fn combine(self, previous: f64, value: f64) -> f64 {
        match self {
            ExtremumKind::Max => previous.max(value),
            ExtremumKind::Min => previous.min(value),
        }
    }
}

/// Observations of one phase episode and their running extremum.
///
/// `extrema[i]` is the extremum of `observations[..=i]`, so the two sequences
/// always have the same length and `extrema` is monotonic in the direction of
/// the tracked kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtremumSeries {
    kind: ExtremumKind,
    observations: Vec<f64>,
    extrema: Vec<f64>,
}

impl ExtremumSeries {
    /// Creates an empty series.
    pub fn new(kind: ExtremumKind) -> Self {
        Self {
            kind,
            observations: Vec::new(),
            extrema: Vec::new(),
        }
    }

    /// Returns the tracked extremum kind.
    pub fn kind(&self) -> ExtremumKind {
        self.kind
    }

    /// Returns the raw observations, oldest first.
    pub fn observations(&self) -> &[f64] {
        &self.observations
    }

    /// Returns the running extremum after each observation, oldest first.
    pub fn extrema(&self) -> &[f64] {
        &self.extrema
    }

    /// Returns the number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns `true` if nothing has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Returns the most recent running extremum.
    pub fn current(&self) -> Option<f64> {
        self.extrema.last().copied()
    }

    fn push(&mut self, value: f64) {
        let extremum = match self.extrema.last() {
            Some(&previous) => self.kind.combine(previous, value),
            None => value,
        };
        self.observations.push(value);
        self.extrema.push(extremum);
    }

    fn clear(&mut self) {
        self.observations.clear();
        self.extrema.clear();
    }
}

/// Decides whether a running extremum has plateaued.
///
/// The series is owned exclusively by the detector for one phase episode.
/// Call [`reset`](Self::reset) (or build a new detector) when a new episode starts.
#[derive(Debug, Clone)]
pub struct ConvergenceDetector {
    series: ExtremumSeries,
}

impl ConvergenceDetector {
    /// Creates a detector tracking the given extremum.
    pub fn new(kind: ExtremumKind) -> Self {
        Self {
            series: ExtremumSeries::new(kind),
        }
    }

    /// Records an observation and returns the updated series.
    pub fn observe(&mut self, value: f64) -> &ExtremumSeries {
        self.series.push(value);
        &self.series
    }

    /// Returns `true` if the extremum did not improve over the last `window` samples.
    ///
    /// Compares the running extremum `window` positions from the end with the
    /// latest one. Always `false` while fewer than `window + 1` samples exist,
    /// and for a zero window.
    pub fn is_converged(&self, window: usize) -> bool {
        let extrema = self.series.extrema();
        let len = extrema.len();
        if window == 0 || len <= window {
            return false;
        }
        extrema[len - window] == extrema[len - 1]
    }

    /// Discards the series; the next observation starts a fresh episode.
    pub fn reset(&mut self) {
        self.series.clear();
    }

    /// Returns the current series.
    pub fn series(&self) -> &ExtremumSeries {
        &self.series
    }

    /// Returns the current running extremum, if any sample was observed.
    pub fn extremum(&self) -> Option<f64> {
        self.series.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector_with(kind: ExtremumKind, values: &[f64]) -> ConvergenceDetector {
        let mut detector = ConvergenceDetector::new(kind);
        for &v in values {
            detector.observe(v);
        }
        detector
    }

    #[test]
    fn test_running_max_and_min() {
        let max = detector_with(ExtremumKind::Max, &[20.0, 22.0, 21.0, 25.0, 24.0]);
        assert_eq!(max.series().extrema(), &[20.0, 22.0, 22.0, 25.0, 25.0]);
        assert_eq!(max.extremum(), Some(25.0));

        let min = detector_with(ExtremumKind::Min, &[50.0, 48.0, 49.0, 45.0, 46.0]);
        assert_eq!(min.series().extrema(), &[50.0, 48.0, 48.0, 45.0, 45.0]);
        assert_eq!(min.extremum(), Some(45.0));
    }

    #[test]
    fn test_series_lengths_stay_equal() {
        let mut detector = ConvergenceDetector::new(ExtremumKind::Max);
        for (i, v) in [3.0, 1.0, 4.0, 1.0, 5.0].iter().enumerate() {
            let series = detector.observe(*v);
            assert_eq!(series.len(), i + 1);
            assert_eq!(series.observations().len(), series.extrema().len());
        }
    }

    #[test]
    fn test_extrema_are_monotonic() {
        let values = [41.0, 43.5, 42.0, 47.2, 47.2, 46.0, 48.1, 30.0];
        let max = detector_with(ExtremumKind::Max, &values);
        assert!(max.series().extrema().windows(2).all(|w| w[0] <= w[1]));

        let min = detector_with(ExtremumKind::Min, &values);
        assert!(min.series().extrema().windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_short_series_never_converges() {
        // Even a perfectly flat series needs window + 1 samples.
        for window in 1..8 {
            let flat = vec![42.0; window];
            let detector = detector_with(ExtremumKind::Max, &flat);
            assert!(!detector.is_converged(window), "window {window}");
        }
        let empty = ConvergenceDetector::new(ExtremumKind::Min);
        assert!(!empty.is_converged(1));
    }

    #[test]
    fn test_zero_window_never_converges() {
        let detector = detector_with(ExtremumKind::Max, &[1.0, 1.0, 1.0]);
        assert!(!detector.is_converged(0));
    }

    #[test]
    fn test_plateau_detection() {
        // Extrema: [20, 22, 25, 25, 25, 25, 25]
        let values = [20.0, 22.0, 25.0, 25.0, 25.0, 25.0, 25.0];
        let mut detector = ConvergenceDetector::new(ExtremumKind::Max);
        let mut verdicts = Vec::new();
        for &v in &values {
            detector.observe(v);
            verdicts.push(detector.is_converged(5));
        }
        // Only the full prefix has the last five extrema all equal to 25.
        assert_eq!(
            verdicts,
            vec![false, false, false, false, false, false, true]
        );
    }

    #[test]
    fn test_improvement_breaks_plateau() {
        let mut detector = detector_with(ExtremumKind::Max, &[30.0, 30.0, 30.0, 30.0]);
        assert!(detector.is_converged(3));
        detector.observe(31.0);
        assert!(!detector.is_converged(3));
    }

    #[test]
    fn test_reset_starts_fresh_episode() {
        let mut detector = detector_with(ExtremumKind::Min, &[40.0, 39.0, 39.0, 39.0]);
        assert!(detector.is_converged(2));

        detector.reset();
        assert!(detector.series().is_empty());
        assert_eq!(detector.extremum(), None);
        assert!(!detector.is_converged(2));

        detector.observe(45.0);
        assert_eq!(detector.extremum(), Some(45.0));
    }
}
