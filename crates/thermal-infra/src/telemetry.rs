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

//! Host telemetry backed by sysfs and `sysinfo`.

use std::fs;
use std::path::{Path, PathBuf};

use sysinfo::{Components, System};
use thermal_core::{TelemetrySource, ThermalError, ThermalResult};

/// The thermal zone the board's SoC temperature is exposed on.
pub const DEFAULT_THERMAL_ZONE: &str = "/sys/class/thermal/thermal_zone0/temp";

/// Where the CPU temperature is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemperatureProbe {
    /// A sysfs file holding the temperature in millidegrees Celsius.
    ThermalZone(PathBuf),
    /// The hottest CPU/core sensor reported by `sysinfo`.
    Components,
}

impl TemperatureProbe {
    /// Uses `zone` if it exists, otherwise falls back to the component list.
    pub fn detect(zone: impl Into<PathBuf>) -> Self {
        let zone = zone.into();
        if zone.exists() {
            TemperatureProbe::ThermalZone(zone)
        } else {
            log::warn!(
                "Thermal zone '{}' not found, falling back to sysinfo components",
                zone.display()
            );
            TemperatureProbe::Components
        }
    }
}

/// Telemetry for the machine the session runs on.
pub struct HostTelemetry {
    probe: TemperatureProbe,
    system: System,
}

impl HostTelemetry {
    /// Creates a telemetry source using the given temperature probe.
    pub fn new(probe: TemperatureProbe) -> Self {
        let mut system = System::new();
        // Utilization is measured between refreshes; prime the first one.
        system.refresh_cpu_usage();
        Self { probe, system }
    }

    /// Returns the temperature probe in use.
    pub fn probe(&self) -> &TemperatureProbe {
        &self.probe
    }
}

impl Default for HostTelemetry {
    fn default() -> Self {
        Self::new(TemperatureProbe::detect(DEFAULT_THERMAL_ZONE))
    }
}

impl TelemetrySource for HostTelemetry {
    fn current_temperature(&mut self) -> ThermalResult<f64> {
        match &self.probe {
            TemperatureProbe::ThermalZone(path) => read_thermal_zone(path),
            TemperatureProbe::Components => hottest_cpu_component(),
        }
    }

    fn current_utilization(&mut self) -> ThermalResult<f64> {
        self.system.refresh_cpu_usage();
        Ok(f64::from(self.system.global_cpu_usage()))
    }
}

/// Reads a sysfs thermal zone and converts millidegrees to degrees Celsius.
pub fn read_thermal_zone(path: &Path) -> ThermalResult<f64> {
    let raw = fs::read_to_string(path).map_err(|e| {
        ThermalError::Telemetry(format!("cannot read '{}': {e}", path.display()))
    })?;
    parse_millidegrees(&raw).ok_or_else(|| {
        ThermalError::Telemetry(format!(
            "unexpected content in '{}': {:?}",
            path.display(),
            raw.trim()
        ))
    })
}

fn parse_millidegrees(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().map(|millis| millis / 1000.0)
}

fn hottest_cpu_component() -> ThermalResult<f64> {
    let components = Components::new_with_refreshed_list();
    let mut hottest: Option<f32> = None;

    for component in &components {
        let label = component.label().to_lowercase();
        if label.contains("cpu") || label.contains("core") {
            if let Some(temp) = component.temperature() {
                hottest = Some(hottest.map_or(temp, |h| h.max(temp)));
            }
        }
    }

    hottest
        .map(f64::from)
        .ok_or_else(|| ThermalError::Telemetry("no CPU temperature sensor found".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_millidegrees() {
        assert_eq!(parse_millidegrees("48686\n"), Some(48.686));
        assert_eq!(parse_millidegrees("  51000 "), Some(51.0));
        assert_eq!(parse_millidegrees("hot"), None);
        assert_eq!(parse_millidegrees(""), None);
    }

    #[test]
    fn test_thermal_zone_probe_reads_file() {
        let mut zone = tempfile::NamedTempFile::new().unwrap();
        writeln!(zone, "62300").unwrap();

        let probe = TemperatureProbe::detect(zone.path());
        assert_eq!(probe, TemperatureProbe::ThermalZone(zone.path().to_path_buf()));

        let mut telemetry = HostTelemetry::new(probe);
        assert_eq!(telemetry.current_temperature().unwrap(), 62.3);
    }

    #[test]
    fn test_missing_zone_is_a_telemetry_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("temp");

        assert!(matches!(
            read_thermal_zone(&missing),
            Err(ThermalError::Telemetry(_))
        ));
        assert_eq!(TemperatureProbe::detect(&missing), TemperatureProbe::Components);
    }

    #[test]
    fn test_garbage_zone_is_a_telemetry_error() {
        let mut zone = tempfile::NamedTempFile::new().unwrap();
        write!(zone, "not a number").unwrap();
        assert!(matches!(
            read_thermal_zone(zone.path()),
            Err(ThermalError::Telemetry(_))
        ));
    }

    #[test]
    fn test_utilization_is_always_available() {
        let mut telemetry = HostTelemetry::new(TemperatureProbe::Components);
        assert!(telemetry.current_utilization().is_ok());
        assert!(telemetry.current_utilization().is_ok());
    }
}
