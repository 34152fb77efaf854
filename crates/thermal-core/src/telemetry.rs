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

//! Contract for polling the thermal state of the host.

/// A source of instantaneous temperature and CPU utilization.
///
/// Both reads are synchronous and are taken once per sampling tick. Failures
/// are fatal to the session: a missing sample would corrupt the convergence
/// computation, so callers propagate the error instead of skipping the tick.
pub trait TelemetrySource {
    /// Returns the current CPU temperature in degrees Celsius.
    fn current_temperature(&mut self) -> crate::ThermalResult<f64>;

    /// Returns the CPU utilization, in percent, since the previous call.
    fn current_utilization(&mut self) -> crate::ThermalResult<f64>;
}
