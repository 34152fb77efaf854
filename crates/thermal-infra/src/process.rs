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

//! Load generation through the `stress` command-line utility.

use std::ffi::OsString;
use std::process::{Child, Command, Stdio};

use thermal_core::{
    LoadEpisode, LoadGenerator, TaskHandle, ThermalError, ThermalResult, TimedWait,
};

/// The program spawned for loaded episodes unless configured otherwise.
pub const DEFAULT_STRESS_PROGRAM: &str = "stress";

/// Starts `stress --cpu <n> --timeout <secs>` for each loaded episode.
///
/// Idle episodes do not spawn anything: they return a [`TimedWait`].
#[derive(Debug, Clone)]
pub struct ProcessLoadGenerator {
    program: OsString,
}

impl ProcessLoadGenerator {
    /// Creates a generator that spawns `program`.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, episode: &LoadEpisode) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("--cpu")
            .arg(episode.intensity.to_string())
            .arg("--timeout")
            .arg(episode.duration_seconds.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

impl Default for ProcessLoadGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_STRESS_PROGRAM)
    }
}

impl LoadGenerator for ProcessLoadGenerator {
    fn start(&mut self, episode: &LoadEpisode) -> ThermalResult<Box<dyn TaskHandle>> {
        if episode.is_idle() {
            return Ok(Box::new(TimedWait::new(episode.duration())));
        }

        let child = self
            .command(episode)
            .spawn()
            .map_err(|e| ThermalError::load(episode.intensity, e))?;
        log::trace!("Spawned load process {} for {:?}", child.id(), episode);

        Ok(Box::new(ProcessTask {
            child,
            intensity: episode.intensity,
            exited: false,
        }))
    }
}

/// A running load process.
///
/// Dropping a task whose process is still alive kills and reaps it.
#[derive(Debug)]
pub struct ProcessTask {
    child: Child,
    intensity: u32,
    exited: bool,
}

impl TaskHandle for ProcessTask {
    fn is_running(&mut self) -> ThermalResult<bool> {
        if self.exited {
            return Ok(false);
        }
        match self.child.try_wait() {
            Ok(None) => Ok(true),
            Ok(Some(status)) => {
                self.exited = true;
                if !status.success() {
                    log::warn!(
                        "Load process {} at intensity {} exited with {}",
                        self.child.id(),
                        self.intensity,
                        status
                    );
                }
                Ok(false)
            }
            Err(e) => Err(ThermalError::load(self.intensity, e)),
        }
    }
}

impl Drop for ProcessTask {
    fn drop(&mut self) {
        if self.exited {
            return;
        }
        if let Ok(None) = self.child.try_wait() {
            log::warn!("Terminating load process {} still running", self.child.id());
            if let Err(e) = self.child.kill() {
                log::warn!("Failed to kill load process {}: {}", self.child.id(), e);
            }
            let _ = self.child.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_command_arguments() {
        let generator = ProcessLoadGenerator::default();
        let command = generator.command(&LoadEpisode::new(3, 12));

        assert_eq!(command.get_program(), "stress");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, ["--cpu", "3", "--timeout", "12"]);
    }

    #[test]
    fn test_idle_episode_spawns_nothing() {
        // A missing program would fail to spawn, so success proves no process ran.
        let mut generator = ProcessLoadGenerator::new("/nonexistent/stress");
        let mut task = generator.start(&LoadEpisode::new(0, 0)).unwrap();
        assert!(!task.is_running().unwrap());
    }

    #[test]
    fn test_missing_program_is_a_load_error() {
        let mut generator = ProcessLoadGenerator::new("/nonexistent/stress");
        let result = generator.start(&LoadEpisode::new(2, 5));
        assert!(matches!(
            result,
            Err(ThermalError::LoadGenerator { intensity: 2, .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_task_reports_exit() {
        // `true` ignores its arguments and exits immediately.
        let mut generator = ProcessLoadGenerator::new("true");
        let mut task = generator.start(&LoadEpisode::new(1, 1)).unwrap();

        let started = Instant::now();
        while task.is_running().unwrap() {
            assert!(started.elapsed() < Duration::from_secs(10), "process never exited");
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(!task.is_running().unwrap());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_drop_kills_running_process() {
        let child = Command::new("sleep").arg("30").spawn().unwrap();
        let pid = child.id();
        let mut task = ProcessTask {
            child,
            intensity: 1,
            exited: false,
        };
        assert!(task.is_running().unwrap());

        drop(task);

        let proc_entry = std::path::PathBuf::from(format!("/proc/{pid}"));
        assert!(!proc_entry.exists(), "process {pid} outlived its task");
    }
}
