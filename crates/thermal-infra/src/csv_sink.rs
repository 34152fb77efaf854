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

//! Create-or-append CSV output.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use thermal_core::{Reading, RecordSchema, RecordSink, ThermalResult};

/// How a sink attached to its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkOpening {
    /// The file did not exist; it was created and the header written.
    Created,
    /// The file already existed; rows are appended after its content.
    Appended,
}

impl SinkOpening {
    /// Predicts how opening `path` would behave, without touching it.
    pub fn probe(path: &Path) -> Self {
        if path.exists() {
            SinkOpening::Appended
        } else {
            SinkOpening::Created
        }
    }
}

/// A [`RecordSink`] writing one CSV line per reading.
///
/// Each row is handed to the operating system before `append` returns, so an
/// interrupted session leaves a valid file behind.
#[derive(Debug)]
pub struct CsvRecordSink {
    path: PathBuf,
    schema: RecordSchema,
    file: File,
    opening: SinkOpening,
    rows_written: usize,
}

impl CsvRecordSink {
    /// Opens `path` for appending, creating it with a header row if needed.
    pub fn open(path: impl Into<PathBuf>, schema: RecordSchema) -> ThermalResult<Self> {
        let path = path.into();
        let opening = SinkOpening::probe(&path);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

        if opening == SinkOpening::Created {
            file.write_all(format!("{}\n", schema.header_line()).as_bytes())?;
            file.flush()?;
        }
        log::info!("Recording to '{}' ({:?})", path.display(), opening);

        Ok(Self {
            path,
            schema,
            file,
            opening,
            rows_written: 0,
        })
    }

    /// Returns the output path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the column layout.
    pub fn schema(&self) -> RecordSchema {
        self.schema
    }

    /// Returns whether the file was created or appended to.
    pub fn opening(&self) -> SinkOpening {
        self.opening
    }

    /// Returns the number of rows this sink appended (header excluded).
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}

impl RecordSink for CsvRecordSink {
    fn append(&mut self, reading: &Reading) -> ThermalResult<()> {
        let line = format!("{}\n", self.schema.row_line(reading));
        self.file.write_all(line.as_bytes())?;
        self.file.flush()?;
        self.rows_written += 1;
        Ok(())
    }
}
