//! JSON-lines file destination

use crate::core::{Destination, LoggerError, Result, Severity};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends each record as one line of JSON (JSONL)
///
/// Compatible with log aggregation tools like ELK, Loki, etc.
pub struct FileDestination {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
}

impl FileDestination {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}' for append", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Destination for FileDestination {
    fn write(&mut self, _severity: Severity, payload: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::destination("file", "writer not initialized"))?;

        writeln!(writer, "{}", payload)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileDestination {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
