use std::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use log::debug;
use crate::drivers::{Drained, PipelineError};
#[derive(Debug, PartialEq, Eq)]
pub enum FlushOutcome {
    Written(usize),
    /// The batch came from a capture window that has since been reset.
    Stale,
}
/// Append-only text log of flushed voltages, one value per line.
pub struct FlushSink {
    path: PathBuf,
    // generation accepted since the last reset; also serializes file access
    accepted: Mutex<u64>,
}
impl FlushSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            accepted: Mutex::new(0),
        }
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    fn lock(&self) -> MutexGuard<'_, u64> {
        self.accepted.lock().unwrap_or_else(PoisonError::into_inner)
    }
    fn write_error(&self, source: std::io::Error) -> PipelineError {
        PipelineError::FlushWrite {
            path: self.path.clone(),
            source,
        }
    }
    /// Starts a new capture window: truncates the log and accepts only
    /// batches drained under `generation` from now on.
    ///
    /// The window moves even when the truncate fails, so later flushes keep
    /// reporting real write errors instead of being dropped as stale.
    pub fn reset(&self, generation: u64) -> Result<(), PipelineError> {
        let mut accepted = self.lock();
        *accepted = generation;
        File::create(&self.path).map_err(|e| self.write_error(e))?;
        Ok(())
    }
    /// Empties the log while keeping the current capture window.
    pub fn truncate(&self) -> Result<(), PipelineError> {
        let _guard = self.lock();
        File::create(&self.path).map_err(|e| self.write_error(e))?;
        Ok(())
    }
    pub fn flush(&self, batch: &Drained) -> Result<FlushOutcome, PipelineError> {
        let accepted = self.lock();
        if batch.generation != *accepted {
            debug!(
                "dropping {} samples from window {} (log is on {})",
                batch.len(),
                batch.generation,
                *accepted
            );
            return Ok(FlushOutcome::Stale);
        }
        if batch.is_empty() {
            return Ok(FlushOutcome::Written(0));
        }
        let mut text = String::with_capacity(batch.len() * 22);
        for v in &batch.samples {
            writeln!(text, "{v}").ok();
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.write_error(e))?;
        file.write_all(text.as_bytes())
            .map_err(|e| self.write_error(e))?;
        Ok(FlushOutcome::Written(batch.len()))
    }
}
