// src/engine.rs
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use log::{debug, error, info, warn};
use crate::config::{Calibration, PipelineConfig};
use crate::drivers::{decode_line, Drained, PipelineError, SampleLink};
use crate::recorder::{FlushOutcome, FlushSink};
use crate::session::SessionContext;
use crate::types::{AcquisitionState, Notifier};
/// Read-convert-buffer-flush loop for one open connection.
pub struct AcquisitionLoop {
    context: Arc<SessionContext>,
    sink: Arc<FlushSink>,
    notifier: Arc<dyn Notifier>,
    calibration: Calibration,
    flush_threshold: usize,
    idle_poll: Duration,
    // batch whose write failed, retried with the next one
    pending: Option<Drained>,
    flush_failing: bool,
    malformed: u64,
}
impl AcquisitionLoop {
    pub fn new(
        context: Arc<SessionContext>,
        sink: Arc<FlushSink>,
        notifier: Arc<dyn Notifier>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            context,
            sink,
            notifier,
            calibration: config.calibration,
            flush_threshold: config.flush_threshold.max(1),
            idle_poll: config.idle_poll(),
            pending: None,
            flush_failing: false,
            malformed: 0,
        }
    }
    /// Lines discarded because they did not decode.
    pub fn malformed_count(&self) -> u64 {
        self.malformed
    }
    /// Runs until a stop is requested or the device fails, then closes the link.
    pub fn run(mut self, mut link: Box<dyn SampleLink>) {
        info!("acquisition started on {}", link.name());
        while !self.context.stop_requested() {
            if let Err(e) = self.step(link.as_mut()) {
                error!("{e}");
                self.notifier.notify(&format!("Serial error: {e}"));
                break;
            }
        }
        self.finish();
        info!(
            "acquisition on {} ended ({} malformed lines skipped)",
            link.name(),
            self.malformed_count()
        );
        drop(link);
    }
    /// One pass of the loop: read while running, drain stale input while not.
    pub fn step(&mut self, link: &mut dyn SampleLink) -> Result<(), PipelineError> {
        if self.context.state() != AcquisitionState::Running {
            link.clear_input().map_err(PipelineError::DeviceRead)?;
            if !self.idle_poll.is_zero() {
                thread::sleep(self.idle_poll);
            }
            return Ok(());
        }
        if let Some(line) = link.read_line().map_err(PipelineError::DeviceRead)? {
            match decode_line(&line) {
                Ok(raw) => self.context.buffer().append(self.calibration.convert(raw)),
                Err(e) => {
                    self.malformed += 1;
                    debug!("{e}");
                }
            }
        }
        if self.context.buffer().size() >= self.flush_threshold {
            self.flush_batch();
        }
        Ok(())
    }
    fn flush_batch(&mut self) {
        let buffer = self.context.buffer();
        if let Some(shown) = buffer.pop_front() {
            self.notifier.reading(shown);
        }
        let batch = buffer.drain();
        self.write(batch);
    }
    fn write(&mut self, mut batch: Drained) {
        if let Some(mut held) = self.pending.take() {
            if held.generation == batch.generation {
                held.samples.append(&mut batch.samples);
                batch = held;
            } else {
                debug!("discarding {} unwritten samples from a reset window", held.len());
            }
        }
        if batch.is_empty() {
            return;
        }
        match self.sink.flush(&batch) {
            Ok(FlushOutcome::Written(n)) => {
                if self.flush_failing {
                    info!("log writes recovered");
                }
                self.flush_failing = false;
                debug!("flushed {n} samples");
            }
            Ok(FlushOutcome::Stale) => {}
            Err(e) => {
                warn!("{e}; keeping {} samples for the next flush", batch.len());
                if !self.flush_failing {
                    self.notifier.notify(&e.to_string());
                }
                self.flush_failing = true;
                self.pending = Some(batch);
            }
        }
    }
    fn finish(&mut self) {
        let rest = self.context.buffer().drain();
        self.write(rest);
    }
}
