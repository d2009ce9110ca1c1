// src/session.rs
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use anyhow::Result;
use log::{error, info, warn};
use crate::config::PipelineConfig;
use crate::drivers::{LinkOpener, PipelineError, SampleBuffer};
use crate::engine::AcquisitionLoop;
use crate::export;
use crate::recorder::FlushSink;
use crate::types::{AcquisitionState, Notifier};
/// State shared between the controller and the acquisition thread.
///
/// The control flags are written only by the controller; the loop reads them
/// once per iteration. The buffer is the one structure both sides mutate.
pub struct SessionContext {
    state: AtomicU8,
    stop: AtomicBool,
    buffer: SampleBuffer,
}
impl SessionContext {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(AcquisitionState::Stopped.as_u8()),
            stop: AtomicBool::new(false),
            buffer: SampleBuffer::new(),
        }
    }
    pub fn state(&self) -> AcquisitionState {
        AcquisitionState::from_u8(self.state.load(Ordering::Acquire))
    }
    pub fn set_state(&self, state: AcquisitionState) {
        self.state.store(state.as_u8(), Ordering::Release);
    }
    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }
    fn set_stop(&self, stop: bool) {
        self.stop.store(stop, Ordering::Release);
    }
    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }
}
impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
/// The single control surface for acquisition.
///
/// Owns the selected target and the handle of the acquisition thread; at most
/// one thread is alive at any time.
pub struct SessionController {
    config: PipelineConfig,
    context: Arc<SessionContext>,
    sink: Arc<FlushSink>,
    opener: Arc<dyn LinkOpener>,
    notifier: Arc<dyn Notifier>,
    target: Option<String>,
    worker: Option<JoinHandle<()>>,
}
impl SessionController {
    pub fn new(
        config: PipelineConfig,
        opener: Arc<dyn LinkOpener>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let sink = Arc::new(FlushSink::new(config.log_path.clone()));
        Self {
            config,
            context: Arc::new(SessionContext::new()),
            sink,
            opener,
            notifier,
            target: None,
            worker: None,
        }
    }
    pub fn state(&self) -> AcquisitionState {
        self.context.state()
    }
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }
    pub fn log_path(&self) -> &Path {
        self.sink.path()
    }
    #[cfg(test)]
    pub fn context(&self) -> &SessionContext {
        &self.context
    }
    /// Whether an acquisition thread is currently running.
    pub fn is_loop_alive(&self) -> bool {
        self.worker.as_ref().is_some_and(|h| !h.is_finished())
    }
    /// Binds the target used by the next `start`.
    pub fn connect(&mut self, target: &str) -> Result<(), PipelineError> {
        let target = target.trim();
        if target.is_empty() {
            self.notifier.notify("No port selected");
            return Err(PipelineError::NoTarget);
        }
        info!("target set to {target}");
        self.target = Some(target.to_string());
        self.notifier
            .notify(&format!("Selected port: {target}\nMicrocontroller Connected"));
        Ok(())
    }
    /// Opens a fresh capture window and makes sure a loop is running.
    pub fn start(&mut self) -> Result<(), PipelineError> {
        let Some(target) = self.target.clone() else {
            self.notifier.notify("No Device Found");
            return Err(PipelineError::NoTarget);
        };
        let generation = self.context.buffer().clear();
        if let Err(e) = self.sink.reset(generation) {
            error!("{e}");
            self.notifier.notify(&e.to_string());
            return Err(e);
        }
        self.reap();
        self.context.set_state(AcquisitionState::Running);
        if self.worker.is_none() {
            if let Err(e) = self.spawn(target) {
                error!("{e}");
                self.notifier.notify(&e.to_string());
                return Err(e);
            }
        }
        info!("capture window {generation} started");
        Ok(())
    }
    /// Stops reading; the loop stays alive and keeps the port drained.
    pub fn pause(&mut self) {
        if self.state() != AcquisitionState::Running {
            return;
        }
        self.context.set_state(AcquisitionState::Paused);
        self.context.buffer().clear();
        info!("acquisition paused");
    }
    /// The operator's start/stop button.
    pub fn toggle(&mut self) -> Result<AcquisitionState, PipelineError> {
        if self.state() == AcquisitionState::Running {
            self.pause();
        } else {
            self.start()?;
        }
        Ok(self.state())
    }
    /// Empties the durable log without ending the capture window.
    pub fn clear_log(&self) -> Result<(), PipelineError> {
        self.sink.truncate().map_err(|e| {
            self.notifier.notify(&e.to_string());
            e
        })
    }
    /// Pauses acquisition and writes the durable log to `destination`.
    pub fn export(&mut self, destination: &Path) -> Result<usize> {
        self.pause();
        match export::export_log(self.sink.path(), destination) {
            Ok(rows) => {
                self.notifier
                    .notify(&format!("Data exported to {}", destination.display()));
                Ok(rows)
            }
            Err(e) => {
                warn!("export failed: {e:#}");
                self.notifier.notify(&format!("An error occurred: {e:#}"));
                Err(e)
            }
        }
    }
    /// Requests the loop to stop and waits for it to close the connection.
    pub fn shutdown(&mut self) {
        self.context.set_stop(true);
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                error!("acquisition thread panicked");
            }
        }
        self.context.set_state(AcquisitionState::Stopped);
    }
    fn reap(&mut self) {
        if self.worker.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(handle) = self.worker.take() {
                if handle.join().is_err() {
                    error!("acquisition thread panicked");
                }
            }
        }
    }
    fn spawn(&mut self, target: String) -> Result<(), PipelineError> {
        self.context.set_stop(false);
        let engine = AcquisitionLoop::new(
            Arc::clone(&self.context),
            Arc::clone(&self.sink),
            Arc::clone(&self.notifier),
            &self.config,
        );
        let opener = Arc::clone(&self.opener);
        let notifier = Arc::clone(&self.notifier);
        let handle = thread::Builder::new()
            .name("acquisition".into())
            .spawn(move || match opener.open(&target) {
                Ok(link) => engine.run(link),
                Err(e) => {
                    error!("{e}");
                    notifier.notify(&format!("Serial error: {e}"));
                }
            })
            .map_err(PipelineError::Spawn)?;
        self.worker = Some(handle);
        Ok(())
    }
}
impl Drop for SessionController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
