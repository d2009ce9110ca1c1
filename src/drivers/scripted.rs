// Deterministic device playback for tests.
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use crate::drivers::source::{LinkOpener, SampleLink};
use crate::drivers::PipelineError;
enum Entry {
    Line(Vec<u8>),
    Fail(io::ErrorKind),
}
/// In-memory link that replays queued lines, then idles like a quiet port.
pub struct ScriptedLink {
    entries: VecDeque<Entry>,
    idle: Duration,
    clears: Arc<AtomicUsize>,
}
impl ScriptedLink {
    pub fn new<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        Self {
            entries: lines
                .into_iter()
                .map(|l| Entry::Line(l.as_ref().to_vec()))
                .collect(),
            idle: Duration::ZERO,
            clears: Arc::new(AtomicUsize::new(0)),
        }
    }
    pub fn idle(mut self, idle: Duration) -> Self {
        self.idle = idle;
        self
    }
    /// Queues a read failure after the scripted lines.
    pub fn then_fail(mut self, kind: io::ErrorKind) -> Self {
        self.entries.push_back(Entry::Fail(kind));
        self
    }
    pub fn clear_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.clears)
    }
}
impl SampleLink for ScriptedLink {
    fn name(&self) -> &str {
        "scripted"
    }
    fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        match self.entries.pop_front() {
            Some(Entry::Line(line)) => Ok(Some(line)),
            Some(Entry::Fail(kind)) => Err(io::Error::new(kind, "scripted failure")),
            None => {
                if !self.idle.is_zero() {
                    thread::sleep(self.idle);
                }
                Ok(None)
            }
        }
    }
    fn clear_input(&mut self) -> io::Result<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
/// Opener handing out quiet scripted links and counting how often it was asked.
#[derive(Default)]
pub struct ScriptedOpener {
    opens: AtomicUsize,
    fail: bool,
    lines: Mutex<Vec<String>>,
}
impl ScriptedOpener {
    pub fn new() -> Self {
        Self::default()
    }
    /// Every open fails as if the port did not exist.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
    /// Lines the next opened link replays before going quiet.
    pub fn with_lines(lines: &[&str]) -> Self {
        Self {
            lines: Mutex::new(lines.iter().map(|l| l.to_string()).collect()),
            ..Self::default()
        }
    }
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}
impl LinkOpener for ScriptedOpener {
    fn open(&self, target: &str) -> Result<Box<dyn SampleLink>, PipelineError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(PipelineError::ConnectionOpen {
                target: target.to_string(),
                source: serialport::Error::new(serialport::ErrorKind::NoDevice, "no such port"),
            });
        }
        let lines = std::mem::take(&mut *self.lines.lock().unwrap());
        Ok(Box::new(
            ScriptedLink::new(lines).idle(Duration::from_millis(2)),
        ))
    }
}
