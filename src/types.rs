// src/types.rs
use std::sync::mpsc::Sender;
use std::sync::Mutex;
// Acquisition control state, written by the controller and read by the loop.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum AcquisitionState {
    Stopped,
    Paused,
    Running,
}
impl AcquisitionState {
    pub fn as_u8(self) -> u8 {
        match self {
            AcquisitionState::Stopped => 0,
            AcquisitionState::Paused => 1,
            AcquisitionState::Running => 2,
        }
    }
    pub fn from_u8(value: u8) -> Self {
        match value {
            2 => AcquisitionState::Running,
            1 => AcquisitionState::Paused,
            _ => AcquisitionState::Stopped,
        }
    }
}
// Messages from the core to the operator surface
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Log(String),
    Reading(f64), // sample shown at each flush
}
/// Sink for status and error text shown to the operator.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
    /// Reports the sample set aside for display at a flush.
    fn reading(&self, voltage: f64) {
        self.notify(&format!("{voltage} V"));
    }
}
/// Forwards notifications over a channel to the GUI thread.
pub struct ChannelNotifier {
    tx: Mutex<Sender<SessionEvent>>,
}
impl ChannelNotifier {
    pub fn new(tx: Sender<SessionEvent>) -> Self {
        Self { tx: Mutex::new(tx) }
    }
    fn send(&self, event: SessionEvent) {
        if let Ok(tx) = self.tx.lock() {
            // receiver gone means the window is closing
            tx.send(event).ok();
        }
    }
}
impl Notifier for ChannelNotifier {
    fn notify(&self, message: &str) {
        self.send(SessionEvent::Log(message.to_owned()));
    }
    fn reading(&self, voltage: f64) {
        self.send(SessionEvent::Reading(voltage));
    }
}
/// Keeps every notification in memory.
#[cfg(test)]
#[derive(Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}
#[cfg(test)]
impl CollectingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }
}
#[cfg(test)]
impl Notifier for CollectingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_owned());
    }
}
