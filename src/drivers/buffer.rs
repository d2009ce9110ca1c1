use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
/// Samples taken out of the buffer in one atomic drain.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Drained {
    /// Capture window the samples belong to; advanced by every `clear`.
    pub generation: u64,
    pub samples: Vec<f64>,
}
impl Drained {
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
#[derive(Default)]
struct Inner {
    samples: VecDeque<f64>,
    generation: u64,
}
/// Ordered voltage buffer shared by the acquisition loop and the controller.
///
/// Every operation takes the single internal lock, so `drain` and `clear` are
/// indivisible with respect to `append`.
#[derive(Default)]
pub struct SampleBuffer {
    inner: Mutex<Inner>,
}
impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
    pub fn append(&self, voltage: f64) {
        self.lock().samples.push_back(voltage);
    }
    pub fn size(&self) -> usize {
        self.lock().samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.lock().samples.is_empty()
    }
    /// Removes the oldest sample.
    pub fn pop_front(&self) -> Option<f64> {
        self.lock().samples.pop_front()
    }
    pub fn drain(&self) -> Drained {
        let mut inner = self.lock();
        Drained {
            generation: inner.generation,
            samples: inner.samples.drain(..).collect(),
        }
    }
    /// Discards the content and opens a new capture window, returning its generation.
    pub fn clear(&self) -> u64 {
        let mut inner = self.lock();
        inner.samples.clear();
        inner.generation += 1;
        inner.generation
    }
}
