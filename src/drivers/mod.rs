// src/drivers/mod.rs
pub mod buffer;
pub mod convert;
pub mod decoder;
pub mod error;
#[cfg(test)]
pub mod scripted;
pub mod serial;
pub mod simulated;
pub mod source;
pub use buffer::{Drained, SampleBuffer};
pub use decoder::decode_line;
pub use error::PipelineError;
pub use serial::DeviceOpener;
pub use simulated::SIMULATED_PORT;
pub use source::{LinkOpener, SampleLink};
