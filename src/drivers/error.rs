use std::io;
use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no port selected")]
    NoTarget,
    #[error("failed to open {target}: {source}")]
    ConnectionOpen {
        target: String,
        #[source]
        source: serialport::Error,
    },
    #[error("serial error: {0}")]
    DeviceRead(#[source] io::Error),
    #[error("failed to write {}: {source}", path.display())]
    FlushWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to start acquisition thread: {0}")]
    Spawn(#[source] io::Error),
}
/// A line from the device that does not hold a base-10 integer.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed sample line {0:?}")]
pub struct MalformedSample(pub String);
