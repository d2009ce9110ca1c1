use std::io::{self, Read};
use std::time::Duration;
use log::info;
use serialport::{ClearBuffer, SerialPort};
use crate::drivers::simulated::{SimulatedLink, SIMULATED_PORT};
use crate::drivers::source::{take_line, LinkOpener, SampleLink};
use crate::drivers::PipelineError;
const READ_CHUNK: usize = 256;
/// Serial connection to the microcontroller: 8N1, no flow control.
pub struct SerialLink {
    name: String,
    port: Box<dyn SerialPort>,
    pending: Vec<u8>,
}
impl SerialLink {
    pub fn open(target: &str, baud_rate: u32, timeout: Duration) -> Result<Self, PipelineError> {
        let port = serialport::new(target, baud_rate)
            .timeout(timeout)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .flow_control(serialport::FlowControl::None)
            .open()
            .map_err(|source| PipelineError::ConnectionOpen {
                target: target.to_string(),
                source,
            })?;
        info!("opened {target} at {baud_rate} baud");
        Ok(Self {
            name: target.to_string(),
            port,
            pending: Vec::with_capacity(READ_CHUNK),
        })
    }
}
impl SampleLink for SerialLink {
    fn name(&self) -> &str {
        &self.name
    }
    fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        if let Some(line) = take_line(&mut self.pending) {
            return Ok(Some(line));
        }
        let mut chunk = [0u8; READ_CHUNK];
        match self.port.read(&mut chunk) {
            Ok(n) => {
                self.pending.extend_from_slice(&chunk[..n]);
                Ok(take_line(&mut self.pending))
            }
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(None),
            Err(e) => Err(e),
        }
    }
    fn clear_input(&mut self) -> io::Result<()> {
        self.pending.clear();
        self.port.clear(ClearBuffer::Input).map_err(io::Error::from)
    }
}
impl Drop for SerialLink {
    fn drop(&mut self) {
        info!("closed {}", self.name);
    }
}
/// Opens real serial ports, or the synthetic ADC for [`SIMULATED_PORT`].
pub struct DeviceOpener {
    pub baud_rate: u32,
    pub read_timeout: Duration,
}
impl LinkOpener for DeviceOpener {
    fn open(&self, target: &str) -> Result<Box<dyn SampleLink>, PipelineError> {
        if target == SIMULATED_PORT {
            return Ok(Box::new(SimulatedLink::new()));
        }
        Ok(Box::new(SerialLink::open(
            target,
            self.baud_rate,
            self.read_timeout,
        )?))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn missing_port_reports_connection_failure() {
        let opener = DeviceOpener {
            baud_rate: 115_200,
            read_timeout: Duration::from_millis(10),
        };
        match opener.open("/dev/bite-logger-missing-port") {
            Err(PipelineError::ConnectionOpen { target, .. }) => {
                assert_eq!(target, "/dev/bite-logger-missing-port")
            }
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("opened a port that does not exist"),
        }
    }
    #[test]
    fn simulated_target_needs_no_hardware() {
        let opener = DeviceOpener {
            baud_rate: 115_200,
            read_timeout: Duration::from_millis(10),
        };
        let link = opener.open(SIMULATED_PORT).unwrap();
        assert_eq!(link.name(), SIMULATED_PORT);
    }
}
