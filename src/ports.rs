use log::warn;
use crate::drivers::SIMULATED_PORT;
/// Names of the serial ports currently present on the host.
pub fn list_available_ports() -> Vec<String> {
    match serialport::available_ports() {
        Ok(ports) => ports.into_iter().map(|p| p.port_name).collect(),
        Err(e) => {
            warn!("port enumeration failed: {e}");
            Vec::new()
        }
    }
}
/// Choices offered to the operator: real ports first, then the simulator.
pub fn port_choices(available: Vec<String>) -> Vec<String> {
    let mut choices = available;
    choices.retain(|p| p != SIMULATED_PORT);
    choices.push(SIMULATED_PORT.to_string());
    choices
}
