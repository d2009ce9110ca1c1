use std::io;
use std::thread;
use std::time::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::drivers::source::SampleLink;
/// Port name that selects the synthetic ADC instead of real hardware.
pub const SIMULATED_PORT: &str = "SIMULATED";
const MID_SCALE: f64 = 32768.0;
const SWING: f64 = 12000.0;
const NOISE: i64 = 150;
/// Synthetic 16-bit ADC producing a slow bite-like wave with noise.
pub struct SimulatedLink {
    rng: StdRng,
    phase: f64,
    interval: Duration,
}
impl SimulatedLink {
    pub fn new() -> Self {
        Self::with_interval(Duration::from_millis(2))
    }
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            phase: 0.0,
            interval,
        }
    }
    fn next_code(&mut self) -> i64 {
        self.phase += 0.01;
        // half-wave rectified sine: jaw at rest, then a squeeze
        let wave = self.phase.sin().max(0.0) * SWING;
        let code = (MID_SCALE + wave) as i64 + self.rng.gen_range(-NOISE..=NOISE);
        code.clamp(0, 65535)
    }
}
impl Default for SimulatedLink {
    fn default() -> Self {
        Self::new()
    }
}
impl SampleLink for SimulatedLink {
    fn name(&self) -> &str {
        SIMULATED_PORT
    }
    fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        if !self.interval.is_zero() {
            thread::sleep(self.interval);
        }
        Ok(Some(self.next_code().to_string().into_bytes()))
    }
    fn clear_input(&mut self) -> io::Result<()> {
        Ok(())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::decode_line;
    #[test]
    fn emits_decodable_codes_in_adc_range() {
        let mut link = SimulatedLink::with_interval(Duration::ZERO);
        for _ in 0..1000 {
            let line = link.read_line().unwrap().unwrap();
            let code = decode_line(&line).unwrap();
            assert!((0..=65535).contains(&code));
        }
    }
}
