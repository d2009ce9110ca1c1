use crate::config::Calibration;
impl Calibration {
    /// Volts represented by one ADC count.
    pub fn volts_per_count(&self) -> f64 {
        self.vref / self.resolution
    }
    pub fn convert(&self, raw: i64) -> f64 {
        self.volts_per_count() * raw as f64 - self.offset
    }
}
/// Converts a raw code with the stock bite-sensor calibration.
pub fn convert(raw: i64) -> f64 {
    Calibration::default().convert(raw)
}
