use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use log::info;
/// Header of the voltage column in exported sheets.
pub const VOLTAGE_COLUMN: &str = "Voltage (V)";
/// Reads the durable log in file order, skipping blank lines.
pub fn read_log(path: &Path) -> Result<Vec<f64>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.trim()
                .parse::<f64>()
                .with_context(|| format!("line {} of {} is not a voltage: {line:?}", i + 1, path.display()))
        })
        .collect()
}
/// Writes the log as a single-column sheet with a leading row index.
/// Returns the number of data rows written.
pub fn export_log(log_path: &Path, destination: &Path) -> Result<usize> {
    let voltages = read_log(log_path)?;
    let mut writer = csv::Writer::from_path(destination)
        .with_context(|| format!("failed to create {}", destination.display()))?;
    writer.write_record(["", VOLTAGE_COLUMN])?;
    for (i, v) in voltages.iter().enumerate() {
        writer.write_record([i.to_string(), v.to_string()])?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", destination.display()))?;
    info!("exported {} rows to {}", voltages.len(), destination.display());
    Ok(voltages.len())
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::convert::convert;
    use crate::drivers::Drained;
    use crate::recorder::FlushSink;
    #[test]
    fn log_round_trips_through_sink() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FlushSink::new(dir.path().join("voltage_data.txt"));
        sink.reset(0).unwrap();
        let samples: Vec<f64> = (0..=65535).step_by(997).map(convert).collect();
        sink.flush(&Drained {
            generation: 0,
            samples: samples[..30].to_vec(),
        })
        .unwrap();
        sink.flush(&Drained {
            generation: 0,
            samples: samples[30..].to_vec(),
        })
        .unwrap();
        assert_eq!(read_log(sink.path()).unwrap(), samples);
    }
    #[test]
    fn blank_lines_are_skipped_and_garbage_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voltage_data.txt");
        fs::write(&path, "0.5\n\n  \n-1.25\n").unwrap();
        assert_eq!(read_log(&path).unwrap(), vec![0.5, -1.25]);
        fs::write(&path, "0.5\nnoise\n").unwrap();
        let err = read_log(&path).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }
    #[test]
    fn sheet_has_index_and_voltage_column() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("voltage_data.txt");
        let sheet = dir.path().join("bite.csv");
        fs::write(&log, "-2\n0\n1.99993896484375\n").unwrap();
        assert_eq!(export_log(&log, &sheet).unwrap(), 3);
        let mut reader = csv::Reader::from_path(&sheet).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[1], VOLTAGE_COLUMN);
        let rows: Vec<(usize, f64)> = reader
            .records()
            .map(|r| {
                let r = r.unwrap();
                (r[0].parse().unwrap(), r[1].parse().unwrap())
            })
            .collect();
        assert_eq!(rows, vec![(0, -2.0), (1, 0.0), (2, 1.99993896484375)]);
    }
    #[test]
    fn missing_log_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = export_log(&dir.path().join("absent.txt"), &dir.path().join("out.csv"));
        assert!(result.is_err());
    }
}
