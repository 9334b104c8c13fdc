//! CSV export of the search lookup table.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::comfort::{LookupTable, PmvSample};
use crate::error::{ComfortError, Result};

/// Column headers, in order.
pub const LOOKUP_TABLE_HEADER: [&str; 3] = ["AC Temperature (°C)", "Air Velocity (m/s)", "PMV"];

#[derive(Serialize)]
struct LookupRow {
    ac_temp: f64,
    air_velocity: f64,
    pmv: f64,
}

impl From<&PmvSample> for LookupRow {
    fn from(sample: &PmvSample) -> Self {
        Self {
            ac_temp: sample.ac_temp,
            air_velocity: sample.air_velocity,
            pmv: sample.pmv,
        }
    }
}

/// File name for an export, e.g.
/// `lookup_table_20240601_143000_temp24.0_humidity60.0.csv`.
pub fn export_filename(desired_temp: f64, outdoor_humidity: f64, at: DateTime<Local>) -> String {
    format!(
        "lookup_table_{}_temp{:?}_humidity{:?}.csv",
        at.format("%Y%m%d_%H%M%S"),
        desired_temp,
        outdoor_humidity
    )
}

/// Write the table as CSV, one row per sample in generation order.
pub fn write_lookup_table<W: std::io::Write>(table: &LookupTable, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(LOOKUP_TABLE_HEADER)
        .map_err(|e| ComfortError::Export(e.to_string()))?;
    for sample in table {
        wtr.serialize(LookupRow::from(sample))
            .map_err(|e| ComfortError::Export(e.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the table to a timestamped file in `dir` and return its path.
pub fn export_lookup_table(
    table: &LookupTable,
    dir: &Path,
    desired_temp: f64,
    outdoor_humidity: f64,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(desired_temp, outdoor_humidity, Local::now()));
    let file = File::create(&path)?;
    write_lookup_table(table, file)?;

    log::info!("Lookup table ({} rows) saved to {}", table.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn table() -> LookupTable {
        [
            PmvSample {
                ac_temp: 28.0,
                air_velocity: 0.2,
                pmv: 0.9,
            },
            PmvSample {
                ac_temp: 27.5,
                air_velocity: 0.2,
                pmv: 0.75,
            },
            PmvSample {
                ac_temp: 28.0,
                air_velocity: 0.1,
                pmv: 1.1,
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_filename() {
        let at = Local.with_ymd_and_hms(2024, 6, 1, 14, 30, 0).unwrap();
        assert_eq!(
            export_filename(24.0, 60.0, at),
            "lookup_table_20240601_143000_temp24.0_humidity60.0.csv"
        );
    }

    #[test]
    fn test_csv_layout() {
        let mut buf = Vec::new();
        write_lookup_table(&table(), &mut buf).unwrap();

        let mut rdr = csv::Reader::from_reader(buf.as_slice());
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), LOOKUP_TABLE_HEADER);

        let rows: Vec<Vec<f64>> = rdr
            .records()
            .map(|r| r.unwrap().iter().map(|v| v.parse().unwrap()).collect())
            .collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![28.0, 0.2, 0.9]);
        assert_eq!(rows[2], vec![28.0, 0.1, 1.1]);
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let mut buf = Vec::new();
        write_lookup_table(&LookupTable::default(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.trim_end(), "AC Temperature (°C),Air Velocity (m/s),PMV");
    }

    #[test]
    fn test_export_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_lookup_table(&table(), dir.path(), 24.0, 60.0).unwrap();
        assert!(path.starts_with(dir.path()));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 4);
    }
}
