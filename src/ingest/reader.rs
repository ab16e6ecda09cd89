use anyhow::Context;
use csv::ReaderBuilder;
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, ErrorKind},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::info;

use crate::ingest::row::HeaderMap;

/// One (time, temperature) sample for a sensor. Immutable once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub time: String,
    pub temperature: f64,
}

/// Per-sensor observation sequences keyed by sensor id. Each sequence holds
/// the sensor's rows in file order; ids need not be contiguous or
/// pre-declared.
pub type SensorReadings = BTreeMap<u32, Vec<Observation>>;

#[derive(Debug, Error)]
pub enum ReadFailure {
    #[error("File '{}' not found.", path.display())]
    NotFound { path: PathBuf },

    /// Any other I/O or parse fault. The first unrecoverable error ends the
    /// read; `partial` holds whatever was grouped before it.
    #[error("{source}")]
    Read {
        partial: SensorReadings,
        source: anyhow::Error,
    },
}

/// Read `path` and group its rows by sensor id.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_temperatures<P: AsRef<Path>>(path: P) -> Result<SensorReadings, ReadFailure> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ReadFailure::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(ReadFailure::Read {
                partial: SensorReadings::new(),
                source: anyhow::Error::new(e)
                    .context(format!("Failed to open {}", path.display())),
            });
        }
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let mut readings = SensorReadings::new();
    let result: anyhow::Result<()> = (|| {
        let columns = HeaderMap::from_headers(
            rdr.headers()
                .with_context(|| format!("Failed to read header of {}", path.display()))?,
        )?;

        for (idx, record) in rdr.records().enumerate() {
            // header occupies line 1; data starts on line 2
            let line = (idx + 2) as u64;
            let record =
                record.with_context(|| format!("CSV parse error at line {}", line))?;
            let row = columns.parse_row(&record, line)?;
            readings.entry(row.sensor_id).or_default().push(Observation {
                time: row.time,
                temperature: row.temperature,
            });
        }
        Ok(())
    })();

    match result {
        Ok(()) => {
            info!(sensors = readings.len(), "read complete");
            Ok(readings)
        }
        Err(source) => Err(ReadFailure::Read {
            partial: readings,
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::row::SensorRow;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn obs(time: &str, temperature: f64) -> Observation {
        Observation {
            time: time.to_string(),
            temperature,
        }
    }

    #[test]
    fn test_groups_rows_by_sensor_in_file_order() {
        let tmp = tempdir().unwrap();
        let path = write_csv(
            tmp.path(),
            "sensors.csv",
            "sensor_id,time,temperature\n\
             1,12:00,21.0\n\
             1,12:30,22.5\n\
             2,12:00,20.0\n\
             2,12:30,23.5\n",
        );

        let readings = read_temperatures(&path).unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(
            readings[&1],
            vec![obs("12:00", 21.0), obs("12:30", 22.5)]
        );
        assert_eq!(
            readings[&2],
            vec![obs("12:00", 20.0), obs("12:30", 23.5)]
        );
    }

    #[test]
    fn test_column_order_is_irrelevant() {
        let tmp = tempdir().unwrap();
        let path = write_csv(
            tmp.path(),
            "shuffled.csv",
            "time,temperature,sensor_id\n\
             09:15,19.5,7\n",
        );

        let readings = read_temperatures(&path).unwrap();
        assert_eq!(readings[&7], vec![obs("09:15", 19.5)]);
    }

    #[test]
    fn test_sparse_sensor_ids_are_accepted() {
        let tmp = tempdir().unwrap();
        let path = write_csv(
            tmp.path(),
            "sparse.csv",
            "sensor_id,time,temperature\n\
             42,08:00,18.0\n\
             3,08:00,17.5\n\
             42,08:30,18.2\n",
        );

        let readings = read_temperatures(&path).unwrap();
        assert_eq!(readings.keys().copied().collect::<Vec<_>>(), vec![3, 42]);
        assert_eq!(readings[&42], vec![obs("08:00", 18.0), obs("08:30", 18.2)]);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("absent.csv");

        match read_temperatures(&path) {
            Err(ReadFailure::NotFound { path: reported }) => assert_eq!(reported, path),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_temperature_keeps_partial_result() {
        let tmp = tempdir().unwrap();
        let path = write_csv(
            tmp.path(),
            "broken.csv",
            "sensor_id,time,temperature\n\
             1,12:00,21.0\n\
             1,12:30,hot\n\
             2,12:00,20.0\n",
        );

        match read_temperatures(&path) {
            Err(ReadFailure::Read { partial, source }) => {
                assert_eq!(partial.len(), 1);
                assert_eq!(partial[&1], vec![obs("12:00", 21.0)]);
                assert!(source.to_string().contains("temperature"));
            }
            other => panic!("expected Read failure, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_column_fails_with_no_data() {
        let tmp = tempdir().unwrap();
        let path = write_csv(
            tmp.path(),
            "noheader.csv",
            "sensor_id,time\n\
             1,12:00\n",
        );

        match read_temperatures(&path) {
            Err(ReadFailure::Read { partial, source }) => {
                assert!(partial.is_empty());
                assert!(source
                    .to_string()
                    .contains("missing required column 'temperature'"));
            }
            other => panic!("expected Read failure, got {:?}", other),
        }
    }

    #[test]
    fn test_round_trip_through_csv_writer() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("written.csv");

        let rows = vec![
            SensorRow {
                sensor_id: 1,
                time: "12:00".to_string(),
                temperature: 21.0,
            },
            SensorRow {
                sensor_id: 1,
                time: "12:30".to_string(),
                temperature: 22.5,
            },
            SensorRow {
                sensor_id: 2,
                time: "12:00".to_string(),
                temperature: 20.0,
            },
        ];

        let mut wtr = csv::Writer::from_path(&path).unwrap();
        for row in &rows {
            wtr.serialize(row).unwrap();
        }
        wtr.flush().unwrap();

        let readings = read_temperatures(&path).unwrap();
        assert_eq!(
            readings[&1],
            vec![obs("12:00", 21.0), obs("12:30", 22.5)]
        );
        assert_eq!(readings[&2], vec![obs("12:00", 20.0)]);
    }
}
