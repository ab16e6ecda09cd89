use csv::StringRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One fully coerced CSV row: integer sensor id, free-form time text,
/// floating-point temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRow {
    pub sensor_id: u32,
    pub time: String,
    pub temperature: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("missing required column '{name}'")]
    MissingColumn { name: &'static str },
    #[error("invalid {name} '{value}' on line {line}")]
    InvalidField {
        name: &'static str,
        value: String,
        line: u64,
    },
}

/// Positions of the required columns within a record, resolved once from the
/// header row. The file may order its columns however it likes.
#[derive(Debug, Clone, Copy)]
pub struct HeaderMap {
    sensor_id: usize,
    time: usize,
    temperature: usize,
}

impl HeaderMap {
    pub fn from_headers(headers: &StringRecord) -> Result<Self, RowError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(RowError::MissingColumn { name })
        };
        Ok(Self {
            sensor_id: find("sensor_id")?,
            time: find("time")?,
            temperature: find("temperature")?,
        })
    }

    /// Map one raw record to a typed row. `line` is the 1-based file line,
    /// used only for error reporting.
    pub fn parse_row(&self, record: &StringRecord, line: u64) -> Result<SensorRow, RowError> {
        let field = |idx: usize, name: &'static str| {
            record.get(idx).ok_or(RowError::MissingColumn { name })
        };

        let raw_id = field(self.sensor_id, "sensor_id")?.trim();
        let sensor_id = raw_id.parse::<u32>().map_err(|_| RowError::InvalidField {
            name: "sensor_id",
            value: raw_id.to_string(),
            line,
        })?;

        let time = field(self.time, "time")?.to_string();

        let raw_temp = field(self.temperature, "temperature")?.trim();
        let temperature = raw_temp.parse::<f64>().map_err(|_| RowError::InvalidField {
            name: "temperature",
            value: raw_temp.to_string(),
            line,
        })?;

        Ok(SensorRow {
            sensor_id,
            time,
            temperature,
        })
    }
}
