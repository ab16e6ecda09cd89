pub mod reader;
pub mod row;
pub mod sensor;

pub use reader::{read_temperatures, Observation, ReadFailure, SensorReadings};
pub use row::{HeaderMap, RowError, SensorRow};
pub use sensor::Sensor;
