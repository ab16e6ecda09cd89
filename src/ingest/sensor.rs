use crate::ingest::reader::Observation;

/// A single sensor with its recorded observations, newest last.
#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    pub id: u32,
    observations: Vec<Observation>,
}

impl Sensor {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            observations: Vec::new(),
        }
    }

    /// Build a sensor directly from an already-grouped observation sequence,
    /// e.g. one entry of a `SensorReadings` map.
    pub fn from_observations(id: u32, observations: Vec<Observation>) -> Self {
        Self { id, observations }
    }

    /// Append one (time, temperature) sample.
    pub fn record(&mut self, time: impl Into<String>, temperature: f64) {
        self.observations.push(Observation {
            time: time.into(),
            temperature,
        });
    }

    /// The most recent temperature, or `None` before anything is recorded.
    pub fn latest_temperature(&self) -> Option<f64> {
        self.latest().map(|o| o.temperature)
    }

    /// The most recent observation, or `None` before anything is recorded.
    pub fn latest(&self) -> Option<&Observation> {
        self.observations.last()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }
}
