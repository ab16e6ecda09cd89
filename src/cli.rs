use std::io::{self, Write};

use tracing::error;

use crate::ingest::{self, ReadFailure, SensorReadings};
use crate::limits::LimitPair;

pub const USAGE_ERROR: &str = "Error: Incorrect command line arguments.";

/// Dispatch on argument count: one argument is a CSV path, two numeric
/// arguments are a limit pair, anything else is an invocation error.
pub fn run<W: Write>(args: &[String], out: &mut W) -> io::Result<()> {
    match args {
        [path] => report_readings(path, out),
        [low, high] => match (low.parse::<f64>(), high.parse::<f64>()) {
            (Ok(low), Ok(high)) => report_limits(LimitPair::new(low, high), out),
            _ => writeln!(out, "{}", USAGE_ERROR),
        },
        _ => writeln!(out, "{}", USAGE_ERROR),
    }
}

fn report_readings<W: Write>(path: &str, out: &mut W) -> io::Result<()> {
    let readings = match ingest::read_temperatures(path) {
        Ok(readings) => readings,
        Err(err @ ReadFailure::NotFound { .. }) => {
            writeln!(out, "Error: {}", err)?;
            SensorReadings::new()
        }
        Err(ReadFailure::Read { partial, source }) => {
            error!(%source, "read aborted");
            writeln!(out, "Error: {:#}", source)?;
            partial
        }
    };

    writeln!(out, "Retrieved sensor data:")?;
    for (sensor_id, observations) in &readings {
        let samples: Vec<String> = observations
            .iter()
            .map(|o| format!("({}, {})", o.time, o.temperature))
            .collect();
        writeln!(out, "  sensor {}: {}", sensor_id, samples.join(" "))?;
    }
    Ok(())
}

fn report_limits<W: Write>(limits: LimitPair, out: &mut W) -> io::Result<()> {
    if limits.is_valid() {
        writeln!(out, "Limits {}..{} are valid.", limits.low, limits.high)
    } else {
        writeln!(
            out,
            "Limits {}..{} are invalid: low must be strictly below high.",
            limits.low, limits.high
        )
    }
}
