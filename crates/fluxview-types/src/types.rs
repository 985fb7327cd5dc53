//! Core types for instrument readings.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};

use crate::error::ParseError;

#[cfg(feature = "serde")]
time::serde::format_description!(
    timestamp_format,
    PrimitiveDateTime,
    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
);

/// One sample captured by the instrument.
///
/// All four channels are measured at the same moment. The timestamp is the
/// instrument's wall-clock time and carries no UTC offset.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// Moment of capture, the ordering key of every store.
    #[cfg_attr(feature = "serde", serde(with = "timestamp_format"))]
    pub timestamp: PrimitiveDateTime,
    /// Flux sensor value.
    pub flux: f64,
    /// Temperature sensor value.
    pub temperature: f64,
    /// Pressure sensor value.
    pub pressure: f64,
    /// Humidity sensor value.
    pub humidity: f64,
}

impl Reading {
    /// Create a reading from its timestamp and channel values.
    #[must_use]
    pub fn new(
        timestamp: PrimitiveDateTime,
        flux: f64,
        temperature: f64,
        pressure: f64,
        humidity: f64,
    ) -> Self {
        Self {
            timestamp,
            flux,
            temperature,
            pressure,
            humidity,
        }
    }

    /// Calendar day the reading belongs to.
    #[must_use]
    pub fn date(&self) -> Date {
        self.timestamp.date()
    }

    /// Value of a single channel.
    #[must_use]
    pub fn value(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Flux => self.flux,
            Channel::Temperature => self.temperature,
            Channel::Pressure => self.pressure,
            Channel::Humidity => self.humidity,
        }
    }
}

/// Sensor channel selectable for display.
///
/// # Parsing and display
///
/// Channels parse case-insensitively from their name and display as the
/// lowercase name. Use [`Channel::label`] for a chart title.
///
/// ```
/// use fluxview_types::Channel;
///
/// assert_eq!("Pressure".parse::<Channel>(), Ok(Channel::Pressure));
/// assert_eq!(Channel::Humidity.to_string(), "humidity");
/// assert_eq!(Channel::Flux.label(), "Flux");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Channel {
    #[default]
    Flux,
    Temperature,
    Pressure,
    Humidity,
}

impl Channel {
    /// Every channel, in the order the instrument reports them.
    pub const ALL: [Channel; 4] = [
        Channel::Flux,
        Channel::Temperature,
        Channel::Pressure,
        Channel::Humidity,
    ];

    /// Lowercase identifier used in config files and on the command line.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Flux => "flux",
            Channel::Temperature => "temperature",
            Channel::Pressure => "pressure",
            Channel::Humidity => "humidity",
        }
    }

    /// Human-readable label for chart titles.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Flux => "Flux",
            Channel::Temperature => "Temperature",
            Channel::Pressure => "Pressure",
            Channel::Humidity => "Humidity",
        }
    }

    /// Project readings onto this channel as `(timestamp, value)` pairs.
    #[must_use]
    pub fn project(&self, readings: &[Reading]) -> Vec<ChartPoint> {
        readings
            .iter()
            .map(|reading| ChartPoint {
                timestamp: reading.timestamp,
                value: reading.value(*self),
            })
            .collect()
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flux" => Ok(Channel::Flux),
            "temperature" | "temp" => Ok(Channel::Temperature),
            "pressure" => Ok(Channel::Pressure),
            "humidity" => Ok(Channel::Humidity),
            _ => Err(ParseError::UnknownChannel(s.to_string())),
        }
    }
}

/// A single point handed to the chart: date-based X, numeric Y.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChartPoint {
    #[cfg_attr(feature = "serde", serde(with = "timestamp_format"))]
    pub timestamp: PrimitiveDateTime,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn sample() -> Reading {
        Reading::new(datetime!(2022-01-14 10:15:30.250), 1.5, 21.0, 1013.25, 40.0)
    }

    #[test]
    fn test_reading_value_per_channel() {
        let reading = sample();
        assert_eq!(reading.value(Channel::Flux), 1.5);
        assert_eq!(reading.value(Channel::Temperature), 21.0);
        assert_eq!(reading.value(Channel::Pressure), 1013.25);
        assert_eq!(reading.value(Channel::Humidity), 40.0);
    }

    #[test]
    fn test_reading_date() {
        assert_eq!(sample().date(), date!(2022 - 01 - 14));
    }

    #[test]
    fn test_channel_parse_is_case_insensitive() {
        assert_eq!("FLUX".parse::<Channel>(), Ok(Channel::Flux));
        assert_eq!(" temp ".parse::<Channel>(), Ok(Channel::Temperature));
        assert_eq!("Humidity".parse::<Channel>(), Ok(Channel::Humidity));
    }

    #[test]
    fn test_channel_parse_unknown() {
        let err = "co2".parse::<Channel>().unwrap_err();
        assert_eq!(err, ParseError::UnknownChannel("co2".to_string()));
        assert!(err.to_string().contains("co2"));
    }

    #[test]
    fn test_channel_display_round_trips_through_parse() {
        for channel in Channel::ALL {
            assert_eq!(channel.to_string().parse::<Channel>(), Ok(channel));
        }
    }

    #[test]
    fn test_project_keeps_order_and_timestamps() {
        let first = sample();
        let mut second = sample();
        second.timestamp = datetime!(2022-01-14 10:16:30.250);
        second.pressure = 1000.0;

        let points = Channel::Pressure.project(&[first, second]);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].timestamp, first.timestamp);
        assert_eq!(points[0].value, 1013.25);
        assert_eq!(points[1].value, 1000.0);
    }

    #[test]
    fn test_project_empty() {
        assert!(Channel::Flux.project(&[]).is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_reading_json_uses_millisecond_timestamp() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"2022-01-14 10:15:30.250\""));

        let parsed: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_channel_serializes_lowercase() {
        let json = serde_json::to_string(&Channel::Temperature).unwrap();
        assert_eq!(json, "\"temperature\"");
    }
}
