use chrono::{DateTime, Utc};
use thiserror::Error;

/// Why a set of raw coordinate strings could not become a [`Position`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PositionError {
    #[error("'{value}' is not a number ({field})")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("'{hemisphere}' is not a valid {field} hemisphere")]
    InvalidHemisphere { field: &'static str, hemisphere: char },
}

type Result<T> = std::result::Result<T, PositionError>;

/// A point on the earth in decimal degrees, with an optional elevation in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64, elevation: Option<f64>) -> Result<Self> {
        check_range("latitude", latitude, 90.0)?;
        check_range("longitude", longitude, 180.0)?;
        if let Some(ele) = elevation {
            if !ele.is_finite() {
                return Err(PositionError::OutOfRange {
                    field: "elevation",
                    value: ele,
                });
            }
        }
        Ok(Self {
            latitude,
            longitude,
            elevation,
        })
    }

    /// Build a position from NMEA `DDMM.MMMM` / `DDDMM.MMMM` fields and their
    /// hemisphere characters (`N`/`S`, `E`/`W`).
    pub fn from_nmea(
        latitude: &str,
        lat_hemisphere: char,
        longitude: &str,
        lon_hemisphere: char,
        elevation: Option<&str>,
    ) -> Result<Self> {
        let lat = degrees_minutes("latitude", latitude, 90.0)?;
        let lat = match lat_hemisphere {
            'N' => lat,
            'S' => -lat,
            other => {
                return Err(PositionError::InvalidHemisphere {
                    field: "latitude",
                    hemisphere: other,
                });
            }
        };

        let lon = degrees_minutes("longitude", longitude, 180.0)?;
        let lon = match lon_hemisphere {
            'E' => lon,
            'W' => -lon,
            other => {
                return Err(PositionError::InvalidHemisphere {
                    field: "longitude",
                    hemisphere: other,
                });
            }
        };

        let ele = elevation
            .map(|value| parse_number("elevation", value))
            .transpose()?;

        Self::new(lat, lon, ele)
    }

    /// Build a position from decimal-degree strings, as found in GPX attributes.
    pub fn from_decimal(latitude: &str, longitude: &str, elevation: &str) -> Result<Self> {
        Self::new(
            parse_number("latitude", latitude)?,
            parse_number("longitude", longitude)?,
            Some(parse_number("elevation", elevation)?),
        )
    }
}

/// A route waypoint. `name` is empty when the source had none.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePoint {
    pub position: Position,
    pub name: String,
}

/// A timestamped track sample.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub position: Position,
    pub name: String,
    pub time: DateTime<Utc>,
}

fn parse_number(field: &'static str, value: &str) -> Result<f64> {
    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(PositionError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}

fn check_range(field: &'static str, value: f64, limit: f64) -> Result<()> {
    if value.is_finite() && value.abs() <= limit {
        Ok(())
    } else {
        Err(PositionError::OutOfRange { field, value })
    }
}

/// Convert an unsigned NMEA `[D]DDMM.MMMM` value into decimal degrees.
fn degrees_minutes(field: &'static str, value: &str, limit: f64) -> Result<f64> {
    let raw = parse_number(field, value)?;
    if raw < 0.0 {
        return Err(PositionError::OutOfRange { field, value: raw });
    }

    let degrees = (raw / 100.0).trunc();
    let minutes = raw - degrees * 100.0;
    if minutes >= 60.0 {
        return Err(PositionError::OutOfRange { field, value: raw });
    }

    let decimal = degrees + minutes / 60.0;
    check_range(field, decimal, limit)?;
    Ok(decimal)
}
