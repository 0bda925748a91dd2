use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A WGS84 position in degrees. No range checks are made, out of range or NaN
/// values are forwarded as is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLong {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseLatLongError {
    #[error("Expected \"lat,lon\", got {0:?}")]
    Format(String),

    #[error("Invalid coordinate {0:?}")]
    Number(String),
}

impl LatLong {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn lat(&self) -> f64 {
        self.latitude
    }

    pub fn lon(&self) -> f64 {
        self.longitude
    }

    /// Canonical `lat,lon` form used in query strings, `45.0` is written as `45`.
    pub fn to_query_value(&self) -> String {
        self.to_string()
    }
}

impl Display for LatLong {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // f64 Display is the shortest round-trip form and drops trailing zeros
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for LatLong {
    type Err = ParseLatLongError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = input
            .split_once(',')
            .ok_or_else(|| ParseLatLongError::Format(input.to_string()))?;

        let parse = |value: &str| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| ParseLatLongError::Number(value.trim().to_string()))
        };

        Ok(LatLong::new(parse(lat)?, parse(lon)?))
    }
}

impl From<(f64, f64)> for LatLong {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        LatLong::new(latitude, longitude)
    }
}

impl From<geo_types::Point> for LatLong {
    fn from(point: geo_types::Point) -> Self {
        LatLong::new(point.y(), point.x())
    }
}

impl From<&LatLong> for geo_types::Point {
    fn from(lat_long: &LatLong) -> Self {
        geo_types::Point::new(lat_long.longitude, lat_long.latitude)
    }
}

impl From<LatLong> for geo_types::Point {
    fn from(lat_long: LatLong) -> Self {
        (&lat_long).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_value_drops_trailing_zeros() {
        assert_eq!(LatLong::new(45.0, 9.0).to_query_value(), "45,9");
        assert_eq!(LatLong::new(41.9, 12.5).to_query_value(), "41.9,12.5");
        assert_eq!(LatLong::new(-33.8688, 151.2093).to_query_value(), "-33.8688,151.2093");
    }

    #[test]
    fn test_query_value_passes_nan_through() {
        assert_eq!(LatLong::new(f64::NAN, 0.5).to_query_value(), "NaN,0.5");
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "52.5308, 13.3847".parse::<LatLong>(),
            Ok(LatLong::new(52.5308, 13.3847))
        );
        assert_eq!(
            "52.5308".parse::<LatLong>(),
            Err(ParseLatLongError::Format(String::from("52.5308")))
        );
        assert_eq!(
            "abc,13".parse::<LatLong>(),
            Err(ParseLatLongError::Number(String::from("abc")))
        );
    }

    #[test]
    fn test_geo_types_axis_order() {
        let point: geo_types::Point = LatLong::new(45.0, 9.0).into();
        assert_eq!(point.x(), 9.0);
        assert_eq!(point.y(), 45.0);

        let back: LatLong = point.into();
        assert_eq!(back, LatLong::new(45.0, 9.0));
    }
}
