//! Geolocation and weather data holders.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storable::Storable;
use crate::timing::TIMESTAMP_FORMAT;

#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    #[error("latitude {0} out of range")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} out of range")]
    LongitudeOutOfRange(f64),
}

/// A geographical point with an optional IANA timezone name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LocationRecord", into = "LocationRecord")]
pub struct Location {
    latitude: f64,
    longitude: f64,
    timezone: Option<String>,
}

/// Raw mapping form; validated into a [`Location`] by serde.
#[derive(Serialize, Deserialize)]
struct LocationRecord {
    latitude: f64,
    longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timezone: Option<String>,
}

impl TryFrom<LocationRecord> for Location {
    type Error = GeoError;

    fn try_from(record: LocationRecord) -> Result<Self, Self::Error> {
        Location::new(record.latitude, record.longitude, record.timezone)
    }
}

impl From<Location> for LocationRecord {
    fn from(location: Location) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            timezone: location.timezone,
        }
    }
}

impl Location {
    pub fn new(
        latitude: f64,
        longitude: f64,
        timezone: Option<String>,
    ) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
            timezone,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.timezone {
            Some(tz) => write!(
                f,
                "Location[lat={}, long={}, tz='{tz}']",
                self.latitude, self.longitude
            ),
            None => write!(f, "Location[lat={}, long={}]", self.latitude, self.longitude),
        }
    }
}

impl Storable for Location {
    fn csv(&self) -> String {
        format!(
            "{},{},{}",
            self.latitude,
            self.longitude,
            self.timezone.as_deref().unwrap_or("")
        )
    }

    fn markup(&self) -> String {
        let mut out = format!(
            "<location><latitude>{}</latitude><longitude>{}</longitude>",
            self.latitude, self.longitude
        );
        if let Some(tz) = &self.timezone {
            out.push_str(&format!("<timezone>{tz}</timezone>"));
        }
        out.push_str("</location>");
        out
    }

    fn json(&self) -> serde_json::Value {
        serde_json::json!({
            "latitude": self.latitude,
            "longitude": self.longitude,
            "timezone": self.timezone,
        })
    }
}

/// A location plus device-reported altitude and accuracy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    #[serde(flatten)]
    location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    accuracy: Option<f64>,
}

impl GeoLocation {
    pub fn new(
        latitude: f64,
        longitude: f64,
        timezone: Option<String>,
        altitude: Option<f64>,
        accuracy: Option<f64>,
    ) -> Result<Self, GeoError> {
        Ok(Self {
            location: Location::new(latitude, longitude, timezone)?,
            altitude,
            accuracy,
        })
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }

    pub fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[Geo][alt={}, acc={}]",
            self.location,
            self.altitude.map_or("none".to_string(), |a| a.to_string()),
            self.accuracy.map_or("none".to_string(), |a| a.to_string())
        )
    }
}

impl Storable for GeoLocation {
    fn csv(&self) -> String {
        format!(
            "{},{},{}",
            self.location.csv(),
            self.altitude.map_or(String::new(), |a| a.to_string()),
            self.accuracy.map_or(String::new(), |a| a.to_string())
        )
    }

    fn markup(&self) -> String {
        let mut out = format!("<geo_location>{}", self.location.markup());
        if let Some(altitude) = self.altitude {
            out.push_str(&format!("<altitude>{altitude}</altitude>"));
        }
        if let Some(accuracy) = self.accuracy {
            out.push_str(&format!("<accuracy>{accuracy}</accuracy>"));
        }
        out.push_str("</geo_location>");
        out
    }

    fn json(&self) -> serde_json::Value {
        serde_json::json!({
            "latitude": self.location.latitude(),
            "longitude": self.location.longitude(),
            "timezone": self.location.timezone(),
            "altitude": self.altitude,
            "accuracy": self.accuracy,
        })
    }
}

/// A named place and where it sits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityData {
    pub city: String,
    pub region: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl fmt::Display for CityData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CityData[city={}, region={}, country={}]",
            self.city, self.region, self.country
        )
    }
}

impl Storable for CityData {
    fn csv(&self) -> String {
        format!(
            "{},{},{},{}",
            self.city,
            self.region,
            self.country,
            self.location.as_ref().map_or(String::new(), Storable::csv)
        )
    }

    fn markup(&self) -> String {
        let mut out = format!(
            "<city_data><city>{}</city><region>{}</region><country>{}</country>",
            self.city, self.region, self.country
        );
        if let Some(location) = &self.location {
            out.push_str(&location.markup());
        }
        out.push_str("</city_data>");
        out
    }

    fn json(&self) -> serde_json::Value {
        serde_json::json!({
            "city": self.city,
            "region": self.region,
            "country": self.country,
            "location": self.location.as_ref().map(Storable::json),
        })
    }
}

/// A point-in-time weather observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub cloudiness: f64,
    pub visibility: f64,
    pub timestamp: NaiveDateTime,
}

impl Storable for WeatherData {
    fn csv(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.temperature,
            self.humidity,
            self.pressure,
            self.wind_speed,
            self.wind_direction,
            self.cloudiness,
            self.visibility
        )
    }

    fn markup(&self) -> String {
        format!(
            "<weather><timestamp>{}</timestamp><temperature>{}</temperature>\
             <humidity>{}</humidity><pressure>{}</pressure>\
             <wind_speed>{}</wind_speed><wind_direction>{}</wind_direction>\
             <cloudiness>{}</cloudiness><visibility>{}</visibility></weather>",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.temperature,
            self.humidity,
            self.pressure,
            self.wind_speed,
            self.wind_direction,
            self.cloudiness,
            self.visibility
        )
    }

    fn json(&self) -> serde_json::Value {
        serde_json::json!({
            "timestamp": self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            "temperature": self.temperature,
            "humidity": self.humidity,
            "pressure": self.pressure,
            "wind_speed": self.wind_speed,
            "wind_direction": self.wind_direction,
            "cloudiness": self.cloudiness,
            "visibility": self.visibility,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_rejects_out_of_range_coordinates() {
        assert_eq!(
            Location::new(91.0, 0.0, None),
            Err(GeoError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            Location::new(0.0, -180.5, None),
            Err(GeoError::LongitudeOutOfRange(-180.5))
        );
        assert!(Location::new(-90.0, 180.0, None).is_ok());
    }

    #[test]
    fn serde_rejects_bad_latitude() {
        let result: Result<Location, _> =
            serde_json::from_str(r#"{"latitude":120.0,"longitude":0.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn display_mentions_the_timezone_only_when_set() {
        let zoned = Location::new(0.0, 0.0, Some("America/Sao_Paulo".to_string())).unwrap();
        assert!(zoned.to_string().contains("tz='America/Sao_Paulo'"));
        let bare = Location::new(0.0, 0.0, None).unwrap();
        assert!(!bare.to_string().contains("tz="));
    }
}
