//! Domain data structures for communes, collection zones, and schedules.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::calendar::Locale;
use crate::geo::calculate_distance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Door-to-door waste streams published in the collection dataset.
pub enum WasteType {
    /// Household refuse (`OM`), the non-sorted stream.
    HouseholdRefuse,
    /// Sorted recyclables (`TRI`).
    Recyclables,
}

impl WasteType {
    /// Parse a dataset tag such as `OM` or `TRI`, ignoring case.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_uppercase().as_str() {
            "OM" => Some(Self::HouseholdRefuse),
            "TRI" => Some(Self::Recyclables),
            _ => None,
        }
    }
}

impl fmt::Display for WasteType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WasteType::HouseholdRefuse => "household refuse",
            WasteType::Recyclables => "recyclables",
        };
        write!(formatter, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Time of day at which the collection truck passes.
pub enum Passage {
    /// Daytime collection.
    Day,
    /// Nighttime collection.
    Night,
}

impl Passage {
    /// Parse a dataset tag (`JOUR`, `NUIT`, `DAY`, `NIGHT`), ignoring case.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_uppercase().as_str() {
            "JOUR" | "DAY" => Some(Self::Day),
            "NUIT" | "NIGHT" => Some(Self::Night),
            _ => None,
        }
    }
}

impl fmt::Display for Passage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(Locale::English.passage_name(*self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// WGS84 coordinate pair in decimal degrees.
pub struct GeoPoint {
    /// Latitude, positive north.
    pub lat: f64,
    /// Longitude, positive east.
    pub lon: f64,
}

impl GeoPoint {
    /// Construct a point from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether both components lie within their valid ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    /// Great-circle distance to `other` in kilometres.
    #[must_use]
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        calculate_distance(self.lat, self.lon, other.lat, other.lon)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.5}, {:.5}", self.lat, self.lon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One collection stream for one commune, as published by the data provider.
pub struct CollectionZone {
    /// Commune name as spelled in the dataset.
    pub commune: String,
    /// Administrative code of the commune, when published.
    pub code: Option<String>,
    /// Collected stream.
    pub waste_type: WasteType,
    /// Weekdays on which the stream is collected, in dataset order.
    pub days: Vec<Weekday>,
    /// Time of day of the collection.
    pub passage: Passage,
    /// Representative point of the zone.
    pub point: GeoPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Both collection streams of a commune combined into one view.
pub struct CollectionInfo {
    /// Commune name as spelled in the dataset.
    pub commune: String,
    /// Household refuse collection days; empty when the stream is not published.
    pub household_days: Vec<Weekday>,
    /// Recyclables collection days; empty when the stream is not published.
    pub recyclables_days: Vec<Weekday>,
    /// Passage of the household refuse truck.
    pub household_passage: Option<Passage>,
    /// Passage of the recyclables truck.
    pub recyclables_passage: Option<Passage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Position of the user together with the city it resolves to.
pub struct LocationReading {
    /// Measured position.
    pub point: GeoPoint,
    /// City name from reverse geocoding, or the configured fallback.
    pub city: String,
}
