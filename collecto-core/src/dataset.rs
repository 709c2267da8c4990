//! Loading of the collection-zone dataset published by the metropolitan open-data portal.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Weekday;
use serde::Deserialize;
use tracing::{debug, info};

use crate::model::{CollectionZone, GeoPoint, Passage, WasteType};

/// Dataset shipped with the crate, used when no external file is configured.
const BUNDLED_ZONES: &str = include_str!("../data/collection_zones.json");

#[derive(thiserror::Error, Debug)]
/// Errors raised while loading a zone dataset.
pub enum DatasetError {
    /// Dataset file could not be read.
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Dataset is not a JSON array of zone records.
    #[error("Malformed dataset: {0}")]
    Json(#[from] serde_json::Error),
    /// A record names a weekday that is not recognised.
    #[error("Record {index}: unknown weekday {value:?}")]
    UnknownWeekday {
        /// Position of the record in the array.
        index: usize,
        /// Offending value.
        value: String,
    },
    /// A record carries a waste type other than `OM` or `TRI`.
    #[error("Record {index}: unknown waste type {value:?}")]
    UnknownWasteType {
        /// Position of the record in the array.
        index: usize,
        /// Offending value.
        value: String,
    },
    /// A record carries an unknown passage tag.
    #[error("Record {index}: unknown passage {value:?}")]
    UnknownPassage {
        /// Position of the record in the array.
        index: usize,
        /// Offending value.
        value: String,
    },
    /// A record's coordinates are outside the valid range.
    #[error("Record {index}: coordinates out of range")]
    InvalidPoint {
        /// Position of the record in the array.
        index: usize,
    },
}

/// Record as published by the data provider.
#[derive(Debug, Deserialize)]
struct RawZone {
    commune: String,
    #[serde(default)]
    code: Option<RawCode>,
    #[serde(rename = "type")]
    typ: String,
    jour_col: RawDays,
    passage: String,
    geo_point_2d: RawPoint,
    // cdate / mdate are published too but carry nothing we use
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCode {
    Text(String),
    Number(i64),
}

/// Weekdays come either as an array or as a single separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDays {
    List(Vec<String>),
    Joined(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPoint {
    Object { lat: f64, lon: f64 },
    Pair([f64; 2]),
}

/// Immutable, validated list of collection zones.
#[derive(Debug, Clone, Default)]
pub struct ZoneDataset {
    zones: Vec<CollectionZone>,
}

impl ZoneDataset {
    /// Wrap already-built zones.
    #[must_use]
    pub fn from_zones(zones: Vec<CollectionZone>) -> Self {
        Self { zones }
    }

    /// Parse a dataset from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns a [`DatasetError`] when the JSON is malformed or a record carries an
    /// unknown weekday, waste type, passage, or invalid coordinates.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let raw = serde_json::from_str::<Vec<RawZone>>(json)?;
        let zones = raw
            .into_iter()
            .enumerate()
            .map(|(index, record)| convert(index, record))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(zones = zones.len(), "parsed collection zones");
        Ok(Self { zones })
    }

    /// Read and parse a dataset file.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Io`] when the file cannot be read, or any parse error
    /// of [`ZoneDataset::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let json = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&json)?;
        info!(path = %path.display(), zones = dataset.len(), "loaded collection zones");
        Ok(dataset)
    }

    /// Dataset shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns a [`DatasetError`] if the bundled file fails to parse.
    pub fn bundled() -> Result<Self, DatasetError> {
        let dataset = Self::from_json_str(BUNDLED_ZONES)?;
        info!(zones = dataset.len(), "loaded bundled collection zones");
        Ok(dataset)
    }

    /// All zones in dataset order.
    #[must_use]
    pub fn zones(&self) -> &[CollectionZone] {
        &self.zones
    }

    /// Consume the dataset, returning its zones.
    #[must_use]
    pub fn into_zones(self) -> Vec<CollectionZone> {
        self.zones
    }

    /// Number of zone records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

fn convert(index: usize, raw: RawZone) -> Result<CollectionZone, DatasetError> {
    let waste_type =
        WasteType::from_tag(&raw.typ).ok_or_else(|| DatasetError::UnknownWasteType {
            index,
            value: raw.typ.clone(),
        })?;

    let passage = Passage::from_tag(&raw.passage).ok_or_else(|| DatasetError::UnknownPassage {
        index,
        value: raw.passage.clone(),
    })?;

    let names = match raw.jour_col {
        RawDays::List(names) => names,
        RawDays::Joined(joined) => joined
            .split(|ch: char| ch == ',' || ch == ';' || ch.is_whitespace())
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
            .collect(),
    };

    let days = names
        .iter()
        .map(|name| {
            parse_weekday(name).ok_or_else(|| DatasetError::UnknownWeekday {
                index,
                value: name.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let point = match raw.geo_point_2d {
        RawPoint::Object { lat, lon } => GeoPoint::new(lat, lon),
        RawPoint::Pair([lat, lon]) => GeoPoint::new(lat, lon),
    };
    if !point.is_valid() {
        return Err(DatasetError::InvalidPoint { index });
    }

    let code = raw.code.map(|code| match code {
        RawCode::Text(text) => text,
        RawCode::Number(number) => number.to_string(),
    });

    Ok(CollectionZone {
        commune: raw.commune,
        code,
        waste_type,
        days,
        passage,
        point,
    })
}

/// Parse an English or French weekday name, full or abbreviated, ignoring case.
#[must_use]
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let normalized = name.trim().to_lowercase();
    if let Ok(day) = normalized.parse::<Weekday>() {
        return Some(day);
    }

    match normalized.as_str() {
        "lundi" => Some(Weekday::Mon),
        "mardi" => Some(Weekday::Tue),
        "mercredi" => Some(Weekday::Wed),
        "jeudi" => Some(Weekday::Thu),
        "vendredi" => Some(Weekday::Fri),
        "samedi" => Some(Weekday::Sat),
        "dimanche" => Some(Weekday::Sun),
        _ => None,
    }
}
