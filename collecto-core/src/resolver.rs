//! Commune and position lookups over the loaded collection zones.
//!
//! Duplicate (commune, stream) records resolve to the first one in dataset order,
//! and equidistant zones resolve to the one listed first.

use std::collections::BTreeSet;

use tracing::debug;

use crate::dataset::ZoneDataset;
use crate::model::{CollectionInfo, CollectionZone, GeoPoint, WasteType};

/// Answers "when is my commune collected?" from an immutable zone list.
#[derive(Debug, Clone, Default)]
pub struct ZoneResolver {
    zones: Vec<CollectionZone>,
}

impl ZoneResolver {
    /// Build a resolver over the given dataset.
    #[must_use]
    pub fn new(dataset: ZoneDataset) -> Self {
        Self {
            zones: dataset.into_zones(),
        }
    }

    /// All zones in dataset order.
    #[must_use]
    pub fn zones(&self) -> &[CollectionZone] {
        &self.zones
    }

    /// Number of loaded zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether no zone is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Collection days of a commune, matched case-insensitively on the exact name.
    ///
    /// Returns `None` when no record names the commune. A stream missing from the
    /// dataset shows up as an empty day list with no passage.
    #[must_use]
    pub fn collection_info(&self, commune: &str) -> Option<CollectionInfo> {
        let wanted = commune.to_lowercase();
        let matching = self
            .zones
            .iter()
            .filter(|zone| zone.commune.to_lowercase() == wanted)
            .collect::<Vec<_>>();

        let first = *matching.first()?;
        let stream = |waste_type: WasteType| {
            matching
                .iter()
                .copied()
                .find(|zone| zone.waste_type == waste_type)
        };
        let household = stream(WasteType::HouseholdRefuse);
        let recyclables = stream(WasteType::Recyclables);

        debug!(
            commune = %first.commune,
            household = household.is_some(),
            recyclables = recyclables.is_some(),
            "resolved commune"
        );

        Some(CollectionInfo {
            commune: first.commune.clone(),
            household_days: household.map(|zone| zone.days.clone()).unwrap_or_default(),
            recyclables_days: recyclables
                .map(|zone| zone.days.clone())
                .unwrap_or_default(),
            household_passage: household.map(|zone| zone.passage),
            recyclables_passage: recyclables.map(|zone| zone.passage),
        })
    }

    /// Zone closest to the given position, with its distance in kilometres.
    ///
    /// Returns `None` when no zone is loaded or a coordinate is not finite.
    #[must_use]
    pub fn nearest_zone_with_distance(&self, lat: f64, lon: f64) -> Option<(&CollectionZone, f64)> {
        if !lat.is_finite() || !lon.is_finite() {
            debug!(lat, lon, "ignoring non-finite position");
            return None;
        }

        let origin = GeoPoint::new(lat, lon);
        let mut nearest: Option<(&CollectionZone, f64)> = None;

        for zone in &self.zones {
            let distance = origin.distance_to(&zone.point);
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((zone, distance));
            }
        }

        if let Some((zone, distance)) = nearest {
            debug!(commune = %zone.commune, distance_km = distance, "nearest zone");
        }
        nearest
    }

    /// Zone closest to the given position; `None` when no zone is loaded or a
    /// coordinate is not finite.
    #[must_use]
    pub fn nearest_zone(&self, lat: f64, lon: f64) -> Option<&CollectionZone> {
        self.nearest_zone_with_distance(lat, lon)
            .map(|(zone, _)| zone)
    }

    /// Collection days of the commune owning the zone closest to the position.
    #[must_use]
    pub fn collection_info_by_location(&self, lat: f64, lon: f64) -> Option<CollectionInfo> {
        let zone = self.nearest_zone(lat, lon)?;
        self.collection_info(&zone.commune)
    }

    /// Sorted, deduplicated commune names.
    #[must_use]
    pub fn available_communes(&self) -> Vec<String> {
        self.zones
            .iter()
            .map(|zone| zone.commune.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
