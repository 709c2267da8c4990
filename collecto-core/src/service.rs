//! High-level service facade used by the front ends.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::{Locale, NextCollection, format_collection_days, next_collection_day};
use crate::location::LocationService;
use crate::model::{CollectionInfo, CollectionZone, GeoPoint, LocationReading, Passage};
use crate::resolver::ZoneResolver;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Display-ready view of one collection stream.
pub struct StreamSummary {
    /// Formatted collection days.
    pub days: String,
    /// Time of day of the collection, if published.
    pub passage: Option<Passage>,
    /// Next collection relative to the reference day.
    pub next: Option<NextCollection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Display-ready collection schedule of a commune.
pub struct ScheduleSummary {
    /// Raw combined information.
    pub info: CollectionInfo,
    /// Household refuse stream.
    pub household: StreamSummary,
    /// Recyclables stream.
    pub recyclables: StreamSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Schedule resolved from the device position.
pub struct LocatedSchedule {
    /// Where the device is.
    pub reading: LocationReading,
    /// Schedule of the nearest commune; `None` when no zone is loaded.
    pub summary: Option<ScheduleSummary>,
}

/// Public entry point for commune and location lookups.
pub struct CollectoService {
    resolver: Arc<ZoneResolver>,
    location: Option<Arc<LocationService>>,
    locale: Locale,
}

impl CollectoService {
    /// Create a new service bound to the provided resolver.
    #[must_use]
    pub fn new(resolver: Arc<ZoneResolver>) -> Self {
        Self {
            resolver,
            location: None,
            locale: Locale::default(),
        }
    }

    /// Attach a location service for position-based lookups.
    #[must_use]
    pub fn with_location(mut self, location: Arc<LocationService>) -> Self {
        self.location = Some(location);
        self
    }

    /// Use `locale` for formatted output.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Locale used for formatted output.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Sorted commune names.
    #[must_use]
    pub fn communes(&self) -> Vec<String> {
        self.resolver.available_communes()
    }

    /// Collection days of a commune.
    #[must_use]
    pub fn collection_info(&self, commune: &str) -> Option<CollectionInfo> {
        self.resolver.collection_info(commune)
    }

    /// Zone closest to `point` with its distance in kilometres.
    #[must_use]
    pub fn nearest_zone(&self, point: GeoPoint) -> Option<(&CollectionZone, f64)> {
        self.resolver.nearest_zone_with_distance(point.lat, point.lon)
    }

    /// Schedule of a commune relative to `today`.
    #[must_use]
    pub fn schedule_for_commune(&self, commune: &str, today: NaiveDate) -> Option<ScheduleSummary> {
        self.resolver
            .collection_info(commune)
            .map(|info| self.summarize(info, today))
    }

    /// Schedule of the commune nearest to `point`, relative to `today`.
    #[must_use]
    pub fn schedule_near(&self, point: GeoPoint, today: NaiveDate) -> Option<ScheduleSummary> {
        self.resolver
            .collection_info_by_location(point.lat, point.lon)
            .map(|info| self.summarize(info, today))
    }

    /// Current device location, if a location service is attached and a fix is available.
    pub async fn locate(&self) -> Option<LocationReading> {
        self.location.as_ref()?.current_location().await
    }

    /// Schedule for the device position, relative to `today`.
    pub async fn schedule_here(&self, today: NaiveDate) -> Option<LocatedSchedule> {
        let reading = self.locate().await?;
        let summary = self.schedule_near(reading.point, today);
        Some(LocatedSchedule { reading, summary })
    }

    fn summarize(&self, info: CollectionInfo, today: NaiveDate) -> ScheduleSummary {
        let household = StreamSummary {
            days: format_collection_days(&info.household_days, self.locale),
            passage: info.household_passage,
            next: next_collection_day(&info.household_days, today),
        };
        let recyclables = StreamSummary {
            days: format_collection_days(&info.recyclables_days, self.locale),
            passage: info.recyclables_passage,
            next: next_collection_day(&info.recyclables_days, today),
        };

        ScheduleSummary {
            info,
            household,
            recyclables,
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Weekday;

    use super::*;
    use crate::dataset::ZoneDataset;
    use crate::location::FixedPosition;
    use crate::model::WasteType;
    use crate::ports::{PortError, ReverseGeocodePort};

    struct NamedCity;

    #[async_trait]
    impl ReverseGeocodePort for NamedCity {
        fn name(&self) -> &str {
            "named"
        }

        async fn city_for(&self, _point: GeoPoint) -> Result<String, PortError> {
            Ok("Bordeaux".to_owned())
        }
    }

    fn resolver() -> Arc<ZoneResolver> {
        let zones = vec![
            CollectionZone {
                commune: "Bordeaux".to_owned(),
                code: Some("33063".to_owned()),
                waste_type: WasteType::HouseholdRefuse,
                days: vec![Weekday::Mon, Weekday::Thu],
                passage: Passage::Night,
                point: GeoPoint::new(44.837_789, -0.579_18),
            },
            CollectionZone {
                commune: "Mérignac".to_owned(),
                code: Some("33281".to_owned()),
                waste_type: WasteType::Recyclables,
                days: vec![Weekday::Wed],
                passage: Passage::Day,
                point: GeoPoint::new(44.8635, -0.6442),
            },
        ];
        Arc::new(ZoneResolver::new(ZoneDataset::from_zones(zones)))
    }

    fn tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 4).expect("valid date")
    }

    #[test]
    fn summary_formats_both_streams() {
        let service = CollectoService::new(resolver());
        let summary = service
            .schedule_for_commune("bordeaux", tuesday())
            .expect("Bordeaux is loaded");

        assert_eq!(summary.household.days, "Monday and Thursday");
        assert_eq!(summary.household.passage, Some(Passage::Night));
        assert_eq!(
            summary.household.next,
            Some(NextCollection::Upcoming {
                day: Weekday::Thu,
                in_days: 2
            })
        );
        assert_eq!(summary.recyclables.days, "No collection scheduled");
        assert_eq!(summary.recyclables.next, None);
    }

    #[test]
    fn summary_follows_locale() {
        let service = CollectoService::new(resolver()).with_locale(Locale::French);
        let summary = service
            .schedule_near(GeoPoint::new(44.86, -0.64), tuesday())
            .expect("zones are loaded");

        assert_eq!(summary.info.commune, "Mérignac");
        assert_eq!(summary.recyclables.days, "Mercredi");
        assert_eq!(summary.household.days, "Aucune collecte prévue");
    }

    #[test]
    fn unknown_commune_has_no_summary() {
        let service = CollectoService::new(resolver());
        assert_eq!(service.schedule_for_commune("Lyon", tuesday()), None);
    }

    #[tokio::test]
    async fn no_location_service_means_no_located_schedule() {
        let service = CollectoService::new(resolver());
        assert_eq!(service.schedule_here(tuesday()).await, None);
    }

    #[tokio::test]
    async fn located_schedule_uses_device_position() {
        let location = LocationService::new(
            Arc::new(FixedPosition::new(Some(GeoPoint::new(44.837_789, -0.579_18)))),
            Arc::new(NamedCity),
        );
        let service = CollectoService::new(resolver()).with_location(Arc::new(location));

        let located = service
            .schedule_here(tuesday())
            .await
            .expect("position is configured");
        assert_eq!(located.reading.city, "Bordeaux");
        let summary = located.summary.expect("zones are loaded");
        assert_eq!(summary.info.commune, "Bordeaux");
    }
}
