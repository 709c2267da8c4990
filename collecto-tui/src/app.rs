use std::sync::Arc;

use chrono::{Local, NaiveDate};
use collecto_core::{CollectoService, GeoPoint, ScheduleSummary, Tip, all_tips};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    CommuneSelect,
    LocationInput,
    ScheduleView,
    Tips,
}

pub(crate) struct App {
    pub service: Arc<CollectoService>,

    pub screen: Screen,
    /// Screen to return to when leaving the schedule.
    pub previous_screen: Screen,

    pub communes: Vec<String>,
    pub commune_filter: String,
    pub commune_list_index: usize,

    pub coordinate_input: String,

    pub schedule: Option<ScheduleSummary>,
    /// Where the schedule was looked up from, when not picked by name.
    pub origin: Option<String>,

    pub tip_index: usize,

    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(service: Arc<CollectoService>) -> Self {
        let communes = service.communes();
        Self {
            service,
            screen: Screen::CommuneSelect,
            previous_screen: Screen::CommuneSelect,
            communes,
            commune_filter: String::new(),
            commune_list_index: 0,
            coordinate_input: String::new(),
            schedule: None,
            origin: None,
            tip_index: 0,
            is_loading: false,
            error_message: None,
        }
    }

    pub(crate) fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Communes whose name contains the filter, ignoring case.
    pub(crate) fn filtered_communes(&self) -> Vec<&str> {
        let filter = self.commune_filter.trim().to_lowercase();
        self.communes
            .iter()
            .map(String::as_str)
            .filter(|commune| filter.is_empty() || commune.to_lowercase().contains(&filter))
            .collect()
    }

    pub(crate) fn push_filter(&mut self, character: char) {
        self.commune_filter.push(character);
        self.commune_list_index = 0;
    }

    pub(crate) fn pop_filter(&mut self) {
        self.commune_filter.pop();
        self.commune_list_index = 0;
    }

    pub(crate) fn select_current_commune(&mut self) {
        let Some(commune) = self
            .filtered_communes()
            .get(self.commune_list_index)
            .map(|name| (*name).to_owned())
        else {
            self.error_message = Some("No commune matches the filter".into());
            return;
        };

        match self.service.schedule_for_commune(&commune, Self::today()) {
            Some(schedule) => self.show_schedule(schedule, None),
            None => self.error_message = Some(format!("No collection data for {commune}")),
        }
    }

    pub(crate) fn show_schedule(&mut self, schedule: ScheduleSummary, origin: Option<String>) {
        self.schedule = Some(schedule);
        self.origin = origin;
        self.error_message = None;
        if self.screen != Screen::ScheduleView {
            self.previous_screen = self.screen;
        }
        self.screen = Screen::ScheduleView;
    }

    pub(crate) fn next_screen(&mut self) {
        self.screen = match self.screen {
            Screen::CommuneSelect => Screen::LocationInput,
            Screen::LocationInput => Screen::Tips,
            Screen::Tips | Screen::ScheduleView => Screen::CommuneSelect,
        };
        self.error_message = None;
    }

    pub(crate) fn current_tip(&self) -> Option<&'static Tip> {
        all_tips().get(self.tip_index)
    }

    pub(crate) fn next_tip(&mut self) {
        if self.tip_index + 1 < all_tips().len() {
            self.tip_index += 1;
        } else {
            self.tip_index = 0;
        }
    }

    pub(crate) fn previous_tip(&mut self) {
        self.tip_index = self
            .tip_index
            .checked_sub(1)
            .unwrap_or_else(|| all_tips().len().saturating_sub(1));
    }
}

/// Parse "lat lon" or "lat, lon" typed by the user.
pub(crate) fn parse_coordinates(input: &str) -> Option<GeoPoint> {
    let mut parts = input
        .split(|ch: char| ch == ',' || ch == ';' || ch.is_whitespace())
        .filter(|segment| !segment.is_empty());

    let lat = parts.next()?.parse::<f64>().ok()?;
    let lon = parts.next()?.parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let point = GeoPoint::new(lat, lon);
    point.is_valid().then_some(point)
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::Weekday;
    use collecto_core::{CollectionZone, Passage, WasteType, ZoneDataset, ZoneResolver};

    use super::*;

    pub(crate) fn app() -> App {
        let zone = |commune: &str, lat: f64, lon: f64| CollectionZone {
            commune: commune.to_owned(),
            code: None,
            waste_type: WasteType::HouseholdRefuse,
            days: vec![Weekday::Mon],
            passage: Passage::Day,
            point: GeoPoint::new(lat, lon),
        };
        let dataset = ZoneDataset::from_zones(vec![
            zone("Bordeaux", 44.837_789, -0.579_18),
            zone("Bègles", 44.8086, -0.5478),
            zone("Mérignac", 44.8635, -0.6442),
        ]);
        let service = CollectoService::new(Arc::new(ZoneResolver::new(dataset)));
        App::new(Arc::new(service))
    }

    #[test]
    fn coordinates_in_common_notations() {
        assert_eq!(
            parse_coordinates("44.8378 -0.5792"),
            Some(GeoPoint::new(44.8378, -0.5792))
        );
        assert_eq!(
            parse_coordinates(" 44.8378, -0.5792 "),
            Some(GeoPoint::new(44.8378, -0.5792))
        );
    }

    #[test]
    fn bad_coordinates_are_rejected() {
        assert_eq!(parse_coordinates("44.8"), None);
        assert_eq!(parse_coordinates("north 3"), None);
        assert_eq!(parse_coordinates("1 2 3"), None);
        assert_eq!(parse_coordinates("91 0"), None);
    }

    #[test]
    fn filter_narrows_the_commune_list() {
        let mut app = app();
        assert_eq!(app.filtered_communes().len(), 3);

        app.push_filter('M');
        app.push_filter('é');
        assert_eq!(app.filtered_communes(), vec!["Mérignac"]);

        app.pop_filter();
        app.pop_filter();
        assert_eq!(app.filtered_communes().len(), 3);
    }

    #[test]
    fn selecting_a_commune_opens_its_schedule() {
        let mut app = app();
        app.push_filter('b');
        app.push_filter('o');
        app.select_current_commune();

        assert_eq!(app.screen, Screen::ScheduleView);
        assert_eq!(app.previous_screen, Screen::CommuneSelect);
        let schedule = app.schedule.as_ref().expect("schedule loaded");
        assert_eq!(schedule.info.commune, "Bordeaux");
    }

    #[test]
    fn empty_selection_reports_an_error() {
        let mut app = app();
        app.push_filter('z');
        app.select_current_commune();
        assert_eq!(app.screen, Screen::CommuneSelect);
        assert!(app.error_message.is_some(), "error expected");
    }

    #[test]
    fn tips_wrap_in_both_directions() {
        let mut app = app();
        app.previous_tip();
        assert_eq!(app.tip_index, all_tips().len() - 1);
        app.next_tip();
        assert_eq!(app.tip_index, 0);
    }
}
