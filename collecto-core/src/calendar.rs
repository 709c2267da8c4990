//! Human-readable collection days and next-collection lookup.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::model::{Passage, WasteType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Language used for weekday names and list joining.
pub enum Locale {
    /// English (`Monday and Thursday`).
    #[default]
    #[serde(alias = "en")]
    English,
    /// French (`Lundi et Jeudi`).
    #[serde(alias = "fr")]
    French,
}

impl Locale {
    /// Capitalized weekday name.
    #[must_use]
    pub fn weekday_name(self, day: Weekday) -> &'static str {
        match (self, day) {
            (Locale::English, Weekday::Mon) => "Monday",
            (Locale::English, Weekday::Tue) => "Tuesday",
            (Locale::English, Weekday::Wed) => "Wednesday",
            (Locale::English, Weekday::Thu) => "Thursday",
            (Locale::English, Weekday::Fri) => "Friday",
            (Locale::English, Weekday::Sat) => "Saturday",
            (Locale::English, Weekday::Sun) => "Sunday",
            (Locale::French, Weekday::Mon) => "Lundi",
            (Locale::French, Weekday::Tue) => "Mardi",
            (Locale::French, Weekday::Wed) => "Mercredi",
            (Locale::French, Weekday::Thu) => "Jeudi",
            (Locale::French, Weekday::Fri) => "Vendredi",
            (Locale::French, Weekday::Sat) => "Samedi",
            (Locale::French, Weekday::Sun) => "Dimanche",
        }
    }

    /// Text shown when a stream has no collection day.
    #[must_use]
    pub fn no_collection(self) -> &'static str {
        match self {
            Locale::English => "No collection scheduled",
            Locale::French => "Aucune collecte prévue",
        }
    }

    /// Word used for the current day.
    #[must_use]
    pub fn today(self) -> &'static str {
        match self {
            Locale::English => "Today",
            Locale::French => "Aujourd'hui",
        }
    }

    /// Name of a collection stream.
    #[must_use]
    pub fn stream_name(self, waste_type: WasteType) -> &'static str {
        match (self, waste_type) {
            (Locale::English, WasteType::HouseholdRefuse) => "Household refuse",
            (Locale::English, WasteType::Recyclables) => "Recyclables",
            (Locale::French, WasteType::HouseholdRefuse) => "Ordures ménagères",
            (Locale::French, WasteType::Recyclables) => "Tri sélectif",
        }
    }

    /// Lower-case name of a passage.
    #[must_use]
    pub fn passage_name(self, passage: Passage) -> &'static str {
        match (self, passage) {
            (Locale::English, Passage::Day) => "day",
            (Locale::English, Passage::Night) => "night",
            (Locale::French, Passage::Day) => "jour",
            (Locale::French, Passage::Night) => "nuit",
        }
    }

    fn conjunction(self) -> &'static str {
        match self {
            Locale::English => "and",
            Locale::French => "et",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Next time a stream is collected, relative to a given day.
pub enum NextCollection {
    /// The stream is collected on the given day itself.
    Today,
    /// The stream is collected later in the week.
    Upcoming {
        /// Weekday of the next collection.
        day: Weekday,
        /// Days from the reference day, between 1 and 6.
        in_days: u32,
    },
}

impl NextCollection {
    /// `Today` or the weekday name of the next collection.
    #[must_use]
    pub fn label(self, locale: Locale) -> &'static str {
        match self {
            NextCollection::Today => locale.today(),
            NextCollection::Upcoming { day, .. } => locale.weekday_name(day),
        }
    }

    /// Label followed by how far away the collection is, e.g. `Thursday (in 3 days)`.
    #[must_use]
    pub fn relative_label(self, locale: Locale) -> String {
        let label = self.label(locale);
        match (locale, self.in_days()) {
            (_, 0) => label.to_owned(),
            (Locale::English, 1) => format!("{label} (tomorrow)"),
            (Locale::English, days) => format!("{label} (in {days} days)"),
            (Locale::French, 1) => format!("{label} (demain)"),
            (Locale::French, days) => format!("{label} (dans {days} jours)"),
        }
    }

    /// Number of days until the collection; zero for today.
    #[must_use]
    pub fn in_days(self) -> u32 {
        match self {
            NextCollection::Today => 0,
            NextCollection::Upcoming { in_days, .. } => in_days,
        }
    }
}

/// Join weekday names the way the locale lists items.
///
/// One day is printed as is, two are joined with the conjunction, longer lists are
/// comma-separated with the conjunction before the last name.
#[must_use]
pub fn format_collection_days(days: &[Weekday], locale: Locale) -> String {
    let names = days
        .iter()
        .map(|day| locale.weekday_name(*day))
        .collect::<Vec<_>>();

    match names.as_slice() {
        [] => locale.no_collection().to_owned(),
        [single] => (*single).to_owned(),
        [init @ .., last] => format!("{} {} {last}", init.join(", "), locale.conjunction()),
    }
}

/// First collection on or after `today`, looking one week ahead.
#[must_use]
pub fn next_collection_day(days: &[Weekday], today: NaiveDate) -> Option<NextCollection> {
    let mut day = today.weekday();
    for offset in 0..7 {
        if days.contains(&day) {
            return Some(if offset == 0 {
                NextCollection::Today
            } else {
                NextCollection::Upcoming {
                    day,
                    in_days: offset,
                }
            });
        }
        day = day.succ();
    }
    None
}
