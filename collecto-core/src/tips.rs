//! Recycling tips shown to users.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::sorting::Bin;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// A short recycling tip about one bin.
pub struct Tip {
    /// Bin the tip is about.
    pub bin: Bin,
    /// Headline.
    pub title: &'static str,
    /// Body text.
    pub text: &'static str,
}

const TIPS: &[Tip] = &[
    Tip {
        bin: Bin::Recyclables,
        title: "Loose, not bagged",
        text: "Put recyclables loose in the bin. A closed bag cannot be opened at the sorting centre.",
    },
    Tip {
        bin: Bin::Recyclables,
        title: "Empty, no need to rinse",
        text: "Packaging only has to be well emptied. Rinsing wastes water.",
    },
    Tip {
        bin: Bin::Recyclables,
        title: "Keep items apart",
        text: "Do not nest packaging inside each other; sorting machines need to see every item.",
    },
    Tip {
        bin: Bin::Glass,
        title: "Glass has its own container",
        text: "Bottles and jars go to the glass drop-off point. Crockery and window glass do not.",
    },
    Tip {
        bin: Bin::Compost,
        title: "A third of the bin is organic",
        text: "Peelings, coffee grounds and leftovers make good compost instead of refuse.",
    },
    Tip {
        bin: Bin::HouseholdRefuse,
        title: "Bin out the evening before",
        text: "For night collections, put the bin out after 7 p.m. and bring it back in the morning.",
    },
    Tip {
        bin: Bin::RecyclingCentre,
        title: "Batteries never go in a bin",
        text: "Batteries and bulbs are collected in stores and at recycling centres.",
    },
    Tip {
        bin: Bin::RecyclingCentre,
        title: "Bulky items",
        text: "Furniture, mattresses and appliances are taken at recycling centres, free for residents.",
    },
];

/// Every tip in display order.
#[must_use]
pub fn all_tips() -> &'static [Tip] {
    TIPS
}

/// Tips about one bin.
pub fn tips_for(bin: Bin) -> impl Iterator<Item = &'static Tip> {
    TIPS.iter().filter(move |tip| tip.bin == bin)
}

/// Tip for a given day; the same date always yields the same tip.
#[must_use]
pub fn tip_of_the_day(date: NaiveDate) -> Option<&'static Tip> {
    let ordinal = usize::try_from(date.ordinal0()).ok()?;
    let index = ordinal.checked_rem(TIPS.len())?;
    TIPS.get(index)
}
