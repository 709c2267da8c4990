//! Bin recommendation for a scanned item label.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Where an item should go.
pub enum Bin {
    /// Recyclables bin (packaging, paper, cans).
    Recyclables,
    /// Household refuse bin.
    HouseholdRefuse,
    /// Glass drop-off container.
    Glass,
    /// Home or collective composter.
    Compost,
    /// Municipal recycling centre for bulky or hazardous items.
    RecyclingCentre,
}

impl Bin {
    /// Every bin, in display order.
    pub const ALL: [Bin; 5] = [
        Bin::Recyclables,
        Bin::HouseholdRefuse,
        Bin::Glass,
        Bin::Compost,
        Bin::RecyclingCentre,
    ];
}

impl fmt::Display for Bin {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Bin::Recyclables => "Recyclables bin",
            Bin::HouseholdRefuse => "Household refuse bin",
            Bin::Glass => "Glass container",
            Bin::Compost => "Compost",
            Bin::RecyclingCentre => "Recycling centre",
        };
        write!(formatter, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Recommendation for a single item.
pub struct SortingAdvice {
    /// Label the advice was computed for, lower-cased and trimmed.
    pub label: String,
    /// Recommended destination.
    pub bin: Bin,
    /// Short instruction shown next to the bin.
    pub hint: &'static str,
}

/// Recommend a bin for a label such as those produced by an image labeler.
///
/// Keywords match whole words of the label (a trailing plural `s` or `es` is
/// ignored); multi-word keywords match adjacent words. Anything unrecognised goes
/// to household refuse.
#[must_use]
pub fn sorting_advice(label: &str) -> SortingAdvice {
    let normalized = label.trim().to_lowercase();
    let words = normalized
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>();
    let has = |keywords: &[&str]| {
        keywords
            .iter()
            .any(|keyword| contains_keyword(&words, keyword))
    };

    let (bin, hint) = if has(&["glass", "jar", "verre", "bocal"]) {
        (Bin::Glass, "Drop it in a glass container, without lid or cork.")
    } else if has(&[
        "battery",
        "batteries",
        "pile",
        "electronic",
        "phone",
        "computer",
        "paint",
        "furniture",
        "mattress",
        "bulb",
    ]) {
        (Bin::RecyclingCentre, "Bring it to a recycling centre or a collection point in store.")
    } else if has(&[
        "food", "fruit", "vegetable", "peel", "banana", "apple", "coffee", "tea bag", "leaf",
        "leaves", "plant",
    ]) {
        (Bin::Compost, "Compost it, or use the household refuse bin if you have no composter.")
    } else if has(&["paper bag"]) {
        (Bin::Recyclables, "Paper bags go loose in the recyclables bin.")
    } else if has(&["bag", "film", "sachet"]) {
        (Bin::HouseholdRefuse, "Plastic films and bags go with household refuse.")
    } else if has(&[
        "bottle",
        "can",
        "tin",
        "carton",
        "cardboard",
        "paper",
        "newspaper",
        "magazine",
        "leaflet",
        "box",
        "aluminium",
        "aluminum",
        "packaging",
        "plastic",
    ]) {
        (Bin::Recyclables, "Empty it and put it loose in the recyclables bin.")
    } else {
        (Bin::HouseholdRefuse, "When in doubt, use the household refuse bin.")
    };

    SortingAdvice {
        label: normalized,
        bin,
        hint,
    }
}

fn contains_keyword(words: &[&str], keyword: &str) -> bool {
    let parts = keyword.split_whitespace().collect::<Vec<_>>();
    if parts.is_empty() {
        return false;
    }
    words.windows(parts.len()).any(|window| {
        window
            .iter()
            .zip(&parts)
            .all(|(word, part)| same_word(word, part))
    })
}

fn same_word(word: &str, keyword: &str) -> bool {
    word == keyword
        || word.strip_suffix('s') == Some(keyword)
        || word.strip_suffix("es") == Some(keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packaging_goes_to_recyclables() {
        assert_eq!(sorting_advice("Plastic bottle").bin, Bin::Recyclables);
        assert_eq!(sorting_advice("Cardboard").bin, Bin::Recyclables);
        assert_eq!(sorting_advice("tin can").bin, Bin::Recyclables);
    }

    #[test]
    fn glass_wins_over_bottle() {
        assert_eq!(sorting_advice("Glass bottle").bin, Bin::Glass);
        assert_eq!(sorting_advice("jam jar").bin, Bin::Glass);
    }

    #[test]
    fn plastic_bags_are_refuse() {
        assert_eq!(sorting_advice("Plastic bag").bin, Bin::HouseholdRefuse);
    }

    #[test]
    fn organic_and_hazardous_items() {
        assert_eq!(sorting_advice("Banana").bin, Bin::Compost);
        assert_eq!(sorting_advice("AA battery").bin, Bin::RecyclingCentre);
    }

    #[test]
    fn keywords_match_whole_words_only() {
        assert_eq!(sorting_advice("Paper bag").bin, Bin::Recyclables);
        assert_eq!(sorting_advice("Candle").bin, Bin::HouseholdRefuse);
        assert_eq!(sorting_advice("Sunglasses").bin, Bin::HouseholdRefuse);
        assert_eq!(sorting_advice("Leaflet").bin, Bin::Recyclables);
        assert_eq!(sorting_advice("Cabbage").bin, Bin::HouseholdRefuse);
        assert_eq!(sorting_advice("Pecan").bin, Bin::HouseholdRefuse);
    }

    #[test]
    fn plurals_and_punctuation_still_match() {
        assert_eq!(sorting_advice("Plastic bottles").bin, Bin::Recyclables);
        assert_eq!(sorting_advice("glass-jars").bin, Bin::Glass);
        assert_eq!(sorting_advice("Used tea bags").bin, Bin::Compost);
        assert_eq!(sorting_advice("Dead leaves").bin, Bin::Compost);
        assert_eq!(sorting_advice("Shopping bags").bin, Bin::HouseholdRefuse);
    }

    #[test]
    fn unknown_label_defaults_to_refuse() {
        let advice = sorting_advice("  Toothbrush ");
        assert_eq!(advice.bin, Bin::HouseholdRefuse);
        assert_eq!(advice.label, "toothbrush");
    }
}
