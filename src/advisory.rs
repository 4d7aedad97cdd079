//! # Advisory Classification
//!
//! Normalizes the raw hazard lines extracted per zone into the fixed set of
//! advisory labels shown in the card banner, and derives the fishing outlook
//! from the Atlantic seas value.

use crate::ZoneSet;
use std::collections::BTreeSet;

/// Sentinel shown when no zone carries an active advisory.
pub const NO_ADVISORIES: &str = "No Active Advisories";

/// Seas at or above this height flag the offshore fishing outlook as rough.
const ROUGH_SEAS_FT: f64 = 8.0;

/// Build the advisory label list for the card banner.
///
/// Each zone's raw advisory phrase is classified by substring into one of
/// the four normalized labels; phrases matching none pass through verbatim.
/// The synopsis is scanned separately for surf hazards. The result is
/// deduplicated, sorted, and never empty; an advisory-free day yields
/// `["No Active Advisories"]`.
///
/// # Example
/// ```
/// use marine_card_lib::advisory::active_advisories;
/// use marine_card_lib::ZoneSet;
///
/// let labels = active_advisories(&ZoneSet::default(), "");
/// assert_eq!(labels, vec!["No Active Advisories".to_string()]);
/// ```
pub fn active_advisories(zones: &ZoneSet, synopsis: &str) -> Vec<String> {
    let mut labels = BTreeSet::new();

    for zone in zones.iter() {
        if zone.advisory.is_empty() {
            continue;
        }
        let lower = zone.advisory.to_lowercase();
        if lower.contains("small craft") {
            labels.insert("Small Craft Advisory".to_string());
        } else if lower.contains("gale") {
            labels.insert("Gale Warning".to_string());
        } else if lower.contains("storm") {
            labels.insert("Storm Warning".to_string());
        } else if lower.contains("hurricane") {
            labels.insert("Hurricane Force Wind Warning".to_string());
        } else {
            labels.insert(zone.advisory.clone());
        }
    }

    let synopsis = synopsis.to_lowercase();
    if synopsis.contains("rip current") {
        labels.insert("Rip Currents".to_string());
    }
    if synopsis.contains("breaking wave") || synopsis.contains("hazardous surf") {
        labels.insert("Breaking Waves".to_string());
    }

    if labels.is_empty() {
        vec![NO_ADVISORIES.to_string()]
    } else {
        labels.into_iter().collect()
    }
}

/// Whether any banner label represents an active hazard (drives the red
/// versus green banner gradient).
pub fn has_active_hazard(labels: &[String]) -> bool {
    labels.iter().any(|label| {
        let lower = label.to_lowercase();
        lower.contains("advisory") || lower.contains("warning")
    })
}

/// Offshore fishing outlook derived from a seas display string.
///
/// Compares the largest wave height parsed out of the string against the
/// rough threshold. Strings with no parseable height ("Check NWS") read as
/// moderate.
pub fn fishing_outlook(seas: &str) -> &'static str {
    match max_seas_ft(seas) {
        Some(ft) if ft >= ROUGH_SEAS_FT => "Rough — offshore not recommended",
        _ => "Moderate — check conditions",
    }
}

/// Largest number found in a seas string, e.g. "6 to 8 ft" -> 8.0.
fn max_seas_ft(seas: &str) -> Option<f64> {
    seas.split(|c: char| !c.is_ascii_digit() && c != '.')
        .filter_map(|token| token.parse::<f64>().ok())
        .fold(None, |max, ft| Some(max.map_or(ft, |m: f64| m.max(ft))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ZoneRecord;

    fn zones_with_advisories(advisories: &[&str]) -> ZoneSet {
        let mut zones = ZoneSet::default();
        let slots = [
            &mut zones.atlantic,
            &mut zones.north_pr,
            &mut zones.east_pr,
            &mut zones.caribbean,
        ];
        for (slot, advisory) in slots.into_iter().zip(advisories) {
            *slot = ZoneRecord {
                advisory: advisory.to_string(),
                ..ZoneRecord::default()
            };
        }
        zones
    }

    #[test]
    fn single_small_craft_advisory() {
        let zones = zones_with_advisories(&["Small Craft Advisory In Effect"]);
        assert_eq!(
            active_advisories(&zones, ""),
            vec!["Small Craft Advisory".to_string()]
        );
    }

    #[test]
    fn no_advisories_yields_sentinel() {
        let labels = active_advisories(&ZoneSet::default(), "");
        assert_eq!(labels, vec![NO_ADVISORIES.to_string()]);
        assert!(!has_active_hazard(&labels));
    }

    #[test]
    fn duplicates_collapse_and_output_is_sorted() {
        let zones = zones_with_advisories(&[
            "Small Craft Advisory In Effect",
            "Gale Warning Tonight",
            "Small Craft Advisory Through Friday",
        ]);
        assert_eq!(
            active_advisories(&zones, ""),
            vec!["Gale Warning".to_string(), "Small Craft Advisory".to_string()]
        );
    }

    #[test]
    fn classification_covers_all_named_categories() {
        let zones = zones_with_advisories(&[
            "Small Craft Advisory",
            "Gale Warning",
            "Tropical Storm Warning",
            "Hurricane Force Wind Warning Issued",
        ]);
        assert_eq!(
            active_advisories(&zones, ""),
            vec![
                "Gale Warning".to_string(),
                "Hurricane Force Wind Warning".to_string(),
                "Small Craft Advisory".to_string(),
                "Storm Warning".to_string(),
            ]
        );
    }

    #[test]
    fn unrecognized_phrase_passes_through_verbatim() {
        let zones = zones_with_advisories(&["Dense Fog Advisory Until Noon"]);
        assert_eq!(
            active_advisories(&zones, ""),
            vec!["Dense Fog Advisory Until Noon".to_string()]
        );
    }

    #[test]
    fn synopsis_hazards_are_added() {
        let synopsis = "A long period northerly swell will bring breaking waves and a high \
                        rip current risk to north facing beaches.";
        let labels = active_advisories(&ZoneSet::default(), synopsis);
        assert_eq!(
            labels,
            vec!["Breaking Waves".to_string(), "Rip Currents".to_string()]
        );
    }

    #[test]
    fn hazard_detection_drives_banner() {
        assert!(has_active_hazard(&["Small Craft Advisory".to_string()]));
        assert!(has_active_hazard(&["Gale Warning".to_string()]));
        assert!(!has_active_hazard(&[NO_ADVISORIES.to_string()]));
    }

    #[test]
    fn fishing_outlook_thresholds() {
        assert_eq!(fishing_outlook("6 to 8 ft"), "Rough — offshore not recommended");
        assert_eq!(fishing_outlook("10 ft"), "Rough — offshore not recommended");
        assert_eq!(fishing_outlook("3 to 5 ft"), "Moderate — check conditions");
        assert_eq!(fishing_outlook("Check NWS"), "Moderate — check conditions");
    }

    #[test]
    fn fishing_outlook_reads_double_digit_ranges() {
        // The numeric comparison must not be fooled by digit prefixes.
        assert_eq!(fishing_outlook("12 to 15 ft"), "Rough — offshore not recommended");
        assert_eq!(fishing_outlook("7 ft"), "Moderate — check conditions");
    }
}
