//! # Marine Card Core Library
//!
//! This library provides the data model and processing pipeline for the daily
//! Rabirubia Weather marine forecast card. It turns the plain-text marine
//! bulletins published by NWS San Juan into a structured per-zone record set,
//! classifies active advisories, computes the current moon phase, and
//! assembles everything into an HTML card that the binary renders to a
//! fixed-size JPEG.
//!
//! ## Design Philosophy
//!
//! ### Total extraction
//! Bulletins are semi-structured text and the published format drifts, so the
//! extractors never fail: a pattern miss leaves the field at its sentinel
//! default ("Check NWS" or empty) and the card renders with whatever was
//! found. Errors are reserved for the two places they mean something: the
//! network fetch (recovered by substituting empty text) and the final image
//! render (fatal).
//!
//! ### One-shot pipeline
//! Everything is created fresh at the start of a run and discarded at the
//! end. There is no cache, no persisted state between runs, and no shared
//! mutable state; the only artifact is the output JPEG, overwritten in place.
//!
//! ## Core Types
//!
//! - [`ZoneRecord`]: extracted wind/seas/advisory fields for one marine zone
//! - [`ZoneSet`]: the four fixed zones covered by the card

// Module declarations
pub mod advisory;
pub mod card;
pub mod config;
pub mod forecast;
pub mod logo;
pub mod moon;
pub mod nws;
pub mod render;

/// Extracted forecast fields for a single marine zone.
///
/// Every field is a display-ready string. Fields that could not be extracted
/// keep their defaults: `"Check NWS"` for the headline wind/seas values
/// (shown verbatim on the card so readers know to look elsewhere) and the
/// empty string for the optional detail fields.
///
/// # Example
/// ```
/// use marine_card_lib::ZoneRecord;
///
/// let record = ZoneRecord::default();
/// assert_eq!(record.wind, "Check NWS");
/// assert_eq!(record.seas, "Check NWS");
/// assert!(record.advisory.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoneRecord {
    /// Wind direction and speed, e.g. "Northeast 15 to 20 kt"
    pub wind: String,
    /// Gust note, e.g. "Gusts to 25 kt", or empty
    pub gusts: String,
    /// Significant wave height, e.g. "6 to 8 ft"
    pub seas: String,
    /// Compacted swell components, e.g. "E 5ft@6s + NW 2ft@11s", or empty
    pub wave_detail: String,
    /// Raw matched hazard line, title-cased, or empty
    pub advisory: String,
    /// First weather sentence mentioning precipitation or sky cover,
    /// at most 90 characters, or empty
    pub precip: String,
}

impl Default for ZoneRecord {
    fn default() -> Self {
        ZoneRecord {
            wind: "Check NWS".to_string(),
            gusts: String::new(),
            seas: "Check NWS".to_string(),
            wave_detail: String::new(),
            advisory: String::new(),
            precip: String::new(),
        }
    }
}

/// The four marine zones shown on the card.
///
/// Zone membership is fixed: the Atlantic offshore waters, the northern and
/// eastern Puerto Rico coastal waters, and the Caribbean waters. Each field
/// holds the [`ZoneRecord`] extracted from that zone's bulletin for this run.
///
/// # Example
/// ```
/// use marine_card_lib::ZoneSet;
///
/// let zones = ZoneSet::default();
/// assert_eq!(zones.iter().count(), 4);
/// assert!(zones.iter().all(|z| z.advisory.is_empty()));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneSet {
    /// Atlantic offshore waters (10 NM to 19.5N)
    pub atlantic: ZoneRecord,
    /// Northern Puerto Rico coastal waters out 10 NM
    pub north_pr: ZoneRecord,
    /// Eastern PR, Vieques, Culebra and St. John waters
    pub east_pr: ZoneRecord,
    /// Caribbean waters of PR and St. Croix
    pub caribbean: ZoneRecord,
}

impl ZoneSet {
    /// Iterate the zone records in card display order.
    pub fn iter(&self) -> impl Iterator<Item = &ZoneRecord> {
        [&self.atlantic, &self.north_pr, &self.east_pr, &self.caribbean].into_iter()
    }
}
