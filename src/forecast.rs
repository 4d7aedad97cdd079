//! # Forecast Bulletin Field Extraction
//!
//! This module turns the raw text of an NWS coastal waters product into a
//! [`ZoneRecord`], and pulls the SYNOPSIS block out of the combined forecast.
//!
//! ## Bulletin shape
//!
//! The products are plain text with dotted section headers:
//!
//! ```text
//! AMZ711-271015-
//! 405 AM AST THU FEB 27 2026
//!
//! ...SMALL CRAFT ADVISORY IN EFFECT THROUGH THIS EVENING...
//!
//! .TODAY...Northeast winds 15 to 20 knots. Seas 6 to 8 feet.
//! Wave Detail: East 5 feet at 6 seconds. Scattered showers.
//! .TONIGHT...East winds 15 knots. Seas 5 to 7 feet.
//! $$
//! ```
//!
//! There is no grammar here. Extraction is a sequence of independent
//! case-insensitive regex passes over the TODAY window, each taking the first
//! match only. A miss is not an error: the field keeps its default and the
//! card shows "Check NWS" or nothing.
//!
//! ## Totality
//!
//! [`parse_zone`] and [`extract_synopsis`] accept any input including the
//! empty string and never panic. The `regex` crate has no lookahead, so the
//! section windows are cut by locating the start marker and the earliest
//! terminator separately instead of porting the original lookahead patterns
//! verbatim.

use crate::ZoneRecord;
use regex::Regex;
use std::sync::LazyLock;

/// Compass direction words and abbreviations accepted in wind phrases.
/// Intercardinal words come first so "Northeast" is not consumed as "North".
const DIRECTION: &str =
    "(?:Northeast|Northwest|Southeast|Southwest|North|South|East|West|NE|NW|SE|SW|[NSEW]+)";

/// Sky/precipitation keywords, scanned in this priority order. The first one
/// present in the TODAY window wins and scanning stops.
const PRECIP_KEYWORDS: [&str; 7] = [
    "thunderstorm",
    "showers",
    "rain",
    "sunny",
    "partly cloudy",
    "cloudy",
    "clear",
];

static RE_WS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static RE_ADVISORY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(SMALL CRAFT ADVISORY[^\n]*|GALE WARNING[^\n]*|STORM WARNING[^\n]*|HURRICANE FORCE[^\n]*)",
    )
    .expect("advisory pattern is valid")
});

static RE_TODAY_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.TODAY\.\.\.").expect("today header pattern is valid"));

static RE_TODAY_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.TONIGHT|\.WEDNESDAY NIGHT|\.THURSDAY NIGHT|\.FRIDAY")
        .expect("section terminator pattern is valid")
});

static RE_TODAY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)TODAY\s*\n").expect("today line pattern is valid"));

static RE_TONIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)TONIGHT").expect("tonight pattern is valid"));

static RE_WIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)((?:{d}(?:\s+to\s+{d})?\s+)?winds?\s+(?:{d}\s+)?\d+(?:\s+to\s+\d+)?\s+knots?)",
        d = DIRECTION
    ))
    .expect("wind pattern is valid")
});

static RE_WIND_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*winds?\s*").expect("wind word pattern is valid"));

static RE_KNOTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+knots?").expect("knots pattern is valid"));

static RE_GUSTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)gusts?\s+(?:up\s+to\s+)?(\d+)\s+knots?").expect("gust pattern is valid")
});

static RE_SEAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)seas?\s+(\d+\s+to\s+\d+|\d+)\s+feet?").expect("seas pattern is valid")
});

static RE_WAVE_DETAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)wave\s+detail:?\s*([^.;\n]+)").expect("wave detail pattern is valid")
});

static RE_WAVE_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\w+)\s+(\d+)\s+feet?\s+at\s+(\d+)\s+seconds?")
        .expect("wave segment pattern is valid")
});

static RE_AND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+and\s+").expect("and pattern is valid"));

static PRECIP_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    PRECIP_KEYWORDS
        .iter()
        .map(|kw| {
            let re = Regex::new(&format!(r"(?i)([^.]*{}[^.]*\.)", regex::escape(kw)))
                .expect("precip sentence pattern is valid");
            (*kw, re)
        })
        .collect()
});

static RE_SYNOPSIS_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.SYNOPSIS\.\.\.").expect("synopsis header pattern is valid"));

static RE_SYNOPSIS_HEADER_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n\.[A-Za-z]|\$\$").expect("synopsis terminator pattern is valid")
});

static RE_SYNOPSIS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SYNOPSIS[^\n]*\n").expect("synopsis line pattern is valid"));

static RE_SYNOPSIS_LINE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\n[A-Z]{3}[0-9]|\$\$|\nAMZ").expect("zone code pattern is valid")
});

/// Maximum length of the synopsis shown on the card.
const SYNOPSIS_MAX_CHARS: usize = 420;

/// Maximum length of the precipitation snippet.
const PRECIP_MAX_CHARS: usize = 90;

/// Extract the forecast fields for one zone from its raw bulletin text.
///
/// Total over its input: empty or unrecognizable text yields the default
/// record. All matching is case-insensitive, first match only, against the
/// whitespace-collapsed TODAY window (except the advisory, which is searched
/// in the full product since headline hazards appear above the sections).
///
/// # Example
/// ```
/// use marine_card_lib::forecast::parse_zone;
///
/// let record = parse_zone(".TODAY...East winds 10 to 15 knots. Seas 4 feet.");
/// assert_eq!(record.wind, "East 10 to 15 kt");
/// assert_eq!(record.seas, "4 ft");
/// ```
pub fn parse_zone(text: &str) -> ZoneRecord {
    let mut record = ZoneRecord::default();
    if text.is_empty() {
        return record;
    }

    if let Some(c) = RE_ADVISORY.captures(text) {
        record.advisory = title_case(c[1].trim());
    }

    let block = today_window(text);

    if let Some(c) = RE_WIND.captures(&block) {
        let stripped = RE_WIND_WORD.replace_all(c[1].trim(), " ");
        record.wind = RE_KNOTS.replace_all(stripped.trim(), " kt").into_owned();
    }

    if let Some(c) = RE_GUSTS.captures(&block) {
        record.gusts = format!("Gusts to {} kt", &c[1]);
    }

    if let Some(c) = RE_SEAS.captures(&block) {
        record.seas = format!("{} ft", &c[1]);
    }

    if let Some(c) = RE_WAVE_DETAIL.captures(&block) {
        record.wave_detail = shorten_wave_detail(c[1].trim());
    }

    let lower = block.to_lowercase();
    for (keyword, sentence) in PRECIP_PATTERNS.iter() {
        if lower.contains(keyword) {
            if let Some(c) = sentence.captures(&block) {
                record.precip = truncate_chars(c[1].trim(), PRECIP_MAX_CHARS).to_string();
            }
            break;
        }
    }

    record
}

/// Extract the SYNOPSIS block from the combined PR/USVI forecast.
///
/// Tries the dotted `.SYNOPSIS...` section header first, then a bare
/// `SYNOPSIS` line. The body runs to the next section header, zone code, or
/// the `$$` product terminator, whichever comes first. Returns the
/// whitespace-collapsed body truncated to 420 characters, or the empty
/// string when no synopsis is found; callers supply their own fallback.
pub fn extract_synopsis(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    if let Some(m) = RE_SYNOPSIS_HEADER.find(text) {
        let rest = &text[m.end()..];
        let end = RE_SYNOPSIS_HEADER_END
            .find(rest)
            .map_or(rest.len(), |e| e.start());
        return truncate_chars(&squash_ws(&rest[..end]), SYNOPSIS_MAX_CHARS).to_string();
    }

    if let Some(m) = RE_SYNOPSIS_LINE.find(text) {
        let rest = &text[m.end()..];
        let end = RE_SYNOPSIS_LINE_END
            .find(rest)
            .map_or(rest.len(), |e| e.start());
        return truncate_chars(&squash_ws(&rest[..end]), SYNOPSIS_MAX_CHARS).to_string();
    }

    String::new()
}

/// Cut the TODAY section out of a bulletin and collapse its whitespace.
///
/// Falls back to a bare `TODAY` line header, then to the first ~1000
/// characters when the product has no recognizable section markers.
fn today_window(text: &str) -> String {
    if let Some(m) = RE_TODAY_HEADER.find(text) {
        let rest = &text[m.end()..];
        let end = RE_TODAY_END.find(rest).map_or(rest.len(), |e| e.start());
        return squash_ws(&rest[..end]);
    }

    if let Some(m) = RE_TODAY_LINE.find(text) {
        let rest = &text[m.end()..];
        let end = RE_TONIGHT.find(rest).map_or(rest.len(), |e| e.start());
        return squash_ws(&rest[..end]);
    }

    squash_ws(truncate_chars(text, 1000))
}

/// Compact a wave detail phrase.
///
/// "East 5 feet at 6 seconds and Northwest 2 feet at 11 seconds" becomes
/// "E 5ft@6s + NW 2ft@11s". Segments that don't match the
/// direction/height/period shape are kept verbatim.
fn shorten_wave_detail(detail: &str) -> String {
    let mut parts = Vec::new();
    for segment in RE_AND.split(detail) {
        let segment = segment.trim();
        if let Some(c) = RE_WAVE_SEGMENT.captures(segment) {
            parts.push(format!(
                "{} {}ft@{}s",
                compass_abbrev(&c[1]),
                &c[2],
                &c[3]
            ));
        } else if !segment.is_empty() {
            parts.push(segment.to_string());
        }
    }
    parts.join(" + ")
}

/// Translate a compass word to its 1-2 letter abbreviation. Words outside
/// the fixed table fall back to their first two letters, uppercased.
fn compass_abbrev(word: &str) -> String {
    match word.to_lowercase().as_str() {
        "north" => "N".to_string(),
        "south" => "S".to_string(),
        "east" => "E".to_string(),
        "west" => "W".to_string(),
        "northeast" => "NE".to_string(),
        "northwest" => "NW".to_string(),
        "southeast" => "SE".to_string(),
        "southwest" => "SW".to_string(),
        _ => word.chars().take(2).collect::<String>().to_uppercase(),
    }
}

/// Collapse whitespace runs to single spaces and trim the ends.
fn squash_ws(s: &str) -> String {
    RE_WS.replace_all(s, " ").trim().to_string()
}

/// Truncate to at most `max` characters without splitting a char boundary.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Title-case a phrase the way the NWS headline lines read on the card:
/// first letter of every word uppercased, the rest lowered.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A realistic zone product with every extractable field present.
    const ATLANTIC_FIXTURE: &str = "AMZ711-271015-\n\
        ATLANTIC WATERS OF PUERTO RICO AND USVI FROM 10NM OFFSHORE TO 19.5N-\n\
        405 AM AST THU FEB 27 2026\n\
        \n\
        ...SMALL CRAFT ADVISORY IN EFFECT THROUGH FRIDAY EVENING...\n\
        \n\
        .TODAY...Northeast winds 15 to 20 knots with gusts up to 25 knots.\n\
        Seas 6 to 8 feet. Wave Detail: East 5 feet at 6 seconds and\n\
        Northwest 2 feet at 11 seconds. Scattered showers with isolated\n\
        thunderstorms.\n\
        .TONIGHT...East winds 15 knots. Seas 5 to 7 feet.\n\
        $$\n";

    #[test]
    fn full_product_extracts_every_field() {
        let record = parse_zone(ATLANTIC_FIXTURE);
        assert_eq!(record.wind, "Northeast 15 to 20 kt");
        assert_eq!(record.gusts, "Gusts to 25 kt");
        assert_eq!(record.seas, "6 to 8 ft");
        assert_eq!(record.wave_detail, "E 5ft@6s + NW 2ft@11s");
        assert_eq!(
            record.advisory,
            "Small Craft Advisory In Effect Through Friday Evening..."
        );
        assert!(record.precip.contains("thunderstorms"));
        assert!(record.precip.chars().count() <= 90);
    }

    #[test]
    fn empty_text_returns_default_record() {
        let record = parse_zone("");
        assert_eq!(record, ZoneRecord::default());
    }

    #[test]
    fn pattern_miss_keeps_sentinel_defaults() {
        let record = parse_zone(".TODAY...Variable conditions expected.\n.TONIGHT...Same.\n");
        assert_eq!(record.wind, "Check NWS");
        assert_eq!(record.seas, "Check NWS");
        assert!(record.gusts.is_empty());
        assert!(record.wave_detail.is_empty());
        assert!(record.advisory.is_empty());
    }

    #[test]
    fn wind_direction_range_is_kept() {
        let record = parse_zone(".TODAY...East to Southeast winds 10 to 15 knots. Seas 4 feet.");
        assert_eq!(record.wind, "East to Southeast 10 to 15 kt");
        assert_eq!(record.seas, "4 ft");
    }

    #[test]
    fn wind_after_winds_keyword_is_accepted() {
        // Some products phrase it the other way around.
        let record = parse_zone(".TODAY...winds Northeast 15 to 20 knots. Seas 3 feet.");
        assert_eq!(record.wind, "Northeast 15 to 20 kt");
    }

    #[test]
    fn gusts_without_up_to_still_match() {
        let record = parse_zone(".TODAY...East winds 20 knots with gusts 28 knots.");
        assert_eq!(record.gusts, "Gusts to 28 kt");
    }

    #[test]
    fn wave_detail_keeps_unparsed_segments_verbatim() {
        let record =
            parse_zone(".TODAY...Seas 5 feet. Wave Detail: East 5 feet at 6 seconds and choppy near shore.");
        assert_eq!(record.wave_detail, "E 5ft@6s + choppy near shore");
    }

    #[test]
    fn wave_detail_unknown_direction_falls_back_to_two_letters() {
        let record = parse_zone(".TODAY...Wave Detail: Easterly 4 feet at 9 seconds.");
        assert_eq!(record.wave_detail, "EA 4ft@9s");
    }

    #[test]
    fn today_window_bounds_extraction() {
        // TONIGHT values must not leak into the TODAY fields.
        let record = parse_zone(
            ".TODAY...North winds 10 knots. Seas 3 feet.\n.TONIGHT...South winds 25 knots. Seas 9 feet.\n",
        );
        assert_eq!(record.wind, "North 10 kt");
        assert_eq!(record.seas, "3 ft");
    }

    #[test]
    fn missing_markers_fall_back_to_leading_text() {
        let record = parse_zone("East winds 12 knots. Seas 4 to 6 feet.");
        assert_eq!(record.wind, "East 12 kt");
        assert_eq!(record.seas, "4 to 6 ft");
    }

    #[test]
    fn precip_priority_prefers_thunderstorms_over_showers() {
        let record =
            parse_zone(".TODAY...Scattered showers. Isolated thunderstorms in the afternoon.");
        assert!(record.precip.contains("thunderstorms"));
        assert!(!record.precip.contains("showers"));
    }

    #[test]
    fn precip_keyword_without_sentence_terminator_stays_empty() {
        // Keyword present but no closing period: scan stops without a value.
        let record = parse_zone(".TODAY...Partly cloudy");
        assert!(record.precip.is_empty());
    }

    #[test]
    fn precip_snippet_is_truncated() {
        let long = format!(
            ".TODAY...Showers {} likely today.",
            "over the coastal waters ".repeat(8)
        );
        let record = parse_zone(&long);
        assert_eq!(record.precip.chars().count(), 90);
    }

    #[test]
    fn advisory_is_title_cased() {
        let record = parse_zone("...GALE WARNING IN EFFECT...\n.TODAY...West winds 30 knots.");
        assert_eq!(record.advisory, "Gale Warning In Effect...");
    }

    #[test]
    fn synopsis_dotted_header_is_extracted() {
        let text = ".SYNOPSIS...A surface high north of the area will maintain\n\
            fresh easterly winds through the weekend.\n\
            \n\
            $$\n";
        let synopsis = extract_synopsis(text);
        assert_eq!(
            synopsis,
            "A surface high north of the area will maintain fresh easterly winds through the weekend."
        );
    }

    #[test]
    fn synopsis_dotted_header_stops_at_next_section() {
        let text = ".SYNOPSIS...High pressure dominates.\n.ATLANTIC...East winds.\n$$\n";
        assert_eq!(extract_synopsis(text), "High pressure dominates.");
    }

    #[test]
    fn synopsis_line_fallback_stops_at_zone_code() {
        let text = "SYNOPSIS FOR PUERTO RICO AND USVI COASTAL WATERS\n\
            A weak cold front will move across the region tonight.\n\
            AMZ712-271800-\n\
            .TODAY...East winds.\n";
        assert_eq!(
            extract_synopsis(text),
            "A weak cold front will move across the region tonight."
        );
    }

    #[test]
    fn synopsis_is_bounded() {
        let text = format!(".SYNOPSIS...{}\n$$\n", "swell ".repeat(200));
        assert_eq!(extract_synopsis(&text).chars().count(), 420);
    }

    #[test]
    fn synopsis_absent_returns_empty() {
        assert_eq!(extract_synopsis(""), "");
        assert_eq!(extract_synopsis("no marine data here"), "");
    }

    #[test]
    fn title_case_matches_headline_style() {
        assert_eq!(
            title_case("SMALL CRAFT ADVISORY IN EFFECT"),
            "Small Craft Advisory In Effect"
        );
        assert_eq!(title_case("gale warning"), "Gale Warning");
    }
}
