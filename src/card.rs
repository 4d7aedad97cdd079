//! # Card Composition
//!
//! Assembles the extracted forecast data into the 1080x1080 HTML card that
//! the renderer turns into the daily JPEG. The layout is table-based on
//! purpose: the external renderer predates flexbox and handles tables
//! reliably.
//!
//! The composer is presentation only. It must accept any combination of
//! default and populated fields without panicking: an all-default record
//! set still produces a complete card with "Check NWS" placeholders and the
//! fallback synopsis line.

use crate::advisory::{self, fishing_outlook};
use crate::config::CardConfig;
use crate::moon::MoonPhase;
use crate::{ZoneRecord, ZoneSet};

/// Shown in the synopsis cell when no synopsis could be extracted.
pub const FALLBACK_SYNOPSIS: &str =
    "Synopsis unavailable — visit weather.gov/sju for current marine forecast.";

/// Alert banner gradient stops when any advisory or warning is active.
const ALERT_BG_WARNING: &str = "#8b0000, #cc1616, #8b0000";
/// Alert banner gradient stops on an advisory-free day.
const ALERT_BG_CLEAR: &str = "#0a4a00, #0c7a00, #0a4a00";

/// Moon disc radius in pixels on the card.
const MOON_RADIUS: f64 = 22.0;

/// Everything the composer needs for one card. Built once per run and
/// consumed exactly once.
#[derive(Debug)]
pub struct CardData<'a> {
    pub zones: &'a ZoneSet,
    pub synopsis: &'a str,
    pub advisories: &'a [String],
    pub moon: MoonPhase,
    pub rain_probability: Option<u8>,
    /// Header date, e.g. "FEB 27"
    pub date_str: &'a str,
    /// Header time, e.g. "6:30 AM"
    pub time_str: &'a str,
    /// Base64 logo bytes, or empty for a blank placeholder
    pub logo_b64: &'a str,
    pub branding: &'a CardConfig,
}

/// Static stylesheet. The only dynamic style (the alert gradient) is
/// injected inline on the banner element.
const STYLE: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{width:1080px;height:1080px;overflow:hidden;background:#060e1f;font-family:Arial,Helvetica,sans-serif}
.card{width:1080px;height:1080px;background:linear-gradient(145deg,#060e1f 0%,#0a1f3d 45%,#071428 100%);display:table}
.ci{display:table-cell;vertical-align:top}
.hdr{background:linear-gradient(135deg,#0d2050,#142e6e);padding:18px 28px;border-bottom:4px solid #cc1818}
.hdr table{width:100%;border-collapse:collapse}
.hdr td{vertical-align:middle;padding:0}
.logo{width:88px;height:88px;object-fit:contain;display:block}
.brand{font-family:'Arial Black',Impact,sans-serif;font-size:36px;font-weight:900;color:#ffffff;letter-spacing:2px;text-transform:uppercase;line-height:1}
.sub{font-size:13px;color:#aaddff;letter-spacing:3px;text-transform:uppercase;margin-top:5px}
.datebig{font-family:'Arial Black',Impact,sans-serif;font-size:48px;font-weight:900;color:#dd1c1c;line-height:1;text-align:right}
.datetime{font-family:'Arial Black',Impact,sans-serif;font-size:16px;font-weight:900;color:#ffffff;letter-spacing:2px;text-transform:uppercase;text-align:right;margin-top:5px}
.alert{padding:10px 28px;color:#ffffff;font-family:'Arial Narrow',Arial,sans-serif;font-size:15px;font-weight:700;letter-spacing:2px;text-transform:uppercase}
.grid{width:100%;padding:12px 16px 8px;display:block}
.gt{width:100%;border-collapse:separate;border-spacing:8px}
.gt td{width:25%;vertical-align:top;background:rgba(255,255,255,.07);border:1px solid rgba(255,255,255,.15);border-radius:10px;padding:14px}
.z1{border-top:3px solid #1e88e5!important}
.z2{border-top:3px solid #0288d1!important}
.z3{border-top:3px solid #00acc1!important}
.z4{border-top:3px solid #00897b!important}
.zone-name{font-family:'Arial Narrow',Arial,sans-serif;font-size:12px;font-weight:700;text-transform:uppercase;letter-spacing:1.5px;color:#aaddff;margin-bottom:10px;line-height:1.4;border-bottom:2px solid rgba(255,255,255,.15);padding-bottom:7px}
.stat{margin-bottom:9px}
.stat-lbl{font-size:9px;color:#88bbdd;text-transform:uppercase;letter-spacing:1.5px;line-height:1;margin-bottom:2px}
.stat-val{font-family:'Arial Black',Impact,sans-serif;font-size:20px;font-weight:900;color:#ffffff;line-height:1.1}
.stat-note{font-size:11px;color:#ffffff;line-height:1.3}
.bt{width:100%;border-collapse:separate;border-spacing:8px}
.bt td{vertical-align:top;background:rgba(255,255,255,.05);border:1px solid rgba(255,255,255,.1);border-radius:10px;padding:14px}
.stitle{font-size:11px;font-weight:700;letter-spacing:2px;text-transform:uppercase;color:#aaddff;margin-bottom:8px}
.bval{font-family:'Arial Black',Impact,sans-serif;font-size:18px;font-weight:900;color:#ffffff;line-height:1.1;margin-bottom:2px}
.bnote{font-size:11px;color:#ffffff;line-height:1.4}
.blbl{font-size:9px;color:#88bbdd;text-transform:uppercase;letter-spacing:1.5px;line-height:1;margin-bottom:2px}
.stext{font-size:12.5px;color:#ffffff;line-height:1.6}
.tags{margin-top:10px}
.tag{display:inline-block;background:rgba(160,20,20,.3);border:1px solid rgba(220,60,60,.6);border-radius:20px;padding:4px 11px;font-size:10.5px;color:#ffaaaa;letter-spacing:.8px;text-transform:uppercase;font-weight:700;margin:3px 3px 0 0}
.moon{margin-top:6px}
.moon table{border-collapse:collapse}
.moon td{vertical-align:middle;padding:0 8px 0 0}
.moon-name{font-size:11px;color:#ffffff;line-height:1.3}
.ftr{background:rgba(0,0,0,.4);border-top:1px solid rgba(255,255,255,.1);padding:10px 28px}
.ftr table{width:100%;border-collapse:collapse}
.fsrc{font-size:11px;color:#6699bb}
.furl{font-family:'Arial Narrow',Arial,sans-serif;font-size:17px;font-weight:700;color:#4db8ff;letter-spacing:1px;text-align:right}
"#;

/// Build the complete HTML document for one card.
pub fn compose(data: &CardData) -> String {
    let zones = data.zones;
    let advisory_line = data.advisories.join(" | ");
    let alert_bg = if advisory::has_active_hazard(data.advisories) {
        ALERT_BG_WARNING
    } else {
        ALERT_BG_CLEAR
    };

    let synopsis = if data.synopsis.is_empty() {
        FALLBACK_SYNOPSIS
    } else {
        data.synopsis
    };

    let tags: String = data
        .advisories
        .iter()
        .map(|a| format!("<span class=\"tag\">{}</span>", a))
        .collect();

    let logo_img = if data.logo_b64.is_empty() {
        "<div style=\"width:88px;height:88px\"></div>".to_string()
    } else {
        format!(
            "<img class=\"logo\" src=\"data:image/jpeg;base64,{}\"/>",
            data.logo_b64
        )
    };

    let fishing = fishing_outlook(&zones.atlantic.seas);
    let precip = or_dash(&zones.atlantic.precip);
    let rain = data
        .rain_probability
        .map_or("&mdash;".to_string(), |p| format!("{}%", p));
    let moon_disc = data.moon.disc_svg(MOON_RADIUS);

    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html>\n<head><meta charset=\"UTF-8\">\n<style>");
    html.push_str(STYLE);
    html.push_str("</style></head>\n<body>\n<div class=\"card\"><div class=\"ci\">\n");

    // Header
    html.push_str(&format!(
        concat!(
            "<div class=\"hdr\"><table><tr>\n",
            "  <td style=\"width:100px\">{logo}</td>\n",
            "  <td style=\"padding-left:14px\">\n",
            "    <div class=\"brand\">{brand}</div>\n",
            "    <div class=\"sub\">{tagline}</div>\n",
            "  </td>\n",
            "  <td style=\"width:230px\">\n",
            "    <div class=\"datebig\">{date}</div>\n",
            "    <div class=\"datetime\">{time} AST</div>\n",
            "  </td>\n",
            "</tr></table></div>\n"
        ),
        logo = logo_img,
        brand = data.branding.brand,
        tagline = data.branding.tagline,
        date = data.date_str,
        time = data.time_str,
    ));

    // Advisory banner
    html.push_str(&format!(
        "<div class=\"alert\" style=\"background:linear-gradient(90deg,{})\">{}</div>\n",
        alert_bg, advisory_line
    ));

    // Zone grid
    html.push_str("<div class=\"grid\"><table class=\"gt\"><tr>\n");
    html.push_str(&zone_tile(
        &zones.atlantic,
        "z1",
        "Atlantic Offshore<br>(10NM &ndash; 19.5&deg;N)",
    ));
    html.push_str(&zone_tile(
        &zones.north_pr,
        "z2",
        "Northern PR Coast<br>(out 10 NM)",
    ));
    html.push_str(&zone_tile(
        &zones.east_pr,
        "z3",
        "East PR / Vieques<br>Culebra &amp; St. John",
    ));
    html.push_str(&zone_tile(
        &zones.caribbean,
        "z4",
        "Caribbean Waters<br>PR + St. Croix",
    ));
    html.push_str("</tr></table></div>\n");

    // Bottom row: swell summary, conditions, synopsis
    html.push_str(&format!(
        concat!(
            "<div style=\"padding:0 16px 8px\"><table class=\"bt\"><tr>\n",
            "  <td style=\"width:25%\">\n",
            "    <div class=\"stitle\">Swell Summary</div>\n",
            "    <div class=\"stat\">\n",
            "      <div class=\"blbl\">Atlantic Swell</div>\n",
            "      <div class=\"bval\">{atl_seas}</div>\n",
            "      <div class=\"bnote\">{atl_wave}</div>\n",
            "    </div>\n",
            "    <div class=\"stat\">\n",
            "      <div class=\"blbl\">Caribbean Seas</div>\n",
            "      <div class=\"bval\">{car_seas}</div>\n",
            "      <div class=\"bnote\">{car_wave}</div>\n",
            "    </div>\n",
            "  </td>\n",
            "  <td style=\"width:25%\">\n",
            "    <div class=\"stitle\">Conditions</div>\n",
            "    <div class=\"stat\">\n",
            "      <div class=\"blbl\">Precip</div>\n",
            "      <div class=\"bnote\">{precip}</div>\n",
            "    </div>\n",
            "    <div class=\"stat\">\n",
            "      <div class=\"blbl\">Rain Chance</div>\n",
            "      <div class=\"bval\">{rain}</div>\n",
            "    </div>\n",
            "    <div class=\"stat\">\n",
            "      <div class=\"blbl\">Fishing</div>\n",
            "      <div class=\"bnote\">{fishing}</div>\n",
            "    </div>\n",
            "    <div class=\"moon\"><table><tr>\n",
            "      <td>{moon_disc}</td>\n",
            "      <td><div class=\"blbl\">Moon</div>\n",
            "      <div class=\"moon-name\">{moon_name}<br>{moon_pct}% illuminated</div></td>\n",
            "    </tr></table></div>\n",
            "  </td>\n",
            "  <td style=\"width:50%\">\n",
            "    <div class=\"stitle\">Synopsis</div>\n",
            "    <div class=\"stext\">{synopsis}</div>\n",
            "    <div class=\"tags\">{tags}</div>\n",
            "  </td>\n",
            "</tr></table></div>\n"
        ),
        atl_seas = zones.atlantic.seas,
        atl_wave = or_dash(&zones.atlantic.wave_detail),
        car_seas = zones.caribbean.seas,
        car_wave = or_dash(&zones.caribbean.wave_detail),
        precip = precip,
        rain = rain,
        fishing = fishing,
        moon_disc = moon_disc,
        moon_name = data.moon.name.label(),
        moon_pct = data.moon.illumination_percent,
        synopsis = synopsis,
        tags = tags,
    ));

    // Footer
    html.push_str(&format!(
        concat!(
            "<div class=\"ftr\"><table><tr>\n",
            "  <td class=\"fsrc\">Source: NWS San Juan &middot; NOAA</td>\n",
            "  <td class=\"furl\">{site}</td>\n",
            "</tr></table></div>\n"
        ),
        site = data.branding.site,
    ));

    html.push_str("</div></div>\n</body></html>");
    html
}

/// One zone tile in the four-column grid.
fn zone_tile(zone: &ZoneRecord, class: &str, name: &str) -> String {
    format!(
        concat!(
            "  <td class=\"{class}\">\n",
            "    <div class=\"zone-name\">{name}</div>\n",
            "    <div class=\"stat\">\n",
            "      <div class=\"stat-lbl\">WIND</div>\n",
            "      <div class=\"stat-val\">{wind}</div>\n",
            "      <div class=\"stat-note\">{gusts}</div>\n",
            "    </div>\n",
            "    <div class=\"stat\">\n",
            "      <div class=\"stat-lbl\">SEAS</div>\n",
            "      <div class=\"stat-val\">{seas}</div>\n",
            "      <div class=\"stat-note\">{wave}</div>\n",
            "    </div>\n",
            "  </td>\n"
        ),
        class = class,
        name = name,
        wind = zone.wind,
        gusts = zone.gusts,
        seas = zone.seas,
        wave = zone.wave_detail,
    )
}

/// Empty display fields render as an em dash rather than a gap.
fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "&mdash;"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::active_advisories;
    use crate::config::Config;
    use crate::moon::phase_at;
    use chrono::{TimeZone, Utc};

    fn sample_data<'a>(
        zones: &'a ZoneSet,
        advisories: &'a [String],
        config: &'a Config,
    ) -> CardData<'a> {
        CardData {
            zones,
            synopsis: "",
            advisories,
            moon: phase_at(Utc.with_ymd_and_hms(2026, 2, 27, 10, 0, 0).unwrap()),
            rain_probability: Some(40),
            date_str: "FEB 27",
            time_str: "6:30 AM",
            logo_b64: "",
            branding: &config.card,
        }
    }

    #[test]
    fn all_default_records_compose_a_complete_card() {
        let zones = ZoneSet::default();
        let advisories = active_advisories(&zones, "");
        let config = Config::default();
        let html = compose(&sample_data(&zones, &advisories, &config));

        assert!(html.contains("Check NWS"));
        assert!(html.contains(FALLBACK_SYNOPSIS));
        assert!(html.contains("No Active Advisories"));
        // Advisory-free day gets the green banner.
        assert!(html.contains(ALERT_BG_CLEAR));
        assert!(html.contains("width:1080px"));
        assert!(html.contains("<svg"));
        assert!(html.contains("40%"));
    }

    #[test]
    fn active_advisory_switches_banner_and_tags() {
        let mut zones = ZoneSet::default();
        zones.atlantic.advisory = "Small Craft Advisory In Effect".to_string();
        let advisories = active_advisories(&zones, "");
        let config = Config::default();
        let html = compose(&sample_data(&zones, &advisories, &config));

        assert!(html.contains(ALERT_BG_WARNING));
        assert!(html.contains("<span class=\"tag\">Small Craft Advisory</span>"));
    }

    #[test]
    fn populated_fields_appear_verbatim() {
        let mut zones = ZoneSet::default();
        zones.atlantic.wind = "Northeast 15 to 20 kt".to_string();
        zones.atlantic.seas = "6 to 8 ft".to_string();
        zones.atlantic.wave_detail = "E 5ft@6s + NW 2ft@11s".to_string();
        let advisories = active_advisories(&zones, "");
        let config = Config::default();
        let html = compose(&sample_data(&zones, &advisories, &config));

        assert!(html.contains("Northeast 15 to 20 kt"));
        assert!(html.contains("E 5ft@6s + NW 2ft@11s"));
        // Rough Atlantic seas flip the fishing outlook.
        assert!(html.contains("Rough"));
    }

    #[test]
    fn logo_embeds_as_data_uri_when_present() {
        let zones = ZoneSet::default();
        let advisories = active_advisories(&zones, "");
        let config = Config::default();
        let mut data = sample_data(&zones, &advisories, &config);
        data.logo_b64 = "aGVsbG8=";
        let html = compose(&data);
        assert!(html.contains("data:image/jpeg;base64,aGVsbG8="));
    }

    #[test]
    fn missing_rain_probability_renders_a_dash() {
        let zones = ZoneSet::default();
        let advisories = active_advisories(&zones, "");
        let config = Config::default();
        let mut data = sample_data(&zones, &advisories, &config);
        data.rain_probability = None;
        let html = compose(&data);
        assert!(html.contains("&mdash;"));
    }
}
