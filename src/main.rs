//! # Marine Card Application Entry Point
//!
//! This binary coordinates one generation run: fetch the NWS products,
//! extract the per-zone fields, classify advisories, compute the moon phase,
//! compose the HTML card, and render it to the fixed-name output JPEG.
//!
//! The run is sequential and short-lived. Fetch failures degrade to empty
//! data and the card still renders with placeholder values; only a failed
//! image render exits non-zero.

// Test modules
#[cfg(test)]
mod tests;

use anyhow::Context;
use chrono::{FixedOffset, Utc};
use marine_card_lib::advisory::active_advisories;
use marine_card_lib::card::{compose, CardData};
use marine_card_lib::config::Config;
use marine_card_lib::forecast::{extract_synopsis, parse_zone};
use marine_card_lib::moon::phase_at;
use marine_card_lib::render::{square_crop, write_card, CardRenderer, Wkhtmltoimage};
use marine_card_lib::{logo, nws, ZoneSet};

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    let config = Config::load();
    let output_path = config.output_path();

    // Puerto Rico is always AST = UTC-4, no daylight saving.
    let ast = FixedOffset::east_opt(config.card.utc_offset_hours * 3600)
        .context("invalid UTC offset in configuration")?;
    let now_utc = Utc::now();
    let now = now_utc.with_timezone(&ast);
    let date_str = now.format("%b %d").to_string().to_uppercase();
    let time_str = now.format("%-I:%M %p").to_string();

    println!(
        "Rabirubia Weather Card Generator — {} {} AST",
        date_str, time_str
    );
    println!("Output: {}", output_path.display());

    println!("Loading logo...");
    let logo_b64 = logo::load_logo();

    // Create Tokio runtime for the fetch phase
    let rt = tokio::runtime::Runtime::new()?;
    let client = nws::client(&config.endpoints)?;

    println!("Fetching synopsis...");
    let synopsis_text = rt.block_on(nws::fetch_synopsis_text(&client, &config.endpoints));
    let synopsis = extract_synopsis(&synopsis_text);
    if synopsis.is_empty() {
        println!("  Synopsis: NOT FOUND");
    } else {
        println!("  Synopsis: {}...", &synopsis.chars().take(80).collect::<String>());
    }

    println!("Fetching zone forecasts...");
    let bulletins = rt.block_on(nws::fetch_bulletins(&client, &config.endpoints));

    println!("Fetching rain probability...");
    let rain_probability = rt.block_on(nws::fetch_rain_probability(&client, &config.endpoints));

    println!("Parsing forecast data...");
    let zones = ZoneSet {
        atlantic: parse_zone(&bulletins.atlantic),
        north_pr: parse_zone(&bulletins.north_pr),
        east_pr: parse_zone(&bulletins.east_pr),
        caribbean: parse_zone(&bulletins.caribbean),
    };
    for (name, zone) in [
        ("atlantic", &zones.atlantic),
        ("north_pr", &zones.north_pr),
        ("east_pr", &zones.east_pr),
        ("caribbean", &zones.caribbean),
    ] {
        println!("  {}: wind={} | seas={}", name, zone.wind, zone.seas);
    }

    let advisories = active_advisories(&zones, &synopsis);
    let moon = phase_at(now_utc);

    println!("Rendering image...");
    let html = compose(&CardData {
        zones: &zones,
        synopsis: &synopsis,
        advisories: &advisories,
        moon,
        rain_probability,
        date_str: &date_str,
        time_str: &time_str,
        logo_b64: &logo_b64,
        branding: &config.card,
    });

    let renderer = Wkhtmltoimage::new(&config.render);
    let raw = renderer.render(&html).map_err(|error| {
        eprintln!("FAILED to render image.");
        error
    })?;
    let jpeg = square_crop(&raw, &config.render);
    write_card(&output_path, &jpeg).context("writing output image")?;

    println!("Done! -> {}", output_path.display());
    Ok(())
}
