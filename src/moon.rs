//! Moon phase from elapsed synodic time.
//!
//! Position in the synodic cycle is the fractional part of the days elapsed
//! since a reference new moon divided by the mean synodic month. Illumination
//! follows the cosine of the cycle angle. Accuracy is on the order of a day,
//! which is all a daily card needs; no ephemeris corrections are applied.

use chrono::{DateTime, TimeZone, Utc};
use std::f64::consts::TAU;

/// Mean synodic month length in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_67;

/// Reference new moon: 2000-01-06 18:14 UTC.
const EPOCH_NEW_MOON_UNIX: i64 = 947_182_440;

/// The eight named phases, in cycle order starting at new moon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseName {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl PhaseName {
    /// Display label used on the card.
    pub fn label(self) -> &'static str {
        match self {
            PhaseName::New => "New Moon",
            PhaseName::WaxingCrescent => "Waxing Crescent",
            PhaseName::FirstQuarter => "First Quarter",
            PhaseName::WaxingGibbous => "Waxing Gibbous",
            PhaseName::Full => "Full Moon",
            PhaseName::WaningGibbous => "Waning Gibbous",
            PhaseName::LastQuarter => "Last Quarter",
            PhaseName::WaningCrescent => "Waning Crescent",
        }
    }
}

/// Moon state at a point in time.
#[derive(Clone, Copy, Debug)]
pub struct MoonPhase {
    /// Fraction of the synodic month elapsed since new moon, in [0, 1).
    pub cycle_position: f64,
    /// Illuminated fraction of the disc as a rounded percentage, 0-100.
    pub illumination_percent: u8,
    /// Named phase bucket.
    pub name: PhaseName,
}

/// Compute the moon phase for a UTC instant.
///
/// Pure function of elapsed time: deterministic, no I/O, total over all
/// inputs including instants before the reference new moon (the cycle
/// position uses a true modulo, not a truncating remainder).
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use marine_card_lib::moon::{phase_at, PhaseName};
///
/// let phase = phase_at(Utc.with_ymd_and_hms(2000, 1, 6, 18, 14, 0).unwrap());
/// assert_eq!(phase.name, PhaseName::New);
/// assert_eq!(phase.illumination_percent, 0);
/// ```
pub fn phase_at(when: DateTime<Utc>) -> MoonPhase {
    let epoch = Utc
        .timestamp_opt(EPOCH_NEW_MOON_UNIX, 0)
        .single()
        .expect("reference new moon timestamp is valid");
    let elapsed_days = (when - epoch).num_seconds() as f64 / 86_400.0;
    let cycle_position = elapsed_days.rem_euclid(SYNODIC_MONTH_DAYS) / SYNODIC_MONTH_DAYS;

    let illumination = (1.0 - (TAU * cycle_position).cos()) / 2.0;
    let illumination_percent = (illumination * 100.0).round() as u8;

    MoonPhase {
        cycle_position,
        illumination_percent,
        name: bucket(cycle_position),
    }
}

/// Bucket a cycle position into the eight named phases. Boundaries sit at
/// the odd sixteenths so each name spans an eighth of the cycle centered on
/// its canonical position.
fn bucket(cycle_position: f64) -> PhaseName {
    let sixteenths = cycle_position * 16.0;
    match () {
        _ if sixteenths < 1.0 => PhaseName::New,
        _ if sixteenths < 3.0 => PhaseName::WaxingCrescent,
        _ if sixteenths < 5.0 => PhaseName::FirstQuarter,
        _ if sixteenths < 7.0 => PhaseName::WaxingGibbous,
        _ if sixteenths < 9.0 => PhaseName::Full,
        _ if sixteenths < 11.0 => PhaseName::WaningGibbous,
        _ if sixteenths < 13.0 => PhaseName::LastQuarter,
        _ if sixteenths < 15.0 => PhaseName::WaningCrescent,
        _ => PhaseName::New,
    }
}

impl MoonPhase {
    /// SVG fragment drawing the disc at the given radius.
    ///
    /// A dark disc with the lit region overlaid as a path: half the limb on
    /// the lit side, closed by the terminator: an elliptical arc whose
    /// horizontal semi-axis shrinks to zero at the quarters and reaches the
    /// full radius at new and full moon. The lit side is the right while
    /// waxing and the left while waning; the terminator bulges toward the
    /// lit side for crescents and the dark side for gibbous phases.
    pub fn disc_svg(&self, radius: f64) -> String {
        let d = radius * 2.0;
        let (terminator, outer_sweep, term_sweep) = self.terminator_geometry(radius);
        format!(
            concat!(
                "<svg width=\"{d:.0}\" height=\"{d:.0}\" viewBox=\"0 0 {d:.0} {d:.0}\">",
                "<circle cx=\"{r:.0}\" cy=\"{r:.0}\" r=\"{r:.0}\" fill=\"#1a2742\"/>",
                "<path d=\"M {r:.0},0 A {r:.0},{r:.0} 0 0 {os} {r:.0},{d:.0} ",
                "A {t:.2},{r:.0} 0 0 {ts} {r:.0},0 Z\" fill=\"#f5f0dc\"/>",
                "</svg>"
            ),
            d = d,
            r = radius,
            t = terminator,
            os = outer_sweep,
            ts = term_sweep,
        )
    }

    /// Terminator semi-axis plus the two SVG arc sweep flags.
    fn terminator_geometry(&self, radius: f64) -> (f64, u8, u8) {
        let angle = TAU * self.cycle_position;
        let terminator = radius * angle.cos().abs();
        let lit_right = self.cycle_position < 0.5;
        let gibbous = angle.cos() < 0.0;
        let outer_sweep = u8::from(lit_right);
        let term_sweep = u8::from(lit_right == gibbous);
        (terminator, outer_sweep, term_sweep)
    }

    /// Lit fraction of the disc, 0.0 through 1.0.
    pub fn lit_fraction(&self) -> f64 {
        f64::from(self.illumination_percent) / 100.0
    }
}
