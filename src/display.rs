//! # Visibility report
//!
//! Text rendering of computed bodies: one table row per body, built with
//! [`comfy-table`](https://docs.rs/comfy-table/latest/comfy_table/), and a multi-line
//! [`Display`](std::fmt::Display) for a single [`CelestialBody`].
//!
//! ## Overview
//!
//! - **Default** columns: `Body | Alt | Az | RA | Dec | Rise | Az rise | Set | Az set | Phase |
//!   Mag | Size | Distance`.
//! - **Wide** (via [`VisibilityReport::wide`]) adds the geocentric altitude, the refraction and
//!   parallax shifts in declination and the extinction.
//!
//! ## Conventions
//!
//! - A distance above 300 000 is a lunar distance in kilometres and prints as `{:.0} km`,
//!   anything else prints as `{:.3} AU`.
//! - Phase and magnitude print with two decimals, or `NA` when the body has none.
//! - A rise or set that does not happen prints as `always up` or `never up`.

use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::bodies::{CelestialBody, HorizonEvent};
use crate::constants::LUNAR_DISTANCE_THRESHOLD_KM;

/// `{:.0} km` for a lunar distance, `{:.3} AU` otherwise, `NA` when missing.
pub fn format_distance(distance: Option<f64>) -> String {
    match distance {
        Some(d) if d > LUNAR_DISTANCE_THRESHOLD_KM => format!("{d:.0} km"),
        Some(d) => format!("{d:.3} AU"),
        None => "NA".to_string(),
    }
}

/// Two decimals, or `NA`.
pub fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "NA".to_string(), |v| format!("{v:.2}"))
}

/// Local time of a crossing, or what happens instead.
pub fn format_event_time(event: &HorizonEvent) -> String {
    match event.local_time {
        Some(time) => time.to_string(),
        None if event.is_always_visible() => "always up".to_string(),
        None => "never up".to_string(),
    }
}

/// Azimuth of a crossing in degrees, `-` when there is no crossing.
pub fn format_event_azimuth(event: &HorizonEvent) -> String {
    if event.is_sentinel() {
        "-".to_string()
    } else {
        format!("{:.1}°", event.azimuth)
    }
}

fn right(content: impl Into<String>) -> Cell {
    Cell::new(content.into()).set_alignment(CellAlignment::Right)
}

enum TableMode {
    Default,
    Wide,
}

/// Display adaptor rendering a set of bodies as a table.
pub struct VisibilityReport<'a> {
    bodies: &'a [CelestialBody],
    title: Option<String>,
    mode: TableMode,
}

impl<'a> VisibilityReport<'a> {
    pub fn new(bodies: &'a [CelestialBody]) -> Self {
        VisibilityReport {
            bodies,
            title: None,
            mode: TableMode::Default,
        }
    }

    /// Line printed above the table (site and instant, typically).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Switch to the wide layout, or back to the default one.
    pub fn wide(mut self, yes: bool) -> Self {
        self.mode = if yes {
            TableMode::Wide
        } else {
            TableMode::Default
        };
        self
    }

    fn render(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        let mut header = vec![
            "Body", "Alt", "Az", "RA", "Dec", "Rise", "Az rise", "Set", "Az set", "Phase", "Mag",
            "Size", "Distance",
        ];
        if matches!(self.mode, TableMode::Wide) {
            header.extend(["Geo alt", "Refr Δδ", "Parallax Δδ", "Extinction"]);
        }
        table.set_header(header.into_iter().map(Cell::new).collect::<Vec<_>>());

        for body in self.bodies {
            let rise = &body.rise_set.rise;
            let set = &body.rise_set.set;
            let mut cells = vec![
                Cell::new(&body.name),
                right(format!("{:.2}°", body.topocentric_horizontal.altitude.value())),
                right(format!("{:.2}°", body.topocentric_horizontal.azimuth.value())),
                right(body.topocentric.right_ascension.to_string()),
                right(body.topocentric.declination.to_string()),
                right(format_event_time(rise)),
                right(format_event_azimuth(rise)),
                right(format_event_time(set)),
                right(format_event_azimuth(set)),
                right(format_optional(body.appearance.phase)),
                right(format_optional(body.appearance.magnitude)),
                right(format!("{:.1}\"", body.appearance.apparent_size * 3600.0)),
                right(format_distance(body.appearance.distance)),
            ];
            if matches!(self.mode, TableMode::Wide) {
                cells.extend([
                    right(format!("{:.4}°", body.geocentric_horizontal.altitude.value())),
                    right(format!("{:.1}\"", body.deltas.refraction_dec * 3600.0)),
                    right(format!("{:.1}\"", body.deltas.parallax_dec * 3600.0)),
                    right(format!("{:.2}", body.appearance.extinction)),
                ]);
            }
            table.add_row(Row::from(cells));
        }

        table.to_string()
    }
}

impl fmt::Display for VisibilityReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, "{title}")?;
        }
        write!(f, "{}", self.render())
    }
}

impl fmt::Display for CelestialBody {
    /// Multi-line summary of one body.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visibility = if self.is_above_horizon() {
            "visible"
        } else {
            "below the horizon"
        };
        writeln!(f, "{} ({visibility})", self.name)?;
        writeln!(f, "------------------------------------------------")?;
        writeln!(
            f,
            "  geocentric   α = {}  δ = {}",
            self.geocentric.right_ascension, self.geocentric.declination
        )?;
        writeln!(
            f,
            "  topocentric  α = {}  δ = {}",
            self.topocentric.right_ascension, self.topocentric.declination
        )?;
        writeln!(
            f,
            "  horizon      h = {}  A = {}",
            self.topocentric_horizontal.altitude, self.topocentric_horizontal.azimuth
        )?;
        writeln!(
            f,
            "  rise         {} ({})",
            format_event_time(&self.rise_set.rise),
            format_event_azimuth(&self.rise_set.rise)
        )?;
        writeln!(
            f,
            "  set          {} ({})",
            format_event_time(&self.rise_set.set),
            format_event_azimuth(&self.rise_set.set)
        )?;
        writeln!(
            f,
            "  phase        {}   magnitude {}   extinction {:.2}",
            format_optional(self.appearance.phase),
            format_optional(self.appearance.magnitude),
            self.appearance.extinction
        )?;
        writeln!(
            f,
            "  size         {:.1}\"   distance {}",
            self.appearance.apparent_size * 3600.0,
            format_distance(self.appearance.distance)
        )
    }
}
