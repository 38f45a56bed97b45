//! Unit system utilities
//!
//! All model geometry is stored in feet. The display unit only changes how
//! lengths are formatted and parsed, and which snap grid step is used.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Feet per metre.
pub const FEET_PER_METER: f64 = 1.0 / 0.3048;

/// Imperial snap step: half a foot.
pub const IMPERIAL_SNAP_STEP: f64 = 0.5;

/// Metric snap step: 10 cm expressed in feet.
pub const METRIC_SNAP_STEP: f64 = 0.1 * FEET_PER_METER;

/// Display unit system of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Feet and inches
    #[default]
    Imperial,
    /// Metres
    Metric,
}

impl Units {
    /// Grid step (in feet) that user-placed geometry snaps to.
    pub fn snap_step(self) -> f64 {
        match self {
            Self::Imperial => IMPERIAL_SNAP_STEP,
            Self::Metric => METRIC_SNAP_STEP,
        }
    }

    /// The other unit system.
    pub fn toggled(self) -> Self {
        match self {
            Self::Imperial => Self::Metric,
            Self::Metric => Self::Imperial,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Imperial => write!(f, "imperial"),
            Self::Metric => write!(f, "metric"),
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "imperial" | "ft" | "feet" => Ok(Self::Imperial),
            "metric" | "m" | "meters" | "metres" => Ok(Self::Metric),
            other => Err(format!("Unknown unit system: {}", other)),
        }
    }
}

/// Format a length for display
///
/// * `feet` - Value in model units
/// * `units` - Target display system
///
/// Imperial lengths are printed as feet and whole inches (`12' 6"`),
/// metric lengths as metres with two decimals (`3.81 m`).
pub fn format_length(feet: f64, units: Units) -> String {
    match units {
        Units::Imperial => {
            let total_inches = (feet * 12.0).round() as i64;
            let sign = if total_inches < 0 { "-" } else { "" };
            let total_inches = total_inches.abs();
            format!("{}{}' {}\"", sign, total_inches / 12, total_inches % 12)
        }
        Units::Metric => format!("{:.2} m", feet / FEET_PER_METER),
    }
}

/// Parse a length string into feet
///
/// * `input` - String to parse
/// * `units` - System assumed for bare numbers
///
/// Accepts `ft`/`'`, `in`/`"`, `m` and `cm` suffixes as well as combined
/// feet-and-inches values such as `12' 6"`.
pub fn parse_length(input: &str, units: Units) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    if let Some((feet_part, rest)) = input.split_once('\'') {
        let feet = parse_number(feet_part)?;
        let rest = rest.trim().trim_end_matches('"').trim();
        let rest = rest.strip_suffix("in").unwrap_or(rest).trim();
        let inches = if rest.is_empty() {
            0.0
        } else {
            parse_number(rest)?
        };
        let sign = if feet_part.trim().starts_with('-') {
            -1.0
        } else {
            1.0
        };
        return Ok(feet + sign * inches / 12.0);
    }

    let lower = input.to_lowercase();
    if let Some(value) = lower.strip_suffix("ft") {
        return parse_number(value);
    }
    if let Some(value) = lower.strip_suffix('"').or_else(|| lower.strip_suffix("in")) {
        return Ok(parse_number(value)? / 12.0);
    }
    if let Some(value) = lower.strip_suffix("cm") {
        return Ok(parse_number(value)? / 100.0 * FEET_PER_METER);
    }
    if let Some(value) = lower.strip_suffix('m') {
        return Ok(parse_number(value)? * FEET_PER_METER);
    }

    let value = parse_number(&lower)?;
    Ok(match units {
        Units::Imperial => value,
        Units::Metric => value * FEET_PER_METER,
    })
}

fn parse_number(text: &str) -> Result<f64, String> {
    let text = text.trim();
    let value = text
        .parse::<f64>()
        .map_err(|_| format!("Invalid length: {}", text))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("Invalid length: {}", text))
    }
}
