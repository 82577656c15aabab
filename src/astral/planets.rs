//! The seven classical planets and their ruling tables.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// The seven classical planets in Chaldean order: decreasing apparent
/// orbital period, slowest first. The Sun and Moon count as planets in this
/// scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Planet {
    Saturn,
    Jupiter,
    Mars,
    Sun,
    Venus,
    Mercury,
    Moon,
}

/// The planets laid out by Chaldean index, 0 (Saturn) through 6 (Moon).
pub const CHALDEAN_ORDER: [Planet; 7] = [
    Planet::Saturn,
    Planet::Jupiter,
    Planet::Mars,
    Planet::Sun,
    Planet::Venus,
    Planet::Mercury,
    Planet::Moon,
];

impl Planet {
    /// Position of this planet in the Chaldean order.
    pub fn chaldean_index(self) -> usize {
        self as usize
    }

    /// Planet at the given Chaldean index, if any.
    pub fn from_index(index: usize) -> Option<Planet> {
        CHALDEAN_ORDER.get(index).copied()
    }

    /// Ruling planet of a weekday. The table is indexed from Monday.
    pub fn from_weekday(weekday: Weekday) -> Planet {
        match weekday {
            Weekday::Mon => Planet::Sun,
            Weekday::Tue => Planet::Moon,
            Weekday::Wed => Planet::Mercury,
            Weekday::Thu => Planet::Venus,
            Weekday::Fri => Planet::Mars,
            Weekday::Sat => Planet::Jupiter,
            Weekday::Sun => Planet::Saturn,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Planet::Saturn => "Saturn",
            Planet::Jupiter => "Jupiter",
            Planet::Mars => "Mars",
            Planet::Sun => "Sun",
            Planet::Venus => "Venus",
            Planet::Mercury => "Mercury",
            Planet::Moon => "Moon",
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Planet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CHALDEAN_ORDER
            .into_iter()
            .find(|planet| planet.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Invalid planet '{}'. Valid options are: Saturn, Jupiter, Mars, Sun, Venus, Mercury, Moon",
                    s
                )
            })
    }
}
