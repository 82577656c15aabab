//! Planetary-hours and zodiac toolkit.
//!
//! Split into submodules:
//! - `planets`: the seven classical planets in Chaldean order and the
//!   weekday ruling table
//! - `hours`: validated planetary hours, the bounded day container, and the
//!   12+12 hour generator
//! - `zodiac`: sign date ranges and the date-to-position resolver
//! - `sky`: observed planet positions and the sky table

mod hours;
mod planets;
mod sky;
mod zodiac;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::timing::TimingError;

pub use hours::{PLANETARY_DAY_CAP, PlanetaryDay, PlanetaryHour, planetary_hours};
pub use planets::{CHALDEAN_ORDER, Planet};
pub use sky::{Motion, PositionedPlanet, ZodiacalSky};
pub use zodiac::{
    CUSP_OFFSET_DEGREES, SignRange, ZodiacSign, ZodiacalPosition, sign_ranges, which_sign,
};

/// Errors raised by the astral toolkit.
#[derive(Debug, Error, PartialEq)]
pub enum AstralError {
    #[error(transparent)]
    Timing(#[from] TimingError),
    #[error("planetary hour must end after it starts")]
    EmptyHour,
    #[error("planetary hour runs {0} seconds, past the two-hour limit")]
    OverlongHour(i64),
    #[error("sunset {sunset} does not follow sunrise {sunrise}")]
    SunsetBeforeSunrise {
        sunrise: NaiveDateTime,
        sunset: NaiveDateTime,
    },
    #[error("sunrise and sunset must fall on the same calendar day")]
    SplitDay,
    #[error("planetary day is full")]
    DayFull,
    #[error("angle {0} is outside [0, 360]")]
    AngleOutOfRange(f64),
    #[error("no zodiac range contains {0}")]
    SignNotFound(NaiveDate),
    #[error("malformed record: {0}")]
    Parse(String),
}
