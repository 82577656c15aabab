//! Zodiac signs, their conventional date ranges, and the date-to-position
//! resolver.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::AstralError;
use crate::storable::Storable;

/// Sun angle at the start boundary of a sign's date range, in degrees.
pub const CUSP_OFFSET_DEGREES: f64 = 8.0;

/// Degrees spanned by one sign.
const SIGN_SPAN_DEGREES: f64 = 30.0;

/// The twelve tropical zodiac signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// One-based position in the conventional ordering, Aries = 1.
    pub fn index(self) -> usize {
        self as usize + 1
    }

    /// Sign at the given one-based index, if any.
    pub fn from_index(index: usize) -> Option<ZodiacSign> {
        index
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZodiacSign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sign| sign.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid zodiac sign '{}'", s))
    }
}

/// Inclusive date range conventionally assigned to a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignRange {
    pub sign: ZodiacSign,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SignRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Month/day boundaries with a year offset: Capricorn runs into the next
/// year, Aquarius and Pisces fall wholly inside it.
const SIGN_BOUNDS: [(ZodiacSign, (i32, u32, u32), (i32, u32, u32)); 12] = [
    (ZodiacSign::Aries, (0, 3, 21), (0, 4, 19)),
    (ZodiacSign::Taurus, (0, 4, 20), (0, 5, 20)),
    (ZodiacSign::Gemini, (0, 5, 21), (0, 6, 20)),
    (ZodiacSign::Cancer, (0, 6, 21), (0, 7, 22)),
    (ZodiacSign::Leo, (0, 7, 23), (0, 8, 22)),
    (ZodiacSign::Virgo, (0, 8, 23), (0, 9, 22)),
    (ZodiacSign::Libra, (0, 9, 23), (0, 10, 22)),
    (ZodiacSign::Scorpio, (0, 10, 23), (0, 11, 21)),
    (ZodiacSign::Sagittarius, (0, 11, 22), (0, 12, 21)),
    (ZodiacSign::Capricorn, (0, 12, 22), (1, 1, 19)),
    (ZodiacSign::Aquarius, (1, 1, 20), (1, 2, 18)),
    (ZodiacSign::Pisces, (1, 2, 19), (1, 3, 20)),
];

fn bound(year: i32, (offset, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year + offset, month, day).expect("sign boundary is a valid date")
}

/// Sign date ranges anchored to `year`, computed on demand: Aries through
/// Sagittarius fall in `year`; Capricorn starts that December and ends in
/// January of the following year, with Aquarius and Pisces wholly in the
/// following year.
pub fn sign_ranges(year: i32) -> [SignRange; 12] {
    SIGN_BOUNDS.map(|(sign, start, end)| SignRange {
        sign,
        start: bound(year, start),
        end: bound(year, end),
    })
}

/// Resolve the sign whose range contains `date`, and the sun's angle within
/// that sign interpolated from the cusp offset at the range start to the end
/// of the sign's span at the range end.
///
/// Ranges anchored to the previous year are consulted as well, so dates in
/// the Capricorn-to-Pisces stretch early in a year resolve against the table
/// that began the prior December.
pub fn which_sign(date: NaiveDate) -> Result<ZodiacalPosition, AstralError> {
    for anchor in [date.year(), date.year() - 1] {
        if let Some(range) = sign_ranges(anchor)
            .into_iter()
            .find(|range| range.contains(date))
        {
            let total = (range.end - range.start).num_days() as f64;
            let elapsed = (date - range.start).num_days() as f64;
            let angle =
                CUSP_OFFSET_DEGREES + (elapsed / total) * (SIGN_SPAN_DEGREES - CUSP_OFFSET_DEGREES);
            return ZodiacalPosition::new(range.sign, angle);
        }
    }
    Err(AstralError::SignNotFound(date))
}

/// A sign plus an angle in degrees, normalized to [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PositionRecord", into = "PositionRecord")]
pub struct ZodiacalPosition {
    sign: ZodiacSign,
    angle: f64,
}

/// Raw mapping form; validated into a [`ZodiacalPosition`] by serde.
#[derive(Serialize, Deserialize)]
struct PositionRecord {
    zodiac: ZodiacSign,
    angle: f64,
}

impl TryFrom<PositionRecord> for ZodiacalPosition {
    type Error = AstralError;

    fn try_from(record: PositionRecord) -> Result<Self, Self::Error> {
        ZodiacalPosition::new(record.zodiac, record.angle)
    }
}

impl From<ZodiacalPosition> for PositionRecord {
    fn from(position: ZodiacalPosition) -> Self {
        Self {
            zodiac: position.sign,
            angle: position.angle,
        }
    }
}

impl ZodiacalPosition {
    /// Angles outside [0, 360] are rejected; exactly 360 wraps to 0.
    pub fn new(sign: ZodiacSign, angle: f64) -> Result<Self, AstralError> {
        if !(0.0..=360.0).contains(&angle) {
            return Err(AstralError::AngleOutOfRange(angle));
        }
        Ok(Self {
            sign,
            angle: angle % 360.0,
        })
    }

    pub fn sign(&self) -> ZodiacSign {
        self.sign
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }
}

impl fmt::Display for ZodiacalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}°)", self.sign, self.angle)
    }
}

impl Storable for ZodiacalPosition {
    fn csv(&self) -> String {
        format!("{},{}", self.sign, self.angle)
    }

    fn markup(&self) -> String {
        format!(
            "<zodiac>{}</zodiac><angle>{}</angle>",
            self.sign, self.angle
        )
    }

    fn json(&self) -> serde_json::Value {
        serde_json::json!({ "zodiac": self.sign.name(), "angle": self.angle })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_of_exactly_360_wraps_to_zero() {
        let position = ZodiacalPosition::new(ZodiacSign::Aries, 360.0).unwrap();
        assert_eq!(position.angle(), 0.0);
    }

    #[test]
    fn angles_outside_the_gate_are_rejected() {
        assert!(matches!(
            ZodiacalPosition::new(ZodiacSign::Aries, -1.0),
            Err(AstralError::AngleOutOfRange(_))
        ));
        assert!(matches!(
            ZodiacalPosition::new(ZodiacSign::Aries, 361.0),
            Err(AstralError::AngleOutOfRange(_))
        ));
        assert!(ZodiacalPosition::new(ZodiacSign::Aries, 0.0).is_ok());
    }

    #[test]
    fn ranges_are_contiguous_across_the_year() {
        let ranges = sign_ranges(2024);
        for pair in ranges.windows(2) {
            assert_eq!(
                pair[0].end.succ_opt().unwrap(),
                pair[1].start,
                "{} does not hand over to {}",
                pair[0].sign,
                pair[1].sign
            );
        }
    }

    #[test]
    fn one_based_indices_round_trip() {
        for sign in ZodiacSign::ALL {
            assert_eq!(ZodiacSign::from_index(sign.index()), Some(sign));
        }
        assert_eq!(ZodiacSign::from_index(0), None);
        assert_eq!(ZodiacSign::from_index(13), None);
    }
}
