//! Planetary hours: the validated hour value, the bounded day container,
//! and the sunrise/sunset generator.

use std::fmt;

use chrono::{Datelike, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use super::AstralError;
use super::planets::{CHALDEAN_ORDER, Planet};
use crate::storable::Storable;
use crate::timing::{self, TIMESTAMP_FORMAT, Timing};

/// Upper bound on hours held by a single [`PlanetaryDay`].
pub const PLANETARY_DAY_CAP: usize = 25;

/// Planetary hours are always under two hours of wall-clock time.
const MAX_HOUR_SECONDS: i64 = 2 * 60 * 60;

/// One ruled hour: a planet and the interval it governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HourRecord", into = "HourRecord")]
pub struct PlanetaryHour {
    planet: Planet,
    timing: Timing,
}

/// Raw mapping form; validated into a [`PlanetaryHour`] by serde.
#[derive(Serialize, Deserialize)]
struct HourRecord {
    planet: Planet,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<HourRecord> for PlanetaryHour {
    type Error = AstralError;

    fn try_from(record: HourRecord) -> Result<Self, Self::Error> {
        PlanetaryHour::new(record.planet, record.start, record.end)
    }
}

impl From<PlanetaryHour> for HourRecord {
    fn from(hour: PlanetaryHour) -> Self {
        Self {
            planet: hour.planet,
            start: hour.timing.start(),
            end: hour.timing.end(),
        }
    }
}

impl PlanetaryHour {
    /// Rejects empty or reversed intervals and anything over two hours.
    pub fn new(
        planet: Planet,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, AstralError> {
        if end <= start {
            return Err(AstralError::EmptyHour);
        }
        let timing = Timing::new(start, end)?;
        if timing.elapsed() > TimeDelta::seconds(MAX_HOUR_SECONDS) {
            return Err(AstralError::OverlongHour(timing.elapsed().num_seconds()));
        }
        Ok(Self { planet, timing })
    }

    pub fn planet(&self) -> Planet {
        self.planet
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn start(&self) -> NaiveDateTime {
        self.timing.start()
    }

    pub fn end(&self) -> NaiveDateTime {
        self.timing.end()
    }

    pub fn elapsed(&self) -> TimeDelta {
        self.timing.elapsed()
    }

    /// Parse the flat `planet,start,end` form produced by [`Storable::csv`].
    pub fn from_csv(record: &str) -> Result<Self, AstralError> {
        let fields: Vec<&str> = record.trim().split(',').collect();
        let [planet, start, end] = fields[..] else {
            return Err(AstralError::Parse(format!(
                "expected 'planet,start,end', got '{}'",
                record.trim()
            )));
        };
        let planet: Planet = planet.parse().map_err(AstralError::Parse)?;
        PlanetaryHour::new(
            planet,
            timing::parse_timestamp(start)?,
            timing::parse_timestamp(end)?,
        )
    }

    /// Parse the tagged form produced by [`Storable::markup`].
    pub fn from_markup(text: &str) -> Result<Self, AstralError> {
        let document =
            roxmltree::Document::parse(text).map_err(|e| AstralError::Parse(e.to_string()))?;
        let root = document.root_element();
        if !root.has_tag_name("planetary_hour") {
            return Err(AstralError::Parse(format!(
                "expected a <planetary_hour> element, got <{}>",
                root.tag_name().name()
            )));
        }
        let planet = root
            .children()
            .find(|child| child.has_tag_name("planet"))
            .and_then(|child| child.text())
            .ok_or_else(|| AstralError::Parse("missing <planet> element".to_string()))?
            .parse::<Planet>()
            .map_err(AstralError::Parse)?;
        let timing_node = root
            .children()
            .find(|child| child.has_tag_name("timing"))
            .ok_or_else(|| AstralError::Parse("missing <timing> element".to_string()))?;
        let timing = timing::timing_from_node(timing_node)?;
        PlanetaryHour::new(planet, timing.start(), timing.end())
    }
}

impl fmt::Display for PlanetaryHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.planet, self.timing)
    }
}

impl Storable for PlanetaryHour {
    fn csv(&self) -> String {
        format!("{},{}", self.planet, self.timing.csv())
    }

    fn markup(&self) -> String {
        format!(
            "<planetary_hour><planet>{}</planet>{}</planetary_hour>",
            self.planet,
            self.timing.markup()
        )
    }

    fn json(&self) -> serde_json::Value {
        serde_json::json!({
            "planet": self.planet.name(),
            "start": self.start().format(TIMESTAMP_FORMAT).to_string(),
            "end": self.end().format(TIMESTAMP_FORMAT).to_string(),
        })
    }
}

/// A day's worth of ruled hours: a bounded sequence holding at most
/// [`PLANETARY_DAY_CAP`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PlanetaryHour>", into = "Vec<PlanetaryHour>")]
pub struct PlanetaryDay {
    hours: Vec<PlanetaryHour>,
}

impl TryFrom<Vec<PlanetaryHour>> for PlanetaryDay {
    type Error = AstralError;

    fn try_from(hours: Vec<PlanetaryHour>) -> Result<Self, Self::Error> {
        if hours.len() > PLANETARY_DAY_CAP {
            return Err(AstralError::DayFull);
        }
        Ok(Self { hours })
    }
}

impl From<PlanetaryDay> for Vec<PlanetaryHour> {
    fn from(day: PlanetaryDay) -> Self {
        day.hours
    }
}

impl PlanetaryDay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an hour. Appending past the cap is an explicit error; nothing
    /// is dropped silently.
    pub fn push(&mut self, hour: PlanetaryHour) -> Result<(), AstralError> {
        if self.hours.len() >= PLANETARY_DAY_CAP {
            return Err(AstralError::DayFull);
        }
        self.hours.push(hour);
        Ok(())
    }

    pub fn hours(&self) -> &[PlanetaryHour] {
        &self.hours
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlanetaryHour> {
        self.hours.get(index)
    }

    pub fn first(&self) -> Option<&PlanetaryHour> {
        self.hours.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanetaryHour> {
        self.hours.iter()
    }
}

impl<'a> IntoIterator for &'a PlanetaryDay {
    type Item = &'a PlanetaryHour;
    type IntoIter = std::slice::Iter<'a, PlanetaryHour>;

    fn into_iter(self) -> Self::IntoIter {
        self.hours.iter()
    }
}

impl fmt::Display for PlanetaryDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hour in &self.hours {
            writeln!(f, "{hour}")?;
        }
        Ok(())
    }
}

impl Storable for PlanetaryDay {
    fn csv(&self) -> String {
        self.hours
            .iter()
            .map(Storable::csv)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn markup(&self) -> String {
        let mut out = String::from("<planetary_day>\n");
        for hour in &self.hours {
            out.push('\t');
            out.push_str(&hour.markup());
            out.push('\n');
        }
        out.push_str("</planetary_day>\n");
        out
    }

    fn json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.hours.iter().map(Storable::json).collect())
    }
}

/// Divide daylight (sunrise to sunset) and the following night (sunset to
/// the next sunrise) into twelve ruled hours each.
///
/// The rotation starts from the ruling planet of the sunrise weekday and
/// walks the Chaldean order; when the index runs off the end it re-enters at
/// 1, never 0, reproducing the classical sequence of first hours across
/// consecutive days.
pub fn planetary_hours(
    sunrise: NaiveDateTime,
    sunset: NaiveDateTime,
) -> Result<PlanetaryDay, AstralError> {
    if sunset <= sunrise {
        return Err(AstralError::SunsetBeforeSunrise { sunrise, sunset });
    }
    if sunrise.date() != sunset.date() {
        return Err(AstralError::SplitDay);
    }

    let day_length = (sunset - sunrise) / 12;
    let night_length = (sunrise + TimeDelta::days(1) - sunset) / 12;

    let mut index = Planet::from_weekday(sunrise.weekday()).chaldean_index();
    let mut day = PlanetaryDay::new();
    for (half_start, length) in [(sunrise, day_length), (sunset, night_length)] {
        for slot in 0..12 {
            let start = half_start + length * slot;
            day.push(PlanetaryHour::new(CHALDEAN_ORDER[index], start, start + length)?)?;
            index += 1;
            if index == CHALDEAN_ORDER.len() {
                // the cycle re-enters past Saturn, never at it
                index = 1;
            }
        }
    }
    Ok(day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(text: &str) -> NaiveDateTime {
        text.parse().unwrap()
    }

    #[test]
    fn hour_rejects_two_hours_and_a_second() {
        let result = PlanetaryHour::new(
            Planet::Sun,
            at("2024-10-28T06:00:00"),
            at("2024-10-28T08:00:01"),
        );
        assert!(matches!(result, Err(AstralError::OverlongHour(7201))));
    }

    #[test]
    fn hour_accepts_exactly_two_hours() {
        let hour = PlanetaryHour::new(
            Planet::Sun,
            at("2024-10-28T06:00:00"),
            at("2024-10-28T08:00:00"),
        )
        .unwrap();
        assert_eq!(hour.elapsed(), TimeDelta::hours(2));
    }

    #[test]
    fn hour_rejects_empty_interval() {
        let instant = at("2024-10-28T06:00:00");
        let result = PlanetaryHour::new(Planet::Sun, instant, instant);
        assert!(matches!(result, Err(AstralError::EmptyHour)));
    }

    #[test]
    fn day_rejects_the_twenty_sixth_hour() {
        let mut day = PlanetaryDay::new();
        for slot in 0..PLANETARY_DAY_CAP as i64 {
            let start = at("2024-10-28T00:00:00") + TimeDelta::minutes(slot);
            let hour =
                PlanetaryHour::new(Planet::Moon, start, start + TimeDelta::minutes(1)).unwrap();
            day.push(hour).unwrap();
        }
        assert_eq!(day.len(), PLANETARY_DAY_CAP);

        let start = at("2024-10-28T12:00:00");
        let extra = PlanetaryHour::new(Planet::Moon, start, start + TimeDelta::minutes(1)).unwrap();
        assert_eq!(day.push(extra), Err(AstralError::DayFull));
        assert_eq!(day.len(), PLANETARY_DAY_CAP);
    }

    #[test]
    fn generator_rejects_reversed_and_split_inputs() {
        let sunrise = at("2024-10-28T06:00:00");
        assert!(matches!(
            planetary_hours(sunrise, at("2024-10-28T05:00:00")),
            Err(AstralError::SunsetBeforeSunrise { .. })
        ));
        assert!(matches!(
            planetary_hours(sunrise, sunrise),
            Err(AstralError::SunsetBeforeSunrise { .. })
        ));
        assert!(matches!(
            planetary_hours(sunrise, at("2024-10-29T18:00:00")),
            Err(AstralError::SplitDay)
        ));
    }
}
