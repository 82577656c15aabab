//! Observed planet positions and the rendered sky table.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::planets::Planet;
use super::zodiac::ZodiacalPosition;
use crate::storable::Storable;

/// Apparent motion of a planet through the zodiac.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Motion {
    #[default]
    Direct,
    Retrograde,
}

/// A planet observed at a zodiacal position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionedPlanet {
    pub planet: Planet,
    pub position: ZodiacalPosition,
    #[serde(default)]
    pub motion: Motion,
}

impl PositionedPlanet {
    pub fn new(planet: Planet, position: ZodiacalPosition) -> Self {
        Self {
            planet,
            position,
            motion: Motion::Direct,
        }
    }

    pub fn retrograde(planet: Planet, position: ZodiacalPosition) -> Self {
        Self {
            planet,
            position,
            motion: Motion::Retrograde,
        }
    }

    fn marker(&self) -> &'static str {
        match self.motion {
            Motion::Direct => "",
            Motion::Retrograde => " (R)",
        }
    }
}

impl fmt::Display for PositionedPlanet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} at {:.1}° {}",
            self.planet,
            self.marker(),
            self.position.angle(),
            self.position.sign()
        )
    }
}

impl Storable for PositionedPlanet {
    fn csv(&self) -> String {
        format!(
            "{},{},{}",
            self.planet,
            self.position.sign(),
            self.position.angle()
        )
    }

    fn markup(&self) -> String {
        format!(
            "<positioned_planet><planet>{}</planet>{}</positioned_planet>",
            self.planet,
            self.position.markup()
        )
    }

    fn json(&self) -> serde_json::Value {
        serde_json::json!({
            "planet": self.planet.name(),
            "zodiac": self.position.sign().name(),
            "angle": self.position.angle(),
            "retrograde": self.motion == Motion::Retrograde,
        })
    }
}

/// The planets observed on a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZodiacalSky {
    date: NaiveDate,
    planets: Vec<PositionedPlanet>,
}

impl ZodiacalSky {
    pub fn new(date: NaiveDate, planets: Vec<PositionedPlanet>) -> Self {
        Self { date, planets }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn planets(&self) -> &[PositionedPlanet] {
        &self.planets
    }
}

impl fmt::Display for ZodiacalSky {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for planet in &self.planets {
            writeln!(
                f,
                "{:<10}{:>4} at {:>5.1}° {:>14}",
                planet.planet.name(),
                planet.marker(),
                planet.position.angle(),
                planet.position.sign().name()
            )?;
        }
        Ok(())
    }
}

impl Storable for ZodiacalSky {
    fn csv(&self) -> String {
        self.planets
            .iter()
            .map(Storable::csv)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn markup(&self) -> String {
        let mut out = format!("<zodiacal_sky><date>{}</date>\n", self.date);
        for planet in &self.planets {
            out.push('\t');
            out.push_str(&planet.markup());
            out.push('\n');
        }
        out.push_str("</zodiacal_sky>\n");
        out
    }

    fn json(&self) -> serde_json::Value {
        serde_json::json!({
            "date": self.date.to_string(),
            "planets": self.planets.iter().map(Storable::json).collect::<Vec<_>>(),
        })
    }
}
