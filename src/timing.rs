//! Wall-clock interval primitives shared by the task list and the astral
//! toolkit.
//!
//! [`Timing`] is the base interval (`start <= end`); [`Duration`] is an
//! interval whose primary output is its elapsed delta. Timing's three export
//! forms (mapping, delimited line, tagged markup) all parse back to the exact
//! original value.

use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storable::Storable;

/// Timestamp layout used by the flat and tagged export forms.
///
/// `%.f` prints fractional seconds only when present, so whole-second values
/// stay compact and every value parses back to the same instant.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Errors raised by interval construction and parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimingError {
    #[error("start {start} is after end {end}")]
    StartAfterEnd {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("malformed timing record: {0}")]
    Parse(String),
}

/// A wall-clock interval with `start <= end`, enforced at construction and
/// at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimingRecord", into = "TimingRecord")]
pub struct Timing {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

/// Raw mapping form; validated into a [`Timing`] by serde.
#[derive(Serialize, Deserialize)]
struct TimingRecord {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<TimingRecord> for Timing {
    type Error = TimingError;

    fn try_from(record: TimingRecord) -> Result<Self, Self::Error> {
        Timing::new(record.start, record.end)
    }
}

impl From<Timing> for TimingRecord {
    fn from(timing: Timing) -> Self {
        Self {
            start: timing.start,
            end: timing.end,
        }
    }
}

impl Timing {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, TimingError> {
        if start > end {
            return Err(TimingError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Elapsed wall-clock time between start and end.
    pub fn elapsed(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Parse the flat `start,end` form produced by [`Storable::csv`].
    pub fn from_csv(record: &str) -> Result<Self, TimingError> {
        let fields: Vec<&str> = record.trim().split(',').collect();
        let [start, end] = fields[..] else {
            return Err(TimingError::Parse(format!(
                "expected 'start,end', got '{}'",
                record.trim()
            )));
        };
        Timing::new(parse_timestamp(start)?, parse_timestamp(end)?)
    }

    /// Parse the tagged form produced by [`Storable::markup`].
    pub fn from_markup(text: &str) -> Result<Self, TimingError> {
        let document =
            roxmltree::Document::parse(text).map_err(|e| TimingError::Parse(e.to_string()))?;
        let root = document.root_element();
        if !root.has_tag_name("timing") {
            return Err(TimingError::Parse(format!(
                "expected a <timing> element, got <{}>",
                root.tag_name().name()
            )));
        }
        timing_from_node(root)
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format(TIMESTAMP_FORMAT),
            self.end.format(TIMESTAMP_FORMAT)
        )
    }
}

impl Storable for Timing {
    fn csv(&self) -> String {
        format!(
            "{},{}",
            self.start.format(TIMESTAMP_FORMAT),
            self.end.format(TIMESTAMP_FORMAT)
        )
    }

    fn markup(&self) -> String {
        format!(
            "<timing><start>{}</start><end>{}</end></timing>",
            self.start.format(TIMESTAMP_FORMAT),
            self.end.format(TIMESTAMP_FORMAT)
        )
    }

    fn json(&self) -> serde_json::Value {
        serde_json::json!({
            "start": self.start.format(TIMESTAMP_FORMAT).to_string(),
            "end": self.end.format(TIMESTAMP_FORMAT).to_string(),
        })
    }
}

/// An interval whose primary output is its elapsed wall-clock delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duration {
    timing: Timing,
}

impl Duration {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, TimingError> {
        Ok(Self {
            timing: Timing::new(start, end)?,
        })
    }

    pub fn from_timing(timing: Timing) -> Self {
        Self { timing }
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn elapsed(&self) -> TimeDelta {
        self.timing.elapsed()
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_delta(self.elapsed()))
    }
}

impl Storable for Duration {
    fn csv(&self) -> String {
        format_delta(self.elapsed())
    }

    fn markup(&self) -> String {
        format!("<duration>{}</duration>", format_delta(self.elapsed()))
    }

    fn json(&self) -> serde_json::Value {
        serde_json::json!({
            "start": self.timing.start().format(TIMESTAMP_FORMAT).to_string(),
            "end": self.timing.end().format(TIMESTAMP_FORMAT).to_string(),
            "duration_seconds": self.elapsed().num_seconds(),
        })
    }
}

/// `H:MM:SS` rendering of a delta.
pub(crate) fn format_delta(delta: TimeDelta) -> String {
    let seconds = delta.num_seconds();
    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

pub(crate) fn parse_timestamp(text: &str) -> Result<NaiveDateTime, TimingError> {
    NaiveDateTime::parse_from_str(text.trim(), TIMESTAMP_FORMAT)
        .map_err(|e| TimingError::Parse(format!("bad timestamp '{}': {e}", text.trim())))
}

/// Read a validated [`Timing`] out of a `<timing>` element.
pub(crate) fn timing_from_node(node: roxmltree::Node<'_, '_>) -> Result<Timing, TimingError> {
    let field = |name: &str| {
        node.children()
            .find(|child| child.has_tag_name(name))
            .and_then(|child| child.text())
            .ok_or_else(|| TimingError::Parse(format!("missing <{name}> element")))
    };
    Timing::new(parse_timestamp(field("start")?)?, parse_timestamp(field("end")?)?)
}
