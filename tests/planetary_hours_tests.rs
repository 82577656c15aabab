// Integration tests for the planetary-hours generator: partitioning and
// the Chaldean rotation.

mod common;

use chrono::TimeDelta;
use common::timestamp;
use taskr::astral::{AstralError, Planet, planetary_hours};

#[test]
fn a_day_yields_exactly_twenty_four_hours() {
    let day = planetary_hours(
        timestamp("2024-10-30T06:00:00"),
        timestamp("2024-10-30T18:00:00"),
    )
    .unwrap();
    assert_eq!(day.len(), 24);
}

#[test]
fn halves_partition_without_gaps_or_overlaps() {
    let sunrise = timestamp("2024-10-30T05:48:00");
    let sunset = timestamp("2024-10-30T18:00:00");
    let day = planetary_hours(sunrise, sunset).unwrap();
    let hours = day.hours();

    // daylight: 12h12m -> 61-minute hours; night: 11h48m -> 59-minute hours
    for hour in &hours[..12] {
        assert_eq!(hour.elapsed(), TimeDelta::minutes(61));
    }
    for hour in &hours[12..] {
        assert_eq!(hour.elapsed(), TimeDelta::minutes(59));
    }

    assert_eq!(hours[0].start(), sunrise);
    assert_eq!(hours[11].end(), sunset);
    assert_eq!(hours[12].start(), sunset);
    assert_eq!(hours[23].end(), sunrise + TimeDelta::days(1));

    for pair in hours[..12].windows(2) {
        assert_eq!(pair[0].end(), pair[1].start());
    }
    for pair in hours[12..].windows(2) {
        assert_eq!(pair[0].end(), pair[1].start());
    }
}

#[test]
fn monday_opens_with_sun_then_venus() {
    // 2024-10-28 is a Monday, ruled by the Sun
    let day = planetary_hours(
        timestamp("2024-10-28T06:00:00"),
        timestamp("2024-10-28T18:00:00"),
    )
    .unwrap();
    assert_eq!(day.hours()[0].planet(), Planet::Sun);
    assert_eq!(day.hours()[1].planet(), Planet::Venus);
}

#[test]
fn wednesday_rotation_matches_the_wrap_to_one_rule() {
    // 2024-10-30 is a Wednesday, ruled by Mercury (Chaldean index 5).
    // After Moon (index 6) the rotation re-enters at index 1 (Jupiter),
    // skipping Saturn, so the cycle settles into a six-planet loop.
    let day = planetary_hours(
        timestamp("2024-10-30T06:00:00"),
        timestamp("2024-10-30T18:00:00"),
    )
    .unwrap();

    use Planet::*;
    let cycle = [Mercury, Moon, Jupiter, Mars, Sun, Venus];
    let expected: Vec<Planet> = cycle.iter().copied().cycle().take(24).collect();
    let actual: Vec<Planet> = day.iter().map(|hour| hour.planet()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn saturn_rules_only_the_sunday_first_hour() {
    // 2024-11-03 is a Sunday, ruled by Saturn (index 0). Saturn can never
    // be re-entered by the rotation, so it appears exactly once.
    let day = planetary_hours(
        timestamp("2024-11-03T06:00:00"),
        timestamp("2024-11-03T18:00:00"),
    )
    .unwrap();

    assert_eq!(day.hours()[0].planet(), Planet::Saturn);
    let saturn_count = day
        .iter()
        .filter(|hour| hour.planet() == Planet::Saturn)
        .count();
    assert_eq!(saturn_count, 1);
}

#[test]
fn every_weekday_starts_with_its_ruler() {
    // 2024-10-28 through 2024-11-03 covers Monday to Sunday
    let rulers = [
        Planet::Sun,
        Planet::Moon,
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
    ];
    for (offset, ruler) in rulers.into_iter().enumerate() {
        let sunrise = timestamp("2024-10-28T06:00:00") + TimeDelta::days(offset as i64);
        let sunset = timestamp("2024-10-28T18:00:00") + TimeDelta::days(offset as i64);
        let day = planetary_hours(sunrise, sunset).unwrap();
        assert_eq!(day.hours()[0].planet(), ruler, "day offset {offset}");
    }
}

#[test]
fn malformed_inputs_are_rejected() {
    let sunrise = timestamp("2024-10-30T06:00:00");
    assert!(matches!(
        planetary_hours(sunrise, timestamp("2024-10-30T05:00:00")),
        Err(AstralError::SunsetBeforeSunrise { .. })
    ));
    assert!(matches!(
        planetary_hours(sunrise, timestamp("2024-10-31T18:00:00")),
        Err(AstralError::SplitDay)
    ));
}

#[test]
fn short_winter_day_keeps_hours_under_the_limit() {
    // 6h daylight -> 30-minute hours; 18h night -> 90-minute hours, still
    // under the two-hour cap
    let day = planetary_hours(
        timestamp("2024-12-21T09:00:00"),
        timestamp("2024-12-21T15:00:00"),
    )
    .unwrap();
    assert_eq!(day.hours()[0].elapsed(), TimeDelta::minutes(30));
    assert_eq!(day.hours()[12].elapsed(), TimeDelta::minutes(90));
}
