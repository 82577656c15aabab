//! Plain-text reports over the astral types.

use chrono::Datelike;

use crate::astral::{Planet, PlanetaryDay, ZodiacalSky};

const RULE: &str = "--------------------------------------------------------";

/// Render a day of ruled hours as a two-column table headed by the date,
/// weekday, and the day's ruling planet.
pub fn planetary_day_report(day: &PlanetaryDay) -> String {
    let Some(first) = day.first() else {
        return "No planetary hours to report\n".to_string();
    };
    let date = first.start().date();
    let ruler = Planet::from_weekday(date.weekday());

    let mut out = format!("{RULE}\n");
    out.push_str(&format!("  {}    {} ({})\n\n", date, date.format("%A"), ruler));
    out.push_str("  start    -    end         Planetary Ruler\n");
    out.push_str(&format!("{RULE}\n"));
    for hour in day {
        out.push_str(&format!(
            "  {} - {}      {}\n",
            hour.start().format("%I:%M %p"),
            hour.end().format("%I:%M %p"),
            hour.planet()
        ));
    }
    out.push_str(&format!("{RULE}\n"));
    out
}

/// Render an observed sky as a table headed by its date.
pub fn zodiacal_sky_report(sky: &ZodiacalSky) -> String {
    let mut out = format!("{RULE}\n");
    out.push_str(&format!("  {}\n", sky.date()));
    out.push_str(&format!("{RULE}\n"));
    out.push_str(&sky.to_string());
    out.push_str(&format!("{RULE}\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astral::planetary_hours;

    #[test]
    fn report_names_the_day_ruler() {
        let day = planetary_hours(
            "2024-10-30T06:00:00".parse().unwrap(),
            "2024-10-30T18:00:00".parse().unwrap(),
        )
        .unwrap();
        let report = planetary_day_report(&day);
        assert!(report.contains("Wednesday (Mercury)"));
        assert_eq!(report.matches('\n').count(), 24 + 6);
    }

    #[test]
    fn empty_day_reports_nothing_to_show() {
        let report = planetary_day_report(&PlanetaryDay::new());
        assert!(report.contains("No planetary hours"));
    }
}
