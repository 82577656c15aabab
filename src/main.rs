//! Taskr - Main Entry Point
//!
//! Command-line front end for the `taskr` library: the interactive task
//! menu plus planetary-hours and sun-sign reports.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use taskr::astral::PositionedPlanet;
use taskr::menu::App;
use taskr::report::planetary_day_report;
use taskr::{Planet, Taskr, planetary_hours, which_sign};

/// Personal task list and planetary-hours toolkit
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory that holds (or will hold) the .taskr data directory
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive task menu (the default)
    Menu,
    /// Print the planetary hours for a day given sunrise and sunset
    Hours {
        /// Sunrise timestamp, e.g. 2024-10-30T06:12:00
        sunrise: NaiveDateTime,
        /// Sunset timestamp on the same day
        sunset: NaiveDateTime,
    },
    /// Print the sun's zodiacal position for a date
    Sign {
        /// Calendar date, e.g. 2024-10-30
        date: NaiveDate,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    TermLogger::init(
        args.log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    match args.command.unwrap_or(Command::Menu) {
        Command::Menu => App::standard(Taskr::new(&args.data_dir)).run()?,
        Command::Hours { sunrise, sunset } => {
            let day = planetary_hours(sunrise, sunset)?;
            print!("{}", planetary_day_report(&day));
        }
        Command::Sign { date } => {
            let sun = PositionedPlanet::new(Planet::Sun, which_sign(date)?);
            println!("{sun}");
        }
    }
    Ok(())
}
