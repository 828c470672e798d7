//! track-geotagger CLI
//!
//! Usage:
//!   track-geotagger <photos> [<tracks>] [--utc-offset +03:00 | --timezone Europe/Moscow]
//!
//! Reads every GPX file in the track folder (the photo folder when omitted),
//! writes the nearest track position into each photo taken while tracking and
//! renames the tagged photos.

use chrono::{FixedOffset, TimeDelta};
use chrono_tz::Tz;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use track_geotagger::time::parsing::parse_offset_string;
use track_geotagger::{Geotagger, TimeOffset};

#[derive(Parser)]
#[command(name = "track-geotagger")]
#[command(about = "Geotag photos from GPS track logs", long_about = None)]
struct Cli {
    /// Folder containing the photos to tag
    photo_dir: PathBuf,

    /// Folder containing GPX track logs (defaults to the photo folder)
    track_dir: Option<PathBuf>,

    /// Largest time difference between a photo and a track point that still matches
    #[arg(long, default_value = "15")]
    max_gap_minutes: u32,

    /// Fixed offset of the camera clock from UTC, e.g. "+03:00"
    #[arg(long, allow_hyphen_values = true, value_parser = parse_fixed_offset)]
    utc_offset: Option<FixedOffset>,

    /// IANA timezone of the camera clock, e.g. "Europe/Moscow"
    #[arg(long, conflicts_with = "utc_offset", value_parser = parse_timezone)]
    timezone: Option<Tz>,

    /// Horizontal positioning error in meters written with every position
    #[arg(long, default_value = "5")]
    positioning_error: u32,

    /// Suffix appended to the names of tagged photos
    #[arg(long, default_value = "_gps")]
    suffix: String,

    /// Report matches without writing or renaming anything
    #[arg(long)]
    dry_run: bool,

    /// Path to the exiftool executable (searched on PATH by default)
    #[arg(long)]
    exiftool: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose debug output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_fixed_offset(s: &str) -> Result<FixedOffset, String> {
    parse_offset_string(s)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| format!("invalid UTC offset '{s}', expected e.g. +03:00"))
}

fn parse_timezone(s: &str) -> Result<Tz, String> {
    Tz::from_str(s).map_err(|_| format!("unknown timezone '{s}'"))
}

impl Cli {
    fn time_offset(&self) -> TimeOffset {
        match (self.utc_offset, self.timezone) {
            (Some(offset), _) => TimeOffset::Fixed(offset),
            (None, Some(tz)) => TimeOffset::Zone(tz),
            (None, None) => TimeOffset::Auto,
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let track_dir = cli.track_dir.clone().unwrap_or_else(|| cli.photo_dir.clone());

    let mut geotagger = Geotagger::builder()
        .maybe_exiftool_path(cli.exiftool.clone())
        .max_gap(TimeDelta::minutes(i64::from(cli.max_gap_minutes)))
        .time_offset(cli.time_offset())
        .positioning_error_m(cli.positioning_error)
        .tagged_suffix(cli.suffix.clone())
        .dry_run(cli.dry_run)
        .build()?;

    let summary = geotagger.run(&cli.photo_dir, &track_dir)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
    }

    Ok(())
}
