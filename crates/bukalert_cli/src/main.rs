//! CLI smoke entry point.
//!
//! Prints the core version and the team directory. With a coordinate,
//! teams are listed nearest first with their distance. With `--config`,
//! logging and the bookmark database are bootstrapped from the file first.

use bukalert_core::{format_km, Coordinate, CoreConfig, StaticTeamDirectory, TeamDirectory};
use clap::Parser;
use log::info;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bukalert_cli")]
#[command(version, about = "List Bukidnon emergency teams", long_about = None)]
struct Cli {
    /// JSON core config (db_path, log_level, log_dir).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Latitude of the reference point in decimal degrees.
    #[arg(
        value_parser = parse_latitude,
        requires = "longitude",
        allow_negative_numbers = true
    )]
    latitude: Option<f64>,

    /// Longitude of the reference point in decimal degrees.
    #[arg(
        value_parser = parse_longitude,
        requires = "latitude",
        allow_negative_numbers = true
    )]
    longitude: Option<f64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    println!("bukalert_core version={}", bukalert_core::core_version());

    if let Some(path) = &cli.config {
        bootstrap(&CoreConfig::load(path)?)?;
    }

    let directory = StaticTeamDirectory::bukidnon();
    match cli.latitude.zip(cli.longitude) {
        Some((latitude, longitude)) => {
            let from = Coordinate::new(latitude, longitude);
            for (team, distance) in directory.teams_by_distance(from) {
                println!("{} km\t{}\t{}", format_km(distance), team.name, team.hotline);
            }
        }
        None => {
            for team in directory.teams() {
                println!(
                    "{}\t{}\t{}\t{}",
                    team.id,
                    team.kind.display_name(),
                    team.name,
                    team.hotline
                );
            }
        }
    }
    Ok(())
}

fn bootstrap(config: &CoreConfig) -> Result<(), Box<dyn Error>> {
    let logging = config.init_logging()?;
    config.open_db()?;
    info!("event=cli_bootstrap module=cli status=ok file_logging={logging}");
    println!("bookmark_db=ok file_logging={logging}");
    Ok(())
}

fn parse_latitude(value: &str) -> Result<f64, String> {
    parse_degrees(value, 90.0)
}

fn parse_longitude(value: &str) -> Result<f64, String> {
    parse_degrees(value, 180.0)
}

fn parse_degrees(value: &str, limit: f64) -> Result<f64, String> {
    let degrees: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if !degrees.is_finite() || degrees.abs() > limit {
        return Err(format!("`{value}` is outside [-{limit}, {limit}]"));
    }
    Ok(degrees)
}
