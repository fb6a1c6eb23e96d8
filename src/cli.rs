//! Command-line interface
//!
//! ```bash
//! # Centers nearest to the device position
//! ebaguio centers --at 16.4,120.59
//!
//! # Closest center that is not critically full
//! ebaguio nearest --at 16.4,120.59 --radius 5
//!
//! # Maps link for a center
//! ebaguio directions 3 --at 16.4,120.59 --platform android
//!
//! # JSON API for the mobile app
//! ebaguio serve --port 8080
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::api::ApiState;
use crate::config::AppConfig;
use crate::evacuation::{
    CenterDirectory, DirectionsRequest, MapsPlatform, ProximitySearch, UNKNOWN_DISTANCE,
};
use crate::models::GeoPoint;
use crate::web;

/// E-Baguio-ate evacuation center finder
#[derive(Parser, Debug)]
#[command(name = "ebaguio")]
#[command(author, version, about = "Evacuation center proximity, capacity and directions")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List evacuation centers, nearest first when a position is given
    Centers {
        /// Device position as LAT,LON
        #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
        at: Option<GeoPoint>,

        /// Only show centers within this many kilometers
        #[arg(long, value_parser = parse_radius, allow_hyphen_values = true)]
        radius: Option<f64>,

        /// Maximum number of centers to show
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Closest center within the search radius that is not critically full
    Nearest {
        #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
        at: GeoPoint,

        /// Search radius in kilometers (defaults to the configured radius)
        #[arg(long, value_parser = parse_radius, allow_hyphen_values = true)]
        radius: Option<f64>,
    },

    /// Show one center
    Show {
        id: u32,

        #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
        at: Option<GeoPoint>,
    },

    /// Print maps links for directions to a center
    Directions {
        id: u32,

        #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
        at: Option<GeoPoint>,

        /// Maps application to target (defaults to the configured platform)
        #[arg(long, value_enum)]
        platform: Option<MapsPlatform>,
    },

    /// Serve the JSON API
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(long)]
        port: Option<u16>,
    },
}

fn parse_radius(value: &str) -> Result<f64, String> {
    let radius: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(format!("radius must be a positive number of kilometers, got {value}"));
    }
    Ok(radius)
}

fn find_center(
    directory: &dyn CenterDirectory,
    id: u32,
) -> Result<crate::models::EvacuationCenter> {
    directory
        .find(id)
        .ok_or_else(|| anyhow!("No evacuation center with id {id}"))
}

/// Execute a parsed command against the loaded configuration
pub async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let directory = config.open_directory()?;
    debug!("Running {:?}", cli.command);

    match cli.command {
        Commands::Centers { at, radius, limit } => {
            let mut assessments = ProximitySearch::assess_all(directory.as_ref(), at.as_ref())?;
            if let Some(radius) = radius {
                assessments = ProximitySearch::within_radius(assessments, radius);
            }
            assessments.truncate(limit.unwrap_or(config.search.max_results as usize));

            match at {
                Some(origin) => println!(
                    "Found {} evacuation centers near {}:",
                    assessments.len(),
                    origin
                ),
                None => println!(
                    "Showing {} evacuation centers ({}):",
                    assessments.len(),
                    UNKNOWN_DISTANCE
                ),
            }
            for assessment in &assessments {
                println!("\n{assessment}");
            }
        }
        Commands::Nearest { at, radius } => {
            let radius = radius.unwrap_or(config.search.radius_km);
            let assessments = ProximitySearch::within_radius(
                ProximitySearch::assess_all(directory.as_ref(), Some(&at))?,
                radius,
            );

            match ProximitySearch::nearest_available(&assessments) {
                Some(best) => {
                    println!("Nearest available evacuation center:\n\n{best}");
                    let request = DirectionsRequest::for_center(&best.center, Some(at))?;
                    println!("\n   🗺️ {}", request.uri(config.maps.platform));
                }
                None => println!("No available evacuation center within {radius} km of {at}"),
            }
        }
        Commands::Show { id, at } => {
            let center = find_center(directory.as_ref(), id)?;
            let assessment = ProximitySearch::assess(&center, at.as_ref())?;
            println!("{assessment}");
        }
        Commands::Directions { id, at, platform } => {
            let center = find_center(directory.as_ref(), id)?;
            let request = DirectionsRequest::for_center(&center, at)
                .with_context(|| format!("Cannot route to {}", center.name))?;
            let platform = platform.unwrap_or(config.maps.platform);

            println!("Directions to {} ({platform}):", center.name);
            println!("   {}", request.uri(platform));
            println!("   Map: {}", request.map_link());
            match request.distance() {
                Some(distance) => println!("   Distance: {}", distance.display),
                None => println!("   Distance: {UNKNOWN_DISTANCE}"),
            }
        }
        Commands::Serve { port } => {
            let mut server = config.server.clone();
            if let Some(port) = port {
                server.port = port;
            }
            let state = ApiState {
                directory,
                search: config.search.clone(),
                platform: config.maps.platform,
            };
            web::run(&server, state).await?;
        }
    }

    Ok(())
}
