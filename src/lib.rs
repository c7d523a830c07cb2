mod map;
mod planner;

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

pub use map::{parse_map, read_map, MapBuilder};
pub use planner::{Cost, Location, Route, RoutePlanner};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Location({0}) is not on the map.")]
    LocationNotFound(String),
    #[error("Location({0}) is given more than once.")]
    DuplicateLocation(String),
    #[error("Can't connect location({0}) to itself.")]
    SelfConnection(String),
    #[error("There's no route from {origin} to {destination}.")]
    Unreachable { origin: String, destination: String },
    #[error("Invalid location name({0:?}), expect a non-empty name without whitespace, not starting with #.")]
    InvalidLocationName(String),
    #[error("Invalid text({0}) for locations, expect \"locations: <name>, <name>, ...\".")]
    InvalidLocationsText(String),
    #[error("Invalid text({0}) for a connection, expect \"<from> to <to> = <cost>\".")]
    InvalidConnectionText(String),
    #[error("No locations given in map.")]
    NoLocations,
    #[error("Invalid line {line} in map.")]
    InvalidMapLine { line: usize, source: Box<Error> },
}

/// Finds the cheapest route between two locations on a travel map.
///
/// The map's connections are listed first, one line per location. A location's
/// zero cost to itself isn't a connection and is left out of that listing.
#[derive(Debug, Parser)]
pub struct CLIArgs {
    /// Travel map file, the built-in demo map is used if not given.
    #[arg(short, long)]
    pub map: Option<PathBuf>,
    pub origin: Option<String>,
    pub destination: Option<String>,
}

/// Builds the six city demo map.
pub fn demo_map() -> RoutePlanner {
    const LOCATIONS: [&str; 6] = ["Boston", "Seattle", "Denver", "Miami", "Dallas", "Atlanta"];
    const CONNECTIONS: [(&str, &str, Cost); 9] = [
        ("Boston", "Denver", 1950),
        ("Boston", "Miami", 1250),
        ("Seattle", "Denver", 1300),
        ("Seattle", "Dallas", 2100),
        ("Denver", "Miami", 1720),
        ("Denver", "Atlanta", 1400),
        ("Miami", "Dallas", 1100),
        ("Dallas", "Atlanta", 780),
        ("Seattle", "Boston", 2480),
    ];

    let mut planner = RoutePlanner::new(LOCATIONS).expect("demo map locations are unique");
    for (from, to, cost) in CONNECTIONS {
        planner
            .connect(from, to, cost)
            .expect("demo map connects known locations");
    }

    planner
}
