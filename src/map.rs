use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Cost, Error, RoutePlanner};

/// Builds a [`RoutePlanner`] from travel map text, one line at a time.
///
/// The first meaningful line names every location, e.g.
/// `locations: Boston, Seattle, Denver`, and each line after it connects two of
/// them, e.g. `Boston to Denver = 1950`. Blank lines and lines starting with
/// `#` are skipped, so location names can't start with `#`.
#[derive(Debug, Default)]
pub struct MapBuilder {
    planner: Option<RoutePlanner>,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_line(&mut self, text: &str) -> Result<(), Error> {
        static LOCATIONS_PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^\s*locations\s*:(.*)$").unwrap());
        static CONNECTION_PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^\s*(\S+)\s+to\s+(\S+)\s*=\s*(\d+)\s*$").unwrap());

        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(());
        }

        match self.planner.as_mut() {
            None => {
                let caps = LOCATIONS_PATTERN
                    .captures(text)
                    .ok_or_else(|| Error::InvalidLocationsText(text.to_string()))?;
                let names = caps[1].split(',').map(str::trim).collect::<Vec<_>>();
                if let Some(name) = names
                    .iter()
                    .find(|name| {
                        // Lines starting with '#' are comments, such a name could never be connected.
                        name.is_empty()
                            || name.starts_with('#')
                            || name.contains(char::is_whitespace)
                    })
                {
                    return Err(Error::InvalidLocationName(name.to_string()));
                }

                self.planner = Some(RoutePlanner::new(names)?);
            }
            Some(planner) => {
                let caps = CONNECTION_PATTERN
                    .captures(text)
                    .ok_or_else(|| Error::InvalidConnectionText(text.to_string()))?;
                let cost = caps[3]
                    .parse::<Cost>()
                    .map_err(|_| Error::InvalidConnectionText(text.to_string()))?;
                planner.connect(&caps[1], &caps[2], cost)?;
            }
        }

        Ok(())
    }

    pub fn build(self) -> Result<RoutePlanner, Error> {
        self.planner.ok_or(Error::NoLocations)
    }
}

pub fn parse_map(text: &str) -> Result<RoutePlanner, Error> {
    let mut builder = MapBuilder::new();
    for (ind, line) in text.lines().enumerate() {
        builder
            .add_line(line)
            .map_err(|e| Error::InvalidMapLine {
                line: ind + 1,
                source: Box::new(e),
            })?;
    }

    builder.build()
}

pub fn read_map<P: AsRef<Path>>(path: P) -> Result<RoutePlanner> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut builder = MapBuilder::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!(
                "Failed to read line {} in given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
        builder.add_line(line.as_str()).with_context(|| {
            format!(
                "Invalid line {} in given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_MAP: &str = "\
# three towns
locations: Ayr, Bute, Crail

Ayr to Bute = 12
Bute to Crail = 5
Ayr to Crail = 20
";

    #[test]
    fn parse_small_map() {
        let planner = parse_map(SMALL_MAP).unwrap();
        assert_eq!(
            planner
                .locations()
                .iter()
                .map(|loc| loc.name())
                .collect::<Vec<_>>(),
            ["Ayr", "Bute", "Crail"]
        );
        assert_eq!(planner.cost("Crail", "Bute"), Ok(Some(5)));
        let route = planner.shortest_path("Ayr", "Crail").unwrap();
        assert_eq!(route.cost(), 17);
    }

    #[test]
    fn later_connection_overwrites() {
        let planner = parse_map("locations: A, B\nA to B = 9\nB to A = 4\n").unwrap();
        assert_eq!(planner.cost("A", "B"), Ok(Some(4)));
    }

    #[test]
    fn locations_line_must_come_first() {
        assert_eq!(
            parse_map("A to B = 3\n").unwrap_err(),
            Error::InvalidMapLine {
                line: 1,
                source: Box::new(Error::InvalidLocationsText("A to B = 3".to_string())),
            }
        );
        assert_eq!(
            parse_map("# nothing here\n\n").unwrap_err(),
            Error::NoLocations
        );
    }

    #[test]
    fn bad_location_names() {
        assert_eq!(
            parse_map("locations: A, , B").unwrap_err(),
            Error::InvalidMapLine {
                line: 1,
                source: Box::new(Error::InvalidLocationName(String::new())),
            }
        );
        assert_eq!(
            parse_map("locations: New York, Boston").unwrap_err(),
            Error::InvalidMapLine {
                line: 1,
                source: Box::new(Error::InvalidLocationName("New York".to_string())),
            }
        );
        assert_eq!(
            parse_map("locations: A, B, A").unwrap_err(),
            Error::InvalidMapLine {
                line: 1,
                source: Box::new(Error::DuplicateLocation("A".to_string())),
            }
        );
    }

    #[test]
    fn location_names_can_not_look_like_comments() {
        assert_eq!(
            parse_map("locations: #1, B
#1 to B = 5
").unwrap_err(),
            Error::InvalidMapLine {
                line: 1,
                source: Box::new(Error::InvalidLocationName("#1".to_string())),
            }
        );
        let planner = parse_map("locations: A#1, B
A#1 to B = 5
").unwrap();
        assert_eq!(planner.cost("A#1", "B"), Ok(Some(5)));
    }

    #[test]
    fn bad_connection_lines() {
        let unknown = parse_map("locations: A, B\n\nA to C = 1\n").unwrap_err();
        assert_eq!(
            unknown,
            Error::InvalidMapLine {
                line: 3,
                source: Box::new(Error::LocationNotFound("C".to_string())),
            }
        );
        assert_eq!(unknown.to_string(), "Invalid line 3 in map.");
        assert_eq!(
            std::error::Error::source(&unknown).map(|e| e.to_string()),
            Some("Location(C) is not on the map.".to_string())
        );

        assert!(matches!(
            parse_map("locations: A, B\nA to B = -1\n"),
            Err(Error::InvalidMapLine { line: 2, .. })
        ));
        assert!(matches!(
            parse_map("locations: A, B\nA to B = 99999999999\n"),
            Err(Error::InvalidMapLine { line: 2, .. })
        ));
        assert!(matches!(
            parse_map("locations: A, B\nA - B: 1\n"),
            Err(Error::InvalidMapLine { line: 2, .. })
        ));
        assert_eq!(
            parse_map("locations: A, B\nA to A = 1\n").unwrap_err(),
            Error::InvalidMapLine {
                line: 2,
                source: Box::new(Error::SelfConnection("A".to_string())),
            }
        );
    }

    #[test]
    fn read_missing_file() {
        let err = read_map("no_such_map.txt").unwrap_err();
        assert!(err.to_string().contains("no_such_map.txt"));
    }
}
