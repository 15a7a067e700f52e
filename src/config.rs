use std::path::{Path, PathBuf};

use clap::Parser;

use crate::data::model::{WalkTime, WalkTimeSelection};

/// Command-line options for the dashboard.
#[derive(Debug, Parser)]
#[command(name = "cafe-walk", about = "Coffee shops within walking distance")]
pub struct Cli {
    /// Directory holding the isochrone, location and reference GeoJSON files
    #[arg(long, env = "CAFE_WALK_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Walk time selected at startup: all, 5, 10 or 15
    #[arg(long, default_value = "all", value_parser = parse_selection)]
    pub walk_time: WalkTimeSelection,
}

fn parse_selection(value: &str) -> Result<WalkTimeSelection, String> {
    WalkTimeSelection::parse(value)
        .ok_or_else(|| format!("'{value}' is not one of all, 5, 10, 15"))
}

impl Cli {
    pub fn data_paths(&self) -> DataPaths {
        DataPaths::in_dir(&self.data_dir)
    }
}

// ---------------------------------------------------------------------------
// DataPaths – the fixed set of input files
// ---------------------------------------------------------------------------

pub const ISOCHRONE_5_FILE: &str = "5min-walk.geojson";
pub const ISOCHRONE_10_FILE: &str = "10min-walk.geojson";
pub const ISOCHRONE_15_FILE: &str = "15min-walk.geojson";
pub const LOCATIONS_FILE: &str = "cafe-locations.geojson";
pub const REFERENCE_FILE: &str = "arima-office.geojson";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub dir: PathBuf,
    pub isochrone_5: PathBuf,
    pub isochrone_10: PathBuf,
    pub isochrone_15: PathBuf,
    pub locations: PathBuf,
    pub reference: PathBuf,
}

impl DataPaths {
    /// Standard file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            isochrone_5: dir.join(ISOCHRONE_5_FILE),
            isochrone_10: dir.join(ISOCHRONE_10_FILE),
            isochrone_15: dir.join(ISOCHRONE_15_FILE),
            locations: dir.join(LOCATIONS_FILE),
            reference: dir.join(REFERENCE_FILE),
        }
    }

    pub fn isochrone(&self, walk_time: WalkTime) -> &Path {
        match walk_time {
            WalkTime::Five => &self.isochrone_5,
            WalkTime::Ten => &self.isochrone_10,
            WalkTime::Fifteen => &self.isochrone_15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_live_in_data_dir() {
        let paths = DataPaths::in_dir(Path::new("some/dir"));
        assert_eq!(paths.locations, Path::new("some/dir/cafe-locations.geojson"));
        assert_eq!(
            paths.isochrone(WalkTime::Ten),
            Path::new("some/dir/10min-walk.geojson")
        );
    }

    #[test]
    fn data_dir_defaults_to_data() {
        let cli = Cli::try_parse_from(["cafe-walk"]).unwrap();
        if std::env::var_os("CAFE_WALK_DATA_DIR").is_none() {
            assert_eq!(cli.data_dir, PathBuf::from("data"));
        }
        assert_eq!(cli.walk_time, WalkTimeSelection::All);
        let cli = Cli::try_parse_from(["cafe-walk", "--data-dir", "elsewhere"]).unwrap();
        assert_eq!(cli.data_paths().dir, PathBuf::from("elsewhere"));
    }

    #[test]
    fn walk_time_flag_parses_buckets() {
        let cli = Cli::try_parse_from(["cafe-walk", "--walk-time", "15"]).unwrap();
        assert_eq!(cli.walk_time, WalkTimeSelection::Within(WalkTime::Fifteen));
        assert!(Cli::try_parse_from(["cafe-walk", "--walk-time", "20"]).is_err());
    }
}
