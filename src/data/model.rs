use std::fmt;

// ---------------------------------------------------------------------------
// WalkTime – one isochrone bucket
// ---------------------------------------------------------------------------

/// A walk-time bucket. Buckets are nested: the 15 minute isochrone
/// encloses the 10 minute one, which encloses the 5 minute one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WalkTime {
    Five,
    Ten,
    Fifteen,
}

impl WalkTime {
    pub const ALL: [WalkTime; 3] = [WalkTime::Five, WalkTime::Ten, WalkTime::Fifteen];

    /// Bucket label as stored in the `WALKTIME` property.
    pub fn label(self) -> &'static str {
        match self {
            WalkTime::Five => "5",
            WalkTime::Ten => "10",
            WalkTime::Fifteen => "15",
        }
    }

    pub fn minutes(self) -> u32 {
        match self {
            WalkTime::Five => 5,
            WalkTime::Ten => 10,
            WalkTime::Fifteen => 15,
        }
    }
}

impl fmt::Display for WalkTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min. Walk Time", self.minutes())
    }
}

// ---------------------------------------------------------------------------
// WalkTimeSelection – the dropdown value
// ---------------------------------------------------------------------------

/// What the user picked in the walk-time dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WalkTimeSelection {
    #[default]
    All,
    Within(WalkTime),
}

impl WalkTimeSelection {
    /// Every option in dropdown order.
    pub const OPTIONS: [WalkTimeSelection; 4] = [
        WalkTimeSelection::All,
        WalkTimeSelection::Within(WalkTime::Five),
        WalkTimeSelection::Within(WalkTime::Ten),
        WalkTimeSelection::Within(WalkTime::Fifteen),
    ];

    /// Parse the external selection value (`all`, `5`, `10`, `15`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "all" | "ALL" => Some(WalkTimeSelection::All),
            "5" => Some(WalkTimeSelection::Within(WalkTime::Five)),
            "10" => Some(WalkTimeSelection::Within(WalkTime::Ten)),
            "15" => Some(WalkTimeSelection::Within(WalkTime::Fifteen)),
            _ => None,
        }
    }

    /// Machine value, the inverse of [`WalkTimeSelection::parse`].
    pub fn value(self) -> &'static str {
        match self {
            WalkTimeSelection::All => "all",
            WalkTimeSelection::Within(w) => w.label(),
        }
    }

    /// Label shown in the dropdown.
    pub fn display_label(self) -> &'static str {
        match self {
            WalkTimeSelection::All => "ALL",
            WalkTimeSelection::Within(WalkTime::Five) => "UNDER 5 MINS.",
            WalkTimeSelection::Within(WalkTime::Ten) => "UNDER 10 MINS.",
            WalkTimeSelection::Within(WalkTime::Fifteen) => "UNDER 15 MINS.",
        }
    }

    /// Bucket labels a row may carry to be part of this selection.
    /// `None` means every row matches.
    ///
    /// 5 and 10 match their own bucket exactly, while 15 is cumulative
    /// (anything inside the outermost isochrone).
    pub fn matching_labels(self) -> Option<&'static [&'static str]> {
        match self {
            WalkTimeSelection::All => None,
            WalkTimeSelection::Within(WalkTime::Five) => Some(&["5"]),
            WalkTimeSelection::Within(WalkTime::Ten) => Some(&["10"]),
            WalkTimeSelection::Within(WalkTime::Fifteen) => Some(&["5", "10", "15"]),
        }
    }

    /// Isochrones drawn on the map for this selection.
    pub fn visible_isochrones(self) -> &'static [WalkTime] {
        match self {
            WalkTimeSelection::All => &WalkTime::ALL,
            WalkTimeSelection::Within(WalkTime::Five) => &[WalkTime::Five],
            WalkTimeSelection::Within(WalkTime::Ten) => &[WalkTime::Ten],
            WalkTimeSelection::Within(WalkTime::Fifteen) => &[WalkTime::Fifteen],
        }
    }
}

impl fmt::Display for WalkTimeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_label())
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Longitude / latitude pair in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub lon: f64,
    pub lat: f64,
}

impl Position {
    pub fn as_plot_point(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

/// Boundary polygon(s) for one walk-time bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct Isochrone {
    pub walk_time: WalkTime,
    /// Exterior rings, one per polygon found in the source collection.
    pub rings: Vec<Vec<Position>>,
}

/// The fixed location walk times are measured from.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePoint {
    pub name: String,
    pub position: Position,
}

// ---------------------------------------------------------------------------
// LocationRecord – one point of interest
// ---------------------------------------------------------------------------

/// A single coffee shop. Numeric attributes are `None` when the source
/// value was absent or could not be read as a number.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationRecord {
    pub name: Option<String>,
    pub chain: Option<String>,
    /// `None` when the feature had no usable point geometry.
    pub position: Option<Position>,
    pub revenue: Option<f64>,
    /// Distance to the reference point in metres.
    pub distance: Option<f64>,
    pub customers: Option<f64>,
    pub units_sold: Option<f64>,
    /// 0–5 star rating.
    pub rating: Option<f64>,
    /// Walk-time bucket label (`"5"`, `"10"`, `"15"`), kept as text.
    pub walk_time: Option<String>,
}

impl LocationRecord {
    pub fn in_bucket(&self, labels: &[&str]) -> bool {
        self.walk_time
            .as_deref()
            .is_some_and(|w| labels.contains(&w))
    }
}

// ---------------------------------------------------------------------------
// LocationTable – all records in source order
// ---------------------------------------------------------------------------

/// All loaded locations, in source order. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationTable {
    records: Vec<LocationRecord>,
}

impl LocationTable {
    pub fn new(records: Vec<LocationRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&LocationRecord> {
        self.records.get(index)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<LocationRecord> for LocationTable {
    fn from_iter<I: IntoIterator<Item = LocationRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// DashboardData – everything the loader produces
// ---------------------------------------------------------------------------

/// Read-only context handed to the engine and the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    /// One isochrone per bucket, in [`WalkTime::ALL`] order.
    pub isochrones: Vec<Isochrone>,
    pub locations: LocationTable,
    pub reference: ReferencePoint,
}

impl DashboardData {
    pub fn isochrone(&self, walk_time: WalkTime) -> Option<&Isochrone> {
        self.isochrones.iter().find(|iso| iso.walk_time == walk_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_dropdown_value() {
        for option in WalkTimeSelection::OPTIONS {
            assert_eq!(WalkTimeSelection::parse(option.value()), Some(option));
        }
        assert_eq!(WalkTimeSelection::parse("20"), None);
    }

    #[test]
    fn fifteen_is_cumulative_but_ten_is_exact() {
        let fifteen = WalkTimeSelection::Within(WalkTime::Fifteen);
        let ten = WalkTimeSelection::Within(WalkTime::Ten);
        assert_eq!(fifteen.matching_labels(), Some(&["5", "10", "15"][..]));
        assert_eq!(ten.matching_labels(), Some(&["10"][..]));
        assert_eq!(WalkTimeSelection::All.matching_labels(), None);
    }

    #[test]
    fn record_without_bucket_matches_no_bucket() {
        let rec = LocationRecord::default();
        assert!(!rec.in_bucket(&["5", "10", "15"]));
    }

    #[test]
    fn all_shows_every_isochrone_and_buckets_show_their_own() {
        assert_eq!(WalkTimeSelection::All.visible_isochrones(), &WalkTime::ALL[..]);
        for walk_time in WalkTime::ALL {
            assert_eq!(
                WalkTimeSelection::Within(walk_time).visible_isochrones(),
                &[walk_time][..]
            );
        }
    }

    #[test]
    fn default_selection_is_all() {
        assert_eq!(WalkTimeSelection::default(), WalkTimeSelection::All);
    }
}
