/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  5/10/15min-walk.geojson   cafe-locations.geojson   arima-office.geojson
///              │                      │                        │
///              ▼                      ▼                        ▼
///        ┌──────────┐
///        │  loader   │  parse files → DashboardData (read-only)
///        └──────────┘
///              │
///              ▼
///        ┌──────────┐
///        │  filter   │  walk-time selection → FilteredView
///        └──────────┘
///              │
///              ▼
///        ┌──────────┐
///        │  format   │  summary → scorecard text
///        └──────────┘
/// ```

pub mod filter;
pub mod format;
pub mod loader;
pub mod model;
