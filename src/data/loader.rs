use std::path::{Path, PathBuf};

use geojson::{Feature, FeatureCollection, GeoJson, JsonValue};
use thiserror::Error;

use super::model::{
    DashboardData, Isochrone, LocationRecord, LocationTable, Position, ReferencePoint, WalkTime,
};
use crate::config::DataPaths;

/// Label used when the reference feature carries no `NAME`.
const DEFAULT_REFERENCE_NAME: &str = "Arima Office";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal problems with one of the input files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {} as GeoJSON", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: geojson::Error,
    },
    #[error("{} is not a GeoJSON FeatureCollection", path.display())]
    NotFeatureCollection { path: PathBuf },
    #[error("{} contains no Point feature for the reference location", path.display())]
    MissingReferencePoint { path: PathBuf },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load every input file named by `paths`. Any missing or unparsable file
/// is an error; individual bad shapes or values are not.
pub fn load_dashboard(paths: &DataPaths) -> Result<DashboardData, LoadError> {
    let mut isochrones = Vec::with_capacity(WalkTime::ALL.len());
    for walk_time in WalkTime::ALL {
        let path = paths.isochrone(walk_time);
        let collection = read_collection(path)?;
        let isochrone = isochrone_from_collection(walk_time, &collection);
        log::info!(
            "Loaded {} polygon(s) for the {} minute isochrone from {}",
            isochrone.rings.len(),
            walk_time.minutes(),
            path.display()
        );
        isochrones.push(isochrone);
    }

    let collection = read_collection(&paths.locations)?;
    let locations = table_from_collection(&collection);
    log::info!(
        "Loaded {} locations from {}",
        locations.len(),
        paths.locations.display()
    );

    let collection = read_collection(&paths.reference)?;
    let reference = reference_from_collection(&collection).ok_or_else(|| {
        LoadError::MissingReferencePoint {
            path: paths.reference.clone(),
        }
    })?;
    log::info!(
        "Reference point '{}' at ({}, {})",
        reference.name,
        reference.position.lon,
        reference.position.lat
    );

    Ok(DashboardData {
        isochrones,
        locations,
        reference,
    })
}

/// Read and parse a file that must hold a FeatureCollection.
pub fn read_collection(path: &Path) -> Result<FeatureCollection, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_collection(&text).map_err(|err| match err {
        ParseFailure::Syntax(source) => LoadError::Parse {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::WrongType => LoadError::NotFeatureCollection {
            path: path.to_path_buf(),
        },
    })
}

enum ParseFailure {
    Syntax(geojson::Error),
    WrongType,
}

fn parse_collection(text: &str) -> Result<FeatureCollection, ParseFailure> {
    match text.parse::<GeoJson>().map_err(ParseFailure::Syntax)? {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        _ => Err(ParseFailure::WrongType),
    }
}

// ---------------------------------------------------------------------------
// Isochrones
// ---------------------------------------------------------------------------

/// Collect the exterior ring of every polygon in the collection. Features
/// with no geometry, a non-polygon geometry or a degenerate ring are
/// skipped.
pub fn isochrone_from_collection(walk_time: WalkTime, collection: &FeatureCollection) -> Isochrone {
    let mut rings = Vec::new();

    for (i, feature) in collection.features.iter().enumerate() {
        let Some(geometry) = &feature.geometry else {
            log::warn!("{walk_time}: feature {i} has no geometry, skipping");
            continue;
        };
        let polygons: Vec<&geojson::PolygonType> = match &geometry.value {
            geojson::Value::Polygon(p) => vec![p],
            geojson::Value::MultiPolygon(mp) => mp.iter().collect(),
            other => {
                log::warn!(
                    "{walk_time}: feature {i} is a {}, not a polygon, skipping",
                    geometry_kind(other)
                );
                continue;
            }
        };

        for polygon in polygons {
            match polygon.first().and_then(|ring| ring_positions(ring)) {
                Some(ring) => rings.push(ring),
                None => log::warn!("{walk_time}: feature {i} has a malformed ring, skipping"),
            }
        }
    }

    Isochrone { walk_time, rings }
}

fn geometry_kind(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

/// A closed ring needs at least 3 coordinate pairs.
fn ring_positions(ring: &[geojson::Position]) -> Option<Vec<Position>> {
    if ring.len() < 3 {
        return None;
    }
    ring.iter().map(|coords| position_from_coords(coords)).collect()
}

fn position_from_coords(coords: &[f64]) -> Option<Position> {
    match coords {
        [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Some(Position {
            lon: *lon,
            lat: *lat,
        }),
        _ => None,
    }
}

fn point_position(feature: &Feature) -> Option<Position> {
    match &feature.geometry.as_ref()?.value {
        geojson::Value::Point(coords) => position_from_coords(coords),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// Flatten each feature's property bag into a [`LocationRecord`], keeping
/// source order.
pub fn table_from_collection(collection: &FeatureCollection) -> LocationTable {
    collection
        .features
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            let record = record_from_feature(feature);
            if record.position.is_none() {
                log::warn!("Location {i} has no usable point geometry; it will not be drawn");
            }
            record
        })
        .collect()
}

fn record_from_feature(feature: &Feature) -> LocationRecord {
    LocationRecord {
        name: feature.property("NAME").and_then(json_to_text),
        chain: feature.property("CHAIN_NAME").and_then(json_to_text),
        position: point_position(feature),
        revenue: numeric_property(feature, "REVENUE"),
        distance: numeric_property(feature, "DISTANCE"),
        customers: numeric_property(feature, "CUSTOMERS"),
        units_sold: numeric_property(feature, "DONUTS_SOLD"),
        rating: numeric_property(feature, "RATING"),
        walk_time: feature.property("WALKTIME").and_then(json_to_text),
    }
}

fn numeric_property(feature: &Feature, key: &str) -> Option<f64> {
    let value = feature.property(key)?;
    let coerced = coerce_numeric(value);
    if coerced.is_none() && !value.is_null() {
        log::debug!("Property {key}={value} is not numeric, treating as missing");
    }
    coerced
}

/// Read a JSON value as a number. Anything that is not a finite number or
/// a string holding one comes back as `None`.
pub fn coerce_numeric(value: &JsonValue) -> Option<f64> {
    let v = match value {
        JsonValue::Number(n) => n.as_f64()?,
        JsonValue::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

/// Read a JSON value as display text. Integral numbers drop their
/// fractional part so a `WALKTIME` of `5.0` compares equal to `"5"`.
fn json_to_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else {
                let f = n.as_f64()?;
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    Some(format!("{}", f as i64))
                } else {
                    Some(f.to_string())
                }
            }
        }
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}

// ---------------------------------------------------------------------------
// Reference point
// ---------------------------------------------------------------------------

/// The first Point feature of the collection.
pub fn reference_from_collection(collection: &FeatureCollection) -> Option<ReferencePoint> {
    collection.features.iter().find_map(|feature| {
        let position = point_position(feature)?;
        let name = feature
            .property("NAME")
            .and_then(json_to_text)
            .unwrap_or_else(|| DEFAULT_REFERENCE_NAME.to_string());
        Some(ReferencePoint { name, position })
    })
}
