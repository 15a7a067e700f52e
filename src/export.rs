use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::filter::FilteredView;
use crate::data::model::LocationTable;

/// Column names, in [`ExportRow`] field order.
const HEADER: [&str; 11] = [
    "name",
    "chain",
    "walk_time",
    "longitude",
    "latitude",
    "revenue",
    "distance",
    "customers",
    "donuts_sold",
    "rating",
    "top_five",
];

/// One CSV line per row of a [`FilteredView`].
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    name: Option<&'a str>,
    chain: Option<&'a str>,
    walk_time: Option<&'a str>,
    longitude: Option<f64>,
    latitude: Option<f64>,
    revenue: Option<f64>,
    distance: Option<f64>,
    customers: Option<f64>,
    donuts_sold: Option<f64>,
    rating: Option<f64>,
    top_five: bool,
}

/// Write the view's rows to `path`.
pub fn export_csv(path: &Path, view: &FilteredView, table: &LocationTable) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(file, view, table).with_context(|| format!("writing {}", path.display()))
}

/// Serialize the view's rows; missing values become empty cells. The
/// header is always written, even when the view has no rows.
pub fn write_csv<W: Write>(writer: W, view: &FilteredView, table: &LocationTable) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(HEADER).context("writing CSV header")?;
    let mut written = 0;

    for &i in &view.rows {
        let Some(rec) = table.get(i) else {
            continue;
        };
        wtr.serialize(ExportRow {
            name: rec.name.as_deref(),
            chain: rec.chain.as_deref(),
            walk_time: rec.walk_time.as_deref(),
            longitude: rec.position.map(|p| p.lon),
            latitude: rec.position.map(|p| p.lat),
            revenue: rec.revenue,
            distance: rec.distance,
            customers: rec.customers,
            donuts_sold: rec.units_sold,
            rating: rec.rating,
            top_five: view.top_rows.contains(&i),
        })
        .with_context(|| format!("row {i}"))?;
        written += 1;
    }

    wtr.flush().context("flushing CSV")?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::compute;
    use crate::data::model::{LocationRecord, WalkTime, WalkTimeSelection};

    #[test]
    fn writes_selected_rows_with_header() {
        let table = LocationTable::new(vec![
            LocationRecord {
                name: Some("A".into()),
                walk_time: Some("5".into()),
                revenue: Some(100.0),
                ..LocationRecord::default()
            },
            LocationRecord {
                name: Some("B".into()),
                walk_time: Some("10".into()),
                revenue: None,
                ..LocationRecord::default()
            },
        ]);
        let view = compute(WalkTimeSelection::Within(WalkTime::Five), &table);

        let mut out = Vec::new();
        let written = write_csv(&mut out, &view, &table).unwrap();
        assert_eq!(written, 1);

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("name,chain,walk_time,longitude,latitude,revenue,distance,customers,donuts_sold,rating,top_five")
        );
        assert_eq!(lines.next(), Some("A,,5,,,100.0,,,,,true"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_view_still_writes_header() {
        let table = LocationTable::new(vec![LocationRecord {
            name: Some("A".into()),
            walk_time: Some("5".into()),
            revenue: Some(100.0),
            ..LocationRecord::default()
        }]);
        let view = compute(WalkTimeSelection::Within(WalkTime::Ten), &table);
        assert!(view.rows.is_empty());

        let mut out = Vec::new();
        let written = write_csv(&mut out, &view, &table).unwrap();
        assert_eq!(written, 0);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("{}\n", HEADER.join(",")));
    }
}
