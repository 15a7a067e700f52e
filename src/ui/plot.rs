use std::f64::consts::TAU;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon,
};

use crate::color::{isochrone_fill, isochrone_stroke};
use crate::data::format::{currency, optional, MISSING};
use crate::data::model::{LocationRecord, WalkTimeSelection};
use crate::state::AppState;

const LOCATIONS_SERIES: &str = "Coffee Locations";

/// Smallest and largest bubble radius in points.
const MIN_BUBBLE: f32 = 4.0;
const MAX_BUBBLE: f32 = 20.0;

// ---------------------------------------------------------------------------
// Map (central panel)
// ---------------------------------------------------------------------------

/// Isochrones for the selection, every location and the reference point.
pub fn map_plot(ui: &mut Ui, state: &AppState) {
    let data = &state.data;
    let overlapping = state.selection == WalkTimeSelection::All;

    Plot::new("map_plot")
        .legend(Legend::default())
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|name, value| {
            if name == LOCATIONS_SERIES {
                if let Some(rec) = nearest_location(data.locations.records(), value) {
                    return hover_text(rec);
                }
            }
            if name.is_empty() {
                format!("{:.5}, {:.5}", value.x, value.y)
            } else {
                name.to_string()
            }
        })
        .show(ui, |plot_ui| {
            for &walk_time in state.selection.visible_isochrones() {
                let Some(iso) = data.isochrone(walk_time) else {
                    continue;
                };
                for ring in &iso.rings {
                    let points: PlotPoints = ring.iter().map(|p| p.as_plot_point()).collect();
                    plot_ui.polygon(
                        Polygon::new(points)
                            .name(walk_time.to_string())
                            .fill_color(isochrone_fill(walk_time, overlapping))
                            .stroke(Stroke::new(2.0, isochrone_stroke(walk_time))),
                    );
                }
            }

            let locations: PlotPoints = data
                .locations
                .records()
                .iter()
                .filter_map(|r| r.position.map(|p| p.as_plot_point()))
                .collect();
            plot_ui.points(
                Points::new(locations)
                    .name(LOCATIONS_SERIES)
                    .shape(MarkerShape::Circle)
                    .radius(5.0)
                    .color(Color32::BLACK),
            );

            plot_ui.points(
                Points::new(vec![data.reference.position.as_plot_point()])
                    .name(&data.reference.name)
                    .shape(MarkerShape::Diamond)
                    .radius(9.0)
                    .color(Color32::YELLOW),
            );
        });
}

fn nearest_location<'a>(records: &'a [LocationRecord], at: &PlotPoint) -> Option<&'a LocationRecord> {
    records
        .iter()
        .filter_map(|r| {
            let p = r.position?;
            let d = (p.lon - at.x).powi(2) + (p.lat - at.y).powi(2);
            Some((d, r))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, r)| r)
}

/// Name, chain, revenue and rating of one location.
pub fn hover_text(rec: &LocationRecord) -> String {
    format!(
        "Name: {}\nChain: {}\nRevenue: {}\nRating: {}",
        rec.name.as_deref().unwrap_or(MISSING),
        rec.chain.as_deref().unwrap_or(MISSING),
        optional(rec.revenue, currency),
        optional(rec.rating, |r| format!("{r}")),
    )
}

// ---------------------------------------------------------------------------
// Revenue per shop (bar chart)
// ---------------------------------------------------------------------------

pub fn revenue_bar_chart(ui: &mut Ui, state: &AppState) {
    let ranking = &state.view.revenue_by_name;
    if ranking.is_empty() {
        empty_notice(ui, state);
        return;
    }

    let bars: Vec<Bar> = ranking
        .iter()
        .enumerate()
        .map(|(i, group)| {
            Bar::new(i as f64, group.total)
                .name(&group.key)
                .width(0.7)
        })
        .collect();

    ui.heading("Coffee Shop Revenue");
    Plot::new("revenue_bar_chart")
        .legend(Legend::default())
        .x_axis_label("Coffee Shops")
        .y_axis_label("Revenue ($)")
        .x_axis_formatter(|mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > f64::EPSILON || i < 0.0 {
                return String::new();
            }
            ranking
                .get(i as usize)
                .map(|g| g.key.clone())
                .unwrap_or_default()
        })
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name("Revenue ($)")
                    .color(Color32::from_rgb(99, 110, 250)),
            );
        });
}

// ---------------------------------------------------------------------------
// Market share (pie charts)
// ---------------------------------------------------------------------------

/// Location counts and revenue per chain, side by side.
pub fn market_share(ui: &mut Ui, state: &AppState) {
    let view = &state.view;
    if view.locations_by_chain.is_empty() {
        empty_notice(ui, state);
        return;
    }

    let by_count: Vec<(&str, f64)> = view
        .locations_by_chain
        .iter()
        .map(|g| (g.key.as_str(), g.count as f64))
        .collect();
    let by_revenue: Vec<(&str, f64)> = view
        .revenue_by_chain
        .iter()
        .map(|g| (g.key.as_str(), g.total))
        .collect();

    ui.columns(2, |cols| {
        cols[0].heading("Market Share by Location Counts");
        pie_chart(&mut cols[0], "pie_counts", &by_count, state);
        cols[1].heading("Market Share by Revenue");
        pie_chart(&mut cols[1], "pie_revenue", &by_revenue, state);
    });
}

/// Pie chart drawn as filled wedges around the origin.
fn pie_chart(ui: &mut Ui, id: &str, slices: &[(&str, f64)], state: &AppState) {
    let total: f64 = slices.iter().map(|(_, v)| v.max(0.0)).sum();
    if total <= 0.0 {
        ui.label("Nothing to show: every value is zero.");
        return;
    }

    Plot::new(id)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for &(key, value) in slices {
                let share = value.max(0.0) / total;
                if share == 0.0 {
                    continue;
                }
                let end = start + share * TAU;
                let color = state.chain_colors.color_for(key);
                let label = format!("{key} ({:.1}%)", share * 100.0);
                // Polygons only fill correctly when convex, so draw at most
                // a quarter turn per piece.
                let mut from = start;
                while from < end {
                    let to = (from + TAU / 4.0).min(end);
                    plot_ui.polygon(
                        Polygon::new(wedge(from, to))
                            .name(&label)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color)),
                    );
                    from = to;
                }
                start = end;
            }
        });
}

/// Unit-radius wedge from `start` to `end` radians, clockwise from 12 o'clock.
fn wedge(start: f64, end: f64) -> PlotPoints<'static> {
    let steps = ((end - start) / TAU * 128.0).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for s in 0..=steps {
        let angle = start + (end - start) * s as f64 / steps as f64;
        points.push([angle.sin(), angle.cos()]);
    }
    PlotPoints::new(points)
}

// ---------------------------------------------------------------------------
// Top 5 (bubble scatters)
// ---------------------------------------------------------------------------

/// Distance against revenue for the top-5 rows, sized by customers and by
/// donuts sold.
pub fn top_five(ui: &mut Ui, state: &AppState) {
    if state.view.top_rows.is_empty() {
        empty_notice(ui, state);
        return;
    }
    ui.columns(2, |cols| {
        cols[0].heading("Top 5 Coffee Chains by Revenue - Customer Counts");
        bubble_scatter(&mut cols[0], "bubble_customers", state, |r| r.customers);
        cols[1].heading("Top 5 Coffee Chains by Revenue - Donuts Sold");
        bubble_scatter(&mut cols[1], "bubble_donuts", state, |r| r.units_sold);
    });
}

fn bubble_scatter(
    ui: &mut Ui,
    id: &str,
    state: &AppState,
    size: impl Fn(&LocationRecord) -> Option<f64>,
) {
    let records: Vec<&LocationRecord> = state
        .view
        .top_rows
        .iter()
        .filter_map(|&i| state.data.locations.get(i))
        .collect();
    let max_size = records
        .iter()
        .filter_map(|r| size(r))
        .fold(0.0_f64, f64::max);

    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label("Distance")
        .y_axis_label("Revenue ($)")
        .show(ui, |plot_ui| {
            for rec in &records {
                let (Some(distance), Some(revenue), Some(name)) =
                    (rec.distance, rec.revenue, rec.name.as_deref())
                else {
                    continue;
                };
                let radius = bubble_radius(size(rec), max_size);
                plot_ui.points(
                    Points::new(vec![[distance, revenue]])
                        .name(name)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(radius)
                        .color(state.name_colors.color_for(name)),
                );
            }
        });
}

/// Bubble area proportional to `value` relative to the largest value.
fn bubble_radius(value: Option<f64>, max: f64) -> f32 {
    match value {
        Some(v) if max > 0.0 && v > 0.0 => {
            MIN_BUBBLE + (MAX_BUBBLE - MIN_BUBBLE) * (v / max).sqrt() as f32
        }
        _ => MIN_BUBBLE,
    }
}

fn empty_notice(ui: &mut Ui, state: &AppState) {
    let selection = state.view.selection;
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(format!("No coffee shops match {selection}"));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedge_starts_and_ends_on_the_circle() {
        let points = wedge(0.0, TAU / 4.0).points().to_vec();
        assert_eq!(points[0].x, 0.0);
        assert!((points[1].y - 1.0).abs() < 1e-9);
        let last = points[points.len() - 1];
        assert!((last.x - 1.0).abs() < 1e-9);
        assert!(last.y.abs() < 1e-9);
    }

    #[test]
    fn bubbles_scale_with_value() {
        assert_eq!(bubble_radius(None, 10.0), MIN_BUBBLE);
        assert_eq!(bubble_radius(Some(10.0), 10.0), MAX_BUBBLE);
        assert!(bubble_radius(Some(2.0), 10.0) < bubble_radius(Some(5.0), 10.0));
    }

    #[test]
    fn hover_text_marks_missing_fields() {
        let rec = LocationRecord {
            name: Some("Pilot".to_string()),
            revenue: Some(120.0),
            ..LocationRecord::default()
        };
        assert_eq!(
            hover_text(&rec),
            "Name: Pilot\nChain: N/A\nRevenue: $120\nRating: N/A"
        );
    }

    #[test]
    fn nearest_location_picks_closest() {
        use crate::data::model::Position;
        let records = vec![
            LocationRecord {
                name: Some("far".into()),
                position: Some(Position { lon: 10.0, lat: 10.0 }),
                ..LocationRecord::default()
            },
            LocationRecord {
                name: Some("near".into()),
                position: Some(Position { lon: 1.0, lat: 1.0 }),
                ..LocationRecord::default()
            },
            LocationRecord::default(),
        ];
        let found = nearest_location(&records, &PlotPoint::new(0.0, 0.0)).unwrap();
        assert_eq!(found.name.as_deref(), Some("near"));
    }
}
