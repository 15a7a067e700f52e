use std::collections::{HashMap, HashSet};

use super::model::{LocationRecord, LocationTable, WalkTimeSelection};

/// How many name groups make up the "top" subset.
pub const TOP_N: usize = 5;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Scalar summaries of a filtered subset. Means are `None` when no row in
/// the subset has a value for the field (including the empty subset).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub count: usize,
    pub total_revenue: f64,
    pub total_customers: f64,
    pub total_units_sold: f64,
    pub mean_distance: Option<f64>,
    pub mean_rating: Option<f64>,
}

/// Revenue summed over all rows sharing a key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    pub key: String,
    pub total: f64,
}

/// Number of rows sharing a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

/// Everything derived from one walk-time selection. Rebuilt from scratch
/// on each selection; rows are indices into the [`LocationTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    pub selection: WalkTimeSelection,
    /// Matching rows in table order.
    pub rows: Vec<usize>,
    pub summary: Summary,
    /// Revenue per name, descending.
    pub revenue_by_name: Vec<GroupTotal>,
    /// Revenue per chain, descending.
    pub revenue_by_chain: Vec<GroupTotal>,
    /// Row count per chain, descending.
    pub locations_by_chain: Vec<GroupCount>,
    /// Names of the [`TOP_N`] highest-revenue name groups, best first.
    pub top_names: Vec<String>,
    /// Every row belonging to one of `top_names`, in table order.
    pub top_rows: Vec<usize>,
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Return indices of records that belong to `selection`.
///
/// * `All` keeps everything, including rows without a bucket.
/// * 5 and 10 keep rows whose bucket is exactly that label.
/// * 15 keeps rows in any of the 5, 10 or 15 buckets.
pub fn filtered_indices(table: &LocationTable, selection: WalkTimeSelection) -> Vec<usize> {
    let labels = selection.matching_labels();
    table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| labels.map_or(true, |labels| rec.in_bucket(labels)))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Filter `table` by `selection` and compute every derived figure.
/// Pure: identical inputs always give identical output.
pub fn compute(selection: WalkTimeSelection, table: &LocationTable) -> FilteredView {
    let rows = filtered_indices(table, selection);
    let records: Vec<&LocationRecord> = rows
        .iter()
        .filter_map(|&i| table.get(i))
        .collect();

    let summary = summarize(&records);
    let revenue_by_name = revenue_by(&records, |r| r.name.as_deref());
    let revenue_by_chain = revenue_by(&records, |r| r.chain.as_deref());
    let locations_by_chain = count_by(&records, |r| r.chain.as_deref());

    let top_names: Vec<String> = revenue_by_name
        .iter()
        .take(TOP_N)
        .map(|g| g.key.clone())
        .collect();
    let top_set: HashSet<&str> = top_names.iter().map(String::as_str).collect();
    let top_rows = rows
        .iter()
        .copied()
        .filter(|&i| {
            table
                .get(i)
                .and_then(|r| r.name.as_deref())
                .is_some_and(|name| top_set.contains(name))
        })
        .collect();

    FilteredView {
        selection,
        rows,
        summary,
        revenue_by_name,
        revenue_by_chain,
        locations_by_chain,
        top_names,
        top_rows,
    }
}

pub fn summarize(records: &[&LocationRecord]) -> Summary {
    Summary {
        count: records.len(),
        total_revenue: sum_present(records.iter().map(|r| r.revenue)),
        total_customers: sum_present(records.iter().map(|r| r.customers)),
        total_units_sold: sum_present(records.iter().map(|r| r.units_sold)),
        mean_distance: mean_present(records.iter().map(|r| r.distance)),
        mean_rating: mean_present(records.iter().map(|r| r.rating)),
    }
}

/// Sum ignoring missing values; an empty or all-missing input sums to 0.
fn sum_present(values: impl Iterator<Item = Option<f64>>) -> f64 {
    values.flatten().fold(0.0, |acc, v| acc + v)
}

/// Mean over present values only.
fn mean_present(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, n) = values
        .flatten()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Sum revenue per key, then sort descending. Groups start in order of
/// first appearance and the sort is stable, so ties keep that order.
/// Rows with no key are left out; rows with no revenue add 0.
fn revenue_by<'a>(
    records: &[&'a LocationRecord],
    key: impl Fn(&'a LocationRecord) -> Option<&'a str>,
) -> Vec<GroupTotal> {
    let mut groups: Vec<GroupTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for &rec in records {
        let Some(k) = key(rec) else {
            continue;
        };
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push(GroupTotal {
                key: k.to_string(),
                total: 0.0,
            });
            groups.len() - 1
        });
        groups[slot].total += rec.revenue.unwrap_or(0.0);
    }

    groups.sort_by(|a, b| b.total.total_cmp(&a.total));
    groups
}

fn count_by<'a>(
    records: &[&'a LocationRecord],
    key: impl Fn(&'a LocationRecord) -> Option<&'a str>,
) -> Vec<GroupCount> {
    let mut groups: Vec<GroupCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for &rec in records {
        let Some(k) = key(rec) else {
            continue;
        };
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push(GroupCount {
                key: k.to_string(),
                count: 0,
            });
            groups.len() - 1
        });
        groups[slot].count += 1;
    }

    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::WalkTime;

    const FIVE: WalkTimeSelection = WalkTimeSelection::Within(WalkTime::Five);
    const TEN: WalkTimeSelection = WalkTimeSelection::Within(WalkTime::Ten);
    const FIFTEEN: WalkTimeSelection = WalkTimeSelection::Within(WalkTime::Fifteen);

    fn shop(name: &str, chain: &str, bucket: &str, revenue: Option<f64>) -> LocationRecord {
        LocationRecord {
            name: Some(name.to_string()),
            chain: Some(chain.to_string()),
            revenue,
            walk_time: Some(bucket.to_string()),
            ..LocationRecord::default()
        }
    }

    fn example_table() -> LocationTable {
        LocationTable::new(vec![
            shop("A", "Independent", "5", Some(100.0)),
            shop("B", "Starbucks", "10", Some(200.0)),
            shop("C", "Independent", "15", Some(50.0)),
        ])
    }

    fn larger_table() -> LocationTable {
        let mut records = vec![
            shop("Tim Hortons", "Tim Hortons", "5", Some(300.0)),
            shop("Starbucks", "Starbucks", "10", Some(500.0)),
            shop("Pilot", "Independent", "15", Some(120.0)),
            shop("Tim Hortons", "Tim Hortons", "15", Some(250.0)),
            shop("Balzac's", "Independent", "10", None),
            shop("Sam James", "Independent", "5", Some(120.0)),
            shop("Dineen", "Independent", "15", Some(80.0)),
            shop("Neo", "Independent", "10", Some(60.0)),
        ];
        records[1].customers = Some(90.0);
        records[1].distance = Some(420.0);
        records[1].rating = Some(4.0);
        records[5].customers = Some(30.0);
        records[5].distance = Some(60.0);
        records[5].rating = Some(5.0);
        records[6].units_sold = Some(12.0);
        records.push(LocationRecord {
            walk_time: Some("20".to_string()),
            revenue: Some(1000.0),
            ..LocationRecord::default()
        });
        LocationTable::new(records)
    }

    #[test]
    fn fifteen_is_cumulative() {
        let view = compute(FIFTEEN, &example_table());
        assert_eq!(view.rows, vec![0, 1, 2]);
        assert_eq!(view.summary.count, 3);
        assert_eq!(view.summary.total_revenue, 350.0);
    }

    #[test]
    fn five_and_ten_are_exact() {
        let table = example_table();
        assert_eq!(compute(FIVE, &table).rows, vec![0]);
        assert_eq!(compute(TEN, &table).rows, vec![1]);
    }

    #[test]
    fn all_selects_every_row() {
        let table = larger_table();
        let view = compute(WalkTimeSelection::All, &table);
        assert_eq!(view.summary.count, table.len());
        assert_eq!(view.rows.len(), table.len());
    }

    #[test]
    fn ten_is_contained_in_fifteen() {
        let table = larger_table();
        let ten = compute(TEN, &table);
        let fifteen = compute(FIFTEEN, &table);
        assert!(!ten.rows.is_empty());
        assert!(ten.rows.iter().all(|r| fifteen.rows.contains(r)));
    }

    #[test]
    fn count_matches_rows_for_every_selection() {
        let table = larger_table();
        for selection in WalkTimeSelection::OPTIONS {
            let view = compute(selection, &table);
            assert_eq!(view.summary.count, view.rows.len());
        }
    }

    #[test]
    fn empty_selection_gives_zero_sums_and_no_means() {
        let table = LocationTable::new(vec![shop("A", "X", "5", Some(10.0))]);
        let view = compute(TEN, &table);
        assert_eq!(view.summary.count, 0);
        assert_eq!(view.summary.total_revenue, 0.0);
        assert_eq!(view.summary.total_customers, 0.0);
        assert_eq!(view.summary.total_units_sold, 0.0);
        assert_eq!(view.summary.mean_distance, None);
        assert_eq!(view.summary.mean_rating, None);
        assert!(view.revenue_by_name.is_empty());
        assert!(view.top_rows.is_empty());
    }

    #[test]
    fn empty_table_does_not_panic() {
        let view = compute(WalkTimeSelection::All, &LocationTable::default());
        assert_eq!(view.summary, Summary::default());
    }

    #[test]
    fn missing_values_are_excluded_not_zeroed() {
        let table = LocationTable::new(vec![
            LocationRecord {
                revenue: Some(100.0),
                rating: Some(4.0),
                ..LocationRecord::default()
            },
            LocationRecord {
                revenue: None,
                rating: None,
                ..LocationRecord::default()
            },
        ]);
        let view = compute(WalkTimeSelection::All, &table);
        assert_eq!(view.summary.total_revenue, 100.0);
        assert_eq!(view.summary.mean_rating, Some(4.0));
    }

    #[test]
    fn means_over_present_values() {
        let view = compute(WalkTimeSelection::All, &larger_table());
        assert_eq!(view.summary.mean_distance, Some(240.0));
        assert_eq!(view.summary.mean_rating, Some(4.5));
        assert_eq!(view.summary.total_customers, 120.0);
        assert_eq!(view.summary.total_units_sold, 12.0);
    }

    #[test]
    fn name_ranking_sums_groups_descending() {
        let view = compute(WalkTimeSelection::All, &larger_table());
        let keys: Vec<&str> = view.revenue_by_name.iter().map(|g| g.key.as_str()).collect();
        // Pilot and Sam James tie at 120; Pilot appeared first.
        assert_eq!(
            keys,
            vec!["Tim Hortons", "Starbucks", "Pilot", "Sam James", "Dineen", "Neo", "Balzac's"]
        );
        assert_eq!(view.revenue_by_name[0].total, 550.0);
        assert_eq!(view.revenue_by_name[6].total, 0.0);
    }

    #[test]
    fn rows_without_name_are_not_grouped() {
        let view = compute(WalkTimeSelection::All, &larger_table());
        let grouped: f64 = view.revenue_by_name.iter().map(|g| g.total).sum();
        assert_eq!(view.summary.total_revenue - grouped, 1000.0);
    }

    #[test]
    fn chain_ranking_and_counts() {
        let view = compute(WalkTimeSelection::All, &larger_table());
        assert_eq!(
            view.revenue_by_chain,
            vec![
                GroupTotal { key: "Tim Hortons".into(), total: 550.0 },
                GroupTotal { key: "Starbucks".into(), total: 500.0 },
                GroupTotal { key: "Independent".into(), total: 380.0 },
            ]
        );
        assert_eq!(
            view.locations_by_chain,
            vec![
                GroupCount { key: "Independent".into(), count: 5 },
                GroupCount { key: "Tim Hortons".into(), count: 2 },
                GroupCount { key: "Starbucks".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn top_rows_include_every_row_of_top_groups() {
        let table = larger_table();
        let view = compute(WalkTimeSelection::All, &table);
        assert_eq!(
            view.top_names,
            vec!["Tim Hortons", "Starbucks", "Pilot", "Sam James", "Dineen"]
        );
        // Both Tim Hortons rows are kept, so there are more rows than groups.
        assert_eq!(view.top_rows, vec![0, 1, 2, 3, 5, 6]);
    }

    #[test]
    fn top_rows_revenue_matches_top_of_ranking() {
        let table = larger_table();
        for selection in WalkTimeSelection::OPTIONS {
            let view = compute(selection, &table);
            let from_rows: f64 = view
                .top_rows
                .iter()
                .filter_map(|&i| table.get(i).and_then(|r| r.revenue))
                .sum();
            let from_ranking: f64 = view.revenue_by_name.iter().take(TOP_N).map(|g| g.total).sum();
            assert_eq!(from_rows, from_ranking);
        }
    }

    #[test]
    fn compute_is_idempotent() {
        let table = larger_table();
        for selection in WalkTimeSelection::OPTIONS {
            assert_eq!(compute(selection, &table), compute(selection, &table));
        }
    }
}
