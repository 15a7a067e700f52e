use super::filter::Summary;

/// Shown wherever a value is missing, including undefined means.
pub const MISSING: &str = "N/A";

// ---------------------------------------------------------------------------
// Scorecards – display text for the summary figures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorecards {
    pub shops: String,
    pub revenue: String,
    pub customers: String,
    pub units_sold: String,
    pub distance: String,
    pub rating: String,
}

impl Scorecards {
    pub fn from_summary(summary: &Summary) -> Self {
        Self {
            shops: summary.count.to_string(),
            revenue: currency(summary.total_revenue),
            customers: quantity(summary.total_customers),
            units_sold: quantity(summary.total_units_sold),
            distance: summary
                .mean_distance
                .map_or_else(|| MISSING.to_string(), |d| format!("{d:.1}")),
            rating: summary
                .mean_rating
                .map_or_else(|| MISSING.to_string(), |r| format!("{r:.0} Stars")),
        }
    }

    /// (title, value) pairs in display order.
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("Coffee Shops", self.shops.as_str()),
            ("Total Revenue", self.revenue.as_str()),
            ("Total Customers", self.customers.as_str()),
            ("Donuts Sold", self.units_sold.as_str()),
            ("Average Distance (M)", self.distance.as_str()),
            ("Average Rating", self.rating.as_str()),
        ]
    }
}

/// `$` followed by the amount; cents only when there are any.
pub fn currency(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("${value:.0}")
    } else {
        format!("${value:.2}")
    }
}

/// Whole numbers print without decimals, anything else with one.
pub fn quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Optional value for hover text and tables.
pub fn optional(value: Option<f64>, render: impl Fn(f64) -> String) -> String {
    value.map_or_else(|| MISSING.to_string(), render)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_populated_summary() {
        let summary = Summary {
            count: 3,
            total_revenue: 350.0,
            total_customers: 120.0,
            total_units_sold: 42.5,
            mean_distance: Some(123.456),
            mean_rating: Some(4.4),
        };
        let cards = Scorecards::from_summary(&summary);
        assert_eq!(cards.shops, "3");
        assert_eq!(cards.revenue, "$350");
        assert_eq!(cards.customers, "120");
        assert_eq!(cards.units_sold, "42.5");
        assert_eq!(cards.distance, "123.5");
        assert_eq!(cards.rating, "4 Stars");
    }

    #[test]
    fn empty_summary_shows_missing_means() {
        let cards = Scorecards::from_summary(&Summary::default());
        assert_eq!(cards.shops, "0");
        assert_eq!(cards.revenue, "$0");
        assert_eq!(cards.distance, MISSING);
        assert_eq!(cards.rating, MISSING);
    }

    #[test]
    fn currency_keeps_cents() {
        assert_eq!(currency(1234.5), "$1234.50");
    }

    #[test]
    fn entries_follow_display_order() {
        let cards = Scorecards::from_summary(&Summary::default());
        let titles: Vec<&str> = cards.entries().iter().map(|(t, _)| *t).collect();
        assert_eq!(titles[0], "Coffee Shops");
        assert_eq!(titles[5], "Average Rating");
    }
}
