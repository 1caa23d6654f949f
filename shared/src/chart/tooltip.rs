use serde::{Deserialize, Serialize};

use super::Dataset;
use crate::format::format_amount;

/// The label callback a chart's tooltip uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TooltipFormat {
    /// `"label: $amount (pct%)"`
    SegmentShare,
    /// `"Series: $amount"`
    SeriesCurrency,
    /// `"$amount"`
    Currency,
}

impl TooltipFormat {
    /// Body line for the point at `index` of `dataset`, whose category label
    /// is `label`. `None` when the dataset has no value there.
    pub fn label(&self, label: &str, dataset: &Dataset, index: usize) -> Option<String> {
        let value = *dataset.data.get(index)?;
        Some(match self {
            TooltipFormat::SegmentShare => doughnut_tooltip_label(label, value, &dataset.data),
            TooltipFormat::SeriesCurrency => {
                series_tooltip_label(dataset.label.as_deref().unwrap_or(""), value)
            }
            TooltipFormat::Currency => bar_tooltip_label(value),
        })
    }
}

/// Share of `total` taken by `value`, in percent, rounded to one decimal.
pub fn share_percent(value: f64, total: f64) -> f64 {
    if total == 0.0 || !total.is_finite() {
        return 0.0;
    }
    (value / total * 100.0 * 10.0).round() / 10.0
}

pub fn doughnut_tooltip_label(label: &str, value: f64, values: &[f64]) -> String {
    let total: f64 = values.iter().sum();
    let mut text = String::new();
    if !label.is_empty() {
        text.push_str(label);
        text.push_str(": ");
    }
    text.push('$');
    text.push_str(&format_amount(value));
    text.push_str(&format!(" ({:.1}%)", share_percent(value, total)));
    text
}

/// Series line of a cash flow tooltip. A nameless series shows the bare amount.
pub fn series_tooltip_label(series: &str, value: f64) -> String {
    if series.is_empty() {
        format_amount(value)
    } else {
        format!("{}: ${}", series, format_amount(value))
    }
}

pub fn bar_tooltip_label(value: f64) -> String {
    format!("${}", format_amount(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_percent_rounds_to_one_decimal() {
        assert_eq!(share_percent(1.0, 3.0), 33.3);
        assert_eq!(share_percent(2.0, 3.0), 66.7);
        assert_eq!(share_percent(50.0, 200.0), 25.0);
        assert_eq!(share_percent(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_share_percentages_sum_close_to_hundred() {
        let cases: [&[f64]; 4] = [
            &[1.0, 1.0, 1.0],
            &[120.5, 330.25, 89.99, 1500.0],
            &[7.0, 13.0, 19.0, 23.0, 29.0, 31.0, 37.0],
            &[0.01, 999.99],
        ];
        for values in cases {
            let total: f64 = values.iter().sum();
            let sum: f64 = values.iter().map(|v| share_percent(*v, total)).sum();
            let tolerance = 0.05 * values.len() as f64;
            assert!((sum - 100.0).abs() <= tolerance, "sum {} for {:?}", sum, values);
        }
    }

    #[test]
    fn test_doughnut_tooltip_label() {
        let values = [1234.5, 1234.5];
        assert_eq!(doughnut_tooltip_label("Food", 1234.5, &values), "Food: $1,234.50 (50.0%)");
        assert_eq!(doughnut_tooltip_label("", 1234.5, &values), "$1,234.50 (50.0%)");
        assert_eq!(doughnut_tooltip_label("Rent", 1.0, &[1.0, 2.0]), "Rent: $1.00 (33.3%)");
    }

    #[test]
    fn test_series_tooltip_label() {
        assert_eq!(series_tooltip_label("Income", 2500.0), "Income: $2,500.00");
        assert_eq!(series_tooltip_label("", 12.0), "12.00");
    }

    #[test]
    fn test_bar_tooltip_label() {
        assert_eq!(bar_tooltip_label(0.5), "$0.50");
        assert_eq!(bar_tooltip_label(10_000.0), "$10,000.00");
    }
}
