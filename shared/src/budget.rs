use serde::{Deserialize, Serialize};

use crate::format::parse_float_prefix;

/// Color state of a budget progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressLevel {
    Normal,
    Warning,
    Danger,
}

impl ProgressLevel {
    /// Every class this module may put on a bar. Recomputing a bar's state
    /// removes all of them before adding the current one.
    pub const CLASSES: [&'static str; 2] = ["warning", "danger"];

    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            ProgressLevel::Normal => None,
            ProgressLevel::Warning => Some("warning"),
            ProgressLevel::Danger => Some("danger"),
        }
    }

    pub fn classify(percent: f64, warning_threshold: f64, danger_threshold: f64) -> Self {
        if percent >= danger_threshold {
            ProgressLevel::Danger
        } else if percent >= warning_threshold {
            ProgressLevel::Warning
        } else {
            ProgressLevel::Normal
        }
    }
}

/// Read the percentage out of an inline width such as `"92%"`.
pub fn parse_width_percent(width: &str) -> Option<f64> {
    parse_float_prefix(width).filter(|v| !v.is_nan())
}

/// Spending against a category's monthly limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUsage {
    pub category_name: String,
    pub spent: f64,
    pub limit: f64,
    /// Spent as a whole percentage of the limit, rounded half up
    pub percent: i64,
}

impl BudgetUsage {
    pub fn new(category_name: impl Into<String>, spent: f64, limit: f64) -> Self {
        Self {
            category_name: category_name.into(),
            spent,
            limit,
            percent: usage_percent(spent, limit),
        }
    }

    /// Width for the bar element, capped to the track.
    pub fn bar_width(&self) -> i64 {
        self.percent.clamp(0, 100)
    }

    pub fn level(&self, warning_threshold: f64, danger_threshold: f64) -> ProgressLevel {
        ProgressLevel::classify(self.percent as f64, warning_threshold, danger_threshold)
    }

    pub fn remaining(&self) -> f64 {
        self.limit - self.spent
    }
}

/// `spent * 100 / limit` rounded half up; 0 without a positive limit.
pub fn usage_percent(spent: f64, limit: f64) -> i64 {
    if limit > 0.0 {
        (spent * 100.0 / limit).round() as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(ProgressLevel::classify(92.0, 75.0, 90.0), ProgressLevel::Danger);
        assert_eq!(ProgressLevel::classify(90.0, 75.0, 90.0), ProgressLevel::Danger);
        assert_eq!(ProgressLevel::classify(80.0, 75.0, 90.0), ProgressLevel::Warning);
        assert_eq!(ProgressLevel::classify(75.0, 75.0, 90.0), ProgressLevel::Warning);
        assert_eq!(ProgressLevel::classify(50.0, 75.0, 90.0), ProgressLevel::Normal);
    }

    #[test]
    fn test_css_classes() {
        assert_eq!(ProgressLevel::Danger.css_class(), Some("danger"));
        assert_eq!(ProgressLevel::Warning.css_class(), Some("warning"));
        assert_eq!(ProgressLevel::Normal.css_class(), None);
    }

    #[test]
    fn test_parse_width_percent() {
        assert_eq!(parse_width_percent("92%"), Some(92.0));
        assert_eq!(parse_width_percent("80.5%"), Some(80.5));
        assert_eq!(parse_width_percent(""), None);
        assert_eq!(parse_width_percent("auto"), None);
    }

    #[test]
    fn test_budget_usage_percent() {
        assert_eq!(BudgetUsage::new("Food", 150.0, 200.0).percent, 75);
        assert_eq!(BudgetUsage::new("Food", 1.0, 200.0).percent, 1);
        assert_eq!(BudgetUsage::new("Food", 0.5, 200.0).percent, 0);
        assert_eq!(BudgetUsage::new("Food", 50.0, 0.0).percent, 0);
        assert_eq!(BudgetUsage::new("Food", 330.0, 300.0).percent, 110);
    }

    #[test]
    fn test_budget_usage_bar_width_and_level() {
        let over = BudgetUsage::new("Travel", 330.0, 300.0);
        assert_eq!(over.bar_width(), 100);
        assert_eq!(over.level(75.0, 90.0), ProgressLevel::Danger);
        assert_eq!(over.remaining(), -30.0);

        let fine = BudgetUsage::new("Books", 20.0, 100.0);
        assert_eq!(fine.level(75.0, 90.0), ProgressLevel::Normal);
    }
}
