use serde::{Deserialize, Serialize};

use crate::budget::BudgetUsage;
use crate::format::{format_currency, format_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryType {
    Income,
    Expense,
}

/// A transaction as the dashboard lists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTransaction {
    #[serde(default)]
    pub id: Option<String>,
    /// Booking date, `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub merchant: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub category_type: Option<CategoryType>,
    #[serde(default)]
    pub account_name: Option<String>,
    /// Always positive; the category type carries the direction
    pub amount: f64,
    #[serde(default)]
    pub recurring: bool,
}

impl RecentTransaction {
    pub fn display_date(&self) -> String {
        format_date(&self.date)
    }

    /// Merchant, else note, else the category name.
    pub fn title(&self) -> &str {
        self.merchant
            .as_deref()
            .filter(|m| !m.is_empty())
            .or(self.note.as_deref().filter(|n| !n.is_empty()))
            .or(self.category_name.as_deref())
            .unwrap_or("Transaction")
    }

    pub fn is_income(&self) -> bool {
        self.category_type == Some(CategoryType::Income)
    }

    /// `"+$12.00"` for income, `"-$12.00"` for everything else.
    pub fn signed_amount(&self) -> String {
        let sign = if self.is_income() { '+' } else { '-' };
        format!("{}{}", sign, format_currency(self.amount.abs()))
    }
}

/// Everything the dashboard page renders, embedded by the server as JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardData {
    pub mtd_income: f64,
    pub mtd_expense: f64,
    pub net: f64,
    pub category_labels: Vec<String>,
    pub category_values: Vec<f64>,
    pub months: Vec<String>,
    pub incomes: Vec<f64>,
    pub expenses: Vec<f64>,
    pub recent_transactions: Vec<RecentTransaction>,
    pub budget_usages: Vec<BudgetUsage>,
}

impl DashboardData {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_net_positive(&self) -> bool {
        self.net >= 0.0
    }
}
