//! Presentation logic for the finance dashboard that does not need a browser:
//! formatting, chart descriptions, budget states and form checks.

pub mod budget;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod validation;

pub use budget::{parse_width_percent, usage_percent, BudgetUsage, ProgressLevel};
pub use chart::{
    bar_config, check_chart_data, doughnut_config, line_config, nice_upper_bound, smooth_path,
    ChartConfig, ChartKind, Dataset, HitMap, Series, DEFAULT_BAR_SERIES,
};
pub use config::{AppConfig, Color, Theme};
pub use dashboard::{CategoryType, DashboardData, RecentTransaction};
pub use error::{ConfigError, RenderError};
pub use format::{axis_tick_label, format_amount, format_currency, format_date, Amount};
pub use validation::{
    check_required, FieldStatus, Notification, NotificationKind, ValidationOutcome,
    DEFAULT_DELETE_PROMPT, REQUIRED_FIELDS_MESSAGE,
};
