//! Declarative chart descriptions.
//!
//! A [`ChartConfig`] says what to draw (kind, labels, datasets) and how it
//! should look (legend, tooltip, axes). The builders here are the only place
//! that decides presentation; the frontend just paints what they produce.

pub mod geometry;
pub mod tooltip;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{Color, Theme};
use crate::error::RenderError;

pub use geometry::{nice_upper_bound, smooth_path, HitMap};
pub use tooltip::{
    bar_tooltip_label, doughnut_tooltip_label, series_tooltip_label, share_percent, TooltipFormat,
};

/// Series name used by the bar chart when the caller gives none.
pub const DEFAULT_BAR_SERIES: &str = "Amount";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Line,
    Bar,
}

impl ChartKind {
    /// Text shown in place of the chart when there is nothing to draw.
    pub fn placeholder_text(&self) -> &'static str {
        match self {
            ChartKind::Doughnut => "No spending data available for this month",
            ChartKind::Line => "No cash flow data available",
            ChartKind::Bar => "No data available",
        }
    }

    /// Width divided by height when the canvas keeps its aspect ratio.
    pub fn aspect_ratio(&self) -> f64 {
        match self {
            ChartKind::Doughnut => 1.0,
            ChartKind::Line | ChartKind::Bar => 2.0,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Doughnut => write!(f, "doughnut"),
            ChartKind::Line => write!(f, "line"),
            ChartKind::Bar => write!(f, "bar"),
        }
    }
}

/// One named sequence of values drawn as a single trace or segment set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self { name: name.into(), values }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    /// One color per point for segment charts, a single fill otherwise
    pub background_color: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    pub border_width: u32,
    pub hover_offset: u32,
    pub fill: bool,
    pub tension: f64,
    pub point_radius: u32,
    pub point_hover_radius: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_border_color: Option<String>,
    pub point_border_width: u32,
    pub border_radius: u32,
    pub border_skipped: bool,
}

impl Dataset {
    fn empty(data: Vec<f64>) -> Self {
        Self {
            label: None,
            data,
            background_color: Vec::new(),
            border_color: None,
            border_width: 0,
            hover_offset: 0,
            fill: false,
            tension: 0.0,
            point_radius: 0,
            point_hover_radius: 0,
            point_background_color: None,
            point_border_color: None,
            point_border_width: 0,
            border_radius: 0,
            border_skipped: true,
        }
    }

    /// Fill color for the point at `index`.
    pub fn color_at(&self, index: usize) -> Option<&str> {
        if self.background_color.is_empty() {
            return None;
        }
        Some(self.background_color[index % self.background_color.len()].as_str())
    }

    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Interaction>,
    pub legend: Legend,
    pub tooltip: TooltipStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
    /// Inner radius of a doughnut as a percentage of the outer radius
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutout_percent: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Every series at the hovered x index
    Index,
    /// Only the element under the pointer
    Nearest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub mode: InteractionMode,
    pub intersect: bool,
}

/// Legend drawn in rows below the plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    pub display: bool,
    pub padding: u32,
    pub font_size: u32,
    pub use_point_style: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipStyle {
    pub background_color: String,
    pub text_color: String,
    pub padding: u32,
    pub title_font: FontSpec,
    pub body_font: FontSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    pub border_width: u32,
    pub display_colors: bool,
    /// Which label callback formats the body lines
    pub format: TooltipFormat,
}

/// One body line of a tooltip and the swatch shown beside it.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipItem {
    pub text: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
    pub grid_display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_color: Option<String>,
    /// Tick labels rendered as currency
    pub currency_ticks: bool,
}

impl Axis {
    pub fn tick_label(&self, value: f64) -> String {
        if self.currency_ticks {
            crate::format::axis_tick_label(value)
        } else {
            crate::format::format_decimal(value, 0, 3)
        }
    }
}

impl ChartConfig {
    /// Label of the category or period at `index`, used as tooltip title.
    pub fn tooltip_title(&self, index: usize) -> Option<&str> {
        self.data.labels.get(index).map(String::as_str)
    }

    /// Tooltip body entries for the point at `index`, formatted the way the
    /// chart's tooltip callback dictates. Index interaction lists every
    /// dataset; otherwise only the first.
    pub fn tooltip_items(&self, index: usize) -> Vec<TooltipItem> {
        let label = self.tooltip_title(index).unwrap_or("");
        let mode = self.options.interaction.as_ref().map(|i| i.mode);
        let datasets: &[Dataset] = match mode {
            Some(InteractionMode::Index) => &self.data.datasets,
            Some(InteractionMode::Nearest) | None => self.data.datasets.get(..1).unwrap_or(&[]),
        };
        datasets
            .iter()
            .filter_map(|dataset| {
                let text = self.options.tooltip.format.label(label, dataset, index)?;
                let color = dataset
                    .border_color
                    .clone()
                    .or_else(|| dataset.color_at(index).map(str::to_string));
                Some(TooltipItem { text, color })
            })
            .collect()
    }

    pub fn tooltip_lines(&self, index: usize) -> Vec<String> {
        self.tooltip_items(index).into_iter().map(|item| item.text).collect()
    }

    /// Largest value across all datasets, for scaling the value axis.
    pub fn max_value(&self) -> f64 {
        self.data
            .datasets
            .iter()
            .flat_map(|d| d.data.iter().copied())
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }
}

/// Reject input a chart cannot meaningfully draw: no labels, an empty series,
/// or a series whose length differs from the label count.
pub fn check_chart_data(
    kind: ChartKind,
    labels: &[String],
    series: &[&[f64]],
) -> Result<(), RenderError> {
    let empty = labels.is_empty()
        || series.is_empty()
        || series.iter().any(|values| values.is_empty() || values.len() != labels.len());
    if empty {
        return Err(RenderError::EmptyData { chart: kind });
    }
    Ok(())
}

fn legend(display: bool) -> Legend {
    Legend {
        display,
        padding: 15,
        font_size: 12,
        use_point_style: true,
    }
}

/// Only the element under the pointer.
fn nearest() -> Interaction {
    Interaction { mode: InteractionMode::Nearest, intersect: true }
}

fn tooltip_style(theme: &Theme, bordered: bool, format: TooltipFormat) -> TooltipStyle {
    TooltipStyle {
        background_color: theme.tooltip_background.clone(),
        text_color: theme.tooltip_text.clone(),
        padding: 12,
        title_font: FontSpec { size: 14, weight: Some("600".to_string()) },
        body_font: FontSpec { size: 13, weight: None },
        border_color: bordered.then(|| theme.tooltip_border.clone()),
        border_width: if bordered { 1 } else { 0 },
        display_colors: true,
        format,
    }
}

fn currency_scales(theme: &Theme) -> Scales {
    Scales {
        x: Axis {
            begin_at_zero: false,
            grid_display: false,
            grid_color: None,
            currency_ticks: false,
        },
        y: Axis {
            begin_at_zero: true,
            grid_display: true,
            grid_color: Some(theme.grid_color.clone()),
            currency_ticks: true,
        },
    }
}

/// Proportioned segment chart of spending per category.
pub fn doughnut_config(labels: &[String], values: &[f64], theme: &Theme) -> ChartConfig {
    let dataset = Dataset {
        background_color: (0..values.len()).map(|i| theme.palette_color(i)).collect(),
        hover_offset: 10,
        ..Dataset::empty(values.to_vec())
    };

    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData { labels: labels.to_vec(), datasets: vec![dataset] },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: true,
            interaction: Some(nearest()),
            legend: legend(true),
            tooltip: tooltip_style(theme, true, TooltipFormat::SegmentShare),
            scales: None,
            cutout_percent: Some(65),
        },
    }
}

fn cash_flow_dataset(series: Series, line_color: &str) -> Dataset {
    let fill = Color::parse(line_color)
        .map(|c| c.with_alpha(0.1).to_string())
        .unwrap_or_else(|| line_color.to_string());
    Dataset {
        label: Some(series.name),
        background_color: vec![fill],
        border_color: Some(line_color.to_string()),
        border_width: 2,
        fill: true,
        tension: 0.4,
        point_radius: 4,
        point_hover_radius: 6,
        point_background_color: Some(line_color.to_string()),
        point_border_color: Some("#fff".to_string()),
        point_border_width: 2,
        ..Dataset::empty(series.values)
    }
}

/// Two overlaid filled lines, income against expense per period.
pub fn line_config(
    labels: &[String],
    income: &[f64],
    expense: &[f64],
    theme: &Theme,
) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: labels.to_vec(),
            datasets: vec![
                cash_flow_dataset(Series::new("Income", income.to_vec()), &theme.income_color),
                cash_flow_dataset(
                    Series::new("Expense", expense.to_vec()),
                    &theme.expense_color,
                ),
            ],
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: true,
            interaction: Some(Interaction { mode: InteractionMode::Index, intersect: false }),
            legend: legend(true),
            tooltip: tooltip_style(theme, true, TooltipFormat::SeriesCurrency),
            scales: Some(currency_scales(theme)),
            cutout_percent: None,
        },
    }
}

/// Single-series bar chart. `series_name` defaults to "Amount".
pub fn bar_config(
    labels: &[String],
    values: &[f64],
    series_name: Option<&str>,
    theme: &Theme,
) -> ChartConfig {
    let series = Series::new(series_name.unwrap_or(DEFAULT_BAR_SERIES), values.to_vec());
    let dataset = Dataset {
        label: Some(series.name),
        background_color: vec![theme.bar_color.clone()],
        border_radius: 6,
        border_skipped: false,
        ..Dataset::empty(series.values)
    };

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData { labels: labels.to_vec(), datasets: vec![dataset] },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: true,
            interaction: Some(nearest()),
            legend: legend(false),
            tooltip: tooltip_style(theme, false, TooltipFormat::Currency),
            scales: Some(currency_scales(theme)),
            cutout_percent: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_doughnut_config_shape() {
        let theme = Theme::default();
        let config = doughnut_config(&labels(&["Food", "Rent"]), &[120.0, 900.0], &theme);

        assert_eq!(config.kind, ChartKind::Doughnut);
        assert_eq!(config.options.cutout_percent, Some(65));
        let interaction = config.options.interaction.as_ref().unwrap();
        assert_eq!(interaction.mode, InteractionMode::Nearest);
        assert!(interaction.intersect);
        assert!(config.options.legend.display);
        assert!(config.options.scales.is_none());

        let dataset = &config.data.datasets[0];
        assert_eq!(dataset.background_color, vec!["#6366f1", "#8b5cf6"]);
        assert_eq!(dataset.border_width, 0);
        assert_eq!(dataset.hover_offset, 10);
    }

    #[test]
    fn test_doughnut_palette_wraps_past_ten_segments() {
        let theme = Theme::default();
        let names: Vec<String> = (0..12).map(|i| format!("Category {}", i)).collect();
        let config = doughnut_config(&names, &[1.0; 12], &theme);
        let dataset = &config.data.datasets[0];
        assert_eq!(dataset.color_at(10), Some("#6366f1"));
        assert_eq!(dataset.color_at(11), Some("#8b5cf6"));
    }

    #[test]
    fn test_line_config_uses_index_interaction() {
        let theme = Theme::default();
        let config = line_config(&labels(&["Jan", "Feb"]), &[100.0, 200.0], &[50.0, 75.0], &theme);

        let interaction = config.options.interaction.as_ref().unwrap();
        assert_eq!(interaction.mode, InteractionMode::Index);
        assert!(!interaction.intersect);

        let income = &config.data.datasets[0];
        let expense = &config.data.datasets[1];
        assert_eq!(income.label.as_deref(), Some("Income"));
        assert_eq!(expense.label.as_deref(), Some("Expense"));
        assert_eq!(income.background_color, vec!["rgba(16, 185, 129, 0.1)"]);
        assert_eq!(expense.background_color, vec!["rgba(239, 68, 68, 0.1)"]);
        assert!(income.fill);
        assert_eq!(income.tension, 0.4);

        let scales = config.options.scales.as_ref().unwrap();
        assert!(scales.y.begin_at_zero);
        assert!(scales.y.currency_ticks);
        assert!(!scales.x.grid_display);
    }

    #[test]
    fn test_line_tooltip_lists_every_series_at_index() {
        let theme = Theme::default();
        let config = line_config(&labels(&["Jan", "Feb"]), &[100.0, 2500.0], &[50.0, 75.5], &theme);
        assert_eq!(config.tooltip_title(1), Some("Feb"));
        assert_eq!(config.tooltip_lines(1), vec!["Income: $2,500.00", "Expense: $75.50"]);
    }

    #[test]
    fn test_bar_config_defaults_series_name() {
        let theme = Theme::default();
        let config = bar_config(&labels(&["A"]), &[3.0], None, &theme);
        assert_eq!(config.data.datasets[0].label.as_deref(), Some("Amount"));
        assert!(!config.options.legend.display);
        assert_eq!(config.data.datasets[0].border_radius, 6);

        let named = bar_config(&labels(&["A"]), &[3.0], Some("Spent"), &theme);
        assert_eq!(named.data.datasets[0].label.as_deref(), Some("Spent"));
        assert_eq!(named.tooltip_lines(0), vec!["$3.00"]);
    }

    #[test]
    fn test_tooltip_items_carry_swatch_colors() {
        let theme = Theme::default();
        let doughnut = doughnut_config(&labels(&["Food", "Rent"]), &[1.0, 3.0], &theme);
        let items = doughnut.tooltip_items(1);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "Rent: $3.00 (75.0%)");
        assert_eq!(items[0].color.as_deref(), Some("#8b5cf6"));

        let line = line_config(&labels(&["Jan"]), &[1.0], &[2.0], &theme);
        let colors: Vec<_> = line.tooltip_items(0).into_iter().map(|i| i.color).collect();
        assert_eq!(colors, vec![Some("#10b981".to_string()), Some("#ef4444".to_string())]);

        assert!(line.tooltip_items(5).is_empty());
    }

    #[test]
    fn test_check_chart_data() {
        let names = labels(&["Jan", "Feb"]);
        assert!(check_chart_data(ChartKind::Line, &names, &[&[1.0, 2.0], &[3.0, 4.0]]).is_ok());
        assert_eq!(
            check_chart_data(ChartKind::Doughnut, &[], &[&[]]),
            Err(RenderError::EmptyData { chart: ChartKind::Doughnut })
        );
        assert!(check_chart_data(ChartKind::Bar, &names, &[&[]]).is_err());
        assert!(check_chart_data(ChartKind::Line, &names, &[&[1.0, 2.0], &[3.0]]).is_err());
    }

    #[test]
    fn test_axis_tick_label() {
        let theme = Theme::default();
        let config = bar_config(&labels(&["A"]), &[3.0], None, &theme);
        let scales = config.options.scales.unwrap();
        assert_eq!(scales.y.tick_label(1500.0), "$1,500");
        assert_eq!(scales.x.tick_label(2.0), "2");
    }

    #[test]
    fn test_config_serializes_as_declarative_options() {
        let theme = Theme::default();
        let config = doughnut_config(&labels(&["Food"]), &[10.0], &theme);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["type"], "doughnut");
        assert_eq!(json["options"]["cutoutPercent"], 65);
        assert_eq!(json["options"]["tooltip"]["backgroundColor"], "#1e293b");
        assert_eq!(json["data"]["datasets"][0]["hoverOffset"], 10);
    }

    #[test]
    fn test_max_value_ignores_non_finite() {
        let theme = Theme::default();
        let config = line_config(&labels(&["a", "b"]), &[1.0, f64::NAN], &[4.0, 2.0], &theme);
        assert_eq!(config.max_value(), 4.0);
    }
}
