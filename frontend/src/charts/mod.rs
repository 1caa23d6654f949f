//! Chart rendering onto page canvases.
//!
//! Every renderer resolves its mount point, refuses empty data with a
//! placeholder message, builds the declarative config and paints it with
//! plotters. Failures are logged and returned, never thrown at the page.

pub mod draw;
pub mod tooltip;

use shared::{
    bar_config, check_chart_data, doughnut_config, line_config, ChartConfig, ChartKind,
    RenderError, Theme,
};

use crate::services::{app_config, dom, Logger};

/// What to draw on a mount point.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartRequest {
    Doughnut {
        labels: Vec<String>,
        values: Vec<f64>,
    },
    Line {
        labels: Vec<String>,
        income: Vec<f64>,
        expense: Vec<f64>,
    },
    Bar {
        labels: Vec<String>,
        values: Vec<f64>,
        series_name: Option<String>,
    },
}

impl ChartRequest {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartRequest::Doughnut { .. } => ChartKind::Doughnut,
            ChartRequest::Line { .. } => ChartKind::Line,
            ChartRequest::Bar { .. } => ChartKind::Bar,
        }
    }

    fn check(&self) -> Result<(), RenderError> {
        match self {
            ChartRequest::Doughnut { labels, values }
            | ChartRequest::Bar { labels, values, .. } => {
                check_chart_data(self.kind(), labels, &[values.as_slice()])
            }
            ChartRequest::Line { labels, income, expense } => {
                check_chart_data(self.kind(), labels, &[income.as_slice(), expense.as_slice()])
            }
        }
    }

    pub fn config(&self, theme: &Theme) -> ChartConfig {
        match self {
            ChartRequest::Doughnut { labels, values } => doughnut_config(labels, values, theme),
            ChartRequest::Line { labels, income, expense } => {
                line_config(labels, income, expense, theme)
            }
            ChartRequest::Bar { labels, values, series_name } => {
                bar_config(labels, values, series_name.as_deref(), theme)
            }
        }
    }
}

/// A chart that made it onto its canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub mount_id: String,
    pub kind: ChartKind,
}

pub fn render_doughnut(
    mount_id: &str,
    labels: &[String],
    values: &[f64],
) -> Result<Rendered, RenderError> {
    render(
        mount_id,
        &ChartRequest::Doughnut { labels: labels.to_vec(), values: values.to_vec() },
    )
}

pub fn render_line(
    mount_id: &str,
    labels: &[String],
    income: &[f64],
    expense: &[f64],
) -> Result<Rendered, RenderError> {
    render(
        mount_id,
        &ChartRequest::Line {
            labels: labels.to_vec(),
            income: income.to_vec(),
            expense: expense.to_vec(),
        },
    )
}

pub fn render_bar(
    mount_id: &str,
    labels: &[String],
    values: &[f64],
    series_name: Option<&str>,
) -> Result<Rendered, RenderError> {
    render(
        mount_id,
        &ChartRequest::Bar {
            labels: labels.to_vec(),
            values: values.to_vec(),
            series_name: series_name.map(str::to_string),
        },
    )
}

/// Draw `request` on the canvas with id `mount_id`, replacing whatever chart
/// was drawn there before.
pub fn render(mount_id: &str, request: &ChartRequest) -> Result<Rendered, RenderError> {
    let config = app_config();
    let result = try_render(mount_id, request, &config.theme);
    match &result {
        Ok(rendered) => Logger::debug_with_component(
            "charts",
            &format!("Drew {} chart on #{}", rendered.kind, rendered.mount_id),
        ),
        Err(e) if e.shows_placeholder() => Logger::warn_with_component("charts", &e.to_string()),
        Err(e) => Logger::error_with_component("charts", &e.to_string()),
    }
    result
}

fn try_render(
    mount_id: &str,
    request: &ChartRequest,
    theme: &Theme,
) -> Result<Rendered, RenderError> {
    let canvas = dom::canvas_by_id(mount_id)?;

    if let Err(e) = request.check() {
        tooltip::uninstall(mount_id);
        dom::show_placeholder(&canvas, mount_id, request.kind());
        return Err(e);
    }
    dom::clear_placeholder(&canvas, mount_id);

    let config = request.config(theme);
    let hits = draw::draw_chart(&canvas, &config, theme).map_err(RenderError::Draw)?;
    tooltip::install(&canvas, mount_id, config, hits);

    Ok(Rendered { mount_id: mount_id.to_string(), kind: request.kind() })
}
