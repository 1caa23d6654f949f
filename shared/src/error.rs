use crate::chart::ChartKind;

/// Why a chart was not drawn.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("Canvas element not found: {mount_id}")]
    MissingSurface { mount_id: String },
    #[error("Element {mount_id} is not a canvas")]
    NotACanvas { mount_id: String },
    #[error("No data available for {chart} chart")]
    EmptyData { chart: ChartKind },
    #[error("Error rendering chart: {0}")]
    Draw(String),
}

impl RenderError {
    /// Whether the placeholder message should be shown in place of the chart.
    pub fn shows_placeholder(&self) -> bool {
        matches!(self, RenderError::EmptyData { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid threshold: warning {warning} must be below danger {danger}")]
    Thresholds { warning: f64, danger: f64 },
}
