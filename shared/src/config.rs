use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigError;

/// An sRGB color with alpha, parsed from the CSS notations the theme uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 1.0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    /// Parse `#rgb`, `#rrggbb`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    pub fn parse(css: &str) -> Option<Color> {
        let s = css.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if !hex.is_ascii() {
                return None;
            }
            return match hex.len() {
                3 => {
                    let mut channels = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
                    Some(Color::rgb(channels.next()??, channels.next()??, channels.next()??))
                }
                6 => Some(Color::rgb(
                    u8::from_str_radix(&hex[0..2], 16).ok()?,
                    u8::from_str_radix(&hex[2..4], 16).ok()?,
                    u8::from_str_radix(&hex[4..6], 16).ok()?,
                )),
                _ => None,
            };
        }

        let inner = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))?
            .strip_suffix(')')?;
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let channel = |p: &str| p.parse::<u8>().ok();
        match parts.as_slice() {
            [r, g, b] => Some(Color::rgb(channel(r)?, channel(g)?, channel(b)?)),
            [r, g, b, a] => {
                let alpha = a.parse::<f64>().ok()?;
                Some(Color {
                    r: channel(r)?,
                    g: channel(g)?,
                    b: channel(b)?,
                    a: alpha.clamp(0.0, 1.0),
                })
            }
            _ => None,
        }
    }

    pub fn with_alpha(self, a: f64) -> Color {
        Color { a, ..self }
    }

    /// Parse `css`, falling back to `fallback` when it cannot be read.
    pub fn parse_or(css: &str, fallback: Color) -> Color {
        Color::parse(css).unwrap_or(fallback)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Global chart look: fonts, neutral colors and the series palettes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    pub font_family: String,
    /// Default text color for legends and axis labels
    pub text_color: String,
    pub border_color: String,
    pub grid_color: String,
    pub background_color: String,
    pub tooltip_background: String,
    pub tooltip_border: String,
    pub tooltip_text: String,
    /// Segment colors for category charts, reused cyclically
    pub palette: Vec<String>,
    pub income_color: String,
    pub expense_color: String,
    pub bar_color: String,
    /// Border applied to a required field left empty
    pub error_border: String,
    /// Border applied to a required field that has a value
    pub neutral_border: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            font_family: "'Inter', sans-serif".to_string(),
            text_color: "#64748b".to_string(),
            border_color: "#e2e8f0".to_string(),
            grid_color: "#f1f5f9".to_string(),
            background_color: "#ffffff".to_string(),
            tooltip_background: "#1e293b".to_string(),
            tooltip_border: "#334155".to_string(),
            tooltip_text: "#ffffff".to_string(),
            palette: [
                "#6366f1", "#8b5cf6", "#ec4899", "#f43f5e", "#f59e0b",
                "#10b981", "#3b82f6", "#06b6d4", "#14b8a6", "#84cc16",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            income_color: "#10b981".to_string(),
            expense_color: "#ef4444".to_string(),
            bar_color: "#6366f1".to_string(),
            error_border: "#ef4444".to_string(),
            neutral_border: "#e2e8f0".to_string(),
        }
    }
}

impl Theme {
    /// Palette color for the segment at `index`, cycling past the end.
    pub fn palette_color(&self, index: usize) -> String {
        if self.palette.is_empty() {
            return self.bar_color.clone();
        }
        self.palette[index % self.palette.len()].clone()
    }
}

/// Page-level settings. Every field can be overridden by JSON embedded in the
/// page; absent fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub theme: Theme,
    /// Selector for the budget progress bars whose width drives their color
    pub progress_selector: String,
    /// Selector for forms that get required-field validation on submit
    pub form_selector: String,
    /// Selector, relative to a form, for the fields that must be filled
    pub required_selector: String,
    /// Element the dashboard components mount into
    pub dashboard_root_id: String,
    /// `<script type="application/json">` holding the dashboard payload
    pub dashboard_data_id: String,
    /// Percentage at which a progress bar turns to warning
    pub warning_threshold: f64,
    /// Percentage at which a progress bar turns to danger
    pub danger_threshold: f64,
    pub smooth_scroll: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            progress_selector: ".progress .bar".to_string(),
            form_selector: ".form".to_string(),
            required_selector: "input[required], select[required]".to_string(),
            dashboard_root_id: "dashboard-root".to_string(),
            dashboard_data_id: "dashboard-data".to_string(),
            warning_threshold: 75.0,
            danger_threshold: 90.0,
            smooth_scroll: true,
        }
    }
}

impl AppConfig {
    /// Id of the `<script type="application/json">` element read for overrides.
    pub const SCRIPT_ID: &'static str = "app-config";

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.warning_threshold < self.danger_threshold) {
            return Err(ConfigError::Thresholds {
                warning: self.warning_threshold,
                danger: self.danger_threshold,
            });
        }
        Ok(())
    }
}
