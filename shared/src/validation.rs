use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::Theme;

/// Notification shown when a form is submitted with required fields empty.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

/// Default prompt for delete confirmations.
pub const DEFAULT_DELETE_PROMPT: &str = "Are you sure you want to delete this item?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldStatus {
    Filled,
    Missing,
}

impl FieldStatus {
    pub fn of(value: &str) -> Self {
        if value.is_empty() {
            FieldStatus::Missing
        } else {
            FieldStatus::Filled
        }
    }

    /// Border color the field should carry after validation.
    pub fn border_color<'a>(&self, theme: &'a Theme) -> &'a str {
        match self {
            FieldStatus::Filled => &theme.neutral_border,
            FieldStatus::Missing => &theme.error_border,
        }
    }
}

/// Result of checking a form's required fields, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub statuses: Vec<FieldStatus>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.statuses.iter().all(|s| *s == FieldStatus::Filled)
    }

    pub fn missing_count(&self) -> usize {
        self.statuses.iter().filter(|s| **s == FieldStatus::Missing).count()
    }
}

/// Check the current values of a form's required fields. Only an empty value
/// counts as missing; whitespace is a value.
pub fn check_required<I, S>(values: I) -> ValidationOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ValidationOutcome {
        statuses: values.into_iter().map(|v| FieldStatus::of(v.as_ref())).collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn tag(&self) -> &'static str {
        match self {
            NotificationKind::Info => "INFO",
            NotificationKind::Success => "SUCCESS",
            NotificationKind::Warning => "WARNING",
            NotificationKind::Error => "ERROR",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = std::convert::Infallible;

    /// Unknown kinds fall back to `Info`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "success" => NotificationKind::Success,
            "warning" | "warn" => NotificationKind::Warning,
            "error" | "danger" => NotificationKind::Error,
            _ => NotificationKind::Info,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self { kind, message: message.into() }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.tag(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_required_flags_empty_fields() {
        let outcome = check_required(["Groceries", "", "42.00"]);
        assert!(!outcome.is_valid());
        assert_eq!(outcome.missing_count(), 1);
        assert_eq!(
            outcome.statuses,
            vec![FieldStatus::Filled, FieldStatus::Missing, FieldStatus::Filled]
        );
    }

    #[test]
    fn test_check_required_whitespace_is_a_value() {
        assert!(check_required([" "]).is_valid());
        assert!(check_required(Vec::<String>::new()).is_valid());
    }

    #[test]
    fn test_border_colors() {
        let theme = Theme::default();
        assert_eq!(FieldStatus::Missing.border_color(&theme), "#ef4444");
        assert_eq!(FieldStatus::Filled.border_color(&theme), "#e2e8f0");
    }

    #[test]
    fn test_notification_kind_parsing() {
        assert_eq!("error".parse::<NotificationKind>().unwrap(), NotificationKind::Error);
        assert_eq!("SUCCESS".parse::<NotificationKind>().unwrap(), NotificationKind::Success);
        assert_eq!("whatever".parse::<NotificationKind>().unwrap(), NotificationKind::Info);
    }

    #[test]
    fn test_notification_display() {
        let note = Notification::new(REQUIRED_FIELDS_MESSAGE, NotificationKind::Error);
        assert_eq!(note.to_string(), "[ERROR] Please fill in all required fields");
    }
}
