use shared::{Notification, NotificationKind};

/// Console logger that tags every line with the component that wrote it.
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(Level::Debug, component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(Level::Info, component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(Level::Warn, component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(Level::Error, component, message);
    }

    /// Log a notification as `[KIND] message`, at the level that matches its
    /// kind.
    pub fn notification(notification: &Notification) {
        let level = match notification.kind {
            NotificationKind::Info | NotificationKind::Success => Level::Info,
            NotificationKind::Warning => Level::Warn,
            NotificationKind::Error => Level::Error,
        };
        Self::emit(level, notification_line(notification));
    }

    fn log(level: Level, component: &str, message: &str) {
        Self::emit(level, tagged(component, message));
    }

    fn emit(level: Level, line: String) {
        match level {
            Level::Debug => gloo::console::debug!(line),
            Level::Info => gloo::console::info!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Error => gloo::console::error!(line),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

fn tagged(component: &str, message: &str) -> String {
    format!("[{}] {}", component, message)
}

fn notification_line(notification: &Notification) -> String {
    notification.to_string()
}
