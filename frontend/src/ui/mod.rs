//! Page behavior outside the charts: notifications, budget progress bars,
//! form validation and start-up.

pub mod bootstrap;
pub mod forms;
pub mod notifications;
pub mod progress;

pub use notifications::{confirm_delete, show_notification};
pub use progress::update_budget_progress;
