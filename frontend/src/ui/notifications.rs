use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use shared::{Notification, NotificationKind, DEFAULT_DELETE_PROMPT};

use crate::services::Logger;

/// How many notifications are kept for inspection.
const HISTORY_LIMIT: usize = 32;

thread_local! {
    static HISTORY: RefCell<VecDeque<Notification>> = const { RefCell::new(VecDeque::new()) };
    static SHOWN: Cell<usize> = const { Cell::new(0) };
}

/// Report a message to the user. There is no toast UI; the notification is
/// written to the console at the level matching its kind.
pub fn show_notification(message: &str, kind: NotificationKind) {
    let notification = Notification::new(message, kind);
    Logger::notification(&notification);
    HISTORY.with(|history| {
        let mut history = history.borrow_mut();
        if history.len() == HISTORY_LIMIT {
            history.pop_front();
        }
        history.push_back(notification);
    });
    SHOWN.with(|shown| shown.set(shown.get() + 1));
}

/// Total notifications shown since the page loaded.
#[cfg(test)]
pub fn notifications_shown() -> usize {
    SHOWN.with(Cell::get)
}

/// Notifications shown so far, oldest first.
#[cfg(test)]
pub fn recent_notifications() -> Vec<Notification> {
    HISTORY.with(|history| history.borrow().iter().cloned().collect())
}

/// Ask the user to confirm a deletion. Blocks until the dialog is answered.
pub fn confirm_delete(message: Option<&str>) -> bool {
    gloo::dialogs::confirm(message.unwrap_or(DEFAULT_DELETE_PROMPT))
}
