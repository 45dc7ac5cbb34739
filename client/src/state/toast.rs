//! Transient notification queue.
//!
//! DESIGN
//! ======
//! Views produce `Notice` values; the queue assigns ids so entries can be
//! dismissed individually, either by the user or by the auto-dismiss timer.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

/// Visual style of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Error,
}

/// A user-visible message with a title and description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), variant: ToastVariant::Success }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), variant: ToastVariant::Error }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.variant == ToastVariant::Error
    }
}

/// A queued notice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

/// Ordered notification queue, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ToastState {
    next_id: u64,
    pub items: Vec<Toast>,
}

impl ToastState {
    /// Queue a notice and return its id.
    pub fn push(&mut self, notice: Notice) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast { id, notice });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    /// Drop every error notice, keeping success messages.
    pub fn clear_errors(&mut self) {
        self.items.retain(|t| !t.notice.is_error());
    }
}
