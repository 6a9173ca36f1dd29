//! User-facing notices and the auto-dismissing toast stack.

use serde::Serialize;

/// How long a toast stays up before it is dismissed automatically.
pub const TOAST_DURATION_MS: u64 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    pub fn color(self) -> &'static str {
        match self {
            NoticeKind::Info => "#3b82f6",
            NoticeKind::Success => "#10b981",
            NoticeKind::Error => "#ef4444",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
    pub shown_at_ms: u64,
}

/// Transient notifications, newest last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Toasts {
    items: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    /// Show a notice. Returns the toast id.
    pub fn push(&mut self, notice: Notice, now_ms: u64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast {
            id,
            notice,
            shown_at_ms: now_ms,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    /// Drop toasts older than [`TOAST_DURATION_MS`].
    pub fn expire(&mut self, now_ms: u64) {
        self.items
            .retain(|t| now_ms.saturating_sub(t.shown_at_ms) < TOAST_DURATION_MS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_duration() {
        let mut toasts = Toasts::new();
        toasts.push(Notice::success("Case created"), 1_000);
        let late = toasts.push(Notice::error("Failed to delete case"), 3_000);

        toasts.expire(4_999);
        assert_eq!(toasts.items().len(), 2);

        toasts.expire(5_000);
        assert_eq!(toasts.items().len(), 1);
        assert_eq!(toasts.items()[0].id, late);
    }

    #[test]
    fn dismiss_removes_only_that_toast() {
        let mut toasts = Toasts::new();
        let a = toasts.push(Notice::info("a"), 0);
        toasts.push(Notice::info("b"), 0);
        toasts.dismiss(a);
        assert_eq!(toasts.items().len(), 1);
        assert_eq!(toasts.items()[0].notice.message, "b");
    }
}
