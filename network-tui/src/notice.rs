use std::time::{Duration, Instant};

/// How long a notice stays on screen
pub const NOTICE_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Failure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub shown_at: Instant,
}

/// Single-slot notification surface. A newer notice replaces the current one.
#[derive(Debug, Default)]
pub struct NoticeSlot {
    current: Option<Notice>,
}

impl NoticeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.show_at(kind, text, Instant::now());
    }

    pub fn show_at(&mut self, kind: NoticeKind, text: impl Into<String>, now: Instant) {
        let text = text.into();
        log::debug!(target: "general", "notice ({:?}): {}", kind, text);
        self.current = Some(Notice {
            text,
            kind,
            shown_at: now,
        });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.show(NoticeKind::Success, text);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.show(NoticeKind::Info, text);
    }

    pub fn failure(&mut self, text: impl Into<String>) {
        self.show(NoticeKind::Failure, text);
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Clear the notice once it has been visible longer than `NOTICE_DURATION`
    pub fn clear_expired(&mut self, now: Instant) {
        if let Some(notice) = &self.current {
            if now.duration_since(notice.shown_at) > NOTICE_DURATION {
                self.current = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_notice_replaces_current() {
        let mut slot = NoticeSlot::new();
        slot.success("Post updated.");
        slot.failure("Could not like post.");

        let notice = slot.current().unwrap();
        assert_eq!(notice.text, "Could not like post.");
        assert_eq!(notice.kind, NoticeKind::Failure);
    }

    #[test]
    fn test_notice_expires_after_duration() {
        let mut slot = NoticeSlot::new();
        let start = Instant::now();
        slot.show_at(NoticeKind::Info, "No changes made.", start);

        slot.clear_expired(start + Duration::from_secs(1));
        assert!(slot.current().is_some());

        slot.clear_expired(start + NOTICE_DURATION + Duration::from_millis(1));
        assert!(slot.current().is_none());
    }
}
