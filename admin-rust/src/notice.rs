use std::{
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

/// How long a notice stays visible.
pub const NOTICE_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient status message shown after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
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

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

struct PostedNotice {
    notice: Notice,
    posted_at: Instant,
}

/// Single notice slot shared by every manager of a view.
///
/// Notices do not queue: publishing replaces whatever is shown. A notice
/// expires on its own once the board's duration has elapsed.
#[derive(Clone)]
pub struct NoticeBoard {
    slot: Arc<Mutex<Option<PostedNotice>>>,
    duration: Duration,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::with_duration(NOTICE_DURATION)
    }
}

impl NoticeBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            duration,
        }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn publish(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => tracing::debug!(message = %notice.message, "notice"),
            NoticeKind::Error => tracing::warn!(message = %notice.message, "error notice"),
        }
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(PostedNotice {
            notice,
            posted_at: Instant::now(),
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(Notice::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(Notice::error(message));
    }

    /// The notice visible right now, if any.
    #[must_use]
    pub fn current(&self) -> Option<Notice> {
        self.current_at(Instant::now())
    }

    /// The notice that is visible at `now`.
    #[must_use]
    pub fn current_at(&self, now: Instant) -> Option<Notice> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref()
            .filter(|posted| now.saturating_duration_since(posted.posted_at) < self.duration)
            .map(|posted| posted.notice.clone())
    }

    pub fn dismiss(&self) {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_expires_after_duration() {
        let board = NoticeBoard::new();
        let before = Instant::now();
        board.success("Skill added successfully!");

        assert_eq!(
            board.current_at(before + Duration::from_secs(4)),
            Some(Notice::success("Skill added successfully!"))
        );
        assert_eq!(board.current_at(Instant::now() + NOTICE_DURATION), None);
    }

    #[test]
    fn new_notice_replaces_current_one() {
        let board = NoticeBoard::new();
        board.success("Skill added successfully!");
        board.error("Error deleting skill");

        assert_eq!(board.current(), Some(Notice::error("Error deleting skill")));
        board.dismiss();
        assert_eq!(board.current(), None);
    }

    #[test]
    fn clones_share_the_slot() {
        let board = NoticeBoard::with_duration(Duration::from_secs(60));
        board.clone().success("Saved");
        assert!(board.current().is_some_and(|notice| !notice.is_error()));
    }
}
