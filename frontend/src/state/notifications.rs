use leptos::*;
use std::time::Duration;
use uuid::Uuid;

use crate::utils::timer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    Ok,
    Error,
    Info,
}

impl NotificationStatus {
    pub fn default_title(self) -> &'static str {
        match self {
            NotificationStatus::Ok => "Thành công",
            NotificationStatus::Error => "Lỗi",
            NotificationStatus::Info => "Thông báo",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: String,
    pub status: NotificationStatus,
    pub title: String,
    pub message: String,
    pub duration: Duration,
}

/// Toasts in arrival order, most recent last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
}

impl NotificationQueue {
    pub fn push(
        &mut self,
        status: NotificationStatus,
        title: impl Into<String>,
        message: impl Into<String>,
        duration: Duration,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        self.entries.push(Notification {
            id: id.clone(),
            status,
            title: title.into(),
            message: message.into(),
            duration,
        });
        id
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        before != self.entries.len()
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&Notification> {
        self.entries.last()
    }
}

/// Handle to the queue provided for the current page subtree.
#[derive(Clone, Copy)]
pub struct Notifications {
    queue: RwSignal<NotificationQueue>,
}

impl Notifications {
    pub fn new() -> Self {
        Self {
            queue: create_rw_signal(NotificationQueue::default()),
        }
    }

    pub fn add(
        &self,
        status: NotificationStatus,
        title: impl Into<String>,
        message: impl Into<String>,
        duration_ms: u64,
    ) -> String {
        let duration = Duration::from_millis(duration_ms);
        let mut id = String::new();
        self.queue
            .update(|queue| id = queue.push(status, title, message, duration));
        let queue = self.queue;
        let expiring = id.clone();
        timer::after(duration, move || {
            queue.try_update(|queue| queue.remove(&expiring));
        });
        id
    }

    pub fn success(&self, message: impl Into<String>, duration_ms: u64) -> String {
        let status = NotificationStatus::Ok;
        self.add(status, status.default_title(), message, duration_ms)
    }

    pub fn error(&self, message: impl Into<String>, duration_ms: u64) -> String {
        let status = NotificationStatus::Error;
        self.add(status, status.default_title(), message, duration_ms)
    }

    pub fn info(&self, message: impl Into<String>, duration_ms: u64) -> String {
        let status = NotificationStatus::Info;
        self.add(status, status.default_title(), message, duration_ms)
    }

    pub fn remove(&self, id: &str) {
        self.queue.update(|queue| {
            queue.remove(id);
        });
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> NotificationQueue {
        self.queue.get_untracked()
    }

    pub fn entries(&self) -> Signal<Vec<Notification>> {
        let queue = self.queue;
        Signal::derive(move || queue.with(|queue| queue.entries().to_vec()))
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_notifications() -> Notifications {
    let notifications = Notifications::new();
    provide_context(notifications);
    notifications
}

pub fn use_notifications() -> Notifications {
    use_context::<Notifications>().unwrap_or_else(provide_notifications)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_stacks_in_arrival_order_with_unique_ids() {
        let mut queue = NotificationQueue::default();
        let first = queue.push(
            NotificationStatus::Ok,
            "Thành công",
            "a",
            Duration::from_millis(3000),
        );
        let second = queue.push(
            NotificationStatus::Error,
            "Lỗi",
            "b",
            Duration::from_millis(5000),
        );
        assert_ne!(first, second);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.last().map(|entry| entry.message.as_str()), Some("b"));
        assert_eq!(queue.entries()[0].duration, Duration::from_millis(3000));
    }

    #[test]
    fn removing_one_leaves_the_others() {
        let mut queue = NotificationQueue::default();
        let first = queue.push(NotificationStatus::Info, "t", "a", Duration::ZERO);
        let second = queue.push(NotificationStatus::Info, "t", "b", Duration::ZERO);
        let third = queue.push(NotificationStatus::Info, "t", "c", Duration::ZERO);
        assert!(queue.remove(&second));
        assert!(!queue.remove(&second));
        let ids: Vec<_> = queue.entries().iter().map(|entry| entry.id.clone()).collect();
        assert_eq!(ids, vec![first, third]);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn handle_adds_and_removes_entries() {
        with_runtime(|| {
            let notifications = provide_notifications();
            let id = notifications.success("Gửi yêu cầu OT thành công", 3000);
            notifications.error("Gửi yêu cầu OT thất bại: x", 5000);
            let snapshot = notifications.snapshot();
            assert_eq!(snapshot.len(), 2);
            assert_eq!(snapshot.entries()[0].title, "Thành công");
            assert_eq!(snapshot.entries()[1].status, NotificationStatus::Error);

            notifications.remove(&id);
            assert_eq!(notifications.entries().get().len(), 1);
        });
    }

    #[test]
    fn use_notifications_reuses_the_provided_queue() {
        with_runtime(|| {
            let provided = provide_notifications();
            provided.info("xin chào", 1000);
            assert_eq!(use_notifications().snapshot().len(), 1);
        });
    }
}
