use crate::domain::{BookId, BookReturned, BorrowOverdue, UserId};
use crate::ports::{EventBus, PublishError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// 貸出イベントの発行者
///
/// 返却と延滞の通知をイベントバスに送る。
/// 発行はベストエフォートで、失敗はログに記録するだけで呼び出し元には返さない。
#[derive(Clone)]
pub struct EventPublisher {
    bus: Arc<dyn EventBus>,
    returned_topic: String,
    overdue_topic: String,
}

impl EventPublisher {
    pub fn new(
        bus: Arc<dyn EventBus>,
        returned_topic: impl Into<String>,
        overdue_topic: impl Into<String>,
    ) -> Self {
        Self {
            bus,
            returned_topic: returned_topic.into(),
            overdue_topic: overdue_topic.into(),
        }
    }

    pub fn returned_topic(&self) -> &str {
        &self.returned_topic
    }

    pub fn overdue_topic(&self) -> &str {
        &self.overdue_topic
    }

    /// 返却イベントを発行する
    pub async fn publish_returned(
        &self,
        user_id: &UserId,
        book_id: &BookId,
        returned_at: DateTime<Utc>,
    ) {
        let event = BookReturned {
            user_id: user_id.clone(),
            book_id: book_id.clone(),
            returned_at,
        };
        self.fire(&self.returned_topic, &event).await;
    }

    /// 延滞イベントを発行する
    pub async fn publish_overdue(
        &self,
        user_id: &UserId,
        book_id: &BookId,
        borrow_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
        detected_at: DateTime<Utc>,
    ) {
        let event = BorrowOverdue {
            user_id: user_id.clone(),
            book_id: book_id.clone(),
            borrow_date,
            due_date,
            detected_at,
        };
        self.fire(&self.overdue_topic, &event).await;
    }

    async fn fire<E: Serialize>(&self, topic: &str, event: &E) {
        if let Err(e) = self.try_publish(topic, event).await {
            tracing::warn!(topic, error = %e, "Dropping event after publish failure");
        }
    }

    async fn try_publish<E: Serialize>(&self, topic: &str, event: &E) -> Result<(), PublishError> {
        let payload = serde_json::to_vec(event)?;
        self.bus.publish(topic, payload).await
    }
}
