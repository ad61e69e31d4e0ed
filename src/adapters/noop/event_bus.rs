use crate::ports::event_bus::{EventBus as EventBusTrait, PublishError};
use async_trait::async_trait;

/// 発行されたイベントを破棄するEventBus実装
///
/// Redisに接続できない場合の代替。イベントはベストエフォートなので、
/// 捨てても貸出・返却の結果は変わらない。
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBus;

#[async_trait]
impl EventBusTrait for EventBus {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), PublishError> {
        tracing::debug!(topic, bytes = payload.len(), "Event dropped (no event bus)");
        Ok(())
    }
}
