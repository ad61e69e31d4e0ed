use crate::ports::event_bus::{EventBus as EventBusTrait, PublishError};
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

/// EventBusのRedis Pub/Sub実装
///
/// `PUBLISH topic payload`を1回発行する。購読者がいなくても成功とみなす。
#[derive(Clone)]
pub struct EventBus {
    connection: ConnectionManager,
}

impl EventBus {
    /// Redisに接続し、疎通を確認してから作成する
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let client = redis::Client::open(url)?;
        let mut connection = ConnectionManager::new(client).await?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut connection)
            .await?;

        Ok(Self { connection })
    }
}

#[async_trait]
impl EventBusTrait for EventBus {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), PublishError> {
        let mut connection = self.connection.clone();
        let receivers: i64 = connection
            .publish(topic, payload)
            .await
            .map_err(|e| PublishError::Transport {
                topic: topic.to_string(),
                source: Box::new(e),
            })?;

        tracing::debug!(topic, receivers, "Event published");
        Ok(())
    }
}
