use async_trait::async_trait;
use thiserror::Error;

/// イベントバスへの発行エラー
#[derive(Debug, Error)]
pub enum PublishError {
    /// ペイロードのシリアライズに失敗
    #[error("failed to encode event payload")]
    Encode(#[from] serde_json::Error),

    /// イベントバスへの送信に失敗
    #[error("failed to publish to topic {topic}")]
    Transport {
        topic: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// イベントバスポート
///
/// ベストエフォートの通知チャネル。配信保証はない。
/// テストではno-op実装に差し替えられる。
#[async_trait]
pub trait EventBus: Send + Sync {
    /// トピックにペイロードを発行する
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), PublishError>;
}
