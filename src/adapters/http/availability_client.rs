use crate::domain::BookId;
use crate::ports::availability_service::{
    AvailabilityError, AvailabilityService as AvailabilityServiceTrait, Result,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 書籍サービスの書籍リソース（必要な項目のみ）
#[derive(Debug, Deserialize)]
struct BookResource {
    available: bool,
}

/// 在庫状態の更新リクエスト
#[derive(Debug, Serialize)]
struct AvailabilityUpdate {
    available: bool,
}

/// AvailabilityServiceのHTTP実装
///
/// 書籍サービスの`/books/{bookId}`リソースに対して
/// GET（確認）とPUT（更新）を1回ずつ発行する。リトライはしない。
#[derive(Clone)]
pub struct AvailabilityClient {
    client: Client,
    base_url: Url,
}

impl AvailabilityClient {
    /// ベースURLとタイムアウトからクライアントを作成する
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    /// 既存のreqwestクライアント（コネクションプール）を共有して作成する
    pub fn with_client(client: Client, base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("availability service URL cannot be a base: {base_url}");
        }
        Ok(Self { client, base_url })
    }

    /// 書籍リソースのURL
    ///
    /// 書籍IDはパスセグメントとしてパーセントエンコードされる。
    fn book_url(&self, book_id: &BookId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("books").push(book_id.as_str());
        }
        url
    }

    fn check_status(status: StatusCode, book_id: &BookId) -> Result<()> {
        if status == StatusCode::NOT_FOUND {
            return Err(AvailabilityError::NotFound(book_id.clone()));
        }
        if !status.is_success() {
            return Err(AvailabilityError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

fn unreachable(e: reqwest::Error) -> AvailabilityError {
    AvailabilityError::Unreachable(Box::new(e))
}

#[async_trait]
impl AvailabilityServiceTrait for AvailabilityClient {
    async fn is_available(&self, book_id: &BookId) -> Result<bool> {
        let url = self.book_url(book_id);
        tracing::debug!(%url, "Checking book availability");

        let response = self.client.get(url).send().await.map_err(unreachable)?;
        Self::check_status(response.status(), book_id)?;

        let book: BookResource = response.json().await.map_err(unreachable)?;
        Ok(book.available)
    }

    async fn set_available(&self, book_id: &BookId, available: bool) -> Result<()> {
        let url = self.book_url(book_id);
        tracing::debug!(%url, available, "Updating book availability");

        let response = self
            .client
            .put(url)
            .json(&AvailabilityUpdate { available })
            .send()
            .await
            .map_err(unreachable)?;

        Self::check_status(response.status(), book_id)
    }
}
