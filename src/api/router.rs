use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{AppState, borrow_book, list_borrowings, list_overdue, return_book};

/// APIルーターを作成する
///
/// コマンドエンドポイント:
/// - POST /borrow - 書籍を借りる
/// - PUT /return - 書籍を返却する
///
/// クエリエンドポイント:
/// - GET /borrowings/overdue - 延滞中の貸出一覧（延滞イベントを発行）
/// - GET /borrowings/:user_id - 利用者の貸出中書籍を返却期限付きで一覧
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // ヘルスチェック
        .route("/health", get(health_check))
        // コマンドエンドポイント
        .route("/borrow", post(borrow_book))
        .route("/return", put(return_book))
        // クエリエンドポイント（静的セグメントが利用者IDより優先される）
        .route("/borrowings/overdue", get(list_overdue))
        .route("/borrowings/:user_id", get(list_borrowings))
        // トレーシングミドルウェア
        .layer(TraceLayer::new_for_http())
        // アプリケーション状態
        .with_state(state)
}

/// ヘルスチェック
async fn health_check() -> &'static str {
    "OK"
}
