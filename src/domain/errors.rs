use thiserror::Error;

/// 入力値の検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 必須項目が空
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// 長さの上限を超えている
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}
