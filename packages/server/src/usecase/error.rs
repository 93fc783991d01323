//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RepositoryError, ValueObjectError};

/// join の失敗
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// ルームキーが不正
    #[error("invalid join: {0}")]
    Invalid(#[from] ValueObjectError),

    /// 参加ポリシーにより拒否された
    #[error("not permitted to join room '{0}'")]
    NotPermitted(String),
}

/// メッセージ送信の失敗
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// 必須項目の欠落・不正（永続化もブロードキャストも行われていない）
    #[error("invalid message: {0}")]
    Invalid(#[from] ValueObjectError),

    /// 永続化に失敗した（ブロードキャストは行われていない）
    #[error("failed to persist message: {0}")]
    Persistence(#[from] RepositoryError),
}

/// 履歴削除の失敗
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PurgeHistoryError {
    #[error("failed to delete history: {0}")]
    Persistence(#[from] RepositoryError),
}
