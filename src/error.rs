//! アプリケーション全体のエラー定義モジュール
//! ゲームエンジン、セッション層、コマンド入力のエラーを統一管理。

use thiserror::Error;

/// ゲームエンジン（着手処理）に関連するエラー
/// いずれも回復可能で、失敗時に盤面状態は一切変化しない
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Game already finished")]
    GameOver,

    #[error("Invalid column: {column} (must be between 0 and {max})", max = .cols.saturating_sub(1))]
    InvalidColumn { column: i64, cols: usize },

    #[error("Column {column} is full")]
    ColumnFull { column: usize },
}

/// セッション層（単一のアクティブゲーム管理）に関連するエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No game in progress")]
    NoActiveGame,

    #[error("{field} must be between {min} and {max} (got {value})")]
    InvalidDimension {
        field: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("Player name for {slot} must not be empty")]
    EmptyPlayerName { slot: &'static str },

    #[error("{source}")]
    Game {
        #[from]
        source: GameError,
    },
}

/// コマンド入力の解析・実行に関連するエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {command}")]
    UnknownCommand { command: String },

    #[error("Missing argument: {name}")]
    MissingArgument { name: &'static str },

    #[error("Invalid argument {name}: {value}")]
    InvalidArgument { name: &'static str, value: String },

    #[error("{source}")]
    Session {
        #[from]
        source: SessionError,
    },
}

/// ゲームエラーをベースとした結果型
pub type Result<T> = std::result::Result<T, GameError>;

/// セッション操作の結果型
pub type SessionResult<T> = std::result::Result<T, SessionError>;
