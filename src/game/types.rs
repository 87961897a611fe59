//! ゲームの基本型定義モジュール
//! 盤面のマス、プレイヤー、座標、ゲーム進行状態などの基本型を定義する。
//! 通信用のマーカー文字列（"", "player1", "player2", "draw"）への変換は
//! serdeのrename属性のみで行い、ロジック側では常にenumで扱う。

use serde::{Deserialize, Serialize};

/// 盤面の各マスの状態を表現するenum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[serde(rename = "")]
    Empty,
    #[serde(rename = "player1")]
    PlayerOne,
    #[serde(rename = "player2")]
    PlayerTwo,
}

impl Cell {
    /// マスを占有しているプレイヤーを返す（空ならNone）
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
        }
    }
}

/// ゲームのプレイヤーを表すenum
/// 先手は常にプレイヤー1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    #[serde(rename = "player1")]
    One,
    #[serde(rename = "player2")]
    Two,
}

impl Player {
    /// 相手プレイヤーを返す
    pub fn opposite(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// プレイヤーを対応するセル状態に変換する
    pub fn to_cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

/// 盤面上の座標（row 0 が最上段）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// ゲームの進行状態
/// 勝者と引き分けは排他的で、一度Finished系に遷移したら戻らない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

impl GameStatus {
    pub fn is_finished(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// 外部公開用の勝者表現に変換する
    pub fn winner(self) -> Winner {
        match self {
            GameStatus::InProgress => Winner::None,
            GameStatus::Won(Player::One) => Winner::PlayerOne,
            GameStatus::Won(Player::Two) => Winner::PlayerTwo,
            GameStatus::Draw => Winner::Draw,
        }
    }
}

/// シリアライズ用の勝者表現
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    #[serde(rename = "")]
    None,
    #[serde(rename = "player1")]
    PlayerOne,
    #[serde(rename = "player2")]
    PlayerTwo,
    #[serde(rename = "draw")]
    Draw,
}
