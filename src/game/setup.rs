//! 盤面の初期化モジュール
//! 空の盤面を作成し、難易度プリセットに応じてランダムな駒を事前配置する。

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::board::Board;
use super::gravity::Direction;
use super::random::RandomSource;
use super::types::{Cell, Position};

/// 盤面サイズで識別される難易度プリセット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// プリセットの盤面サイズ (rows, cols)
    pub fn dimensions(self) -> (usize, usize) {
        match self {
            Difficulty::Easy => (6, 7),
            Difficulty::Normal => (6, 9),
            Difficulty::Hard => (7, 8),
        }
    }

    /// 開始前に置かれる駒の数
    pub fn prefill_count(self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Normal => 5,
            Difficulty::Hard => 7,
        }
    }

    /// 盤面サイズが完全一致するプリセットを探す
    pub fn from_dimensions(rows: usize, cols: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.dimensions() == (rows, cols))
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "easy" | "facile" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" | "difficile" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// 盤面サイズから事前配置数を求める。プリセット以外のサイズは0
pub fn prefill_count(rows: usize, cols: usize) -> usize {
    Difficulty::from_dimensions(rows, cols)
        .map(Difficulty::prefill_count)
        .unwrap_or(0)
}

/// 盤面の生成と事前配置を行う構造体
/// スタティックメソッドのみを提供する
pub struct BoardInitializer;

impl BoardInitializer {
    /// rows×cols の盤面を作り、サイズに応じた数の駒をランダムに配置する
    pub fn initialize<R: RandomSource + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Board {
        let mut board = Board::new(rows, cols);
        let count = prefill_count(rows, cols);

        if count > 0 {
            let placed = Self::scatter_pieces(&mut board, count, rng);
            debug!(rows, cols, placed, "prefilled board");
        }

        board
    }

    /// ランダムな列に通常重力で駒を落とし、所有者も50/50で決める
    /// 満杯の列を引いた場合は列を引き直す。配置数は空きマス数で打ち切る
    /// 戻り値: 実際に配置した駒の数
    pub fn scatter_pieces<R: RandomSource + ?Sized>(board: &mut Board, count: usize, rng: &mut R) -> usize {
        let target = count.min(board.empty_count());
        let mut placed = 0;

        while placed < target {
            let col = rng.next_in_range(board.cols());

            if let Some(row) = board.landing_row(col, Direction::Down) {
                let cell = if rng.next_in_range(2) == 0 {
                    Cell::PlayerOne
                } else {
                    Cell::PlayerTwo
                };
                board.set_cell(Position::new(row, col), cell);
                placed += 1;
            }
        }

        placed
    }
}
