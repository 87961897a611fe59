//! 盤面状態を管理するモジュール
//! 可変サイズ（rows×cols）のグリッドと駒の配置、着地点の探索を担当する。

use super::gravity::Direction;
use super::types::{Cell, Position};
use serde::{Deserialize, Serialize};

/// 可変サイズの盤面を表現する構造体
/// cells は行優先で、row 0 が最上段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
}

impl Board {
    /// 全マス空の盤面を作成する
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![Cell::Empty; cols]; rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// 行優先のセル配列への参照
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    /// 指定した位置のセル状態を取得する
    /// 範囲外の場合はNoneを返す
    pub fn get_cell(&self, position: Position) -> Option<Cell> {
        if self.contains(position) {
            Some(self.cells[position.row][position.col])
        } else {
            None
        }
    }

    /// 指定した位置にセル状態を設定する
    /// 範囲外の場合はfalseを返す
    pub(crate) fn set_cell(&mut self, position: Position, cell: Cell) -> bool {
        if self.contains(position) {
            self.cells[position.row][position.col] = cell;
            true
        } else {
            false
        }
    }

    pub fn is_empty(&self, position: Position) -> bool {
        matches!(self.get_cell(position), Some(Cell::Empty))
    }

    /// 列を重力方向から走査し、最初に見つかった空きマスの行を返す
    /// Down なら最下段から上へ、Up なら最上段から下へ探索する
    pub fn landing_row(&self, col: usize, direction: Direction) -> Option<usize> {
        if col >= self.cols {
            return None;
        }

        match direction {
            Direction::Down => (0..self.rows).rev().find(|&row| self.cells[row][col] == Cell::Empty),
            Direction::Up => (0..self.rows).find(|&row| self.cells[row][col] == Cell::Empty),
        }
    }

    /// 盤面が全て埋まっているか
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&cell| cell != Cell::Empty)
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&cell| cell == Cell::Empty).count()
    }

    /// 盤面上のプレイヤー1とプレイヤー2の駒数を数える
    /// 戻り値: (プレイヤー1, プレイヤー2)
    pub fn count_pieces(&self) -> (usize, usize) {
        let mut first = 0;
        let mut second = 0;

        for &cell in self.cells.iter().flatten() {
            match cell {
                Cell::PlayerOne => first += 1,
                Cell::PlayerTwo => second += 1,
                Cell::Empty => {}
            }
        }

        (first, second)
    }

    /// コンソール表示用の盤面文字列を生成する
    /// Xでプレイヤー1、Oでプレイヤー2、.で空マスを表現
    pub fn display(&self) -> String {
        let mut result = String::from(" ");
        for col in 0..self.cols {
            result.push_str(&format!(" {}", col));
        }
        result.push('\n');

        for row in &self.cells {
            result.push(' ');
            for &cell in row {
                let symbol = match cell {
                    Cell::Empty => ".",
                    Cell::PlayerOne => "X",
                    Cell::PlayerTwo => "O",
                };
                result.push_str(&format!(" {}", symbol));
            }
            result.push('\n');
        }

        result
    }
}
