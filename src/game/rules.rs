//! 四目並べの勝敗判定モジュール
//! 直前に置かれた駒を起点に4方向の連続数を数える勝利判定と、
//! 盤面が埋まったかどうかの引き分け判定を担当する。

use super::board::Board;
use super::types::{Cell, Position};

/// 勝利に必要な連続数
pub const CONNECT: usize = 4;

/// 判定する4方向の移動ベクトル
/// 逆方向は符号を反転して探索する
const DIRECTIONS: [(isize, isize); 4] = [
    (0, 1),  // 横
    (1, 0),  // 縦
    (1, 1),  // 右下がりの斜め
    (1, -1), // 左下がりの斜め
];

/// 四目並べのルールを実装する構造体
/// スタティックメソッドのみを提供する
pub struct ConnectFourRules;

impl ConnectFourRules {
    /// 指定位置の駒が4つ以上の並びを完成させているか判定する
    /// 空マスや範囲外を指定した場合はfalse
    pub fn is_winning_move(board: &Board, position: Position) -> bool {
        let cell = match board.get_cell(position) {
            Some(Cell::Empty) | None => return false,
            Some(cell) => cell,
        };

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let total = 1
                + Self::count_direction(board, position, dr, dc, cell)
                + Self::count_direction(board, position, -dr, -dc, cell);
            total >= CONNECT
        })
    }

    /// 起点を含まずに、指定方向へ同じ駒が何個連続しているか数える
    /// 範囲外か異なるセル（空を含む）に当たった時点で止まる
    pub fn count_direction(board: &Board, origin: Position, dr: isize, dc: isize, cell: Cell) -> usize {
        let mut count = 0;
        let mut row = origin.row as isize + dr;
        let mut col = origin.col as isize + dc;

        while row >= 0 && col >= 0 {
            let position = Position::new(row as usize, col as usize);
            if board.get_cell(position) != Some(cell) {
                break;
            }
            count += 1;
            row += dr;
            col += dc;
        }

        count
    }

    /// 引き分け判定（盤面が全て埋まっている）
    /// 勝利判定が偽だった着手の後にのみ呼び出すこと
    pub fn is_draw(board: &Board) -> bool {
        board.is_full()
    }
}
