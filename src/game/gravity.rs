//! 重力反転の管理モジュール
//! 着手数が5の倍数に達するたびに、駒の落下方向（下向き/上向き）を切り替える。

use serde::{Deserialize, Serialize};

/// 重力が反転する周期（着手数）
pub const GRAVITY_FLIP_INTERVAL: u32 = 5;

/// 駒が落ちていく方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// 通常の重力：最下段から詰まっていく
    Down,
    /// 反転した重力：最上段から詰まっていく
    Up,
}

/// 重力の向きを保持し、反転ルールを適用する構造体
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GravityController {
    inverted: bool,
}

impl GravityController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// 現在の落下方向を返す
    pub fn landing_direction(&self) -> Direction {
        if self.inverted {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    /// 着手成功後、加算済みの着手数を受け取って反転判定を行う
    /// 戻り値: このターンで反転が起きたかどうか
    pub fn on_move_applied(&mut self, turn_count: u32) -> bool {
        if turn_count > 0 && turn_count % GRAVITY_FLIP_INTERVAL == 0 {
            self.inverted = !self.inverted;
            true
        } else {
            false
        }
    }
}
