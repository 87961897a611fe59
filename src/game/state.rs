//! ゲーム状態管理モジュール
//! 盤面、手番、着手数、重力の向き、勝敗をまとめて保持し、
//! 着手（drop_piece）を通じてのみ状態を変化させる。

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::board::Board;
use super::gravity::GravityController;
use super::random::RandomSource;
use super::rules::ConnectFourRules;
use super::setup::BoardInitializer;
use super::types::{GameStatus, Player, Position, Winner};
use crate::error::{GameError, Result};

/// 変則ルールの有効/無効
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameVariant {
    /// プリセットサイズの盤面で開始前にランダム配置を行う
    pub prefill: bool,
    /// 5手ごとに重力を反転する
    pub gravity_flip: bool,
}

impl GameVariant {
    /// 事前配置と重力反転の両方を有効にしたルール
    pub fn twisted() -> Self {
        Self {
            prefill: true,
            gravity_flip: true,
        }
    }

    /// 変則なしの通常ルール
    pub fn classic() -> Self {
        Self {
            prefill: false,
            gravity_flip: false,
        }
    }
}

impl Default for GameVariant {
    fn default() -> Self {
        Self::twisted()
    }
}

/// 1局分のゲーム全体状態を保持する構造体
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    player_one: String,
    player_two: String,
    current_player: Player,
    status: GameStatus,
    last_move: Option<Position>,
    turn_count: u32,
    gravity: GravityController,
    variant: GameVariant,
}

impl GameState {
    /// 新しいゲームを作成する
    /// 盤面サイズと名前の妥当性は呼び出し側で検証済みであること
    pub fn create<R: RandomSource + ?Sized>(
        rows: usize,
        cols: usize,
        player_one: impl Into<String>,
        player_two: impl Into<String>,
        variant: GameVariant,
        rng: &mut R,
    ) -> Self {
        let board = if variant.prefill {
            BoardInitializer::initialize(rows, cols, rng)
        } else {
            Board::new(rows, cols)
        };

        Self {
            board,
            player_one: player_one.into(),
            player_two: player_two.into(),
            current_player: Player::One,
            status: GameStatus::InProgress,
            last_move: None,
            turn_count: 0,
            gravity: GravityController::new(),
            variant,
        }
    }

    /// 6×7、変則なしの通常ゲームを作成する
    pub fn classic(player_one: impl Into<String>, player_two: impl Into<String>) -> Self {
        Self {
            board: Board::new(6, 7),
            player_one: player_one.into(),
            player_two: player_two.into(),
            current_player: Player::One,
            status: GameStatus::InProgress,
            last_move: None,
            turn_count: 0,
            gravity: GravityController::new(),
            variant: GameVariant::classic(),
        }
    }

    /// 現在の手番のプレイヤーが指定列に駒を落とす
    ///
    /// 失敗時（終了済み、列番号が範囲外、列が満杯）は状態を変更しない。
    /// 成功時は着手数の加算、重力反転判定、勝利判定、引き分け判定の順に処理し、
    /// ゲームが続く場合のみ手番を交代する。
    /// 戻り値: 駒が置かれた位置
    #[instrument(level = "debug", skip(self))]
    pub fn drop_piece(&mut self, column: i64) -> Result<Position> {
        if self.status.is_finished() {
            return Err(GameError::GameOver);
        }

        let cols = self.board.cols();
        let col = usize::try_from(column)
            .ok()
            .filter(|&col| col < cols)
            .ok_or(GameError::InvalidColumn { column, cols })?;

        let direction = self.gravity.landing_direction();
        let row = self
            .board
            .landing_row(col, direction)
            .ok_or(GameError::ColumnFull { column: col })?;

        let position = Position::new(row, col);
        let player = self.current_player;
        self.board.set_cell(position, player.to_cell());
        self.last_move = Some(position);
        self.turn_count += 1;

        // 重力反転は勝敗判定より先に行い、決着手でも記録する
        if self.variant.gravity_flip && self.gravity.on_move_applied(self.turn_count) {
            debug!(turn = self.turn_count, inverted = self.gravity.is_inverted(), "gravity flipped");
        }

        if ConnectFourRules::is_winning_move(&self.board, position) {
            self.status = GameStatus::Won(player);
            return Ok(position);
        }

        if ConnectFourRules::is_draw(&self.board) {
            self.status = GameStatus::Draw;
            return Ok(position);
        }

        self.current_player = player.opposite();
        Ok(position)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn cols(&self) -> usize {
        self.board.cols()
    }

    pub fn player_one(&self) -> &str {
        &self.player_one
    }

    pub fn player_two(&self) -> &str {
        &self.player_two
    }

    /// プレイヤーの表示名を取得する
    pub fn player_name(&self, player: Player) -> &str {
        match player {
            Player::One => &self.player_one,
            Player::Two => &self.player_two,
        }
    }

    /// 現在の手番（終了後はNone）
    pub fn current_player(&self) -> Option<Player> {
        if self.status.is_finished() {
            None
        } else {
            Some(self.current_player)
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn winner(&self) -> Winner {
        self.status.winner()
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn is_gravity_inverted(&self) -> bool {
        self.gravity.is_inverted()
    }

    pub fn variant(&self) -> GameVariant {
        self.variant
    }
}
