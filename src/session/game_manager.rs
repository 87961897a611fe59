//! ゲームセッション管理モジュール
//! 同時に1局だけ存在するアクティブゲームを保持し、
//! 作成リクエストの検証、着手の直列化、リセットを担当する。

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::dto::{GameSnapshot, NewGameRequest};
use crate::config::{BoardLimits, Config};
use crate::error::{SessionError, SessionResult};
use crate::game::{GameState, GameVariant, RandomSource, StdRandomSource};

/// 現在進行中の1局とそのメタデータ
#[derive(Debug, Clone)]
pub struct ActiveGame {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_move_at: Option<DateTime<Utc>>,
    pub state: GameState,
}

/// アクティブゲームの概要
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_move_at: Option<DateTime<Utc>>,
    pub turn_count: u32,
    pub game_over: bool,
}

/// 単一ゲームのセッション管理を行うメイン構造体
/// 書き込みロックで着手を直列化し、エンジン側はロックを持たない
#[derive(Debug, Clone)]
pub struct GameManager {
    active: Arc<RwLock<Option<ActiveGame>>>,
    limits: BoardLimits,
    variant: GameVariant,
    /// 設定されていれば n 局目の乱数を seed + n で初期化する
    seed: Option<u64>,
    games_created: Arc<AtomicU64>,
}

impl GameManager {
    pub fn new(limits: BoardLimits, variant: GameVariant, seed: Option<u64>) -> Self {
        Self {
            active: Arc::new(RwLock::new(None)),
            limits,
            variant,
            seed,
            games_created: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.board.clone(),
            config.variants.to_variant(),
            config.random.seed,
        )
    }

    /// 作成リクエストの盤面サイズと名前を検証する
    pub fn validate(&self, request: &NewGameRequest) -> SessionResult<()> {
        let limits = &self.limits;
        if request.rows < limits.min_rows || request.rows > limits.max_rows {
            return Err(SessionError::InvalidDimension {
                field: "rows",
                value: request.rows,
                min: limits.min_rows,
                max: limits.max_rows,
            });
        }

        if request.cols < limits.min_cols || request.cols > limits.max_cols {
            return Err(SessionError::InvalidDimension {
                field: "cols",
                value: request.cols,
                min: limits.min_cols,
                max: limits.max_cols,
            });
        }

        if request.player1.is_empty() {
            return Err(SessionError::EmptyPlayerName { slot: "player1" });
        }

        if request.player2.is_empty() {
            return Err(SessionError::EmptyPlayerName { slot: "player2" });
        }

        Ok(())
    }

    /// 新しいゲームを作成し、既存のゲームを置き換える
    /// 乱数ソースは1局ごとに新しく用意する
    /// 拒否されたリクエストは局番号を消費しない
    pub async fn new_game(&self, request: NewGameRequest) -> SessionResult<GameSnapshot> {
        self.validate(&request)?;
        let game_number = self.games_created.fetch_add(1, Ordering::Relaxed);
        let mut rng = match self.seed {
            Some(seed) => StdRandomSource::seeded(seed.wrapping_add(game_number)),
            None => StdRandomSource::from_entropy(),
        };

        self.new_game_with_rng(request, &mut rng).await
    }

    /// 呼び出し側が用意した乱数ソースでゲームを作成する
    pub async fn new_game_with_rng<R: RandomSource + ?Sized>(
        &self,
        request: NewGameRequest,
        rng: &mut R,
    ) -> SessionResult<GameSnapshot> {
        self.validate(&request)?;

        let state = GameState::create(
            request.rows,
            request.cols,
            request.player1,
            request.player2,
            self.variant,
            rng,
        );
        let snapshot = GameSnapshot::from_game_state(&state);

        let id = Uuid::new_v4();
        let (first, second) = state.board().count_pieces();
        info!(
            game_id = %id,
            rows = state.rows(),
            cols = state.cols(),
            prefilled = first + second,
            "game created"
        );

        let mut active = self.active.write().await;
        *active = Some(ActiveGame {
            id,
            created_at: Utc::now(),
            last_move_at: None,
            state,
        });

        Ok(snapshot)
    }

    /// アクティブゲームの手番プレイヤーが指定列に駒を落とす
    pub async fn drop_piece(&self, column: i64) -> SessionResult<GameSnapshot> {
        let mut guard = self.active.write().await;
        let active = guard.as_mut().ok_or(SessionError::NoActiveGame)?;

        match active.state.drop_piece(column) {
            Ok(position) => {
                active.last_move_at = Some(Utc::now());
                let state = &active.state;
                debug!(
                    game_id = %active.id,
                    row = position.row,
                    col = position.col,
                    turn = state.turn_count(),
                    inverse_gravity = state.is_gravity_inverted(),
                    "piece dropped"
                );
                if state.is_finished() {
                    info!(game_id = %active.id, winner = ?state.winner(), turns = state.turn_count(), "game over");
                }
                Ok(GameSnapshot::from_game_state(state))
            }
            Err(e) => {
                warn!(game_id = %active.id, column, error = %e, "move rejected");
                Err(e.into())
            }
        }
    }

    /// アクティブゲームの現在状態を取得する
    pub async fn get_state(&self) -> SessionResult<GameSnapshot> {
        let guard = self.active.read().await;
        guard
            .as_ref()
            .map(|active| GameSnapshot::from_game_state(&active.state))
            .ok_or(SessionError::NoActiveGame)
    }

    /// コンソール表示用の盤面文字列
    pub async fn board_display(&self) -> SessionResult<String> {
        let guard = self.active.read().await;
        guard
            .as_ref()
            .map(|active| active.state.board().display())
            .ok_or(SessionError::NoActiveGame)
    }

    pub async fn info(&self) -> SessionResult<SessionInfo> {
        let guard = self.active.read().await;
        guard
            .as_ref()
            .map(|active| SessionInfo {
                id: active.id,
                created_at: active.created_at,
                last_move_at: active.last_move_at,
                turn_count: active.state.turn_count(),
                game_over: active.state.is_finished(),
            })
            .ok_or(SessionError::NoActiveGame)
    }

    /// アクティブゲームを破棄する
    /// 戻り値: 破棄したゲームが存在したか
    pub async fn reset(&self) -> bool {
        let mut guard = self.active.write().await;
        match guard.take() {
            Some(active) => {
                info!(game_id = %active.id, "game reset");
                true
            }
            None => false,
        }
    }

    pub async fn has_active_game(&self) -> bool {
        self.active.read().await.is_some()
    }
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new(BoardLimits::default(), GameVariant::default(), None)
    }
}
