//! 外部公開用のデータ転送オブジェクト定義
//! フィールド名と形は既存クライアントとの互換のため固定。

use serde::{Deserialize, Serialize};

use crate::game::{Cell, GameState, Position, Winner};

/// ゲーム状態のシリアライズ表現
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// 行優先、各要素は "" / "player1" / "player2"
    pub board: Vec<Vec<Cell>>,
    /// 手番のプレイヤー。終了後は ""
    pub current_player: Cell,
    pub player1: String,
    pub player2: String,
    pub game_over: bool,
    pub winner: Winner,
    pub last_move: Option<Position>,
    pub turn_count: u32,
    pub inverse_gravity: bool,
}

impl GameSnapshot {
    pub fn from_game_state(game_state: &GameState) -> Self {
        Self {
            rows: game_state.rows(),
            cols: game_state.cols(),
            board: game_state.board().cells().to_vec(),
            current_player: game_state
                .current_player()
                .map(|player| player.to_cell())
                .unwrap_or(Cell::Empty),
            player1: game_state.player_one().to_string(),
            player2: game_state.player_two().to_string(),
            game_over: game_state.is_finished(),
            winner: game_state.winner(),
            last_move: game_state.last_move(),
            turn_count: game_state.turn_count(),
            inverse_gravity: game_state.is_gravity_inverted(),
        }
    }
}

/// ゲーム作成リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameRequest {
    pub rows: usize,
    pub cols: usize,
    pub player1: String,
    pub player2: String,
}

/// 着手リクエスト
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRequest {
    pub col: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// リセット応答。破棄したゲームがあったかを添える
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub message: String,
    pub had_game: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameVariant, ScriptedRandomSource};
    use serde_json::json;

    #[test]
    fn test_fresh_snapshot_json() {
        let mut rng = ScriptedRandomSource::new(vec![0]);
        let game = GameState::create(4, 5, "Alice", "Bob", GameVariant::twisted(), &mut rng);
        let value = serde_json::to_value(GameSnapshot::from_game_state(&game)).unwrap();

        assert_eq!(value["rows"], json!(4));
        assert_eq!(value["cols"], json!(5));
        assert_eq!(value["board"][3], json!(["", "", "", "", ""]));
        assert_eq!(value["currentPlayer"], json!("player1"));
        assert_eq!(value["player1"], json!("Alice"));
        assert_eq!(value["player2"], json!("Bob"));
        assert_eq!(value["gameOver"], json!(false));
        assert_eq!(value["winner"], json!(""));
        assert_eq!(value["lastMove"], json!(null));
        assert_eq!(value["turnCount"], json!(0));
        assert_eq!(value["inverseGravity"], json!(false));
    }

    #[test]
    fn test_finished_snapshot_json() {
        let mut game = GameState::classic("Alice", "Bob");
        for col in [0, 1, 0, 1, 0, 1, 0] {
            game.drop_piece(col).unwrap();
        }

        let value = serde_json::to_value(GameSnapshot::from_game_state(&game)).unwrap();
        assert_eq!(value["gameOver"], json!(true));
        assert_eq!(value["winner"], json!("player1"));
        assert_eq!(value["currentPlayer"], json!(""));
        assert_eq!(value["lastMove"], json!({"row": 2, "col": 0}));
        assert_eq!(value["board"][5][0], json!("player1"));
        assert_eq!(value["board"][5][1], json!("player2"));
    }

    #[test]
    fn test_requests_deserialize() {
        let request: NewGameRequest =
            serde_json::from_str(r#"{"rows": 6, "cols": 7, "player1": "A", "player2": "B"}"#).unwrap();
        assert_eq!(request.rows, 6);
        assert_eq!(request.player2, "B");

        let drop: DropRequest = serde_json::from_str(r#"{"col": -1}"#).unwrap();
        assert_eq!(drop.col, -1);
    }
}
