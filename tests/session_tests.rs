//! セッション層の統合テスト
//! 単一ゲームの作成、着手、リセットと、同時着手時の直列化を確認する。

use futures::future::join_all;

use ConnectFour::{
    api::NewGameRequest,
    config::BoardLimits,
    error::{GameError, SessionError},
    game::{Cell, GameVariant, Position, ScriptedRandomSource, Winner},
    session::GameManager,
};

fn request(rows: usize, cols: usize) -> NewGameRequest {
    NewGameRequest {
        rows,
        cols,
        player1: "Alice".to_string(),
        player2: "Bob".to_string(),
    }
}

fn classic_manager() -> GameManager {
    GameManager::new(BoardLimits::default(), GameVariant::classic(), None)
}

#[tokio::test]
async fn test_easy_preset_starts_with_three_pieces() {
    let manager = GameManager::default();
    let mut rng = ScriptedRandomSource::new(vec![4, 1, 4, 0, 0, 1]);

    let snapshot = manager.new_game_with_rng(request(6, 7), &mut rng).await.unwrap();

    let filled: Vec<Cell> = snapshot
        .board
        .iter()
        .flatten()
        .copied()
        .filter(|cell| *cell != Cell::Empty)
        .collect();
    assert_eq!(filled.len(), 3);
    assert_eq!(snapshot.board[5][4], Cell::PlayerTwo);
    assert_eq!(snapshot.board[4][4], Cell::PlayerOne);
    assert_eq!(snapshot.board[5][0], Cell::PlayerTwo);
    assert_eq!(snapshot.turn_count, 0);
    assert_eq!(snapshot.last_move, None);

    // getState は作成直後と同じ内容を返す
    assert_eq!(manager.get_state().await.unwrap(), snapshot);
}

#[tokio::test]
async fn test_full_game_through_manager() {
    let manager = classic_manager();
    manager.new_game(request(6, 7)).await.unwrap();

    for col in [0, 1, 0, 1, 0, 1] {
        let snapshot = manager.drop_piece(col).await.unwrap();
        assert!(!snapshot.game_over);
    }

    let snapshot = manager.drop_piece(0).await.unwrap();
    assert!(snapshot.game_over);
    assert_eq!(snapshot.winner, Winner::PlayerOne);
    assert_eq!(snapshot.current_player, Cell::Empty);
    assert_eq!(snapshot.last_move, Some(Position::new(2, 0)));

    let result = manager.drop_piece(3).await;
    assert_eq!(result, Err(SessionError::Game { source: GameError::GameOver }));
}

#[tokio::test]
async fn test_new_game_replaces_existing_one() {
    let manager = classic_manager();
    manager.new_game(request(6, 7)).await.unwrap();
    manager.drop_piece(3).await.unwrap();
    let first_id = manager.info().await.unwrap().id;

    let snapshot = manager.new_game(request(5, 5)).await.unwrap();
    assert_eq!((snapshot.rows, snapshot.cols), (5, 5));
    assert_eq!(snapshot.turn_count, 0);
    assert_ne!(manager.info().await.unwrap().id, first_id);
}

#[tokio::test]
async fn test_invalid_request_keeps_current_game() {
    let manager = classic_manager();
    manager.new_game(request(6, 7)).await.unwrap();
    manager.drop_piece(2).await.unwrap();

    let result = manager.new_game(request(12, 7)).await;
    assert!(matches!(result, Err(SessionError::InvalidDimension { field: "rows", .. })));
    assert_eq!(manager.get_state().await.unwrap().turn_count, 1);
}

#[tokio::test]
async fn test_reset_is_idempotent() {
    let manager = classic_manager();
    manager.new_game(request(4, 4)).await.unwrap();

    assert!(manager.reset().await);
    assert!(!manager.reset().await);
    assert_eq!(manager.get_state().await, Err(SessionError::NoActiveGame));
    assert_eq!(manager.board_display().await, Err(SessionError::NoActiveGame));
}

#[tokio::test]
async fn test_concurrent_drops_are_serialized() {
    let manager = classic_manager();
    manager.new_game(request(10, 10)).await.unwrap();

    // 同じ列への同時着手でも、駒は重ならずに積まれる
    let results = join_all((0..8).map(|_| manager.drop_piece(4))).await;
    assert!(results.iter().all(|result| result.is_ok()));

    let snapshot = manager.get_state().await.unwrap();
    assert_eq!(snapshot.turn_count, 8);
    let column: Vec<Cell> = (2..10).map(|row| snapshot.board[row][4]).collect();
    assert!(column.iter().all(|cell| *cell != Cell::Empty));
    assert_eq!(snapshot.board[1][4], Cell::Empty);
}

#[tokio::test]
async fn test_concurrent_drops_from_cloned_handles() {
    let manager = classic_manager();
    manager.new_game(request(10, 10)).await.unwrap();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let manager = manager.clone();
            tokio::spawn(async move { manager.drop_piece(7).await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    let snapshot = manager.get_state().await.unwrap();
    assert_eq!(snapshot.turn_count, 10);
    assert!(snapshot.board.iter().all(|row| row[7] != Cell::Empty));

    let result = manager.drop_piece(7).await;
    assert_eq!(result, Err(SessionError::Game { source: GameError::ColumnFull { column: 7 } }));
}

#[tokio::test]
async fn test_rejected_request_does_not_shift_seed() {
    let with_rejection = GameManager::new(BoardLimits::default(), GameVariant::twisted(), Some(3));
    let fresh = GameManager::new(BoardLimits::default(), GameVariant::twisted(), Some(3));

    assert!(with_rejection.new_game(request(2, 7)).await.is_err());
    let mut unnamed = request(7, 8);
    unnamed.player1 = String::new();
    assert!(with_rejection.new_game(unnamed).await.is_err());

    let first = with_rejection.new_game(request(7, 8)).await.unwrap();
    let second = fresh.new_game(request(7, 8)).await.unwrap();
    assert_eq!(first.board, second.board);
}

#[tokio::test]
async fn test_blank_names_are_accepted() {
    let manager = classic_manager();
    let mut req = request(6, 7);
    req.player1 = " ".to_string();

    let snapshot = manager.new_game(req).await.unwrap();
    assert_eq!(snapshot.player1, " ");
}
