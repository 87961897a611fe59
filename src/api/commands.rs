//! 行単位のコマンド入力を解析し、セッション層を呼び出すモジュール
//! new / drop / state / reset の4操作に加え、preset / show / info / quit を扱う。
//! new と drop は位置引数のほか、JSONボディ（{"rows":6,...} / {"col":3}）も受け付ける。

use serde::Serialize;

use super::dto::{DropRequest, ErrorResponse, GameSnapshot, MessageResponse, NewGameRequest, ResetResponse};
use crate::error::CommandError;
use crate::game::Difficulty;
use crate::session::{GameManager, SessionInfo};

/// 解析済みのコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New(NewGameRequest),
    Preset {
        difficulty: Difficulty,
        player1: String,
        player2: String,
    },
    Drop(DropRequest),
    State,
    Show,
    Info,
    Reset,
    Quit,
}

/// コマンド実行結果
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Reply {
    State(GameSnapshot),
    Info(SessionInfo),
    Reset(ResetResponse),
    Message(MessageResponse),
    Error(ErrorResponse),
    #[serde(skip)]
    Board(String),
}

impl Reply {
    pub fn message(text: impl Into<String>) -> Self {
        Reply::Message(MessageResponse { message: text.into() })
    }

    pub fn from_error(error: &CommandError) -> Self {
        Reply::Error(ErrorResponse {
            error: error.to_string(),
        })
    }

    /// 出力用の文字列にする。盤面表示以外は1行のJSON
    pub fn render(&self) -> String {
        match self {
            Reply::Board(text) => text.clone(),
            other => serde_json::to_string(other)
                .unwrap_or_else(|e| format!("{{\"error\":\"serialization failed: {}\"}}", e)),
        }
    }
}

fn next_arg<'a>(args: &mut impl Iterator<Item = &'a str>, name: &'static str) -> Result<&'a str, CommandError> {
    args.next().ok_or(CommandError::MissingArgument { name })
}

fn parse_number<T: std::str::FromStr>(value: &str, name: &'static str) -> Result<T, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidArgument {
        name,
        value: value.to_string(),
    })
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &str, name: &'static str) -> Result<T, CommandError> {
    serde_json::from_str(body).map_err(|_| CommandError::InvalidArgument {
        name,
        value: body.to_string(),
    })
}

impl Command {
    /// 1行のテキストをコマンドに変換する
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let line = line.trim();
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };
        let mut args = rest.split_whitespace();

        match keyword.to_lowercase().as_str() {
            "new" if rest.starts_with('{') => Ok(Command::New(parse_json(rest, "body")?)),
            "new" => {
                let rows = parse_number(next_arg(&mut args, "rows")?, "rows")?;
                let cols = parse_number(next_arg(&mut args, "cols")?, "cols")?;
                let player1 = next_arg(&mut args, "player1")?.to_string();
                let player2 = next_arg(&mut args, "player2")?.to_string();
                Ok(Command::New(NewGameRequest { rows, cols, player1, player2 }))
            }
            "preset" => {
                let name = next_arg(&mut args, "difficulty")?;
                let difficulty = Difficulty::from_name(name).ok_or_else(|| CommandError::InvalidArgument {
                    name: "difficulty",
                    value: name.to_string(),
                })?;
                let player1 = next_arg(&mut args, "player1")?.to_string();
                let player2 = next_arg(&mut args, "player2")?.to_string();
                Ok(Command::Preset { difficulty, player1, player2 })
            }
            "drop" if rest.starts_with('{') => Ok(Command::Drop(parse_json(rest, "body")?)),
            "drop" => {
                let col = parse_number(next_arg(&mut args, "col")?, "col")?;
                Ok(Command::Drop(DropRequest { col }))
            }
            "state" => Ok(Command::State),
            "show" => Ok(Command::Show),
            "info" => Ok(Command::Info),
            "reset" => Ok(Command::Reset),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::UnknownCommand {
                command: keyword.to_string(),
            }),
        }
    }
}

/// コマンドをセッション層に対して実行する
pub async fn execute(manager: &GameManager, command: Command) -> Result<Reply, CommandError> {
    let reply = match command {
        Command::New(request) => Reply::State(manager.new_game(request).await?),
        Command::Preset { difficulty, player1, player2 } => {
            let (rows, cols) = difficulty.dimensions();
            let request = NewGameRequest { rows, cols, player1, player2 };
            Reply::State(manager.new_game(request).await?)
        }
        Command::Drop(request) => Reply::State(manager.drop_piece(request.col).await?),
        Command::State => Reply::State(manager.get_state().await?),
        Command::Show => Reply::Board(manager.board_display().await?),
        Command::Info => Reply::Info(manager.info().await?),
        Command::Reset => {
            let had_game = manager.reset().await;
            Reply::Reset(ResetResponse {
                message: "game reset".to_string(),
                had_game,
            })
        }
        Command::Quit => Reply::message("bye"),
    };

    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_new_positional() {
        let command = Command::parse("new 6 7 Alice Bob").unwrap();
        assert_eq!(
            command,
            Command::New(NewGameRequest {
                rows: 6,
                cols: 7,
                player1: "Alice".to_string(),
                player2: "Bob".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_json_bodies() {
        let command = Command::parse(r#"new {"rows": 7, "cols": 8, "player1": "A", "player2": "B"}"#).unwrap();
        assert!(matches!(command, Command::New(NewGameRequest { rows: 7, cols: 8, .. })));

        let command = Command::parse(r#"drop {"col": -1}"#).unwrap();
        assert_eq!(command, Command::Drop(DropRequest { col: -1 }));
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("  STATE ").unwrap(), Command::State);
        assert_eq!(Command::parse("reset").unwrap(), Command::Reset);
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
        assert_eq!(
            Command::parse("preset hard A B").unwrap(),
            Command::Preset {
                difficulty: Difficulty::Hard,
                player1: "A".to_string(),
                player2: "B".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("jump 3"),
            Err(CommandError::UnknownCommand { command: "jump".to_string() })
        );
        assert_eq!(
            Command::parse("drop"),
            Err(CommandError::MissingArgument { name: "col" })
        );
        assert_eq!(
            Command::parse("drop three"),
            Err(CommandError::InvalidArgument { name: "col", value: "three".to_string() })
        );
        assert!(matches!(
            Command::parse("preset extreme A B"),
            Err(CommandError::InvalidArgument { name: "difficulty", .. })
        ));
    }

    #[test]
    fn test_error_reply_render() {
        let reply = Reply::from_error(&CommandError::MissingArgument { name: "col" });
        assert_eq!(reply.render(), r#"{"error":"Missing argument: col"}"#);
        assert_eq!(Reply::message("bye").render(), r#"{"message":"bye"}"#);
    }
}
