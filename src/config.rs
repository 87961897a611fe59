//! アプリケーション設定管理モジュール
//! 盤面サイズの制限、変則ルール、乱数シード、ログ出力などの設定を
//! 設定ファイルと環境変数から読み込んで管理する。

use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

use crate::game::GameVariant;

/// 盤面サイズの許容範囲
/// ゲーム作成リクエストの検証に使う
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardLimits {
    pub min_rows: usize,
    pub max_rows: usize,
    pub min_cols: usize,
    pub max_cols: usize,
}

impl Default for BoardLimits {
    /// 4未満では並べられず、10を超えると表示が崩れる
    fn default() -> Self {
        Self {
            min_rows: 4,
            max_rows: 10,
            min_cols: 4,
            max_cols: 10,
        }
    }
}

/// 変則ルールの設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantConfig {
    pub enable_prefill: bool,
    pub enable_gravity_flip: bool,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self {
            enable_prefill: true,
            enable_gravity_flip: true,
        }
    }
}

impl VariantConfig {
    pub fn to_variant(&self) -> GameVariant {
        GameVariant {
            prefill: self.enable_prefill,
            gravity_flip: self.enable_gravity_flip,
        }
    }
}

/// 乱数の設定
/// seed を指定すると事前配置が再現可能になる
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RandomConfig {
    pub seed: Option<u64>,
}

/// ログ出力の設定（tracing-subscriberのフィルタ文字列）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "ConnectFour=info".to_string(),
        }
    }
}

/// アプリケーションの全設定を統合するメイン設定構造体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub board: BoardLimits,
    #[serde(default)]
    pub variants: VariantConfig,
    #[serde(default)]
    pub random: RandomConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 設定関連のエラーを表すenum
/// ファイル読み込み、パース、検証エラーなどを含む
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("設定ファイル読み込みエラー: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("設定ファイル解析エラー: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("環境変数エラー: {name} = {value}")]
    EnvVarError { name: String, value: String },

    #[error("設定値が無効です: {field} = {value}")]
    InvalidValue { field: String, value: String },
}

/// 環境変数を読み、設定されていればパースして返す
fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarError {
                name: name.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

impl Config {
    /// 指定したファイルパスから設定を読み込む
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 環境変数から設定を読み込む
    /// デフォルト値をベースに環境変数で上書きする
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// 既存の設定に環境変数の値を上書きする
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(seed) = parse_env::<u64>("CONNECT_FOUR_SEED")? {
            self.random.seed = Some(seed);
        }

        if let Some(enable) = parse_env::<bool>("CONNECT_FOUR_PREFILL")? {
            self.variants.enable_prefill = enable;
        }

        if let Some(enable) = parse_env::<bool>("CONNECT_FOUR_GRAVITY_FLIP")? {
            self.variants.enable_gravity_flip = enable;
        }

        if let Ok(filter) = env::var("CONNECT_FOUR_LOG") {
            self.logging.filter = filter;
        }

        Ok(())
    }

    /// 設定ファイルと環境変数を結合して設定を読み込む
    /// 設定ファイルがなくてもデフォルト値で動作する
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Ok(file_config) = Self::from_file("config.json") {
            config = file_config;
        } else if let Ok(file_config) = Self::from_file("config/app.json") {
            config = file_config;
        }

        config.apply_env()?;
        Ok(config)
    }

    /// 現在の設定を指定したファイルに保存する
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 設定値の妥当性をチェックする
    /// 不正な値がある場合はConfigErrorを返す
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.board;
        let checks = [
            ("board.min_rows", limits.min_rows, limits.min_rows >= 4),
            ("board.min_cols", limits.min_cols, limits.min_cols >= 4),
            ("board.max_rows", limits.max_rows, limits.max_rows <= 10 && limits.max_rows >= limits.min_rows),
            ("board.max_cols", limits.max_cols, limits.max_cols <= 10 && limits.max_cols >= limits.min_cols),
        ];

        for (field, value, ok) in checks {
            if !ok {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.filter".to_string(),
                value: self.logging.filter.clone(),
            });
        }

        Ok(())
    }
}
