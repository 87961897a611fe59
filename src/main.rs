//! 四目並べコンソールのエントリポイント
//! 設定読み込み、ログ初期化を行い、標準入力のコマンドを1行ずつ処理する。

use ConnectFour::{
    api::{execute, Command, Reply},
    config::Config,
    session::GameManager,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// メイン関数 - 初期化とコマンドループを担当
#[tokio::main]
async fn main() {
    // 設定ファイルと環境変数から統合設定を読み込み
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("設定エラー: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("設定エラー: {}", e);
        std::process::exit(1);
    }

    // 標準出力は応答専用にし、ログは標準エラーへ
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(
        prefill = config.variants.enable_prefill,
        gravity_flip = config.variants.enable_gravity_flip,
        seed = ?config.random.seed,
        "connect four console ready"
    );

    let manager = GameManager::from_config(&config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("入力読み込みエラー: {}", e);
                std::process::exit(1);
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let reply = match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => execute(&manager, command)
                .await
                .unwrap_or_else(|e| Reply::from_error(&e)),
            Err(e) => Reply::from_error(&e),
        };

        println!("{}", reply.render());
    }

    info!("console closed");
}
