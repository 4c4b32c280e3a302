mod commands;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use msgcipher_core::encryption::KeyKind;
use std::path::PathBuf;

const LONG_ABOUT: &str =
    "msgcipher は JSON 設定に従ってメッセージを RSA または NaCl box で暗号化・復号するツールです。";

#[derive(Parser, Debug)]
#[command(name = "msgcipher")]
#[command(author, version, about, long_about = LONG_ABOUT)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// キーペアを生成します
    Keygen {
        #[command(subcommand)]
        kind: KeygenKind,
    },
    /// メッセージを暗号化し、エンベロープとして書き出します
    Encrypt {
        /// 暗号化の設定ファイル (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// 入力ファイル。省略時は標準入力
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// 出力ファイル。省略時は標準出力
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 設定の読み込みに失敗しても暗号化なしで続行します
        #[arg(long)]
        allow_noop: bool,

        /// エンベロープを Base64 テキストで書き出します
        #[arg(long)]
        base64: bool,
    },
    /// エンベロープを復号します
    Decrypt {
        /// 復号の設定ファイル (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// 入力ファイル。省略時は標準入力
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// 出力ファイル。省略時は標準出力
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 設定の読み込みに失敗しても復号なしで続行します
        #[arg(long)]
        allow_noop: bool,

        /// 入力を Base64 テキストとして読み込みます
        #[arg(long)]
        base64: bool,
    },
}

#[derive(Subcommand, Debug)]
enum KeygenKind {
    /// RSA キーペア (PKCS#1 PEM)
    Rsa {
        /// 鍵のビット数
        #[arg(short, long, default_value_t = 4096)]
        bits: usize,

        #[command(flatten)]
        target: KeygenTarget,
    },
    /// box (X25519) キーペア (Base64)
    Box {
        #[command(flatten)]
        target: KeygenTarget,
    },
}

#[derive(clap::Args, Debug)]
struct KeygenTarget {
    /// 鍵ファイルの出力先ディレクトリ
    #[arg(short = 'd', long, default_value = ".")]
    out_dir: PathBuf,

    /// 鍵ファイル名（拡張子なし）。設定を書き出す場合は kid にもなります
    #[arg(short, long, default_value = "id")]
    name: String,

    /// 生成した鍵で自分宛てに暗号化・復号する設定を JSON ファイルとして書き出します
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Keygen { kind } => {
            let (kind, target) = match kind {
                KeygenKind::Rsa { bits, target } => (KeyKind::Rsa(bits), target),
                KeygenKind::Box { target } => (KeyKind::Box, target),
            };
            commands::keygen::run_keygen(
                kind,
                &target.out_dir,
                &target.name,
                target.export.as_deref(),
            )?;
        }
        Commands::Encrypt { config, input, output, allow_noop, base64 } => {
            commands::encrypt::run_encrypt(
                &config,
                input.as_deref(),
                output.as_deref(),
                allow_noop,
                base64,
            )?;
        }
        Commands::Decrypt { config, input, output, allow_noop, base64 } => {
            commands::decrypt::run_decrypt(
                &config,
                input.as_deref(),
                output.as_deref(),
                allow_noop,
                base64,
            )?;
        }
    }

    Ok(())
}
