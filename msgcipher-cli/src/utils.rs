use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::io::{Read, Write};
use std::path::Path;

/// ファイル、または未指定なら標準入力から全体を読み込みます。
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("入力ファイル {} の読み込みに失敗しました", path.display())),
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("標準入力の読み込みに失敗しました")?;
            Ok(buf)
        }
    }
}

/// ファイル、または未指定なら標準出力へ書き出します。
pub fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("出力ファイル {} の書き込みに失敗しました", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(data).context("標準出力への書き込みに失敗しました")?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// 鍵ファイルを新規に書き出します。
/// 既存のファイルは上書きしません。秘密鍵は作成時点から所有者のみ読み書きできる権限です。
pub fn write_key_file(path: &Path, contents: &str, private: bool) -> Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(if private { 0o600 } else { 0o644 });
    }
    #[cfg(not(unix))]
    let _ = private;

    let mut file = options
        .open(path)
        .with_context(|| format!("鍵ファイル {} を作成できません", path.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("鍵ファイル {} の書き込みに失敗しました", path.display()))?;

    Ok(())
}

/// バイナリを 1 行の Base64 テキストにします。
pub fn armor(data: &[u8]) -> Vec<u8> {
    let mut text = STANDARD.encode(data).into_bytes();
    text.push(b'\n');
    text
}

/// `armor` で作ったテキストをバイナリに戻します。
pub fn dearmor(text: &[u8]) -> Result<Vec<u8>> {
    let text = std::str::from_utf8(text).context("Base64 テキストが UTF-8 ではありません")?;
    STANDARD
        .decode(text.trim())
        .context("Base64 のデコードに失敗しました")
}
