use super::load_decrypter;
use crate::utils::{dearmor, read_input, write_output};
use anyhow::{Context, Result};
use log::info;
use msgcipher_core::{Envelope, SecureContext};
use std::path::Path;

/// [run_decrypt]
/// `run_encrypt` が書き出したエンベロープを読み込み、復号した平文を書き出します。
pub fn run_decrypt(
    config: &Path,
    input: Option<&Path>,
    output: Option<&Path>,
    allow_noop: bool,
    base64: bool,
) -> Result<()> {
    let context = SecureContext::new().with_decrypter(load_decrypter(config, allow_noop)?);

    let raw = read_input(input)?;
    let bin = if base64 { dearmor(&raw)? } else { raw };
    let envelope = Envelope::from_slice(&bin).context("エンベロープの解析に失敗しました")?;

    let plaintext = context
        .unseal_message(&envelope)
        .context("メッセージの復号に失敗しました")?;
    info!(
        "{} バイトを復号しました (algorithm: {}, kid: {})",
        plaintext.len(),
        envelope.algorithm,
        envelope.kid
    );

    write_output(output, &plaintext)
}
