use super::load_encrypter;
use crate::utils::{armor, read_input, write_output};
use anyhow::Result;
use log::info;
use msgcipher_core::SecureContext;
use std::path::Path;

/// [run_encrypt]
/// 入力を暗号化し、MessagePack のエンベロープとして書き出します。
/// `base64` を指定するとエンベロープを 1 行の Base64 テキストにします。
pub fn run_encrypt(
    config: &Path,
    input: Option<&Path>,
    output: Option<&Path>,
    allow_noop: bool,
    base64: bool,
) -> Result<()> {
    let context = SecureContext::new().with_encrypter(load_encrypter(config, allow_noop)?);

    let plaintext = read_input(input)?;
    let envelope = context.seal_message(&plaintext)?;
    info!(
        "{} バイトを暗号化しました (algorithm: {}, kid: {})",
        plaintext.len(),
        envelope.algorithm,
        envelope.kid
    );

    let bin = envelope.to_vec()?;
    let data = if base64 { armor(&bin) } else { bin };
    write_output(output, &data)
}
