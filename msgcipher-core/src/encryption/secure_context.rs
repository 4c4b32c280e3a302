use log::{debug, warn};

use super::cipher::{Decrypter, Encrypter};
use super::error::CryptoError;
use super::traits::{Decrypt, Encrypt, Identification};
use crate::models::envelope::Envelope;

/// [SecureContext]
/// Encrypter と Decrypter の組を保持し、ペイロードをエンベロープ単位で暗号化・復号します。
pub struct SecureContext {
    /// 送信用。未設定の場合は NoOp を使います。
    pub encrypter: Option<Encrypter>,
    /// 受信用。未設定の場合は NoOp を使います。
    pub decrypter: Option<Decrypter>,
}

impl SecureContext {
    /// 空のコンテキスト（未初期化状態）を作成します。
    pub fn new() -> Self {
        Self {
            encrypter: None,
            decrypter: None,
        }
    }

    pub fn with_encrypter(mut self, encrypter: Encrypter) -> Self {
        self.encrypter = Some(encrypter);
        self
    }

    pub fn with_decrypter(mut self, decrypter: Decrypter) -> Self {
        self.decrypter = Some(decrypter);
        self
    }

    /// [seal_message]
    /// ペイロードを暗号化し、kid とアルゴリズムを付けたエンベロープを返します。
    pub fn seal_message(&self, payload: &[u8]) -> Result<Envelope, CryptoError> {
        let fallback = Encrypter::default();
        let encrypter = self.encrypter.as_ref().unwrap_or(&fallback);
        if encrypter.is_noop() {
            warn!("Sealing message without encryption");
        }

        let (crypt, nonce) = encrypter.encrypt(payload)?;
        debug!(
            "sealed {} bytes with {} (kid: {})",
            payload.len(),
            encrypter.algorithm(),
            encrypter.kid()
        );
        Ok(Envelope::new(encrypter.kid(), encrypter.algorithm(), crypt, nonce))
    }

    /// [unseal_message]
    /// エンベロープを復号します。
    /// エンベロープの kid / アルゴリズムが Decrypter と一致しない場合は復号を試みません。
    pub fn unseal_message(&self, envelope: &Envelope) -> Result<Vec<u8>, CryptoError> {
        let fallback = Decrypter::default();
        let decrypter = self.decrypter.as_ref().unwrap_or(&fallback);

        if envelope.kid != decrypter.kid() || envelope.algorithm != decrypter.algorithm() {
            return Err(CryptoError::EnvelopeMismatch(format!(
                "expected {}/{}, found {}/{}",
                decrypter.algorithm(),
                decrypter.kid(),
                envelope.algorithm,
                envelope.kid
            )));
        }

        decrypter.decrypt(&envelope.payload, &envelope.nonce)
    }
}

impl Default for SecureContext {
    fn default() -> Self {
        Self::new()
    }
}
