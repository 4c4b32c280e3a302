use super::error::CryptoError;
use super::traits::{Decrypt, Encrypt, Identification};
use crate::models::config::AlgorithmType;

/// NoOp が返す KID
pub const NOOP_KID: &str = "none";

/// [NoOp]
/// メッセージをそのまま返すだけの実装です。
///
/// 暗号設定が無い場合の既定値ですが、機密性も完全性も提供しません。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOp;

impl Identification for NoOp {
    fn algorithm(&self) -> AlgorithmType {
        AlgorithmType::None
    }

    fn kid(&self) -> &str {
        NOOP_KID
    }
}

impl Encrypt for NoOp {
    fn encrypt(&self, message: &[u8]) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
        Ok((message.to_vec(), Vec::new()))
    }
}

impl Decrypt for NoOp {
    fn decrypt(&self, ciphertext: &[u8], _nonce: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(ciphertext.to_vec())
    }
}
