use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::path::PathBuf;

use super::error::CryptoError;

/// PKCS#1 秘密鍵の PEM ラベル
pub const RSA_PRIVATE_KEY_PEM: &str = "RSA PRIVATE KEY";
/// PKCS#1 公開鍵の PEM ラベル
pub const RSA_PUBLIC_KEY_PEM: &str = "RSA PUBLIC KEY";
/// box 鍵（X25519）のバイト長
pub const BOX_KEY_SIZE: usize = 32;

/// [KeySource]
/// 鍵のバイト列を取得するための抽象です。
/// ファイル以外（シークレットストア等）から鍵を取得したい場合はこのトレイトを実装します。
pub trait KeySource: Send + Sync {
    fn bytes(&self) -> Result<Vec<u8>, CryptoError>;
}

/// ファイル全体を鍵として読み込みます。
#[derive(Debug, Clone)]
pub struct FileKeySource {
    pub path: PathBuf,
}

impl FileKeySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl KeySource for FileKeySource {
    fn bytes(&self) -> Result<Vec<u8>, CryptoError> {
        std::fs::read(&self.path).map_err(|source| CryptoError::KeyRead {
            path: self.path.clone(),
            source,
        })
    }
}

/// メモリ上のバイト列をそのまま返します。
#[derive(Debug, Clone)]
pub struct BytesKeySource {
    pub data: Vec<u8>,
}

impl BytesKeySource {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }
}

impl KeySource for BytesKeySource {
    fn bytes(&self) -> Result<Vec<u8>, CryptoError> {
        Ok(self.data.clone())
    }
}

/// PEM ブロックをデコードし、ラベルが `expected` であることを確認して DER を返します。
fn decode_pem(data: &[u8], expected: &'static str) -> Result<Vec<u8>, CryptoError> {
    let (label, der) =
        pkcs8::der::pem::decode_vec(data).map_err(|e| CryptoError::MalformedPem(e.to_string()))?;
    if label != expected {
        return Err(CryptoError::WrongPemType {
            expected,
            found: label.to_string(),
        });
    }
    Ok(der)
}

/// [resolve_private_key]
/// `RSA PRIVATE KEY` PEM (PKCS#1) から RSA 秘密鍵を読み込みます。
pub fn resolve_private_key(source: &dyn KeySource) -> Result<RsaPrivateKey, CryptoError> {
    let data = source.bytes()?;
    let der = decode_pem(&data, RSA_PRIVATE_KEY_PEM)?;
    RsaPrivateKey::from_pkcs1_der(&der).map_err(|e| CryptoError::MalformedDer(e.to_string()))
}

/// [resolve_public_key]
/// `RSA PUBLIC KEY` PEM (PKCS#1) から RSA 公開鍵を読み込みます。
pub fn resolve_public_key(source: &dyn KeySource) -> Result<RsaPublicKey, CryptoError> {
    let data = source.bytes()?;
    let der = decode_pem(&data, RSA_PUBLIC_KEY_PEM)?;
    RsaPublicKey::from_pkcs1_der(&der).map_err(|e| CryptoError::MalformedDer(e.to_string()))
}

/// [resolve_box_key]
/// box 用の 32 バイト鍵を読み込みます。
/// 生の 32 バイト、または 32 バイトを Base64 エンコードしたテキストのどちらも受け付けます。
pub fn resolve_box_key(source: &dyn KeySource) -> Result<[u8; BOX_KEY_SIZE], CryptoError> {
    let data = source.bytes()?;
    if let Ok(raw) = <[u8; BOX_KEY_SIZE]>::try_from(data.as_slice()) {
        return Ok(raw);
    }

    let text = std::str::from_utf8(&data).map_err(|_| {
        CryptoError::InvalidKey("box key is neither raw bytes nor base64".to_string())
    })?;
    let decoded = STANDARD
        .decode(text.trim())
        .map_err(|e| CryptoError::InvalidKey(format!("box key base64: {}", e)))?;

    <[u8; BOX_KEY_SIZE]>::try_from(decoded.as_slice()).map_err(|_| {
        CryptoError::InvalidKey(format!(
            "box key must be {} bytes, got {}",
            BOX_KEY_SIZE,
            decoded.len()
        ))
    })
}
