use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::config::{AlgorithmType, KeyRole};

/// エラーの大分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 設定の不備（鍵の役割が足りない、アルゴリズムが不明など）
    Configuration,
    /// 鍵素材の読み込み・パースの失敗
    KeyMaterial,
    /// 暗号化・復号・署名・検証の失敗
    Cryptographic,
}

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("incorrect keys provided for {algorithm}: missing {missing:?}")]
    MissingKeys {
        algorithm: AlgorithmType,
        missing: Vec<KeyRole>,
    },
    #[error("no key source for {0}")]
    MissingKeySource(&'static str),
    #[error("no algorithm type specified")]
    NoAlgorithm,
    #[error("unknown algorithm type: {0}")]
    UnknownAlgorithm(String),
    #[error("hash function not found: {0}")]
    UnknownHash(String),
    #[error("invalid config: {0}")]
    Config(String),

    #[error("failed to read key from {}: {source}", .path.display())]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed PEM block: {0}")]
    MalformedPem(String),
    #[error("incorrect pem type: expected {expected}, found {found}")]
    WrongPemType { expected: &'static str, found: String },
    #[error("malformed DER key: {0}")]
    MalformedDer(String),
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("failed to encrypt message: {0}")]
    Encryption(String),
    #[error("failed to decrypt message: {0}")]
    Decryption(String),
    #[error("failed to sign message: {0}")]
    Signing(String),
    #[error("failed to validate signature: {0}")]
    SignatureVerification(String),
    #[error("failed to generate nonce: {0}")]
    NonceGeneration(String),
    #[error("invalid nonce length: expected {expected} bytes, got {actual}")]
    InvalidNonce { expected: usize, actual: usize },
    #[error("envelope does not match decrypter: {0}")]
    EnvelopeMismatch(String),
    #[error("envelope serialization failed: {0}")]
    Serialization(String),
}

impl CryptoError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CryptoError::MissingKeys { .. }
            | CryptoError::MissingKeySource(_)
            | CryptoError::NoAlgorithm
            | CryptoError::UnknownAlgorithm(_)
            | CryptoError::UnknownHash(_)
            | CryptoError::Config(_) => ErrorCategory::Configuration,
            CryptoError::KeyRead { .. }
            | CryptoError::MalformedPem(_)
            | CryptoError::WrongPemType { .. }
            | CryptoError::MalformedDer(_)
            | CryptoError::InvalidKey(_)
            | CryptoError::KeyGeneration(_) => ErrorCategory::KeyMaterial,
            CryptoError::Encryption(_)
            | CryptoError::Decryption(_)
            | CryptoError::Signing(_)
            | CryptoError::SignatureVerification(_)
            | CryptoError::NonceGeneration(_)
            | CryptoError::InvalidNonce { .. }
            | CryptoError::EnvelopeMismatch(_)
            | CryptoError::Serialization(_) => ErrorCategory::Cryptographic,
        }
    }
}

/// [LoadError]
/// 設定からの Encrypter / Decrypter の構築に失敗したことを表します。
///
/// 失敗時も安全な NoOp を `fallback` として保持しているため、呼び出し側は
/// エラーを記録した上で平文モードに切り替えるかどうかを明示的に選べます。
#[derive(Error, Debug)]
#[error("failed to load custom algorithm: {source}")]
pub struct LoadError<C: fmt::Debug> {
    fallback: C,
    #[source]
    source: CryptoError,
}

impl<C: fmt::Debug> LoadError<C> {
    pub fn new(fallback: C, source: CryptoError) -> Self {
        Self { fallback, source }
    }

    pub fn fallback(&self) -> &C {
        &self.fallback
    }

    pub fn into_fallback(self) -> C {
        self.fallback
    }

    pub fn reason(&self) -> &CryptoError {
        &self.source
    }

    pub fn into_parts(self) -> (C, CryptoError) {
        (self.fallback, self.source)
    }
}
