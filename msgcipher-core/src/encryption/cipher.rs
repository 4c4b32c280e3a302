use super::box_engine::{BoxDecrypter, BoxEncrypter};
use super::error::CryptoError;
use super::noop::NoOp;
use super::rsa_engine::{RsaDecrypter, RsaEncrypter};
use super::traits::{Decrypt, Encrypt, Identification};
use crate::models::config::AlgorithmType;

/// [Encrypter]
/// 設定から構築される暗号化側のインスタンス。
/// 呼び出し側は `Encrypt` トレイト越しにのみ利用します。
#[derive(Debug)]
pub enum Encrypter {
    NoOp(NoOp),
    Rsa(RsaEncrypter),
    Box(BoxEncrypter),
}

/// [Decrypter]
/// 設定から構築される復号側のインスタンス。
#[derive(Debug)]
pub enum Decrypter {
    NoOp(NoOp),
    Rsa(RsaDecrypter),
    Box(BoxDecrypter),
}

impl Encrypter {
    pub fn is_noop(&self) -> bool {
        matches!(self, Encrypter::NoOp(_))
    }

    fn inner(&self) -> &dyn Encrypt {
        match self {
            Encrypter::NoOp(inner) => inner,
            Encrypter::Rsa(inner) => inner,
            Encrypter::Box(inner) => inner,
        }
    }
}

impl Decrypter {
    pub fn is_noop(&self) -> bool {
        matches!(self, Decrypter::NoOp(_))
    }

    fn inner(&self) -> &dyn Decrypt {
        match self {
            Decrypter::NoOp(inner) => inner,
            Decrypter::Rsa(inner) => inner,
            Decrypter::Box(inner) => inner,
        }
    }
}

impl Default for Encrypter {
    fn default() -> Self {
        Encrypter::NoOp(NoOp)
    }
}

impl Default for Decrypter {
    fn default() -> Self {
        Decrypter::NoOp(NoOp)
    }
}

impl Identification for Encrypter {
    fn algorithm(&self) -> AlgorithmType {
        self.inner().algorithm()
    }

    fn kid(&self) -> &str {
        self.inner().kid()
    }
}

impl Encrypt for Encrypter {
    fn encrypt(&self, message: &[u8]) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
        self.inner().encrypt(message)
    }
}

impl Identification for Decrypter {
    fn algorithm(&self) -> AlgorithmType {
        self.inner().algorithm()
    }

    fn kid(&self) -> &str {
        self.inner().kid()
    }
}

impl Decrypt for Decrypter {
    fn decrypt(&self, ciphertext: &[u8], nonce: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.inner().decrypt(ciphertext, nonce)
    }
}

impl From<NoOp> for Encrypter {
    fn from(inner: NoOp) -> Self {
        Encrypter::NoOp(inner)
    }
}

impl From<RsaEncrypter> for Encrypter {
    fn from(inner: RsaEncrypter) -> Self {
        Encrypter::Rsa(inner)
    }
}

impl From<BoxEncrypter> for Encrypter {
    fn from(inner: BoxEncrypter) -> Self {
        Encrypter::Box(inner)
    }
}

impl From<NoOp> for Decrypter {
    fn from(inner: NoOp) -> Self {
        Decrypter::NoOp(inner)
    }
}

impl From<RsaDecrypter> for Decrypter {
    fn from(inner: RsaDecrypter) -> Self {
        Decrypter::Rsa(inner)
    }
}

impl From<BoxDecrypter> for Decrypter {
    fn from(inner: BoxDecrypter) -> Self {
        Decrypter::Box(inner)
    }
}
