pub mod box_engine;
pub mod cipher;
pub mod dispatch;
pub mod error;
pub mod hash;
pub mod keys;
pub mod loader;
pub mod noop;
pub mod rsa_engine;
pub mod secure_context;
pub mod traits;

pub use box_engine::{BoxDecrypter, BoxEncrypter, BoxKeyGenerator, BoxKeyPair, NONCE_SIZE};
pub use cipher::{Decrypter, Encrypter};
pub use error::{CryptoError, ErrorCategory, LoadError};
pub use hash::{HashAlgorithm, HashProvider};
pub use keys::{BytesKeySource, FileKeySource, KeySource};
pub use loader::{BoxLoader, DecrypterLoader, EncrypterLoader, RsaLoader};
pub use noop::NoOp;
pub use rsa_engine::{RsaDecrypter, RsaEncrypter, RsaKeyGenerator, RsaKeyPair};
pub use secure_context::SecureContext;
pub use traits::{CryptoKeyPair, Decrypt, Encrypt, Identification, KeyGenerator};

/// 生成する鍵の種類を指定する列挙型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// RSA (PKCS#1 PEM)。指定ビット数で生成します。
    Rsa(usize),
    /// X25519 (Base64)
    Box,
}

/// [create_generator]
/// 指定された種類に対応するキー生成器を作成します。
pub fn create_generator(kind: KeyKind) -> Box<dyn KeyGenerator> {
    match kind {
        KeyKind::Rsa(bits) => Box::new(RsaKeyGenerator { bits }),
        KeyKind::Box => Box::new(BoxKeyGenerator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_generator() {
        let pair = create_generator(KeyKind::Box).generate().unwrap();
        assert_eq!(pair.algorithm_name(), "BOX");

        let pair = create_generator(KeyKind::Rsa(512)).generate().unwrap();
        assert!(pair.private_key_pem().unwrap().contains("RSA PRIVATE KEY"));
        assert!(pair.public_key_pem().unwrap().contains("RSA PUBLIC KEY"));
    }
}
