use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crypto_box::aead::{self, Aead};
use crypto_box::{PublicKey, SalsaBox, SecretKey};
use rand::RngCore;                   // 乱数生成のためのインターフェース
use rand::rngs::OsRng;                // OS標準のセキュアな乱数生成器
use std::fmt;

use super::error::CryptoError;
use super::keys::BOX_KEY_SIZE;
use super::traits::{CryptoKeyPair, Decrypt, Encrypt, Identification, KeyGenerator};
use crate::models::config::AlgorithmType;

/// box のノンス長（XSalsa20 は 24 バイト）
pub const NONCE_SIZE: usize = 24;

/// [BoxEncrypter]
/// NaCl box (X25519 + XSalsa20-Poly1305) による送信側の実装です。
///
/// 送信者の秘密鍵と受信者の公開鍵から共有鍵を構築時に一度だけ計算し、
/// 以降の暗号化ではその共有鍵を使い回します。
pub struct BoxEncrypter {
    kid: String,
    shared: SalsaBox,
}

impl BoxEncrypter {
    pub fn new(
        sender_private_key: [u8; BOX_KEY_SIZE],
        recipient_public_key: [u8; BOX_KEY_SIZE],
        kid: impl Into<String>,
    ) -> Self {
        let secret = SecretKey::from(sender_private_key);
        let public = PublicKey::from(recipient_public_key);
        Self {
            kid: kid.into(),
            shared: SalsaBox::new(&public, &secret),
        }
    }
}

impl fmt::Debug for BoxEncrypter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxEncrypter").field("kid", &self.kid).finish()
    }
}

impl Identification for BoxEncrypter {
    fn algorithm(&self) -> AlgorithmType {
        AlgorithmType::Box
    }

    fn kid(&self) -> &str {
        &self.kid
    }
}

impl Encrypt for BoxEncrypter {
    /// [encrypt]
    /// 暗号化のたびに新しい 24 バイトのノンスを生成し、(暗号文, ノンス) を返します。
    fn encrypt(&self, message: &[u8]) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
        let mut nonce = [0u8; NONCE_SIZE];
        OsRng
            .try_fill_bytes(&mut nonce)
            .map_err(|e| CryptoError::NonceGeneration(e.to_string()))?;

        let sealed = self
            .shared
            .encrypt(aead::Nonce::<SalsaBox>::from_slice(&nonce), message)
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;

        Ok((sealed, nonce.to_vec()))
    }
}

/// [BoxDecrypter]
/// NaCl box による受信側の実装です。受信者の秘密鍵と送信者の公開鍵から共有鍵を事前計算します。
pub struct BoxDecrypter {
    kid: String,
    shared: SalsaBox,
}

impl BoxDecrypter {
    pub fn new(
        recipient_private_key: [u8; BOX_KEY_SIZE],
        sender_public_key: [u8; BOX_KEY_SIZE],
        kid: impl Into<String>,
    ) -> Self {
        let secret = SecretKey::from(recipient_private_key);
        let public = PublicKey::from(sender_public_key);
        Self {
            kid: kid.into(),
            shared: SalsaBox::new(&public, &secret),
        }
    }
}

impl fmt::Debug for BoxDecrypter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxDecrypter").field("kid", &self.kid).finish()
    }
}

impl Identification for BoxDecrypter {
    fn algorithm(&self) -> AlgorithmType {
        AlgorithmType::Box
    }

    fn kid(&self) -> &str {
        &self.kid
    }
}

impl Decrypt for BoxDecrypter {
    /// [decrypt]
    /// ノンスはちょうど 24 バイトでなければなりません。
    /// 鍵・ノンス・暗号文のいずれかが異なる場合は認証タグの検証に失敗し、平文は一切返しません。
    fn decrypt(&self, ciphertext: &[u8], nonce: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if nonce.len() != NONCE_SIZE {
            return Err(CryptoError::InvalidNonce {
                expected: NONCE_SIZE,
                actual: nonce.len(),
            });
        }

        self.shared
            .decrypt(aead::Nonce::<SalsaBox>::from_slice(nonce), ciphertext)
            .map_err(|_| CryptoError::Decryption("box authentication failed".to_string()))
    }
}

/// [BoxKeyPair]
/// X25519 のキーペアです。鍵は Base64 テキストとして書き出します。
pub struct BoxKeyPair {
    secret: [u8; BOX_KEY_SIZE],
    public: [u8; BOX_KEY_SIZE],
}

impl BoxKeyPair {
    pub fn from_secret(secret: [u8; BOX_KEY_SIZE]) -> Self {
        let public = *SecretKey::from(secret).public_key().as_bytes();
        Self { secret, public }
    }

    pub fn secret_bytes(&self) -> [u8; BOX_KEY_SIZE] {
        self.secret
    }

    pub fn public_bytes(&self) -> [u8; BOX_KEY_SIZE] {
        self.public
    }
}

impl CryptoKeyPair for BoxKeyPair {
    fn algorithm_name(&self) -> &str {
        "BOX"
    }

    fn public_key_pem(&self) -> Result<String, CryptoError> {
        Ok(format!("{}\n", STANDARD.encode(self.public)))
    }

    fn private_key_pem(&self) -> Result<String, CryptoError> {
        Ok(format!("{}\n", STANDARD.encode(self.secret)))
    }
}

/// [BoxKeyGenerator]
/// OS の乱数から X25519 の秘密鍵を生成します。
#[derive(Debug, Default)]
pub struct BoxKeyGenerator;

impl BoxKeyGenerator {
    pub fn generate_pair(&self) -> Result<BoxKeyPair, CryptoError> {
        let mut secret = [0u8; BOX_KEY_SIZE];
        OsRng
            .try_fill_bytes(&mut secret)
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
        Ok(BoxKeyPair::from_secret(secret))
    }
}

impl KeyGenerator for BoxKeyGenerator {
    fn generate(&self) -> Result<Box<dyn CryptoKeyPair>, CryptoError> {
        Ok(Box::new(self.generate_pair()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs() -> (BoxKeyPair, BoxKeyPair) {
        let generator = BoxKeyGenerator;
        (generator.generate_pair().unwrap(), generator.generate_pair().unwrap())
    }

    #[test]
    fn test_box_roundtrip() {
        let (alice, bob) = pairs();
        let encrypter = BoxEncrypter::new(alice.secret_bytes(), bob.public_bytes(), "k1");
        let decrypter = BoxDecrypter::new(bob.secret_bytes(), alice.public_bytes(), "k1");

        assert_eq!(encrypter.algorithm(), AlgorithmType::Box);
        assert_eq!(decrypter.kid(), "k1");

        let (crypt, nonce) = encrypter.encrypt(b"hello").unwrap();
        assert_ne!(crypt, b"hello");
        assert_eq!(nonce.len(), NONCE_SIZE);
        assert_eq!(decrypter.decrypt(&crypt, &nonce).unwrap(), b"hello");

        let (crypt, nonce) = encrypter.encrypt(b"").unwrap();
        assert_eq!(decrypter.decrypt(&crypt, &nonce).unwrap(), b"");
    }

    #[test]
    fn test_nonce_is_fresh_per_call() {
        let (alice, bob) = pairs();
        let encrypter = BoxEncrypter::new(alice.secret_bytes(), bob.public_bytes(), "k1");

        let (crypt_a, nonce_a) = encrypter.encrypt(b"same").unwrap();
        let (crypt_b, nonce_b) = encrypter.encrypt(b"same").unwrap();
        assert_ne!(nonce_a, nonce_b);
        assert_ne!(crypt_a, crypt_b);
    }

    #[test]
    fn test_wrong_nonce_fails() {
        let (alice, bob) = pairs();
        let encrypter = BoxEncrypter::new(alice.secret_bytes(), bob.public_bytes(), "k1");
        let decrypter = BoxDecrypter::new(bob.secret_bytes(), alice.public_bytes(), "k1");

        let (crypt, mut nonce) = encrypter.encrypt(b"hello").unwrap();
        nonce[0] ^= 0xff;
        assert!(matches!(
            decrypter.decrypt(&crypt, &nonce),
            Err(CryptoError::Decryption(_))
        ));
    }

    #[test]
    fn test_short_nonce_fails_fast() {
        let (alice, bob) = pairs();
        let encrypter = BoxEncrypter::new(alice.secret_bytes(), bob.public_bytes(), "k1");
        let decrypter = BoxDecrypter::new(bob.secret_bytes(), alice.public_bytes(), "k1");

        let (crypt, nonce) = encrypter.encrypt(b"hello").unwrap();
        assert!(matches!(
            decrypter.decrypt(&crypt, &nonce[..16]),
            Err(CryptoError::InvalidNonce { expected: 24, actual: 16 })
        ));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let (alice, bob) = pairs();
        let encrypter = BoxEncrypter::new(alice.secret_bytes(), bob.public_bytes(), "k1");
        let decrypter = BoxDecrypter::new(bob.secret_bytes(), alice.public_bytes(), "k1");

        let (mut crypt, nonce) = encrypter.encrypt(b"hello").unwrap();
        let last = crypt.len() - 1;
        crypt[last] ^= 0x01;
        assert!(decrypter.decrypt(&crypt, &nonce).is_err());
    }

    #[test]
    fn test_wrong_key_fails() {
        let (alice, bob) = pairs();
        let (mallory, _) = pairs();
        let encrypter = BoxEncrypter::new(alice.secret_bytes(), bob.public_bytes(), "k1");
        let decrypter = BoxDecrypter::new(bob.secret_bytes(), mallory.public_bytes(), "k1");

        let (crypt, nonce) = encrypter.encrypt(b"hello").unwrap();
        assert!(decrypter.decrypt(&crypt, &nonce).is_err());
    }

    #[test]
    fn test_key_pair_export() {
        let pair = BoxKeyGenerator.generate_pair().unwrap();
        let exported = pair.public_key_pem().unwrap();

        assert_eq!(pair.algorithm_name(), "BOX");
        assert_eq!(STANDARD.decode(exported.trim()).unwrap(), pair.public_bytes());
    }
}
