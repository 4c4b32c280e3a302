use super::box_engine::{BoxDecrypter, BoxEncrypter};
use super::cipher::{Decrypter, Encrypter};
use super::error::CryptoError;
use super::hash::HashAlgorithm;
use super::keys::{
    BOX_KEY_SIZE, KeySource, resolve_box_key, resolve_private_key, resolve_public_key,
};
use super::rsa_engine::{RsaDecrypter, RsaEncrypter};

/// Encrypter を構築するローダー
pub trait EncrypterLoader {
    fn load_encrypter(&self) -> Result<Encrypter, CryptoError>;
}

/// Decrypter を構築するローダー
pub trait DecrypterLoader {
    fn load_decrypter(&self) -> Result<Decrypter, CryptoError>;
}

/// [RsaLoader]
/// 鍵ソースから RSA 鍵を読み込み、RSA の Encrypter / Decrypter を構築します。
///
/// 暗号化時: `public_key` (受信者の公開鍵) が必須、`private_key` (送信者の秘密鍵) があれば署名します。
/// 復号時: `private_key` (受信者の秘密鍵) が必須、`public_key` (送信者の公開鍵) があれば署名を検証します。
pub struct RsaLoader {
    pub kid: String,
    pub hash: HashAlgorithm,
    pub private_key: Option<Box<dyn KeySource>>,
    pub public_key: Option<Box<dyn KeySource>>,
}

impl EncrypterLoader for RsaLoader {
    fn load_encrypter(&self) -> Result<Encrypter, CryptoError> {
        let public_source = self
            .public_key
            .as_deref()
            .ok_or(CryptoError::MissingKeySource("rsa recipient public key"))?;
        let recipient_public_key = resolve_public_key(public_source)?;

        let sender_private_key = match self.private_key.as_deref() {
            Some(source) => Some(resolve_private_key(source)?),
            None => None,
        };

        Ok(RsaEncrypter::new(
            self.hash,
            sender_private_key,
            recipient_public_key,
            self.kid.clone(),
        )
        .into())
    }
}

impl DecrypterLoader for RsaLoader {
    fn load_decrypter(&self) -> Result<Decrypter, CryptoError> {
        let private_source = self
            .private_key
            .as_deref()
            .ok_or(CryptoError::MissingKeySource("rsa recipient private key"))?;
        let recipient_private_key = resolve_private_key(private_source)?;

        let sender_public_key = match self.public_key.as_deref() {
            Some(source) => Some(resolve_public_key(source)?),
            None => None,
        };

        Ok(RsaDecrypter::new(
            self.hash,
            recipient_private_key,
            sender_public_key,
            self.kid.clone(),
        )
        .into())
    }
}

/// [BoxLoader]
/// 鍵ソースから 32 バイトの X25519 鍵を読み込み、box の Encrypter / Decrypter を構築します。
///
/// 暗号化時は (送信者の秘密鍵, 受信者の公開鍵)、復号時は (受信者の秘密鍵, 送信者の公開鍵) を渡します。
pub struct BoxLoader {
    pub kid: String,
    pub private_key: Box<dyn KeySource>,
    pub public_key: Box<dyn KeySource>,
}

impl BoxLoader {
    fn resolve(&self) -> Result<([u8; BOX_KEY_SIZE], [u8; BOX_KEY_SIZE]), CryptoError> {
        let private_key = resolve_box_key(&*self.private_key)?;
        let public_key = resolve_box_key(&*self.public_key)?;
        Ok((private_key, public_key))
    }
}

impl EncrypterLoader for BoxLoader {
    fn load_encrypter(&self) -> Result<Encrypter, CryptoError> {
        let (sender_private_key, recipient_public_key) = self.resolve()?;
        Ok(BoxEncrypter::new(sender_private_key, recipient_public_key, self.kid.clone()).into())
    }
}

impl DecrypterLoader for BoxLoader {
    fn load_decrypter(&self) -> Result<Decrypter, CryptoError> {
        let (recipient_private_key, sender_public_key) = self.resolve()?;
        Ok(BoxDecrypter::new(recipient_private_key, sender_public_key, self.kid.clone()).into())
    }
}
