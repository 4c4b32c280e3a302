use blake2::Blake2bMac512;
use blake2::digest::consts::U64;
use blake2::digest::{
    FixedOutput, FixedOutputReset, HashMarker, Output, OutputSizeUser, Reset, Update,
};
use md5::Md5;
use rsa::{Oaep, Pss};
use sha1::Sha1;
use sha2::{Digest, Sha512};
use std::collections::HashMap;

use super::error::CryptoError;

/// BLAKE2B512 に固定で与える鍵。
/// 既存の暗号文・署名と互換性を保つため、この値を変更してはいけません。
pub const BLAKE2B_PERSONALIZATION: &[u8] = b"73 is the best number";

/// RSA の OAEP・PSS と署名対象のダイジェストに使えるハッシュ関数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha1,
    Sha512,
    Md5,
    Blake2b512,
}

impl HashAlgorithm {
    /// 設定ファイルで使われる名前
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "SHA1",
            HashAlgorithm::Sha512 => "SHA512",
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Blake2b512 => "BLAKE2B512",
        }
    }

    pub fn output_size(&self) -> usize {
        match self {
            HashAlgorithm::Sha1 => <Sha1 as Digest>::output_size(),
            HashAlgorithm::Sha512 => <Sha512 as Digest>::output_size(),
            HashAlgorithm::Md5 => <Md5 as Digest>::output_size(),
            HashAlgorithm::Blake2b512 => <PersonalizedBlake2b512 as Digest>::output_size(),
        }
    }

    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
            HashAlgorithm::Md5 => Md5::digest(data).to_vec(),
            HashAlgorithm::Blake2b512 => PersonalizedBlake2b512::digest(data).to_vec(),
        }
    }

    pub(crate) fn oaep(&self, label: &str) -> Oaep {
        match self {
            HashAlgorithm::Sha1 => Oaep::new_with_label::<Sha1, _>(label),
            HashAlgorithm::Sha512 => Oaep::new_with_label::<Sha512, _>(label),
            HashAlgorithm::Md5 => Oaep::new_with_label::<Md5, _>(label),
            HashAlgorithm::Blake2b512 => Oaep::new_with_label::<PersonalizedBlake2b512, _>(label),
        }
    }

    /// ソルト長 = ダイジェスト長の PSS
    pub(crate) fn pss(&self) -> Pss {
        match self {
            HashAlgorithm::Sha1 => Pss::new::<Sha1>(),
            HashAlgorithm::Sha512 => Pss::new::<Sha512>(),
            HashAlgorithm::Md5 => Pss::new::<Md5>(),
            HashAlgorithm::Blake2b512 => Pss::new::<PersonalizedBlake2b512>(),
        }
    }

    /// ソルト長を指定した PSS
    pub(crate) fn pss_with_salt(&self, salt_len: usize) -> Pss {
        match self {
            HashAlgorithm::Sha1 => Pss::new_with_salt::<Sha1>(salt_len),
            HashAlgorithm::Sha512 => Pss::new_with_salt::<Sha512>(salt_len),
            HashAlgorithm::Md5 => Pss::new_with_salt::<Md5>(salt_len),
            HashAlgorithm::Blake2b512 => Pss::new_with_salt::<PersonalizedBlake2b512>(salt_len),
        }
    }
}

/// [PersonalizedBlake2b512]
/// `BLAKE2B_PERSONALIZATION` を鍵とした BLAKE2b-512 を、通常のハッシュ関数として扱うためのラッパーです。
/// rsa クレートの OAEP / PSS にそのまま渡せます。
#[derive(Clone)]
pub struct PersonalizedBlake2b512 {
    inner: Blake2bMac512,
}

impl Default for PersonalizedBlake2b512 {
    fn default() -> Self {
        let inner = Blake2bMac512::new_with_salt_and_personal(BLAKE2B_PERSONALIZATION, &[], &[])
            .expect("BLAKE2b の鍵は 64 バイト以下");
        Self { inner }
    }
}

impl HashMarker for PersonalizedBlake2b512 {}

impl OutputSizeUser for PersonalizedBlake2b512 {
    type OutputSize = U64;
}

impl Update for PersonalizedBlake2b512 {
    fn update(&mut self, data: &[u8]) {
        Update::update(&mut self.inner, data);
    }
}

impl FixedOutput for PersonalizedBlake2b512 {
    fn finalize_into(self, out: &mut Output<Self>) {
        FixedOutput::finalize_into(self.inner, out);
    }
}

impl Reset for PersonalizedBlake2b512 {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl FixedOutputReset for PersonalizedBlake2b512 {
    fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
        let finished = std::mem::take(self);
        FixedOutput::finalize_into(finished.inner, out);
    }
}

/// [HashProvider]
/// 設定ファイルのハッシュ名から `HashAlgorithm` を引くための対応表です。
///
/// 起動時に一度だけ作成し、ディスパッチャに明示的に渡します。
/// BLAKE2B512 は `with_blake2b` で登録した場合のみ利用可能になります。
#[derive(Debug, Clone)]
pub struct HashProvider {
    hashes: HashMap<String, HashAlgorithm>,
}

impl HashProvider {
    /// SHA1, SHA512, MD5 のみを登録した状態で作成します。
    pub fn new() -> Self {
        let mut provider = Self {
            hashes: HashMap::new(),
        };
        provider.register(HashAlgorithm::Sha1);
        provider.register(HashAlgorithm::Sha512);
        provider.register(HashAlgorithm::Md5);
        provider
    }

    /// BLAKE2B512 を追加で登録します。
    pub fn with_blake2b(mut self) -> Self {
        self.register(HashAlgorithm::Blake2b512);
        self
    }

    pub fn register(&mut self, algorithm: HashAlgorithm) {
        self.hashes.insert(algorithm.name().to_string(), algorithm);
    }

    pub fn resolve(&self, name: &str) -> Result<HashAlgorithm, CryptoError> {
        self.hashes
            .get(&name.trim().to_uppercase())
            .copied()
            .ok_or_else(|| CryptoError::UnknownHash(name.to_string()))
    }
}

impl Default for HashProvider {
    /// すべてのハッシュ関数を登録した状態
    fn default() -> Self {
        Self::new().with_blake2b()
    }
}
