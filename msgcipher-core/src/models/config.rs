use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::encryption::CryptoError;

/// `params` に hash が指定されていない場合に使うハッシュ関数名
pub const DEFAULT_HASH: &str = "SHA512";

/// 暗号アルゴリズムの種類
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmType {
    /// 暗号化なし（入力をそのまま返す）
    #[serde(rename = "none")]
    None,
    /// 単一の RSA キーペアによる暗号化（署名なし）
    #[serde(rename = "rsa-sym")]
    RsaSymmetric,
    /// 送信者・受信者それぞれの RSA キーペアによる暗号化と署名
    #[serde(rename = "rsa-asy")]
    RsaAsymmetric,
    /// X25519 + XSalsa20-Poly1305 (NaCl box)
    #[serde(rename = "box")]
    Box,
}

impl AlgorithmType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmType::None => "none",
            AlgorithmType::RsaSymmetric => "rsa-sym",
            AlgorithmType::RsaAsymmetric => "rsa-asy",
            AlgorithmType::Box => "box",
        }
    }

    /// [required_roles]
    /// 指定された方向（暗号化 / 復号）で必須となる鍵の役割を返します。
    /// 設定ファイルの I/O を行う前に検証できるよう、純粋関数になっています。
    pub fn required_roles(&self, direction: Direction) -> &'static [KeyRole] {
        match (self, direction) {
            (AlgorithmType::None, _) => &[],
            (AlgorithmType::RsaSymmetric, Direction::Encrypt) => &[KeyRole::PublicKey],
            (AlgorithmType::RsaSymmetric, Direction::Decrypt) => &[KeyRole::PrivateKey],
            (AlgorithmType::RsaAsymmetric | AlgorithmType::Box, Direction::Encrypt) => {
                &[KeyRole::SenderPrivateKey, KeyRole::RecipientPublicKey]
            }
            (AlgorithmType::RsaAsymmetric | AlgorithmType::Box, Direction::Decrypt) => {
                &[KeyRole::RecipientPrivateKey, KeyRole::SenderPublicKey]
            }
        }
    }
}

impl fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmType {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(AlgorithmType::None),
            "rsa-sym" => Ok(AlgorithmType::RsaSymmetric),
            "rsa-asy" => Ok(AlgorithmType::RsaAsymmetric),
            "box" => Ok(AlgorithmType::Box),
            _ => Err(CryptoError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// 暗号化するのか復号するのか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// 鍵が果たす役割。設定ファイルの `keys` のキー名として使われます。
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum KeyRole {
    SenderPrivateKey,
    SenderPublicKey,
    RecipientPrivateKey,
    RecipientPublicKey,
    PrivateKey,
    PublicKey,
}

/// [CipherConfig]
/// Encrypter / Decrypter を構築するための宣言的な設定です。
///
/// ```json
/// {
///   "type": "rsa-asy",
///   "kid": "2019-06",
///   "params": { "hash": "SHA512" },
///   "keys": { "senderPrivateKey": "sender.pem", "recipientPublicKey": "recipient.pub" }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CipherConfig {
    /// アルゴリズムの種類。未指定または未知の値は `None` になり、ディスパッチ時にエラーとなります。
    #[serde(
        rename = "type",
        default,
        deserialize_with = "deserialize_algorithm",
        skip_serializing_if = "Option::is_none"
    )]
    pub algorithm: Option<AlgorithmType>,

    /// 鍵の識別子
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kid: String,

    /// アルゴリズム固有のパラメータ（例: RSA のハッシュ関数）
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,

    /// 鍵の役割 -> ファイルパス
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub keys: BTreeMap<KeyRole, PathBuf>,
}

fn deserialize_algorithm<'de, D>(deserializer: D) -> Result<Option<AlgorithmType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.parse() {
        Ok(algorithm) => Some(algorithm),
        Err(_) => {
            log::warn!("Unknown algorithm type in config: {}", s);
            None
        }
    }))
}

impl CipherConfig {
    pub fn new(algorithm: AlgorithmType, kid: impl Into<String>) -> Self {
        Self {
            algorithm: Some(algorithm),
            kid: kid.into(),
            ..Default::default()
        }
    }

    pub fn with_key(mut self, role: KeyRole, path: impl Into<PathBuf>) -> Self {
        self.keys.insert(role, path.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// JSON 文字列から設定を読み込みます。
    pub fn from_json_str(json: &str) -> Result<Self, CryptoError> {
        serde_json::from_str(json).map_err(|e| CryptoError::Config(e.to_string()))
    }

    /// JSON ファイルから設定を読み込みます。
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CryptoError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CryptoError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    pub fn key_path(&self, role: KeyRole) -> Option<&Path> {
        self.keys.get(&role).map(PathBuf::as_path)
    }

    /// 必須の役割のうち `keys` に含まれていないものを返します。
    pub fn missing_roles(&self, algorithm: AlgorithmType, direction: Direction) -> Vec<KeyRole> {
        algorithm
            .required_roles(direction)
            .iter()
            .copied()
            .filter(|role| !self.keys.contains_key(role))
            .collect()
    }

    pub fn hash_name(&self) -> &str {
        self.params.get("hash").map(String::as_str).unwrap_or(DEFAULT_HASH)
    }
}
