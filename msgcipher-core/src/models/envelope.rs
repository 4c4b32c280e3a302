use serde::{Deserialize, Serialize};

use crate::encryption::CryptoError;
use crate::models::config::AlgorithmType;

/// [Envelope]
/// 暗号文と、それを生成した鍵の識別情報をまとめたメッセージです。
///
/// 復号側はこの `kid` と `algorithm` を見て、正しい Decrypter を選択できます。
/// `nonce` の意味はアルゴリズムに依存します（box ではノンス、rsa-asy では署名、それ以外は空）。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Envelope {
    /// 暗号化に使用した鍵の識別子
    pub kid: String,
    /// 暗号化に使用したアルゴリズム
    pub algorithm: AlgorithmType,
    /// 暗号文
    pub payload: Vec<u8>,
    /// ノンスまたは署名
    pub nonce: Vec<u8>,
}

impl Envelope {
    pub fn new(
        kid: impl Into<String>,
        algorithm: AlgorithmType,
        payload: Vec<u8>,
        nonce: Vec<u8>,
    ) -> Self {
        Self {
            kid: kid.into(),
            algorithm,
            payload,
            nonce,
        }
    }

    /// エンベロープ全体を MessagePack バイナリに変換
    pub fn to_vec(&self) -> Result<Vec<u8>, CryptoError> {
        rmp_serde::to_vec(self).map_err(|e| CryptoError::Serialization(e.to_string()))
    }

    /// MessagePack バイナリからエンベロープを復元
    pub fn from_slice(slice: &[u8]) -> Result<Self, CryptoError> {
        rmp_serde::from_slice(slice).map_err(|e| CryptoError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_msgpack() {
        let envelope = Envelope::new("k1", AlgorithmType::Box, b"sealed".to_vec(), vec![7; 24]);
        let bin = envelope.to_vec().unwrap();

        assert_eq!(Envelope::from_slice(&bin).unwrap(), envelope);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(
            Envelope::from_slice(b"\xc1not msgpack"),
            Err(CryptoError::Serialization(_))
        ));
    }
}
