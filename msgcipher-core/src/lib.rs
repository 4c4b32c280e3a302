//! msgcipher コアライブラリ
//!
//! 設定ファイル (JSON) から暗号化・復号のインスタンスを構築し、
//! メッセージを RSA (OAEP + PSS) または NaCl box で暗号化するための基幹ロジックを提供します。

pub mod encryption;
pub mod models;

// 主要な機能を外部に再公開
pub use encryption::{
    CryptoError, Decrypt, Decrypter, Encrypt, Encrypter, HashProvider, Identification, LoadError,
    SecureContext,
};
pub use models::config::{AlgorithmType, CipherConfig, KeyRole};
pub use models::envelope::Envelope;
