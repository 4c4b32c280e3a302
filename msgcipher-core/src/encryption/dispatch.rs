use log::debug;

use super::cipher::{Decrypter, Encrypter};
use super::error::{CryptoError, LoadError};
use super::hash::HashProvider;
use super::keys::{FileKeySource, KeySource};
use super::loader::{BoxLoader, DecrypterLoader, EncrypterLoader, RsaLoader};
use crate::models::config::{AlgorithmType, CipherConfig, Direction, KeyRole};

impl CipherConfig {
    /// [load_encrypter]
    /// 設定に従って Encrypter を構築します。
    ///
    /// 失敗した場合でも `LoadError` は NoOp の Encrypter を保持しています。
    /// NoOp は平文をそのまま返すため、エラーを確認せずに使ってはいけません。
    pub fn load_encrypter(&self, hashes: &HashProvider) -> Result<Encrypter, LoadError<Encrypter>> {
        debug!("new encrypter: {:?}", self);
        self.build_encrypter(hashes)
            .map_err(|e| LoadError::new(Encrypter::default(), e))
    }

    /// [load_decrypter]
    /// 設定に従って Decrypter を構築します。失敗時の扱いは `load_encrypter` と同じです。
    pub fn load_decrypter(&self, hashes: &HashProvider) -> Result<Decrypter, LoadError<Decrypter>> {
        debug!("new decrypter: {:?}", self);
        self.build_decrypter(hashes)
            .map_err(|e| LoadError::new(Decrypter::default(), e))
    }

    fn build_encrypter(&self, hashes: &HashProvider) -> Result<Encrypter, CryptoError> {
        let algorithm = self.checked_algorithm(Direction::Encrypt)?;
        match algorithm {
            AlgorithmType::None => Ok(Encrypter::default()),
            AlgorithmType::Box => BoxLoader {
                kid: self.kid.clone(),
                private_key: self.key_source(KeyRole::SenderPrivateKey)?,
                public_key: self.key_source(KeyRole::RecipientPublicKey)?,
            }
            .load_encrypter(),
            AlgorithmType::RsaSymmetric => RsaLoader {
                kid: self.kid.clone(),
                hash: hashes.resolve(self.hash_name())?,
                private_key: None,
                public_key: Some(self.key_source(KeyRole::PublicKey)?),
            }
            .load_encrypter(),
            AlgorithmType::RsaAsymmetric => RsaLoader {
                kid: self.kid.clone(),
                hash: hashes.resolve(self.hash_name())?,
                private_key: Some(self.key_source(KeyRole::SenderPrivateKey)?),
                public_key: Some(self.key_source(KeyRole::RecipientPublicKey)?),
            }
            .load_encrypter(),
        }
    }

    fn build_decrypter(&self, hashes: &HashProvider) -> Result<Decrypter, CryptoError> {
        let algorithm = self.checked_algorithm(Direction::Decrypt)?;
        match algorithm {
            AlgorithmType::None => Ok(Decrypter::default()),
            AlgorithmType::Box => BoxLoader {
                kid: self.kid.clone(),
                private_key: self.key_source(KeyRole::RecipientPrivateKey)?,
                public_key: self.key_source(KeyRole::SenderPublicKey)?,
            }
            .load_decrypter(),
            AlgorithmType::RsaSymmetric => RsaLoader {
                kid: self.kid.clone(),
                hash: hashes.resolve(self.hash_name())?,
                private_key: Some(self.key_source(KeyRole::PrivateKey)?),
                public_key: None,
            }
            .load_decrypter(),
            AlgorithmType::RsaAsymmetric => RsaLoader {
                kid: self.kid.clone(),
                hash: hashes.resolve(self.hash_name())?,
                private_key: Some(self.key_source(KeyRole::RecipientPrivateKey)?),
                public_key: Some(self.key_source(KeyRole::SenderPublicKey)?),
            }
            .load_decrypter(),
        }
    }

    /// アルゴリズムが指定されていて、必要な鍵の役割がすべて揃っていることを確認します。
    /// 鍵ファイルの読み込みより前に行います。
    fn checked_algorithm(&self, direction: Direction) -> Result<AlgorithmType, CryptoError> {
        let algorithm = self.algorithm.ok_or(CryptoError::NoAlgorithm)?;
        let missing = self.missing_roles(algorithm, direction);
        if !missing.is_empty() {
            return Err(CryptoError::MissingKeys { algorithm, missing });
        }
        Ok(algorithm)
    }

    fn key_source(&self, role: KeyRole) -> Result<Box<dyn KeySource>, CryptoError> {
        let path = self.key_path(role).ok_or_else(|| CryptoError::MissingKeys {
            algorithm: self.algorithm.unwrap_or(AlgorithmType::None),
            missing: vec![role],
        })?;
        Ok(Box::new(FileKeySource::new(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encryption::error::ErrorCategory;
    use crate::encryption::traits::{Decrypt, Encrypt, Identification};

    #[test]
    fn test_none_is_noop_without_keys() {
        let config = CipherConfig::new(AlgorithmType::None, "ignored");
        let encrypter = config.load_encrypter(&HashProvider::default()).unwrap();
        let decrypter = config.load_decrypter(&HashProvider::default()).unwrap();

        let (crypt, nonce) = encrypter.encrypt(b"hello").unwrap();
        assert_eq!(crypt, b"hello");
        assert!(nonce.is_empty());
        assert_eq!(decrypter.decrypt(&crypt, &nonce).unwrap(), b"hello");
        assert_eq!(encrypter.kid(), "none");
    }

    #[test]
    fn test_missing_type_falls_back_to_noop() {
        let config = CipherConfig::default();
        let err = config.load_encrypter(&HashProvider::default()).unwrap_err();

        assert!(matches!(err.reason(), CryptoError::NoAlgorithm));
        assert!(err.fallback().is_noop());
        assert!(err.to_string().contains("no algorithm type specified"));
    }

    #[test]
    fn test_missing_roles_checked_before_io() {
        // 鍵ファイルは存在しないが、足りない役割の検出が先に行われる
        let config = CipherConfig::new(AlgorithmType::Box, "k")
            .with_key(KeyRole::SenderPrivateKey, "/nonexistent/a.key");
        let err = config.load_encrypter(&HashProvider::default()).unwrap_err();

        match err.reason() {
            CryptoError::MissingKeys { algorithm, missing } => {
                assert_eq!(*algorithm, AlgorithmType::Box);
                assert_eq!(missing, &vec![KeyRole::RecipientPublicKey]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.reason().category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_unknown_hash_is_configuration_error() {
        let config = CipherConfig::new(AlgorithmType::RsaSymmetric, "k")
            .with_param("hash", "SHA3")
            .with_key(KeyRole::PublicKey, "/nonexistent/key.pub");
        let err = config.load_encrypter(&HashProvider::default()).unwrap_err();

        assert!(matches!(err.reason(), CryptoError::UnknownHash(_)));
        assert!(err.into_fallback().is_noop());
    }

    #[test]
    fn test_unreadable_key_is_key_material_error() {
        let config = CipherConfig::new(AlgorithmType::RsaSymmetric, "k")
            .with_key(KeyRole::PrivateKey, "/nonexistent/key.pem");
        let err = config.load_decrypter(&HashProvider::default()).unwrap_err();

        assert_eq!(err.reason().category(), ErrorCategory::KeyMaterial);
        assert!(err.fallback().is_noop());
    }
}
