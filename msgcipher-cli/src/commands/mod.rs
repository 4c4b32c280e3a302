pub mod decrypt;
pub mod encrypt;
pub mod keygen;

use anyhow::{Context, Result};
use log::warn;
use msgcipher_core::{CipherConfig, Decrypter, Encrypter, HashProvider};
use std::path::Path;

fn read_config(path: &Path) -> Result<CipherConfig> {
    CipherConfig::from_json_file(path)
        .with_context(|| format!("設定ファイル {} の読み込みに失敗しました", path.display()))
}

/// [load_encrypter]
/// 設定ファイルから Encrypter を構築します。
/// 構築に失敗した場合、`allow_noop` が指定されていれば警告を出して NoOp で続行します。
pub fn load_encrypter(config_path: &Path, allow_noop: bool) -> Result<Encrypter> {
    let config = read_config(config_path)?;
    match config.load_encrypter(&HashProvider::default()) {
        Ok(encrypter) => Ok(encrypter),
        Err(err) if allow_noop => {
            warn!("暗号化なしで続行します: {}", err.reason());
            Ok(err.into_fallback())
        }
        Err(err) => {
            let (_, source) = err.into_parts();
            Err(anyhow::Error::new(source).context("Encrypter の構築に失敗しました"))
        }
    }
}

/// [load_decrypter]
/// 設定ファイルから Decrypter を構築します。
pub fn load_decrypter(config_path: &Path, allow_noop: bool) -> Result<Decrypter> {
    let config = read_config(config_path)?;
    match config.load_decrypter(&HashProvider::default()) {
        Ok(decrypter) => Ok(decrypter),
        Err(err) if allow_noop => {
            warn!("復号なしで続行します: {}", err.reason());
            Ok(err.into_fallback())
        }
        Err(err) => {
            let (_, source) = err.into_parts();
            Err(anyhow::Error::new(source).context("Decrypter の構築に失敗しました"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_config_is_error_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{"type": "box", "kid": "k"}"#).unwrap();

        let err = load_encrypter(&path, false).unwrap_err();
        assert!(format!("{:#}", err).contains("incorrect keys provided for box"));
    }

    #[test]
    fn test_allow_noop_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{"type": "rsa-sym"}"#).unwrap();

        assert!(load_encrypter(&path, true).unwrap().is_noop());
        assert!(load_decrypter(&path, true).unwrap().is_noop());
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_decrypter(&dir.path().join("absent.json"), true).is_err());
    }
}
