use super::error::CryptoError;
use crate::models::config::AlgorithmType;

/// [Identification]
/// 暗号インスタンスがどのアルゴリズム・どの鍵で動作しているかを示します。
/// 呼び出し側はこれを暗号文と一緒に記録し、復号時の Decrypter 選択に使います。
pub trait Identification {
    /// 暗号化・復号に使用するアルゴリズムを返します。
    fn algorithm(&self) -> AlgorithmType;

    /// 使用している鍵の識別子 (KID) を返します。
    fn kid(&self) -> &str;
}

/// [Encrypt]
/// メッセージを暗号化する能力を表すトレイトです。
pub trait Encrypt: Identification + Send + Sync {
    /// メッセージを暗号化し、(暗号文, ノンスまたは署名) を返します。
    ///
    /// 2 つ目の値の意味はアルゴリズムによって異なります。
    /// - none / rsa-sym: 空
    /// - rsa-asy: 平文に対する PSS 署名
    /// - box: 24 バイトのノンス
    fn encrypt(&self, message: &[u8]) -> Result<(Vec<u8>, Vec<u8>), CryptoError>;
}

/// [Decrypt]
/// 暗号文を復号する能力を表すトレイトです。
pub trait Decrypt: Identification + Send + Sync {
    /// 暗号文を復号します。署名検証が構成されている場合、検証に失敗すると復号も失敗します。
    fn decrypt(&self, ciphertext: &[u8], nonce: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// [CryptoKeyPair]
/// 公開鍵と秘密鍵のペアを保持する抽象的なトレイトです。
pub trait CryptoKeyPair: Send + Sync {
    /// キーペアの種類（"RSA", "BOX"）を返します。
    fn algorithm_name(&self) -> &str;

    /// 公開鍵をファイルに保存できるテキスト形式で取得します。
    fn public_key_pem(&self) -> Result<String, CryptoError>;

    /// 秘密鍵をファイルに保存できるテキスト形式で取得します。
    fn private_key_pem(&self) -> Result<String, CryptoError>;
}

/// [KeyGenerator]
/// 新しいキーペアを生成するための抽象的なトレイトです。
pub trait KeyGenerator {
    /// 新しいキーペアをランダムに生成します。
    fn generate(&self) -> Result<Box<dyn CryptoKeyPair>, CryptoError>;
}
