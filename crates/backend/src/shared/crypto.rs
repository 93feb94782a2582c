//! AES-256-GCM encryption for third-party tokens stored in the database
//!
//! Format: base64(nonce_12bytes || ciphertext || tag_16bytes)

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use anyhow::{anyhow, Result};
use base64::{engine::general_purpose, Engine as _};
use once_cell::sync::OnceCell;
use rand::RngCore;

const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;
const TAG_LEN: usize = 16;

static TOKEN_CIPHER: OnceCell<TokenCipher> = OnceCell::new();

#[derive(Clone)]
pub struct TokenCipher {
    key: [u8; KEY_LEN],
}

impl TokenCipher {
    /// Build from a base64 encoded 32 byte key
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| anyhow!("Invalid tokens secret key: {}", e))?;
        if bytes.len() != KEY_LEN {
            return Err(anyhow!(
                "Tokens secret key has wrong length: {} (expected {})",
                bytes.len(),
                KEY_LEN
            ));
        }
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&bytes);
        Ok(Self { key })
    }

    pub fn generate() -> Self {
        let mut key = [0u8; KEY_LEN];
        rand::thread_rng().fill_bytes(&mut key);
        Self { key }
    }

    pub fn encrypt_str(&self, plaintext: &str) -> Result<String> {
        let cipher =
            Aes256Gcm::new_from_slice(&self.key).map_err(|_| anyhow!("Invalid key"))?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| anyhow!("Encryption failed"))?;

        let mut result = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        result.extend_from_slice(&nonce_bytes);
        result.extend_from_slice(&ciphertext);

        Ok(general_purpose::STANDARD.encode(&result))
    }

    pub fn decrypt_str(&self, encrypted_b64: &str) -> Result<String> {
        let data = general_purpose::STANDARD
            .decode(encrypted_b64)
            .map_err(|_| anyhow!("Invalid base64"))?;

        if data.len() < NONCE_LEN + TAG_LEN {
            return Err(anyhow!("Ciphertext too short"));
        }

        let cipher =
            Aes256Gcm::new_from_slice(&self.key).map_err(|_| anyhow!("Invalid key"))?;
        let nonce = Nonce::from_slice(&data[..NONCE_LEN]);
        let plaintext = cipher
            .decrypt(nonce, &data[NONCE_LEN..])
            .map_err(|_| anyhow!("Decryption failed (wrong key or tampered data)"))?;

        String::from_utf8(plaintext).map_err(|e| anyhow!("Decrypted token is not UTF-8: {}", e))
    }
}

/// Install the process-wide cipher from the configured key.
///
/// An empty key yields a random one, so tokens saved by this process
/// cannot be read after a restart.
pub fn init(configured_key: &str) -> Result<()> {
    let cipher = if configured_key.trim().is_empty() {
        tracing::warn!(
            "tecopos.tokens_secret_key is not set; stored Tecopos tokens will not survive a restart"
        );
        TokenCipher::generate()
    } else {
        TokenCipher::from_base64(configured_key)?
    };
    TOKEN_CIPHER
        .set(cipher)
        .map_err(|_| anyhow!("Token cipher already initialized"))
}

pub fn cipher() -> Result<&'static TokenCipher> {
    TOKEN_CIPHER
        .get()
        .ok_or_else(|| anyhow!("Token cipher has not been initialized"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_then_decrypt_returns_token() {
        let cipher = TokenCipher::generate();
        let sealed = cipher.encrypt_str("Bearer tecopos-abc").unwrap();
        assert_ne!(sealed, "Bearer tecopos-abc");
        assert_eq!(cipher.decrypt_str(&sealed).unwrap(), "Bearer tecopos-abc");
    }

    #[test]
    fn wrong_key_fails() {
        let sealed = TokenCipher::generate().encrypt_str("secret").unwrap();
        assert!(TokenCipher::generate().decrypt_str(&sealed).is_err());
    }

    #[test]
    fn key_length_is_checked() {
        let short = general_purpose::STANDARD.encode([1u8; 16]);
        assert!(TokenCipher::from_base64(&short).is_err());
        let ok = general_purpose::STANDARD.encode([7u8; 32]);
        assert!(TokenCipher::from_base64(&ok).is_ok());
    }
}
