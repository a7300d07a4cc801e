//! JSON configuration file support.
//!
//! ```json
//! {
//!   "hash": "SHA256",
//!   "cipher": "AES256",
//!   "compression": "ZLIB",
//!   "rsa_bits": 4096,
//!   "subkey_lifetime_secs": 31536000
//! }
//! ```
//!
//! Every field is optional; missing fields keep the [`EntityConfig`] defaults.

use crate::crypto::EntityConfig;
use crate::error::{PgpError, Result};
use pgp::crypto::hash::HashAlgorithm;
use pgp::crypto::sym::SymmetricKeyAlgorithm;
use pgp::types::CompressionAlgorithm;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// On-disk form of [`EntityConfig`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Hash algorithm name, e.g. `SHA256`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Symmetric cipher name, e.g. `AES256`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cipher: Option<String>,
    /// Preferred compression name: `ZLIB`, `ZIP` or `NONE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,
    /// RSA modulus size for generated keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsa_bits: Option<u32>,
    /// Encryption subkey lifetime in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subkey_lifetime_secs: Option<u32>,
}

impl ConfigFile {
    /// Reads and parses a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let file = Self::from_json(&contents)?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(file)
    }

    /// Parses a JSON config document
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents)
            .map_err(|e| PgpError::config(format!("Invalid configuration: {}", e)))
    }

    /// Resolves algorithm names and overlays the set fields on the defaults
    pub fn into_entity_config(self) -> Result<EntityConfig> {
        let mut config = EntityConfig::default();
        if let Some(name) = self.hash {
            config = config.with_hash_algorithm(parse_hash(&name)?);
        }
        if let Some(name) = self.cipher {
            config = config.with_cipher_algorithm(parse_cipher(&name)?);
        }
        if let Some(name) = self.compression {
            config = config.with_compression_algorithm(parse_compression(&name)?);
        }
        if let Some(bits) = self.rsa_bits {
            config = config.with_rsa_bits(bits);
        }
        if let Some(secs) = self.subkey_lifetime_secs {
            config = config.with_subkey_lifetime_secs(secs);
        }
        Ok(config)
    }
}

/// Loads an [`EntityConfig`] from `path`, or returns the defaults when no path is given
pub fn load_entity_config(path: Option<&Path>) -> Result<EntityConfig> {
    match path {
        Some(path) => ConfigFile::load(path)?.into_entity_config(),
        None => Ok(EntityConfig::default()),
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect::<String>()
        .to_ascii_uppercase()
}

fn parse_hash(name: &str) -> Result<HashAlgorithm> {
    match normalize(name).as_str() {
        "SHA256" | "SHA2256" => Ok(HashAlgorithm::SHA2_256),
        "SHA384" | "SHA2384" => Ok(HashAlgorithm::SHA2_384),
        "SHA512" | "SHA2512" => Ok(HashAlgorithm::SHA2_512),
        "SHA224" | "SHA2224" => Ok(HashAlgorithm::SHA2_224),
        _ => Err(PgpError::config(format!("Unsupported hash algorithm: {}", name))),
    }
}

fn parse_cipher(name: &str) -> Result<SymmetricKeyAlgorithm> {
    match normalize(name).as_str() {
        "AES128" => Ok(SymmetricKeyAlgorithm::AES128),
        "AES192" => Ok(SymmetricKeyAlgorithm::AES192),
        "AES256" => Ok(SymmetricKeyAlgorithm::AES256),
        _ => Err(PgpError::config(format!("Unsupported cipher: {}", name))),
    }
}

fn parse_compression(name: &str) -> Result<CompressionAlgorithm> {
    match normalize(name).as_str() {
        "ZLIB" => Ok(CompressionAlgorithm::ZLIB),
        "ZIP" => Ok(CompressionAlgorithm::ZIP),
        "NONE" | "UNCOMPRESSED" => Ok(CompressionAlgorithm::Uncompressed),
        _ => Err(PgpError::config(format!(
            "Unsupported compression algorithm: {}",
            name
        ))),
    }
}
