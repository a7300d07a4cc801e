//! OpenPGP operations for pgpwrap.
//!
//! The heavy lifting is done by the `pgp` crate. This module sequences it:
//!
//! - **Keys**: parse armored key blocks, generate RSA key pairs
//! - **Entity**: combine a public and optional private key into one identity
//! - **Encryption**: gzip, encrypt to an entity, armor (and the reverse)
//! - **Signatures**: detached armored signatures over raw bytes

use pgp::crypto::hash::HashAlgorithm;
use pgp::crypto::sym::SymmetricKeyAlgorithm;
use pgp::packet::KeyFlags;
use pgp::types::CompressionAlgorithm;

pub mod encryption;
pub mod entity;
pub mod keys;
pub mod signature;

pub use encryption::{
    decrypt_message, encrypt_message, open_message, DecryptedMessage, SignatureState,
};
pub use entity::{get_entity, Entity, EntityBuilder, EntitySubkey, Identity, UserIdentity};
pub use keys::{generate_key_pair, parse_private_key, parse_public_key, ArmoredKeyPair};
pub use signature::{sign_message, verify_signature, VerificationKey};

/// Default RSA modulus size for generated keys
pub const DEFAULT_RSA_BITS: u32 = 4096;

/// Default subkey lifetime in seconds (1 year)
pub const DEFAULT_SUBKEY_LIFETIME_SECS: u32 = 86400 * 365;

/// Algorithm and key parameters used when building entities and generating keys.
///
/// Passed explicitly to [`EntityBuilder`] and [`generate_key_pair`]; there is
/// no process-wide default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityConfig {
    /// Digest for signatures and self-signatures
    pub hash_algorithm: HashAlgorithm,
    /// Cipher for message encryption and key preferences
    pub cipher_algorithm: SymmetricKeyAlgorithm,
    /// Compression preference recorded in generated keys
    pub compression_algorithm: CompressionAlgorithm,
    /// RSA modulus size for generated keys
    pub rsa_bits: u32,
    /// Lifetime of the encryption subkey
    pub subkey_lifetime_secs: u32,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            hash_algorithm: HashAlgorithm::SHA2_256,
            cipher_algorithm: SymmetricKeyAlgorithm::AES256,
            compression_algorithm: CompressionAlgorithm::ZLIB,
            rsa_bits: DEFAULT_RSA_BITS,
            subkey_lifetime_secs: DEFAULT_SUBKEY_LIFETIME_SECS,
        }
    }
}

impl EntityConfig {
    /// Sets the signature digest
    pub fn with_hash_algorithm(mut self, hash_algorithm: HashAlgorithm) -> Self {
        self.hash_algorithm = hash_algorithm;
        self
    }

    /// Sets the message cipher
    pub fn with_cipher_algorithm(mut self, cipher_algorithm: SymmetricKeyAlgorithm) -> Self {
        self.cipher_algorithm = cipher_algorithm;
        self
    }

    /// Sets the compression preference
    pub fn with_compression_algorithm(
        mut self,
        compression_algorithm: CompressionAlgorithm,
    ) -> Self {
        self.compression_algorithm = compression_algorithm;
        self
    }

    /// Sets the RSA modulus size for key generation
    pub fn with_rsa_bits(mut self, rsa_bits: u32) -> Self {
        self.rsa_bits = rsa_bits;
        self
    }

    /// Sets the encryption subkey lifetime
    pub fn with_subkey_lifetime_secs(mut self, subkey_lifetime_secs: u32) -> Self {
        self.subkey_lifetime_secs = subkey_lifetime_secs;
        self
    }
}

/// Key usage flags indicating how a key may be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUsage {
    /// Key may be used to encrypt communications
    pub encrypt_communications: bool,
    /// Key may be used to encrypt storage
    pub encrypt_storage: bool,
    /// Key may be used for digital signatures
    pub sign: bool,
    /// Key may be used to certify other keys
    pub certify: bool,
}

impl KeyUsage {
    /// Creates a new KeyUsage with all permissions disabled
    pub fn none() -> Self {
        Self {
            encrypt_communications: false,
            encrypt_storage: false,
            sign: false,
            certify: false,
        }
    }

    /// Usage of a primary identity key: certify and sign
    pub fn certify_and_sign() -> Self {
        Self {
            certify: true,
            sign: true,
            ..Self::none()
        }
    }

    /// Usage of an encryption subkey: storage and communications
    pub fn encrypt_only() -> Self {
        Self {
            encrypt_communications: true,
            encrypt_storage: true,
            ..Self::none()
        }
    }

    /// Returns true if either encryption flag is set
    pub fn can_encrypt(&self) -> bool {
        self.encrypt_communications || self.encrypt_storage
    }
}

impl From<KeyUsage> for KeyFlags {
    fn from(usage: KeyUsage) -> Self {
        let mut flags = KeyFlags::default();
        flags.set_certify(usage.certify);
        flags.set_sign(usage.sign);
        flags.set_encrypt_comms(usage.encrypt_communications);
        flags.set_encrypt_storage(usage.encrypt_storage);
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EntityConfig::default();
        assert_eq!(config.hash_algorithm, HashAlgorithm::SHA2_256);
        assert_eq!(config.cipher_algorithm, SymmetricKeyAlgorithm::AES256);
        assert_eq!(config.compression_algorithm, CompressionAlgorithm::ZLIB);
        assert_eq!(config.rsa_bits, 4096);
        assert_eq!(config.subkey_lifetime_secs, 31_536_000);
    }

    #[test]
    fn test_config_setters() {
        let config = EntityConfig::default()
            .with_hash_algorithm(HashAlgorithm::SHA2_512)
            .with_cipher_algorithm(SymmetricKeyAlgorithm::AES128)
            .with_compression_algorithm(CompressionAlgorithm::ZIP)
            .with_rsa_bits(2048)
            .with_subkey_lifetime_secs(60);

        assert_eq!(config.hash_algorithm, HashAlgorithm::SHA2_512);
        assert_eq!(config.cipher_algorithm, SymmetricKeyAlgorithm::AES128);
        assert_eq!(config.compression_algorithm, CompressionAlgorithm::ZIP);
        assert_eq!(config.rsa_bits, 2048);
        assert_eq!(config.subkey_lifetime_secs, 60);
    }

    #[test]
    fn test_key_usage_flags() {
        let primary = KeyUsage::certify_and_sign();
        assert!(primary.certify && primary.sign);
        assert!(!primary.can_encrypt());

        let subkey = KeyUsage::encrypt_only();
        assert!(subkey.can_encrypt());
        assert!(!subkey.sign);

        let flags: KeyFlags = subkey.into();
        assert!(flags.encrypt_comms());
        assert!(flags.encrypt_storage());
        assert!(!flags.sign());
    }
}
