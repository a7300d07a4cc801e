//! Input validation and resource limits for pgpwrap
//!
//! Every public operation checks its inputs here before handing them to the
//! OpenPGP engine, so oversized or nonsensical input fails early with a
//! `Validation` error instead of exhausting memory.

use crate::crypto::{EntityConfig, UserIdentity};
use crate::error::{PgpError, Result};

/// Maximum allowed plaintext size (100MB)
pub const MAX_MESSAGE_SIZE: usize = 100 * 1024 * 1024;

/// Maximum allowed armored input size (150MB, base64 and packet overhead)
pub const MAX_ARMORED_SIZE: usize = 150 * 1024 * 1024;

/// Maximum size a decrypted payload may inflate to
pub const MAX_DECOMPRESSED_SIZE: usize = MAX_MESSAGE_SIZE;

/// Maximum allowed armored signature size (64KB)
pub const MAX_SIGNATURE_SIZE: usize = 64 * 1024;

/// Maximum allowed armored key block size (1MB)
pub const MAX_KEY_SIZE: usize = 1024 * 1024;

/// Maximum allowed User ID length (1KB)
pub const MAX_USER_ID_LENGTH: usize = 1024;

/// Smallest RSA modulus accepted for key generation
pub const MIN_RSA_BITS: u32 = 2048;

/// Largest RSA modulus accepted for key generation
pub const MAX_RSA_BITS: u32 = 8192;

/// Validation functions for input data
pub struct Validator;

impl Validator {
    /// Validate plaintext size
    pub fn validate_message_size(data: &[u8]) -> Result<()> {
        Self::validate_len("Message", data.len(), MAX_MESSAGE_SIZE)
    }

    /// Validate armored message size
    pub fn validate_armored_size(data: &[u8]) -> Result<()> {
        Self::validate_len("Armored message", data.len(), MAX_ARMORED_SIZE)
    }

    /// Validate armored signature size
    pub fn validate_signature_size(data: &[u8]) -> Result<()> {
        Self::validate_len("Signature", data.len(), MAX_SIGNATURE_SIZE)
    }

    /// Validate armored key block size
    pub fn validate_key_size(data: &[u8]) -> Result<()> {
        Self::validate_len("Key block", data.len(), MAX_KEY_SIZE)
    }

    /// Validate identity fields.
    ///
    /// Blank identities are allowed; the rendered user id must fit
    /// `MAX_USER_ID_LENGTH` and must not contain line breaks or NUL bytes.
    pub fn validate_user_identity(identity: &UserIdentity) -> Result<()> {
        let user_id = identity.user_id();
        if user_id.len() > MAX_USER_ID_LENGTH {
            return Err(PgpError::validation(format!(
                "User ID too long: {} bytes exceeds maximum of {} bytes",
                user_id.len(),
                MAX_USER_ID_LENGTH
            )));
        }

        if user_id.chars().any(|c| matches!(c, '\0' | '\n' | '\r')) {
            return Err(PgpError::validation(
                "User ID contains control characters",
            ));
        }

        Ok(())
    }

    /// Validate RSA modulus size for key generation
    pub fn validate_rsa_bits(bits: u32) -> Result<()> {
        if !(MIN_RSA_BITS..=MAX_RSA_BITS).contains(&bits) {
            return Err(PgpError::validation(format!(
                "RSA key size {} outside supported range {}..={}",
                bits, MIN_RSA_BITS, MAX_RSA_BITS
            )));
        }
        Ok(())
    }

    /// Validate the parts of an entity configuration that apply to every entity
    pub fn validate_entity_config(config: &EntityConfig) -> Result<()> {
        if config.subkey_lifetime_secs == 0 {
            return Err(PgpError::validation(
                "Subkey lifetime must be greater than zero",
            ));
        }
        Ok(())
    }

    fn validate_len(what: &str, len: usize, max: usize) -> Result<()> {
        if len > max {
            return Err(PgpError::validation(format!(
                "{} too large: {} bytes exceeds maximum of {} bytes",
                what, len, max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_size_validation() {
        assert!(Validator::validate_message_size(&[0u8; 1024]).is_ok());
        assert!(Validator::validate_message_size(&vec![0u8; MAX_MESSAGE_SIZE + 1]).is_err());
    }

    #[test]
    fn test_signature_size_validation() {
        assert!(Validator::validate_signature_size(&[0u8; 512]).is_ok());
        assert!(matches!(
            Validator::validate_signature_size(&vec![0u8; MAX_SIGNATURE_SIZE + 1]),
            Err(PgpError::Validation(_))
        ));
    }

    #[test]
    fn test_key_size_validation() {
        assert!(Validator::validate_key_size(&[0u8; 4096]).is_ok());
        assert!(Validator::validate_key_size(&vec![0u8; MAX_KEY_SIZE + 1]).is_err());
    }

    #[test]
    fn test_user_identity_validation() {
        assert!(Validator::validate_user_identity(&UserIdentity::default()).is_ok());
        assert!(Validator::validate_user_identity(&UserIdentity::new(
            "Alice",
            "work",
            "alice@example.com"
        ))
        .is_ok());

        let long = UserIdentity::new("a".repeat(MAX_USER_ID_LENGTH + 1), "", "");
        assert!(Validator::validate_user_identity(&long).is_err());

        let injected = UserIdentity::new("Alice\nMallory", "", "");
        assert!(Validator::validate_user_identity(&injected).is_err());
    }

    #[test]
    fn test_rsa_bits_validation() {
        assert!(Validator::validate_rsa_bits(2048).is_ok());
        assert!(Validator::validate_rsa_bits(4096).is_ok());
        assert!(Validator::validate_rsa_bits(1024).is_err());
        assert!(Validator::validate_rsa_bits(16384).is_err());
    }

    #[test]
    fn test_entity_config_validation() {
        assert!(Validator::validate_entity_config(&EntityConfig::default()).is_ok());
        let config = EntityConfig::default().with_subkey_lifetime_secs(0);
        assert!(Validator::validate_entity_config(&config).is_err());
    }
}
