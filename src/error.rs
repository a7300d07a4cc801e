//! Error types for pgpwrap operations.

use crate::armor::ArmorType;
use thiserror::Error;

/// Result type alias for pgpwrap operations.
pub type Result<T> = std::result::Result<T, PgpError>;

/// Main error type for pgpwrap operations.
///
/// Every failure is terminal for the call that produced it. `VerificationFailed`
/// is the expected negative outcome of a signature check and can be told apart
/// from structural errors with [`PgpError::is_verification_failure`].
#[derive(Error, Debug)]
pub enum PgpError {
    /// Input could not be decoded as ASCII armor
    #[error("Armor decode error: {0}")]
    ArmorDecode(String),

    /// Armor block type differs from the one the operation requires
    #[error("Invalid block type: expected {expected}, found {found}")]
    InvalidBlockType {
        /// Block type the operation accepts
        expected: ArmorType,
        /// Block type found in the input
        found: ArmorType,
    },

    /// Key block body is not a key packet of the expected kind
    #[error("Invalid key data: {0}")]
    InvalidKeyData(String),

    /// Entity signature templates could not be built
    #[error("Entity construction error: {0}")]
    EntityConstruction(String),

    /// Encryption to the recipient failed
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Armor encoding failed
    #[error("Armor error: {0}")]
    Armor(String),

    /// Encrypted message could not be read or decrypted
    #[error("Message read error: {0}")]
    MessageRead(String),

    /// Decrypted payload is not a valid gzip stream
    #[error("Decompression error: {0}")]
    Decompression(String),

    /// Signature block does not hold a signature packet
    #[error("Signature parse error: {0}")]
    SignatureParse(String),

    /// Signature creation failed
    #[error("Signing error: {0}")]
    Signing(String),

    /// Signature does not match the message or key
    #[error("Signature verification failed: {0}")]
    VerificationFailed(String),

    /// Operation needs a private key but the entity only carries a public key
    #[error("Entity has no private key")]
    MissingPrivateKey,

    /// Key pair generation failed
    #[error("Key generation error: {0}")]
    KeyGeneration(String),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Longest error detail kept from an underlying library error, in bytes
pub const MAX_ERROR_DETAIL: usize = 512;

/// Renders an error detail, cut at [`MAX_ERROR_DETAIL`] bytes.
///
/// Parser errors from the OpenPGP engine can carry the unparsed input.
fn detail<T: ToString>(msg: T) -> String {
    let mut text = msg.to_string();
    if text.len() > MAX_ERROR_DETAIL {
        let mut end = MAX_ERROR_DETAIL;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
        text.push_str("...");
    }
    text
}

impl PgpError {
    /// Creates a new armor decode error.
    pub fn armor_decode<T: ToString>(msg: T) -> Self {
        Self::ArmorDecode(detail(msg))
    }

    /// Creates a new block type mismatch error.
    pub fn invalid_block_type(expected: ArmorType, found: ArmorType) -> Self {
        Self::InvalidBlockType { expected, found }
    }

    /// Creates a new invalid key data error.
    pub fn invalid_key_data<T: ToString>(msg: T) -> Self {
        Self::InvalidKeyData(detail(msg))
    }

    /// Creates a new entity construction error.
    pub fn entity<T: ToString>(msg: T) -> Self {
        Self::EntityConstruction(detail(msg))
    }

    /// Creates a new encryption error.
    pub fn encryption<T: ToString>(msg: T) -> Self {
        Self::Encryption(detail(msg))
    }

    /// Creates a new armor encoding error.
    pub fn armor<T: ToString>(msg: T) -> Self {
        Self::Armor(detail(msg))
    }

    /// Creates a new message read error.
    pub fn message_read<T: ToString>(msg: T) -> Self {
        Self::MessageRead(detail(msg))
    }

    /// Creates a new decompression error.
    pub fn decompression<T: ToString>(msg: T) -> Self {
        Self::Decompression(detail(msg))
    }

    /// Creates a new signature parse error.
    pub fn signature_parse<T: ToString>(msg: T) -> Self {
        Self::SignatureParse(detail(msg))
    }

    /// Creates a new signing error.
    pub fn signing<T: ToString>(msg: T) -> Self {
        Self::Signing(detail(msg))
    }

    /// Creates a new verification failure.
    pub fn verification_failed<T: ToString>(msg: T) -> Self {
        Self::VerificationFailed(detail(msg))
    }

    /// Creates a new key generation error.
    pub fn key_generation<T: ToString>(msg: T) -> Self {
        Self::KeyGeneration(detail(msg))
    }

    /// Creates a new validation error.
    pub fn validation<T: ToString>(msg: T) -> Self {
        Self::Validation(detail(msg))
    }

    /// Creates a new configuration error.
    pub fn config<T: ToString>(msg: T) -> Self {
        Self::Config(detail(msg))
    }

    /// Returns true for a signature that did not match, as opposed to a
    /// malformed input or a missing key.
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, Self::VerificationFailed(_))
    }

    /// Returns true when the input was armored with an unexpected block type.
    pub fn is_block_type_mismatch(&self) -> bool {
        matches!(self, Self::InvalidBlockType { .. })
    }
}
