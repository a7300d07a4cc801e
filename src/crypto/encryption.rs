//! Message encryption and decryption.
//!
//! Plaintext is gzip-compressed at best compression, wrapped in a literal data
//! packet, encrypted (SEIPDv1) to the recipient entity's encryption subkey and
//! ASCII armored as a `PGP MESSAGE`. Decryption undoes each step in reverse.
//!
//! The gzip envelope is specific to this crate: messages produced by other
//! OpenPGP tools decrypt but fail at decompression. Nothing here authenticates
//! the sender; see [`SignatureState`].
//!
//! Only the standard `PGP MESSAGE` armor label is accepted. Blocks armored
//! with a bare `Message` label, as some Go tooling writes them, are not valid
//! OpenPGP armor and fail with `ArmorDecode` before any block type check.

use crate::armor::{self, ArmorType};
use crate::crypto::entity::Entity;
use crate::error::{PgpError, Result};
use crate::validation::{Validator, MAX_DECOMPRESSED_SIZE};
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use pgp::composed::{Deserializable, Message, SignedKeyDetails, SignedSecretKey};
use pgp::types::KeyId;
use rand::{CryptoRng, RngCore};
use std::io::{Read, Write};
use tracing::debug;
use zeroize::Zeroize;

/// Whether the decrypted content carried a signature.
///
/// Signatures inside an encrypted message are reported but never checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureState {
    /// No signature packets around the literal data
    NotSigned,
    /// The content is signed; the signature was not verified
    Unverified,
}

/// The result of opening an encrypted message
#[derive(Debug, Clone)]
pub struct DecryptedMessage {
    /// The decompressed plaintext
    pub plaintext: Vec<u8>,
    /// Key ids the session key was decrypted for
    pub recipients: Vec<KeyId>,
    /// Signature presence on the inner message
    pub signature: SignatureState,
}

/// Encrypts a message to an entity
///
/// # Arguments
/// * `recipient` - The recipient entity; a public key is enough
/// * `message` - The plaintext to encrypt
/// * `rng` - Cryptographically secure random number generator
///
/// # Returns
/// An ASCII armored `PGP MESSAGE`
///
/// # Examples
/// ```rust,no_run
/// use pgpwrap::crypto::{encrypt_message, get_entity, EntityConfig};
/// use rand::rngs::OsRng;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let public = std::fs::read("bob.pub.asc")?;
/// let bob = get_entity(&public, None, &EntityConfig::default())?;
/// let armored = encrypt_message(&bob, b"hello world", &mut OsRng)?;
/// assert!(armored.starts_with("-----BEGIN PGP MESSAGE-----"));
/// # Ok(())
/// # }
/// ```
pub fn encrypt_message<R: CryptoRng + RngCore>(
    recipient: &Entity,
    message: &[u8],
    rng: &mut R,
) -> Result<String> {
    Validator::validate_message_size(message)?;

    let subkey = recipient.encryption_subkey();
    if !subkey.usage.can_encrypt() {
        return Err(PgpError::encryption(
            "Entity subkey cannot be used for encryption",
        ));
    }

    let compressed = compress(message)?;
    debug!(
        plaintext_len = message.len(),
        compressed_len = compressed.len(),
        "Compressed payload"
    );

    let literal = Message::new_literal_bytes("", &compressed);
    let encrypted = literal
        .encrypt_to_keys_seipdv1(
            &mut *rng,
            recipient.config().cipher_algorithm,
            &[&subkey.public_key],
        )
        .map_err(PgpError::encryption)?;

    encrypted
        .to_armored_string(Default::default())
        .map_err(PgpError::armor)
}

/// Decrypts an armored message with an entity's private key
///
/// # Returns
/// The original plaintext
///
/// # Examples
/// ```rust,no_run
/// use pgpwrap::crypto::{decrypt_message, get_entity, EntityConfig};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let public = std::fs::read("bob.pub.asc")?;
/// let private = std::fs::read("bob.sec.asc")?;
/// let bob = get_entity(&public, Some(&private), &EntityConfig::default())?;
/// let armored = std::fs::read("message.asc")?;
/// let plaintext = decrypt_message(&bob, &armored)?;
/// # Ok(())
/// # }
/// ```
pub fn decrypt_message(recipient: &Entity, armored: &[u8]) -> Result<Vec<u8>> {
    open_message(recipient, armored).map(|opened| opened.plaintext)
}

/// Decrypts an armored message and reports the recipients and signature state
/// along with the plaintext.
pub fn open_message(recipient: &Entity, armored: &[u8]) -> Result<DecryptedMessage> {
    Validator::validate_armored_size(armored)?;
    let body = armor::decode_expecting(armored, ArmorType::Message)?;

    let secret_key = recipient
        .private_key()
        .ok_or(PgpError::MissingPrivateKey)?;

    let message = Message::from_bytes(&body[..]).map_err(PgpError::message_read)?;
    let key = SignedSecretKey::new(
        secret_key.clone(),
        SignedKeyDetails::new(vec![], vec![], vec![], vec![]),
        vec![],
        vec![],
    );

    let (decrypted, recipients) = message
        .decrypt(String::new, &[&key])
        .map_err(PgpError::message_read)?;
    debug!(recipients = ?recipients, "Decrypted session key");

    let decrypted = decrypted.decompress().map_err(PgpError::message_read)?;
    let signature = if matches!(decrypted, Message::Signed { .. }) {
        SignatureState::Unverified
    } else {
        SignatureState::NotSigned
    };

    let mut compressed = decrypted
        .get_content()
        .map_err(PgpError::message_read)?
        .ok_or_else(|| PgpError::message_read("Decrypted message has no literal data"))?;

    let plaintext = decompress(&compressed, MAX_DECOMPRESSED_SIZE);
    compressed.zeroize();
    let plaintext = plaintext?;

    debug!(
        plaintext_len = plaintext.len(),
        signature = ?signature,
        "Decrypted message"
    );

    Ok(DecryptedMessage {
        plaintext,
        recipients,
        signature,
    })
}

fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn decompress(data: &[u8], limit: usize) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(PgpError::decompression("Payload is empty"));
    }

    let mut output = Vec::new();
    MultiGzDecoder::new(data)
        .take(limit as u64 + 1)
        .read_to_end(&mut output)
        .map_err(PgpError::decompression)?;

    if output.len() > limit {
        output.zeroize();
        return Err(PgpError::decompression(format!(
            "Decompressed payload exceeds {} bytes",
            limit
        )));
    }
    Ok(output)
}
