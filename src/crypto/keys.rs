//! Key parsing and RSA key pair generation.
//!
//! Key blocks are identified by their armor header and their leading packet.
//! Anything after the first packet (user ids, subkeys, self-signatures) is
//! ignored; the entity layer synthesizes what it needs.

use crate::armor::{self, ArmorType};
use crate::crypto::entity::UserIdentity;
use crate::crypto::EntityConfig;
use crate::error::{PgpError, Result};
use crate::packet::{decode_first, DecodedPacket};
use crate::validation::Validator;
use pgp::composed::{
    KeyType, SecretKeyParamsBuilder, SignedPublicKey, SignedSecretKey, SubkeyParamsBuilder,
};
use pgp::packet;
use pgp::types::PublicKeyTrait;
use rand::{CryptoRng, RngCore};
use smallvec::smallvec;
use std::time::Duration;
use tracing::{debug, info};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A freshly generated key pair, both halves ASCII armored.
///
/// Both strings are wiped when the pair is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ArmoredKeyPair {
    /// `PGP PUBLIC KEY BLOCK`
    pub public_key: String,
    /// `PGP PRIVATE KEY BLOCK`, not passphrase protected
    pub private_key: String,
}

/// Parses an armored public key block into its primary public key packet.
///
/// # Arguments
/// * `armored` - A `PGP PUBLIC KEY BLOCK`
///
/// # Returns
/// The primary key packet, or `InvalidBlockType` / `InvalidKeyData`
///
/// # Examples
/// ```rust,no_run
/// use pgpwrap::crypto::parse_public_key;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let armored = std::fs::read("alice.pub.asc")?;
/// let key = parse_public_key(&armored)?;
/// # Ok(())
/// # }
/// ```
pub fn parse_public_key(armored: &[u8]) -> Result<packet::PublicKey> {
    Validator::validate_key_size(armored)?;
    let body = armor::decode_expecting(armored, ArmorType::PublicKey)?;

    match decode_first(&body).map_err(PgpError::invalid_key_data)? {
        Some(DecodedPacket::PublicKey(key)) => Ok(key),
        Some(other) => Err(PgpError::invalid_key_data(format!(
            "Expected a public key packet, found {}",
            other.kind()
        ))),
        None => Err(PgpError::invalid_key_data("Public key block is empty")),
    }
}

/// Parses an armored private key block into its primary secret key packet.
///
/// The secret key must not be passphrase protected for decrypt and sign to
/// use it.
pub fn parse_private_key(armored: &[u8]) -> Result<packet::SecretKey> {
    Validator::validate_key_size(armored)?;
    let body = armor::decode_expecting(armored, ArmorType::PrivateKey)?;

    match decode_first(&body).map_err(PgpError::invalid_key_data)? {
        Some(DecodedPacket::PrivateKey(key)) => Ok(key),
        Some(other) => Err(PgpError::invalid_key_data(format!(
            "Expected a secret key packet, found {}",
            other.kind()
        ))),
        None => Err(PgpError::invalid_key_data("Private key block is empty")),
    }
}

/// Generates an RSA key pair for the given identity.
///
/// The primary key may certify and sign. A single RSA subkey is created for
/// encryption and expires after `config.subkey_lifetime_secs`. The
/// self-signature records `config.cipher_algorithm`, `config.hash_algorithm`
/// and `config.compression_algorithm` as preferences.
///
/// # Examples
/// ```rust,no_run
/// use pgpwrap::crypto::{generate_key_pair, EntityConfig, UserIdentity};
/// use rand::rngs::OsRng;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let identity = UserIdentity::new("Alice", "", "alice@example.com");
/// let pair = generate_key_pair(&identity, &EntityConfig::default(), &mut OsRng)?;
/// assert!(pair.public_key.starts_with("-----BEGIN PGP PUBLIC KEY BLOCK-----"));
/// # Ok(())
/// # }
/// ```
pub fn generate_key_pair<R: CryptoRng + RngCore>(
    identity: &UserIdentity,
    config: &EntityConfig,
    rng: &mut R,
) -> Result<ArmoredKeyPair> {
    Validator::validate_entity_config(config)?;
    Validator::validate_rsa_bits(config.rsa_bits)?;
    if identity.is_empty() {
        return Err(PgpError::validation(
            "Key generation requires a name, comment or email",
        ));
    }
    Validator::validate_user_identity(identity)?;

    let user_id = identity.user_id();
    info!(user_id = %user_id, rsa_bits = config.rsa_bits, "Generating RSA key pair");

    let subkey = SubkeyParamsBuilder::default()
        .key_type(KeyType::Rsa(config.rsa_bits))
        .can_encrypt(true)
        .expiration(Some(Duration::from_secs(u64::from(
            config.subkey_lifetime_secs,
        ))))
        .build()
        .map_err(PgpError::key_generation)?;

    let params = SecretKeyParamsBuilder::default()
        .key_type(KeyType::Rsa(config.rsa_bits))
        .can_certify(true)
        .can_sign(true)
        .primary_user_id(user_id)
        .preferred_symmetric_algorithms(smallvec![config.cipher_algorithm])
        .preferred_hash_algorithms(smallvec![config.hash_algorithm])
        .preferred_compression_algorithms(smallvec![config.compression_algorithm])
        .subkeys(vec![subkey])
        .build()
        .map_err(PgpError::key_generation)?;

    let secret_key = params
        .generate(&mut *rng)
        .map_err(PgpError::key_generation)?;
    let signed_secret_key: SignedSecretKey = secret_key
        .sign(&mut *rng, String::new)
        .map_err(PgpError::key_generation)?;
    let signed_public_key = SignedPublicKey::from(signed_secret_key.clone());

    debug!(key_id = ?signed_secret_key.key_id(), "Self-signed generated key");

    let public_key = signed_public_key
        .to_armored_string(Default::default())
        .map_err(PgpError::armor)?;
    let private_key = signed_secret_key
        .to_armored_string(Default::default())
        .map_err(PgpError::armor)?;

    Ok(ArmoredKeyPair {
        public_key,
        private_key,
    })
}
