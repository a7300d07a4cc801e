//! Detached signatures over raw message bytes.
//!
//! Signatures are v4 `Binary` signatures made with the entity's primary
//! secret key, armored as `PGP SIGNATURE`. Verification returns
//! [`PgpError::VerificationFailed`] for a signature that does not match the
//! message or key, so callers can tell a rejected signature apart from input
//! that could not be parsed at all.

use crate::armor::{self, ArmorType};
use crate::crypto::entity::Entity;
use crate::error::{PgpError, Result};
use crate::packet::{decode_first, DecodedPacket};
use crate::validation::Validator;
use chrono::{SubsecRound, Utc};
use pgp::composed::StandaloneSignature;
use pgp::packet::{self, SignatureConfig, SignatureType, Subpacket, SubpacketData};
use pgp::types::{KeyVersion, PublicKeyTrait};
use tracing::{debug, warn};

/// Anything that can supply the public key a signature is checked against
pub trait VerificationKey {
    /// The primary public key
    fn verification_key(&self) -> &packet::PublicKey;
}

impl VerificationKey for Entity {
    fn verification_key(&self) -> &packet::PublicKey {
        self.primary_key()
    }
}

impl VerificationKey for packet::PublicKey {
    fn verification_key(&self) -> &packet::PublicKey {
        self
    }
}

/// Signs a message with an entity's private key
///
/// # Arguments
/// * `signer` - The signing entity; must carry a private key
/// * `message` - The bytes to sign
///
/// # Returns
/// An ASCII armored detached signature
///
/// # Examples
/// ```rust,no_run
/// use pgpwrap::crypto::{get_entity, sign_message, EntityConfig};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let public = std::fs::read("alice.pub.asc")?;
/// let private = std::fs::read("alice.sec.asc")?;
/// let alice = get_entity(&public, Some(&private), &EntityConfig::default())?;
/// let signature = sign_message(&alice, b"hello world")?;
/// assert!(signature.starts_with("-----BEGIN PGP SIGNATURE-----"));
/// # Ok(())
/// # }
/// ```
pub fn sign_message(signer: &Entity, message: &[u8]) -> Result<String> {
    Validator::validate_message_size(message)?;

    let secret_key = signer.private_key().ok_or(PgpError::MissingPrivateKey)?;
    if secret_key.version() != KeyVersion::V4 {
        return Err(PgpError::signing(format!(
            "Unsupported key version {:?}, only v4 keys can sign",
            secret_key.version()
        )));
    }

    let mut config = SignatureConfig::v4(
        SignatureType::Binary,
        secret_key.algorithm(),
        signer.config().hash_algorithm,
    );
    config.hashed_subpackets = vec![
        Subpacket::regular(SubpacketData::SignatureCreationTime(
            Utc::now().trunc_subsecs(0),
        )),
        Subpacket::regular(SubpacketData::IssuerFingerprint(secret_key.fingerprint())),
    ];
    config.unhashed_subpackets = vec![Subpacket::regular(SubpacketData::Issuer(
        secret_key.key_id(),
    ))];

    let signature = config
        .sign(secret_key, String::new, message)
        .map_err(PgpError::signing)?;

    debug!(
        key_id = ?secret_key.key_id(),
        message_len = message.len(),
        "Created detached signature"
    );

    StandaloneSignature::new(signature)
        .to_armored_string(Default::default())
        .map_err(PgpError::armor)
}

/// Verifies a detached armored signature over a message
///
/// # Arguments
/// * `key` - An [`Entity`] or a bare public key packet
/// * `message` - The signed bytes
/// * `armored_signature` - A `PGP SIGNATURE` block
///
/// # Returns
/// `Ok(())` if the signature matches; `VerificationFailed` if it does not
///
/// # Examples
/// ```rust,no_run
/// use pgpwrap::crypto::{parse_public_key, verify_signature};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key = parse_public_key(&std::fs::read("alice.pub.asc")?)?;
/// let signature = std::fs::read("message.sig")?;
/// verify_signature(&key, b"hello world", &signature)?;
/// # Ok(())
/// # }
/// ```
pub fn verify_signature<K: VerificationKey + ?Sized>(
    key: &K,
    message: &[u8],
    armored_signature: &[u8],
) -> Result<()> {
    Validator::validate_signature_size(armored_signature)?;
    let body = armor::decode_expecting(armored_signature, ArmorType::Signature)?;

    let signature = match decode_first(&body).map_err(PgpError::signature_parse)? {
        Some(DecodedPacket::Signature(signature)) => signature,
        Some(other) => {
            return Err(PgpError::signature_parse(format!(
                "Expected a signature packet, found {}",
                other.kind()
            )))
        }
        None => return Err(PgpError::signature_parse("Signature block is empty")),
    };

    let public_key = key.verification_key();
    signature.verify(public_key, message).map_err(|e| {
        warn!(key_id = ?public_key.key_id(), error = %e, "Signature verification failed");
        PgpError::verification_failed(e)
    })?;

    debug!(key_id = ?public_key.key_id(), "Signature verified");
    Ok(())
}
