//! Entity construction from independently parsed key packets.
//!
//! An [`Entity`] is the key-holder view the encrypt, decrypt, sign and verify
//! operations work against: a primary public key, an optional private key,
//! one identity with its self-signature template and one encryption subkey
//! with its binding template. The halves are taken as given; a public key and
//! a private key that do not belong together are only detected when a later
//! operation exercises them.

use crate::crypto::{keys, EntityConfig, KeyUsage};
use crate::error::Result;
use crate::validation::Validator;
use chrono::{DateTime, SubsecRound, Utc};
use pgp::packet::{self, KeyFlags, SignatureConfig, SignatureType, Subpacket, SubpacketData};
use pgp::types::{Fingerprint, KeyId, PublicKeyTrait};
use smallvec::smallvec;
use std::fmt;
use tracing::debug;

/// User identity fields: name, comment and email
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserIdentity {
    /// Full name, may be empty
    pub name: String,
    /// Free-form comment, rendered in parentheses
    pub comment: String,
    /// Email address, rendered in angle brackets
    pub email: String,
}

impl UserIdentity {
    /// Creates a new identity
    pub fn new(
        name: impl Into<String>,
        comment: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            comment: comment.into(),
            email: email.into(),
        }
    }

    /// Renders the OpenPGP user id, `name (comment) <email>`, skipping empty parts
    pub fn user_id(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if !self.name.is_empty() {
            parts.push(self.name.clone());
        }
        if !self.comment.is_empty() {
            parts.push(format!("({})", self.comment));
        }
        if !self.email.is_empty() {
            parts.push(format!("<{}>", self.email));
        }
        parts.join(" ")
    }

    /// True when all fields are blank
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.comment.is_empty() && self.email.is_empty()
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_id())
    }
}

/// The entity's identity and its positive certification template
#[derive(Debug, Clone)]
pub struct Identity {
    /// The identity fields the user id is rendered from
    pub user_id: UserIdentity,
    /// Positive certification template, flagged certify and sign
    pub self_signature: SignatureConfig,
}

/// The encryption subkey with its binding template
#[derive(Debug, Clone)]
pub struct EntitySubkey {
    /// Public half; shares key material with the primary key
    pub public_key: packet::PublicKey,
    /// Secret half, present when the entity was built with a private key
    pub secret_key: Option<packet::SecretKey>,
    /// Subkey binding template carrying flags, preferred hash and expiry
    pub binding_signature: SignatureConfig,
    /// Key flags the binding grants
    pub usage: KeyUsage,
    /// Seconds from creation until the subkey expires
    pub lifetime_secs: u32,
}

/// A key holder assembled from a public key and an optional private key
#[derive(Debug, Clone)]
pub struct Entity {
    primary_key: packet::PublicKey,
    private_key: Option<packet::SecretKey>,
    identity: Identity,
    subkey: EntitySubkey,
    config: EntityConfig,
    created_at: DateTime<Utc>,
}

impl Entity {
    /// The primary public key
    pub fn primary_key(&self) -> &packet::PublicKey {
        &self.primary_key
    }

    /// The private key, if the entity was built with one
    pub fn private_key(&self) -> Option<&packet::SecretKey> {
        self.private_key.as_ref()
    }

    /// Returns true if decrypt and sign are available
    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    pub fn key_id(&self) -> KeyId {
        self.primary_key.key_id()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.primary_key.fingerprint()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The subkey messages are encrypted to
    pub fn encryption_subkey(&self) -> &EntitySubkey {
        &self.subkey
    }

    pub fn config(&self) -> &EntityConfig {
        &self.config
    }

    /// Time the entity was assembled, used for all signature templates
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Expiry of the encryption subkey
    pub fn subkey_expires_at(&self) -> DateTime<Utc> {
        self.created_at + chrono::Duration::seconds(i64::from(self.subkey.lifetime_secs))
    }
}

/// Builds [`Entity`] values with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct EntityBuilder {
    config: EntityConfig,
    identity: UserIdentity,
}

impl EntityBuilder {
    /// Creates a builder with blank identity fields
    pub fn new(config: EntityConfig) -> Self {
        Self {
            config,
            identity: UserIdentity::default(),
        }
    }

    /// Sets the identity recorded in the self-signature template
    pub fn with_identity(mut self, identity: UserIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Assembles an entity.
    ///
    /// The primary identity is flagged certify and sign. The single subkey
    /// reuses the primary key material, is flagged for storage and
    /// communications encryption and expires after the configured lifetime.
    pub fn build(
        &self,
        public_key: packet::PublicKey,
        private_key: Option<packet::SecretKey>,
    ) -> Result<Entity> {
        Validator::validate_entity_config(&self.config)?;
        Validator::validate_user_identity(&self.identity)?;

        let created_at = Utc::now().trunc_subsecs(0);
        let key_id = public_key.key_id();
        let fingerprint = public_key.fingerprint();
        let algorithm = public_key.algorithm();
        let hash = self.config.hash_algorithm;

        let mut self_signature =
            SignatureConfig::v4(SignatureType::CertPositive, algorithm, hash);
        self_signature.hashed_subpackets = vec![
            Subpacket::regular(SubpacketData::SignatureCreationTime(created_at)),
            Subpacket::regular(SubpacketData::IssuerFingerprint(fingerprint.clone())),
            Subpacket::regular(SubpacketData::KeyFlags(
                KeyFlags::from(KeyUsage::certify_and_sign()).into(),
            )),
            Subpacket::regular(SubpacketData::IsPrimary(false)),
        ];
        self_signature.unhashed_subpackets =
            vec![Subpacket::regular(SubpacketData::Issuer(key_id.clone()))];

        let usage = KeyUsage::encrypt_only();
        let lifetime_secs = self.config.subkey_lifetime_secs;
        let mut binding_signature =
            SignatureConfig::v4(SignatureType::SubkeyBinding, algorithm, hash);
        binding_signature.hashed_subpackets = vec![
            Subpacket::regular(SubpacketData::SignatureCreationTime(created_at)),
            Subpacket::regular(SubpacketData::IssuerFingerprint(fingerprint)),
            Subpacket::regular(SubpacketData::PreferredHashAlgorithms(smallvec![hash])),
            Subpacket::regular(SubpacketData::KeyFlags(KeyFlags::from(usage).into())),
            Subpacket::regular(SubpacketData::KeyExpirationTime(chrono::Duration::seconds(
                i64::from(lifetime_secs),
            ))),
        ];
        binding_signature.unhashed_subpackets =
            vec![Subpacket::regular(SubpacketData::Issuer(key_id.clone()))];

        debug!(
            key_id = ?key_id,
            has_private_key = private_key.is_some(),
            subkey_lifetime_secs = lifetime_secs,
            "Built entity"
        );

        Ok(Entity {
            subkey: EntitySubkey {
                public_key: public_key.clone(),
                secret_key: private_key.clone(),
                binding_signature,
                usage,
                lifetime_secs,
            },
            identity: Identity {
                user_id: self.identity.clone(),
                self_signature,
            },
            primary_key: public_key,
            private_key,
            config: self.config,
            created_at,
        })
    }
}

/// Parses an armored public key and an optional armored private key and
/// assembles them into an entity with blank identity fields.
///
/// # Examples
/// ```rust,no_run
/// use pgpwrap::crypto::{get_entity, EntityConfig};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let public = std::fs::read("alice.pub.asc")?;
/// let private = std::fs::read("alice.sec.asc")?;
/// let entity = get_entity(&public, Some(&private), &EntityConfig::default())?;
/// assert!(entity.has_private_key());
/// # Ok(())
/// # }
/// ```
pub fn get_entity(
    public_key: &[u8],
    private_key: Option<&[u8]>,
    config: &EntityConfig,
) -> Result<Entity> {
    let public = keys::parse_public_key(public_key)?;
    let private = private_key.map(keys::parse_private_key).transpose()?;
    EntityBuilder::new(*config).build(public, private)
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Entity({:?}, {}, {})",
            self.key_id(),
            if self.has_private_key() {
                "public+private"
            } else {
                "public"
            },
            self.identity.user_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PgpError;
    use pgp::crypto::hash::HashAlgorithm;

    const PUBLIC_KEY: &str = include_str!("../../tests/fixtures/public_key.asc");
    const PRIVATE_KEY: &str = include_str!("../../tests/fixtures/private_key.asc");

    #[test]
    fn test_user_id_rendering() {
        assert_eq!(
            UserIdentity::new("Alice", "work", "alice@example.com").user_id(),
            "Alice (work) <alice@example.com>"
        );
        assert_eq!(
            UserIdentity::new("Bob", "", "bob@example.com").user_id(),
            "Bob <bob@example.com>"
        );
        assert_eq!(UserIdentity::default().user_id(), "");
        assert!(UserIdentity::default().is_empty());
    }

    #[test]
    fn test_build_public_only_entity() {
        let entity = get_entity(PUBLIC_KEY.as_bytes(), None, &EntityConfig::default()).unwrap();

        assert!(!entity.has_private_key());
        assert!(entity.encryption_subkey().secret_key.is_none());
        assert_eq!(entity.key_id(), entity.encryption_subkey().public_key.key_id());
        assert!(entity.identity().user_id.is_empty());
    }

    #[test]
    fn test_build_full_entity() {
        let entity = get_entity(
            PUBLIC_KEY.as_bytes(),
            Some(PRIVATE_KEY.as_bytes()),
            &EntityConfig::default(),
        )
        .unwrap();

        assert!(entity.has_private_key());
        assert_eq!(
            entity.private_key().unwrap().key_id(),
            entity.primary_key().key_id()
        );
        assert_eq!(entity.fingerprint(), entity.primary_key().fingerprint());
    }

    #[test]
    fn test_signature_templates() {
        let config = EntityConfig::default().with_hash_algorithm(HashAlgorithm::SHA2_512);
        let entity = get_entity(PUBLIC_KEY.as_bytes(), None, &config).unwrap();

        let identity = entity.identity();
        assert_eq!(identity.self_signature.typ, SignatureType::CertPositive);
        assert_eq!(identity.self_signature.hash_alg, HashAlgorithm::SHA2_512);
        assert_eq!(identity.self_signature.hashed_subpackets.len(), 4);

        let subkey = entity.encryption_subkey();
        assert_eq!(subkey.binding_signature.typ, SignatureType::SubkeyBinding);
        assert_eq!(subkey.binding_signature.unhashed_subpackets.len(), 1);
        assert!(subkey.usage.can_encrypt());
        assert_eq!(subkey.lifetime_secs, 86400 * 365);
    }

    #[test]
    fn test_subkey_expiry() {
        let config = EntityConfig::default().with_subkey_lifetime_secs(3600);
        let entity = get_entity(PUBLIC_KEY.as_bytes(), None, &config).unwrap();
        assert_eq!(
            entity.subkey_expires_at() - entity.created_at(),
            chrono::Duration::seconds(3600)
        );
    }

    #[test]
    fn test_zero_lifetime_rejected() {
        let config = EntityConfig::default().with_subkey_lifetime_secs(0);
        assert!(matches!(
            get_entity(PUBLIC_KEY.as_bytes(), None, &config),
            Err(PgpError::Validation(_))
        ));
    }

    #[test]
    fn test_identity_recorded() {
        let public = keys::parse_public_key(PUBLIC_KEY.as_bytes()).unwrap();
        let identity = UserIdentity::new("Alice", "", "alice@example.com");
        let entity = EntityBuilder::new(EntityConfig::default())
            .with_identity(identity.clone())
            .build(public, None)
            .unwrap();
        assert_eq!(entity.identity().user_id, identity);
        assert!(entity.to_string().contains("Alice <alice@example.com>"));
    }
}
