//! # pgpwrap - OpenPGP message helpers
//!
//! A thin layer over OpenPGP for encrypting, decrypting, signing and
//! verifying byte messages with ASCII-armored RSA keys.
//!
//! ## Features
//!
//! - **Armored keys**: Parse `PGP PUBLIC KEY BLOCK` / `PGP PRIVATE KEY BLOCK` input
//! - **Entities**: Assemble a self-certified identity with an encryption subkey
//! - **Gzip envelope**: Plaintext is gzip-compressed before encryption
//! - **Detached signatures**: Armored `PGP SIGNATURE` over arbitrary bytes
//!
//! ## Examples
//!
//! ### Encryption and Decryption
//!
//! ```rust,no_run
//! use pgpwrap::crypto::{decrypt_message, encrypt_message, get_entity, EntityConfig};
//! use rand::rngs::OsRng;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let public = std::fs::read("alice.pub.asc")?;
//! let private = std::fs::read("alice.sec.asc")?;
//! let config = EntityConfig::default();
//!
//! let recipient = get_entity(&public, None, &config)?;
//! let armored = encrypt_message(&recipient, b"hello world", &mut OsRng)?;
//!
//! let owner = get_entity(&public, Some(&private), &config)?;
//! let plaintext = decrypt_message(&owner, armored.as_bytes())?;
//! assert_eq!(plaintext, b"hello world");
//! # Ok(())
//! # }
//! ```
//!
//! ### Signing and Verification
//!
//! ```rust,no_run
//! use pgpwrap::crypto::{get_entity, sign_message, verify_signature, EntityConfig};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let public = std::fs::read("alice.pub.asc")?;
//! let private = std::fs::read("alice.sec.asc")?;
//! let signer = get_entity(&public, Some(&private), &EntityConfig::default())?;
//!
//! let signature = sign_message(&signer, b"release-1.0.tar.gz contents")?;
//! verify_signature(&signer, b"release-1.0.tar.gz contents", signature.as_bytes())?;
//! # Ok(())
//! # }
//! ```

pub mod armor;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod packet;
pub mod validation;

pub use error::{PgpError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
