//! ASCII armor decoding for PGP messages, keys and signatures.
//!
//! Framing, base64 and CRC-24 handling come from `pgp::armor`. This module
//! turns the parsed block header into an [`ArmorType`] so callers can insist
//! on the block kind they expect before looking at the body.

use crate::error::{PgpError, Result};
use pgp::armor::{BlockType, Dearmor, Headers};
use std::fmt;
use std::io::Read;

/// ASCII armor block types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArmorType {
    /// PGP message (encrypted or signed data)
    Message,
    /// Signed message with cleartext
    SignedMessage,
    /// Public key block
    PublicKey,
    /// Private key block
    PrivateKey,
    /// Signature block
    Signature,
    /// Multi-part message
    MultiPartMessage { part: usize, total: usize },
    /// Any other armor label, such as PEM or OpenSSH blocks
    Custom(String),
}

impl ArmorType {
    /// Get the armor header string for this type
    pub fn header_string(&self) -> String {
        match self {
            ArmorType::Message => "PGP MESSAGE".to_string(),
            ArmorType::SignedMessage => "PGP SIGNED MESSAGE".to_string(),
            ArmorType::PublicKey => "PGP PUBLIC KEY BLOCK".to_string(),
            ArmorType::PrivateKey => "PGP PRIVATE KEY BLOCK".to_string(),
            ArmorType::Signature => "PGP SIGNATURE".to_string(),
            ArmorType::MultiPartMessage { part, total } => {
                format!("PGP MESSAGE, PART {}/{}", part, total)
            }
            ArmorType::Custom(s) => s.clone(),
        }
    }
}

impl fmt::Display for ArmorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header_string())
    }
}

impl From<BlockType> for ArmorType {
    fn from(typ: BlockType) -> Self {
        match typ {
            BlockType::Message => ArmorType::Message,
            BlockType::CleartextMessage => ArmorType::SignedMessage,
            BlockType::PublicKey => ArmorType::PublicKey,
            BlockType::PrivateKey => ArmorType::PrivateKey,
            BlockType::Signature => ArmorType::Signature,
            BlockType::MultiPartMessage(part, total) => {
                ArmorType::MultiPartMessage { part, total }
            }
            other => ArmorType::Custom(other.to_string()),
        }
    }
}

/// A decoded armor block
#[derive(Debug, Clone)]
pub struct ArmoredBlock {
    /// The type of armored data
    pub armor_type: ArmorType,
    /// Armor headers (key to values)
    pub headers: Headers,
    /// The decoded binary body
    pub data: Vec<u8>,
}

/// Decode ASCII armored input to its block type, headers and binary body
pub fn decode(input: &[u8]) -> Result<ArmoredBlock> {
    let mut dearmor = Dearmor::new(input);
    let mut data = Vec::new();
    dearmor
        .read_to_end(&mut data)
        .map_err(|e| PgpError::armor_decode(format!("Malformed armor ({})", e.kind())))?;

    let block_type = dearmor
        .typ
        .ok_or_else(|| PgpError::armor_decode("No armor header found"))?;

    Ok(ArmoredBlock {
        armor_type: block_type.into(),
        headers: std::mem::take(&mut dearmor.headers),
        data,
    })
}

/// Decode ASCII armored input and require a specific block type.
///
/// Returns the binary body on success and `InvalidBlockType` when the header
/// names a different kind of block.
pub fn decode_expecting(input: &[u8], expected: ArmorType) -> Result<Vec<u8>> {
    let block = decode(input)?;
    if block.armor_type != expected {
        return Err(PgpError::invalid_block_type(expected, block.armor_type));
    }
    Ok(block.data)
}
