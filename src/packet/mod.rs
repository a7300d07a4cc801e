//! Leading-packet decoding for armored block bodies.
//!
//! Key and signature blocks are identified by their first packet. Instead of
//! casting a generic packet and hoping for the right type, the body is decoded
//! into [`DecodedPacket`] and callers match on the variant they need.

use pgp::packet::{self, Packet, PacketParser};

/// The first packet of a block body, tagged by kind
#[derive(Debug, Clone)]
pub enum DecodedPacket {
    /// Public-Key Packet
    PublicKey(packet::PublicKey),
    /// Secret-Key Packet
    PrivateKey(packet::SecretKey),
    /// Signature Packet
    Signature(packet::Signature),
    /// Any other packet, named by kind
    Other(&'static str),
}

impl DecodedPacket {
    /// Human readable name of the packet kind
    pub fn kind(&self) -> &'static str {
        match self {
            DecodedPacket::PublicKey(_) => "public key",
            DecodedPacket::PrivateKey(_) => "secret key",
            DecodedPacket::Signature(_) => "signature",
            DecodedPacket::Other(name) => name,
        }
    }
}

impl From<Packet> for DecodedPacket {
    fn from(packet: Packet) -> Self {
        match packet {
            Packet::PublicKey(key) => DecodedPacket::PublicKey(key),
            Packet::SecretKey(key) => DecodedPacket::PrivateKey(key),
            Packet::Signature(sig) => DecodedPacket::Signature(sig),
            other => DecodedPacket::Other(packet_name(&other)),
        }
    }
}

fn packet_name(packet: &Packet) -> &'static str {
    match packet {
        Packet::CompressedData(_) => "compressed data",
        Packet::PublicSubkey(_) => "public subkey",
        Packet::SecretSubkey(_) => "secret subkey",
        Packet::LiteralData(_) => "literal data",
        Packet::Marker(_) => "marker",
        Packet::OnePassSignature(_) => "one-pass signature",
        Packet::PublicKeyEncryptedSessionKey(_) => "public-key encrypted session key",
        Packet::SymKeyEncryptedSessionKey(_) => "symmetric-key encrypted session key",
        Packet::SymEncryptedData(_) => "symmetrically encrypted data",
        Packet::SymEncryptedProtectedData(_) => "symmetrically encrypted protected data",
        Packet::Trust(_) => "trust",
        Packet::UserAttribute(_) => "user attribute",
        Packet::UserId(_) => "user id",
        _ => "unknown",
    }
}

/// Decode the first packet of a binary block body.
///
/// Returns `Ok(None)` for an empty body. Packets after the first are not
/// parsed.
pub fn decode_first(body: &[u8]) -> pgp::errors::Result<Option<DecodedPacket>> {
    match PacketParser::new(body).next() {
        Some(packet) => Ok(Some(packet?.into())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::armor::{decode_expecting, ArmorType};

    const PUBLIC_KEY: &str = include_str!("../../tests/fixtures/public_key.asc");
    const PRIVATE_KEY: &str = include_str!("../../tests/fixtures/private_key.asc");

    #[test]
    fn test_decode_public_key_packet() {
        let body = decode_expecting(PUBLIC_KEY.as_bytes(), ArmorType::PublicKey).unwrap();
        let packet = decode_first(&body).unwrap().unwrap();
        assert!(matches!(packet, DecodedPacket::PublicKey(_)));
        assert_eq!(packet.kind(), "public key");
    }

    #[test]
    fn test_decode_private_key_packet() {
        let body = decode_expecting(PRIVATE_KEY.as_bytes(), ArmorType::PrivateKey).unwrap();
        let packet = decode_first(&body).unwrap().unwrap();
        assert!(matches!(packet, DecodedPacket::PrivateKey(_)));
    }

    #[test]
    fn test_empty_body() {
        assert!(decode_first(&[]).unwrap().is_none());
    }

    #[test]
    fn test_other_packet_kind() {
        assert_eq!(DecodedPacket::Other("user id").kind(), "user id");
    }
}
