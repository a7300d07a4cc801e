//! Security-focused tests for pgpwrap validation and tamper detection
//!
//! These tests verify that tampered signatures and ciphertexts are rejected,
//! that armor block types cannot be substituted for one another and that
//! resource limits hold for oversized input.

use pgp::composed::StandaloneSignature;
use pgpwrap::{
    armor::{self, ArmorType},
    crypto::{
        decrypt_message, encrypt_message, get_entity, parse_private_key, parse_public_key,
        sign_message, verify_signature, Entity, EntityConfig,
    },
    packet::{decode_first, DecodedPacket},
    validation::{MAX_MESSAGE_SIZE, MAX_SIGNATURE_SIZE},
    PgpError,
};
use rand::rngs::OsRng;

const PUBLIC_KEY: &str = include_str!("fixtures/public_key.asc");
const PRIVATE_KEY: &str = include_str!("fixtures/private_key.asc");

fn full_entity() -> Entity {
    get_entity(
        PUBLIC_KEY.as_bytes(),
        Some(PRIVATE_KEY.as_bytes()),
        &EntityConfig::default(),
    )
    .unwrap()
}

fn public_entity() -> Entity {
    get_entity(PUBLIC_KEY.as_bytes(), None, &EntityConfig::default()).unwrap()
}

/// Replaces one base64 character in the middle of the armored body
fn corrupt_armor_body(armored: &str) -> String {
    let lines: Vec<&str> = armored.lines().collect();
    let body_lines: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| {
            !line.is_empty()
                && !line.starts_with("-----")
                && !line.starts_with('=')
                && !line.contains(": ")
        })
        .map(|(i, _)| i)
        .collect();
    let target = body_lines[body_lines.len() / 2];

    let mut out = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i == target {
            let mut chars: Vec<char> = line.chars().collect();
            let mid = chars.len() / 2;
            chars[mid] = if chars[mid] == 'A' { 'B' } else { 'A' };
            out.push(chars.into_iter().collect::<String>());
        } else {
            out.push(line.to_string());
        }
    }
    out.join("\n")
}

#[test]
fn test_tampered_signature_rejected() {
    let signature = sign_message(&full_entity(), b"hello world").unwrap();

    // Flip the final byte of the signature value and re-armor the packet
    let mut body = armor::decode(signature.as_bytes()).unwrap().data;
    let last = body.len() - 1;
    body[last] ^= 0x01;
    let tampered = match decode_first(&body).unwrap() {
        Some(DecodedPacket::Signature(sig)) => StandaloneSignature::new(sig)
            .to_armored_string(Default::default())
            .unwrap(),
        other => panic!("expected a signature packet, got {other:?}"),
    };

    let result = verify_signature(&public_entity(), b"hello world", tampered.as_bytes());
    assert!(matches!(result, Err(PgpError::VerificationFailed(_))));
}

#[test]
fn test_tampered_message_rejected() {
    let signature = sign_message(&full_entity(), b"hello world").unwrap();

    for message in [&b"hello world!"[..], b"Hello world", b""] {
        let result = verify_signature(&public_entity(), message, signature.as_bytes());
        assert!(
            matches!(result, Err(PgpError::VerificationFailed(_))),
            "tampered message {:?} verified",
            message
        );
    }
}

#[test]
fn test_tampered_ciphertext_rejected() {
    let mut rng = OsRng;
    let encrypted = encrypt_message(&public_entity(), b"hello world", &mut rng).unwrap();
    let tampered = corrupt_armor_body(&encrypted);

    assert!(decrypt_message(&full_entity(), tampered.as_bytes()).is_err());
}

#[test]
fn test_signature_block_is_not_a_message() {
    let signature = sign_message(&full_entity(), b"hello world").unwrap();

    let err = decrypt_message(&full_entity(), signature.as_bytes()).unwrap_err();
    assert!(err.is_block_type_mismatch());
    match err {
        PgpError::InvalidBlockType { expected, found } => {
            assert_eq!(expected, ArmorType::Message);
            assert_eq!(found, ArmorType::Signature);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_message_block_is_not_a_signature() {
    let mut rng = OsRng;
    let encrypted = encrypt_message(&public_entity(), b"hello world", &mut rng).unwrap();

    let err = verify_signature(&public_entity(), b"hello world", encrypted.as_bytes()).unwrap_err();
    assert!(err.is_block_type_mismatch());
}

#[test]
fn test_key_blocks_cannot_be_swapped() {
    assert!(parse_public_key(PRIVATE_KEY.as_bytes())
        .unwrap_err()
        .is_block_type_mismatch());
    assert!(parse_private_key(PUBLIC_KEY.as_bytes())
        .unwrap_err()
        .is_block_type_mismatch());

    // The private block in the public position fails entity construction too
    assert!(get_entity(
        PRIVATE_KEY.as_bytes(),
        Some(PUBLIC_KEY.as_bytes()),
        &EntityConfig::default()
    )
    .is_err());
}

#[test]
fn test_public_only_entity_cannot_decrypt_or_sign() {
    let mut rng = OsRng;
    let public = public_entity();
    let encrypted = encrypt_message(&public, b"hello world", &mut rng).unwrap();

    assert!(matches!(
        decrypt_message(&public, encrypted.as_bytes()),
        Err(PgpError::MissingPrivateKey)
    ));
    assert!(matches!(
        sign_message(&public, b"hello world"),
        Err(PgpError::MissingPrivateKey)
    ));
}

#[test]
fn test_garbage_input_rejected() {
    let entity = full_entity();

    for input in [
        &b""[..],
        b"not armored at all",
        b"-----BEGIN PGP MESSAGE-----\n\n!!!!\n-----END PGP MESSAGE-----\n",
    ] {
        assert!(decrypt_message(&entity, input).is_err());
        assert!(verify_signature(&entity, b"hello world", input).is_err());
        assert!(parse_public_key(input).is_err());
    }
}

#[test]
fn test_malformed_armor_error_is_short() {
    let mut input = b"-----BEGIN Message-----\n\n".to_vec();
    input.extend(std::iter::repeat(b'Q').take(1024 * 1024));
    input.extend_from_slice(b"\n-----END Message-----\n");

    let err = decrypt_message(&full_entity(), &input).unwrap_err();
    assert!(matches!(err, PgpError::ArmorDecode(_)));
    assert!(err.to_string().len() < 1024);

    let err = verify_signature(&public_entity(), b"hello world", &input[..60_000]).unwrap_err();
    assert!(err.to_string().len() < 1024);
}

#[test]
fn test_oversized_message_rejected() {
    let mut rng = OsRng;
    let entity = full_entity();
    let oversized = vec![0u8; MAX_MESSAGE_SIZE + 1];

    assert!(matches!(
        encrypt_message(&entity, &oversized, &mut rng),
        Err(PgpError::Validation(_))
    ));
    assert!(matches!(
        sign_message(&entity, &oversized),
        Err(PgpError::Validation(_))
    ));
}

#[test]
fn test_oversized_signature_rejected() {
    let oversized = vec![b'A'; MAX_SIGNATURE_SIZE + 1];

    let result = verify_signature(&public_entity(), b"hello world", &oversized);
    assert!(matches!(result, Err(PgpError::Validation(_))));
}
