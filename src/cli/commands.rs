//! Command implementations for the pgpwrap CLI.

use crate::{
    cli::utils::{load_entity, read_file, write_file, write_secret_file},
    crypto::{
        encrypt_message, generate_key_pair, open_message, sign_message, verify_signature,
        EntityConfig, SignatureState, UserIdentity,
    },
    Result,
};
use rand::rngs::OsRng;
use std::path::Path;
use tracing::{info, warn};

/// Execute generate-key command
pub fn generate_key(
    identity: &UserIdentity,
    config: &EntityConfig,
    public_out: &Path,
    private_out: &Path,
) -> Result<()> {
    info!(user_id = %identity, rsa_bits = config.rsa_bits, "Generating key pair");

    let pair = generate_key_pair(identity, config, &mut OsRng)?;
    write_file(public_out, pair.public_key.as_bytes())?;
    write_secret_file(private_out, pair.private_key.as_bytes())?;

    info!(
        public_key = %public_out.display(),
        private_key = %private_out.display(),
        "✅ Generated key pair successfully"
    );
    Ok(())
}

/// Execute encrypt command
pub fn encrypt(config: &EntityConfig, public_key: &Path, input: &Path, output: &Path) -> Result<()> {
    let recipient = load_entity(public_key, None, config)?;
    let plaintext = read_file(input)?;

    info!(
        recipient = ?recipient.key_id(),
        input = %input.display(),
        size = plaintext.len(),
        "Encrypting file"
    );

    let armored = encrypt_message(&recipient, &plaintext, &mut OsRng)?;
    write_file(output, armored.as_bytes())?;

    info!(output = %output.display(), "✅ File encrypted successfully");
    Ok(())
}

/// Execute decrypt command
pub fn decrypt(
    config: &EntityConfig,
    public_key: &Path,
    private_key: &Path,
    input: &Path,
    output: &Path,
) -> Result<()> {
    let entity = load_entity(public_key, Some(private_key), config)?;
    let armored = read_file(input)?;

    info!(input = %input.display(), "Decrypting file");

    let opened = open_message(&entity, &armored)?;
    if opened.signature == SignatureState::Unverified {
        warn!("Message carries a signature that was not verified");
    }
    write_file(output, &opened.plaintext)?;

    info!(
        output = %output.display(),
        size = opened.plaintext.len(),
        "✅ File decrypted successfully"
    );
    Ok(())
}

/// Execute sign command
pub fn sign(
    config: &EntityConfig,
    public_key: &Path,
    private_key: &Path,
    input: &Path,
    output: &Path,
) -> Result<()> {
    let signer = load_entity(public_key, Some(private_key), config)?;
    let message = read_file(input)?;

    info!(signer = ?signer.key_id(), input = %input.display(), "Signing file");

    let signature = sign_message(&signer, &message)?;
    write_file(output, signature.as_bytes())?;

    info!(signature = %output.display(), "✅ File signed successfully");
    Ok(())
}

/// Execute verify command
pub fn verify(config: &EntityConfig, public_key: &Path, input: &Path, signature: &Path) -> Result<()> {
    let signer = load_entity(public_key, None, config)?;
    let message = read_file(input)?;
    let signature_data = read_file(signature)?;

    info!(
        signer = ?signer.key_id(),
        input = %input.display(),
        signature = %signature.display(),
        "Verifying signature"
    );

    verify_signature(&signer, &message, &signature_data)?;

    info!("✅ Signature is valid");
    Ok(())
}
