//! Command-line interface for pgpwrap.
//!
//! This module provides the CLI for the pgpwrap library: key generation,
//! encryption, decryption, signing and verification over files.

pub mod args;
pub mod commands;
pub mod utils;

use crate::config::load_entity_config;
use crate::crypto::UserIdentity;
use crate::Result;
use clap::Parser;

pub use args::{Cli, Command};

/// Main entry point for the CLI application
pub fn run() -> Result<()> {
    execute(Cli::parse())
}

/// Execute already parsed arguments
pub fn execute(cli: Cli) -> Result<()> {
    let config = load_entity_config(cli.config.as_deref())?;

    match cli.command {
        Command::GenerateKey {
            name,
            comment,
            email,
            public_out,
            private_out,
        } => commands::generate_key(
            &UserIdentity::new(name, comment, email),
            &config,
            &public_out,
            &private_out,
        ),
        Command::Encrypt {
            public_key,
            input,
            output,
        } => commands::encrypt(&config, &public_key, &input, &output),
        Command::Decrypt {
            public_key,
            private_key,
            input,
            output,
        } => commands::decrypt(&config, &public_key, &private_key, &input, &output),
        Command::Sign {
            public_key,
            private_key,
            input,
            output,
        } => commands::sign(&config, &public_key, &private_key, &input, &output),
        Command::Verify {
            public_key,
            input,
            signature,
        } => commands::verify(&config, &public_key, &input, &signature),
    }
}
