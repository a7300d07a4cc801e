//! Command-line argument parsing for pgpwrap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// OpenPGP encrypt, decrypt, sign and verify over files
#[derive(Debug, Parser)]
#[command(name = "pgpwrap", version)]
#[command(about = "OpenPGP encrypt, decrypt, sign and verify with a gzip payload envelope")]
pub struct Cli {
    /// JSON configuration file (hash, cipher, compression, rsa_bits, subkey_lifetime_secs)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Command-line interface commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate an RSA key pair
    GenerateKey {
        /// Full name for the user id
        #[arg(long, default_value = "")]
        name: String,
        /// Comment for the user id
        #[arg(long, default_value = "")]
        comment: String,
        /// Email for the user id
        #[arg(long, default_value = "")]
        email: String,
        /// Where to write the armored public key
        #[arg(long)]
        public_out: PathBuf,
        /// Where to write the armored private key
        #[arg(long)]
        private_out: PathBuf,
    },
    /// Encrypt a file to a public key
    Encrypt {
        /// Recipient's armored public key
        #[arg(long)]
        public_key: PathBuf,
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Decrypt a file with a key pair
    Decrypt {
        /// Armored public key
        #[arg(long)]
        public_key: PathBuf,
        /// Armored private key
        #[arg(long)]
        private_key: PathBuf,
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Create a detached signature for a file
    Sign {
        /// Armored public key
        #[arg(long)]
        public_key: PathBuf,
        /// Armored private key
        #[arg(long)]
        private_key: PathBuf,
        #[arg(short, long)]
        input: PathBuf,
        /// Where to write the armored signature
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Verify a detached signature
    Verify {
        /// Signer's armored public key
        #[arg(long)]
        public_key: PathBuf,
        #[arg(short, long)]
        input: PathBuf,
        /// Armored signature file
        #[arg(short, long)]
        signature: PathBuf,
    },
}
