//! pgpwrap Command Line Interface
//!
//! OpenPGP encryption, decryption, signing and verification over files.

use pgpwrap::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "pgpwrap=info".into()),
        )
        .init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
