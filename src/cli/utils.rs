//! Utility functions for CLI operations.

use crate::crypto::{get_entity, Entity, EntityConfig};
use crate::Result;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

/// Read file contents
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    let mut file = fs::File::open(path)?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;
    Ok(contents)
}

/// Write file contents
pub fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents)?;
    Ok(())
}

/// Write file contents readable by the owner only
pub fn write_secret_file(path: &Path, contents: &[u8]) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents)?;
    Ok(())
}

/// Build an entity from key files on disk
pub fn load_entity(
    public_key: &Path,
    private_key: Option<&Path>,
    config: &EntityConfig,
) -> Result<Entity> {
    let public = read_file(public_key)?;
    let private = private_key.map(read_file).transpose()?;
    get_entity(&public, private.as_deref(), config)
}
