use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads the whole volume image into memory. Everything after this works on the buffer.
pub fn load_image(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path)
        .with_context(|| format!("Failed to read image file {:?}", path))?;
    tracing::info!("Loaded {} bytes from {:?}", data.len(), path);
    Ok(data)
}
