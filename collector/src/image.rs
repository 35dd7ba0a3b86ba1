use anyhow::{Context, Result};
use models::VolumeGeometry;
use parser::boot_sector::parse_boot_sector;
use std::path::Path;

use crate::reader::load_image;
use crate::walker::{DirectoryWalker, WalkOptions};

/// An in-memory FAT12/16 image together with its decoded geometry.
pub struct FatImage {
    data: Vec<u8>,
    geometry: VolumeGeometry,
}

impl FatImage {
    pub fn open(path: &Path) -> Result<Self> {
        let data = load_image(path)?;
        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let geometry = parse_boot_sector(&data).context("Failed to parse boot sector")?;
        if !geometry.boot_signature_valid {
            tracing::warn!(
                "Boot signature is {:#06X}, expected 0xAA55. Continuing anyway.",
                geometry.boot_signature
            );
        }
        tracing::debug!("Root directory at offset {:#X}", geometry.root_directory_offset());
        Ok(Self { data, geometry })
    }

    pub fn geometry(&self) -> &VolumeGeometry {
        &self.geometry
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn walker(&self, options: WalkOptions) -> DirectoryWalker<'_> {
        DirectoryWalker::new(&self.data, &self.geometry).with_options(options)
    }
}
