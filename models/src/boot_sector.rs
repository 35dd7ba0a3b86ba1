use binrw::BinRead;

use crate::dir_entry::DIRECTORY_ENTRY_SIZE;

/// Bytes of the boot sector the reader needs before touching any field.
pub const BOOT_SECTOR_SIZE: usize = 0x200;
pub const BOOT_SIGNATURE: u16 = 0xAA55;

/// Clusters 0 and 1 are reserved, data clusters start at 2.
pub const FIRST_DATA_CLUSTER: u16 = 2;

/// Subdirectory offsets use a fixed 512-byte sector regardless of the BPB value.
pub const SUBDIRECTORY_SECTOR_SIZE: u64 = 512;

/// "." and ".." at the start of every subdirectory table.
pub const DOT_ENTRIES_SIZE: u64 = 2 * DIRECTORY_ENTRY_SIZE as u64;

/// FAT12/16 volume geometry decoded from the first sector of the image.
/// #[br(little)]: every multi-byte BPB field is little-endian.
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct VolumeGeometry {
    // 0x00: jump instruction (3 bytes) skip, 0x03: OEM name, space padded
    #[br(pad_before = 3, map = |x: [u8; 8]| String::from_utf8_lossy(&x).trim_end().to_string())]
    pub oem_name: String,

    // 0x0B: BIOS Parameter Block
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sector_count: u16,
    pub number_of_fat_copies: u8,
    pub root_entry_count: u16,
    pub total_sectors_16: u16,
    pub media_descriptor: u8,
    pub sectors_per_fat_copy: u16,

    // 0x18 .. 0x1FE: geometry, boot code and extended BPB are not needed
    #[br(pad_before = 0x1E6)]
    pub boot_signature: u16,

    #[br(calc = boot_signature == BOOT_SIGNATURE)]
    pub boot_signature_valid: bool,
}

impl VolumeGeometry {
    /// Size of one FAT copy in bytes.
    pub fn fat_copy_size_bytes(&self) -> u64 {
        self.sectors_per_fat_copy as u64 * self.bytes_per_sector as u64
    }

    /// Size of the fixed root directory region in bytes.
    pub fn root_directory_size_bytes(&self) -> u64 {
        self.root_entry_count as u64 * DIRECTORY_ENTRY_SIZE as u64
    }

    pub fn cluster_size_bytes(&self) -> u64 {
        self.sectors_per_cluster as u64 * self.bytes_per_sector as u64
    }

    /// Absolute offset of the root directory table: reserved sectors plus every FAT copy.
    pub fn root_directory_offset(&self) -> u64 {
        let bytes_per_sector = self.bytes_per_sector as u64;
        self.reserved_sector_count as u64 * bytes_per_sector
            + self.number_of_fat_copies as u64 * self.fat_copy_size_bytes()
    }

    /// Offset of a subdirectory's first child entry, counted from the start of
    /// the root directory table. The "." and ".." slots are already skipped.
    ///
    /// Returns `None` for the reserved cluster numbers 0 and 1.
    pub fn subdirectory_offset_from_root(&self, first_cluster: u16) -> Option<u64> {
        let cluster_index = first_cluster.checked_sub(FIRST_DATA_CLUSTER)? as u64;
        let cluster_bytes = self.sectors_per_cluster as u64 * SUBDIRECTORY_SECTOR_SIZE;
        Some(self.root_directory_size_bytes() + cluster_index * cluster_bytes + DOT_ENTRIES_SIZE)
    }

    /// Absolute offset of a subdirectory's first child entry.
    /// Clusters are assumed contiguous from `first_cluster`; the FAT is not consulted.
    pub fn subdirectory_offset(&self, first_cluster: u16) -> Option<u64> {
        self.subdirectory_offset_from_root(first_cluster)
            .map(|relative| self.root_directory_offset() + relative)
    }
}
