use binrw::BinReaderExt;
use models::boot_sector::BOOT_SECTOR_SIZE;
use models::{InspectError, VolumeGeometry};
use std::io::Cursor;

/// Reads the volume geometry from the first 512 bytes of the image.
/// A wrong boot signature is reported through `boot_signature_valid`, not as an error.
pub fn parse_boot_sector(data: &[u8]) -> Result<VolumeGeometry, InspectError> {
    if data.len() < BOOT_SECTOR_SIZE {
        return Err(InspectError::TruncatedImage { len: data.len() });
    }
    let mut reader = Cursor::new(&data[..BOOT_SECTOR_SIZE]);

    let geometry: VolumeGeometry = reader.read_le()
        .map_err(|e| InspectError::ParseError {
            structure: "FAT Boot Sector".to_string(),
            details: e.to_string(),
        })?;

    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floppy_boot_sector() -> Vec<u8> {
        let mut buf = vec![0u8; 512];
        buf[0..3].copy_from_slice(&[0xEB, 0x3C, 0x90]);
        buf[3..11].copy_from_slice(b"MSDOS5.0");
        buf[0x0B..0x0D].copy_from_slice(&512u16.to_le_bytes());
        buf[0x0D] = 1;
        buf[0x0E..0x10].copy_from_slice(&1u16.to_le_bytes());
        buf[0x10] = 2;
        buf[0x11..0x13].copy_from_slice(&224u16.to_le_bytes());
        buf[0x13..0x15].copy_from_slice(&2880u16.to_le_bytes());
        buf[0x15] = 0xF0;
        buf[0x16..0x18].copy_from_slice(&9u16.to_le_bytes());
        buf[0x1FE] = 0x55;
        buf[0x1FF] = 0xAA;
        buf
    }

    #[test]
    fn parses_floppy_geometry() {
        let geometry = parse_boot_sector(&floppy_boot_sector()).unwrap();
        assert_eq!(geometry.oem_name, "MSDOS5.0");
        assert_eq!(geometry.bytes_per_sector, 512);
        assert_eq!(geometry.sectors_per_cluster, 1);
        assert_eq!(geometry.reserved_sector_count, 1);
        assert_eq!(geometry.number_of_fat_copies, 2);
        assert_eq!(geometry.root_entry_count, 224);
        assert_eq!(geometry.total_sectors_16, 2880);
        assert_eq!(geometry.media_descriptor, 0xF0);
        assert_eq!(geometry.sectors_per_fat_copy, 9);
        assert_eq!(geometry.boot_signature, 0xAA55);
        assert!(geometry.boot_signature_valid);
        assert_eq!(geometry.root_directory_offset(), 9728);
    }

    #[test]
    fn fields_round_trip_little_endian() {
        let mut buf = floppy_boot_sector();
        buf[0x0B..0x0D].copy_from_slice(&[0x00, 0x02]);
        buf[0x11..0x13].copy_from_slice(&[0x34, 0x12]);
        buf[0x16..0x18].copy_from_slice(&[0xFF, 0x80]);
        let geometry = parse_boot_sector(&buf).unwrap();
        assert_eq!(geometry.bytes_per_sector.to_le_bytes(), [0x00, 0x02]);
        assert_eq!(geometry.root_entry_count, 0x1234);
        assert_eq!(geometry.root_entry_count.to_le_bytes(), [0x34, 0x12]);
        assert_eq!(geometry.sectors_per_fat_copy.to_le_bytes(), [0xFF, 0x80]);
    }

    #[test]
    fn wrong_signature_is_reported_not_rejected() {
        let mut buf = floppy_boot_sector();
        buf[0x1FE] = 0xAA;
        buf[0x1FF] = 0x55;
        let geometry = parse_boot_sector(&buf).unwrap();
        assert_eq!(geometry.boot_signature, 0x55AA);
        assert!(!geometry.boot_signature_valid);
        assert_eq!(geometry.bytes_per_sector, 512);
    }

    #[test]
    fn short_buffer_is_truncated_image() {
        let buf = floppy_boot_sector();
        let err = parse_boot_sector(&buf[..511]).unwrap_err();
        assert!(matches!(err, InspectError::TruncatedImage { len: 511 }));
        assert!(matches!(
            parse_boot_sector(&[]),
            Err(InspectError::TruncatedImage { len: 0 })
        ));
    }

    #[test]
    fn reads_only_the_first_sector() {
        let mut buf = floppy_boot_sector();
        buf.extend_from_slice(&[0xFF; 1024]);
        let geometry = parse_boot_sector(&buf).unwrap();
        assert!(geometry.boot_signature_valid);
    }
}
