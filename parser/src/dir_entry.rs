use binrw::BinReaderExt;
use models::dir_entry::DIRECTORY_ENTRY_SIZE;
use models::{DirectoryEntry, InspectError};
use std::io::Cursor;

/// Decodes one 32-byte directory record. Any 32 bytes decode to an entry;
/// only a short slice is rejected. Bytes past the first 32 are ignored.
pub fn parse_directory_entry(data: &[u8]) -> Result<DirectoryEntry, InspectError> {
    if data.len() < DIRECTORY_ENTRY_SIZE {
        return Err(InspectError::InvalidEntrySize { len: data.len() });
    }
    let mut reader = Cursor::new(&data[..DIRECTORY_ENTRY_SIZE]);

    let entry: DirectoryEntry = reader.read_le()
        .map_err(|e| InspectError::ParseError {
            structure: "Directory Entry".to_string(),
            details: e.to_string(),
        })?;

    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::dir_entry::Attributes;

    fn raw_entry(name: &[u8; 11], attributes: u8, first_cluster: u16, file_size: u32) -> [u8; 32] {
        let mut raw = [0u8; 32];
        raw[0..11].copy_from_slice(name);
        raw[11] = attributes;
        raw[26..28].copy_from_slice(&first_cluster.to_le_bytes());
        raw[28..32].copy_from_slice(&file_size.to_le_bytes());
        raw
    }

    #[test]
    fn decodes_regular_file() {
        let raw = raw_entry(b"README  TXT", Attributes::ARCHIVE, 5, 1234);
        let entry = parse_directory_entry(&raw).unwrap();
        assert_eq!(entry.file_name(), "README.TXT");
        assert_eq!(entry.first_cluster, 5);
        assert_eq!(entry.file_size, 1234);
        assert!(!entry.is_directory());
        assert!(!entry.is_end_marker());
        assert_eq!(entry.attributes.labels(), vec!["Archive"]);
    }

    #[test]
    fn decodes_directory_without_cluster() {
        let raw = raw_entry(b".          ", Attributes::DIRECTORY, 0, 0);
        let entry = parse_directory_entry(&raw).unwrap();
        assert!(entry.is_directory());
        assert!(entry.is_dot_entry());
        assert_eq!(entry.first_cluster, 0);
        assert_eq!(entry.file_name(), ".");
    }

    #[test]
    fn decodes_timestamps_at_their_offsets() {
        let mut raw = raw_entry(b"NOEXT      ", 0, 0, 0);
        raw[13] = 150;
        raw[14..16].copy_from_slice(&((12u16 << 11) | (30 << 5) | 10).to_le_bytes());
        raw[16..18].copy_from_slice(&0x0021u16.to_le_bytes());
        raw[18..20].copy_from_slice(&((40u16 << 9) | (6 << 5) | 14).to_le_bytes());
        raw[22..24].copy_from_slice(&0u16.to_le_bytes());
        raw[24..26].copy_from_slice(&0x0021u16.to_le_bytes());
        let entry = parse_directory_entry(&raw).unwrap();

        assert_eq!(entry.file_name(), "NOEXT");
        assert_eq!(entry.creation_tenths, 150);
        assert_eq!(entry.created().to_string(), "2/1/1980 12:30:20");
        assert_eq!(entry.modified().to_string(), "2/1/1980 0:0:0");
        assert_eq!(entry.last_access_date.day(), 15);
        assert_eq!(entry.last_access_date.month(), 6);
        assert_eq!(entry.last_access_date.year(), 2020);
    }

    #[test]
    fn end_marker_and_deleted_prefixes() {
        let end = parse_directory_entry(&[0u8; 32]).unwrap();
        assert!(end.is_end_marker());

        let mut raw = raw_entry(b"XOLD    TXT", Attributes::ARCHIVE, 7, 10);
        raw[0] = 0xE5;
        let deleted = parse_directory_entry(&raw).unwrap();
        assert!(deleted.is_deleted());
        assert!(!deleted.is_end_marker());
    }

    #[test]
    fn garbage_still_decodes() {
        let entry = parse_directory_entry(&[0xFF; 32]).unwrap();
        assert_eq!(entry.file_size, u32::MAX);
        assert_eq!(entry.first_cluster, u16::MAX);
        assert!(entry.is_directory());
    }

    #[test]
    fn short_slice_is_invalid_entry_size() {
        assert!(matches!(
            parse_directory_entry(&[0u8; 31]),
            Err(InspectError::InvalidEntrySize { len: 31 })
        ));
    }

    #[test]
    fn ignores_bytes_past_the_record() {
        let mut raw = raw_entry(b"A       B  ", 0, 2, 1).to_vec();
        raw.extend_from_slice(&[0xAB; 32]);
        let entry = parse_directory_entry(&raw).unwrap();
        assert_eq!(entry.file_name(), "A.B");
        assert_eq!(entry.file_size, 1);
    }
}
