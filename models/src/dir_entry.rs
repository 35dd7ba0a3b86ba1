use binrw::BinRead;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

pub const DIRECTORY_ENTRY_SIZE: usize = 32;

pub const END_OF_DIRECTORY_PREFIX: u8 = 0x00;
pub const DELETED_ENTRY_PREFIX: u8 = 0xE5;
const SPACE: u8 = 0x20;

/// Attribute byte of a directory entry (offset 0x0B).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Attributes(pub u8);

impl Attributes {
    pub const READ_ONLY: u8 = 0x01;
    pub const HIDDEN: u8 = 0x02;
    pub const SYSTEM: u8 = 0x04;
    pub const VOLUME_LABEL: u8 = 0x08;
    pub const LONG_NAME: u8 = Self::READ_ONLY | Self::HIDDEN | Self::SYSTEM | Self::VOLUME_LABEL;
    pub const DIRECTORY: u8 = 0x10;
    pub const ARCHIVE: u8 = 0x20;

    const LABELS: [(u8, &'static str); 7] = [
        (Self::READ_ONLY, "Read-only"),
        (Self::HIDDEN, "Hidden"),
        (Self::SYSTEM, "System"),
        (Self::VOLUME_LABEL, "Volume label"),
        (Self::LONG_NAME, "Long file name"),
        (Self::DIRECTORY, "Directory"),
        (Self::ARCHIVE, "Archive"),
    ];

    /// True if every bit of `mask` is set.
    pub fn contains(&self, mask: u8) -> bool {
        self.0 & mask == mask
    }

    pub fn is_directory(&self) -> bool {
        self.contains(Self::DIRECTORY)
    }

    /// Every matching label. Long file name overlaps the four low bits and is
    /// reported alongside them.
    pub fn labels(&self) -> Vec<&'static str> {
        Self::LABELS
            .iter()
            .filter(|(mask, _)| self.contains(*mask))
            .map(|(_, label)| *label)
            .collect()
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.labels().join(", "))
    }
}

/// Raw 8.3 name: 8 base bytes followed by 3 extension bytes, space padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortName(pub [u8; 11]);

impl ShortName {
    pub fn base(&self) -> &[u8] {
        &self.0[..8]
    }

    pub fn extension(&self) -> &[u8] {
        &self.0[8..]
    }

    pub fn first_byte(&self) -> u8 {
        self.0[0]
    }
}

fn trim_trailing_spaces(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != SPACE).map_or(0, |i| i + 1);
    &bytes[..end]
}

impl fmt::Display for ShortName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in trim_trailing_spaces(self.base()) {
            write!(f, "{}", cp437_to_char(b))?;
        }
        let extension = trim_trailing_spaces(self.extension());
        if !extension.is_empty() {
            write!(f, ".")?;
            for &b in extension {
                write!(f, "{}", cp437_to_char(b))?;
            }
        }
        Ok(())
    }
}

/// Short names are stored in the OEM code page (CP437).
fn cp437_to_char(b: u8) -> char {
    if b < 0x80 {
        b as char
    } else {
        CP437_HIGH[b as usize - 0x80]
    }
}

#[rustfmt::skip]
const CP437_HIGH: [char; 128] = [
    'Ç','ü','é','â','ä','à','å','ç', 'ê','ë','è','ï','î','ì','Ä','Å',
    'É','æ','Æ','ô','ö','ò','û','ù', 'ÿ','Ö','Ü','¢','£','¥','₧','ƒ',
    'á','í','ó','ú','ñ','Ñ','ª','º', '¿','⌐','¬','½','¼','¡','«','»',
    '░','▒','▓','│','┤','╡','╢','╖', '╕','╣','║','╗','╝','╜','╛','┐',
    '└','┴','┬','├','─','┼','╞','╟', '╚','╔','╩','╦','╠','═','╬','╧',
    '╨','╤','╥','╙','╘','╒','╓','╫', '╪','┘','┌','█','▄','▌','▐','▀',
    'α','ß','Γ','π','Σ','σ','µ','τ', 'Φ','Θ','Ω','δ','∞','φ','ε','∩',
    '≡','±','≥','≤','⌠','⌡','÷','≈', '°','∙','·','√','ⁿ','²','■','\u{00A0}',
];

/// Packed date: bits 0-4 day (stored one less than the day), 5-8 month, 9-15 years since 1980.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FatDate(pub u16);

impl FatDate {
    pub fn day(&self) -> u8 {
        (self.0 & 0x1F) as u8 + 1
    }

    pub fn month(&self) -> u8 {
        ((self.0 >> 5) & 0x0F) as u8
    }

    pub fn year(&self) -> u16 {
        1980 + ((self.0 >> 9) & 0x7F)
    }

    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year() as i32, self.month() as u32, self.day() as u32)
    }
}

/// Packed time: bits 0-4 two-second units, 5-10 minutes, 11-15 hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FatTime(pub u16);

impl FatTime {
    pub fn hours(&self) -> u8 {
        ((self.0 >> 11) & 0x1F) as u8
    }

    pub fn minutes(&self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    pub fn seconds(&self) -> u8 {
        (self.0 & 0x1F) as u8 * 2
    }

    pub fn to_naive(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hours() as u32, self.minutes() as u32, self.seconds() as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FatTimestamp {
    pub date: FatDate,
    pub time: FatTime,
}

impl FatTimestamp {
    /// `None` when the packed fields do not form a real calendar date and time.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        Some(self.date.to_naive()?.and_time(self.time.to_naive()?))
    }
}

impl fmt::Display for FatTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{} {}:{}:{}",
            self.date.day(),
            self.date.month(),
            self.date.year(),
            self.time.hours(),
            self.time.minutes(),
            self.time.seconds()
        )
    }
}

/// 32-byte FAT12/16 directory entry.
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct DirectoryEntry {
    #[br(map = |raw: [u8; 11]| ShortName(raw))]
    pub name: ShortName,                // 0x00
    #[br(map = |raw: u8| Attributes(raw))]
    pub attributes: Attributes,         // 0x0B
    pub reserved: u8,
    pub creation_tenths: u8,            // 0x0D, 10 ms units
    #[br(map = |raw: u16| FatTime(raw))]
    pub creation_time: FatTime,         // 0x0E
    #[br(map = |raw: u16| FatDate(raw))]
    pub creation_date: FatDate,         // 0x10
    #[br(map = |raw: u16| FatDate(raw))]
    pub last_access_date: FatDate,      // 0x12
    pub first_cluster_high: u16,        // 0x14, FAT32 only
    #[br(map = |raw: u16| FatTime(raw))]
    pub modified_time: FatTime,         // 0x16
    #[br(map = |raw: u16| FatDate(raw))]
    pub modified_date: FatDate,         // 0x18
    pub first_cluster: u16,             // 0x1A, 0 = nothing allocated
    pub file_size: u32,                 // 0x1C
}

impl DirectoryEntry {
    /// First name byte 0x00 terminates the table.
    pub fn is_end_marker(&self) -> bool {
        self.name.first_byte() == END_OF_DIRECTORY_PREFIX
    }

    pub fn is_deleted(&self) -> bool {
        self.name.first_byte() == DELETED_ENTRY_PREFIX
    }

    pub fn is_directory(&self) -> bool {
        self.attributes.is_directory()
    }

    /// The "." and ".." bookkeeping entries.
    pub fn is_dot_entry(&self) -> bool {
        matches!(self.file_name().as_str(), "." | "..")
    }

    pub fn file_name(&self) -> String {
        self.name.to_string()
    }

    pub fn created(&self) -> FatTimestamp {
        FatTimestamp {
            date: self.creation_date,
            time: self.creation_time,
        }
    }

    pub fn modified(&self) -> FatTimestamp {
        FatTimestamp {
            date: self.modified_date,
            time: self.modified_time,
        }
    }
}
