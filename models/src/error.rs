use thiserror::Error;

/// Error type shared by every layer of the inspector
#[derive(Error, Debug)]
pub enum InspectError {
    #[error("I/O Error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image is truncated: boot sector needs 512 bytes, got {len}")]
    TruncatedImage { len: usize },

    #[error("Directory entry needs 32 bytes, got {len}")]
    InvalidEntrySize { len: usize },

    #[error("Directory entry at offset {offset:#X} lies outside the {image_len}-byte image")]
    EntryOutOfBounds { offset: u64, image_len: usize },

    #[error("Parsing failed for '{structure}': {details}")]
    ParseError { structure: String, details: String },
}
