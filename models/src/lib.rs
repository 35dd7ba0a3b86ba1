pub mod error;
pub mod boot_sector;
pub mod dir_entry;
pub mod visitor;

pub use error::InspectError;
pub use boot_sector::VolumeGeometry;
pub use dir_entry::DirectoryEntry;
pub use visitor::{EntryVisitor, WalkedEntry};
