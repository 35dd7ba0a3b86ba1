pub mod boot_sector;
pub mod dir_entry;

pub use boot_sector::parse_boot_sector;
pub use dir_entry::parse_directory_entry;
