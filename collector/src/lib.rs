pub mod reader;
pub mod image;
pub mod walker;

pub use image::FatImage;
pub use walker::{DirectoryWalker, WalkOptions, WalkSummary};
pub use models::InspectError;
