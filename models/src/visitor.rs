use crate::dir_entry::DirectoryEntry;
use crate::error::InspectError;

/// One entry reported by the directory walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedEntry {
    /// 0 for entries of the root directory.
    pub depth: usize,
    /// Absolute offset of the 32-byte record in the image.
    pub offset: u64,
    pub entry: DirectoryEntry,
}

/// Interface every consumer of walked entries implements
/// (text report, collectors in tests, ...)
pub trait EntryVisitor {
    /// Called in depth-first pre-order: a directory before its children,
    /// each child subtree before the next sibling.
    fn visit(&mut self, walked: &WalkedEntry) -> Result<(), InspectError>;
}

impl EntryVisitor for Vec<WalkedEntry> {
    fn visit(&mut self, walked: &WalkedEntry) -> Result<(), InspectError> {
        self.push(walked.clone());
        Ok(())
    }
}

impl<F> EntryVisitor for F
where
    F: FnMut(&WalkedEntry) -> Result<(), InspectError>,
{
    fn visit(&mut self, walked: &WalkedEntry) -> Result<(), InspectError> {
        self(walked)
    }
}
