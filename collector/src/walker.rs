use models::boot_sector::DOT_ENTRIES_SIZE;
use models::dir_entry::DIRECTORY_ENTRY_SIZE;
use models::{DirectoryEntry, EntryVisitor, InspectError, VolumeGeometry, WalkedEntry};
use parser::dir_entry::parse_directory_entry;
use std::collections::HashSet;

pub const DEFAULT_MAX_DEPTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    /// Deepest level whose entries are reported. Root entries are depth 0.
    pub max_depth: usize,
    /// Report the "." and ".." slots at the top of every subdirectory.
    pub include_dot_entries: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            include_dot_entries: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub files: usize,
    pub directories: usize,
    pub deleted: usize,
    /// Subdirectories not entered: reserved cluster, depth limit or already visited.
    pub skipped_directories: usize,
}

impl WalkSummary {
    fn record(&mut self, entry: &DirectoryEntry) {
        if entry.is_deleted() {
            self.deleted += 1;
        } else if entry.is_directory() {
            self.directories += 1;
        } else {
            self.files += 1;
        }
    }
}

struct WalkState {
    visited: HashSet<u64>,
    summary: WalkSummary,
}

/// Depth-first walker over the root directory and every subdirectory reachable from it.
/// Borrows the image and geometry; nothing is mutated.
pub struct DirectoryWalker<'a> {
    image: &'a [u8],
    geometry: &'a VolumeGeometry,
    options: WalkOptions,
}

impl<'a> DirectoryWalker<'a> {
    pub fn new(image: &'a [u8], geometry: &'a VolumeGeometry) -> Self {
        Self {
            image,
            geometry,
            options: WalkOptions::default(),
        }
    }

    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    /// Reports every entry to `visitor` in pre-order. An error aborts the walk;
    /// entries already visited stay visited.
    pub fn walk<V>(&self, visitor: &mut V) -> Result<WalkSummary, InspectError>
    where
        V: EntryVisitor + ?Sized,
    {
        let root = self.geometry.root_directory_offset();
        let mut state = WalkState {
            visited: HashSet::from([root]),
            summary: WalkSummary::default(),
        };

        tracing::info!("Walking root directory at offset {:#X}", root);
        // the root region holds exactly root_entry_count slots
        let root_slots = self.geometry.root_entry_count as usize;
        self.walk_table(root, Some(root_slots), 0, visitor, &mut state)?;

        tracing::info!(
            "Walk finished: {} files, {} directories, {} deleted, {} skipped",
            state.summary.files,
            state.summary.directories,
            state.summary.deleted,
            state.summary.skipped_directories
        );
        Ok(state.summary)
    }

    /// Walks the whole tree and returns the entries in report order.
    pub fn collect(&self) -> Result<Vec<WalkedEntry>, InspectError> {
        let mut entries: Vec<WalkedEntry> = Vec::new();
        self.walk(&mut entries)?;
        Ok(entries)
    }

    fn read_entry(&self, offset: u64) -> Result<DirectoryEntry, InspectError> {
        let out_of_bounds = || InspectError::EntryOutOfBounds {
            offset,
            image_len: self.image.len(),
        };
        let start = usize::try_from(offset).map_err(|_| out_of_bounds())?;
        let record = self.image.get(start..).ok_or_else(out_of_bounds)?;
        if record.len() < DIRECTORY_ENTRY_SIZE {
            return Err(out_of_bounds());
        }
        parse_directory_entry(record)
    }

    fn walk_table<V>(
        &self,
        table_offset: u64,
        slot_limit: Option<usize>,
        depth: usize,
        visitor: &mut V,
        state: &mut WalkState,
    ) -> Result<(), InspectError>
    where
        V: EntryVisitor + ?Sized,
    {
        tracing::debug!("Directory table at {:#X}, depth {}", table_offset, depth);

        let mut slot = 0usize;
        while slot_limit.map_or(true, |limit| slot < limit) {
            let offset = table_offset + (slot * DIRECTORY_ENTRY_SIZE) as u64;
            let entry = self.read_entry(offset)?;
            if entry.is_end_marker() {
                break;
            }
            slot += 1;

            let walked = WalkedEntry { depth, offset, entry };
            visitor.visit(&walked)?;
            state.summary.record(&walked.entry);

            let entry = &walked.entry;
            if entry.is_directory() && entry.first_cluster != 0 && !entry.is_dot_entry() {
                self.descend(entry, depth + 1, visitor, state)?;
            }
        }
        Ok(())
    }

    fn descend<V>(
        &self,
        entry: &DirectoryEntry,
        depth: usize,
        visitor: &mut V,
        state: &mut WalkState,
    ) -> Result<(), InspectError>
    where
        V: EntryVisitor + ?Sized,
    {
        let name = entry.file_name();
        let Some(children) = self.geometry.subdirectory_offset(entry.first_cluster) else {
            tracing::warn!(
                "Skipping '{}': cluster {} is reserved",
                name,
                entry.first_cluster
            );
            state.summary.skipped_directories += 1;
            return Ok(());
        };
        if depth > self.options.max_depth {
            tracing::warn!(
                "Skipping '{}': depth limit {} reached",
                name,
                self.options.max_depth
            );
            state.summary.skipped_directories += 1;
            return Ok(());
        }
        if !state.visited.insert(children) {
            tracing::warn!(
                "Skipping '{}': table at {:#X} already walked (cycle)",
                name,
                children
            );
            state.summary.skipped_directories += 1;
            return Ok(());
        }

        let table = if self.options.include_dot_entries {
            children - DOT_ENTRIES_SIZE
        } else {
            children
        };
        self.walk_table(table, None, depth, visitor, state)
    }
}
