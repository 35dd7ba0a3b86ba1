use models::{EntryVisitor, InspectError, VolumeGeometry, WalkedEntry};
use std::io::Write;

pub fn write_boot_sector<W: Write>(out: &mut W, geometry: &VolumeGeometry) -> std::io::Result<()> {
    writeln!(out, "Boot sector info:")?;
    writeln!(out, "\tOEM name: {}", geometry.oem_name)?;
    writeln!(out, "\tSector size (bytes): {}", geometry.bytes_per_sector)?;
    writeln!(out, "\tCluster size (sectors): {}", geometry.sectors_per_cluster)?;
    writeln!(out, "\tFAT copies: {}", geometry.number_of_fat_copies)?;
    writeln!(out, "\tFAT copy size (sectors): {}", geometry.sectors_per_fat_copy)?;
    writeln!(out, "\tFAT copy size (bytes): {}", geometry.fat_copy_size_bytes())?;
    writeln!(out, "\tRoot entries: {}", geometry.root_entry_count)?;
    writeln!(out, "\tRoot directory size (bytes): {}", geometry.root_directory_size_bytes())?;
    writeln!(out, "\tReserved sectors: {}", geometry.reserved_sector_count)?;
    writeln!(out, "\tIs boot signature correct: {}", geometry.boot_signature_valid)?;
    Ok(())
}

/// Prints one stanza per entry, indented one tab per directory level.
pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EntryVisitor for TextReport<W> {
    fn visit(&mut self, walked: &WalkedEntry) -> Result<(), InspectError> {
        let entry = &walked.entry;
        let indent = "\t".repeat(walked.depth);
        let out = &mut self.out;

        writeln!(out, "{indent}File name: {}", entry.file_name())?;
        if entry.is_deleted() {
            writeln!(out, "{indent}\tDeleted entry")?;
        }
        if entry.is_directory() {
            writeln!(out, "{indent}\tFile is a directory")?;
        } else {
            writeln!(out, "{indent}\tFile size: {}", entry.file_size)?;
        }
        writeln!(out, "{indent}\tFile's attributes:")?;
        for label in entry.attributes.labels() {
            writeln!(out, "{indent}\t\t{label}")?;
        }
        writeln!(out, "{indent}\tCreation date & time: {}", entry.created())?;
        writeln!(out, "{indent}\tLast modification date & time: {}", entry.modified())?;
        writeln!(out, "{indent}\tFirst cluster number: {}", entry.first_cluster)?;
        writeln!(out)?;
        Ok(())
    }
}
