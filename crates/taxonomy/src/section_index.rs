//! Section → file lookup
//!
//! The backend only serves a flat file list. [`list_files`] is the direct
//! linear filter; [`SectionIndex`] groups the list once per fetch so every
//! section view afterwards is a map lookup.

use std::collections::HashMap;

use edutalks_core::SectionId;

use crate::file::FileRecord;
use crate::section::Section;

/// Files attached to `section`, in list order (linear scan)
pub fn list_files<'a>(section: &Section, all_files: &'a [FileRecord]) -> Vec<&'a FileRecord> {
    all_files
        .iter()
        .filter(|file| file.belongs_to(section.id))
        .collect()
}

/// Files grouped by the section they belong to
#[derive(Debug, Clone, Default)]
pub struct SectionIndex {
    by_section: HashMap<SectionId, Vec<FileRecord>>,
    unassigned: Vec<FileRecord>,
}

impl SectionIndex {
    /// Group a fetched file list. Relative order inside each group is kept.
    pub fn build(files: Vec<FileRecord>) -> Self {
        let mut index = Self::default();
        for file in files {
            match file.section_id {
                Some(section_id) => index.by_section.entry(section_id).or_default().push(file),
                None => index.unassigned.push(file),
            }
        }
        tracing::debug!(
            sections = index.by_section.len(),
            unassigned = index.unassigned.len(),
            "built section file index"
        );
        index
    }

    /// Files of a section; empty when the section has none
    pub fn files_for(&self, section: SectionId) -> &[FileRecord] {
        self.by_section
            .get(&section)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of files attached to a section
    pub fn count_for(&self, section: SectionId) -> usize {
        self.files_for(section).len()
    }

    /// Sections with at least one file, in id order
    pub fn section_ids(&self) -> Vec<SectionId> {
        let mut ids: Vec<SectionId> = self.by_section.keys().copied().collect();
        ids.sort_by_key(|id| id.0);
        ids
    }

    /// Files not attached to any section
    pub fn unassigned(&self) -> &[FileRecord] {
        &self.unassigned
    }

    /// Total number of indexed files
    pub fn len(&self) -> usize {
        self.by_section.values().map(Vec::len).sum::<usize>() + self.unassigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<FileRecord>> for SectionIndex {
    fn from(files: Vec<FileRecord>) -> Self {
        Self::build(files)
    }
}
