//! Journal Reader
//!
//! Sequential access to the records of an open journal, in append order.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};

use crate::error::Result;
use super::entry::record_size;
use super::JournalEntry;

/// Reads records from the start of a journal file
///
/// Reads exactly `entry_count` records; anything past them (such as the
/// remains of a failed append) is never looked at.
pub struct JournalReader<'a> {
    reader: BufReader<&'a mut File>,
    page_size: usize,
    remaining: u64,
    record: Vec<u8>,
}

impl<'a> JournalReader<'a> {
    /// Rewind `file` and prepare to read `entry_count` records
    pub(crate) fn new(file: &'a mut File, page_size: usize, entry_count: u64) -> Result<Self> {
        file.seek(SeekFrom::Start(0))?;

        Ok(Self {
            reader: BufReader::new(file),
            page_size,
            remaining: entry_count,
            record: vec![0u8; record_size(page_size)],
        })
    }

    /// Read the next record, or `None` once every record has been read
    pub fn next_entry(&mut self) -> Result<Option<JournalEntry>> {
        if self.remaining == 0 {
            return Ok(None);
        }

        self.reader.read_exact(&mut self.record)?;
        self.remaining -= 1;

        JournalEntry::decode(&self.record, self.page_size).map(Some)
    }

    /// Records not yet read
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Iterate over the remaining records
    pub fn entries(self) -> JournalIterator<'a> {
        JournalIterator {
            reader: self,
            done: false,
        }
    }
}

/// Iterator over journal records
///
/// Stops after yielding the first error.
pub struct JournalIterator<'a> {
    reader: JournalReader<'a>,
    done: bool,
}

impl Iterator for JournalIterator<'_> {
    type Item = Result<JournalEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.next_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = usize::try_from(self.reader.remaining()).unwrap_or(usize::MAX);
        (0, Some(remaining))
    }
}
