use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{ImportError, Result};
use crate::ingest::record::{ArtworkRow, SourceRecord};

pub const REQUIRED_COLUMNS: &[&str] = &[
    "artist_name",
    "title",
    "size",
    "mediums",
    "series",
    "department",
];

/// Yields decoded rows in source order, each tagged with its line number.
/// Decode failures are yielded per row so the caller decides whether to skip.
pub struct RecordReader<R> {
    inner: csv::Reader<R>,
    headers: StringRecord,
    done: bool,
}

impl RecordReader<File> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: Read> RecordReader<R> {
    pub fn from_reader(rdr: R) -> Result<Self> {
        let mut inner = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(rdr);
        let headers = inner.headers()?.clone();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|col| !headers.iter().any(|h| h == *col))
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing.join(", ")));
        }

        Ok(Self {
            inner,
            headers,
            done: false,
        })
    }

    fn decode(&self, line: u64, raw: &StringRecord) -> Result<ArtworkRow> {
        let record: SourceRecord = raw
            .deserialize(Some(&self.headers))
            .map_err(|e| ImportError::malformed(line, e.to_string()))?;
        Ok(ArtworkRow::from_record(line, record))
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = (u64, Result<ArtworkRow>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut raw = StringRecord::new();
        match self.inner.read_record(&mut raw) {
            Ok(false) => {
                self.done = true;
                None
            }
            Ok(true) => {
                let line = raw.position().map(|p| p.line()).unwrap_or(0);
                Some((line, self.decode(line, &raw)))
            }
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                // An I/O failure leaves the reader in an unknown state.
                if e.is_io_error() {
                    self.done = true;
                }
                Some((line, Err(e.into())))
            }
        }
    }
}
