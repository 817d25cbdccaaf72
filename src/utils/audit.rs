use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::Result;

const LINE_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S,%3f";
const FILE_TIMESTAMP: &str = "%Y-%m-%d_%H-%M-%S";

/// Append-only record of the artworks a run created, one line each.
pub struct AuditLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl AuditLog {
    /// Creates `artworks_added_<run start>.log` inside `dir`.
    pub fn create(dir: &Path, started_at: DateTime<Local>) -> Result<Self> {
        let path = dir.join(file_name(started_at));
        let file = File::options().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn artwork_added(&mut self, title: &str, artist_id: i64) -> Result<()> {
        writeln!(
            self.writer,
            "{} - Added artwork: {} by {}",
            Local::now().format(LINE_TIMESTAMP),
            title,
            artist_id
        )?;
        // Flushed per line so an interrupted run still leaves a complete trail.
        self.writer.flush()?;
        Ok(())
    }
}

pub fn file_name(started_at: DateTime<Local>) -> String {
    format!("artworks_added_{}.log", started_at.format(FILE_TIMESTAMP))
}
