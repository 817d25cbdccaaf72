use std::path::Path;

use indicatif::ProgressBar;
use tracing::{info, warn};

use crate::database::models::{ArtworkOutcome, LinkOutcome, NewArtwork};
use crate::database::repo::CatalogStore;
use crate::error::Result;
use crate::ingest::reader::RecordReader;
use crate::ingest::record::ArtworkRow;
use crate::utils::audit::AuditLog;

/// Totals for one run. Skipped records are those rejected at the record
/// level; a fatal error ends the run before a report is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: usize,
    pub existing: usize,
    pub skipped: usize,
    pub links_added: usize,
    pub links_existing: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LinkTally {
    added: usize,
    existing: usize,
}

pub struct Importer<'a> {
    store: &'a mut CatalogStore,
    audit: &'a mut AuditLog,
    progress: ProgressBar,
}

impl<'a> Importer<'a> {
    pub fn new(store: &'a mut CatalogStore, audit: &'a mut AuditLog) -> Self {
        Self {
            store,
            audit,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn import_file(&mut self, csv_path: &Path) -> Result<ImportReport> {
        let reader = RecordReader::open(csv_path)?;
        self.run(reader)
    }

    /// Processes records strictly in order. Each record is its own failure
    /// boundary: record-level errors are logged and counted, anything else
    /// aborts the run.
    pub fn run<I>(&mut self, records: I) -> Result<ImportReport>
    where
        I: IntoIterator<Item = (u64, Result<ArtworkRow>)>,
    {
        let mut report = ImportReport::default();

        for (line, row) in records {
            self.progress.inc(1);
            match row.and_then(|row| self.process_row(&row)) {
                Ok((outcome, links)) => {
                    match outcome {
                        ArtworkOutcome::Inserted(_) => report.inserted += 1,
                        ArtworkOutcome::Existing(_) => report.existing += 1,
                    }
                    report.links_added += links.added;
                    report.links_existing += links.existing;
                }
                Err(e) if e.is_record_level() => {
                    warn!("Skipping record at line {}: {}", line, e);
                    report.skipped += 1;
                }
                Err(e) => {
                    self.progress.abandon();
                    return Err(e);
                }
            }
        }

        self.progress.finish_and_clear();
        Ok(report)
    }

    fn process_row(&mut self, row: &ArtworkRow) -> Result<(ArtworkOutcome, LinkTally)> {
        let artist_id = self.store.resolve_artist(&row.artist_name)?;

        let series_id = match row.series.as_deref() {
            Some(name) => Some(self.store.resolve_series(artist_id, name)?),
            None => None,
        };
        let department_id = match row.department.as_deref() {
            Some(name) => Some(self.store.resolve_department(name)?),
            None => None,
        };

        let artwork = NewArtwork {
            artist_id,
            title: row.title.clone(),
            size: row.size.clone(),
            year: row.year.clone(),
            end_year: row.end_year.clone(),
            description: row.description.clone(),
            keywords: row.keywords.clone(),
            price: row.price.clone(),
            sold: row.sold,
            image_url: row.image_url.clone(),
            hi_res_url: row.hi_res_url.clone(),
            series_id,
            department_id,
        };

        let outcome = self.store.insert_artwork_if_absent(&artwork)?;
        if let ArtworkOutcome::Inserted(id) = outcome {
            info!("Added artwork {:?} (id {}) by artist {}", row.title, id, artist_id);
            self.audit.artwork_added(&row.title, artist_id)?;
        }

        let links = self.link_mediums(outcome.id(), &row.mediums)?;
        Ok((outcome, links))
    }

    fn link_mediums(&mut self, artwork_id: i64, mediums: &[String]) -> Result<LinkTally> {
        let mut tally = LinkTally::default();
        for name in mediums {
            let medium_id = self.store.resolve_medium(name)?;
            match self.store.link_medium(artwork_id, medium_id)? {
                LinkOutcome::Linked => tally.added += 1,
                LinkOutcome::AlreadyLinked => tally.existing += 1,
            }
        }
        Ok(tally)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::CatalogCounts;
    use crate::error::ImportError;
    use anyhow::Result;
    use chrono::Local;
    use rusqlite::params;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "artist_name,title,size,year,end_year,description,keywords,mediums,series,department,image_url,hi_res_url,price,sold\n";
    const BLUE_HOUR: &str = "Jane Doe,Blue Hour,24x36in,2020,,oil study,\"blue,dusk\",\"oil on canvas,charcoal\",Nocturnes,Paintings,http://x/1.jpg,,1200,0\n";

    struct Fixture {
        dir: TempDir,
        store: CatalogStore,
        audit: AuditLog,
    }

    impl Fixture {
        fn new() -> Result<Self> {
            let dir = tempfile::tempdir()?;
            let store = CatalogStore::open_in_memory()?;
            let audit = AuditLog::create(dir.path(), Local::now())?;
            Ok(Self { dir, store, audit })
        }

        fn import(&mut self, rows: &[&str]) -> Result<ImportReport> {
            let path = self.dir.path().join("artworks.csv");
            fs::write(&path, format!("{}{}", HEADER, rows.concat()))?;
            let report = Importer::new(&mut self.store, &mut self.audit).import_file(&path)?;
            Ok(report)
        }

        fn audit_lines(&self) -> Result<Vec<String>> {
            let content = fs::read_to_string(self.audit.path())?;
            Ok(content.lines().map(str::to_string).collect())
        }
    }

    #[test]
    fn test_new_artist_new_everything() -> Result<()> {
        let mut fx = Fixture::new()?;
        let report = fx.import(&[BLUE_HOUR])?;

        assert_eq!(report.inserted, 1);
        assert_eq!(report.links_added, 2);
        assert_eq!(
            fx.store.counts()?,
            CatalogCounts {
                artists: 1,
                departments: 1,
                series: 1,
                mediums: 2,
                artworks: 1,
                artwork_mediums: 2,
            }
        );

        let lines = fx.audit_lines()?;
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Added artwork: Blue Hour by "));
        Ok(())
    }

    #[test]
    fn test_repeat_import_is_idempotent() -> Result<()> {
        let mut fx = Fixture::new()?;
        fx.import(&[BLUE_HOUR])?;
        let before = fx.store.counts()?;

        let report = fx.import(&[BLUE_HOUR])?;
        assert_eq!(fx.store.counts()?, before);
        assert_eq!(
            report,
            ImportReport {
                inserted: 0,
                existing: 1,
                skipped: 0,
                links_added: 0,
                links_existing: 2,
            }
        );
        assert_eq!(fx.audit_lines()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_shared_artist_distinct_series() -> Result<()> {
        let mut fx = Fixture::new()?;
        fx.import(&[
            BLUE_HOUR,
            "Jane Doe,Noon,10x10in,2021,,,,charcoal,Daylight,Paintings,,,,0\n",
        ])?;

        let counts = fx.store.counts()?;
        assert_eq!(counts.artists, 1);
        assert_eq!(counts.series, 2);

        let owners: Vec<i64> = fx
            .store
            .connection()
            .prepare("SELECT DISTINCT artist_id FROM series")?
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<_>>()?;
        assert_eq!(owners.len(), 1);
        Ok(())
    }

    #[test]
    fn test_empty_optional_fields() -> Result<()> {
        let mut fx = Fixture::new()?;
        fx.import(&["Jane Doe,Sketch,5x7in,2019,,,,ink,Studies,Drawings,http://x/2.jpg,,,\n"])?;

        let (price, hi_res, sold): (Option<f64>, Option<String>, i64) =
            fx.store.connection().query_row(
                "SELECT price, hi_res_url, sold FROM artworks WHERE title = ?1",
                params!["Sketch"],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?;
        assert_eq!(price, None);
        assert_eq!(hi_res, None);
        assert_eq!(sold, 0);
        Ok(())
    }

    #[test]
    fn test_sold_flag_coerced() -> Result<()> {
        let mut fx = Fixture::new()?;
        fx.import(&[
            "Jane Doe,Sold One,5x7in,2019,,,,ink,Studies,Drawings,,,,1\n",
            "Jane Doe,Maybe,5x7in,2019,,,,ink,Studies,Drawings,,,,yes\n",
        ])?;

        let sold: Vec<(String, i64)> = fx
            .store
            .connection()
            .prepare("SELECT title, sold FROM artworks ORDER BY id")?
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<_>>()?;
        assert_eq!(
            sold,
            vec![("Sold One".to_string(), 1), ("Maybe".to_string(), 0)]
        );
        Ok(())
    }

    #[test]
    fn test_references_resolved() -> Result<()> {
        let mut fx = Fixture::new()?;
        fx.import(&[BLUE_HOUR])?;

        let dangling: i64 = fx.store.connection().query_row(
            "SELECT COUNT(*) FROM artworks a
             LEFT JOIN series s ON s.id = a.series
             LEFT JOIN departments d ON d.id = a.department
             WHERE s.id IS NULL OR d.id IS NULL",
            [],
            |row| row.get(0),
        )?;
        assert_eq!(dangling, 0);
        Ok(())
    }

    #[test]
    fn test_malformed_record_skipped() -> Result<()> {
        let mut fx = Fixture::new()?;
        let report = fx.import(&["Jane Doe,Truncated\n", BLUE_HOUR])?;

        assert_eq!(report.skipped, 1);
        assert_eq!(report.inserted, 1);
        assert_eq!(fx.store.counts()?.artworks, 1);
        Ok(())
    }

    #[test]
    fn test_non_numeric_values_imported_as_text() -> Result<()> {
        let mut fx = Fixture::new()?;
        let report = fx.import(&[
            "Jane Doe,Harbor,5x7in,c. 1990,,,,ink,Studies,Drawings,,,\"$1,200\",0\n",
            "Jane Doe,Harbor,5x7in,c. 1990,,,,ink,Studies,Drawings,,,\"$1,200\",0\n",
        ])?;
        assert_eq!(report.inserted, 1);
        assert_eq!(report.existing, 1);
        assert_eq!(report.skipped, 0);

        let (year, price): (String, String) = fx.store.connection().query_row(
            "SELECT year, price FROM artworks WHERE title = ?1",
            params!["Harbor"],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        assert_eq!(year, "c. 1990");
        assert_eq!(price, "$1,200");
        Ok(())
    }

    #[test]
    fn test_import_into_store_with_global_series_names() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let db_path = dir.path().join("catalog.db");
        rusqlite::Connection::open(&db_path)?.execute_batch(
            "CREATE TABLE series (
                id INTEGER PRIMARY KEY,
                artist_id INTEGER NOT NULL,
                name TEXT UNIQUE NOT NULL
            );",
        )?;

        let csv_path = dir.path().join("artworks.csv");
        fs::write(&csv_path, format!("{}{}", HEADER, BLUE_HOUR))?;

        let mut store = CatalogStore::open(&db_path)?;
        let mut audit = AuditLog::create(dir.path(), Local::now())?;
        let report = Importer::new(&mut store, &mut audit).import_file(&csv_path)?;

        assert_eq!(report.inserted, 1);
        let counts = store.counts()?;
        assert_eq!(counts.series, 1);
        assert_eq!(counts.artworks, 1);
        assert_eq!(counts.artwork_mediums, 2);
        Ok(())
    }

    #[test]
    fn test_fatal_error_aborts_run() -> Result<()> {
        let mut fx = Fixture::new()?;
        let records: Vec<(u64, crate::error::Result<ArtworkRow>)> = vec![(
            2,
            Err(ImportError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "connection lost",
            ))),
        )];
        let result = Importer::new(&mut fx.store, &mut fx.audit).run(records);
        assert!(matches!(result, Err(ImportError::Io(_))));
        Ok(())
    }
}
