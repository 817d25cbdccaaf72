use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, ToSql, TransactionBehavior};
use tracing::debug;

use crate::database::models::{ArtworkOutcome, CatalogCounts, LinkOutcome, NewArtwork};
use crate::database::schema::SCHEMA;
use crate::error::Result;

const UNKNOWN_NAME: &str = "Unknown";
const NO_BIO: &str = "No bio available";

/// Handle to the catalog store. Every write commits on its own, so work done
/// for one record stays visible even if a later step for that record fails.
pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    pub fn open(path: &Path) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns the artist with this display name, creating a placeholder
    /// artist when none exists. Display names are not unique in the store.
    pub fn resolve_artist(&mut self, artist_name: &str) -> Result<i64> {
        self.get_or_create(
            "artist",
            artist_name,
            "SELECT id FROM artists WHERE artist_name = ?1 ORDER BY id LIMIT 1",
            params![artist_name],
            "INSERT INTO artists (artist_name, first_name, last_name, short_bio)
             VALUES (?1, ?2, ?2, ?3)",
            params![artist_name, UNKNOWN_NAME, NO_BIO],
        )
    }

    pub fn resolve_department(&mut self, name: &str) -> Result<i64> {
        self.get_or_create(
            "department",
            name,
            "SELECT id FROM departments WHERE name = ?1 ORDER BY id LIMIT 1",
            params![name],
            "INSERT INTO departments (name) VALUES (?1)",
            params![name],
        )
    }

    /// Series names are only unique per artist.
    pub fn resolve_series(&mut self, artist_id: i64, name: &str) -> Result<i64> {
        self.get_or_create(
            "series",
            name,
            "SELECT id FROM series WHERE name = ?1 AND artist_id = ?2 ORDER BY id LIMIT 1",
            params![name, artist_id],
            "INSERT INTO series (artist_id, name) VALUES (?1, ?2)",
            params![artist_id, name],
        )
    }

    pub fn resolve_medium(&mut self, name: &str) -> Result<i64> {
        self.get_or_create(
            "medium",
            name,
            "SELECT id FROM mediums WHERE name = ?1 ORDER BY id LIMIT 1",
            params![name],
            "INSERT INTO mediums (name) VALUES (?1)",
            params![name],
        )
    }

    /// Lookup and insert share one immediate transaction, so no other writer
    /// can create the same row in between. Relies on no particular unique
    /// constraint, which keeps stores created by other tools usable.
    fn get_or_create(
        &mut self,
        entity: &str,
        key: &str,
        lookup: &str,
        lookup_params: &[&dyn ToSql],
        insert: &str,
        insert_params: &[&dyn ToSql],
    ) -> Result<i64> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing: Option<i64> = tx
            .query_row(lookup, lookup_params, |row| row.get(0))
            .optional()?;

        let id = match existing {
            Some(id) => id,
            None => {
                tx.execute(insert, insert_params)?;
                let id = tx.last_insert_rowid();
                debug!("Created {} {:?} with id {}", entity, key, id);
                id
            }
        };

        tx.commit()?;
        Ok(id)
    }

    /// Inserts the artwork unless one with the same (title, year, artist)
    /// already exists. Existing rows are never updated. A null year only
    /// matches another null year.
    pub fn insert_artwork_if_absent(&mut self, artwork: &NewArtwork) -> Result<ArtworkOutcome> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM artworks
                 WHERE title = ?1 AND year IS ?2 AND artist_id = ?3
                 ORDER BY id LIMIT 1",
                params![artwork.title, artwork.year, artwork.artist_id],
                |row| row.get(0),
            )
            .optional()?;

        let outcome = match existing {
            Some(id) => ArtworkOutcome::Existing(id),
            None => {
                tx.execute(
                    "INSERT INTO artworks (artist_id, title, size, year, end_year, description,
                        keywords, price, sold, image_url, hi_res_url, series, department)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                    params![
                        artwork.artist_id,
                        artwork.title,
                        artwork.size,
                        artwork.year,
                        artwork.end_year,
                        artwork.description,
                        artwork.keywords,
                        artwork.price,
                        if artwork.sold { 1 } else { 0 },
                        artwork.image_url,
                        artwork.hi_res_url,
                        artwork.series_id,
                        artwork.department_id,
                    ],
                )?;
                ArtworkOutcome::Inserted(tx.last_insert_rowid())
            }
        };

        tx.commit()?;
        Ok(outcome)
    }

    pub fn link_medium(&self, artwork_id: i64, medium_id: i64) -> Result<LinkOutcome> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT OR IGNORE INTO artworks_mediums (artwork_id, medium_id) VALUES (?1, ?2)",
        )?;
        let changed = stmt.execute(params![artwork_id, medium_id])?;
        Ok(if changed == 0 {
            LinkOutcome::AlreadyLinked
        } else {
            LinkOutcome::Linked
        })
    }

    pub fn counts(&self) -> Result<CatalogCounts> {
        let count = |table: &str| -> Result<usize> {
            let n: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
            Ok(n as usize)
        };

        Ok(CatalogCounts {
            artists: count("artists")?,
            departments: count("departments")?,
            series: count("series")?,
            mediums: count("mediums")?,
            artworks: count("artworks")?,
            artwork_mediums: count("artworks_mediums")?,
        })
    }
}
