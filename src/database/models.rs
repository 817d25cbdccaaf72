use rusqlite::types::{ToSql, ToSqlOutput};

/// A loosely typed column value. Numbers that parse are stored as numbers,
/// anything else keeps its source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Scalar {
    pub fn integer(raw: &str) -> Self {
        raw.parse().map(Scalar::Integer).unwrap_or_else(|_| Scalar::Text(raw.to_string()))
    }

    pub fn real(raw: &str) -> Self {
        raw.parse().map(Scalar::Real).unwrap_or_else(|_| Scalar::Text(raw.to_string()))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Scalar::Text(_))
    }
}

impl ToSql for Scalar {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Scalar::Integer(v) => ToSqlOutput::from(*v),
            Scalar::Real(v) => ToSqlOutput::from(*v),
            Scalar::Text(v) => ToSqlOutput::from(v.as_str()),
        })
    }
}

/// Scalar artwork fields plus the dimension ids already resolved for them.
#[derive(Debug, Clone, PartialEq)]
pub struct NewArtwork {
    pub artist_id: i64,
    pub title: String,
    pub size: String,
    pub year: Option<Scalar>,
    pub end_year: Option<Scalar>,
    pub description: String,
    pub keywords: String,
    pub price: Option<Scalar>,
    pub sold: bool,
    pub image_url: Option<String>,
    pub hi_res_url: Option<String>,
    pub series_id: Option<i64>,
    pub department_id: Option<i64>,
}

/// Result of the insert-if-absent artwork write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtworkOutcome {
    Inserted(i64),
    Existing(i64),
}

impl ArtworkOutcome {
    pub fn id(self) -> i64 {
        match self {
            ArtworkOutcome::Inserted(id) | ArtworkOutcome::Existing(id) => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Linked,
    AlreadyLinked,
}

/// Row totals per catalog table, used for end-of-run reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub artists: usize,
    pub departments: usize,
    pub series: usize,
    pub mediums: usize,
    pub artworks: usize,
    pub artwork_mediums: usize,
}
