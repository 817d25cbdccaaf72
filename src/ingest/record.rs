use serde::Deserialize;
use tracing::warn;

use crate::database::models::Scalar;

/// One line of the source file, as named by its header row. Required
/// columns are plain strings; a record lacking one fails to decode.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceRecord {
    pub artist_name: String,
    pub title: String,
    pub size: String,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub end_year: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    pub mediums: String,
    pub series: String,
    pub department: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub hi_res_url: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub sold: Option<String>,
}

/// A source record mapped onto catalog fields, ready for dimension
/// resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtworkRow {
    pub artist_name: String,
    pub title: String,
    pub size: String,
    pub year: Option<Scalar>,
    pub end_year: Option<Scalar>,
    pub description: String,
    pub keywords: String,
    pub mediums: Vec<String>,
    pub series: Option<String>,
    pub department: Option<String>,
    pub image_url: Option<String>,
    pub hi_res_url: Option<String>,
    pub price: Option<Scalar>,
    pub sold: bool,
}

impl ArtworkRow {
    pub fn from_record(line: u64, record: SourceRecord) -> Self {
        Self {
            year: scalar_field(line, "year", record.year, Scalar::integer),
            end_year: scalar_field(line, "end_year", record.end_year, Scalar::integer),
            price: scalar_field(line, "price", record.price, Scalar::real),
            sold: parse_sold(record.sold.as_deref()),
            mediums: split_mediums(&record.mediums),
            series: non_blank(Some(record.series)),
            department: non_blank(Some(record.department)),
            image_url: non_blank(record.image_url),
            hi_res_url: non_blank(record.hi_res_url),
            description: record.description.unwrap_or_default(),
            keywords: record.keywords.unwrap_or_default(),
            artist_name: record.artist_name,
            title: record.title,
            size: record.size,
        }
    }
}

/// Only the literal "1" marks an artwork as sold.
pub fn parse_sold(value: Option<&str>) -> bool {
    value == Some("1")
}

/// Splits the comma separated medium list. Tokens are trimmed and blanks dropped.
pub fn split_mediums(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Empty means absent. A value that is not a number is kept as text.
fn scalar_field(
    line: u64,
    field: &str,
    value: Option<String>,
    parse: fn(&str) -> Scalar,
) -> Option<Scalar> {
    let value = parse(non_blank(value)?.trim());
    if value.is_text() {
        warn!("Line {}: non-numeric {} {:?} stored as text", line, field, value);
    }
    Some(value)
}
