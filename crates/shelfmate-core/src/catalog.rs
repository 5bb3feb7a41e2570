//! CSV catalog loading and cleaning.
//!
//! Rows are read by column name, rows with a missing `title` or `authors`
//! are dropped, identical `(title, authors)` pairs are collapsed (first wins)
//! and the result is capped to a maximum number of books.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::Book;

pub const DEFAULT_MAX_ITEMS: usize = 3000;

/// Field values treated as missing, in addition to the empty string.
const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A record as read from the source, before cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub title: Option<String>,
    pub authors: Option<String>,
}

impl RawRecord {
    pub fn new(title: Option<&str>, authors: Option<&str>) -> Self {
        Self { title: title.and_then(present), authors: authors.and_then(present) }
    }
}

/// Counters describing what cleaning did to the source rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub rows_read: usize,
    pub malformed: usize,
    pub missing: usize,
    pub duplicates: usize,
    pub truncated: usize,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub books: Vec<Book>,
    pub stats: CatalogStats,
}

#[derive(Debug, Clone)]
pub struct CatalogLoader {
    max_items: Option<usize>,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self { max_items: Some(DEFAULT_MAX_ITEMS) }
    }
}

impl CatalogLoader {
    pub fn new() -> Self { Self::default() }

    /// `None` keeps every cleaned record.
    pub fn with_max_items(mut self, max_items: Option<usize>) -> Self {
        self.max_items = max_items;
        self
    }

    pub fn load_csv(&self, path: &Path) -> Result<Catalog> {
        info!(path = %path.display(), "loading catalog");
        let file = File::open(path)?;
        match self.load_reader(file) {
            Err(Error::EmptyCatalog(_)) => Err(Error::EmptyCatalog(path.display().to_string())),
            other => other,
        }
    }

    /// Reads a headed CSV stream. Rows with more fields than the header are
    /// skipped as malformed; rows with fewer fields are treated as having the
    /// trailing fields missing.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Catalog> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = rdr.headers()?.clone();
        let title_col = column_index(&headers, "title")?;
        let authors_col = column_index(&headers, "authors")?;

        let mut rows_read = 0;
        let mut malformed = 0;
        let mut records = Vec::new();
        for (line, result) in rdr.records().enumerate() {
            rows_read += 1;
            let record = match result {
                Ok(record) if record.len() <= headers.len() => record,
                Ok(record) => {
                    debug!(line = line + 2, fields = record.len(), expected = headers.len(), "skipping row with extra fields");
                    malformed += 1;
                    continue;
                }
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    debug!(line = line + 2, error = %e, "skipping unreadable row");
                    malformed += 1;
                    continue;
                }
            };
            records.push(RawRecord::new(record.get(title_col), record.get(authors_col)));
        }

        let mut catalog = self.clean(records);
        catalog.stats.rows_read = rows_read;
        catalog.stats.malformed = malformed;
        if catalog.books.is_empty() {
            return Err(Error::EmptyCatalog("no rows with both title and authors".to_string()));
        }
        info!(
            books = catalog.books.len(),
            rows = rows_read,
            malformed,
            missing = catalog.stats.missing,
            duplicates = catalog.stats.duplicates,
            truncated = catalog.stats.truncated,
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Drops incomplete and duplicate records, then applies the cap.
    pub fn clean<I>(&self, records: I) -> Catalog
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut stats = CatalogStats::default();
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut books = Vec::new();
        for record in records {
            let (Some(title), Some(authors)) = (record.title, record.authors) else {
                stats.missing += 1;
                continue;
            };
            if !seen.insert((title.clone(), authors.clone())) {
                stats.duplicates += 1;
                continue;
            }
            books.push(Book { title, authors });
        }
        if let Some(max) = self.max_items {
            if books.len() > max {
                stats.truncated = books.len() - max;
                books.truncate(max);
            }
        }
        Catalog { books, stats }
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| Error::MissingColumn(name.to_string()))
}

fn present(value: &str) -> Option<String> {
    if value.is_empty() || NA_MARKERS.contains(&value) { None } else { Some(value.to_string()) }
}
