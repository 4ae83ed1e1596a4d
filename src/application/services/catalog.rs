//! Course catalog service
//!
//! Loads delimited course data into a `CourseCatalog` and answers queries on it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{parse_bytes, Course, CourseCatalog, DomainError, DuplicatePolicy, Insertion};
use crate::infrastructure::traits::FileSystem;

/// Summary of one load.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// File the records came from
    pub source: PathBuf,
    /// Records attached as new nodes
    pub inserted: usize,
    /// Records that replaced an existing course (overwrite policy)
    pub replaced: usize,
    /// Lines rejected by the parser
    pub skipped: Vec<DomainError>,
    /// Records refused by the catalog (reject policy)
    pub rejected: Vec<DomainError>,
}

impl LoadReport {
    /// Records that made it into the catalog.
    pub fn loaded(&self) -> usize {
        self.inserted + self.replaced
    }

    /// Every diagnostic, parser first.
    pub fn diagnostics(&self) -> impl Iterator<Item = &DomainError> {
        self.skipped.iter().chain(self.rejected.iter())
    }
}

/// Service owning the catalog for the lifetime of a session.
///
/// Loads accumulate: a second file is inserted into the same catalog.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
    catalog: CourseCatalog,
    delimiter: char,
}

impl CatalogService {
    /// Create a service with an empty catalog.
    pub fn new(fs: Arc<dyn FileSystem>, policy: DuplicatePolicy, delimiter: char) -> Self {
        Self {
            fs,
            catalog: CourseCatalog::with_policy(policy),
            delimiter,
        }
    }

    /// Read `path` and insert every valid record.
    ///
    /// Malformed lines and rejected duplicates are reported, not fatal. A
    /// missing or unreadable file is an error and leaves the catalog untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&mut self, path: &Path) -> ApplicationResult<LoadReport> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("course data not found: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "file does not exist",
                )),
            });
        }

        let content = self
            .fs
            .read(path)
            .with_path_context("read course data", path)?;

        let parsed = parse_bytes(&content, self.delimiter);
        debug!(
            "load: parsed {} records, skipped {} lines",
            parsed.courses.len(),
            parsed.skipped.len()
        );

        let mut report = LoadReport {
            source: path.to_path_buf(),
            inserted: 0,
            replaced: 0,
            skipped: parsed.skipped,
            rejected: Vec::new(),
        };

        for course in parsed.courses {
            match self.catalog.insert(course) {
                Ok(Insertion::Added) => report.inserted += 1,
                Ok(Insertion::Replaced) => report.replaced += 1,
                Err(e) => {
                    warn!("not loaded: {}", e);
                    report.rejected.push(e);
                }
            }
        }

        info!(
            "loaded {} courses from {} ({} total)",
            report.loaded(),
            path.display(),
            self.catalog.len()
        );
        Ok(report)
    }

    /// Look up one course by identifier.
    pub fn find(&self, identifier: &str) -> Option<&Course> {
        debug!("find: {}", identifier);
        self.catalog.search(identifier)
    }

    /// Snapshot of all courses in identifier order.
    pub fn sorted_courses(&self) -> Vec<Course> {
        self.catalog.sorted_courses()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }
}
