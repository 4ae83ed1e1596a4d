//! Domain entities: core data structures

use std::fmt;

use crate::domain::error::{DomainError, DomainResult};

/// A single course record.
///
/// Built once through [`Course::new`] and never mutated afterwards; the catalog
/// hands out shared references or clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    identifier: String,
    title: String,
    prerequisites: Vec<String>,
}

impl Course {
    /// Build a course, rejecting an empty identifier or title.
    ///
    /// Prerequisites are taken as given: no uniqueness or existence check.
    pub fn new(
        identifier: impl Into<String>,
        title: impl Into<String>,
        prerequisites: Vec<String>,
    ) -> DomainResult<Self> {
        let identifier = identifier.into();
        let title = title.into();

        if identifier.is_empty() {
            return Err(DomainError::EmptyIdentifier);
        }
        if title.is_empty() {
            return Err(DomainError::EmptyTitle(identifier));
        }

        Ok(Self {
            identifier,
            title,
            prerequisites,
        })
    }

    /// Sort and search key.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }

    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.identifier, self.title)
    }
}
