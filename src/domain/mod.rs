//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod catalog;
pub mod entities;
pub mod error;
pub mod record;
pub mod tree_view;

pub use catalog::{CatalogNode, CourseCatalog, DuplicatePolicy, InOrderIter, Insertion};
pub use entities::Course;
pub use error::{DomainError, DomainResult};
pub use record::{parse_bytes, parse_record, parse_records, ParsedRecords, DEFAULT_DELIMITER};
pub use tree_view::CatalogTreeConvert;
