//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod bench;
mod catalog;

pub use bench::{synthetic_courses, BenchmarkReport, BenchmarkService, Strategy, StrategyTiming};
pub use catalog::{CatalogService, LoadReport};
