//! coursetree: an in-memory course catalog backed by a binary search tree
//!
//! Architecture:
//! - `domain`: course entity, record parsing, the catalog tree
//! - `application`: loading and benchmark services
//! - `infrastructure`: filesystem boundary, DI container
//! - `cli`: argument parsing, command dispatch, interactive menu

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{Course, CourseCatalog, DuplicatePolicy};
