//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{BenchmarkService, CatalogService};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding settings and the I/O implementations services are built from.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs }
    }

    /// Fresh catalog service configured from settings.
    pub fn catalog_service(&self) -> CatalogService {
        CatalogService::new(
            Arc::clone(&self.fs),
            self.settings.duplicates,
            self.settings.delimiter,
        )
    }

    pub fn benchmark_service(&self) -> BenchmarkService {
        BenchmarkService::new(self.settings.bench_repeat)
    }
}
