//! Storage strategy benchmark
//!
//! Times the catalog BST against plain `Vec` and `HashMap` baselines that
//! sort after the fact.

use std::collections::HashMap;
use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Course, CourseCatalog};

/// Default number of runs averaged per strategy.
pub const DEFAULT_REPEAT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Insert into the catalog, then walk it in order
    BstInsertInorder,
    /// Push into a Vec, then sort by identifier
    VecPushSort,
    /// Key a HashMap by identifier, then collect and sort the values
    HashMapValuesSort,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::BstInsertInorder,
        Strategy::VecPushSort,
        Strategy::HashMapValuesSort,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::BstInsertInorder => "bst_insert_inorder",
            Strategy::VecPushSort => "vec_push_sort",
            Strategy::HashMapValuesSort => "hashmap_values_sort",
        }
    }

    /// Build the structure from `dataset` and return the identifiers in order.
    fn run(&self, dataset: &[Course]) -> Vec<String> {
        match self {
            Strategy::BstInsertInorder => {
                let mut catalog = CourseCatalog::new();
                catalog.extend(dataset.iter().cloned());
                catalog.iter().map(|c| c.identifier().to_string()).collect()
            }
            Strategy::VecPushSort => {
                let mut courses: Vec<Course> = Vec::with_capacity(dataset.len());
                courses.extend(dataset.iter().cloned());
                courses.sort_by(|a, b| a.identifier().cmp(b.identifier()));
                courses.iter().map(|c| c.identifier().to_string()).collect()
            }
            Strategy::HashMapValuesSort => {
                let index: HashMap<String, Course> = dataset
                    .iter()
                    .map(|c| (c.identifier().to_string(), c.clone()))
                    .collect();
                let mut courses: Vec<&Course> = index.values().collect();
                courses.sort_by(|a, b| a.identifier().cmp(b.identifier()));
                courses.iter().map(|c| c.identifier().to_string()).collect()
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct StrategyTiming {
    pub strategy: Strategy,
    /// Mean wall time of one build + ordered read
    pub average: Duration,
}

#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    pub dataset_size: usize,
    pub repeat: usize,
    pub timings: Vec<StrategyTiming>,
}

impl BenchmarkReport {
    pub fn timing(&self, strategy: Strategy) -> Option<Duration> {
        self.timings
            .iter()
            .find(|t| t.strategy == strategy)
            .map(|t| t.average)
    }
}

/// Runs every strategy against the same dataset.
pub struct BenchmarkService {
    repeat: usize,
}

impl Default for BenchmarkService {
    fn default() -> Self {
        Self::new(DEFAULT_REPEAT)
    }
}

impl BenchmarkService {
    /// `repeat` is clamped to at least one run.
    pub fn new(repeat: usize) -> Self {
        Self {
            repeat: repeat.max(1),
        }
    }

    #[instrument(level = "debug", skip(self, dataset), fields(size = dataset.len()))]
    pub fn run(&self, dataset: &[Course]) -> ApplicationResult<BenchmarkReport> {
        if dataset.is_empty() {
            return Err(ApplicationError::EmptyDataset);
        }

        let timings = Strategy::ALL
            .iter()
            .map(|&strategy| {
                let mut total = Duration::ZERO;
                for _ in 0..self.repeat {
                    let start = Instant::now();
                    black_box(strategy.run(black_box(dataset)));
                    total += start.elapsed();
                }
                let mean = average(total, self.repeat);
                debug!("{}: {:?}", strategy, mean);
                StrategyTiming {
                    strategy,
                    average: mean,
                }
            })
            .collect();

        Ok(BenchmarkReport {
            dataset_size: dataset.len(),
            repeat: self.repeat,
            timings,
        })
    }

    /// One report per size, each on a fresh synthetic dataset.
    ///
    /// Synthetic data arrives sorted, so the catalog's quadratic build cost
    /// shows up as the sizes grow.
    #[instrument(level = "debug", skip(self))]
    pub fn run_scaling(&self, sizes: &[usize]) -> ApplicationResult<Vec<BenchmarkReport>> {
        sizes
            .iter()
            .map(|&n| self.run(&synthetic_courses(n)))
            .collect()
    }
}

/// Mean run time; `runs` may exceed `u32::MAX`.
fn average(total: Duration, runs: usize) -> Duration {
    total.div_f64(runs as f64)
}

/// Deterministic dataset of `n` courses `CSCI1000`, `CSCI1001`, ...
///
/// Generated in ascending identifier order, which is the catalog's worst case.
/// Course `i` has `i % 3` prerequisites drawn from earlier courses.
pub fn synthetic_courses(n: usize) -> Vec<Course> {
    (0..n)
        .filter_map(|i| {
            let prerequisites = if i == 0 {
                Vec::new()
            } else {
                (0..i % 3)
                    .map(|k| format!("CSCI{:04}", 1000 + (i * 7 + k) % i))
                    .collect()
            };
            Course::new(format!("CSCI{:04}", 1000 + i), format!("Course {i}"), prerequisites).ok()
        })
        .collect()
}
