//! Tests for the benchmark service

use coursetree::application::services::{synthetic_courses, BenchmarkService, Strategy};
use coursetree::application::ApplicationError;
use coursetree::domain::CourseCatalog;

#[test]
fn given_synthetic_dataset_when_benchmarking_then_times_every_strategy() {
    let courses = synthetic_courses(200);

    let report = BenchmarkService::new(2).run(&courses).unwrap();

    assert_eq!(report.dataset_size, 200);
    assert_eq!(report.repeat, 2);
    assert_eq!(report.timings.len(), Strategy::ALL.len());
    for strategy in Strategy::ALL {
        assert!(report.timing(strategy).is_some(), "{strategy} missing");
    }
}

#[test]
fn given_empty_dataset_when_benchmarking_then_errors() {
    let result = BenchmarkService::default().run(&[]);

    assert!(matches!(result, Err(ApplicationError::EmptyDataset)));
}

#[test]
fn given_synthetic_dataset_when_loaded_into_catalog_then_sorted_and_searchable() {
    let courses = synthetic_courses(30);
    let mut catalog = CourseCatalog::new();
    catalog.extend(courses.clone());

    assert_eq!(catalog.sorted_courses(), courses);
    let course = catalog.search("CSCI1005").unwrap();
    assert_eq!(course.prerequisites().len(), 5 % 3);
}

#[test]
fn given_growing_sizes_when_scaling_then_reports_every_strategy_per_size() {
    let sizes = [20, 60, 120];

    let reports = BenchmarkService::new(1).run_scaling(&sizes).unwrap();

    assert_eq!(reports.len(), sizes.len());
    for (report, size) in reports.iter().zip(sizes) {
        assert_eq!(report.dataset_size, size);
        for strategy in Strategy::ALL {
            assert!(report.timing(strategy).is_some(), "{strategy} missing at {size}");
        }
    }
}
