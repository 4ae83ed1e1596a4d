//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use itertools::Itertools;

use crate::application::services::{BenchmarkReport, Strategy};
use crate::domain::Course;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// `None` for an empty list, otherwise the identifiers separated by one space.
pub fn format_prerequisites(course: &Course) -> String {
    if course.has_prerequisites() {
        course.prerequisites().iter().join(" ")
    } else {
        "None".to_string()
    }
}

/// Three-line course block used by the menu and the `list`/`show` commands.
pub fn format_course(course: &Course) -> String {
    format!(
        "Course Number: {}\nCourse Title: {}\nPrerequisites: {}",
        course.identifier(),
        course.title(),
        format_prerequisites(course)
    )
}

/// Benchmark results as an aligned table, fastest strategy marked.
pub fn format_benchmark(report: &BenchmarkReport) -> String {
    let fastest = report.timings.iter().min_by_key(|t| t.average).map(|t| t.strategy);

    let mut lines = vec![format!(
        "Average over {} runs, {} courses:",
        report.repeat, report.dataset_size
    )];
    for timing in &report.timings {
        let marker = if Some(timing.strategy) == fastest { " *" } else { "" };
        lines.push(format!(
            "{:<22} {:>12.6} s{}",
            timing.strategy.name(),
            timing.average.as_secs_f64(),
            marker
        ));
    }
    lines.join("\n")
}

/// One row per dataset size, one column per strategy.
pub fn format_scaling(reports: &[BenchmarkReport]) -> String {
    let header = std::iter::once(format!("{:>8}", "N"))
        .chain(Strategy::ALL.iter().map(|s| format!("{:>22}", s.name())))
        .join(" ");

    let rows = reports.iter().map(|report| {
        std::iter::once(format!("{:>8}", report.dataset_size))
            .chain(Strategy::ALL.iter().map(|&s| match report.timing(s) {
                Some(avg) => format!("{:>20.6} s", avg.as_secs_f64()),
                None => format!("{:>22}", "-"),
            }))
            .join(" ")
    });

    std::iter::once(header).chain(rows).join("\n")
}
