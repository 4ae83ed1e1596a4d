//! Tests for the interactive menu, driven by scripted input

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use coursetree::application::services::CatalogService;
use coursetree::cli::Menu;
use coursetree::domain::DuplicatePolicy;
use coursetree::infrastructure::traits::RealFileSystem;
use coursetree::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
    colored::control::set_override(false);
}

const DATA: &str = "CS101,Intro\nCS201,DS,CS101\nCS050,Pre\n";

fn new_service() -> CatalogService {
    CatalogService::new(Arc::new(RealFileSystem), DuplicatePolicy::Retain, ',')
}

/// Run the menu over `script` and return everything it printed.
fn run_session(service: &mut CatalogService, default_file: PathBuf, script: &str) -> String {
    let mut out: Vec<u8> = Vec::new();
    {
        let mut menu = Menu::new(service, default_file, script.as_bytes(), &mut out);
        menu.run().expect("menu session");
    }
    String::from_utf8(out).expect("utf8 output")
}

fn write_data(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("courses.csv");
    std::fs::write(&path, DATA).expect("write course data");
    path
}

#[test]
fn given_load_then_print_when_running_then_lists_sorted_courses() {
    let temp = TempDir::new().unwrap();
    let path = write_data(&temp);
    let mut service = new_service();

    let script = format!("1\n{}\n2\n9\n", path.display());
    let output = run_session(&mut service, PathBuf::from("unused.csv"), &script);

    assert!(output.contains("Loaded 3 courses from"));
    let cs050 = output.find("Course Number: CS050").unwrap();
    let cs101 = output.find("Course Number: CS101").unwrap();
    let cs201 = output.find("Course Number: CS201").unwrap();
    assert!(cs050 < cs101 && cs101 < cs201);
    assert!(output.contains("Prerequisites: CS101"));
    assert!(output.trim_end().ends_with("Exiting program..."));
}

#[test]
fn given_blank_file_answer_when_loading_then_uses_default_file() {
    let temp = TempDir::new().unwrap();
    let path = write_data(&temp);
    let mut service = new_service();

    let output = run_session(&mut service, path, "1\n\n9\n");

    assert!(output.contains("Loaded 3 courses from"));
    assert_eq!(service.len(), 3);
}

#[test]
fn given_loaded_catalog_when_searching_then_prints_course_or_not_found() {
    let temp = TempDir::new().unwrap();
    let path = write_data(&temp);
    let mut service = new_service();
    service.load(&path).unwrap();

    let output = run_session(&mut service, path, "3\nCS201\n3\nCS999\n9\n");

    assert!(output.contains("Course Number: CS201\nCourse Title: DS\nPrerequisites: CS101"));
    assert!(output.contains("Course not found."));
}

#[test]
fn given_empty_catalog_when_printing_then_reports_no_courses() {
    let mut service = new_service();

    let output = run_session(&mut service, PathBuf::from("courses.csv"), "2\n4\n9\n");

    assert_eq!(output.matches("No courses available to display.").count(), 2);
}

#[test]
fn given_unknown_choice_when_running_then_reprompts() {
    let mut service = new_service();

    let output = run_session(&mut service, PathBuf::from("courses.csv"), "7\nabc\n9\n");

    assert_eq!(output.matches("Invalid choice. Please try again.").count(), 2);
    assert_eq!(output.matches("Menu Options:").count(), 3);
}

#[test]
fn given_missing_file_when_loading_then_reports_error_and_continues() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.csv");
    let mut service = new_service();

    let script = format!("1\n{}\n2\n9\n", missing.display());
    let output = run_session(&mut service, PathBuf::from("courses.csv"), &script);

    assert!(output.contains("Error:"));
    assert!(output.contains("No courses available to display."));
    assert!(service.is_empty());
}

#[test]
fn given_input_ends_without_exit_when_running_then_exits_cleanly() {
    let mut service = new_service();

    let output = run_session(&mut service, PathBuf::from("courses.csv"), "2\n");

    assert!(output.trim_end().ends_with("Exiting program..."));
}
