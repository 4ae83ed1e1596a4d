//! Interactive menu loop
//!
//! Reads choices line by line from any `BufRead` and writes to any `Write`,
//! so sessions can be replayed in tests.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;
use tracing::{debug, instrument};

use crate::application::services::{CatalogService, LoadReport};
use crate::cli::output::format_course;
use crate::infrastructure::{InfraError, InfraResult};
use crate::util::path::expand_input;

const MENU: &str = "\nMenu Options:\n\
1. Load Course Data\n\
2. Print All Courses\n\
3. Search for a Course\n\
4. Print Sorted Courses\n\
9. Exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Load,
    PrintAll,
    Search,
    PrintSorted,
    Exit,
    Invalid(String),
}

impl From<&str> for MenuChoice {
    fn from(s: &str) -> Self {
        match s.trim() {
            "1" => MenuChoice::Load,
            "2" => MenuChoice::PrintAll,
            "3" => MenuChoice::Search,
            "4" => MenuChoice::PrintSorted,
            "9" => MenuChoice::Exit,
            other => MenuChoice::Invalid(other.to_string()),
        }
    }
}

pub struct Menu<'a, R, W> {
    service: &'a mut CatalogService,
    default_file: PathBuf,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    /// `default_file` is loaded when the file prompt is answered with a blank line.
    pub fn new(service: &'a mut CatalogService, default_file: PathBuf, input: R, out: W) -> Self {
        Self {
            service,
            default_file,
            input,
            out,
        }
    }

    /// Run until Exit is chosen or input ends.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> InfraResult<()> {
        loop {
            writeln!(self.out, "{MENU}").map_err(write_err)?;
            let Some(line) = self.prompt("Enter your choice:")? else {
                break;
            };

            let choice = MenuChoice::from(line.as_str());
            debug!("menu choice: {:?}", choice);

            let keep_going = match choice {
                MenuChoice::Load => self.load()?,
                MenuChoice::PrintAll | MenuChoice::PrintSorted => self.print_all()?,
                MenuChoice::Search => self.search()?,
                MenuChoice::Exit => false,
                MenuChoice::Invalid(_) => {
                    writeln!(self.out, "Invalid choice. Please try again.").map_err(write_err)?;
                    true
                }
            };

            if !keep_going {
                break;
            }
        }

        writeln!(self.out, "Exiting program...").map_err(write_err)?;
        self.out.flush().map_err(write_err)
    }

    /// Print `label`, then read one line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> InfraResult<Option<String>> {
        write!(self.out, "{} ", label.cyan()).map_err(write_err)?;
        self.out.flush().map_err(write_err)?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| InfraError::io("read menu input", e))?;
        if read == 0 {
            writeln!(self.out).map_err(write_err)?;
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn load(&mut self) -> InfraResult<bool> {
        let Some(line) = self.prompt("Enter the file name to load courses:")? else {
            return Ok(false);
        };
        let path = expand_input(&line).unwrap_or_else(|| self.default_file.clone());

        match self.service.load(&path) {
            Ok(report) => self.write_report(&report)?,
            Err(e) => writeln!(self.out, "{} {}", "Error:".red(), e).map_err(write_err)?,
        }
        Ok(true)
    }

    fn write_report(&mut self, report: &LoadReport) -> InfraResult<()> {
        for diagnostic in report.diagnostics() {
            writeln!(self.out, "{} {}", "Skipped:".yellow(), diagnostic).map_err(write_err)?;
        }
        writeln!(
            self.out,
            "Loaded {} courses from {}",
            report.loaded(),
            report.source.display()
        )
        .map_err(write_err)
    }

    fn print_all(&mut self) -> InfraResult<bool> {
        if self.service.is_empty() {
            writeln!(self.out, "No courses available to display.").map_err(write_err)?;
            return Ok(true);
        }

        writeln!(self.out, "\n{}", "Courses in Alphanumeric Order:".bold()).map_err(write_err)?;
        for course in self.service.catalog().iter() {
            writeln!(self.out, "{}\n", format_course(course)).map_err(write_err)?;
        }
        Ok(true)
    }

    fn search(&mut self) -> InfraResult<bool> {
        let Some(line) = self.prompt("Enter course number:")? else {
            return Ok(false);
        };
        let identifier = line.trim();

        let written = match self.service.find(identifier) {
            Some(course) => writeln!(self.out, "{}", format_course(course)),
            None => writeln!(self.out, "{}", "Course not found.".red()),
        };
        written.map_err(write_err)?;
        Ok(true)
    }
}

fn write_err(e: std::io::Error) -> InfraError {
    InfraError::io("write menu output", e)
}
