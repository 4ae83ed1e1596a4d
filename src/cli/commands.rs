//! Command dispatch: each subcommand loads what it needs and prints the result.

use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{synthetic_courses, BenchmarkService, CatalogService};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::menu::Menu;
use crate::cli::output::{self, format_benchmark, format_course, format_scaling};
use crate::config::{global_config_path, Settings};
use crate::domain::CatalogTreeConvert;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::util::path::expand_path;

/// Run the parsed command line. No subcommand means the interactive menu.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match &cli.command {
        None => cmd_menu(&container, None),
        Some(Commands::Menu { file }) => cmd_menu(&container, file.as_deref()),
        Some(Commands::List { file }) => cmd_list(&container, file),
        Some(Commands::Show { file, id }) => cmd_show(&container, file, id),
        Some(Commands::Tree { file }) => cmd_tree(&container, file),
        Some(Commands::Bench {
            file,
            repeat,
            size,
            sizes,
        }) => cmd_bench(&container, file.as_deref(), *repeat, *size, sizes),
        Some(Commands::Config { command }) => cmd_config(&container, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Fresh catalog service with `file` loaded; diagnostics go to stderr.
fn load_catalog(container: &ServiceContainer, file: &Path) -> CliResult<CatalogService> {
    let mut service = container.catalog_service();
    let report = service.load(&expand_path(file))?;
    for diagnostic in report.diagnostics() {
        output::warning(diagnostic);
    }
    debug!("loaded {} of {}", report.loaded(), report.source.display());
    Ok(service)
}

#[instrument(skip(container))]
fn cmd_menu(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let mut service = container.catalog_service();
    if let Some(file) = file {
        let report = service.load(&expand_path(file))?;
        for diagnostic in report.diagnostics() {
            output::warning(diagnostic);
        }
        output::success(&format!(
            "Loaded {} courses from {}",
            report.loaded(),
            report.source.display()
        ));
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(
        &mut service,
        container.settings.data_file.clone(),
        stdin.lock(),
        stdout.lock(),
    );
    menu.run()?;
    Ok(())
}

#[instrument(skip(container))]
fn cmd_list(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let service = load_catalog(container, file)?;
    if service.is_empty() {
        output::info("No courses available to display.");
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for course in service.catalog().iter() {
        writeln!(out, "{}\n", format_course(course))
            .map_err(|e| InfraError::io("write course list", e))?;
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, file: &Path, id: &str) -> CliResult<()> {
    let service = load_catalog(container, file)?;
    let course = service
        .find(id.trim())
        .ok_or_else(|| CliError::CourseNotFound(id.to_string()))?;
    output::info(&format_course(course));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let service = load_catalog(container, file)?;
    let catalog = service.catalog();
    output::info(&catalog.to_tree_string());
    output::detail(&format!(
        "{} courses, height {}",
        catalog.len(),
        catalog.height()
    ));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_bench(
    container: &ServiceContainer,
    file: Option<&Path>,
    repeat: Option<usize>,
    size: usize,
    sizes: &[usize],
) -> CliResult<()> {
    let bench = match repeat {
        Some(0) => return Err(CliError::InvalidArgs("--repeat must be at least 1".into())),
        Some(n) => BenchmarkService::new(n),
        None => container.benchmark_service(),
    };

    if !sizes.is_empty() {
        let reports = bench.run_scaling(sizes)?;
        output::info(&format_scaling(&reports));
        return Ok(());
    }

    let courses = match file {
        Some(file) => load_catalog(container, file)?.sorted_courses(),
        None => synthetic_courses(size),
    };

    let report = bench.run(&courses)?;
    output::info(&format_benchmark(&report));
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path()
                .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?;
            if container.fs.exists(&path) && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .map_err(|e| InfraError::io(format!("create {}", path.display()), e))?;
            container
                .fs
                .write(&path, &Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("Created {}", path.display()));
            Ok(())
        }
        ConfigCommands::Path => {
            output::header("Config paths");
            match global_config_path() {
                Some(path) => {
                    let state = if path.exists() { "exists" } else { "not found" };
                    output::detail(&format!("global: {} ({})", path.display(), state));
                }
                None => output::detail("global: unavailable"),
            }
            output::detail("env:    COURSETREE_* variables");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Arc;

    use crate::infrastructure::traits::FileSystem;

    /// Read-only in-memory files
    struct MemoryFileSystem(HashMap<PathBuf, Vec<u8>>);

    impl FileSystem for MemoryFileSystem {
        fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }

        fn write(&self, _path: &Path, _content: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }

        fn exists(&self, path: &Path) -> bool {
            self.0.contains_key(path)
        }

        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            Ok(())
        }

        fn ensure_parent(&self, _path: &Path) -> io::Result<()> {
            Ok(())
        }
    }

    fn container_with(path: &str, content: &str) -> ServiceContainer {
        let files = HashMap::from([(PathBuf::from(path), content.as_bytes().to_vec())]);
        ServiceContainer::with_deps(Settings::default(), Arc::new(MemoryFileSystem(files)))
    }

    #[test]
    fn given_unknown_id_when_showing_then_course_not_found_with_exit_code_one() {
        let container = container_with("data.csv", "CS101,Intro\nCS201,DS,CS101\n");

        let result = cmd_show(&container, Path::new("data.csv"), "CS999");

        match result {
            Err(e @ CliError::CourseNotFound(_)) => {
                assert_eq!(e.to_string(), "course not found: CS999");
                assert_eq!(e.exit_code(), crate::exitcode::NOT_FOUND);
            }
            other => panic!("expected CourseNotFound, got {other:?}"),
        }
    }

    #[test]
    fn given_known_id_when_showing_then_succeeds() {
        let container = container_with("data.csv", "CS101,Intro\n");

        assert!(cmd_show(&container, Path::new("data.csv"), " CS101 ").is_ok());
    }

    #[test]
    fn given_missing_file_when_showing_then_noinput_exit_code() {
        let container = container_with("data.csv", "CS101,Intro\n");

        let err = cmd_show(&container, Path::new("other.csv"), "CS101").unwrap_err();

        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);
    }

    #[test]
    fn given_zero_repeat_when_benchmarking_then_invalid_args() {
        let container = container_with("data.csv", "CS101,Intro\n");

        let result = cmd_bench(&container, None, Some(0), 10, &[]);

        assert!(matches!(result, Err(CliError::InvalidArgs(_))));
    }

    #[test]
    fn given_sizes_when_benchmarking_then_runs_scaling() {
        let container = container_with("data.csv", "CS101,Intro\n");

        assert!(cmd_bench(&container, None, Some(1), 10, &[5, 10]).is_ok());
        assert!(matches!(
            cmd_bench(&container, None, Some(1), 10, &[0]),
            Err(CliError::Infra(_))
        ));
    }
}
