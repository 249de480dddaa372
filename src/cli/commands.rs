//! Command dispatch: turns parsed arguments into service calls

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, info, instrument};

use crate::application::services::PathMap;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings, LOCAL_CONFIG_FILE};
use crate::domain::{Outline, SanitizePolicy};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::InfraError;
use crate::util::path::normalize_path_separator;

/// Execute the parsed command line.
pub fn execute(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { input }) => cmd_tree(input),
        Some(Commands::Config { command }) => cmd_config(command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => {
            let (input, output_dir) = match (&cli.input, &cli.output) {
                (Some(input), Some(output_dir)) => (input, output_dir),
                _ => {
                    return Err(CliError::Usage(
                        "both INPUT and OUTPUT are required (see --help)".to_string(),
                    ))
                }
            };
            cmd_generate(cli, input, output_dir)
        }
    }
}

/// Directory next to the outline, where its local config lives.
fn outline_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Layered settings with command-line flags applied last.
fn resolve_settings(cli: &Cli, input: &Path) -> CliResult<Settings> {
    let mut settings = Settings::load(Some(&outline_dir(input)))?;
    if cli.remove_digits {
        settings.sanitize_policy = SanitizePolicy::StripDigits;
    }
    if cli.allow_empty_folders {
        settings.allow_empty_folders = true;
    }
    if let Some(max) = cli.max_name_length {
        settings.max_name_length = max;
    }
    settings.validate()?;
    debug!("effective settings: {:?}", settings);
    Ok(settings)
}

#[instrument(skip(cli))]
fn cmd_generate(cli: &Cli, input: &Path, output_dir: &Path) -> CliResult<()> {
    let settings = resolve_settings(cli, input)?;
    let container = ServiceContainer::new(settings);

    info!("Starting processing of {}", input.display());
    let outline = container
        .outline_service()
        .load(input, container.settings.max_name_length)?;
    let result = container
        .materialize_service()
        .materialize(&outline, output_dir)?;
    info!("Processing completed: {}", output_dir.display());

    if cli.print_map {
        print_map(&outline, &result.paths, output_dir);
    }
    output::success(&format!(
        "{} documents, {} directories in {}",
        result.documents.len(),
        result.directories.len(),
        output_dir.display()
    ));
    Ok(())
}

fn print_map(outline: &Outline, paths: &PathMap, base: &Path) {
    for (_, node) in outline.iter() {
        if let Some(path) = paths.get(&node.data.id) {
            let shown = pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf());
            output::info(&format!(
                "{}  {}",
                node.data.id.short(),
                normalize_path_separator(&shown.to_string_lossy())
            ));
        }
    }
}

#[instrument]
fn cmd_tree(input: &Path) -> CliResult<()> {
    let settings = Settings::load(Some(&outline_dir(input)))?;
    let container = ServiceContainer::new(settings);
    let outline = container
        .outline_service()
        .load(input, container.settings.max_name_length)?;

    if outline.is_empty() {
        output::warning("outline has no entries");
        return Ok(());
    }
    let label = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    output::info(&outline.to_tree(&label));
    output::detail(&format!(
        "{} nodes, depth {}",
        outline.len(),
        outline.depth()
    ));
    Ok(())
}

fn cmd_config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show { dir } => {
            let dir = dir.clone().unwrap_or_else(|| PathBuf::from("."));
            let settings = Settings::load(Some(&dir))?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(Path::new("."))
            };
            let fs = RealFileSystem;
            if fs.exists(&path) {
                return Err(CliError::Infra(InfraError::io(
                    format!("config file already exists: {}", path.display()),
                    io::Error::from(io::ErrorKind::AlreadyExists),
                )));
            }
            fs.ensure_parent(&path)
                .map_err(|e| InfraError::io(format!("create {}", path.display()), e))?;
            fs.write(&path, &Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
            Ok(())
        }
        ConfigCommands::Path => {
            output::header("Config paths");
            match global_config_path() {
                Some(path) => output::detail(&format!("global: {}", path.display())),
                None => output::detail("global: (unavailable)"),
            }
            output::detail(&format!(
                "local:  <outline_dir>/{}",
                LOCAL_CONFIG_FILE
            ));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_bare_file_name_when_resolving_outline_dir_then_uses_cwd() {
        assert_eq!(outline_dir(Path::new("outline.txt")), PathBuf::from("."));
        assert_eq!(
            outline_dir(Path::new("notes/outline.txt")),
            PathBuf::from("notes")
        );
    }

    #[test]
    fn given_missing_output_when_executing_then_usage_error() {
        let cli = Cli {
            input: Some(PathBuf::from("outline.txt")),
            output: None,
            remove_digits: false,
            allow_empty_folders: false,
            max_name_length: None,
            print_map: false,
            verbose: 0,
            command: None,
        };
        let result = execute(&cli);
        assert!(matches!(result, Err(CliError::Usage(_))));
    }
}
