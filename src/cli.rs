//! Command-line interface for shaderdeck.
//!
//! Handles argument parsing and the headless `--export` / `--check` paths,
//! which run without opening a window or touching the GPU.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use shaderdeck_config::{Config, EditorMode, LogLevel};
use std::path::PathBuf;

use crate::pipeline::{AssemblyOptions, EditorAction, EditorDocument};
use crate::session::Session;

/// shaderdeck - A live GLSL fragment shader editor
#[derive(Parser, Debug)]
#[command(name = "shaderdeck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Session file to open (YAML)
    #[arg(long, value_name = "FILE")]
    pub session: Option<PathBuf>,

    /// GLSL file to edit in single mode; external changes are reloaded.
    /// Cannot be combined with `--mode pipeline`
    #[arg(long, value_name = "FILE", conflicts_with = "session")]
    pub shader: Option<PathBuf>,

    /// Editor mode to start in
    #[arg(long, value_enum)]
    pub mode: Option<CliMode>,

    /// Write the assembled fragment shader to PATH and exit
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Translate both shader stages and exit (status 1 on errors)
    #[arg(long)]
    pub check: bool,

    /// Log level for the debug log file
    #[arg(long, value_enum)]
    pub log_level: Option<CliLogLevel>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CliMode {
    Single,
    Pipeline,
}

impl From<CliMode> for EditorMode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Single => EditorMode::Single,
            CliMode::Pipeline => EditorMode::Pipeline,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CliLogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Off => LogLevel::Off,
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    /// Session file to load at start-up
    pub session: Option<PathBuf>,
    /// GLSL file to edit and watch
    pub shader: Option<PathBuf>,
    /// Mode override
    pub mode: Option<EditorMode>,
    /// Log level override
    pub log_level: Option<LogLevel>,
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with normal application startup
    Continue(RuntimeOptions),
    /// Exit with the given code (headless command completed)
    Exit(i32),
}

/// Process CLI arguments and run headless commands
pub fn process_cli() -> CliResult {
    let cli = Cli::parse();

    let options = RuntimeOptions {
        session: cli.session.clone(),
        shader: cli.shader.clone(),
        mode: cli.mode.map(EditorMode::from),
        log_level: cli.log_level.map(LogLevel::from),
    };

    if cli.export.is_none() && !cli.check {
        return CliResult::Continue(options);
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("shaderdeck: failed to load config, using defaults: {e:#}");
            Config::default()
        }
    };
    crate::debug::init_log_bridge(options.log_level, config.log_level);

    match run_headless(&options, &config, cli.export.as_ref(), cli.check) {
        Ok(code) => CliResult::Exit(code),
        Err(e) => {
            eprintln!("shaderdeck: error: {e:#}");
            CliResult::Exit(1)
        }
    }
}

/// Build the document the editor would start with
pub fn initial_document(options: &RuntimeOptions, config: &Config) -> Result<(EditorDocument, shaderdeck_config::ShaderParams)> {
    if options.shader.is_some() && options.mode == Some(EditorMode::Pipeline) {
        anyhow::bail!("--shader edits a single-mode file and cannot start in pipeline mode");
    }

    let assembly = AssemblyOptions {
        block_markers: config.block_markers,
    };

    let (mut document, params) = if let Some(path) = &options.session {
        Session::load(path)
            .and_then(|session| session.into_document(assembly))
            .with_context(|| format!("Failed to open session {}", path.display()))?
    } else if let Some(path) = &options.shader {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read shader {}", path.display()))?;
        let mut document = EditorDocument::with_defaults(EditorMode::Single, assembly);
        document.set_single_source(source);
        (document, config.params)
    } else {
        (
            EditorDocument::with_defaults(config.default_mode, assembly),
            config.params,
        )
    };

    if let Some(mode) = options.mode {
        document.apply(EditorAction::SetMode(mode))?;
    }
    Ok((document, params))
}

fn run_headless(
    options: &RuntimeOptions,
    config: &Config,
    export: Option<&PathBuf>,
    check: bool,
) -> Result<i32> {
    let (document, _) = initial_document(options, config)?;

    if let Some(path) = export {
        std::fs::write(path, document.assembled())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Exported assembled shader to {}", path.display());
        println!("Wrote {}", path.display());
    }

    if check {
        match shaderdeck_render::translate_program(document.vertex_source(), document.assembled()) {
            Ok(_) => println!("Shader OK"),
            Err(e) => {
                eprintln!("{e}");
                return Ok(1);
            }
        }
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_shader_conflicts_with_session() {
        let result = Cli::try_parse_from(["shaderdeck", "--session", "a.yaml", "--shader", "b.glsl"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_mode_and_log_level_parse() {
        let cli = Cli::try_parse_from(["shaderdeck", "--mode", "single", "--log-level", "debug"])
            .unwrap();
        assert!(matches!(cli.mode, Some(CliMode::Single)));
        assert!(matches!(cli.log_level, Some(CliLogLevel::Debug)));
        assert!(!cli.check);
    }
}
