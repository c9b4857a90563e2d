// crates/quality-gate-cli/src/main.rs
// ============================================================================
// Module: Quality Gate CLI Entry Point
// Description: Command dispatcher for report evaluation and config tooling.
// Purpose: Provide a safe, localized CLI around the quality-gate engine.
// Dependencies: clap, quality-gate-config, quality-gate-core, serde, thiserror, tracing-subscriber.
// ============================================================================

//! ## Overview
//! The quality-gate CLI reads one run's input bundle (thresholds, baseline
//! rows, current rows, earlier builds) and a TOML config, assembles the
//! report, and prints it as JSON or text. Inputs are untrusted: files are
//! read with hard size limits and validated before the engine sees them.
//!
//! Exit codes: `0` when the gate passes, `2` when it fails, `1` on error.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use quality_gate_cli::i18n::Locale;
use quality_gate_cli::i18n::set_locale;
use quality_gate_cli::render::report_lines;
use quality_gate_cli::render::warning_lines;
use quality_gate_cli::t;
use quality_gate_config::QualityGateFile;
use quality_gate_config::config_toml_example;
use quality_gate_core::QualityGateReport;
use quality_gate_core::ReportInputs;
use quality_gate_core::assemble_report;
use quality_gate_core::resolve_warnings;
use quality_gate_core::runtime::WarningInputs;
use quality_gate_core::runtime::normalize_inputs;
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Limits and Defaults
// ============================================================================

/// Maximum size of a run input bundle.
const MAX_INPUT_BYTES: usize = 8 * 1024 * 1024;
/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "QUALITY_GATE_LANG";
/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "QUALITY_GATE_LOG";
/// Log filter used when [`LOG_ENV`] is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "warn";
/// Exit code reported when the gate fails.
const GATE_FAILED_EXIT: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "quality-gate", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `QUALITY_GATE_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble the full report for one run and apply the gate.
    Evaluate(EvaluateCommand),
    /// Print the ordered SLA and baseline warnings for one run.
    Warnings(WarningsCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments shared by commands that read a run.
#[derive(Args, Debug)]
struct RunArgs {
    /// Path to the run input bundle (JSON).
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
    /// Optional config file path (defaults to quality-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for `evaluate`.
#[derive(Args, Debug)]
struct EvaluateCommand {
    /// Run and config selection.
    #[command(flatten)]
    run: RunArgs,
}

/// Arguments for `warnings`.
#[derive(Args, Debug)]
struct WarningsCommand {
    /// Run and config selection.
    #[command(flatten)]
    run: RunArgs,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a quality-gate config file.
    Validate(ConfigValidateCommand),
    /// Print an example config file.
    Example,
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to quality-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Output formats for report commands.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Localized plain text.
    Text,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    init_logging()?;

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Evaluate(command) => command_evaluate(&command),
        Commands::Warnings(command) => command_warnings(&command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Installs the stderr log subscriber.
fn init_logging() -> CliResult<()> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| CliError::new(t!("logging.init_failed", error = err)))
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Report Commands
// ============================================================================

/// Loaded config and run inputs for a report command.
struct LoadedRun {
    /// Parsed config file.
    config: QualityGateFile,
    /// Validated run inputs.
    inputs: ReportInputs,
}

impl LoadedRun {
    /// Loads the config and the input bundle named by `args`.
    fn load(args: &RunArgs) -> CliResult<Self> {
        let config = QualityGateFile::load(args.config.as_deref())
            .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
        let mut inputs = read_run_inputs(&args.input)?;
        if inputs.comparison_metric.is_none() {
            inputs.comparison_metric = config.comparison_metric;
        }
        tracing::debug!(
            thresholds = inputs.thresholds.len(),
            current = inputs.current.len(),
            baseline = inputs.baseline.len(),
            builds = inputs.builds.len(),
            "loaded run inputs"
        );
        Ok(Self {
            config,
            inputs,
        })
    }

    /// Assembles the full report.
    fn report(&self) -> QualityGateReport {
        assemble_report(
            &self.config.quality_gate,
            &self.config.limits,
            &self.config.report_options(),
            &self.inputs,
        )
    }
}

/// Executes the `evaluate` command.
fn command_evaluate(command: &EvaluateCommand) -> CliResult<ExitCode> {
    let run = LoadedRun::load(&command.run)?;
    let report = run.report();
    match command.run.format {
        OutputFormat::Json => write_json(&report, &t!("report.kind"))?,
        OutputFormat::Text => write_lines(&report_lines(&report))?,
    }
    if report.gate.verdict.is_fail() {
        return Ok(ExitCode::from(GATE_FAILED_EXIT));
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `warnings` command.
fn command_warnings(command: &WarningsCommand) -> CliResult<ExitCode> {
    let run = LoadedRun::load(&command.run)?;
    let config = normalize_inputs(&run.config.quality_gate, &run.inputs);
    let warnings = resolve_warnings(&WarningInputs::new(
        &config,
        &run.inputs.thresholds,
        &run.inputs.current,
    ));
    match command.run.format {
        OutputFormat::Json => write_json(&warnings, &t!("warnings.kind"))?,
        OutputFormat::Text => write_lines(&warning_lines(&warnings))?,
    }
    Ok(ExitCode::SUCCESS)
}

/// Reads and validates the run input bundle.
fn read_run_inputs(path: &Path) -> CliResult<ReportInputs> {
    let kind = t!("input.kind.run");
    let bytes = read_bytes_with_limit(path, MAX_INPUT_BYTES).map_err(|err| match err {
        ReadLimitError::Io(err) => CliError::new(t!(
            "input.read_failed",
            kind = kind,
            path = path.display(),
            error = err
        )),
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = path.display(),
            size = size,
            limit = limit
        )),
    })?;
    ReportInputs::from_json(&bytes).map_err(|err| {
        CliError::new(t!("input.parse_failed", kind = kind, path = path.display(), error = err))
    })
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
        ConfigCommand::Example => command_config_example(),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = QualityGateFile::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Prints the example config.
fn command_config_example() -> CliResult<ExitCode> {
    write_stdout_bytes(config_toml_example().as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let size = file.metadata().map_err(ReadLimitError::Io)?.len();
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX);
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut bytes = Vec::new();
    file.take(limit.saturating_add(1)).read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        return Err(ReadLimitError::TooLarge {
            size: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes every line to stdout.
fn write_lines(lines: &[String]) -> CliResult<()> {
    let mut buffer = lines.join("\n");
    buffer.push('\n');
    write_stdout_bytes(buffer.as_bytes()).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a value as pretty JSON to stdout.
fn write_json<T: Serialize>(value: &T, kind: &str) -> CliResult<()> {
    let mut output = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(t!("output.json_failed", kind = kind, error = err)))?;
    output.push('\n');
    write_stdout_bytes(output.as_bytes()).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
