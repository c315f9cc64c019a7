//! Top-level CLI definition and dispatch.

use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::{Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use oncall_dashboard::core::config::Config;
use oncall_dashboard::core::errors::OncallError;
use oncall_dashboard::tui::theme::{AccessibilityProfile, Theme};
use oncall_dashboard::tui::{DashboardRuntimeConfig, run_dashboard};

/// Environment variable holding an `EnvFilter` directive for the log file.
const LOG_ENV: &str = "ONCALL_LOG";

/// On-call dashboard: live pods, recent issues and service health.
#[derive(Debug, Parser)]
#[command(name = "oncall", author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this TOML file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Write logs here instead of `<tmp>/oncall.log`.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
    /// Restrict every orchestrator call to this namespace.
    #[arg(long, value_name = "NS")]
    namespace: Option<String>,
    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

/// Startup failure surfaced by the binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration, terminal or runtime failure.
    #[error(transparent)]
    Oncall(#[from] OncallError),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Resolve configuration, set up logging and run the dashboard.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    let config = effective_config(cli)?;

    if cli.print_config {
        let mut out = io::stdout().lock();
        write!(out, "{}", config.to_toml()?)?;
        out.flush()?;
        return Ok(());
    }

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| env::temp_dir().join("oncall.log"));
    let _guard = init_logging(&log_path, cli.verbose)?;
    info!(
        log_file = %log_path.display(),
        namespace = config.kube.namespace.as_deref().unwrap_or("<current>"),
        "starting oncall"
    );

    let theme = Theme::new(AccessibilityProfile::from_environment(cli.no_color));
    run_dashboard(&DashboardRuntimeConfig::new(config, theme)).map_err(|e| {
        error!(
            code = e.code(),
            retryable = e.is_retryable(),
            error = %e,
            "dashboard stopped with an error"
        );
        CliError::from(e)
    })
}

/// Defaults, then the `--config` file and `ONCALL_*` variables, then flags.
fn effective_config(cli: &Cli) -> Result<Config, OncallError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(namespace) = &cli.namespace {
        config.kube.namespace = if namespace.trim().is_empty() {
            None
        } else {
            Some(namespace.clone())
        };
    }
    Ok(config)
}

/// `-v` forces debug; otherwise `ONCALL_LOG`, falling back to info.
fn log_filter(verbose: bool, directive: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install a non-blocking file subscriber. The terminal belongs to the
/// dashboard, so nothing is written to stdout or stderr.
fn init_logging(path: &Path, verbose: bool) -> Result<WorkerGuard, OncallError> {
    let file = File::create(path).map_err(|source| OncallError::io(path, source))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let directive = env::var(LOG_ENV).ok();
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_line_number(true)
        .with_writer(writer)
        .with_filter(log_filter(verbose, directive.as_deref()));

    tracing_subscriber::registry().with(file_layer).try_init().ok();
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_every_flag() {
        let cli = Cli::try_parse_from([
            "oncall",
            "--config",
            "/etc/oncall.toml",
            "--log-file",
            "/tmp/x.log",
            "-v",
            "--no-color",
            "--namespace",
            "payments",
            "--print-config",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/oncall.toml")));
        assert_eq!(cli.log_file.as_deref(), Some(Path::new("/tmp/x.log")));
        assert!(cli.verbose && cli.no_color && cli.print_config);
        assert_eq!(cli.namespace.as_deref(), Some("payments"));
    }

    #[test]
    fn namespace_flag_overrides_config() {
        let cli = Cli::try_parse_from(["oncall", "--namespace", "edge"]).unwrap();
        let config = effective_config(&cli).unwrap();
        assert_eq!(config.kube.namespace.as_deref(), Some("edge"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli =
            Cli::try_parse_from(["oncall", "--config", "/nonexistent/oncall.toml"]).unwrap();
        let err = effective_config(&cli).unwrap_err();
        assert!(matches!(err, OncallError::MissingConfig { .. }));
    }

    #[test]
    fn verbose_wins_over_env_directive() {
        let expect = |d: &str| EnvFilter::new(d).to_string();
        assert_eq!(log_filter(true, Some("warn")).to_string(), expect("debug"));
        assert_eq!(log_filter(false, Some("warn")).to_string(), expect("warn"));
        assert_eq!(log_filter(false, None).to_string(), expect("info"));
    }
}
