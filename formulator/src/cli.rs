//! Command-line handling for the `formulator` binary.
//!
//! ```text
//! formulator [--config FILE] [--host HOST] [--port PORT] [--check]
//! ```
//!
//! Settings come from the TOML file given with `--config` (with environment
//! overrides applied on top) or from the environment alone. `--host` and
//! `--port` replace the matching half of `bind_address`. `--check` runs the
//! configuration checks and exits without serving.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches};

use formulator_core::checks::{ensure_no_errors, run_checks, CheckLevel};
use formulator_core::logging::setup_logging;
use formulator_core::{settings_loader, FormulatorResult, Settings};
use formulator_views::FormulatorApp;

/// Port used when `bind_address` carries none.
const DEFAULT_PORT: &str = "8787";

/// Builds the clap command for the binary.
pub fn build_cli() -> clap::Command {
    clap::Command::new("formulator")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Accepts form submissions, validates them, and forwards them to chat webhooks")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("TOML settings file; environment variables override its values"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .help("Host to bind to (overrides bind_address)"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .value_parser(clap::value_parser!(u16))
                .help("Port to bind to (overrides bind_address)"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .action(ArgAction::SetTrue)
                .help("Run configuration checks and exit"),
        )
}

/// Parsed command-line options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// Path to a TOML settings file.
    pub config: Option<PathBuf>,
    /// Host override.
    pub host: Option<String>,
    /// Port override.
    pub port: Option<u16>,
    /// Only run the checks.
    pub check: bool,
}

impl CliOptions {
    /// Extracts options from clap matches produced by [`build_cli`].
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            config: matches.get_one::<PathBuf>("config").cloned(),
            host: matches.get_one::<String>("host").cloned(),
            port: matches.get_one::<u16>("port").copied(),
            check: matches.get_flag("check"),
        }
    }

    /// Parses options from an argument list, the first item being the binary name.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        build_cli()
            .try_get_matches_from(args)
            .map(|matches| Self::from_matches(&matches))
    }
}

/// Loads settings as directed by the options.
pub fn load_settings(options: &CliOptions) -> FormulatorResult<Settings> {
    let mut settings = match &options.config {
        Some(path) => settings_loader::from_toml_file_with_env(path)?,
        None => settings_loader::from_env()?,
    };
    settings.bind_address = bind_address(
        &settings.bind_address,
        options.host.as_deref(),
        options.port,
    );
    Ok(settings)
}

/// Replaces the host and/or port of a `host:port` address.
///
/// # Examples
///
/// ```
/// use formulator::cli::bind_address;
///
/// assert_eq!(bind_address("127.0.0.1:8787", Some("0.0.0.0"), None), "0.0.0.0:8787");
/// assert_eq!(bind_address("127.0.0.1:8787", None, Some(9000)), "127.0.0.1:9000");
/// ```
pub fn bind_address(current: &str, host: Option<&str>, port: Option<u16>) -> String {
    let (current_host, current_port) = current
        .rsplit_once(':')
        .unwrap_or((current, DEFAULT_PORT));

    let host = host.unwrap_or(current_host);
    match port {
        Some(port) => format!("{host}:{port}"),
        None => format!("{host}:{current_port}"),
    }
}

/// Runs the configuration checks, logging every message.
///
/// Fails if any message is error-level.
pub fn check_settings(settings: &Settings) -> FormulatorResult<()> {
    let messages = run_checks(settings);
    for message in &messages {
        match message.level {
            CheckLevel::Error => tracing::error!("{message}"),
            CheckLevel::Warning => tracing::warn!("{message}"),
        }
    }
    ensure_no_errors(&messages)
}

/// Loads settings, sets up logging, checks the configuration, and serves
/// until shutdown (or returns right after the checks with `--check`).
pub async fn run(options: CliOptions) -> FormulatorResult<()> {
    let settings = load_settings(&options)?;
    setup_logging(&settings);
    check_settings(&settings)?;

    if options.check {
        tracing::info!("configuration checks passed");
        return Ok(());
    }

    let addr = settings.bind_address.clone();
    FormulatorApp::new(settings).run(&addr).await
}
