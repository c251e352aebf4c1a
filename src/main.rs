// actchat - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Option resolution and the batch run
// 5. Result rendering and exit code

use actchat::app::{self, options::Overrides};
use actchat::platform::config::{self, AppConfig, PlatformPaths};
use actchat::util::{self, constants, error::ChatLogError};
use clap::Parser;
use std::path::PathBuf;

/// actchat - Extract chat transcripts from ACT network logs.
///
/// Each input log produces a transcript next to it (or in --output-dir)
/// containing only the spoken lines, and optionally emotes, of the
/// selected group.
#[derive(Parser, Debug)]
#[command(name = "actchat", version, about)]
struct Cli {
    /// ACT network log files, processed in the order given.
    #[arg(required_unless_present = "list_groups")]
    files: Vec<PathBuf>,

    /// Group of speakers to keep (a [groups.<key>] table, or "everyone").
    #[arg(short = 'g', long = "group")]
    group: Option<String>,

    /// Include emote lines.
    #[arg(short = 'e', long = "emotes", conflicts_with = "no_emotes")]
    emotes: bool,

    /// Exclude emote lines even if config.toml includes them.
    #[arg(long = "no-emotes")]
    no_emotes: bool,

    /// Process and report without writing any file.
    #[arg(short = 'n', long = "dry-run")]
    dry_run: bool,

    /// Overwrite existing transcripts.
    #[arg(short = 'f', long = "force")]
    force: bool,

    /// Directory for transcripts (default: next to each input).
    #[arg(short = 'o', long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Transcript file extension.
    #[arg(long = "extension")]
    extension: Option<String>,

    /// Configuration file (default: platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print results as JSON, one object per line.
    #[arg(long = "json")]
    json: bool,

    /// List configured groups and exit.
    #[arg(long = "list-groups")]
    list_groups: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

impl Cli {
    fn include_emotes(&self) -> Option<bool> {
        if self.emotes {
            Some(true)
        } else if self.no_emotes {
            Some(false)
        } else {
            None
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Run aborted");
            eprintln!("Error: {e}");
            constants::EXIT_FAILURE
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32, ChatLogError> {
    let platform_paths = cli.config.is_none().then(PlatformPaths::resolve);
    let config_path = match (&cli.config, &platform_paths) {
        (Some(path), _) => path.clone(),
        (None, Some(paths)) => paths.config_file(),
        (None, None) => PathBuf::from(constants::CONFIG_FILE_NAME),
    };

    // Config comes first because it names the log level and log file; if it
    // fails, logging still starts with defaults so the error is recorded.
    let (app_config, warnings) = match config::load_config(&config_path, cli.config.is_some()) {
        Ok(loaded) => loaded,
        Err(e) => {
            if let Err(log_err) = util::logging::init(cli.debug, None, None) {
                eprintln!("Warning: logging unavailable: {log_err}");
            }
            log_platform_fallback(platform_paths.as_ref());
            return Err(e.into());
        }
    };

    util::logging::init(
        cli.debug,
        app_config.log_level.as_deref(),
        app_config.log_file.as_deref(),
    )?;
    log_platform_fallback(platform_paths.as_ref());

    tracing::info!(
        version = constants::APP_VERSION,
        config = %config_path.display(),
        "actchat starting"
    );
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    if cli.list_groups {
        print_groups(&app_config);
        return Ok(constants::EXIT_OK);
    }

    let overrides = Overrides {
        group: cli.group.clone(),
        include_emotes: cli.include_emotes(),
        dry_run: cli.dry_run,
        force_replace: cli.force,
        output_dir: cli.output_dir.clone(),
        extension: cli.extension.clone(),
        files: cli.files.clone(),
    };
    let options = app::options::resolve(&app_config, overrides)?;

    let report = app::batch::run_batch(&options);

    for result in &report.results {
        if cli.json {
            match app::report::render_json(result) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::error!(error = %e, "Failed to serialise result"),
            }
        } else {
            println!("{}", app::report::render_text(result));
        }
    }
    if !cli.json {
        println!("{}", app::report::render_summary(&report));
    }

    Ok(report.exit_code())
}

fn log_platform_fallback(paths: Option<&PlatformPaths>) {
    match paths {
        Some(paths) if paths.is_fallback => {
            tracing::warn!("Could not determine platform directories, using current directory")
        }
        Some(paths) => {
            tracing::debug!(config_dir = %paths.config_dir.display(), "Platform paths resolved")
        }
        None => {}
    }
}

fn print_groups(config: &AppConfig) {
    for (key, group) in app::options::available_groups(config) {
        match group.member_count() {
            None => println!("{key:<16} {} (all speakers)", group.label),
            Some(n) => println!("{key:<16} {} ({n} members)", group.label),
        }
    }
}
