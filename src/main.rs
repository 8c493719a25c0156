// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use log::{error, warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use dualsub::app_config::{self, Config};
use dualsub::app_controller::{Controller, MergeOutcome};
use dualsub::file_utils::{FileManager, FileType};
use dualsub::language_utils;
use dualsub::subtitle::LineEnding;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge two subtitle files into one bilingual file (default command)
    Merge(MergeArgs),

    /// Merge every language pair found in a directory
    Batch(BatchArgs),

    /// Report timecode problems in a subtitle file
    Check {
        /// Subtitle file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate shell completions for dualsub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct MergeArgs {
    /// Subtitle file shown on top
    #[arg(value_name = "UPPER")]
    upper: PathBuf,

    /// Subtitle file shown below
    #[arg(value_name = "LOWER")]
    lower: PathBuf,

    /// Output file (defaults to <name>.<upper>-<lower>.srt next to UPPER)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Write CRLF line endings
    #[arg(long)]
    crlf: bool,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory to scan (recursive)
    #[arg(value_name = "DIR")]
    input_dir: PathBuf,

    /// Language code of the upper track (e.g., 'en')
    #[arg(short, long)]
    upper_language: Option<String>,

    /// Language code of the lower track (e.g., 'fr')
    #[arg(short, long)]
    lower_language: Option<String>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,
}

/// DualSub - merge two subtitle tracks into one bilingual track
#[derive(Parser, Debug)]
#[command(name = "dualsub")]
#[command(version)]
#[command(about = "Bilingual SubRip subtitle merger")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "DualSub merges two SubRip files of the same video so that both languages are shown at once.

EXAMPLES:
    dualsub movie.en.srt movie.fr.srt               # Writes movie.en-fr.srt
    dualsub merge a.srt b.srt -o out.srt --crlf     # Explicit output, CRLF endings
    dualsub batch /movies -u en -l de               # Merge every en/de pair below /movies
    dualsub check movie.en.srt                      # Timecode diagnostics
    dualsub completions bash > dualsub.bash         # Generate bash completions

CONFIGURATION:
    Settings are read from dualsub.json by default. Use --config to pick another
    file. A missing file means built-in defaults; the file is never written.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitle file shown on top
    #[arg(value_name = "UPPER")]
    upper: Option<PathBuf>,

    /// Subtitle file shown below
    #[arg(value_name = "LOWER")]
    lower: Option<PathBuf>,

    /// Output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Write CRLF line endings
    #[arg(long)]
    crlf: bool,

    /// Configuration file path
    #[arg(short = 'c', long = "config", global = true, default_value = "dualsub.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color, now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is set once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    let config_path = cli.config_path.clone();
    let log_level = cli.log_level.clone();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "dualsub", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Merge(args)) => {
            let config = load_config(&config_path, log_level)?;
            run_merge(config, args)
        }
        Some(Commands::Batch(args)) => {
            let config = load_config(&config_path, log_level)?;
            run_batch(config, args).await
        }
        Some(Commands::Check { file }) => {
            let config = load_config(&config_path, log_level)?;
            run_check(config, &file)
        }
        None => {
            // Default behavior: top-level args mean `merge`
            let (upper, lower) = match (cli.upper, cli.lower) {
                (Some(upper), Some(lower)) => (upper, lower),
                _ => return Err(anyhow!("UPPER and LOWER are required when no subcommand is specified")),
            };

            let args = MergeArgs {
                upper,
                lower,
                output: cli.output,
                force_overwrite: cli.force_overwrite,
                crlf: cli.crlf,
            };
            let config = load_config(&config_path, log_level)?;
            run_merge(config, args)
        }
    }
}

/// Load the config file and apply the log level, CLI taking precedence
fn load_config(config_path: &Path, log_level: Option<CliLogLevel>) -> Result<Config> {
    if let Some(cmd_log_level) = &log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_default(config_path)?;

    match log_level {
        Some(level) => config.log_level = level.into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    Ok(config)
}

fn run_merge(mut config: Config, args: MergeArgs) -> Result<()> {
    if args.crlf {
        config.output.line_ending = LineEnding::CrLf;
    }

    for path in [&args.upper, &args.lower] {
        if !FileManager::file_exists(path) {
            return Err(anyhow!("Input file does not exist: {:?}", path));
        }
        if FileManager::detect_file_type(path)? != FileType::Subtitle {
            warn!("{:?} does not look like a SubRip file, parsing anyway", path);
        }
    }

    let output = match args.output {
        Some(output) => output,
        None => {
            let upper_language = language_utils::language_from_filename(&args.upper)
                .unwrap_or_else(|| config.upper_language.clone());
            let lower_language = language_utils::language_from_filename(&args.lower)
                .unwrap_or_else(|| config.lower_language.clone());
            FileManager::generate_output_path(&args.upper, &upper_language, &lower_language)
        }
    };

    let controller = Controller::with_config(config)?;

    match controller.merge_files(&args.upper, &args.lower, &output, args.force_overwrite)? {
        MergeOutcome::Merged(summary) => {
            info!("Success: {:?}", summary.output_path);
            if summary.upper_rejected + summary.lower_rejected > 0 {
                warn!(
                    "{} upper and {} lower entries had unusable timings and were left out",
                    summary.upper_rejected, summary.lower_rejected
                );
            }
        }
        MergeOutcome::Skipped(path) => {
            warn!("Output file already exists: {:?}. Use -f to force overwrite.", path);
        }
    }

    Ok(())
}

async fn run_batch(mut config: Config, args: BatchArgs) -> Result<()> {
    if let Some(upper_language) = args.upper_language {
        config.upper_language = upper_language;
    }
    if let Some(lower_language) = args.lower_language {
        config.lower_language = lower_language;
    }

    let controller = Controller::with_config(config)?;
    let summary = controller.run_folder(args.input_dir, args.force_overwrite).await?;

    if summary.failed > 0 {
        return Err(anyhow!("{} subtitle pair(s) failed to merge", summary.failed));
    }

    Ok(())
}

fn run_check(config: Config, file: &Path) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let report = controller.check_file(file)?;

    for result in report.entries_with_issues() {
        for issue in &result.issues {
            if issue.is_blocking() {
                error!("Entry {} (#{}): {}", result.number, result.position, issue);
            } else {
                warn!("Entry {} (#{}): {}", result.number, result.position, issue);
            }
        }
    }

    info!(
        "{} entries checked, {} issues, {} overlaps",
        report.entry_results.len(),
        report.total_issues,
        report.overlap_count
    );

    if report.passed {
        Ok(())
    } else {
        Err(anyhow!("{:?} has entries the merge would ignore", file))
    }
}
