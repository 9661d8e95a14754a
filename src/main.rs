#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use pdftrans::app_config::{self, Config, TargetLanguage};
use pdftrans::pipeline::RunState;
use pdftrans::Controller;

/// CLI wrapper for TargetLanguage to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliTargetLanguage {
    Spanish,
    English,
}

impl From<CliTargetLanguage> for TargetLanguage {
    fn from(cli_target: CliTargetLanguage) -> Self {
        match cli_target {
            CliTargetLanguage::Spanish => TargetLanguage::Spanish,
            CliTargetLanguage::English => TargetLanguage::English,
        }
    }
}

/// CLI wrapper for LogLevel to implement ValueEnum
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
    /// Translate every PDF under a directory (default command)
    Translate(TranslateArgs),

    /// Generate shell completions for pdftrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Directory scanned recursively for PDF files
    #[arg(value_name = "ROOT")]
    root: PathBuf,

    /// Language to translate into
    #[arg(short, long, value_enum)]
    target_language: Option<CliTargetLanguage>,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Pages between two checkpoints
    #[arg(short = 'k', long)]
    checkpoint_interval: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// pdftrans - batch PDF translation
#[derive(Parser, Debug)]
#[command(name = "pdftrans")]
#[command(version)]
#[command(about = "Translate every PDF in a directory tree with an offline engine")]
#[command(long_about = "pdftrans extracts the text of every PDF under a directory in reading order,
translates it block by block and writes <name>_<Language>.txt next to each PDF.

EXAMPLES:
    pdftrans ~/papers                          # Translate into Spanish (default)
    pdftrans -t english ~/documentos           # Translate into English
    pdftrans -s fr -t english ~/docs           # Translate from French
    pdftrans -k 10 ~/papers                    # Checkpoint every 10 pages
    pdftrans completions bash > pdftrans.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory scanned recursively for PDF files
    #[arg(value_name = "ROOT")]
    root: Option<PathBuf>,

    /// Language to translate into
    #[arg(short, long, value_enum)]
    target_language: Option<CliTargetLanguage>,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Pages between two checkpoints
    #[arg(short = 'k', long)]
    checkpoint_interval: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Stderr logger with timestamps and colors
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for a level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => ("  ", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::decoration(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "pdftrans", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            let root = cli
                .root
                .ok_or_else(|| anyhow!("ROOT is required when no subcommand is specified"))?;

            run_translate(TranslateArgs {
                root,
                target_language: cli.target_language,
                source_language: cli.source_language,
                checkpoint_interval: cli.checkpoint_interval,
                config_path: cli.config_path,
                log_level: cli.log_level,
            })
            .await
        }
    }
}

/// Load the config file, creating a default one when it is missing
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .with_context(|| format!("Failed to open config file: {}", config_path))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file: {}", config_path))
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", config_path))?;
        Ok(config)
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if let Some(level) = &options.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = load_or_create_config(&options.config_path)?;

    if let Some(target) = options.target_language {
        config.target_language = TargetLanguage::from(target).code().to_string();
    }
    if let Some(source) = &options.source_language {
        config.source_language = source.clone();
    }
    if let Some(interval) = options.checkpoint_interval {
        config.checkpoint_interval = interval;
    }
    if let Some(level) = &options.log_level {
        config.log_level = level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    info!(
        "Translating PDFs in {:?} from {} to {}",
        options.root,
        config.source_language,
        config.target_label()?
    );

    let controller = Controller::with_config(config)?;
    let report = controller.run(options.root).await?;

    match report.state {
        RunState::Failed => Err(report
            .failure
            .map(anyhow::Error::from)
            .unwrap_or_else(|| anyhow!("Run failed"))),
        _ => Ok(()),
    }
}
