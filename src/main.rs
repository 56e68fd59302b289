// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use readflow::app_config::{self, Config};
use readflow::app_controller::Controller;
use readflow::synthesis::google::GoogleTts;

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

fn level_filter_for(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read a document word by word at the configured pace (default command)
    Read(ReadArgs),

    /// Show what the engine extracts from a document without reading it
    Info(InfoArgs),

    /// Generate shell completions for readflow
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ReadArgs {
    /// Input text file to read
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Words per minute for the word display loop
    #[arg(short, long)]
    wpm: Option<f64>,

    /// Prefetch speech synthesis before reading (requires an API key)
    #[arg(long)]
    synthesize: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input text file to inspect
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// readflow - read documents aloud or word by word
///
/// Cleans extracted document text (headers, footers, page numbers, footnotes),
/// estimates speaking time per sentence, and displays the text word by word
/// at a configurable pace, optionally synchronized with synthesized speech.
#[derive(Parser, Debug)]
#[command(name = "readflow")]
#[command(version = "0.1.0")]
#[command(about = "Content normalization and paced reading for documents")]
#[command(long_about = "readflow ingests a text export of a document, strips non-content noise,
and reads it back word by word at a configurable words-per-minute pace.

EXAMPLES:
    readflow book.txt                    # Read using default config
    readflow --wpm 400 book.txt          # Read at 400 words per minute
    readflow info book.txt               # Show extraction and duration stats
    readflow --synthesize book.txt       # Prefetch speech before reading
    readflow completions bash            # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different file with --config-path. If the config file doesn't exist,
    a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input text file to read
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Words per minute for the word display loop
    #[arg(short, long)]
    wpm: Option<f64>,

    /// Prefetch speech synthesis before reading (requires an API key)
    #[arg(long)]
    synthesize: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
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

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }

    // @returns: Emoji for log level
    fn emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
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
            let emoji = Self::emoji_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "readflow", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Info(args)) => run_info(args).await,
        Some(Commands::Read(args)) => run_read(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;
            run_read(ReadArgs {
                input_path,
                wpm: cli.wpm,
                synthesize: cli.synthesize,
                config_path: cli.config_path,
                log_level: cli.log_level,
            })
            .await
        }
    }
}

/// Load the config file, creating a default one when it does not exist, and
/// apply the CLI log level
fn load_config(config_path: &str, log_level: &Option<CliLogLevel>) -> Result<Config> {
    if let Some(cmd_log_level) = log_level {
        log::set_max_level(level_filter_for(&cmd_log_level.clone().into()));
    }

    let path = std::path::Path::new(config_path);
    let mut config = if path.exists() {
        Config::from_file(path)?
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );
        let config = Config::default();
        config
            .write_to_file(path)
            .context(format!("Failed to write default config to: {}", config_path))?;
        config
    };

    if let Some(cmd_log_level) = log_level {
        config.log_level = cmd_log_level.clone().into();
    } else {
        log::set_max_level(level_filter_for(&config.log_level));
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

async fn run_read(options: ReadArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, &options.log_level)?;
    if let Some(wpm) = options.wpm {
        if wpm <= 0.0 || wpm > config.playback.wpm_max {
            return Err(anyhow!(
                "wpm must be within (0, {}], got {}",
                config.playback.wpm_max,
                wpm
            ));
        }
        config.playback.rsvp_wpm = wpm;
    }
    let synthesize = options.synthesize && !config.synthesis.api_key.is_empty();
    if options.synthesize && !synthesize {
        warn!("--synthesize requested but no API key is configured, skipping");
    }

    let mut controller = Controller::with_config(config.clone())?;
    if synthesize {
        controller = controller.with_provider(Arc::new(GoogleTts::from_config(&config.synthesis)));
    }

    let document = controller.ingest_file(&options.input_path)?;
    let state = controller.open(&document);
    info!(
        "Reading '{}': {} words, {} sentences, ~{:.0}s estimated",
        document.title,
        document.word_count(),
        document.sentence_count(),
        state.total_secs
    );

    if synthesize {
        controller.prefetch_synthesis(&document).await?;
    }

    controller.playback().play()?;
    let mut scheduler = controller.scheduler_for(&document, Instant::now());
    let mut stdout = std::io::stdout();
    scheduler
        .run(|_, token| {
            let _ = write!(stdout, "\r\x1B[2K{}", token.display_text());
            let _ = stdout.flush();
        })
        .await;
    let _ = writeln!(stdout);

    info!("Finished reading '{}'", document.title);
    Ok(())
}


async fn run_info(options: InfoArgs) -> Result<()> {
    let config = load_config(&options.config_path, &options.log_level)?;
    let controller = Controller::with_config(config)?;

    let document = controller.ingest_file(&options.input_path)?;
    let state = controller.open(&document);

    println!("Title:       {}", document.title);
    println!("Document id: {}", document.id);
    println!("Words:       {}", document.word_count());
    println!("Sentences:   {}", document.sentence_count());
    println!("Estimated:   {:.1}s at speed {:.1}", state.total_secs, state.speed);
    Ok(())
}
