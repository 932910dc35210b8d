// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};

use sentex::aggregator::SentenceAggregator;
use sentex::app_config::{Config, LogLevel};
use sentex::database::{DatabaseConnection, SentenceRepository};
use sentex::providers::SentenceProvider;
use sentex::registry::ProviderRegistry;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up example sentences for a word
    Lookup(LookupArgs),

    /// Fetch and cache sentences for every word in a word list
    Fill(FillArgs),

    /// Force a network refresh of the cached sentences for a word
    Sync(SyncArgs),

    /// Delete cached sentences
    Delete(DeleteArgs),

    /// List languages served by at least one provider
    Languages,

    /// List providers, optionally narrowed to one language
    Providers {
        /// Only show providers capable of this language
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Generate shell completions for sentex
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct LookupArgs {
    /// Word to look up
    word: String,

    /// Language code (e.g., 'en', 'eng', 'ja')
    #[arg(short, long)]
    language: Option<String>,

    /// Restrict the lookup to these providers (repeatable)
    #[arg(short, long)]
    provider: Vec<String>,

    /// Maximum number of sentences to return
    #[arg(short = 'n', long, default_value_t = 1)]
    limit: usize,

    /// Also print the source link of each sentence
    #[arg(long)]
    sources: bool,
}

#[derive(Parser, Debug)]
struct FillArgs {
    /// File with one word per line
    words_file: PathBuf,

    /// Language code (e.g., 'en', 'eng', 'ja')
    #[arg(short, long)]
    language: Option<String>,

    /// Restrict the fill to these providers (repeatable)
    #[arg(short, long)]
    provider: Vec<String>,

    /// Number of sentences to fetch per word
    #[arg(short = 'n', long, default_value_t = 20)]
    limit: usize,
}

#[derive(Parser, Debug)]
struct SyncArgs {
    /// Word to resync
    word: String,

    /// Language code (e.g., 'en', 'eng', 'ja')
    #[arg(short, long)]
    language: Option<String>,

    /// Only resync through this provider
    #[arg(short, long)]
    provider: Option<String>,
}

#[derive(Parser, Debug)]
struct DeleteArgs {
    /// Only delete this exact sentence text
    #[arg(long)]
    text: Option<String>,

    /// Filter by word
    #[arg(short, long)]
    word: Option<String>,

    /// Filter by language code
    #[arg(short, long)]
    language: Option<String>,

    /// Filter by provider
    #[arg(short, long)]
    provider: Option<String>,

    /// Allow deleting with no filters (empties the whole cache)
    #[arg(long)]
    all: bool,
}

/// sentex - example sentence aggregator
///
/// Fetches example sentences containing a target word from multiple
/// dictionary/corpus sources and caches them locally.
#[derive(Parser, Debug)]
#[command(name = "sentex")]
#[command(version = "1.0.0")]
#[command(about = "Example sentence aggregation tool")]
#[command(long_about = "sentex fetches example sentences containing a target word from multiple \
dictionary/corpus providers, caches them locally, and serves cached results first on later lookups.

EXAMPLES:
    sentex lookup world                        # One sentence for 'world' (default language)
    sentex lookup -l ja -n 5 世界              # Five Japanese sentences
    sentex lookup -p jisho -p massif 世界      # Restrict to specific providers
    sentex fill words.txt -l en -n 20          # Cache sentences for a word list
    sentex sync world -l en                    # Force a network refresh for 'world'
    sentex delete -w world -l eng              # Drop cached sentences for 'world'
    sentex languages                           # Languages served by the providers
    sentex completions bash > sentex.bash      # Generate bash completions")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (defaults to the user config directory)
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Minimal colored stderr logger
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

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
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{:5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Everything a subcommand needs: config plus the wired-up engine
struct App {
    aggregator: SentenceAggregator,
    repository: SentenceRepository,
}

impl App {
    fn build(config: &Config) -> Result<Self> {
        let connection = match &config.database_path {
            Some(path) => DatabaseConnection::new(path)?,
            None => DatabaseConnection::new_default()?,
        };
        let repository = SentenceRepository::new(connection);
        let registry = Arc::new(ProviderRegistry::with_default_providers(&repository, config));
        let aggregator =
            SentenceAggregator::new(registry).with_default_language(&config.default_language);
        Ok(Self {
            aggregator,
            repository,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "sentex", &mut std::io::stdout());
        return Ok(());
    }

    let config = match &cli.config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::load_or_default()?,
    };

    let log_level = cli
        .log_level
        .map(LogLevel::from)
        .unwrap_or_else(|| config.log_level.clone());
    log::set_max_level(log_level.to_level_filter());

    let app = App::build(&config)?;

    match cli.command {
        Commands::Lookup(args) => run_lookup(&app, args).await,
        Commands::Fill(args) => run_fill(&app, args).await,
        Commands::Sync(args) => run_sync(&app, args).await,
        Commands::Delete(args) => run_delete(&app, args).await,
        Commands::Languages => run_languages(&app),
        Commands::Providers { language } => run_providers(&app, language),
        Commands::Completions { .. } => unreachable!("handled above"),
    }
}

async fn run_lookup(app: &App, args: LookupArgs) -> Result<()> {
    let providers = (!args.provider.is_empty()).then_some(args.provider.as_slice());

    match app
        .aggregator
        .get_sentences(
            &args.word,
            args.language.as_deref(),
            providers,
            Some(args.limit),
        )
        .await
    {
        Ok(sentences) if sentences.is_empty() => {
            println!("No sentences found for \"{}\"", args.word);
        }
        Ok(sentences) => {
            for sentence in &sentences {
                println!("{}", sentence.text);
                if args.sources {
                    if let Some(source) = app.aggregator.sentence_source(sentence) {
                        println!("    [{}] {}", sentence.provider, source);
                    }
                }
            }
        }
        // The interactive path surfaces the error in place of a sentence
        Err(e) => println!("\x1B[1;31msentex error: {}\x1B[0m", e),
    }

    Ok(())
}

async fn run_fill(app: &App, args: FillArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.words_file)
        .with_context(|| format!("Failed to read word list: {:?}", args.words_file))?;
    let words: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .collect();

    let providers = (!args.provider.is_empty()).then_some(args.provider.as_slice());

    let progress = ProgressBar::new(words.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    // Per-word failures are tolerated; only the aggregate count is reported
    let mut updated = 0usize;
    for word in &words {
        progress.set_message(word.to_string());
        match app
            .aggregator
            .get_sentences(word, args.language.as_deref(), providers, Some(args.limit))
            .await
        {
            Ok(sentences) if !sentences.is_empty() => updated += 1,
            Ok(_) => {}
            Err(e) => warn!("Skipping \"{}\": {}", word, e),
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    println!("Updated {} of {} words", updated, words.len());
    Ok(())
}

async fn run_sync(app: &App, args: SyncArgs) -> Result<()> {
    app.aggregator
        .sync_sentences(&args.word, args.language.as_deref(), args.provider.as_deref())
        .await;
    println!("Resynced \"{}\"", args.word);
    Ok(())
}

async fn run_delete(app: &App, args: DeleteArgs) -> Result<()> {
    let has_filter = args.text.is_some()
        || args.word.is_some()
        || args.language.is_some()
        || args.provider.is_some();
    if !has_filter && !args.all {
        return Err(anyhow!(
            "Refusing to delete the entire cache; pass --all to confirm"
        ));
    }

    let deleted = match &args.text {
        Some(text) => {
            app.repository
                .delete_sentence(
                    text,
                    args.word.as_deref(),
                    args.language.as_deref(),
                    args.provider.as_deref(),
                )
                .await?
        }
        None => {
            app.repository
                .delete_sentences(
                    args.word.as_deref(),
                    args.language.as_deref(),
                    args.provider.as_deref(),
                )
                .await?
        }
    };

    println!("Deleted {} sentences", deleted);
    Ok(())
}

fn run_languages(app: &App) -> Result<()> {
    for (code, name) in app.aggregator.languages() {
        println!("{}\t{}", code, name);
    }
    Ok(())
}

fn run_providers(app: &App, language: Option<String>) -> Result<()> {
    let providers = match &language {
        Some(language) => app.aggregator.registry().for_language(language),
        None => app.aggregator.registry().all(),
    };

    for provider in providers {
        println!(
            "{}\t{}\t[{}]",
            provider.name(),
            provider.human_name(),
            provider.supported_languages().join(", ")
        );
    }
    Ok(())
}
