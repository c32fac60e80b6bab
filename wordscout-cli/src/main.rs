use clap::Parser;
use colored::Colorize;
use humantime::format_duration;
use indicatif::{ProgressBar, ProgressStyle};
use std::{num::NonZeroUsize, path::PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wordscout::{
    find_words, find_words_with_progress, results::RunStats, Dictionary, SearchConfig, SearchError,
    SortMode,
};

type Result<T> = std::result::Result<T, SearchError>;

// Exit codes shared with scripts driving the tool
const EXIT_USAGE: i32 = 1;
const EXIT_FILE: i32 = 2;
const EXIT_QUERY_LENGTH: i32 = 3;
const EXIT_QUERY_ALPHA: i32 = 4;
const EXIT_NO_WORDS: i32 = 5;

/// Find every dictionary word spellable from a set of jumbled letters
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Letters available for spelling words
    letters: Option<String>,

    /// Require every matched word to contain this letter
    #[arg(short = 'i', long = "include", value_name = "LETTER")]
    include: Option<char>,

    /// Allow each letter to be used more than once
    #[arg(short = 'r', long)]
    repeats: bool,

    /// Sort matches shortest first
    #[arg(short = 's', long = "sort-length", group = "order")]
    sort_length: bool,

    /// Sort matches alphabetically
    #[arg(short = 'a', long, group = "order")]
    alpha: bool,

    /// Keep only the longest matches
    #[arg(short = 'o', long, group = "order")]
    longest: bool,

    /// Dictionary file, one lowercase word per line
    #[arg(short = 'd', long, value_name = "PATH")]
    dictionary: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Keep at most this many matches
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Ignore words shorter than this
    #[arg(long = "min-len", value_name = "N")]
    min_len: Option<usize>,

    /// Show only statistics, not matched words
    #[arg(long)]
    stats: bool,

    /// Emit matches and statistics as JSON
    #[arg(long)]
    json: bool,

    /// Path to a configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Do not display the progress indicator
    #[arg(long = "no-progress")]
    no_progress: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version requests land on stdout and exit cleanly;
            // anything else is a usage error.
            let code = if e.use_stderr() { EXIT_USAGE } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(exit_code(&e));
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let file_config = SearchConfig::load_from(cli.config.as_deref())
        .map_err(|e| SearchError::config_error(e.to_string()))?;
    let config = file_config.merge_with_cli(cli_config(&cli));

    init_tracing(&config.log_level);
    config.validate()?;

    debug!(
        "Searching {} for letters {:?}",
        config.dictionary_path.display(),
        config.letters
    );
    let dictionary = Dictionary::load(&config.dictionary_path)?;

    let show_progress = !cli.no_progress && !cli.json && !config.stats_only;
    let output = if show_progress {
        let bar = ProgressBar::new(100);
        if let Ok(style) = ProgressStyle::with_template("{percent:>3}% complete") {
            bar.set_style(style);
        }
        let output =
            find_words_with_progress(&dictionary, &config, |pct| bar.set_position(u64::from(pct)))?;
        bar.finish_and_clear();
        output
    } else {
        find_words(&dictionary, &config)?
    };

    if cli.json {
        print_json(&config, &dictionary, &output.matches, &output.stats);
    } else {
        if !config.stats_only {
            for m in &output.matches {
                println!("{}", String::from_utf8_lossy(m.bytes(dictionary.as_bytes())));
            }
        }
        print_stats(&output.stats);
    }

    if output.is_empty() {
        if !cli.json {
            eprintln!("no words found :^(");
        }
        return Ok(EXIT_NO_WORDS);
    }
    Ok(0)
}

/// Maps CLI arguments onto the config type so the file/CLI merge can apply.
fn cli_config(cli: &Cli) -> SearchConfig {
    let defaults = SearchConfig::default();

    let sort = if cli.sort_length {
        Some(SortMode::Length)
    } else if cli.alpha {
        Some(SortMode::Alpha)
    } else if cli.longest {
        Some(SortMode::Longest)
    } else {
        None
    };

    SearchConfig {
        letters: cli.letters.clone().unwrap_or_default(),
        required_letter: cli.include,
        allow_repeats: cli.repeats,
        sort,
        dictionary_path: cli
            .dictionary
            .clone()
            .unwrap_or_else(|| defaults.dictionary_path.clone()),
        thread_count: cli.threads.unwrap_or(defaults.thread_count),
        max_matches: cli.limit.unwrap_or(defaults.max_matches),
        min_word_len: cli.min_len.unwrap_or(defaults.min_word_len),
        stats_only: cli.stats,
        log_level: defaults.log_level.clone(),
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(err: &SearchError) -> i32 {
    match err {
        SearchError::QueryTooShort { .. } => EXIT_QUERY_LENGTH,
        SearchError::NotAlphabetic(_) => EXIT_QUERY_ALPHA,
        SearchError::InvalidQuery(_) | SearchError::ConfigError(_) => EXIT_USAGE,
        SearchError::DictionaryNotFound(_)
        | SearchError::PermissionDenied(_)
        | SearchError::DictionaryTooLarge { .. }
        | SearchError::IoError(_) => EXIT_FILE,
    }
}

fn print_stats(stats: &RunStats) {
    let banner = "**********************************************************";
    println!("\n{}", banner);
    println!("** {}", "STATISTICS".blue().bold());
    println!("{}", banner);
    println!("** Workers      :  {}", stats.worker_count);
    println!("** Partitions   :  {}", stats.partition_count);
    println!("** Elapsed      : ~{}", format_duration(stats.elapsed));
    println!("** WordsScanned :  {} words", stats.words_scanned);
    println!("** WordsFound   :  {} words", stats.words_found);
    println!("** WordsStored  :  {} words", stats.words_stored);
    if stats.words_scanned > 0 {
        let per_word = stats.elapsed / stats.words_scanned as u32;
        println!("** TimePerWord  : ~{}", format_duration(per_word));
    }
    if stats.overflowed {
        println!(
            "** {}",
            "Match list reached capacity; some words were dropped".yellow()
        );
    }
    println!("{}\n", banner);
}

fn print_json(
    config: &SearchConfig,
    dictionary: &Dictionary,
    matches: &[wordscout::WordMatch],
    stats: &RunStats,
) {
    let words: Vec<String> = matches
        .iter()
        .map(|m| String::from_utf8_lossy(m.bytes(dictionary.as_bytes())).into_owned())
        .collect();
    let payload = serde_json::json!({
        "query": config.letters,
        "matches": words,
        "stats": stats,
    });
    println!("{payload:#}");
}
