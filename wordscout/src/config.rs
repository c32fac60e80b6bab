use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::errors::{SearchError, SearchResult};
use crate::search::engine::MAX_WORKERS;
use crate::sort::SortMode;

/// Dictionary file used when none is configured
pub const DEFAULT_DICTIONARY: &str = "dictionary.txt";

/// Queries shorter than this are rejected
pub const MIN_QUERY_LEN: usize = 3;

/// Configuration for a word search, demonstrating Rust's strong typing
/// compared to .NET's optional configuration pattern.
///
/// # Configuration Locations
///
/// The configuration can be loaded from multiple locations in order of precedence:
/// 1. Custom config file specified via `--config` flag
/// 2. Local `.wordscout.yaml` in the current directory
/// 3. Global `$HOME/.config/wordscout/config.yaml`
///
/// # Configuration Format
///
/// The configuration uses YAML format. Example:
/// ```yaml
/// # Letters available for spelling words
/// letters: "triangle"
///
/// # Letter every matched word must contain
/// required_letter: "g"
///
/// # Allow each query letter to be used more than once
/// allow_repeats: false
///
/// # Output ordering (length, alpha, longest)
/// sort: "length"
///
/// # Dictionary file, one word per line
/// dictionary_path: "/usr/share/dict/words"
///
/// # Keep at most this many matches
/// max_matches: 10000
///
/// # Ignore words shorter than this
/// min_word_len: 3
///
/// # Show only statistics
/// stats_only: false
///
/// # Thread count (default: CPU cores)
/// thread_count: 4
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
///
/// # CLI Integration
///
/// When using the CLI, command-line arguments take precedence over config file values.
/// The merging behavior is defined in the `merge_with_cli` method.
///
/// # Rust vs .NET Configuration
///
/// .NET's IConfiguration pattern:
/// ```csharp
/// public class SearchOptions
/// {
///     public string Letters { get; set; }
///     public string DictionaryPath { get; set; }
///     public char? RequiredLetter { get; set; }
///     // No compile-time guarantees for null values
/// }
/// ```
///
/// Rust's strongly-typed configuration:
/// ```rust,ignore
/// #[derive(Deserialize)]
/// pub struct SearchConfig {
///     pub letters: String,
///     pub dictionary_path: PathBuf,
///     pub required_letter: Option<char>,
///     // Option explicitly handles missing values
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// The letters available for spelling words
    #[serde(default)]
    pub letters: String,

    /// A letter every matched word must contain
    #[serde(default)]
    pub required_letter: Option<char>,

    /// Whether each query letter may be used more than once
    #[serde(default)]
    pub allow_repeats: bool,

    /// Ordering applied to the match list; None leaves discovery order
    #[serde(default)]
    pub sort: Option<SortMode>,

    /// Dictionary file, one word per line
    #[serde(default = "default_dictionary_path")]
    pub dictionary_path: PathBuf,

    /// Number of threads to use for scanning
    /// Defaults to number of CPU cores if not specified
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Maximum number of matches to keep; further matches are counted but dropped
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,

    /// Words shorter than this are never considered
    #[serde(default = "default_min_word_len")]
    pub min_word_len: usize,

    /// Whether to only show statistics instead of matched words
    #[serde(default)]
    pub stats_only: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_dictionary_path() -> PathBuf {
    PathBuf::from(DEFAULT_DICTIONARY)
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap()
}

fn default_max_matches() -> usize {
    10_000
}

fn default_min_word_len() -> usize {
    MIN_QUERY_LEN
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl SearchConfig {
    /// Loads configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration from a specific file
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        // Default config locations
        let config_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("wordscout/config.yaml")),
            // Local config
            Some(PathBuf::from(".wordscout.yaml")),
        ];

        // Add existing config files
        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // An explicitly requested file must exist
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        // Build and deserialize
        builder.build()?.try_deserialize()
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli_config: SearchConfig) -> Self {
        // CLI values take precedence over config file values
        if !cli_config.letters.is_empty() {
            self.letters = cli_config.letters;
        }
        if cli_config.required_letter.is_some() {
            self.required_letter = cli_config.required_letter;
        }
        if cli_config.allow_repeats {
            self.allow_repeats = true;
        }
        if cli_config.sort.is_some() {
            self.sort = cli_config.sort;
        }
        if cli_config.dictionary_path != default_dictionary_path() {
            self.dictionary_path = cli_config.dictionary_path;
        }
        if cli_config.thread_count != default_thread_count() {
            self.thread_count = cli_config.thread_count;
        }
        if cli_config.max_matches != default_max_matches() {
            self.max_matches = cli_config.max_matches;
        }
        if cli_config.min_word_len != default_min_word_len() {
            self.min_word_len = cli_config.min_word_len;
        }
        if cli_config.stats_only {
            self.stats_only = true;
        }
        if cli_config.log_level != default_log_level() {
            self.log_level = cli_config.log_level;
        }
        self
    }

    /// Checks that the query can drive a search.
    ///
    /// The engine takes the query as given, so callers run this before
    /// starting a search. The CLI does it right after merging arguments.
    pub fn validate(&self) -> SearchResult<()> {
        if self.letters.is_empty() {
            return Err(SearchError::invalid_query("no letters given"));
        }
        let len = self.letters.chars().count();
        if len < MIN_QUERY_LEN {
            return Err(SearchError::query_too_short(len, MIN_QUERY_LEN));
        }
        if !self.letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(SearchError::not_alphabetic(self.letters.clone()));
        }
        if let Some(c) = self.required_letter {
            if !c.is_ascii_alphabetic() {
                return Err(SearchError::not_alphabetic(c.to_string()));
            }
        }
        Ok(())
    }

    /// Worker threads the engine will actually use
    pub fn worker_count(&self) -> usize {
        self.thread_count.get().min(MAX_WORKERS)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            letters: String::new(),
            required_letter: None,
            allow_repeats: false,
            sort: None,
            dictionary_path: default_dictionary_path(),
            thread_count: default_thread_count(),
            max_matches: default_max_matches(),
            min_word_len: default_min_word_len(),
            stats_only: false,
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let config_content = r#"
            letters: "triangle"
            required_letter: "g"
            allow_repeats: true
            sort: "alpha"
            dictionary_path: "words.txt"
            thread_count: 4
            max_matches: 500
            min_word_len: 4
            stats_only: true
            log_level: "debug"
        "#;

        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let config = SearchConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.letters, "triangle");
        assert_eq!(config.required_letter, Some('g'));
        assert!(config.allow_repeats);
        assert_eq!(config.sort, Some(SortMode::Alpha));
        assert_eq!(config.dictionary_path, PathBuf::from("words.txt"));
        assert_eq!(config.thread_count, NonZeroUsize::new(4).unwrap());
        assert_eq!(config.max_matches, 500);
        assert_eq!(config.min_word_len, 4);
        assert!(config.stats_only);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_merge_with_cli() {
        let config_file = SearchConfig {
            letters: "triangle".to_string(),
            required_letter: Some('g'),
            allow_repeats: false,
            sort: Some(SortMode::Alpha),
            dictionary_path: PathBuf::from("words.txt"),
            thread_count: NonZeroUsize::new(4).unwrap(),
            max_matches: 500,
            min_word_len: 4,
            stats_only: false,
            log_level: "warn".to_string(),
        };

        let cli_config = SearchConfig {
            letters: "tac".to_string(),
            required_letter: None,
            allow_repeats: false,
            sort: Some(SortMode::Length),
            dictionary_path: default_dictionary_path(),
            thread_count: NonZeroUsize::new(8).unwrap(),
            max_matches: default_max_matches(),
            min_word_len: default_min_word_len(),
            stats_only: true,
            log_level: "debug".to_string(),
        };

        let merged = config_file.merge_with_cli(cli_config);
        assert_eq!(merged.letters, "tac"); // CLI value
        assert_eq!(merged.required_letter, Some('g')); // File value (CLI None)
        assert_eq!(merged.sort, Some(SortMode::Length)); // CLI value
        assert_eq!(merged.dictionary_path, PathBuf::from("words.txt")); // File value (CLI default)
        assert_eq!(merged.thread_count, NonZeroUsize::new(8).unwrap()); // CLI value
        assert_eq!(merged.max_matches, 500); // File value (CLI default)
        assert_eq!(merged.min_word_len, 4); // File value (CLI default)
        assert!(merged.stats_only); // CLI value
        assert_eq!(merged.log_level, "debug"); // CLI value
    }

    #[test]
    fn test_default_values() {
        let config_content = r#"
            letters: "tac"
        "#;

        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let config = SearchConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.letters, "tac");
        assert_eq!(config.required_letter, None);
        assert!(!config.allow_repeats);
        assert_eq!(config.sort, None);
        assert_eq!(config.dictionary_path, PathBuf::from(DEFAULT_DICTIONARY));
        assert_eq!(
            config.thread_count,
            NonZeroUsize::new(num_cpus::get()).unwrap()
        );
        assert_eq!(config.max_matches, 10_000);
        assert_eq!(config.min_word_len, 3);
        assert!(!config.stats_only);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_invalid_config() {
        let config_content = r#"
            letters: []  # Should be string
            thread_count: "invalid"  # Should be number
        "#;

        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let result = SearchConfig::load_from(Some(&config_path));
        assert!(result.is_err(), "Expected error loading invalid config");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = SearchConfig::load_from(Some(Path::new("nonexistent.yaml")));
        assert!(result.is_err());
    }

    fn minimal_config(letters: &str) -> SearchConfig {
        SearchConfig {
            letters: letters.to_string(),
            required_letter: None,
            allow_repeats: false,
            sort: None,
            dictionary_path: default_dictionary_path(),
            thread_count: NonZeroUsize::new(1).unwrap(),
            max_matches: default_max_matches(),
            min_word_len: default_min_word_len(),
            stats_only: false,
            log_level: default_log_level(),
        }
    }

    #[test]
    fn test_validate_accepts_clean_query() {
        assert!(minimal_config("tac").validate().is_ok());
        assert!(minimal_config("TRIANGLE").validate().is_ok());

        let mut config = minimal_config("triangle");
        config.required_letter = Some('g');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_query() {
        let err = minimal_config("").validate().unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery(_)));
    }

    #[test]
    fn test_validate_rejects_short_query() {
        let err = minimal_config("ta").validate().unwrap_err();
        assert!(matches!(err, SearchError::QueryTooShort { len: 2, min: 3 }));
    }

    #[test]
    fn test_validate_rejects_non_alphabetic() {
        let err = minimal_config("t4c").validate().unwrap_err();
        assert!(matches!(err, SearchError::NotAlphabetic(_)));

        let mut config = minimal_config("tac");
        config.required_letter = Some('4');
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_worker_count_is_capped() {
        let mut config = minimal_config("tac");
        config.thread_count = NonZeroUsize::new(64).unwrap();
        assert_eq!(config.worker_count(), MAX_WORKERS);

        config.thread_count = NonZeroUsize::new(2).unwrap();
        assert_eq!(config.worker_count(), 2);
    }
}
