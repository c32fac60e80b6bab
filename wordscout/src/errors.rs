/// This module defines custom error types for wordscout, demonstrating Rust's error handling
/// compared to .NET's exception system.
///
/// # Rust vs .NET Error Handling
///
/// .NET uses exceptions for error handling:
/// ```csharp
/// try {
///     var finder = new WordFinder("dictionary.txt");
///     finder.Find(letters);
/// } catch (FileNotFoundException ex) {
///     // Handle missing dictionary
/// } catch (ArgumentException ex) {
///     // Handle bad query
/// } catch (Exception ex) {
///     // Handle other errors
/// }
/// ```
///
/// Rust uses Result types with custom errors:
/// ```rust,ignore
/// match find_words(&dictionary, &config) {
///     Ok(output) => // Process matches,
///     Err(SearchError::DictionaryNotFound(path)) => // Handle missing dictionary,
///     Err(SearchError::QueryTooShort { .. }) => // Handle bad query,
///     Err(e) => // Handle other errors
/// }
/// ```
///
/// Every failure the engine can report is listed in one enum, so callers can
/// match exhaustively and the compiler flags any case they forget.
use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while loading a dictionary or running a search
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Dictionary not found: {0}")]
    DictionaryNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Dictionary too large: {size} bytes exceeds the {limit} byte limit")]
    DictionaryTooLarge { size: u64, limit: u64 },
    #[error("Query too short: need at least {min} letters, got {len}")]
    QueryTooShort { len: usize, min: usize },
    #[error("Letters must be alphabetic: {0}")]
    NotAlphabetic(String),
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SearchError {
    pub fn dictionary_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DictionaryNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn dictionary_too_large(size: u64, limit: u64) -> Self {
        Self::DictionaryTooLarge { size, limit }
    }

    pub fn query_too_short(len: usize, min: usize) -> Self {
        Self::QueryTooShort { len, min }
    }

    pub fn not_alphabetic(text: impl Into<String>) -> Self {
        Self::NotAlphabetic(text.into())
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_error_creation() {
        let path = Path::new("dictionary.txt");
        let err = SearchError::dictionary_not_found(path);
        assert!(matches!(err, SearchError::DictionaryNotFound(_)));

        let err = SearchError::permission_denied(path);
        assert!(matches!(err, SearchError::PermissionDenied(_)));

        let err = SearchError::query_too_short(2, 3);
        assert!(matches!(err, SearchError::QueryTooShort { .. }));

        let err = SearchError::not_alphabetic("t4c");
        assert!(matches!(err, SearchError::NotAlphabetic(_)));

        let err = SearchError::dictionary_too_large(5_000_000_000, u32::MAX as u64);
        assert!(matches!(err, SearchError::DictionaryTooLarge { .. }));
    }

    #[test]
    fn test_error_messages() {
        let err = SearchError::query_too_short(2, 3);
        assert_eq!(err.to_string(), "Query too short: need at least 3 letters, got 2");

        let err = SearchError::not_alphabetic("t4c");
        assert_eq!(err.to_string(), "Letters must be alphabetic: t4c");

        let err = SearchError::invalid_query("no letters given");
        assert_eq!(err.to_string(), "Invalid query: no letters given");

        let err = SearchError::config_error("Missing required field");
        assert_eq!(err.to_string(), "Configuration error: Missing required field");

        let err = SearchError::dictionary_not_found("words.txt");
        assert_eq!(err.to_string(), "Dictionary not found: words.txt");
    }
}
