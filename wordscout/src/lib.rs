pub mod config;
pub mod dictionary;
pub mod errors;
pub mod metrics;
pub mod results;
pub mod search;
pub mod sort;

pub use config::SearchConfig;
pub use dictionary::Dictionary;
pub use errors::{SearchError, SearchResult};
pub use results::{RunStats, SearchOutput, WordMatch};
pub use search::{find_words, find_words_with_progress};
pub use sort::SortMode;
