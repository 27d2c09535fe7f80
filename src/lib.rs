pub mod abbreviation;
pub mod corpus;
pub mod discovery;
pub mod normalization;
pub mod reader;

// Re-export main types for convenient access
pub use abbreviation::{
    compress_with, expand_with, AbbreviationConfig, AbbreviationEngine, AbbreviationTermMap,
    RewriteDirection, Unresolved,
};
pub use corpus::{find_corpus, CorpusConfig, CorpusReport, CorpusRow, FileStats, RunStats};
pub use normalization::clean_text;

/// Find, but don't rewrite, abbreviations and their terms using the default configuration
pub fn findall(text: &str) -> AbbreviationTermMap {
    AbbreviationEngine::with_default_config().findall(text)
}

/// Expand every resolved abbreviation in the text into its full term
pub fn expandall(text: &str) -> String {
    AbbreviationEngine::with_default_config().expandall(text)
}

/// Compress every resolved full term in the text into its abbreviation
pub fn compressall(text: &str) -> String {
    AbbreviationEngine::with_default_config().compressall(text)
}
