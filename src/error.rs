use thiserror::Error;

/// Failures at the edges of the crate: reading snapshots, configs, and
/// pattern tables. Classification itself never fails.
#[derive(Debug, Error)]
pub enum CopilotError {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Page snapshot was not valid JSON
    #[error("Invalid page snapshot {path}: {source}")]
    SnapshotParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Pattern table was not valid YAML
    #[error("Invalid pattern table {path}: {source}")]
    PatternParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Duplicate form category in pattern table: {0}")]
    DuplicateCategory(String),

    #[error("Pattern table contains no patterns")]
    EmptyPatternTable,

    /// Result could not be rendered as JSON
    #[error("JSON serialize error ({context}): {source}")]
    JsonSerialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
