use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViviRagError {
    #[error("Missing environment variables: {0}")]
    MissingCredentials(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Vector search error: {0}")]
    VectorSearch(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Agent unavailable: {0}")]
    AgentUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ViviRagError>;
