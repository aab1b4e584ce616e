//! Error type shared by the whole compression pipeline.

/// Everything that can go wrong while building, applying or persisting a Huffman code.
#[derive(Debug, thiserror::Error)]
pub enum HuffmanError {
    /// Reading the input or writing one of the outputs failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `extract_min` was called on an empty priority queue.
    #[error("cannot extract from an empty priority queue")]
    EmptyQueue,

    /// The text contains a character the code table knows nothing about.
    #[error("symbol {0:?} is not in the code table")]
    SymbolNotInTable(char),

    /// A bit-string contained something other than `0` or `1`.
    #[error("invalid bit {0:?}, expected '0' or '1'")]
    InvalidBit(char),

    /// A code table or an encoded payload does not describe a valid prefix code.
    #[error("invalid code: {0}")]
    InvalidCode(String),

    /// The payload ended in the middle of a code.
    #[error("payload ends in the middle of a code after {consumed} bits")]
    TruncatedCode { consumed: usize },

    /// The `.properties` sidecar is missing a key or holds a malformed value.
    #[error("malformed properties: {0}")]
    Properties(String),

    /// The archive could not be encoded or decoded.
    #[error("malformed archive: {0}")]
    Archive(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<java_properties::PropertiesError> for HuffmanError {
    fn from(e: java_properties::PropertiesError) -> Self {
        HuffmanError::Properties(e.to_string())
    }
}

impl From<bincode::Error> for HuffmanError {
    fn from(e: bincode::Error) -> Self {
        HuffmanError::Archive(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
