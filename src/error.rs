use thiserror::Error;

/// Failures surfaced by compress, decompress and the reader/writer adapters.
///
/// Every variant is fatal to the call that produced it; nothing partial is
/// ever returned alongside an error.
#[derive(Error, Debug)]
pub enum HuffmanError {
    /// Compression was asked to encode zero symbols.
    #[error("cannot compress empty input")]
    EmptyInput,

    /// The container header or code table failed structural validation.
    #[error("malformed container: {reason}")]
    MalformedContainer { reason: String },

    /// The payload bits do not decompose into the persisted codes.
    #[error("corrupt container: {reason}")]
    CorruptContainer { reason: String },

    /// The text holds a symbol the codec's table has no code for.
    #[error("symbol {0:?} not in code table")]
    UnknownSymbol(char),

    /// A generated code does not fit the one-byte length field of the table.
    #[error("code for {symbol:?} is {length} bits long, the table format allows at most 255")]
    CodeTooLong { symbol: char, length: usize },

    /// The text source was not valid UTF-8.
    #[error("input is not valid UTF-8 text")]
    InvalidUtf8,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HuffmanError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        HuffmanError::MalformedContainer { reason: reason.into() }
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        HuffmanError::CorruptContainer { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
