use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("empty input: the document contains no content")]
    EmptyInput,

    #[error("failed to convert section '{title}': {message}")]
    Conversion { title: String, message: String },
}
