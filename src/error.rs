use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // implementors shim file
    #[error("Malformed implementors shim at line {line}: {message}")]
    MalformedShim { line: usize, message: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),
}

pub type InternalResult<T> = Result<T, Error>;

impl Error {
    pub fn malformed_shim<S: Into<String>>(line: usize, message: S) -> Self {
        Error::MalformedShim {
            line,
            message: message.into(),
        }
    }
}
