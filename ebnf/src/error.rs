use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse: {0}")]
    ParseError(String),
    #[error("undefined rule: {0}")]
    UndefinedRule(String),
    #[error("rule defined more than once: {0}")]
    DuplicateRule(String),
    #[error("unsupported construct: {0}")]
    Unsupported(String),
    #[error("invalid special sequence '{0}'")]
    InvalidSpecial(String),
    #[error(transparent)]
    Diagnostic(#[from] pegcore::Diagnostic),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<nom::Err<nom::error::Error<&str>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&str>>) -> Error {
        Error::ParseError(format!("{:?}", err))
    }
}
