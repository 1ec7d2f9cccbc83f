use strum_macros::{Display, EnumString};
use thiserror::Error as ThisError;

/// Coarse classification of an [`Error`], stable across variants.
#[derive(Debug, Copy, Clone, Display, PartialEq, Eq, EnumString)]
pub enum ErrorKind {
    InvalidArgument,
    TypeMismatch,
    UnknownCallback,
    Config,
}

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("attribute `{method}` holds a {found} value, expected {expected}")]
    TypeMismatch {
        method: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("callback `{callback}` cannot be resolved: {reason}")]
    UnknownCallback { callback: String, reason: String },

    #[error("malformed reference config: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::UnknownCallback { .. } => ErrorKind::UnknownCallback,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kind_follows_variant() {
        let err = Error::invalid_argument("service key is blank");
        assert_eq!(ErrorKind::InvalidArgument, err.kind());
        assert_eq!("invalid argument: service key is blank", err.to_string());

        let err = Error::TypeMismatch {
            method: "sayHello".to_owned(),
            expected: "AsyncMethod",
            found: "Text",
        };
        assert_eq!(ErrorKind::TypeMismatch, err.kind());
        assert_eq!(
            "attribute `sayHello` holds a Text value, expected AsyncMethod",
            err.to_string()
        );
    }

    #[test]
    fn kind_parses_from_name() {
        assert_eq!(
            ErrorKind::TypeMismatch,
            ErrorKind::from_str("TypeMismatch").unwrap()
        );
        assert_eq!("Config", ErrorKind::Config.to_string());
    }
}
