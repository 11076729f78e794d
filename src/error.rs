//! Operational errors.
//!
//! These cover misuse of the API (editing a field the active kind does not own), bad
//! settings files and unparsable names. Validation problems in user input are not errors:
//! they are reported as data in a [`Report`](crate::validate::Report).
use std::path::PathBuf;

use thiserror::Error;

use crate::payload::{Field, PayloadKind};

/// An edit that cannot be applied to the active field set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The field belongs to a different kind.
    #[error("field `{field}` does not belong to the {kind} payload")]
    FieldNotInKind { field: Field, kind: PayloadKind },
    /// A text value was sent to the encryption selector or hidden flag.
    #[error("field `{0}` does not accept free text")]
    NotATextField(Field),
}

/// A name that does not map to any known value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown payload kind `{0}`")]
    UnknownKind(String),
    #[error("unknown Wi-Fi encryption `{0}` (expected WPA, WEP or nopass)")]
    UnknownEncryption(String),
    #[error("unsupported language `{0}`")]
    UnknownLanguage(String),
}

/// Failure to load [`Settings`](crate::config::Settings).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings")]
    Parse(#[from] toml::de::Error),
}
