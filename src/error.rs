// SPDX-License-Identifier: MPL-2.0
//! Crate error type.
//!
//! Only two kinds of failure surface as errors: configuration I/O and wiring
//! mistakes such as reaching for the notification service outside of an
//! installed provider. Timer races and unsupported platform features are
//! absorbed where they happen and never reach this type.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    /// The notification service was requested where no provider is installed.
    #[error("notifications must be used within a notification provider")]
    OutsideProvider,
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
