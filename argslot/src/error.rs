// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use thiserror::Error;

/// A mistake made by the user of the commandline tool, such as supplying
/// too few values for an option.
///
/// The message is intended to be shown to the end user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct UsageError {
    message: String,
}

impl UsageError {
    /// Create a usage error carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// `name` was given without enough values following it.
    pub(crate) fn missing_values(name: &str, arity: usize) -> Self {
        let message = if arity == 1 {
            ["`", name, "` requires an argument"].concat()
        } else {
            ["`", name, "` requires ", &arity.to_string(), " arguments"].concat()
        };
        Self { message }
    }

    /// `name` does not take a value, but one was attached to it.
    pub(crate) fn unexpected_value(name: &str) -> Self {
        Self { message: ["`", name, "` does not take a value"].concat() }
    }

    /// The message to display to the user.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A mistake made by the developer wiring up a command, such as binding an
/// option to a destination that cannot hold its values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Option parsers must consume at least one value.
    #[error("option arity must be at least 1, got {0}")]
    ZeroArity(usize),

    /// The destination can never hold the parser's output.
    #[error("destination `{target}` must accept `{required}`, but is declared as `{declared}`")]
    IncompatibleTarget {
        /// The destination's name.
        target: String,
        /// The type the parser produces.
        required: String,
        /// The destination's declared type, as far as it is known.
        declared: String,
    },
}

/// The ways parsing a single option occurrence can fail.
///
/// `E` is the error type of the conversion strategy, which is passed through
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError<E> {
    /// Not enough tokens, or an unexpected attached value.
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// The conversion strategy rejected a raw value.
    #[error("{0}")]
    Conversion(E),
}

impl<E> ParseError<E> {
    /// Returns the usage error, if this is one.
    pub fn as_usage(&self) -> Option<&UsageError> {
        match self {
            ParseError::Usage(usage) => Some(usage),
            ParseError::Conversion(_) => None,
        }
    }

    /// Returns the conversion strategy's error, if this is one.
    pub fn into_conversion(self) -> Option<E> {
        match self {
            ParseError::Conversion(err) => Some(err),
            ParseError::Usage(_) => None,
        }
    }
}
