// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Option value parsing over raw commandline tokens.
//!
//! This crate implements the part of a commandline parser that runs once
//! a flag has been recognized: deciding how many of the following tokens
//! belong to it, converting them into typed values, and checking at setup
//! time that the destination the values are bound to can hold them.
//!
//! ## Basic Example
//!
//! ```rust
//! use argslot::{from_arg_value, FixedArity, OptionParser, Parsed, Value};
//!
//! let point = FixedArity::new(from_arg_value::<i32>(), 2).unwrap();
//! let args = ["--point", "3", "-4", "--verbose"];
//!
//! let parsed = point.parse_long("--point", &args, 0, None).unwrap();
//! assert_eq!(parsed, Parsed { consumed: 3, value: Value::Many(vec![3, -4]) });
//! ```
//!
//! The value of an option can be attached to the flag itself. The outer
//! parser splits `--name=value` and passes the value along, while for short
//! options everything after the option letter is taken as its value:
//!
//! ```rust
//! use argslot::{from_arg_value, FixedArity, OptionParser, Value};
//!
//! let jobs = FixedArity::single(from_arg_value::<u8>());
//!
//! let parsed = jobs.parse_long("--jobs", &["--jobs=8"], 0, Some("8")).unwrap();
//! assert_eq!((parsed.consumed, parsed.value), (1, Value::One(8)));
//!
//! let parsed = jobs.parse_short("-j", &["-vj8"], 0, 2).unwrap();
//! assert_eq!((parsed.consumed, parsed.value), (1, Value::One(8)));
//! ```
//!
//! Destinations are described with [`Target`]s, usually generated by
//! `#[derive(Targets)]`, and checked once when the command is put together:
//!
//! ```rust
//! use argslot::{from_arg_value, FixedArity, OptionParser, Targets};
//!
//! #[derive(Targets)]
//! struct Draw {
//!     point: Vec<i32>,
//!     label: Option<String>,
//! }
//!
//! let point = FixedArity::new(from_arg_value::<i32>(), 2).unwrap();
//! assert!(point.check_target(&Draw::target("point").unwrap()).is_ok());
//! assert!(point.check_target(&Draw::target("label").unwrap()).is_err());
//! ```

#![deny(missing_docs)]

pub use argslot_derive::Targets;
pub use argslot_shared::{ParserInfo, Shape, TargetInfo};

mod error;
mod fixed;
mod flag;
mod target;
mod value;

pub use {
    error::{ConfigError, ParseError, UsageError},
    fixed::FixedArity,
    flag::Flag,
    target::{Target, TargetShape, Targets, TypeDesc},
    value::{from_arg_value, Choices, FromArgValue, FromArgValueParser, FromStrFn, ValueParser},
};

/// The converted value(s) of one option occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<T> {
    /// The value of an option taking a single argument.
    One(T),
    /// The values of an option taking several arguments, in commandline order.
    Many(Vec<T>),
}

impl<T> Value<T> {
    /// The values as a slice, regardless of how many there are.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Value::One(value) => std::slice::from_ref(value),
            Value::Many(values) => values,
        }
    }

    /// The values as a `Vec`, regardless of how many there are.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Value::One(value) => vec![value],
            Value::Many(values) => values,
        }
    }
}

/// The outcome of parsing one option occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    /// The number of slots in the argument list claimed by this occurrence,
    /// counted from the flag's own position.
    ///
    /// A value attached to the flag (`--opt=value`, `-ovalue`) lives in the
    /// flag's slot, so `--opt value` consumes 2 while `--opt=value` consumes 1.
    /// Switches bundled inside a short option group consume 0 unless they
    /// are the last letter of the group.
    pub consumed: usize,
    /// The converted value(s).
    pub value: Value<T>,
}

/// The contract between the outer commandline parser and the parser for a
/// single option.
///
/// Implementations must not keep state between calls: parsing the same
/// tokens twice gives the same result.
pub trait OptionParser {
    /// The type of a single converted value.
    type Value;
    /// The error type of the value conversion.
    type Error;

    /// Parse an occurrence of a long option.
    ///
    /// `name`: the option as written by the user, used in error messages.
    /// `args`: every commandline argument of the current invocation.
    /// `index`: the position of the option in `args`.
    /// `explicit`: a value attached to the option token, e.g. after `=`.
    fn parse_long(
        &self,
        name: &str,
        args: &[&str],
        index: usize,
        explicit: Option<&str>,
    ) -> Result<Parsed<Self::Value>, ParseError<Self::Error>>;

    /// Parse an occurrence of a short option.
    ///
    /// `position` is the character offset of the option letter within
    /// `args[index]`, which may bundle several short options (`-abc`).
    fn parse_short(
        &self,
        name: &str,
        args: &[&str],
        index: usize,
        position: usize,
    ) -> Result<Parsed<Self::Value>, ParseError<Self::Error>>;

    /// Fail if `target` can never hold the values this parser produces.
    ///
    /// This only rejects destinations that are certainly incompatible;
    /// anything whose type is not fully known is accepted.
    fn check_target(&self, target: &Target) -> Result<(), ConfigError>;

    /// Whether usage text should show the option as taking several values.
    fn repeatable_for_help(&self) -> bool;
}

/// The text following the short option letter at `position`, if any.
///
/// `-ofile` with `o` at position 1 yields `file`; `-o` yields `None`.
fn attached_short_value(token: &str, position: usize) -> Option<&str> {
    let (offset, _) = token.char_indices().nth(position.checked_add(1)?)?;
    token.get(offset..)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_attached_short_value() {
        assert_eq!(attached_short_value("-ofile", 1), Some("file"));
        assert_eq!(attached_short_value("-o", 1), None);
        assert_eq!(attached_short_value("-abc", 2), Some("c"));
        assert_eq!(attached_short_value("-abc", 3), None);
        assert_eq!(attached_short_value("-abc", 17), None);
        assert_eq!(attached_short_value("-é9", 1), Some("9"));
    }

    #[test]
    fn test_value_views() {
        assert_eq!(Value::One(1).as_slice(), &[1]);
        assert_eq!(Value::Many(vec![1, 2]).as_slice(), &[1, 2]);
        assert_eq!(Value::One("a").into_vec(), vec!["a"]);
        assert_eq!(Value::Many(vec!["a", "b"]).into_vec(), vec!["a", "b"]);
    }
}
