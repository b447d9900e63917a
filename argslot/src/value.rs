// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Conversion strategies: turning one raw commandline token into a value.

use {
    crate::target::TypeDesc,
    rust_fuzzy_search::fuzzy_search_best_n,
    std::{marker::PhantomData, str::FromStr},
};

/// A strategy for converting a single raw token into a typed value.
///
/// Option parsers invoke the strategy once per value token and hand back
/// whatever error it produces without inspecting it.
pub trait ValueParser {
    /// The type produced from one token.
    type Value: 'static;
    /// The error produced for a malformed token.
    type Error;

    /// Convert `raw` into a value.
    fn parse_value(&self, raw: &str) -> Result<Self::Value, Self::Error>;

    /// The type a destination must be able to hold to receive one value.
    fn value_type(&self) -> TypeDesc;

    /// The collection that several values are handed over in.
    fn sequence_type(&self) -> TypeDesc {
        TypeDesc::of::<Vec<Self::Value>>()
    }
}

impl<P: ValueParser + ?Sized> ValueParser for &P {
    type Value = P::Value;
    type Error = P::Error;

    fn parse_value(&self, raw: &str) -> Result<Self::Value, Self::Error> {
        (**self).parse_value(raw)
    }

    fn value_type(&self) -> TypeDesc {
        (**self).value_type()
    }

    fn sequence_type(&self) -> TypeDesc {
        (**self).sequence_type()
    }
}

/// Types which can be constructed from a single commandline value.
///
/// A blanket implementation exists for types implementing
/// `FromStr<Err: Display>`. Custom types can implement this trait
/// directly.
pub trait FromArgValue: Sized {
    /// Construct the type from a commandline value, returning an error string
    /// on failure.
    fn from_arg_value(value: &str) -> Result<Self, String>;
}

impl<T> FromArgValue for T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    fn from_arg_value(value: &str) -> Result<Self, String> {
        T::from_str(value).map_err(|x| x.to_string())
    }
}

/// The [`ValueParser`] for any [`FromArgValue`] type.
pub struct FromArgValueParser<T> {
    _marker: PhantomData<fn() -> T>,
}

/// Convert values with `T`'s [`FromArgValue`] implementation.
///
/// ```
/// use argslot::{from_arg_value, ValueParser};
///
/// let parser = from_arg_value::<u16>();
/// assert_eq!(parser.parse_value("8080"), Ok(8080));
/// assert!(parser.parse_value("http").is_err());
/// ```
pub fn from_arg_value<T: FromArgValue + 'static>() -> FromArgValueParser<T> {
    FromArgValueParser { _marker: PhantomData }
}

impl<T> Clone for FromArgValueParser<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FromArgValueParser<T> {}

impl<T> std::fmt::Debug for FromArgValueParser<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FromArgValueParser").field(&std::any::type_name::<T>()).finish()
    }
}

impl<T: FromArgValue + 'static> ValueParser for FromArgValueParser<T> {
    type Value = T;
    type Error = String;

    fn parse_value(&self, raw: &str) -> Result<T, String> {
        T::from_arg_value(raw)
    }

    fn value_type(&self) -> TypeDesc {
        TypeDesc::of::<T>()
    }
}

/// A [`ValueParser`] backed by a plain conversion function.
///
/// ```
/// use argslot::{FromStrFn, ValueParser};
///
/// fn always_five(_value: &str) -> Result<usize, String> {
///     Ok(5)
/// }
///
/// let parser = FromStrFn::new(always_five);
/// assert_eq!(parser.parse_value("woot"), Ok(5));
/// ```
pub struct FromStrFn<T> {
    func: fn(&str) -> Result<T, String>,
}

impl<T: 'static> FromStrFn<T> {
    /// Wrap `func`.
    pub fn new(func: fn(&str) -> Result<T, String>) -> Self {
        Self { func }
    }
}

impl<T> Clone for FromStrFn<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FromStrFn<T> {}

impl<T> std::fmt::Debug for FromStrFn<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FromStrFn").field(&std::any::type_name::<T>()).finish()
    }
}

impl<T: 'static> ValueParser for FromStrFn<T> {
    type Value = T;
    type Error = String;

    fn parse_value(&self, raw: &str) -> Result<T, String> {
        (self.func)(raw)
    }

    fn value_type(&self) -> TypeDesc {
        TypeDesc::of::<T>()
    }
}

/// Accepts exactly one of a fixed set of words.
///
/// Rejected values produce a message naming the accepted words and, when one
/// is close enough, the most likely intended one.
///
/// ```
/// use argslot::{Choices, ValueParser};
///
/// let color = Choices::new(&["red", "green", "blue"]);
/// assert_eq!(color.parse_value("green"), Ok("green"));
/// assert!(color.parse_value("blu").unwrap_err().contains("Did you mean \"blue\"?"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Choices {
    choices: &'static [&'static str],
}

impl Choices {
    /// Accept the words in `choices`.
    pub const fn new(choices: &'static [&'static str]) -> Self {
        Self { choices }
    }

    /// The accepted words, in declaration order.
    pub fn choices(&self) -> &'static [&'static str] {
        self.choices
    }

    fn rejection(&self, given: &str) -> String {
        let mut out = ["Invalid choice \"", given, "\", expected one of: "].concat();
        out.push_str(&self.choices.join(", "));

        let suggestions = fuzzy_search_best_n(given, self.choices, 1);
        if let Some(&(best, score)) = suggestions.first() {
            if score > 0.0 {
                out.push_str(&["\nDid you mean \"", best, "\"?"].concat());
            }
        }
        out
    }
}

impl ValueParser for Choices {
    type Value = &'static str;
    type Error = String;

    fn parse_value(&self, raw: &str) -> Result<&'static str, String> {
        self.choices.iter().copied().find(|&choice| choice == raw).ok_or_else(|| self.rejection(raw))
    }

    fn value_type(&self) -> TypeDesc {
        TypeDesc::of::<&'static str>()
    }
}
