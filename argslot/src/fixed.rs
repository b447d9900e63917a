// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use {
    crate::{
        attached_short_value,
        error::{ConfigError, ParseError, UsageError},
        target::Target,
        value::ValueParser,
        OptionParser, Parsed, Value,
    },
    argslot_shared::ParserInfo,
    std::num::NonZeroUsize,
};

/// An option taking a fixed number of values, each converted by `P`.
///
/// Options with an arity of one produce [`Value::One`], all others produce
/// [`Value::Many`] holding exactly `arity` values.
#[derive(Clone, Copy, Debug)]
pub struct FixedArity<P> {
    parser: P,
    arity: NonZeroUsize,
}

impl<P: ValueParser> FixedArity<P> {
    /// An option taking `arity` values.
    ///
    /// Fails if `arity` is zero; use [`Flag`](crate::Flag) for options
    /// without values.
    pub fn new(parser: P, arity: usize) -> Result<Self, ConfigError> {
        let arity = NonZeroUsize::new(arity).ok_or(ConfigError::ZeroArity(arity))?;
        Ok(Self { parser, arity })
    }

    /// An option taking exactly one value.
    pub fn single(parser: P) -> Self {
        Self { parser, arity: NonZeroUsize::MIN }
    }

    /// The number of values each occurrence takes.
    pub fn arity(&self) -> usize {
        self.arity.get()
    }

    /// The conversion strategy.
    pub fn value_parser(&self) -> &P {
        &self.parser
    }

    /// A plain description of this parser.
    pub fn info(&self) -> ParserInfo<'static> {
        ParserInfo {
            arity: self.arity(),
            value_type: self.parser.value_type().name(),
            repeatable: self.repeatable_for_help(),
        }
    }

    fn convert(&self, raw: &str) -> Result<P::Value, ParseError<P::Error>> {
        self.parser.parse_value(raw).map_err(ParseError::Conversion)
    }
}

impl<P: ValueParser> OptionParser for FixedArity<P> {
    type Value = P::Value;
    type Error = P::Error;

    fn parse_long(
        &self,
        name: &str,
        args: &[&str],
        index: usize,
        explicit: Option<&str>,
    ) -> Result<Parsed<P::Value>, ParseError<P::Error>> {
        let arity = self.arity();
        // The flag's own slot is claimed either way; an attached value lives in it.
        let consumed = if explicit.is_some() { arity } else { arity.saturating_add(1) };
        let missing = || UsageError::missing_values(name, arity);

        let end = index
            .checked_add(consumed - 1)
            .filter(|&end| end < args.len())
            .ok_or_else(missing)?;
        let following = args.get(index + 1..=end).ok_or_else(missing)?;
        let mut raw_values = explicit.into_iter().chain(following.iter().copied());

        let value = if arity == 1 {
            let raw = raw_values.next().ok_or_else(missing)?;
            Value::One(self.convert(raw)?)
        } else {
            Value::Many(raw_values.map(|raw| self.convert(raw)).collect::<Result<_, _>>()?)
        };

        tracing::trace!(option = name, index, consumed, "parsed option occurrence");
        Ok(Parsed { consumed, value })
    }

    fn parse_short(
        &self,
        name: &str,
        args: &[&str],
        index: usize,
        position: usize,
    ) -> Result<Parsed<P::Value>, ParseError<P::Error>> {
        let explicit = args.get(index).and_then(|token| attached_short_value(token, position));
        self.parse_long(name, args, index, explicit)
    }

    fn check_target(&self, target: &Target) -> Result<(), ConfigError> {
        let value_type = self.parser.value_type();
        if self.arity() > 1 {
            target.expect_sequence(value_type, self.parser.sequence_type())
        } else {
            target.expect_single(value_type)
        }
    }

    fn repeatable_for_help(&self) -> bool {
        self.arity() > 1
    }
}
