// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use {
    crate::{
        attached_short_value,
        error::{ConfigError, ParseError, UsageError},
        target::{Target, TypeDesc},
        OptionParser, Parsed, Value,
    },
    argslot_shared::ParserInfo,
    std::convert::Infallible,
};

/// A switch: an option that takes no values and is set to `true` when
/// provided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flag;

impl Flag {
    /// A plain description of this parser.
    pub fn info(&self) -> ParserInfo<'static> {
        ParserInfo { arity: 0, value_type: TypeDesc::of::<bool>().name(), repeatable: false }
    }
}

impl OptionParser for Flag {
    type Value = bool;
    type Error = Infallible;

    fn parse_long(
        &self,
        name: &str,
        _args: &[&str],
        _index: usize,
        explicit: Option<&str>,
    ) -> Result<Parsed<bool>, ParseError<Infallible>> {
        if explicit.is_some() {
            return Err(UsageError::unexpected_value(name).into());
        }
        Ok(Parsed { consumed: 1, value: Value::One(true) })
    }

    fn parse_short(
        &self,
        _name: &str,
        args: &[&str],
        index: usize,
        position: usize,
    ) -> Result<Parsed<bool>, ParseError<Infallible>> {
        // Letters later in the same group still need the token.
        let last_in_group = args
            .get(index)
            .map_or(true, |token| attached_short_value(token, position).is_none());
        Ok(Parsed { consumed: usize::from(last_in_group), value: Value::One(true) })
    }

    fn check_target(&self, target: &Target) -> Result<(), ConfigError> {
        target.expect_single(TypeDesc::of::<bool>())
    }

    fn repeatable_for_help(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_long() {
        assert_eq!(
            Flag.parse_long("--verbose", &["--verbose", "x"], 0, None),
            Ok(Parsed { consumed: 1, value: Value::One(true) })
        );
    }

    #[test]
    fn test_long_rejects_value() {
        let err = Flag.parse_long("--verbose", &["--verbose=yes"], 0, Some("yes")).unwrap_err();
        assert_eq!(err.to_string(), "`--verbose` does not take a value");
    }

    #[test]
    fn test_short_bundle() {
        let args = ["-abc"];
        assert_eq!(Flag.parse_short("-a", &args, 0, 1).unwrap().consumed, 0);
        assert_eq!(Flag.parse_short("-b", &args, 0, 2).unwrap().consumed, 0);
        assert_eq!(Flag.parse_short("-c", &args, 0, 3).unwrap().consumed, 1);
        assert_eq!(Flag.parse_short("-v", &["-v"], 0, 1).unwrap().consumed, 1);
    }

    #[test]
    fn test_short_index_past_end() {
        assert_eq!(
            Flag.parse_short("-o", &["-o"], 5, 1),
            Ok(Parsed { consumed: 1, value: Value::One(true) })
        );
    }

    #[test]
    fn test_check_target() {
        assert!(Flag.check_target(&Target::scalar::<bool>("verbose")).is_ok());
        assert!(Flag.check_target(&Target::scalar::<bool>("verbose").nullable()).is_ok());
        assert!(Flag.check_target(&Target::opaque("verbose")).is_ok());
        assert!(Flag.check_target(&Target::scalar::<u8>("verbose")).is_err());
        assert!(!Flag.repeatable_for_help());
    }

    #[test]
    fn test_info() {
        assert_eq!(Flag.info(), ParserInfo { arity: 0, value_type: "bool", repeatable: false });
    }
}
