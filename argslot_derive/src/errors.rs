// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use {
    proc_macro2::{Span, TokenStream},
    quote::ToTokens,
    std::cell::RefCell,
};

/// A type for collecting procedural macro errors.
#[derive(Default)]
pub struct Errors {
    errors: RefCell<Vec<syn::Error>>,
}

impl Errors {
    /// Issue an error like:
    ///
    /// Duplicate foo attribute
    /// First foo attribute here
    pub fn duplicate_attrs(
        &self,
        attr_kind: &str,
        first: &impl syn::spanned::Spanned,
        second: &impl syn::spanned::Spanned,
    ) {
        self.err_span(second.span(), &["Duplicate ", attr_kind, " attribute"].concat());
        self.err_span(first.span(), &["First ", attr_kind, " attribute here"].concat());
    }

    /// Error on literals, expecting attribute syntax.
    pub fn expect_nested_meta<'a>(&self, nm: &'a syn::NestedMeta) -> Option<&'a syn::Meta> {
        match nm {
            syn::NestedMeta::Lit(l) => {
                self.err(l, "Unexpected literal");
                None
            }
            syn::NestedMeta::Meta(m) => Some(m),
        }
    }

    /// Expect a string literal, as in `name = "..."`.
    pub fn expect_lit_str<'a>(&self, lit: &'a syn::Lit) -> Option<&'a syn::LitStr> {
        if let syn::Lit::Str(inner) = lit {
            Some(inner)
        } else {
            self.err(lit, "Expected string literal");
            None
        }
    }

    /// Expect a bare word, as in `skip`.
    pub fn expect_meta_word<'a>(&self, meta: &'a syn::Meta) -> Option<&'a syn::Path> {
        match meta {
            syn::Meta::Path(path) => Some(path),
            _ => self.unexpected_meta("a bare word", meta),
        }
    }

    /// Expect a parenthesized list, as in `argslot(...)`.
    pub fn expect_meta_list<'a>(&self, meta: &'a syn::Meta) -> Option<&'a syn::MetaList> {
        match meta {
            syn::Meta::List(list) => Some(list),
            _ => self.unexpected_meta("a list", meta),
        }
    }

    /// Expect an assignment, as in `name = "..."`.
    pub fn expect_meta_name_value<'a>(
        &self,
        meta: &'a syn::Meta,
    ) -> Option<&'a syn::MetaNameValue> {
        match meta {
            syn::Meta::NameValue(nv) => Some(nv),
            _ => self.unexpected_meta("a `key = value` pair", meta),
        }
    }

    fn unexpected_meta<T>(&self, expected: &str, found: &syn::Meta) -> Option<T> {
        let found_kind = match found {
            syn::Meta::Path(_) => "a bare word",
            syn::Meta::List(_) => "a list",
            syn::Meta::NameValue(_) => "a `key = value` pair",
        };
        let name = found.path().to_token_stream().to_string();
        self.err(
            found,
            &["Expected ", expected, " for `", &name, "`, found ", found_kind].concat(),
        );
        None
    }

    /// Unwrap a `syn::Result`, recording the error if there is one.
    pub fn ok<T>(&self, r: syn::Result<T>) -> Option<T> {
        match r {
            Ok(v) => Some(v),
            Err(e) => {
                self.push(e);
                None
            }
        }
    }

    /// Issue an error relating to a particular `Spanned` structure.
    pub fn err(&self, spanned: &impl syn::spanned::Spanned, msg: &str) {
        self.err_span(spanned.span(), msg);
    }

    /// Issue an error relating to a particular `Span`.
    pub fn err_span(&self, span: Span, msg: &str) {
        self.push(syn::Error::new(span, msg));
    }

    /// Push a `syn::Error` onto the list of errors to issue.
    pub fn push(&self, err: syn::Error) {
        self.errors.borrow_mut().push(err);
    }
}

impl ToTokens for Errors {
    /// Convert the errors into tokens that, when emit, will cause
    /// the user of the macro to receive compiler errors.
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(self.errors.borrow().iter().map(|e| e.to_compile_error()));
    }
}
