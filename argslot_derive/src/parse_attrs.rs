// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::errors::Errors;

/// Attributes applied to a field of a `#![derive(Targets)]` struct.
#[derive(Default)]
pub struct FieldAttrs {
    /// `#[argslot(skip)]`: the field is not a destination.
    pub skip: Option<syn::Path>,
    /// `#[argslot(opaque)]`: describe the field as having an unknown type.
    pub opaque: Option<syn::Path>,
    /// `#[argslot(name = "...")]`: the destination's name, instead of the field name.
    pub name: Option<syn::LitStr>,
}

impl FieldAttrs {
    pub fn parse(errors: &Errors, field: &syn::Field) -> Self {
        let mut this = Self::default();

        for attr in &field.attrs {
            let ml = if let Some(ml) = argslot_attr_to_meta_list(errors, attr) {
                ml
            } else {
                continue;
            };

            for nested in ml {
                let meta =
                    if let Some(m) = errors.expect_nested_meta(&nested) { m } else { continue };

                let name = meta.path();
                if name.is_ident("skip") {
                    if let Some(path) = errors.expect_meta_word(meta) {
                        parse_attr_flag(errors, &mut this.skip, path, "skip");
                    }
                } else if name.is_ident("opaque") {
                    if let Some(path) = errors.expect_meta_word(meta) {
                        parse_attr_flag(errors, &mut this.opaque, path, "opaque");
                    }
                } else if name.is_ident("name") {
                    if let Some(m) = errors.expect_meta_name_value(meta) {
                        parse_attr_single_string(errors, m, "name", &mut this.name);
                    }
                } else {
                    errors.err(
                        meta,
                        concat!(
                            "Invalid field-level `argslot` attribute\n",
                            "Expected one of: `name`, `opaque`, `skip`",
                        ),
                    );
                }
            }
        }

        if let (Some(skip), Some(opaque)) = (&this.skip, &this.opaque) {
            errors.err(opaque, "`opaque` has no effect on a field marked `skip`");
            errors.err(skip, "Field marked `skip` here");
        }

        this
    }
}

/// Checks that a type-level `#[argslot(...)]` attribute is not present, since
/// none are supported yet.
pub fn reject_type_attrs(errors: &Errors, attrs: &[syn::Attribute]) {
    for attr in attrs {
        if is_argslot_attr(attr) {
            errors.err(attr, "Type-level `argslot` attributes are not supported");
        }
    }
}

fn parse_attr_flag(errors: &Errors, slot: &mut Option<syn::Path>, path: &syn::Path, kind: &str) {
    if let Some(first) = slot {
        errors.duplicate_attrs(kind, first, path);
    } else {
        *slot = Some(path.clone());
    }
}

fn parse_attr_single_string(
    errors: &Errors,
    m: &syn::MetaNameValue,
    name: &str,
    slot: &mut Option<syn::LitStr>,
) {
    if let Some(first) = slot {
        errors.duplicate_attrs(name, first, m);
    } else if let Some(lit_str) = errors.expect_lit_str(&m.lit) {
        if lit_str.value().is_empty() {
            errors.err(lit_str, "Destination names must not be empty");
        }
        *slot = Some(lit_str.clone());
    }
}

fn is_argslot_attr(attr: &syn::Attribute) -> bool {
    attr.path.segments.len() == 1 && attr.path.segments[0].ident == "argslot"
}

/// Returns the nested meta items of an `#[argslot(...)]` attribute, or `None`
/// for attributes belonging to someone else.
fn argslot_attr_to_meta_list(
    errors: &Errors,
    attr: &syn::Attribute,
) -> Option<impl IntoIterator<Item = syn::NestedMeta>> {
    if !is_argslot_attr(attr) {
        return None;
    }
    let ml = errors.ok(attr.parse_meta())?;
    let ml = errors.expect_meta_list(&ml)?;
    Some(ml.nested.clone())
}
