// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Implementation of the `Targets` derive and the `argslot(...)` attributes.
//!
//! For more thorough documentation, see the `argslot` crate itself.

extern crate proc_macro;

use {
    crate::{
        errors::Errors,
        parse_attrs::{reject_type_attrs, FieldAttrs},
    },
    argslot_shared::{is_nullable_wrapper, is_owning_pointer, is_scalar_type, is_sequence_wrapper},
    proc_macro2::{Span, TokenStream, TokenTree},
    quote::{quote, quote_spanned, ToTokens},
    std::collections::HashSet,
    syn::{ext::IdentExt, spanned::Spanned},
};

mod errors;
mod parse_attrs;

/// Entrypoint for `#[derive(Targets)]`.
#[proc_macro_derive(Targets, attributes(argslot))]
pub fn targets_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let ast = syn::parse_macro_input!(input as syn::DeriveInput);
    let gen = impl_targets(&ast);
    gen.into()
}

/// Transform the input into a token stream containing any generated implementations,
/// as well as all errors that occurred.
fn impl_targets(input: &syn::DeriveInput) -> TokenStream {
    let errors = &Errors::default();
    reject_type_attrs(errors, &input.attrs);
    let mut output_tokens = match &input.data {
        syn::Data::Struct(ds) => impl_targets_struct(errors, &input.ident, &input.generics, ds),
        syn::Data::Enum(de) => {
            errors.err(
                &de.enum_token,
                "`#[derive(Targets)]` cannot be applied to enums; only struct fields are destinations",
            );
            TokenStream::new()
        }
        syn::Data::Union(_) => {
            errors.err(input, "`#[derive(Targets)]` cannot be applied to unions");
            TokenStream::new()
        }
    };
    errors.to_tokens(&mut output_tokens);
    output_tokens
}

/// A field of a `#[derive(Targets)]` struct, along with what is statically
/// known about its type.
struct TargetField<'a> {
    /// The destination's name.
    name: String,
    /// The declared type with any `Option` wrapper removed.
    ty: &'a syn::Type,
    /// Set by `#[argslot(opaque)]`.
    opaque: bool,
    nullable: bool,
}

impl<'a> TargetField<'a> {
    fn new(errors: &Errors, field: &'a syn::Field) -> Option<Self> {
        let attrs = FieldAttrs::parse(errors, field);
        if attrs.skip.is_some() {
            return None;
        }

        let ident = field.ident.as_ref()?;
        let name = match &attrs.name {
            Some(name) => name.value(),
            None => ident.unraw().to_string(),
        };

        let (ty, nullable) = match ty_inner(is_nullable_wrapper, &field.ty) {
            Some(inner) => (inner, true),
            None => (&field.ty, false),
        };

        Some(TargetField { name, ty, opaque: attrs.opaque.is_some(), nullable })
    }
}

/// Implements `Targets` for a `#[derive(Targets)]` struct.
fn impl_targets_struct(
    errors: &Errors,
    name: &syn::Ident,
    generics: &syn::Generics,
    ds: &syn::DataStruct,
) -> TokenStream {
    let fields = match &ds.fields {
        syn::Fields::Named(fields) => fields,
        syn::Fields::Unnamed(_) => {
            errors.err(
                &ds.struct_token,
                "`#[derive(Targets)]` is not currently supported on tuple structs",
            );
            return TokenStream::new();
        }
        syn::Fields::Unit => {
            errors.err(&ds.struct_token, "`#[derive(Targets)]` cannot be applied to unit structs");
            return TokenStream::new();
        }
    };

    let fields: Vec<_> =
        fields.named.iter().filter_map(|field| TargetField::new(errors, field)).collect();
    ensure_unique_names(errors, &fields);

    let opaque = Opaque::new(generics);
    let impl_span = Span::call_site();
    let targets = fields.iter().map(|field| {
        let name = &field.name;
        let nullable = field.nullable;
        let kind = if field.opaque { Kind::Opaque } else { opaque.classify(field.ty) };
        let shape = match kind {
            Kind::Scalar => {
                let ty = type_desc(&opaque, field.ty);
                quote! { argslot::TargetShape::Scalar(#ty) }
            }
            Kind::Sequence(element) => {
                let whole = type_desc(&opaque, field.ty);
                let element = type_desc(&opaque, element);
                quote! { argslot::TargetShape::Sequence { whole: #whole, element: #element } }
            }
            Kind::Unclassified => {
                let ty = type_desc(&opaque, field.ty);
                quote! { argslot::TargetShape::Unclassified(#ty) }
            }
            Kind::Opaque => quote! { argslot::TargetShape::Opaque },
        };
        quote_spanned! { field.ty.span() =>
            argslot::Target::new(#name, #shape, #nullable)
        }
    });

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    quote_spanned! { impl_span =>
        #[automatically_derived]
        impl #impl_generics argslot::Targets for #name #ty_generics #where_clause {
            fn targets() -> ::std::vec::Vec<argslot::Target> {
                ::std::vec![ #( #targets, )* ]
            }
        }
    }
}

/// Destination names are looked up by name, so two fields must not share one.
fn ensure_unique_names(errors: &Errors, fields: &[TargetField<'_>]) {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            errors.err(
                field.ty,
                &["Duplicate destination name `", &field.name, "`"].concat(),
            );
        }
    }
}

/// `Some(TypeDesc::of::<ty>())`, or `None` if `ty` cannot be named as a
/// `'static` type from inside the generated impl.
fn type_desc(opaque: &Opaque, ty: &syn::Type) -> TokenStream {
    if opaque.mentions(ty) {
        quote! { ::std::option::Option::None }
    } else {
        quote_spanned! { ty.span() =>
            ::std::option::Option::Some(argslot::TypeDesc::of::<#ty>())
        }
    }
}

/// Whether a field type holds one value, several, or cannot be told.
enum Kind<'a> {
    Scalar,
    /// Holds several values of the given element type.
    Sequence(&'a syn::Type),
    Unclassified,
    /// May be instantiated with anything.
    Opaque,
}

/// Names that make a field type impossible to describe with a `TypeId`:
/// the struct's own generic parameters, and any lifetime but `'static`.
struct Opaque {
    idents: HashSet<String>,
}

impl Opaque {
    fn new(generics: &syn::Generics) -> Self {
        let mut idents: HashSet<String> =
            generics.type_params().map(|param| param.ident.to_string()).collect();
        if !generics.params.is_empty() {
            idents.insert("Self".to_owned());
        }
        Opaque { idents }
    }

    /// Whether `ty` is a generic parameter itself (or a projection from one),
    /// rather than a concrete type constructor applied to it.
    fn is_bare(&self, ty: &syn::Type) -> bool {
        match ty {
            syn::Type::Path(path) => {
                path.qself.is_some()
                    || path
                        .path
                        .segments
                        .first()
                        .map_or(false, |first| self.idents.contains(&first.ident.to_string()))
            }
            syn::Type::Paren(paren) => self.is_bare(&paren.elem),
            syn::Type::Group(group) => self.is_bare(&group.elem),
            syn::Type::ImplTrait(_)
            | syn::Type::Infer(_)
            | syn::Type::Macro(_)
            | syn::Type::Verbatim(_) => true,
            _ => false,
        }
    }

    fn classify<'a>(&self, ty: &'a syn::Type) -> Kind<'a> {
        // A bare `T` may turn out to be anything, including a sequence.
        if self.is_bare(ty) {
            return Kind::Opaque;
        }
        match ty {
            syn::Type::Array(array) => Kind::Sequence(&array.elem),
            syn::Type::Slice(slice) => Kind::Sequence(&slice.elem),
            syn::Type::Reference(reference) => self.classify_pointee(&reference.elem),
            syn::Type::Paren(paren) => self.classify(&paren.elem),
            syn::Type::Group(group) => self.classify(&group.elem),
            syn::Type::Path(path) => {
                if let Some(element) = ty_inner(is_sequence_wrapper, ty) {
                    return Kind::Sequence(element);
                }
                if let Some(pointee) = ty_inner(is_owning_pointer, ty) {
                    return self.classify_pointee(pointee);
                }
                match path.path.segments.last() {
                    Some(last)
                        if last.arguments.is_empty()
                            && is_scalar_type(&last.ident.to_string()) =>
                    {
                        Kind::Scalar
                    }
                    _ => Kind::Unclassified,
                }
            }
            _ => Kind::Unclassified,
        }
    }

    /// A reference or owning pointer holds whatever it points to.
    fn classify_pointee<'a>(&self, pointee: &'a syn::Type) -> Kind<'a> {
        match self.classify(pointee) {
            Kind::Opaque => Kind::Unclassified,
            kind => kind,
        }
    }

    fn mentions(&self, ty: &syn::Type) -> bool {
        self.mentions_in(ty.to_token_stream())
    }

    fn mentions_in(&self, tokens: TokenStream) -> bool {
        let mut lifetime = false;
        for tree in tokens {
            match tree {
                TokenTree::Group(group) => {
                    if self.mentions_in(group.stream()) {
                        return true;
                    }
                }
                TokenTree::Punct(punct) => lifetime = punct.as_char() == '\'',
                TokenTree::Ident(ident) => {
                    if lifetime && ident != "static" {
                        return true;
                    }
                    if ident == "impl" || self.idents.contains(&ident.to_string()) {
                        return true;
                    }
                    lifetime = false;
                }
                TokenTree::Literal(_) => lifetime = false,
            }
        }
        false
    }
}

/// Returns `Some(T)` if a type is `W<T>` where `W` is accepted by `is_wrapper`.
fn ty_inner<'a>(is_wrapper: fn(&str) -> bool, ty: &'a syn::Type) -> Option<&'a syn::Type> {
    let path = if let syn::Type::Path(path) = ty { path } else { return None };
    if path.qself.is_some() {
        return None;
    }
    let last_segment = path.path.segments.last()?;
    if !is_wrapper(&last_segment.ident.to_string()) {
        return None;
    }
    if let syn::PathArguments::AngleBracketed(gen_args) = &last_segment.arguments {
        if let syn::GenericArgument::Type(ty) = gen_args.args.first()? {
            return Some(ty);
        }
    }
    None
}
