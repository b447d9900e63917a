// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Shared functionality between argslot_derive and the argslot runtime.
//!
//! This library is intended only for internal use by these two crates.

/// Type constructors treated as "may be absent" wrappers around a destination.
pub const NULLABLE_WRAPPERS: &[&str] = &["Option"];

/// Type constructors treated as sequence destinations.
///
/// Matched against the last path segment of a field type, so both `Vec<T>`
/// and `std::vec::Vec<T>` are recognized.
pub const SEQUENCE_WRAPPERS: &[&str] =
    &["Vec", "VecDeque", "LinkedList", "BTreeSet", "HashSet", "BinaryHeap"];

/// Pointer types that hold whatever their single type argument holds.
pub const OWNING_POINTERS: &[&str] = &["Box", "Rc", "Arc"];

/// Types known to hold exactly one value, matched like [`SEQUENCE_WRAPPERS`].
pub const SCALAR_TYPES: &[&str] = &[
    "bool", "char", "str", "String", "OsStr", "OsString", "Path", "PathBuf", "i8", "i16", "i32",
    "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize", "f32", "f64",
];

/// Returns whether `ident` names one of the [`SEQUENCE_WRAPPERS`].
pub fn is_sequence_wrapper(ident: &str) -> bool {
    SEQUENCE_WRAPPERS.contains(&ident)
}

/// Returns whether `ident` names one of the [`OWNING_POINTERS`].
pub fn is_owning_pointer(ident: &str) -> bool {
    OWNING_POINTERS.contains(&ident)
}

/// Returns whether `ident` names one of the [`SCALAR_TYPES`].
pub fn is_scalar_type(ident: &str) -> bool {
    SCALAR_TYPES.contains(&ident)
}

/// Returns whether `ident` names one of the [`NULLABLE_WRAPPERS`].
pub fn is_nullable_wrapper(ident: &str) -> bool {
    NULLABLE_WRAPPERS.contains(&ident)
}

/// The structural shape of a destination binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Shape {
    /// Holds a single value.
    Scalar,
    /// Holds an ordered collection of values.
    Sequence,
    /// The type may be known, but not whether it holds one value or several.
    Unclassified,
    /// Nothing is known about the destination.
    Opaque,
}

/// Information about a destination binding.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TargetInfo<'a> {
    /// The name of the destination, usually a struct field.
    pub name: &'a str,
    /// The shape of the destination.
    pub shape: Shape,
    /// The declared type, if it is known.
    pub type_name: Option<&'a str>,
    /// For sequences, the declared element type, if it is known.
    pub element_name: Option<&'a str>,
    /// Whether the destination may be left empty.
    pub nullable: bool,
}

/// Information about an option parser.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParserInfo<'a> {
    /// The number of value tokens a single occurrence requires.
    pub arity: usize,
    /// The name of the type each value token is converted into.
    pub value_type: &'a str,
    /// Whether the usage text should mark the option as taking several values.
    pub repeatable: bool,
}
