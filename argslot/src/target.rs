// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Declared-type descriptors for option values and the destinations that
//! receive them.

use {
    crate::error::ConfigError,
    argslot_shared::{Shape, TargetInfo},
    std::any::TypeId,
};

/// A declared type, compared by identity.
#[derive(Clone, Copy, Debug)]
pub struct TypeDesc {
    id: TypeId,
    name: &'static str,
}

impl TypeDesc {
    /// The descriptor for `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self { id: TypeId::of::<T>(), name: std::any::type_name::<T>() }
    }

    /// The type's name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeDesc {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDesc {}

/// What is known about the type of a destination.
///
/// `None` in any position means the type exists but could not be described,
/// e.g. because it mentions a generic parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetShape {
    /// Holds exactly one value.
    Scalar(Option<TypeDesc>),
    /// Holds an ordered collection of values.
    Sequence {
        /// The collection type itself, e.g. `Vec<u32>`.
        whole: Option<TypeDesc>,
        /// The element type, e.g. `u32`.
        element: Option<TypeDesc>,
    },
    /// The type may be known, but not whether it holds one value or several.
    Unclassified(Option<TypeDesc>),
    /// Nothing is known.
    Opaque,
}

impl TargetShape {
    /// The structural shape without type information.
    pub fn shape(&self) -> Shape {
        match self {
            TargetShape::Scalar(_) => Shape::Scalar,
            TargetShape::Sequence { .. } => Shape::Sequence,
            TargetShape::Unclassified(_) => Shape::Unclassified,
            TargetShape::Opaque => Shape::Opaque,
        }
    }
}

/// A destination binding that will receive an option's converted value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    /// The name of the destination, used in diagnostics.
    pub name: &'static str,
    /// The declared type of the destination.
    pub shape: TargetShape,
    /// Whether the declared type is wrapped in `Option`.
    pub nullable: bool,
}

impl Target {
    /// Describe a destination.
    pub const fn new(name: &'static str, shape: TargetShape, nullable: bool) -> Self {
        Self { name, shape, nullable }
    }

    /// A destination holding a single `T`.
    pub fn scalar<T: 'static>(name: &'static str) -> Self {
        Self::new(name, TargetShape::Scalar(Some(TypeDesc::of::<T>())), false)
    }

    /// A destination holding a `Vec<T>`.
    pub fn sequence<T: 'static>(name: &'static str) -> Self {
        Self::new(
            name,
            TargetShape::Sequence {
                whole: Some(TypeDesc::of::<Vec<T>>()),
                element: Some(TypeDesc::of::<T>()),
            },
            false,
        )
    }

    /// A destination whose type is not known at all.
    pub const fn opaque(name: &'static str) -> Self {
        Self::new(name, TargetShape::Opaque, false)
    }

    /// Mark the destination as accepting an absent value.
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// The declared type as far as it is known, for diagnostics.
    pub fn declared_name(&self) -> &'static str {
        match self.shape {
            TargetShape::Scalar(Some(ty))
            | TargetShape::Sequence { whole: Some(ty), .. }
            | TargetShape::Unclassified(Some(ty)) => ty.name(),
            TargetShape::Scalar(None) | TargetShape::Unclassified(None) => "<unknown>",
            TargetShape::Sequence { whole: None, .. } => "<unknown sequence>",
            TargetShape::Opaque => "<opaque>",
        }
    }

    /// A plain description of this destination.
    pub fn info(&self) -> TargetInfo<'static> {
        let (type_name, element_name) = match self.shape {
            TargetShape::Scalar(ty) | TargetShape::Unclassified(ty) => (ty.map(|t| t.name()), None),
            TargetShape::Sequence { whole, element } => {
                (whole.map(|t| t.name()), element.map(|t| t.name()))
            }
            TargetShape::Opaque => (None, None),
        };
        TargetInfo {
            name: self.name,
            shape: self.shape.shape(),
            type_name,
            element_name,
            nullable: self.nullable,
        }
    }

    /// Fail unless this destination might hold a single `value`.
    pub(crate) fn expect_single(&self, value: TypeDesc) -> Result<(), ConfigError> {
        let certain_mismatch = match self.shape {
            TargetShape::Scalar(Some(declared))
            | TargetShape::Sequence { whole: Some(declared), .. }
            | TargetShape::Unclassified(Some(declared)) => declared != value,
            TargetShape::Scalar(None)
            | TargetShape::Sequence { whole: None, .. }
            | TargetShape::Unclassified(None)
            | TargetShape::Opaque => false,
        };
        if certain_mismatch {
            return Err(self.incompatible(value.name().to_owned()));
        }
        Ok(())
    }

    /// Fail unless this destination might hold a sequence of `element`,
    /// handed over as a `sequence`.
    ///
    /// A declared type equal to `sequence` is accepted whatever its shape,
    /// since it may be an alias.
    pub(crate) fn expect_sequence(
        &self,
        element: TypeDesc,
        sequence: TypeDesc,
    ) -> Result<(), ConfigError> {
        let certain_mismatch = match self.shape {
            TargetShape::Scalar(Some(declared)) => declared != sequence,
            TargetShape::Scalar(None) => true,
            TargetShape::Sequence { whole: Some(declared), .. } if declared == sequence => false,
            TargetShape::Sequence { element: Some(declared), .. } => declared != element,
            TargetShape::Sequence { element: None, .. }
            | TargetShape::Unclassified(_)
            | TargetShape::Opaque => false,
        };
        if certain_mismatch {
            return Err(self.incompatible(["Vec<", element.name(), ">"].concat()));
        }
        Ok(())
    }

    fn incompatible(&self, required: String) -> ConfigError {
        tracing::debug!(
            destination = self.name,
            required = required.as_str(),
            declared = self.declared_name(),
            "rejecting incompatible option destination"
        );
        ConfigError::IncompatibleTarget {
            target: self.name.to_owned(),
            required,
            declared: self.declared_name().to_owned(),
        }
    }
}

/// Types that can describe the destinations they offer to option parsers.
///
/// Usually implemented with `#[derive(Targets)]`.
pub trait Targets {
    /// Every destination, in declaration order.
    fn targets() -> Vec<Target>;

    /// The destination called `name`, if there is one.
    fn target(name: &str) -> Option<Target> {
        Self::targets().into_iter().find(|target| target.name == name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_type_desc_equality_ignores_name() {
        assert_eq!(TypeDesc::of::<u32>(), TypeDesc::of::<u32>());
        assert_ne!(TypeDesc::of::<u32>(), TypeDesc::of::<i32>());
        assert_ne!(TypeDesc::of::<Vec<u32>>(), TypeDesc::of::<u32>());
    }

    #[test]
    fn test_expect_single() {
        let ty = TypeDesc::of::<u32>();
        assert!(Target::scalar::<u32>("port").expect_single(ty).is_ok());
        assert!(Target::scalar::<u32>("port").nullable().expect_single(ty).is_ok());
        assert!(Target::scalar::<String>("port").expect_single(ty).is_err());
        assert!(Target::sequence::<u32>("ports").expect_single(ty).is_err());
        assert!(Target::new("port", TargetShape::Scalar(None), false).expect_single(ty).is_ok());
        assert!(Target::opaque("port").expect_single(ty).is_ok());
    }

    #[test]
    fn test_single_value_may_itself_be_a_sequence() {
        let ty = TypeDesc::of::<Vec<u32>>();
        assert!(Target::sequence::<u32>("ports").expect_single(ty).is_ok());
    }

    fn vec_of<T: 'static>() -> (TypeDesc, TypeDesc) {
        (TypeDesc::of::<T>(), TypeDesc::of::<Vec<T>>())
    }

    #[test]
    fn test_expect_sequence() {
        let (ty, seq) = vec_of::<u32>();
        assert!(Target::sequence::<u32>("ports").expect_sequence(ty, seq).is_ok());
        assert!(Target::sequence::<u32>("ports").nullable().expect_sequence(ty, seq).is_ok());
        assert!(Target::sequence::<u8>("ports").expect_sequence(ty, seq).is_err());
        assert!(Target::scalar::<u32>("port").expect_sequence(ty, seq).is_err());
        assert!(Target::new("port", TargetShape::Scalar(None), false)
            .expect_sequence(ty, seq)
            .is_err());
        let unknown_element = TargetShape::Sequence { whole: None, element: None };
        assert!(Target::new("ports", unknown_element, false).expect_sequence(ty, seq).is_ok());
        assert!(Target::opaque("ports").expect_sequence(ty, seq).is_ok());
    }

    #[test]
    fn test_sequence_behind_an_alias() {
        type Ports = Vec<u32>;
        let (ty, seq) = vec_of::<u32>();
        assert!(Target::scalar::<Ports>("ports").expect_sequence(ty, seq).is_ok());
        assert!(Target::scalar::<Vec<u8>>("ports").expect_sequence(ty, seq).is_err());
    }

    #[test]
    fn test_unclassified_is_only_checked_by_identity() {
        #[allow(dead_code)]
        struct Port(u16);
        let declared = TargetShape::Unclassified(Some(TypeDesc::of::<Port>()));
        let port = Target::new("port", declared, false);
        let (ty, seq) = vec_of::<u16>();
        assert!(port.expect_sequence(ty, seq).is_ok());
        assert!(port.expect_single(ty).is_err());
        assert!(port.expect_single(TypeDesc::of::<Port>()).is_ok());

        let unknown = Target::new("port", TargetShape::Unclassified(None), false);
        assert!(unknown.expect_single(ty).is_ok());
        assert!(unknown.expect_sequence(ty, seq).is_ok());
        assert_eq!(unknown.info().shape, Shape::Unclassified);
    }

    #[test]
    fn test_incompatible_message_names_destination_and_type() {
        let (ty, seq) = vec_of::<u32>();
        let err = Target::scalar::<bool>("verbose").expect_sequence(ty, seq).unwrap_err();
        assert_eq!(
            err.to_string(),
            "destination `verbose` must accept `Vec<u32>`, but is declared as `bool`"
        );
    }

    #[test]
    fn test_info() {
        let info = Target::sequence::<u32>("ports").nullable().info();
        assert_eq!(info.name, "ports");
        assert_eq!(info.shape, Shape::Sequence);
        assert_eq!(info.type_name, Some(std::any::type_name::<Vec<u32>>()));
        assert_eq!(info.element_name, Some("u32"));
        assert!(info.nullable);

        let info = Target::opaque("anything").info();
        assert_eq!(info.shape, Shape::Opaque);
        assert_eq!(info.type_name, None);
    }
}
