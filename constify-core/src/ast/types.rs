//! Qualified type view consumed by the analysis.
//!
//! The analysis never needs a full type system; it needs to answer a small
//! set of questions about a declaration's or expression's type:
//! - is this level const-qualified?
//! - is it a reference or a pointer, and what does it point to?
//! - what is the type with any reference stripped?
//!
//! Front ends lower their own type representation into this view.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A type with an optional const qualifier at its outermost level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualType {
    pub kind: TypeKind,
    /// Const qualification of this level (for `int const` or `int *const`
    /// the outer level, not the pointee).
    pub is_const: bool,
}

/// Structural kind of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    /// A builtin or record type, identified by its printed name.
    Named(String),
    /// Pointer to a pointee type.
    Pointer(Box<QualType>),
    /// Reference to a referent type.
    Reference(Box<QualType>),
}

impl QualType {
    /// A non-const named type.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Named(name.into()),
            is_const: false,
        }
    }

    /// Pointer to the given pointee.
    pub fn pointer(pointee: QualType) -> Self {
        Self {
            kind: TypeKind::Pointer(Box::new(pointee)),
            is_const: false,
        }
    }

    /// Reference to the given referent.
    pub fn reference(referent: QualType) -> Self {
        Self {
            kind: TypeKind::Reference(Box::new(referent)),
            is_const: false,
        }
    }

    /// The same type with this level const-qualified.
    pub fn into_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn is_reference(&self) -> bool {
        matches!(self.kind, TypeKind::Reference(_))
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.kind, TypeKind::Pointer(_))
    }

    /// Const qualification of this level.
    pub fn is_const_qualified(&self) -> bool {
        self.is_const
    }

    /// The pointee of a pointer or reference type.
    pub fn pointee(&self) -> Option<&QualType> {
        match &self.kind {
            TypeKind::Pointer(p) | TypeKind::Reference(p) => Some(p),
            TypeKind::Named(_) => None,
        }
    }

    /// The type with one level of reference stripped. Non-reference types
    /// are their own non-reference view.
    pub fn non_reference(&self) -> &QualType {
        match &self.kind {
            TypeKind::Reference(r) => r,
            _ => self,
        }
    }

    /// True for a reference or pointer whose pointee is not const-qualified:
    /// passing through such a type can mutate the referent.
    pub fn has_non_const_pointee(&self) -> bool {
        self.pointee().is_some_and(|p| !p.is_const_qualified())
    }
}

impl fmt::Display for QualType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Named(name) => {
                if self.is_const {
                    write!(f, "const {}", name)
                } else {
                    write!(f, "{}", name)
                }
            }
            TypeKind::Pointer(p) => {
                write!(f, "{} *", p)?;
                if self.is_const {
                    write!(f, "const")?;
                }
                Ok(())
            }
            TypeKind::Reference(r) => write!(f, "{} &", r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_type_const() {
        let t = QualType::named("int").into_const();
        assert!(t.is_const_qualified());
        assert!(!t.is_reference());
        assert!(!t.is_pointer());
        assert_eq!(t.to_string(), "const int");
    }

    #[test]
    fn test_non_reference_view() {
        let t = QualType::reference(QualType::named("int").into_const());
        assert!(t.is_reference());
        assert!(!t.is_const_qualified());
        assert!(t.non_reference().is_const_qualified());

        let plain = QualType::named("int");
        assert_eq!(plain.non_reference(), &plain);
    }

    #[test]
    fn test_non_const_pointee() {
        let mutable_ref = QualType::reference(QualType::named("int"));
        assert!(mutable_ref.has_non_const_pointee());

        let const_ref = QualType::reference(QualType::named("int").into_const());
        assert!(!const_ref.has_non_const_pointee());

        let mutable_ptr = QualType::pointer(QualType::named("int"));
        assert!(mutable_ptr.has_non_const_pointee());

        let value = QualType::named("int");
        assert!(!value.has_non_const_pointee());
    }

    #[test]
    fn test_display() {
        assert_eq!(QualType::named("Simple").to_string(), "Simple");
        assert_eq!(
            QualType::reference(QualType::named("int")).to_string(),
            "int &"
        );
        assert_eq!(
            QualType::pointer(QualType::named("char").into_const()).to_string(),
            "const char *"
        );
    }
}
