//! Type annotations in the syntax tree.
//!
//! Annotations are kept exactly as written; the analyzer resolves the
//! names against the standard types in scope.

use std::fmt::Display;

use crate::Span;

use super::ast::TypeAnnotation;

/// A type name such as `int` or `text`, resolved later.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolType {
    pub name: String,
    pub span: Span,
}

/// `T[]`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub underlying: Box<TypeAnnotation>,
    pub span: Span,
}

/// `T?`
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalType {
    pub underlying: Box<TypeAnnotation>,
    pub span: Span,
}

impl Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeAnnotation::Symbol(ty) => write!(f, "{}", ty.name),
            TypeAnnotation::Array(ty) => write!(f, "{}[]", ty.underlying),
            TypeAnnotation::Optional(ty) => write!(f, "{}?", ty.underlying),
        }
    }
}
