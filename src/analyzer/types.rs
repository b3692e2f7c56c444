//! The static types of NewLang values.

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Int,
    Float,
    Bool,
    String,
    Void,
    Any,
    List(Box<Type>),
    Optional(Box<Type>),
    Function(Vec<Type>, Box<Type>),
}

impl Type {
    pub fn list(base: Type) -> Type {
        Type::List(Box::new(base))
    }

    pub fn optional(base: Type) -> Type {
        Type::Optional(Box::new(base))
    }

    pub fn function(params: Vec<Type>, return_type: Type) -> Type {
        Type::Function(params, Box::new(return_type))
    }

    /// Spelling used in diagnostics: `int`, `boolean`, `float[]`, `string?`,
    /// `(int, float) -> void`.
    pub fn describe(&self) -> String {
        match self {
            Type::Int => "int".to_string(),
            Type::Float => "float".to_string(),
            Type::Bool => "boolean".to_string(),
            Type::String => "string".to_string(),
            Type::Void => "void".to_string(),
            Type::Any => "any".to_string(),
            Type::List(base) => format!("{}[]", base.describe()),
            Type::Optional(base) => format!("{}?", base.describe()),
            Type::Function(params, return_type) => {
                let params = params
                    .iter()
                    .map(|param| param.describe())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("({}) -> {}", params, return_type.describe())
            }
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    pub fn is_numeric_or_string(&self) -> bool {
        matches!(self, Type::Int | Type::Float | Type::String)
    }

    /// Whether a value of type `self` may stand where `target` is expected.
    ///
    /// A bare value widens to an optional of its type, never the reverse.
    pub fn is_equivalent_to(&self, target: &Type) -> bool {
        match (self, target) {
            (Type::Optional(from), Type::Optional(to)) if from.is_equivalent_to(to) => true,
            (Type::List(from), Type::List(to)) => from.is_equivalent_to(to),
            (from, Type::Optional(to)) if from.is_equivalent_to(to) => true,
            (Type::Function(from_params, from_return), Type::Function(to_params, to_return)) => {
                from_params == to_params && from_return == to_return
            }
            (from, to) => from == to,
        }
    }

    /// Equivalence, plus anything may be given to `any`.
    pub fn is_assignable_to(&self, target: &Type) -> bool {
        *target == Type::Any || self.is_equivalent_to(target)
    }

    /// Element type of a list, if this is one.
    pub fn list_base(&self) -> Option<&Type> {
        match self {
            Type::List(base) => Some(base),
            _ => None,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}
