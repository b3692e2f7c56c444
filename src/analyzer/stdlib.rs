//! Standard library: type names and intrinsic functions.
//!
//! This data is shared by every compilation. Each compilation seeds its
//! root environment with fresh entities built from it.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::types::Type;

/// A built-in function with a fixed JavaScript spelling and no body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intrinsic {
    Print,
    Sqrt,
    Sin,
    Cos,
    Ln,
    Abs,
    Distance,
}

impl Intrinsic {
    /// Name the intrinsic is declared under.
    pub fn name(&self) -> &'static str {
        match self {
            Intrinsic::Print => "speak",
            Intrinsic::Sqrt => "sqrt",
            Intrinsic::Sin => "sin",
            Intrinsic::Cos => "cos",
            Intrinsic::Ln => "ln",
            Intrinsic::Abs => "abs",
            Intrinsic::Distance => "distance",
        }
    }

    pub fn target(&self) -> &'static str {
        match self {
            Intrinsic::Print => "console.log",
            Intrinsic::Sqrt => "Math.sqrt",
            Intrinsic::Sin => "Math.sin",
            Intrinsic::Cos => "Math.cos",
            Intrinsic::Ln => "Math.log",
            Intrinsic::Abs => "Math.abs",
            Intrinsic::Distance => "Math.hypot",
        }
    }

    pub fn ty(&self) -> Type {
        match self {
            Intrinsic::Print => Type::function(vec![Type::Any], Type::Void),
            Intrinsic::Distance => Type::function(vec![Type::Float, Type::Float], Type::Float),
            _ => Type::function(vec![Type::Float], Type::Float),
        }
    }
}

lazy_static! {
    pub static ref STANDARD_TYPES: HashMap<&'static str, Type> = {
        let mut map = HashMap::new();
        map.insert("int", Type::Int);
        map.insert("float", Type::Float);
        map.insert("boolean", Type::Bool);
        map.insert("bool", Type::Bool);
        map.insert("string", Type::String);
        map.insert("text", Type::String);
        map.insert("void", Type::Void);
        map.insert("any", Type::Any);
        map
    };
    pub static ref INTRINSICS: Vec<Intrinsic> = vec![
        Intrinsic::Print,
        Intrinsic::Sqrt,
        Intrinsic::Sin,
        Intrinsic::Cos,
        Intrinsic::Ln,
        Intrinsic::Abs,
        Intrinsic::Distance,
    ];
}
