use crate::{lexer::tokens::Token, Span};

use super::ast::Expr;

// LITERALS

/// Numeric literal. Integers are written without a fraction or exponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    Int(i64),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberExpr {
    pub value: NumberValue,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

/// `truth` or `untruth`
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    pub value: bool,
    pub span: Span,
}

/// A bare name in value position.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

// COMPLEX

/// Infix operation. `operator` is the token as written (`plus`, `??`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub span: Span,
}

/// `!x` or `-x`
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub operator: Token,
    pub right_expr: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

/// `list[index]`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub list: Box<Expr>,
    pub index: Box<Expr>,
    pub span: Span,
}

/// `[a, b, c]`
#[derive(Debug, Clone, PartialEq)]
pub struct ListExpr {
    pub elements: Vec<Expr>,
    pub span: Span,
}
