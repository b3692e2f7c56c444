use crate::{lexer::tokens::TokenKind, Span};

use super::ast::{Expr, Stmt, TypeAnnotation};

/// `{ ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// `newnum x is 5`, `newtext s is "hi" ?`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    /// One of `NewNum`, `NewText`, `NewBool`, `NewList`
    pub keyword: TokenKind,
    pub identifier: String,
    pub identifier_span: Span,
    pub assigned_value: Expr,
    /// Set by a trailing `?`
    pub optional: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeAnnotation,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub identifier: String,
    pub identifier_span: Span,
    pub parameters: Vec<Parameter>,
    pub return_type: TypeAnnotation,
    pub body: BlockStmt,
    pub span: Span,
}

/// `if`, with any `elif` parts nested in `else_body`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: BlockStmt,
    pub else_body: Option<ElseClause>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElseClause {
    /// `elif ...`
    If(Box<IfStmt>),
    /// `else { ... }`
    Block(BlockStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeakStmt {
    pub value: Expr,
    pub span: Span,
}

/// `confess` returns from the enclosing function.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfessStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}
