use crate::Span;

use super::{
    expressions::{
        BinaryExpr, BooleanExpr, CallExpr, IndexExpr, ListExpr, NumberExpr, PrefixExpr,
        StringExpr, SymbolExpr,
    },
    statements::{ConfessStmt, ExpressionStmt, FnDeclStmt, IfStmt, SpeakStmt, VarDeclStmt},
    types::{ArrayType, OptionalType, SymbolType},
};

/// Root of the syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    FnDecl(FnDeclStmt),
    If(IfStmt),
    Speak(SpeakStmt),
    Confess(ConfessStmt),
    Expression(ExpressionStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::FnDecl(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::Speak(stmt) => &stmt.span,
            Stmt::Confess(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(NumberExpr),
    String(StringExpr),
    Boolean(BooleanExpr),
    Symbol(SymbolExpr),
    Binary(BinaryExpr),
    Prefix(PrefixExpr),
    Call(CallExpr),
    Index(IndexExpr),
    List(ListExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Number(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
            Expr::Boolean(expr) => &expr.span,
            Expr::Symbol(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Prefix(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
            Expr::Index(expr) => &expr.span,
            Expr::List(expr) => &expr.span,
        }
    }
}

/// A type annotation as written in a function signature.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeAnnotation {
    Symbol(SymbolType),
    Array(ArrayType),
    Optional(OptionalType),
}

impl TypeAnnotation {
    pub fn get_span(&self) -> &Span {
        match self {
            TypeAnnotation::Symbol(ty) => &ty.span,
            TypeAnnotation::Array(ty) => &ty.span,
            TypeAnnotation::Optional(ty) => &ty.span,
        }
    }
}
