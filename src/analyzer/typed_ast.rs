//! The analyzed program.
//!
//! Every expression knows its type. Declared names are resolved to shared
//! entities, so two references to the same variable hold the same `Rc`.

use std::rc::Rc;

use crate::lexer::tokens::TokenKind;

use super::{stdlib::Intrinsic, types::Type};

/// A declared variable or parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub mutable: bool,
    pub ty: Type,
}

/// A user function or an intrinsic. `ty` is always `Type::Function`.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub ty: Type,
    pub intrinsic: Option<Intrinsic>,
}

impl Function {
    pub fn param_types(&self) -> &[Type] {
        match &self.ty {
            Type::Function(params, _) => params,
            _ => &[],
        }
    }

    pub fn return_type(&self) -> &Type {
        match &self.ty {
            Type::Function(_, return_type) => return_type,
            _ => &Type::Void,
        }
    }
}

/// What a name in scope refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Variable(Rc<Variable>),
    Function(Rc<Function>),
    Type(Type),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VariableDeclaration {
        variable: Rc<Variable>,
        initializer: Expr,
    },
    FunctionDeclaration(FunctionDeclaration),
    Print(Expr),
    Return(Expr),
    ShortReturn,
    If(IfStatement),
    ShortIf(ShortIfStatement),
    Expression(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub fun: Rc<Function>,
    pub params: Vec<Rc<Variable>>,
    pub body: Vec<Stmt>,
}

/// `if` with an `elif` or `else` part.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub test: Expr,
    pub consequent: Vec<Stmt>,
    pub alternate: Alternate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Alternate {
    If(Box<IfStatement>),
    ShortIf(Box<ShortIfStatement>),
    Block(Vec<Stmt>),
}

/// `if` or `elif` with nothing after it.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortIfStatement {
    pub test: Expr,
    pub consequent: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// A literal value together with its type.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: LiteralValue,
    pub ty: Type,
}

impl Literal {
    pub fn bool(value: bool) -> Self {
        Literal {
            value: LiteralValue::Bool(value),
            ty: Type::Bool,
        }
    }

    pub fn int(value: i64) -> Self {
        Literal {
            value: LiteralValue::Int(value),
            ty: Type::Int,
        }
    }

    pub fn float(value: f64) -> Self {
        Literal {
            value: LiteralValue::Float(value),
            ty: Type::Float,
        }
    }

    pub fn string(value: String) -> Self {
        Literal {
            value: LiteralValue::String(value),
            ty: Type::String,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    Coalesce,
    Or,
    And,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Power,
    Intrinsic(Intrinsic),
}

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::QuestionQuestion => Some(BinaryOp::Coalesce),
            TokenKind::Or => Some(BinaryOp::Or),
            TokenKind::And => Some(BinaryOp::And),
            TokenKind::Is => Some(BinaryOp::Equal),
            TokenKind::Unis => Some(BinaryOp::NotEqual),
            TokenKind::Less => Some(BinaryOp::Less),
            TokenKind::LessIs => Some(BinaryOp::LessEqual),
            TokenKind::More => Some(BinaryOp::Greater),
            TokenKind::MoreIs => Some(BinaryOp::GreaterEqual),
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Subtract),
            TokenKind::Multiply => Some(BinaryOp::Multiply),
            TokenKind::Divide => Some(BinaryOp::Divide),
            TokenKind::Remain => Some(BinaryOp::Remainder),
            TokenKind::Exp => Some(BinaryOp::Power),
            _ => None,
        }
    }

    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp {
    Not,
    Negate,
    Intrinsic(Intrinsic),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Variable(Rc<Variable>),
    Function(Rc<Function>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        ty: Type,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        ty: Type,
    },
    List {
        elements: Vec<Expr>,
        ty: Type,
    },
    Subscript {
        list: Box<Expr>,
        index: Box<Expr>,
        ty: Type,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        ty: Type,
    },
}

impl Expr {
    pub fn ty(&self) -> &Type {
        match self {
            Expr::Literal(literal) => &literal.ty,
            Expr::Variable(variable) => &variable.ty,
            Expr::Function(function) => &function.ty,
            Expr::Binary { ty, .. }
            | Expr::Unary { ty, .. }
            | Expr::List { ty, .. }
            | Expr::Subscript { ty, .. }
            | Expr::Call { ty, .. } => ty,
        }
    }
}
