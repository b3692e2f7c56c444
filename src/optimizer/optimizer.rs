//! Constant folding, algebraic simplification and dead branch removal.
//!
//! Every rewrite replaces a node with an equivalent one that is no more
//! expensive. Input is always well typed, so nothing here can fail.

use std::rc::Rc;

use log::{debug, trace};

use crate::analyzer::{
    typed_ast::{
        Alternate, BinaryOp, Expr, FunctionDeclaration, IfStatement, Literal, LiteralValue,
        Program, ShortIfStatement, Stmt, UnaryOp,
    },
    types::Type,
};

/// An `if` either survives (with optimized parts) or is replaced by the
/// statements of the branch that always runs.
enum Conditional<T> {
    Kept(T),
    Collapsed(Vec<Stmt>),
}

pub fn optimize(program: Program) -> Program {
    let statements = optimize_block(program.statements);
    debug!("optimized program has {} top-level statements", statements.len());

    Program { statements }
}

pub fn optimize_block(statements: Vec<Stmt>) -> Vec<Stmt> {
    statements.into_iter().flat_map(optimize_stmt).collect()
}

/// Optimizes one statement. Eliminated branches splice their statements
/// into the surrounding sequence, so the result may hold zero or many.
pub fn optimize_stmt(statement: Stmt) -> Vec<Stmt> {
    match statement {
        Stmt::VariableDeclaration {
            variable,
            initializer,
        } => vec![Stmt::VariableDeclaration {
            variable,
            initializer: optimize_expr(initializer),
        }],
        Stmt::FunctionDeclaration(declaration) => {
            vec![Stmt::FunctionDeclaration(FunctionDeclaration {
                fun: declaration.fun,
                params: declaration.params,
                body: optimize_block(declaration.body),
            })]
        }
        Stmt::Print(argument) => vec![Stmt::Print(optimize_expr(argument))],
        Stmt::Return(expression) => vec![Stmt::Return(optimize_tail(expression))],
        Stmt::ShortReturn => vec![Stmt::ShortReturn],
        Stmt::If(statement) => match optimize_if(statement) {
            Conditional::Kept(statement) => vec![Stmt::If(statement)],
            Conditional::Collapsed(statements) => statements,
        },
        Stmt::ShortIf(statement) => match optimize_short_if(statement) {
            Conditional::Kept(statement) => vec![Stmt::ShortIf(statement)],
            Conditional::Collapsed(statements) => statements,
        },
        Stmt::Expression(expression) => vec![Stmt::Expression(optimize_expr(expression))],
    }
}

fn optimize_if(statement: IfStatement) -> Conditional<IfStatement> {
    let test = optimize_expr(statement.test);
    let consequent = optimize_block(statement.consequent);

    let alternate = match statement.alternate {
        Alternate::If(elif) => match optimize_if(*elif) {
            Conditional::Kept(elif) => Alternate::If(Box::new(elif)),
            Conditional::Collapsed(statements) => Alternate::Block(statements),
        },
        Alternate::ShortIf(elif) => match optimize_short_if(*elif) {
            Conditional::Kept(elif) => Alternate::ShortIf(Box::new(elif)),
            Conditional::Collapsed(statements) => Alternate::Block(statements),
        },
        Alternate::Block(statements) => Alternate::Block(optimize_block(statements)),
    };

    match bool_literal(&test) {
        Some(true) => {
            debug!("if test is always true, keeping the consequent");
            Conditional::Collapsed(consequent)
        }
        Some(false) => {
            debug!("if test is always false, keeping the alternate");
            Conditional::Collapsed(match alternate {
                Alternate::If(elif) => vec![Stmt::If(*elif)],
                Alternate::ShortIf(elif) => vec![Stmt::ShortIf(*elif)],
                Alternate::Block(statements) => statements,
            })
        }
        None => Conditional::Kept(IfStatement {
            test,
            consequent,
            alternate,
        }),
    }
}

fn optimize_short_if(statement: ShortIfStatement) -> Conditional<ShortIfStatement> {
    let test = optimize_expr(statement.test);
    let consequent = optimize_block(statement.consequent);

    match bool_literal(&test) {
        Some(true) => Conditional::Collapsed(consequent),
        Some(false) => Conditional::Collapsed(vec![]),
        None => Conditional::Kept(ShortIfStatement { test, consequent }),
    }
}

/// Ordinary bottom-up rewrite of an expression.
pub fn optimize_expr(expr: Expr) -> Expr {
    match expr {
        Expr::Literal(_) | Expr::Variable(_) | Expr::Function(_) => expr,
        Expr::Binary {
            op,
            left,
            right,
            ty,
        } => rewrite_binary(op, optimize_expr(*left), optimize_expr(*right), ty),
        Expr::Unary { op, operand, ty } => rewrite_unary(op, optimize_expr(*operand), ty),
        Expr::List { elements, ty } => Expr::List {
            elements: elements.into_iter().map(optimize_expr).collect(),
            ty,
        },
        Expr::Subscript { list, index, ty } => Expr::Subscript {
            list: Box::new(optimize_expr(*list)),
            index: Box::new(optimize_expr(*index)),
            ty,
        },
        Expr::Call { callee, args, ty } => Expr::Call {
            callee: Box::new(optimize_expr(*callee)),
            args: args.into_iter().map(optimize_expr).collect(),
            ty,
        },
    }
}

/// Rewrite for the operand of a `return`.
///
/// A call in tail position, either the operand itself or a direct operand
/// of it, has its arguments optimized once and is otherwise kept as is.
pub fn optimize_tail(expr: Expr) -> Expr {
    match expr {
        Expr::Call { .. } => optimize_tail_operand(expr),
        Expr::Binary {
            op,
            left,
            right,
            ty,
        } => rewrite_binary(op, optimize_tail_operand(*left), optimize_tail_operand(*right), ty),
        Expr::Unary { op, operand, ty } => rewrite_unary(op, optimize_tail_operand(*operand), ty),
        other => optimize_expr(other),
    }
}

fn optimize_tail_operand(expr: Expr) -> Expr {
    match expr {
        Expr::Call { callee, args, ty } => Expr::Call {
            callee,
            args: args.into_iter().map(optimize_expr).collect(),
            ty,
        },
        other => optimize_expr(other),
    }
}

/// Simplifies a binary node whose operands are already optimized.
fn rewrite_binary(op: BinaryOp, left: Expr, right: Expr, ty: Type) -> Expr {
    match op {
        BinaryOp::And => {
            if bool_literal(&left) == Some(true) {
                return right;
            }
            if bool_literal(&right) == Some(true) || same_subtree(&left, &right) {
                return left;
            }
        }
        BinaryOp::Or => {
            if bool_literal(&left) == Some(false) {
                return right;
            }
            if bool_literal(&right) == Some(false) || same_subtree(&left, &right) {
                return left;
            }
        }
        _ => {
            if let (Some(l), Some(r)) = (number_literal(&left), number_literal(&right)) {
                if let Some(folded) = fold(op, l, r) {
                    debug!("folded {:?} {:?} {:?} into {:?}", l, op, r, folded.value);
                    return Expr::Literal(folded);
                }
            }

            if let Some(simplified) = apply_identity(op, &left, &right) {
                trace!("applied identity for {:?}", op);
                return simplified.resolve(left, right);
            }
        }
    }

    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
        ty,
    }
}

/// What an algebraic identity reduces `left op right` to.
enum Simplified {
    Left,
    Right,
    NegatedRight,
    One,
}

impl Simplified {
    fn resolve(self, left: Expr, right: Expr) -> Expr {
        match self {
            Simplified::Left => left,
            Simplified::Right => right,
            Simplified::NegatedRight => {
                let ty = right.ty().clone();
                Expr::Unary {
                    op: UnaryOp::Negate,
                    operand: Box::new(right),
                    ty,
                }
            }
            Simplified::One => Expr::Literal(match left.ty() {
                Type::Float => Literal::float(1.0),
                _ => Literal::int(1),
            }),
        }
    }
}

fn apply_identity(op: BinaryOp, left: &Expr, right: &Expr) -> Option<Simplified> {
    let simplified = match op {
        BinaryOp::Add if is_zero(left) => Simplified::Right,
        BinaryOp::Add if is_zero(right) => Simplified::Left,
        BinaryOp::Subtract if is_zero(right) => Simplified::Left,
        BinaryOp::Subtract if is_zero(left) => Simplified::NegatedRight,
        BinaryOp::Multiply if is_one(left) => Simplified::Right,
        BinaryOp::Multiply if is_one(right) => Simplified::Left,
        BinaryOp::Multiply if is_zero(left) => Simplified::Left,
        BinaryOp::Multiply if is_zero(right) => Simplified::Right,
        BinaryOp::Divide if is_one(right) => Simplified::Left,
        BinaryOp::Power if is_zero(right) => Simplified::One,
        BinaryOp::Power if is_one(left) => Simplified::Left,
        _ => return None,
    };

    Some(simplified)
}

fn rewrite_unary(op: UnaryOp, operand: Expr, ty: Type) -> Expr {
    if op == UnaryOp::Negate {
        match number_literal(&operand) {
            Some(Number::Int(value)) => {
                if let Some(negated) = value.checked_neg() {
                    return Expr::Literal(Literal::int(negated));
                }
            }
            Some(Number::Float(value)) => return Expr::Literal(Literal::float(-value)),
            None => {}
        }
    }

    Expr::Unary {
        op,
        operand: Box::new(operand),
        ty,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_float(self) -> f64 {
        match self {
            Number::Int(value) => value as f64,
            Number::Float(value) => value,
        }
    }
}

fn number_literal(expr: &Expr) -> Option<Number> {
    match expr {
        Expr::Literal(Literal {
            value: LiteralValue::Int(value),
            ..
        }) => Some(Number::Int(*value)),
        Expr::Literal(Literal {
            value: LiteralValue::Float(value),
            ..
        }) => Some(Number::Float(*value)),
        _ => None,
    }
}

fn bool_literal(expr: &Expr) -> Option<bool> {
    match expr {
        Expr::Literal(Literal {
            value: LiteralValue::Bool(value),
            ..
        }) => Some(*value),
        _ => None,
    }
}

fn is_zero(expr: &Expr) -> bool {
    number_literal(expr).is_some_and(|number| number.as_float() == 0.0)
}

fn is_one(expr: &Expr) -> bool {
    number_literal(expr).is_some_and(|number| number.as_float() == 1.0)
}

/// Literals with equal values, or references to the same entity.
fn same_subtree(left: &Expr, right: &Expr) -> bool {
    match (left, right) {
        (Expr::Literal(left), Expr::Literal(right)) => left == right,
        (Expr::Variable(left), Expr::Variable(right)) => Rc::ptr_eq(left, right),
        (Expr::Function(left), Expr::Function(right)) => Rc::ptr_eq(left, right),
        _ => false,
    }
}

/// Computes `left op right`. Integer operations that overflow, divide by
/// zero or use a negative exponent are not folded.
fn fold(op: BinaryOp, left: Number, right: Number) -> Option<Literal> {
    if let (Number::Int(l), Number::Int(r)) = (left, right) {
        return fold_int(op, l, r);
    }

    let (l, r) = (left.as_float(), right.as_float());
    let literal = match op {
        BinaryOp::Add => Literal::float(l + r),
        BinaryOp::Subtract => Literal::float(l - r),
        BinaryOp::Multiply => Literal::float(l * r),
        BinaryOp::Divide => Literal::float(l / r),
        BinaryOp::Remainder => Literal::float(l % r),
        BinaryOp::Power => Literal::float(l.powf(r)),
        _ => Literal::bool(compare(op, l.partial_cmp(&r))?),
    };

    Some(literal)
}

fn fold_int(op: BinaryOp, l: i64, r: i64) -> Option<Literal> {
    let value = match op {
        BinaryOp::Add => l.checked_add(r)?,
        BinaryOp::Subtract => l.checked_sub(r)?,
        BinaryOp::Multiply => l.checked_mul(r)?,
        BinaryOp::Divide => l.checked_div(r)?,
        BinaryOp::Remainder => l.checked_rem(r)?,
        BinaryOp::Power => l.checked_pow(u32::try_from(r).ok()?)?,
        _ => return Some(Literal::bool(compare(op, Some(l.cmp(&r)))?)),
    };

    Some(Literal::int(value))
}

/// Relational and equality operators over an already computed ordering.
/// An unordered pair (NaN) is unequal to everything.
fn compare(op: BinaryOp, ordering: Option<std::cmp::Ordering>) -> Option<bool> {
    use std::cmp::Ordering::*;

    let result = match op {
        BinaryOp::Equal => ordering == Some(Equal),
        BinaryOp::NotEqual => ordering != Some(Equal),
        BinaryOp::Less => ordering == Some(Less),
        BinaryOp::LessEqual => matches!(ordering, Some(Less | Equal)),
        BinaryOp::Greater => ordering == Some(Greater),
        BinaryOp::GreaterEqual => matches!(ordering, Some(Greater | Equal)),
        _ => return None,
    };

    Some(result)
}
