//! Unit tests for the parser module.

use pretty_assertions::assert_eq;

use super::parser::parse;
use crate::{
    ast::{
        ast::{Expr, Program, Stmt, TypeAnnotation},
        expressions::NumberValue,
        statements::ElseClause,
    },
    errors::errors::Error,
    lexer::{lexer::tokenize, tokens::TokenKind},
};

fn parse_source(source: &str) -> Result<Program, Error> {
    parse(tokenize(source)?)
}

/// Renders an expression with explicit grouping, for precedence checks.
fn shape(expr: &Expr) -> String {
    match expr {
        Expr::Number(number) => match number.value {
            NumberValue::Int(value) => value.to_string(),
            NumberValue::Float(value) => format!("{:?}", value),
        },
        Expr::String(string) => format!("{:?}", string.value),
        Expr::Boolean(boolean) => boolean.value.to_string(),
        Expr::Symbol(symbol) => symbol.value.clone(),
        Expr::Binary(binary) => format!(
            "({} {} {})",
            shape(&binary.left),
            binary.operator.value,
            shape(&binary.right)
        ),
        Expr::Prefix(prefix) => format!("({}{})", prefix.operator.value, shape(&prefix.right_expr)),
        Expr::Call(call) => format!(
            "{}({})",
            shape(&call.callee),
            call.arguments.iter().map(shape).collect::<Vec<_>>().join(", ")
        ),
        Expr::Index(index) => format!("{}[{}]", shape(&index.list), shape(&index.index)),
        Expr::List(list) => format!(
            "[{}]",
            list.elements.iter().map(shape).collect::<Vec<_>>().join(", ")
        ),
    }
}

fn expression_shape(source: &str) -> String {
    let program = parse_source(source).unwrap();
    match &program.statements[0] {
        Stmt::Expression(stmt) => shape(&stmt.expression),
        other => panic!("expected an expression statement, found {:?}", other),
    }
}

#[test]
fn test_parse_variable_declarations() {
    let program = parse_source(
        "newnum x is 42\nnewtext s is \"hi\"\nnewbool b is truth\nnewlist l is [1, 2]",
    )
    .unwrap();

    assert_eq!(program.statements.len(), 4);
    let Stmt::VarDecl(decl) = &program.statements[0] else {
        panic!("expected a declaration");
    };
    assert_eq!(decl.keyword, TokenKind::NewNum);
    assert_eq!(decl.identifier, "x");
    assert!(!decl.optional);
}

#[test]
fn test_parse_optional_marker() {
    let program = parse_source("newnum x is 5 ?").unwrap();

    let Stmt::VarDecl(decl) = &program.statements[0] else {
        panic!("expected a declaration");
    };
    assert!(decl.optional);
}

#[test]
fn test_parse_function_declaration() {
    let program =
        parse_source("newfunction add(a: int, b: int[]?) : float { confess a plus 1 }").unwrap();

    let Stmt::FnDecl(function) = &program.statements[0] else {
        panic!("expected a function");
    };
    assert_eq!(function.identifier, "add");
    assert_eq!(function.parameters.len(), 2);
    assert_eq!(function.parameters[1].ty.to_string(), "int[]?");
    assert!(matches!(function.return_type, TypeAnnotation::Symbol(_)));
    assert_eq!(function.body.body.len(), 1);
}

#[test]
fn test_parse_function_without_parameters() {
    assert!(parse_source("newfunction f() : void { }").is_ok());
}

#[test]
fn test_parse_if_elif_else_nests_right() {
    let program =
        parse_source("if a { speak 1 } elif b { speak 2 } elif c { speak 3 } else { speak 4 }")
            .unwrap();

    let Stmt::If(stmt) = &program.statements[0] else {
        panic!("expected an if statement");
    };
    let Some(ElseClause::If(second)) = &stmt.else_body else {
        panic!("expected elif");
    };
    let Some(ElseClause::If(third)) = &second.else_body else {
        panic!("expected elif");
    };
    assert!(matches!(third.else_body, Some(ElseClause::Block(_))));
}

#[test]
fn test_parse_short_if() {
    let program = parse_source("if x { speak 1 }").unwrap();

    let Stmt::If(stmt) = &program.statements[0] else {
        panic!("expected an if statement");
    };
    assert!(stmt.else_body.is_none());
}

#[test]
fn test_confess_value_must_share_the_line() {
    let program = parse_source("newfunction f() : void {\n  confess\n  g()\n}").unwrap();

    let Stmt::FnDecl(function) = &program.statements[0] else {
        panic!("expected a function");
    };
    assert_eq!(function.body.body.len(), 2);
    let Stmt::Confess(confess) = &function.body.body[0] else {
        panic!("expected confess");
    };
    assert!(confess.value.is_none());

    let program = parse_source("newfunction f() : int { confess g() }").unwrap();
    let Stmt::FnDecl(function) = &program.statements[0] else {
        panic!("expected a function");
    };
    let Stmt::Confess(confess) = &function.body.body[0] else {
        panic!("expected confess");
    };
    assert!(confess.value.is_some());
}

#[test]
fn test_semicolons_are_optional() {
    let with = parse_source("speak 1; speak 2;;").unwrap();
    let without = parse_source("speak 1 speak 2").unwrap();

    assert_eq!(with.statements.len(), 2);
    assert_eq!(without.statements.len(), 2);
}

#[test]
fn test_precedence() {
    assert_eq!(expression_shape("1 plus 2 multiply 3"), "(1 plus (2 multiply 3))");
    assert_eq!(expression_shape("1 minus 2 minus 3"), "((1 minus 2) minus 3)");
    assert_eq!(expression_shape("a or b and c"), "(a or (b and c))");
    assert_eq!(expression_shape("a plus 1 less b"), "((a plus 1) less b)");
    assert_eq!(expression_shape("x is 1 and y unis 2"), "((x is 1) and (y unis 2))");
}

#[test]
fn test_exponent_is_right_associative_and_binds_tighter_than_prefix() {
    assert_eq!(expression_shape("2 exp 3 exp 2"), "(2 exp (3 exp 2))");
    assert_eq!(expression_shape("-2 exp 2"), "(-(2 exp 2))");
    assert_eq!(expression_shape("2 exp -1"), "(2 exp (-1))");
}

#[test]
fn test_unwrap_else_is_right_associative() {
    assert_eq!(expression_shape("a ?? b ?? c"), "(a ?? (b ?? c))");
    assert_eq!(expression_shape("a ?? b or c"), "(a ?? (b or c))");
}

#[test]
fn test_postfix_expressions() {
    assert_eq!(expression_shape("f(1, x)[0]"), "f(1, x)[0]");
    assert_eq!(expression_shape("!f()"), "(!f())");
    assert_eq!(expression_shape("[1, [2]][1][0]"), "[1, [2]][1][0]");
    assert_eq!(expression_shape("(1 plus 2) multiply 3"), "((1 plus 2) multiply 3)");
}

#[test]
fn test_number_literals() {
    assert_eq!(expression_shape("7"), "7");
    assert_eq!(expression_shape("7.5"), "7.5");
    assert_eq!(expression_shape("1e3"), "1000.0");
}

#[test]
fn test_comparisons_do_not_chain() {
    let error = parse_source("a less b less c").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().column, 10);
}

#[test]
fn test_missing_identifier_in_declaration() {
    let error = parse_source("newnum is 5").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().column, 8);
}

#[test]
fn test_unclosed_block() {
    let error = parse_source("if x {\n speak 1\n").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().line, 3);
}

#[test]
fn test_unexpected_token_position() {
    let error = parse_source("newnum x is 1\nspeak )").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_position().line, 2);
    assert_eq!(error.get_position().column, 7);
    assert_eq!(error.to_string(), "Line 2, col 7: Unexpected token \")\"");
}

#[test]
fn test_integer_out_of_range() {
    let error = parse_source("speak 99999999999999999999").unwrap_err();

    assert_eq!(error.get_error_name(), "NumberParseError");
}

#[test]
fn test_missing_return_type() {
    let error = parse_source("newfunction f() { }").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}
