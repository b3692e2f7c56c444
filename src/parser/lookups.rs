use std::collections::HashMap;

use crate::{
    ast::ast::{Expr, Stmt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, weakest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Coalesce,
    LogicalOr,
    LogicalAnd,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Power,
    Call,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    parser.led(TokenKind::QuestionQuestion, BindingPower::Coalesce, parse_coalesce_expr);

    // Logical
    parser.led(TokenKind::Or, BindingPower::LogicalOr, parse_binary_expr);
    parser.led(TokenKind::And, BindingPower::LogicalAnd, parse_binary_expr);

    // Relational
    parser.led(TokenKind::Less, BindingPower::Relational, parse_relational_expr);
    parser.led(TokenKind::LessIs, BindingPower::Relational, parse_relational_expr);
    parser.led(TokenKind::More, BindingPower::Relational, parse_relational_expr);
    parser.led(TokenKind::MoreIs, BindingPower::Relational, parse_relational_expr);
    parser.led(TokenKind::Is, BindingPower::Relational, parse_relational_expr);
    parser.led(TokenKind::Unis, BindingPower::Relational, parse_relational_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Minus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Multiply, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Divide, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Remain, BindingPower::Multiplicative, parse_binary_expr);

    parser.led(TokenKind::Exp, BindingPower::Power, parse_power_expr);

    // Postfix
    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);
    parser.led(TokenKind::OpenBracket, BindingPower::Call, parse_index_expr);

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::Truth, parse_primary_expr);
    parser.nud(TokenKind::Untruth, parse_primary_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::OpenBracket, parse_list_expr);

    // Statements
    parser.stmt(TokenKind::NewNum, parse_var_decl_stmt);
    parser.stmt(TokenKind::NewText, parse_var_decl_stmt);
    parser.stmt(TokenKind::NewBool, parse_var_decl_stmt);
    parser.stmt(TokenKind::NewList, parse_var_decl_stmt);
    parser.stmt(TokenKind::NewFunction, parse_fn_decl_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::Speak, parse_speak_stmt);
    parser.stmt(TokenKind::Confess, parse_confess_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
