use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BinaryExpr, BooleanExpr, CallExpr, IndexExpr, ListExpr, NumberExpr, NumberValue,
            PrefixExpr, StringExpr, SymbolExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected_token());
    };

    let mut left = nud(parser)?;

    // While the current token binds tighter than `bp`, keep extending lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(parser.unexpected_token());
        };

        let binding_power = parser.current_binding_power();
        left = led(parser, left, binding_power)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Number => {
            let value = if token.value.contains(['.', 'e', 'E']) {
                token.value.parse().map(NumberValue::Float).ok()
            } else {
                token.value.parse().map(NumberValue::Int).ok()
            };

            let Some(value) = value else {
                return Err(Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.span.start,
                ));
            };

            parser.advance();
            Ok(Expr::Number(NumberExpr {
                value,
                span: token.span,
            }))
        }
        TokenKind::String => {
            parser.advance();
            Ok(Expr::String(StringExpr {
                value: token.value,
                span: token.span,
            }))
        }
        TokenKind::Identifier => {
            parser.advance();
            Ok(Expr::Symbol(SymbolExpr {
                value: token.value,
                span: token.span,
            }))
        }
        TokenKind::Truth | TokenKind::Untruth => {
            parser.advance();
            Ok(Expr::Boolean(BooleanExpr {
                value: token.kind == TokenKind::Truth,
                span: token.span,
            }))
        }
        _ => Err(parser.unexpected_token()),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: left.get_span().to(right.get_span()),
        left: Box::new(left),
        operator: operator_token,
        right: Box::new(right),
    }))
}

/// Comparisons do not chain: `a less b less c` is rejected.
pub fn parse_relational_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let expr = parse_binary_expr(parser, left, bp)?;

    if parser.current_binding_power() == BindingPower::Relational {
        return Err(parser.unexpected_token_detailed("comparisons cannot be chained"));
    }

    Ok(expr)
}

/// `optional ?? default`, right associative.
pub fn parse_coalesce_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parse_binary_expr(parser, left, BindingPower::Default)
}

/// `base exp power`, right associative. The exponent may carry a prefix
/// operator, the base may not: `-2 exp 2` is `-(2 exp 2)`.
pub fn parse_power_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parse_binary_expr(parser, left, BindingPower::Unary)
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        span: operator_token.span.to(rhs.get_span()),
        operator: operator_token,
        right_expr: Box::new(rhs),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// Parses `Exp ("," Exp)*` up to and including `close`.
fn parse_expr_list(parser: &mut Parser, close: TokenKind) -> Result<Vec<Expr>, Error> {
    let mut exprs = vec![];

    if parser.current_token_kind() != close {
        loop {
            exprs.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(close)?;
    Ok(exprs)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let arguments = parse_expr_list(parser, TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        span: parser.span_from(left.get_span().start),
        callee: Box::new(left),
        arguments,
    }))
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::Index(IndexExpr {
        span: parser.span_from(left.get_span().start),
        list: Box::new(left),
        index: Box::new(index),
    }))
}

pub fn parse_list_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start;

    let elements = parse_expr_list(parser, TokenKind::CloseBracket)?;

    Ok(Expr::List(ListExpr {
        elements,
        span: parser.span_from(start),
    }))
}
