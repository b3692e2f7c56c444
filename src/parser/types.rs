//! Type annotation parsing.
//!
//! Annotations are a type name followed by any number of `[]` and `?`
//! suffixes, so `int[]?` is an optional list of integers. Like
//! expressions, they are parsed with NUD/LED handlers and binding powers.

use std::collections::HashMap;

use crate::{
    ast::{
        ast::TypeAnnotation,
        types::{ArrayType, OptionalType, SymbolType},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeAnnotation, Error>;

pub type TypeLEDHandler =
    fn(&mut Parser, TypeAnnotation, BindingPower) -> Result<TypeAnnotation, Error>;

pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
    parser.type_led(TokenKind::OpenBracket, BindingPower::Call, parse_array_type);
    parser.type_led(TokenKind::Question, BindingPower::Call, parse_optional_type);
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(TypeAnnotation::Symbol(SymbolType {
        name: token.value,
        span: token.span,
    }))
}

pub fn parse_array_type(
    parser: &mut Parser,
    left: TypeAnnotation,
    _bp: BindingPower,
) -> Result<TypeAnnotation, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(TypeAnnotation::Array(ArrayType {
        span: parser.span_from(left.get_span().start),
        underlying: Box::new(left),
    }))
}

pub fn parse_optional_type(
    parser: &mut Parser,
    left: TypeAnnotation,
    _bp: BindingPower,
) -> Result<TypeAnnotation, Error> {
    parser.expect(TokenKind::Question)?;

    Ok(TypeAnnotation::Optional(OptionalType {
        span: parser.span_from(left.get_span().start),
        underlying: Box::new(left),
    }))
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeAnnotation, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_type_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected_token_detailed("expected a type"));
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let binding_power = *parser
            .get_type_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);

        if binding_power <= bp {
            break;
        }

        let Some(led) = parser.get_type_led_lookup().get(&token_kind).copied() else {
            return Err(parser.unexpected_token());
        };

        left = led(parser, left, binding_power)?;
    }

    Ok(left)
}
