use crate::{
    ast::{
        ast::Stmt,
        statements::{
            BlockStmt, ConfessStmt, ElseClause, ExpressionStmt, FnDeclStmt, IfStmt, Parameter,
            SpeakStmt, VarDeclStmt,
        },
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return handler(parser);
    }

    let expression = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::Expression(ExpressionStmt {
        span: *expression.get_span(),
        expression,
    }))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.advance().clone();

    let error = parser.unexpected_token_detailed("expected identifier during variable declaration");
    let identifier = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let error = parser.unexpected_token_detailed("expected `is` after the variable name");
    parser.expect_error(TokenKind::Is, Some(error))?;

    let assigned_value = parse_expr(parser, BindingPower::Default)?;

    let optional = parser.current_token_kind() == TokenKind::Question;
    if optional {
        parser.advance();
    }

    Ok(Stmt::VarDecl(VarDeclStmt {
        keyword: start_token.kind,
        identifier: identifier.value,
        identifier_span: identifier.span,
        assigned_value,
        optional,
        span: parser.span_from(start_token.span.start),
    }))
}

/// Handles both `if` and the `elif` parts that follow it.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::If(parse_if_chain(parser)?))
}

fn parse_if_chain(parser: &mut Parser) -> Result<IfStmt, Error> {
    let start = parser.advance().span.start;

    let condition = parse_expr(parser, BindingPower::Default)?;
    let then_body = parse_block(parser)?;

    let else_body = match parser.current_token_kind() {
        TokenKind::Elif => Some(ElseClause::If(Box::new(parse_if_chain(parser)?))),
        TokenKind::Else => {
            parser.advance();
            Some(ElseClause::Block(parse_block(parser)?))
        }
        _ => None,
    };

    Ok(IfStmt {
        condition,
        then_body,
        else_body,
        span: parser.span_from(start),
    })
}

pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut body = Vec::new();
    parser.skip_separators();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected_token_detailed("expected `}` to close the block"));
        }

        body.push(parse_stmt(parser)?);
        parser.skip_separators();
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        body,
        span: parser.span_from(start),
    })
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let identifier = parser.expect(TokenKind::Identifier)?;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let name = parser.expect(TokenKind::Identifier)?;
            parser.expect(TokenKind::Colon)?;
            let ty = parse_type(parser, BindingPower::Default)?;
            parameters.push(Parameter {
                name: name.value,
                ty,
                span: parser.span_from(name.span.start),
            });

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let error = parser.unexpected_token_detailed("expected `:` and a return type");
    parser.expect_error(TokenKind::Colon, Some(error))?;
    let return_type = parse_type(parser, BindingPower::Default)?;

    let body = parse_block(parser)?;

    Ok(Stmt::FnDecl(FnDeclStmt {
        identifier: identifier.value,
        identifier_span: identifier.span,
        parameters,
        return_type,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_speak_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::Speak(SpeakStmt {
        value,
        span: parser.span_from(start),
    }))
}

/// A value belongs to `confess` only when it starts on the same line.
pub fn parse_confess_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let confess = parser.advance().clone();

    let current = parser.current_token();
    let has_value = current.span.start.line == confess.span.start.line
        && parser.get_nud_lookup().contains_key(&current.kind);

    let value = if has_value {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    Ok(Stmt::Confess(ConfessStmt {
        value,
        span: parser.span_from(confess.span.start),
    }))
}
