use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("newnum", TokenKind::NewNum);
        map.insert("newtext", TokenKind::NewText);
        map.insert("newbool", TokenKind::NewBool);
        map.insert("newlist", TokenKind::NewList);
        map.insert("newfunction", TokenKind::NewFunction);
        map.insert("if", TokenKind::If);
        map.insert("elif", TokenKind::Elif);
        map.insert("else", TokenKind::Else);
        map.insert("speak", TokenKind::Speak);
        map.insert("confess", TokenKind::Confess);
        map.insert("truth", TokenKind::Truth);
        map.insert("untruth", TokenKind::Untruth);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("is", TokenKind::Is);
        map.insert("unis", TokenKind::Unis);
        map.insert("less", TokenKind::Less);
        map.insert("lessis", TokenKind::LessIs);
        map.insert("more", TokenKind::More);
        map.insert("moreis", TokenKind::MoreIs);
        map.insert("plus", TokenKind::Plus);
        map.insert("minus", TokenKind::Minus);
        map.insert("multiply", TokenKind::Multiply);
        map.insert("divide", TokenKind::Divide);
        map.insert("remain", TokenKind::Remain);
        map.insert("exp", TokenKind::Exp);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Comma,
    Colon,
    Semicolon,
    Question,         // ?
    QuestionQuestion, // ??
    Not,              // !
    Dash,             // -

    // Reserved
    NewNum,
    NewText,
    NewBool,
    NewList,
    NewFunction,
    If,
    Elif,
    Else,
    Speak,
    Confess,
    Truth,
    Untruth,

    And,
    Or,
    Is,
    Unis,
    Less,
    LessIs,
    More,
    MoreIs,
    Plus,
    Minus,
    Multiply,
    Divide,
    Remain,
    Exp,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_one_of_many(&[TokenKind::String, TokenKind::Identifier, TokenKind::Number]) {
            write!(f, "{} ({})", self.kind, self.value)
        } else {
            write!(f, "{} ()", self.kind)
        }
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}
