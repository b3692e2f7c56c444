//! Lexical analysis module for the compiler.
//!
//! Converts NewLang source text into a stream of tokens:
//!
//! - Tokenization of source code using anchored regex patterns
//! - Recognition of reserved words, identifiers, literals and punctuation
//! - Offset, line and column tracking for error reporting
//! - Skipping of whitespace and `//` / `#` comments

pub mod lexer;
pub mod tokens;
