//! Parser module for building the syntax tree.
//!
//! Transforms the token stream into an [`crate::ast::ast::Program`]. It
//! uses a Pratt parser for expressions and handles:
//!
//! - Statement parsing (declarations, functions, conditionals, `speak`, `confess`)
//! - Expression parsing with operator precedence and associativity
//! - Type annotations in function signatures
//! - Located syntax errors
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
