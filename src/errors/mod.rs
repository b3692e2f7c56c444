//! Error types and error handling for the compiler.
//!
//! Every failing stage produces the same located [`errors::Error`]:
//!
//! - lexer and parser failures are syntax errors
//! - analyzer failures are semantic errors, one per compilation
//!
//! The optimizer and the generator cannot fail.

pub mod errors;
