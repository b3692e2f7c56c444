//! Static semantic analysis.
//!
//! Transforms the syntax tree into a typed program while:
//!
//! - Resolving every name through a stack of scope frames
//! - Checking declarations, operators, calls and returns against the typing rules
//! - Lowering intrinsic calls to print statements and operators
//!
//! Analysis stops at the first violation.

pub mod analyzer;
pub mod environment;
pub mod stdlib;
pub mod typed_ast;
pub mod types;
