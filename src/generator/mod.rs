//! JavaScript code generation from the analyzed program.

pub mod expr;
pub mod generator;
pub mod stmt;

#[cfg(test)]
mod tests;
