//! Semantics-preserving rewrites of the analyzed program.

pub mod optimizer;

#[cfg(test)]
mod tests;
