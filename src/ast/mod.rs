/// AST (Abstract Syntax Tree) module
/// The untyped tree produced by the parser
///
/// Submodules:
/// - ast: Program root and the Stmt / Expr / TypeAnnotation sum types
/// - expressions: Expression node structs
/// - statements: Statement node structs
/// - types: Type annotations as written in signatures
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
