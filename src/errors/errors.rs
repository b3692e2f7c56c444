use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

/// Which stage of the pipeline rejected the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Semantic,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NumberParseError { .. } => ErrorKind::Syntax,
            _ => ErrorKind::Semantic,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::IdentifierAlreadyDeclared { .. } => "IdentifierAlreadyDeclared",
            ErrorImpl::IdentifierNotDeclared { .. } => "IdentifierNotDeclared",
            ErrorImpl::NotAValue { .. } => "NotAValue",
            ErrorImpl::ExpectedNumber => "ExpectedNumber",
            ErrorImpl::ExpectedNumberOrString => "ExpectedNumberOrString",
            ErrorImpl::ExpectedBoolean => "ExpectedBoolean",
            ErrorImpl::ExpectedInteger => "ExpectedInteger",
            ErrorImpl::ExpectedList => "ExpectedList",
            ErrorImpl::ExpectedOptional => "ExpectedOptional",
            ErrorImpl::NotSameType => "NotSameType",
            ErrorImpl::TypeExpected => "TypeExpected",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::NotCallable => "NotCallable",
            ErrorImpl::MissingReturnValue => "MissingReturnValue",
            ErrorImpl::UnexpectedReturnValue => "UnexpectedReturnValue",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::IdentifierAlreadyDeclared { name } => ErrorTip::Suggestion(format!(
                "`{}` is already declared in this scope, pick another name",
                name
            )),
            ErrorImpl::IdentifierNotDeclared { name } => ErrorTip::Suggestion(format!(
                "`{}` must be declared before it is used",
                name
            )),
            ErrorImpl::NotAValue { name } => {
                ErrorTip::Suggestion(format!("`{}` names a type, not a value", name))
            }
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::TypeExpected => ErrorTip::Suggestion(String::from(
                "Types are int, float, boolean, string, void, any, T[] or T?",
            )),
            ErrorImpl::MissingReturnValue => ErrorTip::Suggestion(String::from(
                "Only void and optional functions may use a bare `confess`",
            )),
            ErrorImpl::ArgumentCountMismatch { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected {} arguments, received {}",
                    expected, received
                ))
            }
            _ => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            self.position.line_and_column_message(),
            self.internal_error
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Syntax
    #[error("Unrecognised token {token:?}")]
    UnrecognisedToken { token: String },
    #[error("Unexpected token {token:?}")]
    UnexpectedToken { token: String },
    #[error("Unexpected token {token:?}, {message}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("Malformed number {token:?}")]
    NumberParseError { token: String },

    // Semantic
    #[error("Identifier {name} already declared")]
    IdentifierAlreadyDeclared { name: String },
    #[error("Identifier {name} not declared")]
    IdentifierNotDeclared { name: String },
    #[error("Identifier {name} is not a value")]
    NotAValue { name: String },
    #[error("Expected a number")]
    ExpectedNumber,
    #[error("Expected a number or string")]
    ExpectedNumberOrString,
    #[error("Expected a boolean")]
    ExpectedBoolean,
    #[error("Expected an integer")]
    ExpectedInteger,
    #[error("Expected a list")]
    ExpectedList,
    #[error("Expected an optional")]
    ExpectedOptional,
    #[error("All elements must have the same type")]
    NotSameType,
    #[error("Type expected")]
    TypeExpected,
    #[error("Cannot assign a {received} to a {expected}")]
    TypeMatchError { expected: String, received: String },
    #[error("Return can only appear in a function")]
    ReturnOutsideFunction,
    #[error("Call of non-function")]
    NotCallable,
    #[error("Something should be returned")]
    MissingReturnValue,
    #[error("Cannot return a value from this function")]
    UnexpectedReturnValue,
    #[error("{expected} argument(s) required but {received} passed")]
    ArgumentCountMismatch { expected: usize, received: usize },
}
