use std::rc::Rc;

use log::{debug, trace};

use crate::{
    ast::{
        ast::{self, TypeAnnotation},
        expressions::{
            BinaryExpr, CallExpr, IndexExpr, ListExpr, NumberValue, PrefixExpr, SymbolExpr,
        },
        statements::{ConfessStmt, ElseClause, FnDeclStmt, IfStmt, SpeakStmt, VarDeclStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

use super::{
    environment::Environment,
    stdlib::{Intrinsic, INTRINSICS, STANDARD_TYPES},
    typed_ast::{
        Alternate, BinaryOp, Entity, Expr, Function, FunctionDeclaration, IfStatement, Literal,
        Program, ShortIfStatement, Stmt, UnaryOp, Variable,
    },
    types::Type,
};

/// Result of analyzing an `if` or `elif`.
enum Conditional {
    Long(IfStatement),
    Short(ShortIfStatement),
}

/// Walks the syntax tree once, resolving names and checking types.
#[derive(Debug)]
pub struct Analyzer {
    /// Innermost frame last; the first frame holds the standard library
    environments: Vec<Environment>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        let mut root = Environment::new(None);

        for (name, ty) in STANDARD_TYPES.iter() {
            root.entity_lookup
                .insert(name.to_string(), Entity::Type(ty.clone()));
        }

        for intrinsic in INTRINSICS.iter() {
            root.entity_lookup.insert(
                intrinsic.name().to_string(),
                Entity::Function(Rc::new(Function {
                    name: intrinsic.name().to_string(),
                    ty: intrinsic.ty(),
                    intrinsic: Some(*intrinsic),
                })),
            );
        }

        Analyzer {
            environments: vec![root],
        }
    }

    fn current_environment(&mut self) -> &mut Environment {
        let last = self.environments.len() - 1;
        &mut self.environments[last]
    }

    fn current_function(&self) -> Option<Rc<Function>> {
        self.environments
            .last()
            .and_then(|environment| environment.function.clone())
    }

    fn push_environment(&mut self, function: Option<Rc<Function>>) {
        self.environments.push(Environment::new(function));
        trace!("entered scope at depth {}", self.environments.len());
    }

    fn pop_environment(&mut self) {
        self.environments.pop();
        trace!("left scope, depth now {}", self.environments.len());
    }

    /// Nearest entity named `name`, searching outwards.
    pub fn lookup(&self, name: &str) -> Option<&Entity> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.get(name))
    }

    fn declare(&mut self, name: &str, entity: Entity, position: Position) -> Result<(), Error> {
        debug!("declaring `{}` at depth {}", name, self.environments.len());
        self.current_environment().declare(name, entity, position)
    }

    fn must_be_fresh(&mut self, name: &str, position: Position) -> Result<(), Error> {
        if self.current_environment().get(name).is_some() {
            return Err(Error::new(
                ErrorImpl::IdentifierAlreadyDeclared {
                    name: name.to_string(),
                },
                position,
            ));
        }

        Ok(())
    }

    pub fn analyze_program(&mut self, program: &ast::Program) -> Result<Program, Error> {
        Ok(Program {
            statements: self.analyze_block(&program.statements)?,
        })
    }

    fn analyze_block(&mut self, statements: &[ast::Stmt]) -> Result<Vec<Stmt>, Error> {
        statements
            .iter()
            .map(|statement| self.analyze_stmt(statement))
            .collect()
    }

    /// Analyzes `statements` in a fresh child frame.
    fn analyze_scoped_block(&mut self, statements: &[ast::Stmt]) -> Result<Vec<Stmt>, Error> {
        let function = self.current_function();
        self.push_environment(function);
        let block = self.analyze_block(statements)?;
        self.pop_environment();

        Ok(block)
    }

    fn analyze_stmt(&mut self, statement: &ast::Stmt) -> Result<Stmt, Error> {
        match statement {
            ast::Stmt::VarDecl(declaration) => self.analyze_var_decl(declaration),
            ast::Stmt::FnDecl(declaration) => self.analyze_fn_decl(declaration),
            ast::Stmt::If(statement) => Ok(match self.analyze_if(statement)? {
                Conditional::Long(statement) => Stmt::If(statement),
                Conditional::Short(statement) => Stmt::ShortIf(statement),
            }),
            ast::Stmt::Speak(statement) => self.analyze_speak(statement),
            ast::Stmt::Confess(statement) => self.analyze_confess(statement),
            ast::Stmt::Expression(statement) => {
                Ok(Stmt::Expression(self.analyze_expr(&statement.expression)?))
            }
        }
    }

    fn analyze_var_decl(&mut self, declaration: &VarDeclStmt) -> Result<Stmt, Error> {
        self.must_be_fresh(&declaration.identifier, declaration.identifier_span.start)?;

        let initializer = self.analyze_expr(&declaration.assigned_value)?;
        let at = declaration.assigned_value.get_span().start;

        match declaration.keyword {
            TokenKind::NewNum => must(initializer.ty().is_numeric(), ErrorImpl::ExpectedNumber, at)?,
            TokenKind::NewText => must_be_assignable(&initializer, &Type::String, at)?,
            TokenKind::NewBool => {
                must(*initializer.ty() == Type::Bool, ErrorImpl::ExpectedBoolean, at)?
            }
            _ => must(
                initializer.ty().list_base().is_some(),
                ErrorImpl::ExpectedList,
                at,
            )?,
        }

        let ty = if declaration.optional {
            Type::optional(initializer.ty().clone())
        } else {
            initializer.ty().clone()
        };

        let variable = Rc::new(Variable {
            name: declaration.identifier.clone(),
            mutable: false,
            ty,
        });
        self.declare(
            &declaration.identifier,
            Entity::Variable(Rc::clone(&variable)),
            declaration.identifier_span.start,
        )?;

        Ok(Stmt::VariableDeclaration {
            variable,
            initializer,
        })
    }

    fn analyze_fn_decl(&mut self, declaration: &FnDeclStmt) -> Result<Stmt, Error> {
        self.must_be_fresh(&declaration.identifier, declaration.identifier_span.start)?;

        let param_types = declaration
            .parameters
            .iter()
            .map(|param| self.resolve_type(&param.ty))
            .collect::<Result<Vec<_>, _>>()?;
        let return_type = self.resolve_type(&declaration.return_type)?;

        // Declared before the body so the body can call it
        let fun = Rc::new(Function {
            name: declaration.identifier.clone(),
            ty: Type::function(param_types.clone(), return_type),
            intrinsic: None,
        });
        self.declare(
            &declaration.identifier,
            Entity::Function(Rc::clone(&fun)),
            declaration.identifier_span.start,
        )?;

        self.push_environment(Some(Rc::clone(&fun)));

        let mut params = vec![];
        for (param, ty) in declaration.parameters.iter().zip(param_types) {
            let variable = Rc::new(Variable {
                name: param.name.clone(),
                mutable: false,
                ty,
            });
            self.declare(
                &param.name,
                Entity::Variable(Rc::clone(&variable)),
                param.span.start,
            )?;
            params.push(variable);
        }

        let body = self.analyze_block(&declaration.body.body)?;
        self.pop_environment();

        Ok(Stmt::FunctionDeclaration(FunctionDeclaration { fun, params, body }))
    }

    fn analyze_if(&mut self, statement: &IfStmt) -> Result<Conditional, Error> {
        let test = self.analyze_expr(&statement.condition)?;
        must(
            *test.ty() == Type::Bool,
            ErrorImpl::ExpectedBoolean,
            statement.condition.get_span().start,
        )?;

        let consequent = self.analyze_scoped_block(&statement.then_body.body)?;

        let alternate = match &statement.else_body {
            None => return Ok(Conditional::Short(ShortIfStatement { test, consequent })),
            Some(ElseClause::If(elif)) => match self.analyze_if(elif)? {
                Conditional::Long(elif) => Alternate::If(Box::new(elif)),
                Conditional::Short(elif) => Alternate::ShortIf(Box::new(elif)),
            },
            Some(ElseClause::Block(block)) => {
                Alternate::Block(self.analyze_scoped_block(&block.body)?)
            }
        };

        Ok(Conditional::Long(IfStatement {
            test,
            consequent,
            alternate,
        }))
    }

    /// `speak` is the print intrinsic in statement position.
    fn analyze_speak(&mut self, statement: &SpeakStmt) -> Result<Stmt, Error> {
        let argument = self.analyze_expr(&statement.value)?;

        if let Some(Entity::Function(print)) = self.lookup(Intrinsic::Print.name()) {
            if let Some(param) = print.param_types().first() {
                must_be_assignable(&argument, param, statement.value.get_span().start)?;
            }
        }

        Ok(Stmt::Print(argument))
    }

    fn analyze_confess(&mut self, statement: &ConfessStmt) -> Result<Stmt, Error> {
        let Some(function) = self.current_function() else {
            return Err(Error::new(
                ErrorImpl::ReturnOutsideFunction,
                statement.span.start,
            ));
        };
        let return_type = function.return_type();

        match &statement.value {
            Some(value) => {
                must(
                    *return_type != Type::Void,
                    ErrorImpl::UnexpectedReturnValue,
                    statement.span.start,
                )?;

                let value_expr = self.analyze_expr(value)?;
                must_be_assignable(&value_expr, return_type, value.get_span().start)?;

                Ok(Stmt::Return(value_expr))
            }
            None => {
                must(
                    matches!(return_type, Type::Void | Type::Optional(_)),
                    ErrorImpl::MissingReturnValue,
                    statement.span.start,
                )?;

                Ok(Stmt::ShortReturn)
            }
        }
    }

    fn analyze_expr(&mut self, expr: &ast::Expr) -> Result<Expr, Error> {
        match expr {
            ast::Expr::Number(number) => Ok(Expr::Literal(match number.value {
                NumberValue::Int(value) => Literal::int(value),
                NumberValue::Float(value) => Literal::float(value),
            })),
            ast::Expr::String(string) => Ok(Expr::Literal(Literal::string(string.value.clone()))),
            ast::Expr::Boolean(boolean) => Ok(Expr::Literal(Literal::bool(boolean.value))),
            ast::Expr::Symbol(symbol) => self.analyze_symbol(symbol),
            ast::Expr::Binary(binary) => self.analyze_binary(binary),
            ast::Expr::Prefix(prefix) => self.analyze_prefix(prefix),
            ast::Expr::Call(call) => self.analyze_call(call),
            ast::Expr::Index(index) => self.analyze_index(index),
            ast::Expr::List(list) => self.analyze_list(list),
        }
    }

    fn analyze_symbol(&mut self, symbol: &SymbolExpr) -> Result<Expr, Error> {
        match self.lookup(&symbol.value) {
            Some(Entity::Variable(variable)) => Ok(Expr::Variable(Rc::clone(variable))),
            Some(Entity::Function(function)) => Ok(Expr::Function(Rc::clone(function))),
            Some(Entity::Type(_)) => Err(Error::new(
                ErrorImpl::NotAValue {
                    name: symbol.value.clone(),
                },
                symbol.span.start,
            )),
            None => Err(Error::new(
                ErrorImpl::IdentifierNotDeclared {
                    name: symbol.value.clone(),
                },
                symbol.span.start,
            )),
        }
    }

    fn analyze_binary(&mut self, binary: &BinaryExpr) -> Result<Expr, Error> {
        let left = self.analyze_expr(&binary.left)?;
        let right = self.analyze_expr(&binary.right)?;

        let left_at = binary.left.get_span().start;
        let right_at = binary.right.get_span().start;
        let operator_at = binary.operator.span.start;

        let Some(op) = BinaryOp::from_token(binary.operator.kind) else {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: binary.operator.value.clone(),
                },
                operator_at,
            ));
        };

        let ty = match op {
            BinaryOp::Coalesce => {
                let Type::Optional(base) = left.ty() else {
                    return Err(Error::new(ErrorImpl::ExpectedOptional, left_at));
                };
                let base = base.as_ref().clone();
                must_be_assignable(&right, &base, right_at)?;
                base
            }
            BinaryOp::Or | BinaryOp::And => {
                must(*left.ty() == Type::Bool, ErrorImpl::ExpectedBoolean, left_at)?;
                must(*right.ty() == Type::Bool, ErrorImpl::ExpectedBoolean, right_at)?;
                Type::Bool
            }
            BinaryOp::Equal | BinaryOp::NotEqual => {
                must_have_same_type(&left, &right, operator_at)?;
                Type::Bool
            }
            op if op.is_ordering() => {
                must(
                    left.ty().is_numeric_or_string(),
                    ErrorImpl::ExpectedNumberOrString,
                    left_at,
                )?;
                must_have_same_type(&left, &right, operator_at)?;
                Type::Bool
            }
            BinaryOp::Add => {
                must(
                    left.ty().is_numeric_or_string(),
                    ErrorImpl::ExpectedNumberOrString,
                    left_at,
                )?;
                must_have_same_type(&left, &right, operator_at)?;
                left.ty().clone()
            }
            _ => {
                must(left.ty().is_numeric(), ErrorImpl::ExpectedNumber, left_at)?;
                must_have_same_type(&left, &right, operator_at)?;
                left.ty().clone()
            }
        };

        Ok(Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            ty,
        })
    }

    fn analyze_prefix(&mut self, prefix: &PrefixExpr) -> Result<Expr, Error> {
        let operand = self.analyze_expr(&prefix.right_expr)?;
        let at = prefix.right_expr.get_span().start;

        let (op, ty) = if prefix.operator.kind == TokenKind::Not {
            must(*operand.ty() == Type::Bool, ErrorImpl::ExpectedBoolean, at)?;
            (UnaryOp::Not, Type::Bool)
        } else {
            must(operand.ty().is_numeric(), ErrorImpl::ExpectedNumber, at)?;
            (UnaryOp::Negate, operand.ty().clone())
        };

        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
            ty,
        })
    }

    fn analyze_call(&mut self, call: &CallExpr) -> Result<Expr, Error> {
        let callee = self.analyze_expr(&call.callee)?;

        let Type::Function(param_types, return_type) = callee.ty().clone() else {
            return Err(Error::new(
                ErrorImpl::NotCallable,
                call.callee.get_span().start,
            ));
        };

        must(
            call.arguments.len() == param_types.len(),
            ErrorImpl::ArgumentCountMismatch {
                expected: param_types.len(),
                received: call.arguments.len(),
            },
            call.span.start,
        )?;

        let mut args = vec![];
        for (argument, param_type) in call.arguments.iter().zip(&param_types) {
            let arg = self.analyze_expr(argument)?;
            must_be_assignable(&arg, param_type, argument.get_span().start)?;
            args.push(arg);
        }

        let ty = *return_type;

        // Math intrinsics become operators
        let intrinsic = match &callee {
            Expr::Function(function) if ty != Type::Void => function.intrinsic,
            _ => None,
        };
        if let Some(intrinsic) = intrinsic {
            args = match <[Expr; 1]>::try_from(args) {
                Ok([operand]) => {
                    return Ok(Expr::Unary {
                        op: UnaryOp::Intrinsic(intrinsic),
                        operand: Box::new(operand),
                        ty,
                    })
                }
                Err(args) => args,
            };
            args = match <[Expr; 2]>::try_from(args) {
                Ok([left, right]) => {
                    return Ok(Expr::Binary {
                        op: BinaryOp::Intrinsic(intrinsic),
                        left: Box::new(left),
                        right: Box::new(right),
                        ty,
                    })
                }
                Err(args) => args,
            };
        }

        Ok(Expr::Call {
            callee: Box::new(callee),
            args,
            ty,
        })
    }

    fn analyze_index(&mut self, index: &IndexExpr) -> Result<Expr, Error> {
        let list = self.analyze_expr(&index.list)?;
        let subscript = self.analyze_expr(&index.index)?;

        let Some(base) = list.ty().list_base().cloned() else {
            return Err(Error::new(ErrorImpl::ExpectedList, index.list.get_span().start));
        };
        must(
            *subscript.ty() == Type::Int,
            ErrorImpl::ExpectedInteger,
            index.index.get_span().start,
        )?;

        Ok(Expr::Subscript {
            list: Box::new(list),
            index: Box::new(subscript),
            ty: base,
        })
    }

    fn analyze_list(&mut self, list: &ListExpr) -> Result<Expr, Error> {
        let elements = list
            .elements
            .iter()
            .map(|element| self.analyze_expr(element))
            .collect::<Result<Vec<_>, _>>()?;

        let element_type = elements
            .first()
            .map(|element| element.ty().clone())
            .unwrap_or(Type::Any);

        must(
            elements.iter().all(|element| *element.ty() == element_type),
            ErrorImpl::NotSameType,
            list.span.start,
        )?;

        Ok(Expr::List {
            elements,
            ty: Type::list(element_type),
        })
    }

    /// Turns a written annotation into a type, through the type names in scope.
    fn resolve_type(&self, annotation: &TypeAnnotation) -> Result<Type, Error> {
        match annotation {
            TypeAnnotation::Symbol(symbol) => match self.lookup(&symbol.name) {
                Some(Entity::Type(ty)) => Ok(ty.clone()),
                _ => Err(Error::new(ErrorImpl::TypeExpected, symbol.span.start)),
            },
            TypeAnnotation::Array(array) => Ok(Type::list(self.resolve_type(&array.underlying)?)),
            TypeAnnotation::Optional(optional) => {
                Ok(Type::optional(self.resolve_type(&optional.underlying)?))
            }
        }
    }
}

fn must(condition: bool, error: ErrorImpl, at: Position) -> Result<(), Error> {
    if condition {
        Ok(())
    } else {
        Err(Error::new(error, at))
    }
}

fn must_be_assignable(expr: &Expr, target: &Type, at: Position) -> Result<(), Error> {
    must(
        expr.ty().is_assignable_to(target),
        ErrorImpl::TypeMatchError {
            expected: target.describe(),
            received: expr.ty().describe(),
        },
        at,
    )
}

/// Comparisons and arithmetic never coerce between types.
fn must_have_same_type(left: &Expr, right: &Expr, at: Position) -> Result<(), Error> {
    must(left.ty() == right.ty(), ErrorImpl::NotSameType, at)
}

/// Checks `program` and produces its typed representation.
pub fn analyze(program: &ast::Program) -> Result<Program, Error> {
    let mut analyzer = Analyzer::new();
    let result = analyzer.analyze_program(program)?;

    debug!("analyzed {} top-level statements", result.statements.len());
    Ok(result)
}
