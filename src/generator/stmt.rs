use crate::analyzer::typed_ast::{Alternate, IfStatement, ShortIfStatement, Stmt};

use super::{expr::gen_expression, generator::Generator};

pub fn gen_statement(generator: &mut Generator, statement: &Stmt) {
    match statement {
        Stmt::VariableDeclaration {
            variable,
            initializer,
        } => {
            let name = generator.variable_name(variable);
            let value = gen_expression(generator, initializer);
            generator.emit(format!("let {} = {};", name, value));
        }
        Stmt::FunctionDeclaration(declaration) => {
            let name = generator.function_name(&declaration.fun);
            let params = declaration
                .params
                .iter()
                .map(|param| generator.variable_name(param))
                .collect::<Vec<_>>()
                .join(", ");

            generator.emit(format!("function {}({}) {{", name, params));
            gen_block(generator, &declaration.body);
            generator.emit("}");
        }
        Stmt::Print(argument) => {
            let argument = gen_expression(generator, argument);
            generator.emit(format!("console.log({});", argument));
        }
        Stmt::Return(expression) => {
            let value = gen_expression(generator, expression);
            generator.emit(format!("return {};", value));
        }
        Stmt::ShortReturn => generator.emit("return;"),
        Stmt::If(statement) => {
            gen_if(generator, statement, false);
            generator.emit("}");
        }
        Stmt::ShortIf(statement) => {
            gen_short_if(generator, statement, false);
            generator.emit("}");
        }
        Stmt::Expression(expression) => {
            let text = gen_expression(generator, expression);
            generator.emit(format!("{};", text));
        }
    }
}

pub fn gen_block(generator: &mut Generator, statements: &[Stmt]) {
    generator.indent += 1;
    for statement in statements {
        gen_statement(generator, statement);
    }
    generator.indent -= 1;
}

fn gen_condition(generator: &mut Generator, test: &str, is_else: bool) {
    if is_else {
        generator.emit(format!("}} else if ({}) {{", test));
    } else {
        generator.emit(format!("if ({}) {{", test));
    }
}

/// Emits an `if` chain without its closing brace. Each `elif` continues
/// the same chain rather than nesting inside the `else`.
fn gen_if(generator: &mut Generator, statement: &IfStatement, is_else: bool) {
    let test = gen_expression(generator, &statement.test);
    gen_condition(generator, &test, is_else);
    gen_block(generator, &statement.consequent);

    match &statement.alternate {
        Alternate::If(elif) => gen_if(generator, elif, true),
        Alternate::ShortIf(elif) => gen_short_if(generator, elif, true),
        Alternate::Block(statements) => {
            generator.emit("} else {");
            gen_block(generator, statements);
        }
    }
}

fn gen_short_if(generator: &mut Generator, statement: &ShortIfStatement, is_else: bool) {
    let test = gen_expression(generator, &statement.test);
    gen_condition(generator, &test, is_else);
    gen_block(generator, &statement.consequent);
}
