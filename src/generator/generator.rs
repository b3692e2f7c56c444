//! Main generator module.
//!
//! Holds the state of one JavaScript emission: the lines written so far,
//! the current indentation and the target name given to each entity.

use std::rc::Rc;

use log::{debug, trace};

use crate::analyzer::typed_ast::{Function, Program, Variable};

use super::stmt::gen_statement;

const INDENT: &str = "    ";

/// The state of a single code generation pass.
#[derive(Debug, Default)]
pub struct Generator {
    /// Lines of JavaScript emitted so far
    pub output: Vec<String>,
    /// Current block nesting depth
    pub indent: usize,
    /// Suffix given to each variable the first time it was emitted
    variables: Vec<(Rc<Variable>, usize)>,
    /// Suffix given to each user function the first time it was emitted
    functions: Vec<(Rc<Function>, usize)>,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line at the current indentation.
    pub fn emit(&mut self, line: impl AsRef<str>) {
        let line = format!("{}{}", INDENT.repeat(self.indent), line.as_ref());
        trace!("emit {:?}", line);
        self.output.push(line);
    }

    pub fn variable_name(&mut self, variable: &Rc<Variable>) -> String {
        let known = self
            .variables
            .iter()
            .find(|(seen, _)| Rc::ptr_eq(seen, variable))
            .map(|(_, suffix)| *suffix);

        let suffix = match known {
            Some(suffix) => suffix,
            None => {
                let suffix = self.next_suffix(&variable.name);
                self.variables.push((Rc::clone(variable), suffix));
                suffix
            }
        };

        format!("{}_{}", variable.name, suffix)
    }

    /// Intrinsics keep their fixed target spelling.
    pub fn function_name(&mut self, function: &Rc<Function>) -> String {
        if let Some(intrinsic) = function.intrinsic {
            return intrinsic.target().to_string();
        }

        let known = self
            .functions
            .iter()
            .find(|(seen, _)| Rc::ptr_eq(seen, function))
            .map(|(_, suffix)| *suffix);

        let suffix = match known {
            Some(suffix) => suffix,
            None => {
                let suffix = self.next_suffix(&function.name);
                self.functions.push((Rc::clone(function), suffix));
                suffix
            }
        };

        format!("{}_{}", function.name, suffix)
    }

    /// Suffixes count entities of both kinds, so every one is distinct.
    fn next_suffix(&self, name: &str) -> usize {
        let suffix = self.variables.len() + self.functions.len() + 1;
        debug!("{} is emitted as {}_{}", name, name, suffix);
        suffix
    }

    pub fn finish(self) -> String {
        self.output.join("\n")
    }
}

/// Emits the program as newline-joined JavaScript.
pub fn generate(program: &Program) -> String {
    let mut generator = Generator::new();

    for statement in &program.statements {
        gen_statement(&mut generator, statement);
    }

    debug!("generated {} lines", generator.output.len());
    generator.finish()
}
