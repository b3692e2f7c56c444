#![allow(clippy::module_inception)]

use std::{path::Path, time::Instant};

use log::info;

use crate::{
    analyzer::analyzer::analyze,
    errors::errors::{Error, ErrorTip},
    generator::generator::generate,
    lexer::lexer::tokenize,
    optimizer::optimizer::optimize,
    parser::parser::parse,
};

pub mod analyzer;
pub mod ast;
pub mod errors;
pub mod generator;
pub mod lexer;
pub mod macros;
pub mod optimizer;
pub mod parser;

extern crate regex;

/// A point in the source text: byte offset plus 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(offset: u32, line: u32, column: u32) -> Self {
        Position {
            offset,
            line,
            column,
        }
    }

    pub fn null() -> Self {
        Position::new(0, 1, 1)
    }

    /// Prefix used by every located diagnostic, e.g. `Line 2, col 7: `.
    pub fn line_and_column_message(&self) -> String {
        format!("Line {}, col {}: ", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span::new(self.start, other.end)
    }
}

/// The last stage the pipeline runs before rendering its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputType {
    /// Report that the program was matched by the grammar
    Parsed,
    /// The statically analyzed representation
    Analyzed,
    /// The optimized analyzed representation
    Optimized,
    /// The translation to JavaScript
    Js,
}

#[derive(Debug, Clone, Copy)]
pub struct CompileOptions {
    pub emit: OutputType,
    /// When false the generator consumes the analyzer output directly.
    pub optimize: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            emit: OutputType::Js,
            optimize: true,
        }
    }
}

/// Runs the whole pipeline over `source` and renders the requested stage.
pub fn compile(source: &str, options: &CompileOptions) -> Result<String, Error> {
    let start = Instant::now();

    let tokens = tokenize(source)?;
    info!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let syntax_tree = parse(tokens)?;
    info!("Parsed in {:?}", parse_start.elapsed());

    if options.emit == OutputType::Parsed {
        return Ok(String::from("Syntax is ok"));
    }

    let analyze_start = Instant::now();
    let program = analyze(&syntax_tree)?;
    info!("Analyzed in {:?}", analyze_start.elapsed());

    if options.emit == OutputType::Analyzed {
        return Ok(format!("{:#?}", program));
    }

    let program = if options.optimize || options.emit == OutputType::Optimized {
        let optimize_start = Instant::now();
        let optimized = optimize(program);
        info!("Optimized in {:?}", optimize_start.elapsed());
        optimized
    } else {
        program
    };

    if options.emit == OutputType::Optimized {
        return Ok(format!("{:#?}", program));
    }

    let generate_start = Instant::now();
    let output = generate(&program);
    info!("Generated in {:?}", generate_start.elapsed());
    info!("Total time: {:?}", start.elapsed());

    Ok(output)
}

/// Finds the line containing byte `position`.
///
/// Returns the 1-based line number, the line text and the offset of
/// `position` within that line.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
        line_number += 1;
    }

    // End of input: point just past the last character
    let last = source.split_inclusive('\n').last().unwrap_or("");
    if last.ends_with('\n') {
        Some((line_number, String::new(), 0))
    } else {
        Some((line_number - 1, last.to_string(), last.len()))
    }
}

/// Renders `error` against the source it was raised for.
pub fn display_error(error: &Error, source: &str, file: &Path) -> String {
    /*
        Error: name: message (tip)
        -> final.nl
          |
        20 | newnum a is #
           | ------------^
    */

    let mut rendered = String::new();

    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!(
            "Error: {}: {}\n",
            error.get_error_name(),
            error.get_internal_error()
        ));
    } else {
        rendered.push_str(&format!(
            "Error: {}: {} ({})\n",
            error.get_error_name(),
            error.get_internal_error(),
            error.get_tip()
        ));
    }
    rendered.push_str(&format!("-> {}\n", file.as_os_str().to_string_lossy()));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().offset)
    else {
        return rendered;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;
    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    rendered
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (String::from(&string[start..]), start)
}
