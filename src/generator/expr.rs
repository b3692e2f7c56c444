use crate::analyzer::typed_ast::{BinaryOp, Expr, Literal, LiteralValue, UnaryOp};

use super::generator::Generator;

/// Generates the JavaScript text of an expression.
pub fn gen_expression(generator: &mut Generator, expression: &Expr) -> String {
    match expression {
        Expr::Literal(literal) => gen_literal(literal),
        Expr::Variable(variable) => generator.variable_name(variable),
        Expr::Function(function) => generator.function_name(function),
        Expr::Binary {
            op, left, right, ..
        } => {
            let left_text = gen_expression(generator, left);
            let right_text = gen_expression(generator, right);

            match op {
                BinaryOp::Intrinsic(intrinsic) => {
                    format!("{}({}, {})", intrinsic.target(), left_text, right_text)
                }
                // A unary operand cannot be the base of `**` in JavaScript
                BinaryOp::Power if is_signed(left) => {
                    format!("(({}) ** {})", left_text, right_text)
                }
                _ => format!("({} {} {})", left_text, binary_operator(*op), right_text),
            }
        }
        Expr::Unary { op, operand, .. } => {
            let operand = gen_expression(generator, operand);
            let op = match op {
                UnaryOp::Not => "!",
                UnaryOp::Negate => "-",
                UnaryOp::Intrinsic(intrinsic) => intrinsic.target(),
            };

            format!("{}({})", op, operand)
        }
        Expr::List { elements, .. } => {
            let elements = elements
                .iter()
                .map(|element| gen_expression(generator, element))
                .collect::<Vec<_>>();

            format!("[{}]", elements.join(","))
        }
        Expr::Subscript { list, index, .. } => {
            let list = gen_expression(generator, list);
            let index = gen_expression(generator, index);
            format!("{}[{}]", list, index)
        }
        Expr::Call { callee, args, .. } => {
            let callee = gen_expression(generator, callee);
            let args = args
                .iter()
                .map(|arg| gen_expression(generator, arg))
                .collect::<Vec<_>>();

            format!("{}({})", callee, args.join(", "))
        }
    }
}

fn binary_operator(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Coalesce => "??",
        BinaryOp::Or => "||",
        BinaryOp::And => "&&",
        BinaryOp::Equal => "===",
        BinaryOp::NotEqual => "!==",
        BinaryOp::Less => "<",
        BinaryOp::LessEqual => "<=",
        BinaryOp::Greater => ">",
        BinaryOp::GreaterEqual => ">=",
        BinaryOp::Add => "+",
        BinaryOp::Subtract => "-",
        BinaryOp::Multiply => "*",
        BinaryOp::Divide => "/",
        BinaryOp::Remainder => "%",
        BinaryOp::Power => "**",
        BinaryOp::Intrinsic(intrinsic) => intrinsic.target(),
    }
}

fn is_signed(expression: &Expr) -> bool {
    match expression {
        Expr::Unary {
            op: UnaryOp::Not | UnaryOp::Negate,
            ..
        } => true,
        Expr::Literal(Literal {
            value: LiteralValue::Int(value),
            ..
        }) => *value < 0,
        Expr::Literal(Literal {
            value: LiteralValue::Float(value),
            ..
        }) => value.is_sign_negative(),
        _ => false,
    }
}

pub fn gen_literal(literal: &Literal) -> String {
    match &literal.value {
        LiteralValue::Bool(value) => value.to_string(),
        LiteralValue::Int(value) => value.to_string(),
        LiteralValue::Float(value) => format_float(*value),
        LiteralValue::String(value) => quote(value),
    }
}

/// JavaScript number spelling: integral floats drop the fraction.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        String::from("NaN")
    } else if value == f64::INFINITY {
        String::from("Infinity")
    } else if value == f64::NEG_INFINITY {
        String::from("-Infinity")
    } else {
        value.to_string()
    }
}

pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');

    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            c if c.is_control() && (c as u32) < 0x100 => {
                quoted.push_str(&format!("\\x{:02x}", c as u32))
            }
            c => quoted.push(c),
        }
    }

    quoted.push('"');
    quoted
}
