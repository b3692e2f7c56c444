//! Unit tests for the optimizer.

use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::optimizer::{optimize, optimize_expr, optimize_tail};
use crate::analyzer::{
    typed_ast::{
        Alternate, BinaryOp, Expr, Function, FunctionDeclaration, IfStatement, Literal, Program,
        ShortIfStatement, Stmt, UnaryOp, Variable,
    },
    types::Type,
};

fn int(value: i64) -> Expr {
    Expr::Literal(Literal::int(value))
}

fn float(value: f64) -> Expr {
    Expr::Literal(Literal::float(value))
}

fn boolean(value: bool) -> Expr {
    Expr::Literal(Literal::bool(value))
}

fn variable(name: &str, ty: Type) -> Rc<Variable> {
    Rc::new(Variable {
        name: name.to_string(),
        mutable: false,
        ty,
    })
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let ty = match op {
        BinaryOp::Equal
        | BinaryOp::NotEqual
        | BinaryOp::Less
        | BinaryOp::LessEqual
        | BinaryOp::Greater
        | BinaryOp::GreaterEqual
        | BinaryOp::And
        | BinaryOp::Or => Type::Bool,
        _ => left.ty().clone(),
    };

    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
        ty,
    }
}

fn negate(operand: Expr) -> Expr {
    let ty = operand.ty().clone();
    Expr::Unary {
        op: UnaryOp::Negate,
        operand: Box::new(operand),
        ty,
    }
}

fn call(function: &Rc<Function>, args: Vec<Expr>) -> Expr {
    Expr::Call {
        callee: Box::new(Expr::Function(function.clone())),
        args,
        ty: function.return_type().clone(),
    }
}

fn speak(value: Expr) -> Stmt {
    Stmt::Print(value)
}

#[test]
fn test_folds_integer_arithmetic() {
    let cases = [
        (BinaryOp::Add, int(13)),
        (BinaryOp::Subtract, int(-3)),
        (BinaryOp::Multiply, int(40)),
        (BinaryOp::Divide, int(0)),
        (BinaryOp::Remainder, int(5)),
        (BinaryOp::Power, int(390625)),
    ];

    for (op, expected) in cases {
        assert_eq!(optimize_expr(binary(op, int(5), int(8))), expected, "{op:?}");
    }
}

#[test]
fn test_folds_float_arithmetic() {
    assert_eq!(
        optimize_expr(binary(BinaryOp::Add, float(1.0), float(2.2))),
        float(3.2)
    );
    assert_eq!(
        optimize_expr(binary(BinaryOp::Divide, float(5.0), float(8.0))),
        float(0.625)
    );
    assert_eq!(
        optimize_expr(binary(BinaryOp::Power, float(2.0), float(0.5))),
        float(2f64.sqrt())
    );
}

#[test]
fn test_mixed_operands_fold_to_float() {
    assert_eq!(
        optimize_expr(binary(BinaryOp::Multiply, int(2), float(1.5))),
        float(3.0)
    );
}

#[test]
fn test_folds_comparisons() {
    let cases = [
        (BinaryOp::Less, true),
        (BinaryOp::LessEqual, true),
        (BinaryOp::Equal, false),
        (BinaryOp::NotEqual, true),
        (BinaryOp::Greater, false),
        (BinaryOp::GreaterEqual, false),
    ];

    for (op, expected) in cases {
        assert_eq!(
            optimize_expr(binary(op, int(5), int(8))),
            boolean(expected),
            "{op:?}"
        );
        assert_eq!(
            optimize_expr(binary(op, float(5.0), float(8.0))),
            boolean(expected),
            "{op:?}"
        );
    }
}

#[test]
fn test_leaves_failing_integer_operations_alone() {
    let cases = [
        binary(BinaryOp::Divide, int(1), int(0)),
        binary(BinaryOp::Remainder, int(1), int(0)),
        binary(BinaryOp::Power, int(2), int(-1)),
        binary(BinaryOp::Add, int(i64::MAX), int(1)),
        binary(BinaryOp::Multiply, int(i64::MIN), int(2)),
    ];

    for expr in cases {
        assert_eq!(optimize_expr(expr.clone()), expr);
    }

    assert_eq!(optimize_expr(negate(int(i64::MIN))), negate(int(i64::MIN)));
}

#[test]
fn test_folds_negation() {
    assert_eq!(optimize_expr(negate(int(8))), int(-8));
    assert_eq!(optimize_expr(negate(float(8.5))), float(-8.5));
    assert_eq!(optimize_expr(negate(negate(int(3)))), int(3));
}

#[test]
fn test_applies_arithmetic_identities() {
    let x = variable("x", Type::Float);
    let x_ref = || Expr::Variable(x.clone());

    let cases = [
        (binary(BinaryOp::Add, x_ref(), float(0.0)), x_ref()),
        (binary(BinaryOp::Subtract, x_ref(), float(0.0)), x_ref()),
        (binary(BinaryOp::Multiply, x_ref(), float(1.0)), x_ref()),
        (binary(BinaryOp::Divide, x_ref(), float(1.0)), x_ref()),
        (binary(BinaryOp::Multiply, x_ref(), float(0.0)), float(0.0)),
        (binary(BinaryOp::Multiply, float(0.0), x_ref()), float(0.0)),
        (binary(BinaryOp::Add, float(0.0), x_ref()), x_ref()),
        (binary(BinaryOp::Subtract, float(0.0), x_ref()), negate(x_ref())),
        (binary(BinaryOp::Multiply, float(1.0), x_ref()), x_ref()),
        (binary(BinaryOp::Power, x_ref(), float(0.0)), float(1.0)),
        (binary(BinaryOp::Power, float(1.0), x_ref()), float(1.0)),
    ];

    for (before, after) in cases {
        assert_eq!(optimize_expr(before), after);
    }
}

#[test]
fn test_power_of_zero_keeps_the_integer_kind() {
    let n = variable("n", Type::Int);
    assert_eq!(
        optimize_expr(binary(BinaryOp::Power, Expr::Variable(n), int(0))),
        int(1)
    );
}

#[test]
fn test_division_of_zero_is_not_simplified() {
    let x = variable("x", Type::Float);
    let expr = binary(BinaryOp::Divide, float(0.0), Expr::Variable(x));
    assert_eq!(optimize_expr(expr.clone()), expr);
}

#[test]
fn test_applies_boolean_identities() {
    let b = variable("b", Type::Bool);
    let b_ref = || Expr::Variable(b.clone());

    let cases = [
        (binary(BinaryOp::Or, b_ref(), boolean(false)), b_ref()),
        (binary(BinaryOp::Or, boolean(false), b_ref()), b_ref()),
        (binary(BinaryOp::And, b_ref(), boolean(true)), b_ref()),
        (binary(BinaryOp::And, boolean(true), b_ref()), b_ref()),
        (binary(BinaryOp::And, b_ref(), b_ref()), b_ref()),
        (binary(BinaryOp::Or, b_ref(), b_ref()), b_ref()),
        (binary(BinaryOp::And, boolean(false), boolean(false)), boolean(false)),
        (binary(BinaryOp::Or, boolean(true), boolean(true)), boolean(true)),
    ];

    for (before, after) in cases {
        assert_eq!(optimize_expr(before), after);
    }
}

#[test]
fn test_distinct_variables_are_not_the_same_subtree() {
    let a = variable("b", Type::Bool);
    let b = variable("b", Type::Bool);
    let expr = binary(BinaryOp::And, Expr::Variable(a), Expr::Variable(b));

    assert_eq!(optimize_expr(expr.clone()), expr);
}

#[test]
fn test_optimizes_inside_lists_subscripts_and_calls() {
    let f = Rc::new(Function {
        name: "f".to_string(),
        ty: Type::function(vec![Type::Int], Type::Int),
        intrinsic: None,
    });

    let list = Expr::List {
        elements: vec![binary(BinaryOp::Add, int(1), int(1)), int(3)],
        ty: Type::list(Type::Int),
    };
    let subscript = Expr::Subscript {
        list: Box::new(list),
        index: Box::new(binary(BinaryOp::Subtract, int(1), int(1))),
        ty: Type::Int,
    };

    assert_eq!(
        optimize_expr(call(&f, vec![subscript])),
        call(
            &f,
            vec![Expr::Subscript {
                list: Box::new(Expr::List {
                    elements: vec![int(2), int(3)],
                    ty: Type::list(Type::Int),
                }),
                index: Box::new(int(0)),
                ty: Type::Int,
            }]
        )
    );
}

#[test]
fn test_removes_always_true_and_always_false_branches() {
    let program = Program {
        statements: vec![
            Stmt::If(IfStatement {
                test: boolean(true),
                consequent: vec![speak(int(1))],
                alternate: Alternate::Block(vec![speak(int(2))]),
            }),
            Stmt::If(IfStatement {
                test: boolean(false),
                consequent: vec![speak(int(3))],
                alternate: Alternate::Block(vec![speak(int(4)), speak(int(5))]),
            }),
            Stmt::ShortIf(ShortIfStatement {
                test: boolean(true),
                consequent: vec![speak(int(6))],
            }),
            Stmt::ShortIf(ShortIfStatement {
                test: boolean(false),
                consequent: vec![speak(int(7))],
            }),
        ],
    };

    assert_eq!(
        optimize(program).statements,
        vec![
            speak(int(1)),
            speak(int(4)),
            speak(int(5)),
            speak(int(6))
        ]
    );
}

#[test]
fn test_folded_tests_select_a_branch() {
    let program = Program {
        statements: vec![Stmt::If(IfStatement {
            test: binary(BinaryOp::Less, int(1), int(2)),
            consequent: vec![speak(binary(BinaryOp::Add, int(1), int(1)))],
            alternate: Alternate::Block(vec![]),
        })],
    };

    assert_eq!(optimize(program).statements, vec![speak(int(2))]);
}

#[test]
fn test_collapsed_elif_becomes_an_else_block() {
    let b = variable("b", Type::Bool);
    let program = Program {
        statements: vec![Stmt::If(IfStatement {
            test: Expr::Variable(b.clone()),
            consequent: vec![speak(int(1))],
            alternate: Alternate::If(Box::new(IfStatement {
                test: boolean(true),
                consequent: vec![speak(int(2))],
                alternate: Alternate::Block(vec![speak(int(3))]),
            })),
        })],
    };

    assert_eq!(
        optimize(program).statements,
        vec![Stmt::If(IfStatement {
            test: Expr::Variable(b),
            consequent: vec![speak(int(1))],
            alternate: Alternate::Block(vec![speak(int(2))]),
        })]
    );
}

#[test]
fn test_false_head_promotes_the_elif() {
    let b = variable("b", Type::Bool);
    let program = Program {
        statements: vec![Stmt::If(IfStatement {
            test: boolean(false),
            consequent: vec![speak(int(1))],
            alternate: Alternate::ShortIf(Box::new(ShortIfStatement {
                test: Expr::Variable(b.clone()),
                consequent: vec![speak(int(2))],
            })),
        })],
    };

    assert_eq!(
        optimize(program).statements,
        vec![Stmt::ShortIf(ShortIfStatement {
            test: Expr::Variable(b),
            consequent: vec![speak(int(2))],
        })]
    );
}

#[test]
fn test_optimizes_function_bodies() {
    let fun = Rc::new(Function {
        name: "f".to_string(),
        ty: Type::function(vec![], Type::Int),
        intrinsic: None,
    });

    let program = Program {
        statements: vec![Stmt::FunctionDeclaration(FunctionDeclaration {
            fun: fun.clone(),
            params: vec![],
            body: vec![Stmt::Return(binary(BinaryOp::Multiply, int(6), int(7)))],
        })],
    };

    assert_eq!(
        optimize(program).statements,
        vec![Stmt::FunctionDeclaration(FunctionDeclaration {
            fun,
            params: vec![],
            body: vec![Stmt::Return(int(42))],
        })]
    );
}

#[test]
fn test_tail_calls_only_optimize_their_arguments() {
    let f = Rc::new(Function {
        name: "f".to_string(),
        ty: Type::function(vec![Type::Int], Type::Int),
        intrinsic: None,
    });
    let tail_call = call(&f, vec![binary(BinaryOp::Multiply, int(2), int(3))]);

    assert_eq!(optimize_tail(tail_call.clone()), call(&f, vec![int(6)]));
    assert_eq!(optimize_tail(tail_call.clone()), optimize_expr(tail_call));

    let n = variable("n", Type::Int);
    let wrapped = binary(
        BinaryOp::Multiply,
        Expr::Variable(n.clone()),
        call(&f, vec![binary(BinaryOp::Add, int(1), int(2))]),
    );
    assert_eq!(
        optimize_tail(wrapped),
        binary(
            BinaryOp::Multiply,
            Expr::Variable(n.clone()),
            call(&f, vec![int(3)])
        )
    );

    let simplified = binary(
        BinaryOp::Add,
        binary(BinaryOp::Add, int(1), int(2)),
        Expr::Variable(n.clone()),
    );
    assert_eq!(
        optimize_tail(simplified),
        binary(BinaryOp::Add, int(3), Expr::Variable(n))
    );
}

#[test]
fn test_return_operands_use_the_tail_rewrite() {
    let f = Rc::new(Function {
        name: "f".to_string(),
        ty: Type::function(vec![Type::Int], Type::Int),
        intrinsic: None,
    });
    let tail_call = call(&f, vec![binary(BinaryOp::Add, int(1), int(2))]);

    let program = Program {
        statements: vec![Stmt::Return(tail_call)],
    };

    assert_eq!(
        optimize(program).statements,
        vec![Stmt::Return(call(&f, vec![int(3)]))]
    );
}

#[test]
fn test_optimizing_twice_changes_nothing() {
    let x = variable("x", Type::Float);
    let b = variable("b", Type::Bool);
    let program = Program {
        statements: vec![
            Stmt::VariableDeclaration {
                variable: x.clone(),
                initializer: binary(BinaryOp::Add, float(1.0), float(2.2)),
            },
            speak(binary(
                BinaryOp::Subtract,
                float(0.0),
                binary(BinaryOp::Multiply, Expr::Variable(x.clone()), float(1.0)),
            )),
            Stmt::If(IfStatement {
                test: binary(BinaryOp::And, Expr::Variable(b.clone()), boolean(true)),
                consequent: vec![speak(negate(float(2.0)))],
                alternate: Alternate::If(Box::new(IfStatement {
                    test: boolean(false),
                    consequent: vec![],
                    alternate: Alternate::Block(vec![speak(Expr::Variable(x))]),
                })),
            }),
        ],
    };

    let once = optimize(program);
    let twice = optimize(once.clone());
    assert_eq!(once, twice);
}
