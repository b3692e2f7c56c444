//! Unit tests for the generator.

use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::{
    expr::{format_float, quote},
    generator::{generate, Generator},
};
use crate::{
    analyzer::{
        analyzer::analyze,
        typed_ast::{Function, Variable},
        types::Type,
    },
    lexer::lexer::tokenize,
    optimizer::optimizer::optimize,
    parser::parser::parse,
};

fn compile_source(source: &str) -> String {
    let program = analyze(&parse(tokenize(source).unwrap()).unwrap()).unwrap();
    generate(&optimize(program))
}

fn compile_unoptimized(source: &str) -> String {
    let program = analyze(&parse(tokenize(source).unwrap()).unwrap()).unwrap();
    generate(&program)
}

const FIXTURES: &[(&str, &str, &[&str])] = &[
    (
        "assign",
        r#"
            newtext x is "Ignorance is strength"
            newnum y is 1
            newnum z is -1
            newlist w is [1, 2, 3]
        "#,
        &[
            r#"let x_1 = "Ignorance is strength";"#,
            "let y_2 = 1;",
            "let z_3 = -1;",
            "let w_4 = [1,2,3];",
        ],
    ),
    (
        "conditional",
        r#"
            newbool thought is truth
            if thought is untruth {
                speak("Miniluv")
            } elif thought is truth {
                speak("Minitrue")
            }
        "#,
        &[
            "let thought_1 = true;",
            "if ((thought_1 === false)) {",
            r#"    console.log("Miniluv");"#,
            "} else if ((thought_1 === true)) {",
            r#"    console.log("Minitrue");"#,
            "}",
        ],
    ),
    (
        "long conditional",
        r#"
            newnum x is 3
            if x is 0 {
                speak("zero")
            } elif x is 1 {
                speak("one")
            } elif x is 2 {
                speak("two")
            } else {
                speak("something else i'm not sure")
            }
        "#,
        &[
            "let x_1 = 3;",
            "if ((x_1 === 0)) {",
            r#"    console.log("zero");"#,
            "} else if ((x_1 === 1)) {",
            r#"    console.log("one");"#,
            "} else if ((x_1 === 2)) {",
            r#"    console.log("two");"#,
            "} else {",
            r#"    console.log("something else i'm not sure");"#,
            "}",
        ],
    ),
    (
        "short func",
        r#"
            newfunction shortReturn(x: int) : void { confess }
            shortReturn(1)
        "#,
        &[
            "function shortReturn_1(x_2) {",
            "    return;",
            "}",
            "shortReturn_1(1);",
        ],
    ),
    (
        "confess",
        r#"
            newfunction longReturn(x: int) : int { confess x }
            speak(longReturn(51345))
        "#,
        &[
            "function longReturn_1(x_2) {",
            "    return x_2;",
            "}",
            "console.log(longReturn_1(51345));",
        ],
    ),
    (
        "subscript",
        r#"
            newlist l is [1,2]
            speak(l[0])
        "#,
        &["let l_1 = [1,2];", "console.log(l_1[0]);"],
    ),
    (
        "goodnum",
        r#"
            newfunction goodnumcheck (num : float) : bool {
                if num more 0.0 {
                    confess truth
                } else {
                    confess untruth
                }
            }
        "#,
        &[
            "function goodnumcheck_1(num_2) {",
            "    if ((num_2 > 0)) {",
            "        return true;",
            "    } else {",
            "        return false;",
            "    }",
            "}",
        ],
    ),
    (
        "listplus",
        r#"
            newfunction listplus (list : float[], i : int) : float {
                if i is 0 {
                    confess list[i]
                }
                confess (list[i] plus listplus(list, i minus 1))
            }
        "#,
        &[
            "function listplus_1(list_2, i_3) {",
            "    if ((i_3 === 0)) {",
            "        return list_2[i_3];",
            "    }",
            "    return (list_2[i_3] + listplus_1(list_2, (i_3 - 1)));",
            "}",
        ],
    ),
    (
        "speakloop",
        r#"
            newfunction speakloop (i : int, end : int) : void {
                if i is end {
                    confess
                } else {
                    speak("BIG BROTHER")
                    speakloop(i plus 1, end)
                }
            }
        "#,
        &[
            "function speakloop_1(i_2, end_3) {",
            "    if ((i_2 === end_3)) {",
            "        return;",
            "    } else {",
            r#"        console.log("BIG BROTHER");"#,
            "        speakloop_1((i_2 + 1), end_3);",
            "    }",
            "}",
        ],
    ),
    (
        "intrinsics",
        "speak(sqrt(2.0))\ndistance(3.0, 4.0)\nspeak(abs(-1.5))",
        &[
            "console.log(Math.sqrt(2));",
            "Math.hypot(3, 4);",
            "console.log(Math.abs(-1.5));",
        ],
    ),
    (
        "coalesce",
        "newnum x is 1?\nspeak(x ?? 2)",
        &["let x_1 = 1;", "console.log((x_1 ?? 2));"],
    ),
    (
        "comment",
        "//this is a comment\n#all of this should be ignored\n",
        &[],
    ),
];

#[test]
fn test_generates_fixtures() {
    for (name, source, expected) in FIXTURES {
        assert_eq!(compile_source(source), expected.join("\n"), "{name}");
    }
}

#[test]
fn test_relational_operators_keep_their_grouping() {
    let source = "newnum y is 2\nnewnum z is 1.2\n\
                  speak(1 lessis y and \"x\" more \"y\" and 3.5 less z)";

    assert_eq!(
        compile_source(source),
        [
            "let y_1 = 2;",
            "let z_2 = 1.2;",
            r#"console.log((((1 <= y_1) && ("x" > "y")) && (3.5 < z_2)));"#,
        ]
        .join("\n")
    );
}

#[test]
fn test_logical_operators_keep_their_grouping() {
    let source = "newnum x is 2\nnewbool b is truth\nspeak(b or 1 less x or b and x unis 3)";

    assert_eq!(
        compile_source(source),
        [
            "let x_1 = 2;",
            "let b_2 = true;",
            "console.log(((b_2 || (1 < x_1)) || (b_2 && (x_1 !== 3))));",
        ]
        .join("\n")
    );
}

#[test]
fn test_references_reuse_the_declared_name() {
    let source = "newnum x is 1\nnewnum y is x plus x\nspeak(y multiply x)";

    assert_eq!(
        compile_source(source),
        [
            "let x_1 = 1;",
            "let y_2 = (x_1 + x_1);",
            "console.log((y_2 * x_1));",
        ]
        .join("\n")
    );
}

#[test]
fn test_shadowed_names_get_distinct_suffixes() {
    let source = "newnum x is 1\nnewfunction f(x: int) : int { confess x }\nspeak(f(x))";

    assert_eq!(
        compile_source(source),
        [
            "let x_1 = 1;",
            "function f_2(x_3) {",
            "    return x_3;",
            "}",
            "console.log(f_2(x_1));",
        ]
        .join("\n")
    );
}

#[test]
fn test_optimized_declaration_is_folded() {
    assert_eq!(compile_source("newnum x is 1.0 plus 2.2"), "let x_1 = 3.2;");
    assert_eq!(
        compile_unoptimized("newnum x is 1.0 plus 2.2"),
        "let x_1 = (1 + 2.2);"
    );
}

#[test]
fn test_eliminated_branches_are_spliced_in_place() {
    let source = "if 1 less 2 {\n speak(\"yes\")\n} else {\n speak(\"no\")\n}\nspeak(\"done\")";

    assert_eq!(
        compile_source(source),
        [r#"console.log("yes");"#, r#"console.log("done");"#].join("\n")
    );
}

#[test]
fn test_negated_base_of_exponent_is_parenthesized() {
    assert_eq!(
        compile_unoptimized("speak((-2) exp 3)"),
        "console.log(((-(2)) ** 3));"
    );

    assert_eq!(
        compile_source("newnum a is 2\nspeak((-a) exp 2)"),
        ["let a_1 = 2;", "console.log(((-(a_1)) ** 2));"].join("\n")
    );
}

#[test]
fn test_prefix_operators() {
    assert_eq!(
        compile_source("newbool b is truth\nspeak(!b)"),
        ["let b_1 = true;", "console.log(!(b_1));"].join("\n")
    );
}

#[test]
fn test_formats_floats_like_javascript() {
    assert_eq!(format_float(0.0), "0");
    assert_eq!(format_float(3.0), "3");
    assert_eq!(format_float(0.625), "0.625");
    assert_eq!(format_float(-8.5), "-8.5");
    assert_eq!(format_float(f64::INFINITY), "Infinity");
    assert_eq!(format_float(f64::NEG_INFINITY), "-Infinity");
    assert_eq!(format_float(f64::NAN), "NaN");
}

#[test]
fn test_quotes_strings_with_escapes() {
    assert_eq!(quote("plain"), r#""plain""#);
    assert_eq!(quote("say \"hi\"\n"), r#""say \"hi\"\n""#);
    assert_eq!(quote("tab\there\\"), r#""tab\there\\""#);
    assert_eq!(quote("nul\0"), r#""nul\x00""#);
    assert_eq!(quote("ünï"), "\"ünï\"");
}

#[test]
fn test_string_escapes_survive_a_full_compile() {
    assert_eq!(
        compile_source(r#"speak("a\tb\x41")"#),
        r#"console.log("a\tbA");"#
    );
}

#[test]
fn test_returned_calls_fold_their_arguments() {
    let source = "newfunction f(x: int) : int { confess x }\n\
                  newfunction g() : int { confess f(2 multiply 3) }\n\
                  speak(f(2 multiply 3))";

    assert_eq!(
        compile_source(source),
        [
            "function f_1(x_2) {",
            "    return x_2;",
            "}",
            "function g_3() {",
            "    return f_1(6);",
            "}",
            "console.log(f_1(6));",
        ]
        .join("\n")
    );
}

#[test]
fn test_names_follow_entity_identity() {
    let x = Rc::new(Variable {
        name: "x".to_string(),
        mutable: false,
        ty: Type::Int,
    });
    let other_x = Rc::new(Variable::clone(&x));
    let f = Rc::new(Function {
        name: "x".to_string(),
        ty: Type::function(vec![], Type::Void),
        intrinsic: None,
    });

    let mut generator = Generator::new();
    assert_eq!(generator.variable_name(&x), "x_1");
    assert_eq!(generator.variable_name(&other_x), "x_2");
    assert_eq!(generator.function_name(&f), "x_3");
    assert_eq!(generator.variable_name(&x), "x_1");
    assert_eq!(generator.function_name(&f), "x_3");
}
