use std::{cell::RefCell, io::Write, path::PathBuf, rc::Rc};

use pretty_assertions::assert_eq;

use crate::{
    environment::prelude::{Environment, Object, FALSE, NULL, TRUE},
    parser::prelude::parse_program,
    utils::prelude::{Error, SrcSpan},
};
use super::{error::EvalError, eval_program, run_file, EvalResult};

fn eval_in(input: &str, env: Rc<RefCell<Environment>>) -> EvalResult {
    let (program, errors) = parse_program(input);

    assert!(errors.is_empty(), "parser had errors for {input:?}: {errors:?}");

    eval_program(&program, env)
}

fn eval(input: &str) -> EvalResult {
    eval_in(input, Environment::shared())
}

fn integer(value: i64) -> Object {
    Object::Integer { value }
}

fn error_message(input: &str) -> String {
    match eval(input) {
        Err(err) => err.to_string(),
        Ok(object) => panic!("expected error for {input:?}, got {object}"),
    }
}

#[test]
fn test_integer_expressions() {
    let cases = [
        ("5", 5),
        ("10", 10),
        ("-5", -5),
        ("-10", -10),
        ("5 + 5 + 5 + 5 - 10", 10),
        ("2 * 2 * 2 * 2 * 2", 32),
        ("-50 + 100 + -50", 0),
        ("5 * 2 + 10", 20),
        ("5 + 2 * 10", 25),
        ("20 + 2 * -10", 0),
        ("50 / 2 * 2 + 10", 60),
        ("2 * (5 + 10)", 30),
        ("3 * 3 * 3 + 10", 37),
        ("3 * (3 * 3) + 10", 37),
        ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
        ("7 / 2", 3),
        ("-7 / 2", -3),
    ];

    for (input, expected) in cases {
        assert_eq!(Ok(integer(expected)), eval(input), "input: {input}");
    }
}

#[test]
fn test_boolean_expressions() {
    let cases = [
        ("true", true),
        ("false", false),
        ("1 < 2", true),
        ("1 > 2", false),
        ("1 < 1", false),
        ("1 > 1", false),
        ("1 == 1", true),
        ("1 != 1", false),
        ("1 == 2", false),
        ("1 != 2", true),
        ("true == true", true),
        ("false == false", true),
        ("true == false", false),
        ("true != false", true),
        ("false != true", true),
        ("(1 < 2) == true", true),
        ("(1 < 2) == false", false),
        ("(1 > 2) == true", false),
        ("(1 > 2) == false", true),
    ];

    for (input, expected) in cases {
        assert_eq!(Ok(Object::from(expected)), eval(input), "input: {input}");
    }
}

#[test]
fn test_bang_operator() {
    let cases = [
        ("!true", FALSE),
        ("!false", TRUE),
        ("!5", FALSE),
        ("!!true", TRUE),
        ("!!false", FALSE),
        ("!!5", TRUE),
        ("!0", FALSE),
        ("!(if (false) { 1 })", TRUE),
    ];

    for (input, expected) in cases {
        assert_eq!(Ok(expected), eval(input), "input: {input}");
    }
}

#[test]
fn test_if_else_expressions() {
    let cases = [
        ("if (true) { 10 }", integer(10)),
        ("if (false) { 10 }", NULL),
        ("if (1) { 10 }", integer(10)),
        ("if (0) { 10 }", integer(10)),
        ("if (1 < 2) { 10 }", integer(10)),
        ("if (1 > 2) { 10 }", NULL),
        ("if (1 > 2) { 10 } else { 20 }", integer(20)),
        ("if (1 < 2) { 10 } else { 20 }", integer(10)),
        ("if (true) { }", NULL),
    ];

    for (input, expected) in cases {
        assert_eq!(Ok(expected), eval(input), "input: {input}");
    }
}

#[test]
fn test_return_statements() {
    let cases = [
        ("return 10;", 10),
        ("return 10; 9;", 10),
        ("return 2 * 5; 9;", 10),
        ("9; return 2 * 5; 9;", 10),
        ("if (10 > 1) { return 10; }", 10),
        (
            "if (10 > 1) {
                if (10 > 1) {
                    return 10;
                }

                return 1;
            }",
            10
        ),
        ("let a = 1; if (a) { if (a) { return a + 1; } 100 } 200", 2),
    ];

    for (input, expected) in cases {
        assert_eq!(Ok(integer(expected)), eval(input), "input: {input}");
    }
}

#[test]
fn test_error_handling() {
    let cases = [
        ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
        ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
        ("5 == true", "type mismatch: INTEGER == BOOLEAN"),
        ("-true", "unknown operator: -BOOLEAN"),
        ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
        ("true > false;", "unknown operator: BOOLEAN > BOOLEAN"),
        ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
        ("if (10 > 1) { true + false; }", "unknown operator: BOOLEAN + BOOLEAN"),
        (
            "if (10 > 1) {
                if (10 > 1) {
                    return true + false;
                }

                return 1;
            }",
            "unknown operator: BOOLEAN + BOOLEAN"
        ),
        ("foobar", "identifier not found: foobar"),
        ("let x = y;", "identifier not found: y"),
        ("10 / 0", "division by zero"),
    ];

    for (input, expected) in cases {
        assert_eq!(expected, error_message(input), "input: {input}");
    }
}

#[test]
fn test_error_locations() {
    assert_eq!(
        Err(EvalError::IdentifierNotFound {
            name: "x".into(),
            location: SrcSpan::from(4, 5),
        }),
        eval("1 + x")
    );

    let err = eval("let a = 1;\nlet b = a / (a - 1);").expect_err("division by zero");

    assert_eq!(SrcSpan::from(19, 29), err.location());
    assert_eq!("Division by zero", err.title());
}

#[test]
fn test_let_statements() {
    let cases = [
        ("let a = 5; a;", 5),
        ("let a = 5 * 5; a;", 25),
        ("let a = 5; let b = a; b;", 5),
        ("let a = 5; let b = a; let c = a + b + 5; c;", 15),
        ("let a = 1; let a = a + 1; a", 2),
    ];

    for (input, expected) in cases {
        assert_eq!(Ok(integer(expected)), eval(input), "input: {input}");
    }

    assert_eq!(Ok(NULL), eval("let a = 5;"));
}

#[test]
fn test_empty_program() {
    assert_eq!(Ok(NULL), eval(""));
}

#[test]
fn test_integer_arithmetic_wraps() {
    let cases = [
        ("9223372036854775807 + 1", i64::MIN),
        ("-9223372036854775807 - 2", i64::MAX),
        ("9223372036854775807 * 2", -2),
    ];

    for (input, expected) in cases {
        assert_eq!(Ok(integer(expected)), eval(input), "input: {input}");
    }
}

#[test]
fn test_environment_persists_between_programs() {
    let env = Environment::shared();

    assert_eq!(Ok(NULL), eval_in("let x = 5;", env.clone()));
    assert_eq!(Ok(integer(10)), eval_in("x * 2", env.clone()));

    // A failed program keeps the bindings made before the error.
    assert!(eval_in("let y = x; z", env.clone()).is_err());
    assert_eq!(Ok(integer(5)), eval_in("y", env.clone()));
}

#[test]
fn test_if_blocks_share_enclosing_scope() {
    assert_eq!(Ok(integer(3)), eval("if (true) { let a = 3; } a"));
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("monkey-{}-{name}", std::process::id()));

    let mut file = std::fs::File::create(&path).expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");

    path
}

#[test]
fn test_run_file() {
    let path = temp_file("ok.mk", "let a = 2;\nlet b = a * 21;\nb\n");

    let result = run_file(path.clone());
    let _ = std::fs::remove_file(path);

    assert_eq!(Ok(integer(42)), result);
}

#[test]
fn test_run_file_parse_error() {
    let src = "let x 5;";
    let path = temp_file("parse.mk", src);

    let result = run_file(path.clone());
    let _ = std::fs::remove_file(&path);

    match result {
        Err(Error::Parse { path: err_path, src: err_src, errors }) => {
            assert_eq!(path, err_path);
            assert_eq!(src, err_src);
            assert_eq!(1, errors.len());
        },
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_run_file_eval_error() {
    let path = temp_file("eval.mk", "-true");

    let result = run_file(path.clone());
    let _ = std::fs::remove_file(&path);

    match result {
        Err(Error::Eval { error, .. }) => {
            assert_eq!("unknown operator: -BOOLEAN", error.to_string());
        },
        other => panic!("expected evaluation error, got {other:?}"),
    }
}

#[test]
fn test_run_file_missing() {
    let path = std::env::temp_dir().join("monkey-this-file-does-not-exist.mk");

    assert_eq!(
        Err(Error::StdIo { err: std::io::ErrorKind::NotFound }),
        run_file(path)
    );
}

#[test]
fn test_return_signal_is_never_an_operand() {
    let cases = [
        ("let x = if (true) { return 5; }; 99", 5),
        ("if (true) { return 1; } + 2", 1),
        ("2 + if (true) { return 1; }", 1),
        ("-if (true) { return 3; }", 3),
        ("if (if (true) { return 4; }) { 10 } else { 20 }", 4),
        ("return if (true) { return 6; }; 7", 6),
    ];

    for (input, expected) in cases {
        assert_eq!(Ok(integer(expected)), eval(input), "input: {input}");
    }
}

#[test]
fn test_let_does_not_bind_return_signal() {
    let env = Environment::shared();

    assert_eq!(Ok(integer(5)), eval_in("let x = if (true) { return 5; };", env.clone()));
    assert_eq!(None, env.borrow().get("x"));
}
