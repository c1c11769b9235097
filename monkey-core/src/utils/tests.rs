use std::path::PathBuf;

use crate::{
    eval::error::EvalError,
    parser::prelude::parse_program,
    utils::prelude::{Error, SrcSpan},
};

#[test]
fn test_src_span_union() {
    let span = SrcSpan::from(4, 6).to(SrcSpan::from(1, 2));

    assert_eq!(SrcSpan::from(1, 6), span);
    assert_eq!("1..6", span.to_string());
}

#[test]
fn test_parse_error_report() {
    let src = "let x 5;\nlet = 10;";
    let (_, errors) = parse_program(src);

    let err = Error::Parse {
        path: PathBuf::from("broken.mk"),
        src: src.to_string(),
        errors,
    };

    let report = err.pretty_string();

    assert_eq!(3, report.matches("error: Syntax error").count(), "{report}");
    assert!(report.contains("broken.mk:1:7"), "{report}");
    assert!(report.contains("broken.mk:2:5"), "{report}");
    assert!(report.contains("Not expected this"), "{report}");
    assert!(report.contains("expected next token to be =, got INT instead"), "{report}");
}

#[test]
fn test_unexpected_end_points_past_source() {
    let src = "if (x) { 1";
    let (_, errors) = parse_program(src);

    let report = Error::Parse {
        path: PathBuf::from("open.mk"),
        src: src.to_string(),
        errors,
    }.pretty_string();

    assert!(report.contains("open.mk:1:11"), "{report}");
    assert!(report.contains("Unexpected end of input"), "{report}");
}

#[test]
fn test_eval_error_report() {
    let src = "let a = true;\n-a";

    let report = Error::Eval {
        path: PathBuf::from("neg.mk"),
        src: src.to_string(),
        error: EvalError::UnknownPrefixOperator {
            operator: crate::parser::prelude::PrefixOperator::Minus,
            right: crate::environment::prelude::ObjectType::Boolean,
            location: SrcSpan::from(14, 16),
        },
    }.pretty_string();

    assert!(report.contains("error: Unknown operator"), "{report}");
    assert!(report.contains("neg.mk:2:1"), "{report}");
    assert!(report.contains("ERROR: unknown operator: -BOOLEAN"), "{report}");
}

#[test]
fn test_io_error_report() {
    let report = Error::StdIo { err: std::io::ErrorKind::NotFound }.pretty_string();

    assert!(report.starts_with("error: Standard IO error"), "{report}");
    assert!(report.contains(&std::io::ErrorKind::NotFound.to_string()), "{report}");
}
