use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::error::EvalError,
    lexer::prelude::TokenKind,
    parser::prelude::{ParseError, ParseErrorType},
    utils::prelude::SrcSpan,
};
use super::diagnostic::{Diagnostic, Label, Location};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        errors: Vec<ParseError>
    },
    #[error("evaluation failed: {error}")]
    Eval {
        path: PathBuf,
        src: String,
        error: EvalError
    },
    #[error("IO operation failed: {err}")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();

        if self.pretty(&mut nocolor).is_err() {
            return self.to_string();
        }

        String::from_utf8_lossy(&nocolor.into_inner()).into_owned()
    }

    pub fn pretty(&self, buf: &mut Buffer) -> std::io::Result<()> {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf)?;
            writeln!(buf)?;
        }

        Ok(())
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Parse { path, src, errors } => {
                errors.iter()
                    .map(|error| {
                        let (label, extra) = error.details();

                        // An unexpected end of input points past the last char.
                        let span = match error.error {
                            ParseErrorType::ExpectedNextToken { got: TokenKind::Eof, .. } => SrcSpan {
                                start: src.len() as u32,
                                end: src.len() as u32,
                            },
                            _ => error.span,
                        };

                        Diagnostic {
                            title: "Syntax error".into(),
                            text: extra.join("\n"),
                            location: Some(Location {
                                src,
                                path: path.clone(),
                                label: Label {
                                    text: Some(label.to_string()),
                                    span,
                                },
                            }),
                        }
                    })
                    .collect()
            },
            Error::Eval { path, src, error } => {
                vec![Diagnostic {
                    title: error.title().into(),
                    text: format!("ERROR: {error}"),
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label {
                            text: None,
                            span: error.location(),
                        },
                    }),
                }]
            },
            Error::StdIo { err } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    text: format!("{err}"),
                    location: None,
                }]
            }
        }
    }
}
