use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::prelude::TokenKind, utils::prelude::SrcSpan};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseErrorType {
    #[error("expected next token to be {expected}, got {got} instead")]
    ExpectedNextToken {
        expected: TokenKind,
        got: TokenKind,
    },
    #[error("no prefix parse function for {kind} found")]
    NoPrefixParseFn {
        kind: TokenKind,
    },
    #[error("could not parse {literal:?} as integer")]
    InvalidInteger {
        literal: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    /// Short label to print under the offending source span.
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::ExpectedNextToken { got: TokenKind::Eof, .. } => {
                ("Unexpected end of input", vec![self.error.to_string()])
            },
            ParseErrorType::ExpectedNextToken { .. } => ("Not expected this", vec![self.error.to_string()]),
            ParseErrorType::NoPrefixParseFn { kind: TokenKind::Illegal } => {
                ("Illegal character", vec![self.error.to_string()])
            },
            ParseErrorType::NoPrefixParseFn { .. } => ("Cannot start an expression", vec![self.error.to_string()]),
            ParseErrorType::InvalidInteger { .. } => ("Integer does not fit in 64 bits", vec![self.error.to_string()]),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ParseError {}
