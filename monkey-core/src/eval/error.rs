use thiserror::Error;

use crate::{
    environment::prelude::ObjectType,
    parser::prelude::{InfixOperator, PrefixOperator},
    utils::prelude::SrcSpan,
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("identifier not found: {name}")]
    IdentifierNotFound {
        name: String,
        location: SrcSpan,
    },
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: ObjectType,
        operator: InfixOperator,
        right: ObjectType,
        location: SrcSpan,
    },
    #[error("unknown operator: {operator}{right}")]
    UnknownPrefixOperator {
        operator: PrefixOperator,
        right: ObjectType,
        location: SrcSpan,
    },
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: ObjectType,
        operator: InfixOperator,
        right: ObjectType,
        location: SrcSpan,
    },
    #[error("division by zero")]
    DivisionByZero {
        location: SrcSpan,
    },
}

impl EvalError {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::IdentifierNotFound { location, .. }
            | Self::TypeMismatch { location, .. }
            | Self::UnknownPrefixOperator { location, .. }
            | Self::UnknownInfixOperator { location, .. }
            | Self::DivisionByZero { location } => *location,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::IdentifierNotFound { .. } => "Identifier not found",
            Self::TypeMismatch { .. } => "Type mismatch",
            Self::UnknownPrefixOperator { .. }
            | Self::UnknownInfixOperator { .. } => "Unknown operator",
            Self::DivisionByZero { .. } => "Division by zero",
        }
    }
}
