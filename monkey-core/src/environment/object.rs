use std::fmt::Display;

pub const TRUE: Object = Object::Boolean { value: true };
pub const FALSE: Object = Object::Boolean { value: false };
pub const NULL: Object = Object::Null;

/// Runtime value produced by evaluation.
///
/// `Boolean` and `Null` only ever come from the [`TRUE`], [`FALSE`] and
/// [`NULL`] constants, so comparing two of them by value is comparing their
/// identity. `ReturnValue` is a control signal carried out of blocks and is
/// unwrapped before it reaches the caller of [`crate::eval::eval_program`].
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Integer {
        value: i64
    },
    Boolean {
        value: bool
    },
    Null,
    ReturnValue {
        value: Box<Object>
    },
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Integer { value } => write!(f, "{value}"),
            Object::Boolean { value } => write!(f, "{value}"),
            Object::Null => write!(f, "null"),
            Object::ReturnValue { value } => write!(f, "{value}"),
        }
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        if value { TRUE } else { FALSE }
    }
}

impl Object {
    pub fn _type(&self) -> ObjectType {
        match self {
            Self::Integer { .. } => ObjectType::Integer,
            Self::Boolean { .. } => ObjectType::Boolean,
            Self::Null => ObjectType::Null,
            Self::ReturnValue { .. } => ObjectType::ReturnValue,
        }
    }

    /// `NULL` and `FALSE` are falsy, everything else (including `0`) is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Null | Self::Boolean { value: false })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Integer,
    Boolean,
    Null,
    ReturnValue,
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Integer => "INTEGER",
            Self::Boolean => "BOOLEAN",
            Self::Null => "NULL",
            Self::ReturnValue => "RETURN_VALUE",
        };

        write!(f, "{name}")
    }
}
