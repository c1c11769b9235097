pub mod error;

#[cfg(test)]
mod tests;

use std::{cell::RefCell, path::PathBuf, rc::Rc};

use tracing::debug;
use utf8_chars::BufReadCharsExt;

use crate::{
    environment::prelude::{Environment, Object, NULL},
    parser::prelude::{
        parse_program_from_stream, BlockStatement, Expression, If, InfixOperator, Node,
        PrefixOperator, Program, Statement,
    },
    utils::prelude::{Error, SrcSpan},
};
use self::error::EvalError;

pub type EvalResult = Result<Object, EvalError>;

/// Evaluates an operand. Errors and return signals both leave the enclosing
/// evaluation at once, so a signal never becomes an operand.
macro_rules! operand {
    ($expression:expr, $env:expr) => {
        match eval_expression($expression, $env)? {
            signal @ Object::ReturnValue { .. } => return Ok(signal),
            object => object,
        }
    };
}

/// Evaluates `program` in `env`.
///
/// A top-level `return` stops evaluation and yields its unwrapped value. An
/// empty program evaluates to `NULL`.
pub fn eval_program(program: &Program, env: Rc<RefCell<Environment>>) -> EvalResult {
    let mut result = NULL;

    for statement in &program.statements {
        match eval_statement(statement, env.clone()) {
            Ok(Object::ReturnValue { value }) => return Ok(*value),
            Ok(object) => result = object,
            Err(err) => {
                debug!(error = %err, location = %err.location(), "evaluation failed");
                return Err(err);
            }
        }
    }

    Ok(result)
}

/// Evaluates a block in the enclosing scope. A return signal is handed back
/// still wrapped so it keeps unwinding through outer blocks.
fn eval_block(block: &BlockStatement, env: Rc<RefCell<Environment>>) -> EvalResult {
    let mut result = NULL;

    for statement in &block.statements {
        result = eval_statement(statement, env.clone())?;

        if let Object::ReturnValue { .. } = result {
            return Ok(result);
        }
    }

    Ok(result)
}

fn eval_statement(statement: &Statement, env: Rc<RefCell<Environment>>) -> EvalResult {
    match statement {
        Statement::Let(let_) => {
            let value = operand!(&let_.value, env.clone());

            env.borrow_mut().set(let_.name.value.clone(), value);

            Ok(NULL)
        },
        Statement::Return(return_) => {
            let value = operand!(&return_.value, env);

            Ok(Object::ReturnValue { value: Box::new(value) })
        },
        Statement::Expression(statement) => eval_expression(&statement.expression, env),
    }
}

fn eval_expression(expression: &Expression, env: Rc<RefCell<Environment>>) -> EvalResult {
    match expression {
        Expression::Identifier(ident) => env.borrow()
            .get(&ident.value)
            .ok_or_else(|| EvalError::IdentifierNotFound {
                name: ident.value.clone(),
                location: ident.location,
            }),
        Expression::Integer(integer) => Ok(Object::Integer { value: integer.value }),
        Expression::Boolean(boolean) => Ok(Object::from(boolean.value)),
        Expression::Prefix(prefix) => {
            let right = operand!(&prefix.right, env);

            eval_prefix(prefix.operator, right, prefix.location)
        },
        Expression::Infix(infix) => {
            let left = operand!(&infix.left, env.clone());
            let right = operand!(&infix.right, env);

            eval_infix(infix.operator, left, right, infix.location)
        },
        Expression::If(if_) => eval_if(if_, env),
    }
}

fn eval_prefix(operator: PrefixOperator, right: Object, location: SrcSpan) -> EvalResult {
    match operator {
        PrefixOperator::Bang => Ok(Object::from(!right.is_truthy())),
        PrefixOperator::Minus => match right {
            Object::Integer { value } => Ok(Object::Integer { value: value.wrapping_neg() }),
            right => Err(EvalError::UnknownPrefixOperator {
                operator,
                right: right._type(),
                location,
            }),
        },
    }
}

fn eval_infix(
    operator: InfixOperator,
    left: Object,
    right: Object,
    location: SrcSpan
) -> EvalResult {
    match (&left, &right) {
        (
            Object::Integer { value: left_value },
            Object::Integer { value: right_value }
        ) => eval_integer_infix(operator, *left_value, *right_value, location),
        _ if left._type() != right._type() => Err(EvalError::TypeMismatch {
            left: left._type(),
            operator,
            right: right._type(),
            location,
        }),
        // Booleans and null are singletons: equal values are the same object.
        _ if operator == InfixOperator::Equal => Ok(Object::from(left == right)),
        _ if operator == InfixOperator::NotEqual => Ok(Object::from(left != right)),
        _ => Err(EvalError::UnknownInfixOperator {
            left: left._type(),
            operator,
            right: right._type(),
            location,
        }),
    }
}

fn eval_integer_infix(
    operator: InfixOperator,
    left_value: i64,
    right_value: i64,
    location: SrcSpan
) -> EvalResult {
    let object = match operator {
        InfixOperator::Plus => Object::Integer { value: left_value.wrapping_add(right_value) },
        InfixOperator::Minus => Object::Integer { value: left_value.wrapping_sub(right_value) },
        InfixOperator::Asterisk => Object::Integer { value: left_value.wrapping_mul(right_value) },
        InfixOperator::Slash => {
            if right_value == 0 {
                return Err(EvalError::DivisionByZero { location });
            }

            Object::Integer { value: left_value.wrapping_div(right_value) }
        },
        InfixOperator::LessThan => Object::from(left_value < right_value),
        InfixOperator::GreaterThan => Object::from(left_value > right_value),
        InfixOperator::Equal => Object::from(left_value == right_value),
        InfixOperator::NotEqual => Object::from(left_value != right_value),
    };

    Ok(object)
}

fn eval_if(if_: &If, env: Rc<RefCell<Environment>>) -> EvalResult {
    let condition = operand!(&if_.condition, env.clone());

    if condition.is_truthy() {
        eval_block(&if_.consequence, env)
    } else if let Some(alternative) = &if_.alternative {
        eval_block(alternative, env)
    } else {
        Ok(NULL)
    }
}

/// Reads, parses and evaluates the file at `path` in a fresh root scope.
pub fn run_file(path: PathBuf) -> Result<Object, Error> {
    let file = match std::fs::File::open(path.clone()) {
        Ok(file) => file,
        Err(err) => {
            let error = Error::StdIo { err: err.kind() };
            return Err(error)
        }
    };

    let file_size = file.metadata()
        .map_err(|err| Error::StdIo { err: err.kind() })?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut read_error = None;
    let mut reader = std::io::BufReader::new(file);

    let stream = reader.chars()
        .map_while(|c| match c {
            Ok(c) => {
                src.push(c);
                Some(c)
            },
            Err(err) => {
                read_error = Some(err.kind());
                None
            }
        });

    let (program, errors) = parse_program_from_stream(stream);

    if let Some(err) = read_error {
        return Err(Error::StdIo { err });
    }

    if !errors.is_empty() {
        return Err(Error::Parse { path, src, errors });
    }

    debug!(statements = program.statements.len(), location = %program.location(), "parsed");

    eval_program(&program, Environment::shared())
        .map_err(|error| Error::Eval { path, src, error })
}
