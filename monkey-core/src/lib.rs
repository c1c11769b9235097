pub mod lexer;
pub mod parser;
pub mod environment;
pub mod eval;
pub mod utils;

use std::{cell::RefCell, rc::Rc};

use environment::prelude::{Environment, Object};
use eval::error::EvalError;
use lexer::prelude::{source_chars, Lexer, Token};
use parser::prelude::{parse_program, ParseError, Program};

pub use eval::run_file;

/// Every token of `src`, ending with a single `EOF` token.
pub fn tokenize(src: &str) -> Vec<Token> {
    Lexer::new(source_chars(src)).collect()
}

pub fn parse(src: &str) -> (Program, Vec<ParseError>) {
    parse_program(src)
}

pub fn evaluate(program: &Program, env: Rc<RefCell<Environment>>) -> Result<Object, EvalError> {
    eval::eval_program(program, env)
}
