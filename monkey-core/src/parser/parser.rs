use tracing::debug;

use crate::{
    lexer::prelude::{source_chars, stream_chars, Lexer, Token, TokenKind},
    utils::prelude::SrcSpan,
};
use super::error::{ParseError, ParseErrorType};
use super::ast::{
    parse_grouped, BooleanLiteral, Expression, Identifier, If, Infix, InfixOperator, IntegerLiteral,
    Prefix, PrefixOperator, Program, Statement,
};

pub trait Parse<T: Iterator<Item = Token>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

/// Rule run when a token starts an expression.
pub type PrefixParseFn<T> = fn(&mut Parser<T>) -> Result<Expression, ParseError>;

/// Rule run when a token continues an expression as a binary operator.
pub type InfixParseFn<T> = fn(&mut Parser<T>, Expression) -> Result<Expression, ParseError>;

/// Pratt parser over a token stream.
///
/// `current_token` and `next_token` advance in lockstep. Every parse rule
/// starts with `current_token` on the first token of its construct and
/// leaves it on the last one.
pub struct Parser<T: Iterator<Item = Token>> {
    pub current_token: Token,
    pub next_token: Token,
    errors: Vec<ParseError>,

    tokens: T,
}

impl<T: Iterator<Item = Token>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: Token::eof(0),
            next_token: Token::eof(0),
            errors: vec![],

            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let end = self.next_token.location.end;
        let next = self.tokens.next().unwrap_or_else(|| Token::eof(end));

        self.current_token = std::mem::replace(&mut self.next_token, next);
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.current_token.is(kind)
    }

    pub fn next_is(&self, kind: TokenKind) -> bool {
        self.next_token.is(kind)
    }

    /// Steps onto the next token if it is of `kind`, otherwise leaves the
    /// parser where it is and reports what was found instead.
    pub fn expect_peek(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.next_is(kind) {
            self.step();
            return Ok(());
        }

        parse_error(
            ParseErrorType::ExpectedNextToken {
                expected: kind,
                got: self.next_token.kind,
            },
            self.next_token.location
        )
    }

    pub fn current_precedence(&self) -> Precedence {
        Precedence::from(self.current_token.kind)
    }

    pub fn peek_precedence(&self) -> Precedence {
        Precedence::from(self.next_token.kind)
    }

    /// Parses statements until the end of input.
    ///
    /// A statement that fails to parse is dropped and its error recorded;
    /// parsing resumes at the following token.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = vec![];

        while !self.current_is(TokenKind::Eof) {
            match Statement::parse(self, None) {
                Ok(statement) => statements.push(statement),
                Err(err) => self.record_error(err),
            }

            self.step();
        }

        Program { statements }
    }

    pub(crate) fn record_error(&mut self, err: ParseError) {
        debug!(error = %err, location = %err.span, "dropping statement");
        self.errors.push(err);
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    pub fn prefix_rule(kind: TokenKind) -> Option<PrefixParseFn<T>> {
        let rule: PrefixParseFn<T> = match kind {
            TokenKind::Ident => |parser| Identifier::parse(parser, None).map(Expression::Identifier),
            TokenKind::Int => |parser| IntegerLiteral::parse(parser, None).map(Expression::Integer),
            TokenKind::True
            | TokenKind::False => |parser| BooleanLiteral::parse(parser, None).map(Expression::Boolean),
            TokenKind::Bang => |parser| prefix(parser, PrefixOperator::Bang),
            TokenKind::Minus => |parser| prefix(parser, PrefixOperator::Minus),
            TokenKind::LParen => parse_grouped,
            TokenKind::If => |parser| If::parse(parser, None).map(Expression::If),
            _ => return None,
        };

        Some(rule)
    }

    pub fn infix_rule(kind: TokenKind) -> Option<InfixParseFn<T>> {
        let rule: InfixParseFn<T> = match kind {
            TokenKind::Plus => |parser, left| infix(parser, left, InfixOperator::Plus),
            TokenKind::Minus => |parser, left| infix(parser, left, InfixOperator::Minus),
            TokenKind::Asterisk => |parser, left| infix(parser, left, InfixOperator::Asterisk),
            TokenKind::Slash => |parser, left| infix(parser, left, InfixOperator::Slash),
            TokenKind::LessThan => |parser, left| infix(parser, left, InfixOperator::LessThan),
            TokenKind::GreaterThan => |parser, left| infix(parser, left, InfixOperator::GreaterThan),
            TokenKind::Equal => |parser, left| infix(parser, left, InfixOperator::Equal),
            TokenKind::NotEqual => |parser, left| infix(parser, left, InfixOperator::NotEqual),
            _ => return None,
        };

        Some(rule)
    }
}

/// Binding power of an operator, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
}

impl From<TokenKind> for Precedence {
    fn from(value: TokenKind) -> Self {
        match value {
            TokenKind::Equal | TokenKind::NotEqual => Self::Equals,
            TokenKind::LessThan | TokenKind::GreaterThan => Self::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Self::Sum,
            TokenKind::Slash | TokenKind::Asterisk => Self::Product,
            _ => Self::Lowest,
        }
    }
}

fn prefix<T: Iterator<Item = Token>>(
    parser: &mut Parser<T>,
    operator: PrefixOperator
) -> Result<Expression, ParseError> {
    Prefix::parse_operator(parser, operator).map(Expression::Prefix)
}

fn infix<T: Iterator<Item = Token>>(
    parser: &mut Parser<T>,
    left: Expression,
    operator: InfixOperator
) -> Result<Expression, ParseError> {
    Infix::parse_operator(parser, left, operator).map(Expression::Infix)
}

pub fn parse_program(src: &str) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(Lexer::new(source_chars(src)));
    let program = parser.parse_program();

    (program, parser.into_errors())
}

pub fn parse_program_from_stream(stream: impl Iterator<Item = char>) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(Lexer::new(stream_chars(stream)));
    let program = parser.parse_program();

    (program, parser.into_errors())
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
