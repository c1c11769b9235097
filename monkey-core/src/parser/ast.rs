use std::fmt::Display;

use tracing::trace;

use crate::{
    lexer::prelude::{Token, TokenKind},
    parser::prelude::{parse_error, Parse, ParseError, ParseErrorType, Parser, Precedence},
    utils::prelude::SrcSpan,
};

/// Capability shared by every AST node.
pub trait Node {
    /// Literal of the token the node was built from.
    fn token_literal(&self) -> String;

    fn location(&self) -> SrcSpan;
}

// program -> { <statement> }
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Node for Program {
    fn token_literal(&self) -> String {
        self.statements.first()
            .map(|statement| statement.token_literal())
            .unwrap_or_default()
    }

    fn location(&self) -> SrcSpan {
        match (self.statements.first(), self.statements.last()) {
            (Some(first), Some(last)) => first.location().to(last.location()),
            _ => SrcSpan::default(),
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }

        Ok(())
    }
}

// statement -> <let_statement> | <return_statement> | <expression_statement>
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
}

impl<T: Iterator<Item = Token>> Parse<T> for Statement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let statement = match parser.current_token.kind {
            TokenKind::Let => Self::Let(LetStatement::parse(parser, None)?),
            TokenKind::Return => Self::Return(ReturnStatement::parse(parser, None)?),
            _ => Self::Expression(ExpressionStatement::parse(parser, None)?),
        };

        Ok(statement)
    }
}

impl Node for Statement {
    fn token_literal(&self) -> String {
        match self {
            Self::Let(_) => TokenKind::Let.as_literal(),
            Self::Return(_) => TokenKind::Return.as_literal(),
            Self::Expression(statement) => statement.expression.token_literal(),
        }
    }

    fn location(&self) -> SrcSpan {
        match self {
            Self::Let(statement) => statement.location,
            Self::Return(statement) => statement.location,
            Self::Expression(statement) => statement.location,
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Let(statement) => write!(f, "{statement}"),
            Self::Return(statement) => write!(f, "{statement}"),
            Self::Expression(statement) => write!(f, "{statement}"),
        }
    }
}

// let_statement -> let <identifier> = <expression> [;]
#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    pub name: Identifier,
    pub value: Expression,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = Token>> Parse<T> for LetStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        trace!("parse_let_statement");

        let start = parser.current_token.location;

        parser.expect_peek(TokenKind::Ident)?;
        let name = Identifier::parse(parser, None)?;

        parser.expect_peek(TokenKind::Assign)?;
        parser.step();

        let value = Expression::parse(parser, Some(Precedence::Lowest))?;

        if parser.next_is(TokenKind::Semicolon) {
            parser.step();
        }

        Ok(Self {
            name,
            value,
            location: start.to(parser.current_token.location),
        })
    }
}

impl Display for LetStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "let {} = {};", self.name, self.value)
    }
}

// return_statement -> return <expression> [;]
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Expression,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = Token>> Parse<T> for ReturnStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        trace!("parse_return_statement");

        let start = parser.current_token.location;
        parser.step();

        let value = Expression::parse(parser, Some(Precedence::Lowest))?;

        if parser.next_is(TokenKind::Semicolon) {
            parser.step();
        }

        Ok(Self {
            value,
            location: start.to(parser.current_token.location),
        })
    }
}

impl Display for ReturnStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "return {};", self.value)
    }
}

// expression_statement -> <expression> [;]
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = Token>> Parse<T> for ExpressionStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        trace!("parse_expression_statement");

        let expression = Expression::parse(parser, Some(Precedence::Lowest))?;
        let location = expression.location();

        if parser.next_is(TokenKind::Semicolon) {
            parser.step();
        }

        Ok(Self {
            expression,
            location,
        })
    }
}

impl Display for ExpressionStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}

// block -> { { <statement> } }
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = Token>> Parse<T> for BlockStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        trace!("parse_block_statement");

        let start = parser.current_token.location;
        let mut statements = vec![];

        parser.step();

        while !parser.current_is(TokenKind::RBrace) {
            if parser.current_is(TokenKind::Eof) {
                return parse_error(
                    ParseErrorType::ExpectedNextToken {
                        expected: TokenKind::RBrace,
                        got: TokenKind::Eof,
                    },
                    parser.current_token.location
                );
            }

            // A broken statement is recorded and skipped; the block goes on.
            match Statement::parse(parser, None) {
                Ok(statement) => statements.push(statement),
                Err(err) => parser.record_error(err),
            }

            parser.step();
        }

        Ok(Self {
            statements,
            location: start.to(parser.current_token.location),
        })
    }
}

impl Node for BlockStatement {
    fn token_literal(&self) -> String {
        TokenKind::LBrace.as_literal()
    }

    fn location(&self) -> SrcSpan {
        self.location
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }

        Ok(())
    }
}

// expression -> <identifier> | <integer> | <boolean> | <prefix> | <infix> | <if> | "(" <expression> ")"
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Boolean(BooleanLiteral),
    Prefix(Prefix),
    Infix(Infix),
    If(If),
}

impl<T: Iterator<Item = Token>> Parse<T> for Expression {
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let precedence = precedence.unwrap_or(Precedence::Lowest);
        let _span = tracing::trace_span!(
            "parse_expression",
            token = %parser.current_token.kind,
            ?precedence
        ).entered();

        let Some(prefix) = Parser::<T>::prefix_rule(parser.current_token.kind) else {
            return parse_error(
                ParseErrorType::NoPrefixParseFn { kind: parser.current_token.kind },
                parser.current_token.location
            );
        };

        let mut left = prefix(parser)?;

        while !parser.next_is(TokenKind::Semicolon) && precedence < parser.peek_precedence() {
            let Some(infix) = Parser::<T>::infix_rule(parser.next_token.kind) else {
                return Ok(left);
            };

            parser.step();

            left = infix(parser, left)?;
        }

        Ok(left)
    }
}

impl Node for Expression {
    fn token_literal(&self) -> String {
        match self {
            Self::Identifier(ident) => ident.value.clone(),
            Self::Integer(integer) => integer.value.to_string(),
            Self::Boolean(boolean) => boolean.value.to_string(),
            Self::Prefix(prefix) => prefix.operator.to_string(),
            Self::Infix(infix) => infix.operator.to_string(),
            Self::If(_) => TokenKind::If.as_literal(),
        }
    }

    fn location(&self) -> SrcSpan {
        match self {
            Self::Identifier(ident) => ident.location,
            Self::Integer(integer) => integer.location,
            Self::Boolean(boolean) => boolean.location,
            Self::Prefix(prefix) => prefix.location,
            Self::Infix(infix) => infix.location,
            Self::If(if_) => if_.location,
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::Integer(integer) => write!(f, "{integer}"),
            Self::Boolean(boolean) => write!(f, "{boolean}"),
            Self::Prefix(prefix) => write!(f, "{prefix}"),
            Self::Infix(infix) => write!(f, "{infix}"),
            Self::If(if_) => write!(f, "{if_}"),
        }
    }
}

// identifier -> (<letter> | _) { <letter> | <digit> | _ }
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = Token>> Parse<T> for Identifier {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        trace!("parse_identifier");

        let Token { literal, location, .. } = &parser.current_token;

        Ok(Self {
            value: literal.clone(),
            location: *location,
        })
    }
}

impl Node for Identifier {
    fn token_literal(&self) -> String {
        self.value.clone()
    }

    fn location(&self) -> SrcSpan {
        self.location
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub value: i64,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = Token>> Parse<T> for IntegerLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        trace!("parse_integer_literal");

        let Token { literal, location, .. } = &parser.current_token;

        match literal.parse::<i64>() {
            Ok(value) => Ok(Self {
                value,
                location: *location,
            }),
            Err(_) => parse_error(
                ParseErrorType::InvalidInteger { literal: literal.clone() },
                *location
            ),
        }
    }
}

impl Display for IntegerLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub value: bool,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = Token>> Parse<T> for BooleanLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        trace!("parse_boolean");

        Ok(Self {
            value: parser.current_is(TokenKind::True),
            location: parser.current_token.location,
        })
    }
}

impl Display for BooleanLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Bang,
    Minus,
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bang => write!(f, "!"),
            Self::Minus => write!(f, "-"),
        }
    }
}

// prefix -> (! | -) <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    pub operator: PrefixOperator,
    pub right: Box<Expression>,
    pub location: SrcSpan,
}

impl Prefix {
    /// Parses the operand of `operator`, which is the current token.
    pub fn parse_operator<T: Iterator<Item = Token>>(
        parser: &mut Parser<T>,
        operator: PrefixOperator
    ) -> Result<Self, ParseError> {
        trace!(%operator, "parse_prefix_expression");

        let start = parser.current_token.location;
        parser.step();

        let right = Expression::parse(parser, Some(Precedence::Prefix))?;
        let end = right.location();

        Ok(Self {
            operator,
            right: Box::new(right),
            location: start.to(end),
        })
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Plus,
    Minus,
    Asterisk,
    Slash,
    LessThan,
    GreaterThan,
    Equal,
    NotEqual,
}

impl Display for InfixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Asterisk => "*",
            Self::Slash => "/",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        };

        write!(f, "{operator}")
    }
}

// infix -> <expression> <operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Infix {
    pub left: Box<Expression>,
    pub operator: InfixOperator,
    pub right: Box<Expression>,
    pub location: SrcSpan,
}

impl Infix {
    /// Parses the right operand of `operator`, which is the current token.
    pub fn parse_operator<T: Iterator<Item = Token>>(
        parser: &mut Parser<T>,
        left: Expression,
        operator: InfixOperator
    ) -> Result<Self, ParseError> {
        trace!(%operator, "parse_infix_expression");

        // Right operand binds at the operator's own precedence: left-associative.
        let precedence = parser.current_precedence();
        parser.step();

        let right = Expression::parse(parser, Some(precedence))?;
        let location = left.location().to(right.location());

        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location,
        })
    }
}

impl Display for Infix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

// if -> if ( <expression> ) <block> [else <block>]
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = Token>> Parse<T> for If {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        trace!("parse_if_expression");

        let start = parser.current_token.location;

        parser.expect_peek(TokenKind::LParen)?;
        parser.step();

        let condition = Expression::parse(parser, Some(Precedence::Lowest))?;

        parser.expect_peek(TokenKind::RParen)?;
        parser.expect_peek(TokenKind::LBrace)?;

        let consequence = BlockStatement::parse(parser, None)?;

        let alternative = if parser.next_is(TokenKind::Else) {
            parser.step();
            parser.expect_peek(TokenKind::LBrace)?;

            Some(BlockStatement::parse(parser, None)?)
        } else {
            None
        };

        Ok(Self {
            condition: Box::new(condition),
            consequence,
            alternative,
            location: start.to(parser.current_token.location),
        })
    }
}

impl Display for If {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if{} {}", self.condition, self.consequence)?;

        if let Some(alternative) = &self.alternative {
            write!(f, "else {alternative}")?;
        }

        Ok(())
    }
}

/// `( <expression> )` yields the inner expression; grouping leaves no node.
pub(crate) fn parse_grouped<T: Iterator<Item = Token>>(
    parser: &mut Parser<T>
) -> Result<Expression, ParseError> {
    trace!("parse_grouped_expression");

    parser.step();

    let expression = Expression::parse(parser, Some(Precedence::Lowest))?;

    parser.expect_peek(TokenKind::RParen)?;

    Ok(expression)
}
