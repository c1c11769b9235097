use std::fmt::Display;
use std::iter::Fuse;

use super::token::{str_to_keyword, Token, TokenKind};
use crate::utils::prelude::SrcSpan;

/// Pairs every char of `src` with its byte offset.
pub fn source_chars(src: &str) -> impl Iterator<Item = (u32, char)> + '_ {
	src.char_indices().map(|(i, c)| (i as u32, c))
}

/// Same as [`source_chars`] for a stream that has no backing string.
pub fn stream_chars(stream: impl Iterator<Item = char>) -> impl Iterator<Item = (u32, char)> {
	stream.scan(0, |pos, c| {
		*pos += c.len_utf8() as u32;
		Some((*pos - c.len_utf8() as u32, c))
	})
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: Fuse<T>,

	exhausted: bool,
}

impl<T: Iterator<Item = (u32, char)>> Display for Lexer<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tnext_position: {},\n\tch: {:?}, next_ch: {:?}\n}}",
			self.position, self.next_position, self.ch, self.next_ch
		)
	}
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
		let mut lexer = Self {
			position: 0,
			next_position: 0,
			ch: None,
			next_ch: None,
			input: input.fuse(),

			exhausted: false,
		};

		lexer.next_char();
		lexer.next_char();

		lexer
	}

	/// Reads the next token. Once the input is exhausted every call yields
	/// an `Eof` token positioned at the end of the input.
	pub fn next_token(&mut self) -> Token {
		self.skip_whitespace();

		match self.ch {
			Some(ch) => match ch {
				'=' => self.eat_one_or_two('=', TokenKind::Assign, TokenKind::Equal),
				'!' => self.eat_one_or_two('=', TokenKind::Bang, TokenKind::NotEqual),
				'+' => self.eat_one_char(TokenKind::Plus),
				'-' => self.eat_one_char(TokenKind::Minus),
				'*' => self.eat_one_char(TokenKind::Asterisk),
				'/' => self.eat_one_char(TokenKind::Slash),
				'<' => self.eat_one_char(TokenKind::LessThan),
				'>' => self.eat_one_char(TokenKind::GreaterThan),
				',' => self.eat_one_char(TokenKind::Comma),
				';' => self.eat_one_char(TokenKind::Semicolon),
				'(' => self.eat_one_char(TokenKind::LParen),
				')' => self.eat_one_char(TokenKind::RParen),
				'{' => self.eat_one_char(TokenKind::LBrace),
				'}' => self.eat_one_char(TokenKind::RBrace),
				c if is_letter(c) => self.lex_ident(),
				c if c.is_ascii_digit() => self.lex_number(),
				_ => self.eat_one_char(TokenKind::Illegal),
			},
			None => Token::eof(self.position),
		}
	}

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let (pos, next) = match self.input.next() {
			Some((pos, ch)) => (pos, Some(ch)),
			None => {
				let width = self.next_ch.map_or(0, |c| c.len_utf8() as u32);

				(self.next_position + width, None)
			}
		};

		self.position = self.next_position;
		self.next_position = pos;

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn skip_whitespace(&mut self) {
		while matches!(self.ch, Some(' ' | '\t' | '\n' | '\r')) {
			self.next_char();
		}
	}

	fn eat_one_char(&mut self, kind: TokenKind) -> Token {
		let start = self.position;
		let literal = self.next_char().map(String::from).unwrap_or_default();
		let end = self.position;

		Token::new(kind, literal, SrcSpan::from(start, end))
	}

	fn eat_one_or_two(&mut self, second: char, single: TokenKind, double: TokenKind) -> Token {
		if self.next_ch != Some(second) {
			return self.eat_one_char(single);
		}

		let start = self.position;
		let mut literal = String::with_capacity(2);

		literal.extend(self.next_char());
		literal.extend(self.next_char());

		let end = self.position;

		Token::new(double, literal, SrcSpan::from(start, end))
	}

	fn lex_ident(&mut self) -> Token {
		let start = self.position;
		let mut ident = String::new();

		while let Some(ch) = self.ch {
			if !(is_letter(ch) || ch.is_ascii_digit()) {
				break;
			}

			ident.extend(self.next_char());
		}

		let end = self.position;
		let kind = str_to_keyword(&ident).unwrap_or(TokenKind::Ident);

		Token::new(kind, ident, SrcSpan::from(start, end))
	}

	fn lex_number(&mut self) -> Token {
		let start = self.position;
		let mut value = String::new();

		while let Some(ch) = self.ch {
			if !ch.is_ascii_digit() {
				break;
			}

			value.extend(self.next_char());
		}

		let end = self.position;

		Token::new(TokenKind::Int, value, SrcSpan::from(start, end))
	}
}

fn is_letter(ch: char) -> bool {
	ch.is_ascii_alphabetic() || ch == '_'
}

/// Yields tokens up to and including the first `Eof`, then stops.
impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = Token;

	fn next(&mut self) -> Option<Self::Item> {
		if self.exhausted {
			return None;
		}

		let token = self.next_token();

		if token.is(TokenKind::Eof) {
			self.exhausted = true;
		}

		Some(token)
	}
}
