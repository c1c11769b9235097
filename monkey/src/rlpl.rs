use std::io::{BufRead, Write};

use monkey_core::lexer::prelude::{source_chars, Lexer, TokenKind};

use crate::repl::{read_line, PROMPT};

pub fn start(mut input: impl BufRead, mut output: impl Write) -> std::io::Result<()> {
	loop {
		write!(output, "{}", PROMPT)?;
		output.flush()?;

		let Some(line) = read_line(&mut input)? else {
			return Ok(());
		};

		match line.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				for token in Lexer::new(source_chars(&line)) {
					if token.is(TokenKind::Eof) {
						break;
					}

					writeln!(output, "{}", token)?;
				}
			}
		}
	}
}
