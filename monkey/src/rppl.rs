use std::io::{BufRead, Write};

use monkey_core::parse;

use crate::repl::{print_parser_errors, read_line, PROMPT};

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
				let (program, errors) = parse(&line);

				if errors.is_empty() {
					writeln!(output, "{}", program)?;
				} else {
					print_parser_errors(&mut output, &errors)?;
				}
			}
		}
	}
}
