use std::io::{BufRead, Write};

use monkey_core::{
	environment::prelude::Environment,
	evaluate,
	parse,
	parser::prelude::{ParseError, Statement},
};

pub const PROMPT: &str = ">> ";

const MONKEY_FACE: &str = r#"            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#;

pub fn greeting(user: &str) -> String {
	format!("Hello {user}! This is the Monkey programming language!\nFeel free to type in commands\n")
}

pub fn current_user() -> String {
	std::env::var("USER")
		.or_else(|_| std::env::var("USERNAME"))
		.ok()
		.filter(|name| !name.is_empty())
		.unwrap_or_else(|| "there".to_string())
}

/// Reads one line without its line terminator. `None` at end of input.
pub fn read_line(input: &mut impl BufRead) -> std::io::Result<Option<String>> {
	let mut line = String::new();

	if input.read_line(&mut line)? == 0 {
		return Ok(None);
	}

	if let Some('\n') = line.chars().next_back() {
		line.pop();
	}
	if let Some('\r') = line.chars().next_back() {
		line.pop();
	}

	Ok(Some(line))
}

pub fn print_parser_errors(output: &mut impl Write, errors: &[ParseError]) -> std::io::Result<()> {
	write!(output, "{}", MONKEY_FACE)?;
	writeln!(output, "Woops! We ran into some monkey business here!")?;
	writeln!(output, " parser errors:")?;

	for err in errors {
		writeln!(output, "\t{}", err)?;
	}

	Ok(())
}

/// Read-eval-print loop. Bindings made on one line stay visible on the next.
pub fn start(mut input: impl BufRead, mut output: impl Write) -> std::io::Result<()> {
	let env = Environment::shared();

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

				if !errors.is_empty() {
					print_parser_errors(&mut output, &errors)?;
					continue;
				}

				match evaluate(&program, env.clone()) {
					// A trailing `let` has no value worth echoing.
					Ok(_) if matches!(program.statements.last(), None | Some(Statement::Let(_))) => {},
					Ok(object) => writeln!(output, "{}", object)?,
					Err(err) => writeln!(output, "ERROR: {}", err)?,
				}
			}
		}
	}
}
