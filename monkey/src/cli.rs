use std::{
    io::{IsTerminal, Write},
    time::Duration,
};
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

pub(crate) fn print_running(text: &str) {
    print_colourful_prefix("Running", Color::Magenta, text)
}

pub(crate) fn print_finished(duration: Duration) {
    print_colourful_prefix("Finished", Color::Green, &format!("in {}", seconds(duration)))
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_millis() as f32 / 1000.)
}

pub fn print_colourful_prefix(prefix: &str, color: Color, text: &str) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    let written = write_colourful_prefix(&mut buffer, prefix, color, text)
        .and_then(|_| buffer_writer.print(&buffer));

    if let Err(err) = written {
        tracing::warn!(error = %err, "could not write to stderr");
    }
}

fn write_colourful_prefix(
    buffer: &mut Buffer,
    prefix: &str,
    color: Color,
    text: &str
) -> std::io::Result<()> {
    buffer.set_color(
        ColorSpec::new()
            .set_intense(true)
            .set_bold(true)
            .set_fg(Some(color)),
    )?;
    write!(buffer, "{prefix: >11}")?;
    buffer.set_color(&ColorSpec::new())?;
    writeln!(buffer, " {text}")
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

fn colour_forced() -> bool {
    if let Ok(force) = std::env::var("FORCE_COLOR") {
        !force.is_empty()
    } else {
        false
    }
}

fn color_choice() -> ColorChoice {
    if colour_forced() {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
