//! Where stories are shown and where answers come from.
//!
//! [`Terminal`] talks to stdout/stdin. [`Transcript`] and [`ScriptedInput`]
//! keep everything in memory, which is what tests and headless runs want.

use crate::style::Style;
use colored::{ColoredString, Colorize as _};
use std::{
    collections::VecDeque,
    io::{self, BufRead as _, Write as _},
    thread,
    time::Duration,
};

/// Receiver of rendered story text
pub trait Output {
    fn display(&mut self, text: &str, style: Style) -> io::Result<()>;

    fn line_break(&mut self) -> io::Result<()>;

    /// Blocks for `duration`
    fn pause(&mut self, duration: Duration) -> io::Result<()>;
}

/// Source of player answers
pub trait Input {
    /// Blocks until a whole line is read. Running out of input is an error of kind
    /// [`io::ErrorKind::UnexpectedEof`].
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

fn paint(text: &str, style: Style) -> ColoredString {
    let mut painted = text.normal();
    if style.contains(Style::KEYWORD) {
        painted = painted.red();
    }
    if style.contains(Style::BOLD) {
        painted = painted.bold();
    }
    if style.contains(Style::UNDERLINE) {
        painted = painted.underline();
    }
    if style.contains(Style::BLINK) {
        painted = painted.blink();
    }
    painted
}

/// Standard output and input
#[derive(Clone, Copy, Debug, Default)]
pub struct Terminal;

impl Output for Terminal {
    fn display(&mut self, text: &str, style: Style) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", paint(text, style))?;
        stdout.flush()
    }

    fn line_break(&mut self) -> io::Result<()> {
        writeln!(io::stdout().lock())
    }

    fn pause(&mut self, duration: Duration) -> io::Result<()> {
        io::stdout().flush()?;
        thread::sleep(duration);
        Ok(())
    }
}

impl Input for Terminal {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", prompt.blink())?;
            stdout.flush()?;
        }
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }
        Ok(line)
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

/// Records everything shown instead of printing it. Pauses return at once.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Transcript {
    text: String,
    spans: Vec<Span>,
    pauses: Vec<Duration>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything displayed so far with styling stripped
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    #[must_use]
    pub fn pauses(&self) -> &[Duration] {
        &self.pauses
    }
}

impl Output for Transcript {
    fn display(&mut self, text: &str, style: Style) -> io::Result<()> {
        self.text.push_str(text);
        self.spans.push(Span {
            text: text.to_owned(),
            style,
        });
        Ok(())
    }

    fn line_break(&mut self) -> io::Result<()> {
        self.text.push('\n');
        Ok(())
    }

    fn pause(&mut self, duration: Duration) -> io::Result<()> {
        self.pauses.push(duration);
        Ok(())
    }
}

/// Answers prepared in advance, handed out one per read
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far, one per read attempt
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl Input for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_owned());
        self.lines.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted lines left")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Input as _, Output as _, ScriptedInput, Span, Transcript};
    use crate::style::Style;
    use std::{io, time::Duration};

    #[test]
    fn transcript() {
        let mut out = Transcript::new();
        out.display("Hello, ", Style::REGULAR).unwrap();
        out.display("YOU", Style::KEYWORD | Style::BOLD).unwrap();
        out.line_break().unwrap();
        out.pause(Duration::from_millis(1500)).unwrap();
        out.display("bye", Style::BLINK).unwrap();
        out.line_break().unwrap();
        assert_eq!(out.text(), "Hello, YOU\nbye\n");
        assert_eq!(out.lines().collect::<Vec<_>>(), ["Hello, YOU", "bye"]);
        assert_eq!(out.pauses(), [Duration::from_millis(1500)]);
        assert_eq!(
            out.spans()[1],
            Span {
                text: "YOU".to_owned(),
                style: Style::KEYWORD | Style::BOLD,
            }
        );
    }

    #[test]
    fn scripted_input() {
        let mut input = ScriptedInput::new(["first", "second"]);
        assert_eq!(input.read_line("> ").unwrap(), "first");
        assert_eq!(input.remaining(), 1);
        assert_eq!(input.read_line("? ").unwrap(), "second");
        let err = input.read_line("> ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert_eq!(input.prompts(), ["> ", "? ", "> "]);
    }
}
