use crate::{
    error::ParseError,
    io::Output,
    lex::{Event, Iter, StrRange, Toggles},
};
use bitflags::bitflags;
use std::{io, time::Duration};

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Style: u8 {
        const REGULAR = 0b0000_0000;
        const KEYWORD = 0b0000_0001;
        const BOLD = 0b0000_0010;
        const UNDERLINE = 0b0000_0100;
        const BLINK = 0b0000_1000;
    }
}

impl From<Toggles> for Style {
    fn from(toggles: Toggles) -> Self {
        let mut style = Style::REGULAR;
        if toggles.keyword {
            style |= Style::KEYWORD | Style::BOLD;
        }
        if toggles.bold {
            style |= Style::BOLD;
        }
        if toggles.underline {
            style |= Style::UNDERLINE;
        }
        if toggles.blink {
            style |= Style::BLINK;
        }
        style
    }
}

/// Single step of showing a piece of text
#[derive(Clone, PartialEq, Debug)]
pub enum Action {
    Text { style: Style, content: String },
    Pause { seconds: f64 },
    /// Ends the line of a text block
    Break,
}

impl Action {
    /// Shows this action with `out`
    ///
    /// # Errors
    ///
    /// Those of `out`, and [`io::ErrorKind::InvalidInput`] for a pause that isn't a
    /// non-negative number of seconds
    pub fn play<O: Output + ?Sized>(&self, out: &mut O) -> io::Result<()> {
        match self {
            Self::Text { style, content } => out.display(content, *style),
            Self::Pause { seconds } => {
                let duration = Duration::try_from_secs_f64(*seconds)
                    .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
                out.pause(duration)
            }
            Self::Break => out.line_break(),
        }
    }
}

/// Go through text and split it into blocks and styled runs
#[must_use]
pub fn event_iter(text: &str) -> Iter {
    Iter::new(text)
}

fn pause_seconds(block: &StrRange) -> Result<f64, ParseError> {
    let inner = block
        .slice
        .trim()
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .ok_or_else(|| ParseError::new(block, "expected `<seconds>`"))?;
    let seconds: f64 = inner
        .trim()
        .parse()
        .map_err(|_| ParseError::new(block, "pause length is not a number"))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ParseError::new(
            block,
            "pause length must be a non-negative number of seconds",
        ));
    }
    Duration::try_from_secs_f64(seconds)
        .map(|_| seconds)
        .map_err(|_| ParseError::new(block, "pause is too long"))
}

/// Turns markup into actions, merging neighbouring runs of the same style.
///
/// # Errors
///
/// If a block holding `<` or `>` isn't exactly `<seconds>`
pub fn parse(text: &str) -> Result<Vec<Action>, ParseError> {
    let mut actions = Vec::new();
    for event in event_iter(text) {
        match event {
            Event::Text { toggles, content } => {
                let style = Style::from(toggles);
                let content = if style.contains(Style::KEYWORD) {
                    content.slice.to_uppercase()
                } else {
                    content.slice.to_owned()
                };
                if let Some(Action::Text {
                    style: last_style,
                    content: last_content,
                }) = actions.last_mut()
                {
                    if *last_style == style {
                        last_content.push_str(&content);
                        continue;
                    }
                }
                actions.push(Action::Text { style, content });
            }
            Event::Function(block) => actions.push(Action::Pause {
                seconds: pause_seconds(&block)?,
            }),
            Event::Break => actions.push(Action::Break),
        }
    }
    Ok(actions)
}

/// Parsed text, ready to be shown any number of times
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Sequence {
    actions: Vec<Action>,
}

impl Sequence {
    /// # Errors
    ///
    /// See [`parse`]
    pub fn bake(text: &str) -> Result<Self, ParseError> {
        parse(text).map(|actions| Self { actions })
    }

    /// Steps [`Sequence::play`] goes through, in order
    #[inline]
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn play<O: Output + ?Sized>(&self, out: &mut O) -> io::Result<()> {
        self.actions.iter().try_for_each(|action| action.play(out))
    }

    /// Text with styling and pauses stripped, one line per text block
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for action in &self.actions {
            match action {
                Action::Text { content, .. } => text.push_str(content),
                Action::Break => text.push('\n'),
                Action::Pause { .. } => (),
            }
        }
        text
    }
}
