use crate::{
    config::Config,
    error::{Error, ParseError, Result},
    io::{Input, Output},
    style::{Sequence, Style},
};
use std::io;

/// Where the story goes after a point
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Next {
    /// name of the point to show next
    Point(String),
    /// the story is over
    End,
}

impl Next {
    #[inline]
    #[must_use]
    pub fn point(name: impl Into<String>) -> Self {
        Self::Point(name.into())
    }

    #[inline]
    #[must_use]
    pub fn as_point(&self) -> Option<&str> {
        match self {
            Self::Point(name) => Some(name),
            Self::End => None,
        }
    }
}

impl From<&str> for Next {
    fn from(name: &str) -> Self {
        Self::Point(name.to_owned())
    }
}

impl From<String> for Next {
    fn from(name: String) -> Self {
        Self::Point(name)
    }
}

impl<S: Into<String>> From<Option<S>> for Next {
    fn from(name: Option<S>) -> Self {
        name.map_or(Self::End, |name| Self::Point(name.into()))
    }
}

fn normalize(line: &str) -> String {
    line.trim().to_uppercase()
}

/// `keyword` cut to the length of `answer`, then upper-cased, equals `answer`.
/// `answer` is expected to be normalized already.
fn is_prefix_match(keyword: &str, answer: &str) -> bool {
    let len = answer.chars().count();
    keyword.chars().take(len).collect::<String>().to_uppercase() == answer
}

/// Keywords of a decision mapped to the points they lead to.
///
/// Keywords keep the order they were given in. That order decides which
/// keyword wins when an answer is a prefix of several, so keywords that are
/// prefixes of one another are a hazard (see [`Options::collisions`]).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Options {
    entries: Vec<(String, String)>,
}

impl Options {
    /// # Errors
    ///
    /// [`Error::EmptyOptions`] if there are no entries, and
    /// [`Error::DuplicateKeyword`] if two keywords are equal once upper-cased
    pub fn new<I, K, P>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<String>,
    {
        let mut collected: Vec<(String, String)> = Vec::new();
        for (keyword, point) in entries {
            let keyword = keyword.into();
            let upper = keyword.to_uppercase();
            if collected
                .iter()
                .any(|(taken, _)| taken.to_uppercase() == upper)
            {
                return Err(Error::DuplicateKeyword(keyword));
            }
            collected.push((keyword, point.into()));
        }
        if collected.is_empty() {
            return Err(Error::EmptyOptions);
        }
        Ok(Self { entries: collected })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(keyword, point)| (keyword.as_str(), point.as_str()))
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(keyword, _)| keyword.as_str())
    }

    /// First keyword, in declaration order, that starts with the trimmed answer
    /// (ignoring case), along with its point. An empty answer matches the first keyword.
    #[must_use]
    pub fn matching(&self, answer: &str) -> Option<(&str, &str)> {
        let answer = normalize(answer);
        self.iter()
            .find(|(keyword, _)| is_prefix_match(keyword, &answer))
    }

    /// Pairs of keywords where one is a prefix of the other, earlier keyword first.
    /// Typing the shorter one in full can never reach the later keyword of the pair.
    #[must_use]
    pub fn collisions(&self) -> Vec<(&str, &str)> {
        let mut collisions = Vec::new();
        for (index, (first, _)) in self.entries.iter().enumerate() {
            let first_upper = first.to_uppercase();
            for (second, _) in &self.entries[index + 1..] {
                let second_upper = second.to_uppercase();
                if first_upper.starts_with(&second_upper)
                    || second_upper.starts_with(&first_upper)
                {
                    collisions.push((first.as_str(), second.as_str()));
                }
            }
        }
        collisions
    }
}

fn remind<O>(options: &Options, out: &mut O, config: &Config) -> io::Result<()>
where
    O: Output + ?Sized,
{
    out.display(&config.reminder, Style::REGULAR)?;
    out.line_break()?;
    for keyword in options.keywords() {
        out.display(&keyword.to_uppercase(), Style::KEYWORD | Style::BOLD)?;
        out.line_break()?;
    }
    Ok(())
}

/// Reads answers until one matches a keyword, reminding the player of the
/// keywords after each miss.
///
/// # Errors
///
/// Only those of `input` and `out`; a miss is never an error
pub fn resolve<O, I>(
    options: &Options,
    out: &mut O,
    input: &mut I,
    config: &Config,
) -> io::Result<Next>
where
    O: Output + ?Sized,
    I: Input + ?Sized,
{
    loop {
        let line = input.read_line(&config.prompt)?;
        log::trace!("read answer {line:?}");
        if let Some((keyword, point)) = options.matching(&line) {
            log::debug!("answer `{}` chose `{keyword}`", line.trim());
            return Ok(Next::point(point));
        }
        log::debug!("answer `{}` matched no keyword", line.trim());
        remind(options, out, config)?;
    }
}

/// Single beat of a story
#[derive(Clone, PartialEq, Debug)]
pub enum Point {
    /// Shows its text and moves on to a fixed point
    Narrative { content: Sequence, next: Next },
    /// Shows its text and lets the player choose by keyword
    Decision { content: Sequence, options: Options },
}

impl Point {
    /// # Errors
    ///
    /// If `text` has a malformed pause block
    pub fn narrative(
        text: &str,
        next: impl Into<Next>,
    ) -> std::result::Result<Self, ParseError> {
        Ok(Self::Narrative {
            content: Sequence::bake(text)?,
            next: next.into(),
        })
    }

    /// # Errors
    ///
    /// If `text` has a malformed pause block
    pub fn decision(text: &str, options: Options) -> std::result::Result<Self, ParseError> {
        Ok(Self::Decision {
            content: Sequence::bake(text)?,
            options,
        })
    }

    #[must_use]
    pub fn content(&self) -> &Sequence {
        match self {
            Self::Narrative { content, .. } | Self::Decision { content, .. } => content,
        }
    }

    /// Names this point may lead to, with the keyword leading there if any
    #[must_use]
    pub fn successors(&self) -> Vec<(Option<&str>, &str)> {
        match self {
            Self::Narrative { next, .. } => next
                .as_point()
                .map(|name| (None, name))
                .into_iter()
                .collect(),
            Self::Decision { options, .. } => options
                .iter()
                .map(|(keyword, name)| (Some(keyword), name))
                .collect(),
        }
    }

    pub fn render<O: Output + ?Sized>(&self, out: &mut O) -> io::Result<()> {
        self.content().play(out)
    }

    /// Decides where to go. A decision may show reminders, but this point's
    /// text isn't shown again.
    pub fn resolve<O, I>(&self, out: &mut O, input: &mut I, config: &Config) -> io::Result<Next>
    where
        O: Output + ?Sized,
        I: Input + ?Sized,
    {
        match self {
            Self::Narrative { next, .. } => Ok(next.clone()),
            Self::Decision { options, .. } => resolve(options, out, input, config),
        }
    }

    /// Renders, then resolves
    pub fn execute<O, I>(&self, out: &mut O, input: &mut I, config: &Config) -> io::Result<Next>
    where
        O: Output + ?Sized,
        I: Input + ?Sized,
    {
        self.render(out)?;
        self.resolve(out, input, config)
    }
}
