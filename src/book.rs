use crate::{
    config::Config,
    error::{Error, Result},
    io::{Input, Output},
    point::{Next, Options, Point},
    style::Style,
};
use std::{collections::HashMap, fmt, io};

/// Who wrote a book
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Authors {
    One(String),
    Many(Vec<String>),
}

impl Authors {
    /// Names as a sentence: `A.`, `A and B.`, `A, B, and C.`
    #[must_use]
    pub fn line(&self) -> String {
        let mut line = match self {
            Self::One(name) => name.clone(),
            Self::Many(names) => match names.as_slice() {
                [init @ .., last] if init.len() >= 2 => {
                    format!("{}, and {last}", init.join(", "))
                }
                names => names.join(" and "),
            },
        };
        line.push('.');
        line
    }
}

impl fmt::Display for Authors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line())
    }
}

impl From<&str> for Authors {
    fn from(name: &str) -> Self {
        Self::One(name.to_owned())
    }
}

impl From<String> for Authors {
    fn from(name: String) -> Self {
        Self::One(name)
    }
}

impl<S: Into<String>> From<Vec<S>> for Authors {
    fn from(names: Vec<S>) -> Self {
        Self::Many(names.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Authors {
    fn from(names: [S; N]) -> Self {
        Self::Many(names.into_iter().map(Into::into).collect())
    }
}

/// A whole story: named points, the one to start from, and how to tell them.
///
/// Points may name points that don't exist yet. Those names are only looked
/// up while the story is told, see [`Book::check`] to find them earlier.
#[derive(Clone, Debug)]
pub struct Book {
    title: String,
    authors: Authors,
    points: HashMap<String, Point>,
    start: Option<String>,
    config: Config,
}

impl Book {
    #[must_use]
    pub fn new(title: impl Into<String>, authors: impl Into<Authors>) -> Self {
        Self {
            title: title.into(),
            authors: authors.into(),
            points: HashMap::new(),
            start: None,
            config: Config::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    #[must_use]
    pub fn authors(&self) -> &Authors {
        &self.authors
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn point(&self, name: &str) -> Option<&Point> {
        self.points.get(name)
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, &Point)> {
        self.points.iter().map(|(name, point)| (name.as_str(), point))
    }

    /// Adds or replaces a point, returning the replaced one
    pub fn insert_point(&mut self, name: impl Into<String>, point: Point) -> Option<Point> {
        self.points.insert(name.into(), point)
    }

    /// Adds a point that shows `text` and moves on to `next`
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] if `text` has a malformed pause block
    pub fn add_narrative(
        &mut self,
        name: impl Into<String>,
        text: &str,
        next: impl Into<Next>,
    ) -> Result<()> {
        self.insert_point(name, Point::narrative(text, next)?);
        Ok(())
    }

    /// Adds a point that shows `text` and lets the player pick one of `options`
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] for a malformed pause block, and those of [`Options::new`]
    pub fn add_decision<I, K, P>(
        &mut self,
        name: impl Into<String>,
        text: &str,
        options: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<String>,
    {
        let options = Options::new(options)?;
        self.insert_point(name, Point::decision(text, options)?);
        Ok(())
    }

    /// # Errors
    ///
    /// [`Error::UnknownPoint`] if there is no such point
    pub fn remove_point(&mut self, name: &str) -> Result<Point> {
        self.points
            .remove(name)
            .ok_or_else(|| Error::UnknownPoint(name.to_owned()))
    }

    pub fn set_start(&mut self, name: impl Into<String>) {
        self.start = Some(name.into());
    }

    fn lookup(&self, name: &str) -> Result<&Point> {
        self.points.get(name).ok_or_else(|| {
            log::error!("story reached missing point `{name}`");
            Error::UnknownPoint(name.to_owned())
        })
    }

    fn show_title<O: Output + ?Sized>(&self, out: &mut O) -> io::Result<()> {
        out.display(&self.config.banner, Style::BOLD)?;
        out.display(&self.title.to_uppercase(), Style::KEYWORD | Style::BOLD)?;
        out.display(&self.config.banner, Style::BOLD)?;
        out.line_break()?;
        out.display(&format!("by {}", self.authors), Style::REGULAR)?;
        out.line_break()
    }

    fn show_end<O: Output + ?Sized>(&self, out: &mut O) -> io::Result<()> {
        out.display(&self.config.end_marker, Style::BOLD)?;
        out.line_break()
    }

    /// Tells the story from the start point until a point ends it.
    ///
    /// The book is borrowed for the whole telling, so points can't change midway.
    ///
    /// # Errors
    ///
    /// [`Error::MissingStartPoint`] before anything is shown, [`Error::UnknownPoint`]
    /// when the story reaches a name with no point, and [`Error::Io`] from `out`/`input`
    pub fn tell<O, I>(&self, out: &mut O, input: &mut I) -> Result<()>
    where
        O: Output + ?Sized,
        I: Input + ?Sized,
    {
        let Some(start) = &self.start else {
            log::error!("`{}` has no start point", self.title);
            return Err(Error::MissingStartPoint);
        };
        self.show_title(out)?;
        out.pause(self.config.warm_up)?;
        let mut current = start.clone();
        loop {
            log::debug!("showing point `{current}`");
            match self.lookup(&current)?.execute(out, input, &self.config)? {
                Next::Point(name) => current = name,
                Next::End => break,
            }
        }
        log::debug!("`{}` ended at `{current}`", self.title);
        self.show_end(out)?;
        Ok(())
    }

    /// Shows just the point `name` and returns where it leads, without going there
    ///
    /// # Errors
    ///
    /// [`Error::UnknownPoint`] if there is no such point, and [`Error::Io`] from `out`/`input`
    pub fn run_single_point<O, I>(&self, name: &str, out: &mut O, input: &mut I) -> Result<Next>
    where
        O: Output + ?Sized,
        I: Input + ?Sized,
    {
        Ok(self.lookup(name)?.execute(out, input, &self.config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{Authors, Book};
    use crate::{
        config::Config,
        error::Error,
        io::{ScriptedInput, Transcript},
        point::{Next, Point},
        style::Style,
    };
    use std::time::Duration;

    fn test_book() -> Book {
        let mut book = Book::new("Test Book", "Jon Doe");
        book.add_narrative("start", "Story Text 1", "dec").unwrap();
        book.add_decision(
            "dec",
            "Decision: A or B",
            [("A_OPTION", "sA"), ("B_OPTION", "sB")],
        )
        .unwrap();
        book.add_narrative("sA", "End Story Text 2A", Next::End)
            .unwrap();
        book.add_narrative("sB", "End Story Text 2B", Next::End)
            .unwrap();
        book.set_start("start");
        book
    }

    #[test]
    fn path_following() {
        let book = test_book();
        let mut out = Transcript::new();
        let mut input = ScriptedInput::new(["a_o"]);
        book.tell(&mut out, &mut input).unwrap();
        assert_eq!(
            out.text(),
            "===TEST BOOK===\nby Jon Doe.\nStory Text 1\nDecision: A or B\nEnd Story Text 2A\n====END====\n"
        );
        assert_eq!(out.pauses(), [Duration::from_secs(3)]);
        assert_eq!(out.spans()[1].style, Style::KEYWORD | Style::BOLD);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn other_path() {
        let book = test_book();
        let mut out = Transcript::new();
        book.tell(&mut out, &mut ScriptedInput::new(["nope", " b "]))
            .unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines[3..],
            [
                "Decision: A or B",
                "Your choices are:",
                "A_OPTION",
                "B_OPTION",
                "End Story Text 2B",
                "====END====",
            ]
        );
    }

    #[test]
    fn missing_start_point() {
        let mut book = test_book();
        book.start = None;
        let mut out = Transcript::new();
        let result = book.tell(&mut out, &mut ScriptedInput::default());
        assert!(matches!(result, Err(Error::MissingStartPoint)), "{result:?}");
        assert!(out.text().is_empty());
    }

    #[test]
    fn dangling_point() {
        let mut book = test_book();
        book.remove_point("sA").unwrap();
        let mut out = Transcript::new();
        let result = book.tell(&mut out, &mut ScriptedInput::new(["a"]));
        let Err(Error::UnknownPoint(name)) = result else {
            panic!("expected unknown point, got {result:?}");
        };
        assert_eq!(name, "sA");
        assert!(!out.text().contains("====END===="));
        assert!(book.point("sB").is_some());
    }

    #[test]
    fn remove_missing_point() {
        let mut book = test_book();
        assert!(matches!(
            book.remove_point("nowhere"),
            Err(Error::UnknownPoint(_))
        ));
        assert!(matches!(book.remove_point("sB"), Ok(Point::Narrative { .. })));
    }

    #[test]
    fn parse_errors_surface_when_adding() {
        let mut book = test_book();
        let result = book.add_narrative("bad", "wait|<soon>", Next::End);
        assert!(matches!(result, Err(Error::Parse(_))), "{result:?}");
        assert!(book.point("bad").is_none());
        let result = book.add_narrative("long", "Before|<1e300>|After", Next::End);
        assert!(matches!(result, Err(Error::Parse(_))), "{result:?}");
        let result = book.add_decision("empty", "?", Vec::<(&str, &str)>::new());
        assert!(matches!(result, Err(Error::EmptyOptions)), "{result:?}");
    }

    #[test]
    fn single_point() {
        let book = test_book();
        let mut out = Transcript::new();
        let next = book
            .run_single_point("dec", &mut out, &mut ScriptedInput::new(["B_OPT"]))
            .unwrap();
        assert_eq!(next, Next::point("sB"));
        assert_eq!(out.text(), "Decision: A or B\n");
        assert!(matches!(
            book.run_single_point("ghost", &mut out, &mut ScriptedInput::default()),
            Err(Error::UnknownPoint(_))
        ));
    }

    #[test]
    fn config() {
        let book = test_book().with_config(
            Config::default()
                .with_warm_up(Duration::ZERO)
                .with_banner("~")
                .with_end_marker("fin"),
        );
        let mut out = Transcript::new();
        book.tell(&mut out, &mut ScriptedInput::new([""])).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "~TEST BOOK~");
        assert_eq!(lines.last(), Some(&"fin"));
        assert_eq!(lines[lines.len() - 2], "End Story Text 2A");
        assert_eq!(out.pauses(), [Duration::ZERO]);
    }

    #[test]
    fn author_line() {
        assert_eq!(Authors::from("Jon Doe").line(), "Jon Doe.");
        assert_eq!(Authors::from(["A"]).line(), "A.");
        assert_eq!(Authors::from(["A", "B"]).line(), "A and B.");
        assert_eq!(Authors::from(["A", "B", "C"]).line(), "A, B, and C.");
        assert_eq!(
            Authors::from(vec![
                "A".to_owned(),
                "B".to_owned(),
                "C".to_owned(),
                "D".to_owned()
            ])
            .to_string(),
            "A, B, C, and D."
        );
    }
}
