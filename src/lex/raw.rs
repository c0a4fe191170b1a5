use ::core::{
    iter::{FusedIterator, Peekable},
    ops,
    str::CharIndices,
};

const KEYWORD_CHAR: char = '%';
const BOLD_CHAR: char = '*';
const UNDERLINE_CHAR: char = '_';
const BLINK_CHAR: char = '@';
const ESCAPE_CHAR: char = '`';

/// Formatting switches flipped by markup characters.
///
/// Every switch starts off and flips each time its character is met, so an
/// unterminated switch simply stays on until the end of the text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Toggles {
    /// `%`
    pub keyword: bool,
    /// `*`
    pub bold: bool,
    /// `_`
    pub underline: bool,
    /// `@`
    pub blink: bool,
}

impl Toggles {
    /// Flips the switch bound to `ch`. Returns `false` if `ch` isn't a switch
    fn flip(&mut self, ch: char) -> bool {
        let switch = match ch {
            KEYWORD_CHAR => &mut self.keyword,
            BOLD_CHAR => &mut self.bold,
            UNDERLINE_CHAR => &mut self.underline,
            BLINK_CHAR => &mut self.blink,
            _ => return false,
        };
        *switch = !*switch;
        true
    }
}

const fn is_markup(ch: char) -> bool {
    matches!(
        ch,
        KEYWORD_CHAR | BOLD_CHAR | UNDERLINE_CHAR | BLINK_CHAR | ESCAPE_CHAR
    )
}

/// Characters of a single block, all shown with the same toggles
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub(super) struct Run {
    pub range: ops::Range<usize>,
    pub toggles: Toggles,
}

#[derive(Clone, Debug)]
pub(super) struct Iter<'a> {
    indices: Peekable<CharIndices<'a>>,
    text: &'a str,
    toggles: Toggles,
}

impl<'a> Iter<'a> {
    pub fn new(text: &'a str, toggles: Toggles) -> Self {
        Self {
            indices: text.char_indices().peekable(),
            text,
            toggles,
        }
    }

    pub fn as_full_str(&self) -> &'a str {
        self.text
    }

    /// Switches as they are after everything consumed so far
    pub fn toggles(&self) -> Toggles {
        self.toggles
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Run;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, ch) = self.indices.next()?;
            if ch == ESCAPE_CHAR {
                // A trailing escape has nothing to apply to and is dropped
                let (escaped_index, escaped_ch) = self.indices.next()?;
                return Some(Run {
                    range: escaped_index..escaped_index + escaped_ch.len_utf8(),
                    toggles: self.toggles,
                });
            }
            if self.toggles.flip(ch) {
                continue;
            }
            let mut end = index + ch.len_utf8();
            while let Some((text_index, text_ch)) = self.indices.peek().copied() {
                if is_markup(text_ch) {
                    break;
                }
                self.indices.next();
                end = text_index + text_ch.len_utf8();
            }
            return Some(Run {
                range: index..end,
                toggles: self.toggles,
            });
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.indices.size_hint().1)
    }
}

impl<'a> FusedIterator for Iter<'a> {}

#[cfg(test)]
mod tests {
    use super::{Iter, Run, Toggles};

    fn runs(text: &str) -> Vec<(&str, Toggles)> {
        Iter::new(text, Toggles::default())
            .map(|Run { range, toggles }| (&text[range], toggles))
            .collect()
    }

    #[test]
    fn just_text() {
        const SAMPLE: &str = "Hello, world!";
        assert_eq!(runs(SAMPLE), [(SAMPLE, Toggles::default())]);
    }

    #[test]
    fn switches() {
        let bold = Toggles {
            bold: true,
            ..Toggles::default()
        };
        let bold_underline = Toggles {
            underline: true,
            ..bold
        };
        assert_eq!(
            runs("a *b _c* d_"),
            [
                ("a ", Toggles::default()),
                ("b ", bold),
                ("c", bold_underline),
                (" d", Toggles {
                    underline: true,
                    ..Toggles::default()
                }),
            ]
        );
    }

    #[test]
    fn unterminated_switch_stays_on() {
        let mut iter = Iter::new("%open @and blinking", Toggles::default());
        let run = iter.next().expect("first run");
        assert!(run.toggles.keyword);
        assert!(!run.toggles.blink);
        let run = iter.next().expect("second run");
        assert!(run.toggles.keyword && run.toggles.blink);
        assert_eq!(iter.next(), None);
        assert!(iter.toggles().keyword && iter.toggles().blink);
    }

    #[test]
    fn escapes() {
        let keyword = Toggles {
            keyword: true,
            ..Toggles::default()
        };
        assert_eq!(
            runs("`%not`% ``%yes%"),
            [
                ("%", Toggles::default()),
                ("not", Toggles::default()),
                ("%", Toggles::default()),
                (" ", Toggles::default()),
                ("`", Toggles::default()),
                ("yes", keyword),
            ]
        );
    }

    #[test]
    fn trailing_escape() {
        assert_eq!(runs("end`"), [("end", Toggles::default())]);
        assert!(runs("`").is_empty());
    }

    #[test]
    fn multibyte() {
        const SAMPLE: &str = "héllo *wörld*";
        let collected = runs(SAMPLE);
        assert_eq!(collected[0].0, "héllo ");
        assert_eq!(collected[1].0, "wörld");
        assert!(collected[1].1.bold);
    }

    #[test]
    fn carries_toggles_in() {
        let carried = Toggles {
            blink: true,
            ..Toggles::default()
        };
        let mut iter = Iter::new("still@ off", carried);
        assert_eq!(iter.next().map(|run| run.toggles), Some(carried));
        assert_eq!(
            iter.next().map(|run| run.toggles),
            Some(Toggles::default())
        );
    }
}
