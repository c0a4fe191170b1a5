use super::{
    blocks,
    raw::{self, Toggles},
};
use core::ops;

const FUNCTION_CHARS: [char; 2] = ['<', '>'];

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct StrRange<'a> {
    /// original text sliced by `self.range`
    pub slice: &'a str,
    /// byte-index range in original text
    pub range: ops::Range<usize>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Event<'a> {
    /// Run of text with the toggles it is shown with
    Text {
        toggles: Toggles,
        content: StrRange<'a>,
    },
    /// Whole block containing `<` or `>`
    Function(StrRange<'a>),
    /// End of a text block
    Break,
}

#[derive(Clone, Debug)]
struct Offset(usize);

impl Offset {
    fn offset_range(&self, range: ops::Range<usize>) -> ops::Range<usize> {
        range.start + self.0..range.end + self.0
    }

    fn slice<'a>(&self, full: &'a str, range: ops::Range<usize>) -> StrRange<'a> {
        StrRange {
            slice: &full[range.clone()],
            range: self.offset_range(range),
        }
    }
}

/// Splits text into blocks and text blocks into runs.
///
/// Toggles carry over from one text block to the next; the escape doesn't.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    current: Option<raw::Iter<'a>>,
    remainder: blocks::Iter<'a>,
    offset: Offset,
    toggles: Toggles,
}

impl<'a> Iter<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            current: None,
            remainder: blocks::Iter::new(text),
            offset: Offset(0),
            toggles: Toggles::default(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current) = &mut self.current {
            if let Some(run) = current.next() {
                return Some(Event::Text {
                    toggles: run.toggles,
                    content: self.offset.slice(current.as_full_str(), run.range),
                });
            }
            self.toggles = current.toggles();
            self.current = None;
            return Some(Event::Break);
        }
        loop {
            self.offset.0 = self.remainder.offset();
            let block = self.remainder.next()?;
            if block.is_empty() {
                continue;
            }
            if block.contains(FUNCTION_CHARS) {
                return Some(Event::Function(self.offset.slice(block, 0..block.len())));
            }
            self.current = Some(raw::Iter::new(block, self.toggles));
            return self.next();
        }
    }
}
