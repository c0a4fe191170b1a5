use ::core::{iter::FusedIterator, str::Split};

pub(super) const BLOCK_CHAR: char = '|';

#[derive(Clone, Debug)]
pub(super) struct Iter<'a> {
    blocks: Split<'a, char>,
    offset: usize,
}

impl<'a> Iter<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            blocks: text.split(BLOCK_CHAR),
            offset: 0,
        }
    }

    /// Byte index where the next block starts
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.blocks.next()?;
        // One added for separator char
        self.offset += next.len() + 1;
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.blocks.size_hint()
    }
}

impl<'a> FusedIterator for Iter<'a> {}
