use crate::lex::StrRange;
use std::{io, ops::Range};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Function block that couldn't be read as a pause
#[derive(Clone, Eq, PartialEq, Hash, Debug, Error)]
#[error("block `{block}` at bytes {range:?} can't be parsed: {msg}")]
pub struct ParseError {
    /// text of the offending block
    pub block: String,
    /// byte-index range of the block in the original text
    pub range: Range<usize>,
    pub msg: &'static str,
}

impl ParseError {
    #[inline]
    #[must_use]
    pub fn new(block: &StrRange, msg: &'static str) -> Self {
        Self {
            block: block.slice.to_owned(),
            range: block.range.clone(),
            msg,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("no start point set; did you forget to give the book a start point?")]
    MissingStartPoint,
    #[error("no point named `{0}`")]
    UnknownPoint(String),
    #[error("a decision needs at least one option")]
    EmptyOptions,
    #[error("keyword `{0}` is already taken once upper-cased")]
    DuplicateKeyword(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}
