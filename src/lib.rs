//! # Syntax
//!
//! Text of a point is split into blocks by `|`-character. A block with `<` or `>` in it is a
//! function block, and the only function is a pause: `<2.5>` waits for two and a half seconds.
//! Every other block is shown on its own line.
//!
//! Inside text blocks a few characters flip styles on and off. They aren't shown themselves:
//!
//! | Char | Style     | Note                                      |
//! | ---- | --------- | ----------------------------------------- |
//! | %    | KEYWORD   | red, bold and upper-cased; used for choices |
//! | *    | **Bold**  |                                           |
//! | _    | Underline |                                           |
//! | @    | Blink     |                                           |
//!
//! A style stays on until its character comes again, even across blocks. To show one of these
//! characters as-is, put a backtick before it; two backticks show one. Pauses can't be escaped.
//!
//! ```text
//! You hear a *noise*.|<2>|Do you %run% or %hide%?
//! ```
//!
//! ### Branching
//!
//! A [`Book`] holds named points. A narrative point moves on to a fixed point, while a decision
//! point asks the player to type a keyword. Typing any prefix of a keyword is enough, ignoring
//! case and surrounding whitespace, and the first keyword in declaration order that fits wins.
//!
//! ```
//! use muffin::{Book, Next, ScriptedInput, Transcript};
//!
//! let mut book = Book::new("Fruit", "Jon Doe");
//! book.add_decision("start", "Do you eat the %apple%, or the %pear%?", [
//!     ("APPLE", "apple"),
//!     ("PEAR", "pear"),
//! ])?;
//! book.add_narrative("apple", "Crunchy.", Next::End)?;
//! book.add_narrative("pear", "Juicy.", Next::End)?;
//! book.set_start("start");
//!
//! let mut out = Transcript::new();
//! book.tell(&mut out, &mut ScriptedInput::new(["pe"]))?;
//! assert!(out.text().contains("Juicy."));
//!
//! // Text without styling or pauses, as it is shown
//! let pear = book.point("pear").map(|point| point.content().plain_text());
//! assert_eq!(pear.as_deref(), Some("Juicy.\n"));
//! # Ok::<(), muffin::Error>(())
//! ```

mod book;
mod config;
mod error;
mod graph;
pub mod io;
mod lex;
mod point;
mod style;

pub use petgraph;

pub use book::{Authors, Book};
pub use config::Config;
pub use error::{Error, ParseError, Result};
pub use graph::{Guide, Issue, StoryGraph};
pub use io::{Input, Output, ScriptedInput, Terminal, Transcript};
pub use lex::{Event, Iter as EventIter, StrRange, Toggles};
pub use point::{resolve, Next, Options, Point};
pub use style::{event_iter, parse, Action, Sequence, Style};
